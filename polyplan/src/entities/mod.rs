mod candidate;
mod config;
mod exclusion;
mod land;
mod layout;
mod occupied;
mod solution;
mod structure;

#[doc(inline)]
pub use candidate::Candidate;

#[doc(inline)]
pub use candidate::CandidateSize;

#[doc(inline)]
pub use config::PlanConfig;

#[doc(inline)]
pub use config::Strategy;

#[doc(inline)]
pub use exclusion::ExclusionZone;

#[doc(inline)]
pub use land::LandArea;

#[doc(inline)]
pub use layout::SiteLayout;

#[doc(inline)]
pub use occupied::Footprint;

#[doc(inline)]
pub use occupied::OccupiedSet;

#[doc(inline)]
pub use occupied::StructureKey;

#[doc(inline)]
pub use solution::LOW_COVERAGE_THRESHOLD;

#[doc(inline)]
pub use solution::PlanSolution;

#[doc(inline)]
pub use solution::PlanWarning;

#[doc(inline)]
pub use structure::Block;

#[doc(inline)]
pub use structure::Structure;
