/// Set of functions to compute and generate [convex hulls](https://en.wikipedia.org/wiki/Convex_hull)
pub mod convex_hull;

mod d_transformation;

/// Set of enums representing various geometric properties
pub mod geo_enums;

/// Set of traits representing various geometric properties & operations
pub mod geo_traits;

/// Set of geometric primitives - atomic building blocks for the geometry module
pub mod primitives;

/// Conversion between geographic coordinates and the local planar frame
pub mod projection;

/// Set of functions to modify geometric shapes
pub mod shape_modification;

/// The narrow set of polygon capabilities the planner relies on
pub mod adapter;

#[doc(inline)]
pub use adapter::{GeometryAdapter, PlanarGeometry};

#[doc(inline)]
pub use d_transformation::DTransformation;

#[doc(inline)]
pub use projection::{LatLng, LocalProjection};
