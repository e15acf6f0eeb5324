#![doc = document_features::document_features!()]
//! The base `polyplan` crate: geometry, data model and I/O for modular greenhouse layout planning.
//! Optimization strategies live in separate crates and build on the [`entities::SiteLayout`].

/// Entities to model a land parcel, its configuration and the structures placed on it
pub mod entities;

/// Geometric primitives, projections and the geometry capability interface
pub mod geometry;

/// Importing external representations into and exporting plans out of this library
pub mod io;

/// Helper functions which do not belong to any specific module
pub mod util;
