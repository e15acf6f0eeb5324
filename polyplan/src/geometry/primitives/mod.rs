mod edge;
mod point;
mod rect;
mod simple_polygon;

#[doc(inline)]
pub use edge::{Edge, edge_intersection, edges_cross, orientation};
#[doc(inline)]
pub use point::Point;
#[doc(inline)]
pub use rect::Rect;
#[doc(inline)]
pub use simple_polygon::{BOUNDARY_EPSILON, PointPosition, SPolygon};
