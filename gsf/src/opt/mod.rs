/// Grows placed structures into the free space around them
pub mod expansion;
/// Structures with labels, colors and block grids from the placements of a layout
pub mod assembler;
pub mod budget;
pub mod grid;
/// Rotations allowed by the solar constraint
pub mod orientation;
pub mod search;
/// Module-aligned structure sizes
pub mod sizes;
pub mod validator;
