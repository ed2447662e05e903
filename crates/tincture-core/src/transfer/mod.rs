//! Transfer function model: control points, interpolation, and range mapping.

pub mod function;
pub mod point;
pub mod range;
