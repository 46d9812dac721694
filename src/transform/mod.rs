//! Coordinate transforms: the affine pixel/plane bridge and the pluggable complex maps.

pub mod affine;
pub mod non_linear;
