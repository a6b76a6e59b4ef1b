//! NURBS core algorithms: knot vectors, basis functions, weighted control
//! points, and point evaluation.

pub mod basis;
pub mod deboor;
pub mod knot;
pub mod weighted;

pub use basis::basis_functions;
pub use deboor::*;
pub use knot::{build_knot_vector, find_span, KnotVector};
pub use weighted::{weighted_control_grid, weighted_control_points};
