//! splinekit geometry: knot vectors, basis functions, and B-spline / NURBS
//! curves and surfaces.

pub mod curve;
pub mod nurbs;
pub mod sampling;
pub mod surface;

pub use curve::{BSplineCurve, Curve, NurbsCurve};
pub use nurbs::{build_knot_vector, KnotVector};
pub use sampling::{CurveSampling, SurfaceSampling};
pub use surface::{BSplineSurface, NurbsSurface, Surface};
