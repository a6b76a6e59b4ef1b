//! Curve trait and spline curve implementations.

mod bspline;

use splinekit_core::Result;
use splinekit_math::Point3;

use crate::nurbs::KnotVector;
use crate::sampling::{map_samples, CurveSampling};

pub use bspline::{BSplineCurve, NurbsCurve};

/// Trait for spline curves in 3D space.
pub trait Curve: Send + Sync {
    fn degree(&self) -> usize;

    fn knots(&self) -> &KnotVector;

    fn control_points(&self) -> &[Point3];

    /// Evaluate the curve at parameter `t`.
    fn point_at(&self, t: f64) -> Result<Point3>;

    /// Evaluate the curve at every parameter, in order.
    fn points_at(&self, params: &[f64]) -> Result<Vec<Point3>> {
        map_samples(params, |&t| self.point_at(t))
    }

    /// Return the valid parameter domain `(t_min, t_max)`.
    ///
    /// Falls back to the end knots when the knot vector is too short for the degree.
    fn domain(&self) -> (f64, f64) {
        let knots = self.knots();
        knots
            .domain(self.degree())
            .unwrap_or((knots.first(), knots.last()))
    }

    /// Sample the curve uniformly over the configured range.
    fn evaluate(&self, sampling: &CurveSampling) -> Result<Vec<Point3>> {
        let params = sampling.parameters(self.domain());
        log::debug!(
            "evaluating curve at {} samples over [{:?}, {:?}]",
            params.len(),
            params.first(),
            params.last()
        );
        self.points_at(&params)
    }

    /// Evaluate the curve at every knot value, repeats included.
    fn knot_locations(&self) -> Result<Vec<Point3>> {
        self.points_at(self.knots().as_slice())
    }
}
