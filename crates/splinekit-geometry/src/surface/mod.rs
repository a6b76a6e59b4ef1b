//! Surface trait and tensor-product spline surface implementations.

mod bspline;

use splinekit_core::Result;
use splinekit_math::Point3;

use crate::nurbs::KnotVector;
use crate::sampling::{map_samples, SurfaceSampling};

pub use bspline::{BSplineSurface, NurbsSurface};

/// Trait for tensor-product spline surfaces in 3D space.
///
/// Direction 1 is `u`, direction 2 is `v`.
pub trait Surface: Send + Sync {
    /// Degrees `(degree_u, degree_v)`.
    fn degrees(&self) -> (usize, usize);

    fn knots_u(&self) -> &KnotVector;

    fn knots_v(&self) -> &KnotVector;

    /// `control_points()[i][j]` is indexed by direction 1 then direction 2.
    fn control_points(&self) -> &[Vec<Point3>];

    /// Evaluate the surface at parameters `(u, v)`.
    fn point_at(&self, u: f64, v: f64) -> Result<Point3>;

    /// Evaluate every `(u, v)` pair, in order.
    fn points_at(&self, params: &[(f64, f64)]) -> Result<Vec<Point3>> {
        map_samples(params, |&(u, v)| self.point_at(u, v))
    }

    /// Return the u-parameter domain `(u_min, u_max)`.
    fn domain_u(&self) -> (f64, f64) {
        let knots = self.knots_u();
        knots
            .domain(self.degrees().0)
            .unwrap_or((knots.first(), knots.last()))
    }

    /// Return the v-parameter domain `(v_min, v_max)`.
    fn domain_v(&self) -> (f64, f64) {
        let knots = self.knots_v();
        knots
            .domain(self.degrees().1)
            .unwrap_or((knots.first(), knots.last()))
    }

    /// Evaluate the grid `us × vs`; `grid[i][j]` is the point at `(us[i], vs[j])`.
    fn grid_at(&self, us: &[f64], vs: &[f64]) -> Result<Vec<Vec<Point3>>> {
        let params: Vec<(f64, f64)> = us
            .iter()
            .flat_map(|&u| vs.iter().map(move |&v| (u, v)))
            .collect();
        let points = self.points_at(&params)?;
        if vs.is_empty() {
            return Ok(vec![Vec::new(); us.len()]);
        }
        Ok(points.chunks(vs.len()).map(<[Point3]>::to_vec).collect())
    }

    /// Sample the surface uniformly over the configured ranges.
    fn evaluate(&self, sampling: &SurfaceSampling) -> Result<Vec<Vec<Point3>>> {
        let (us, vs) = sampling.parameters(self.domain_u(), self.domain_v());
        log::debug!(
            "evaluating surface on a {}x{} grid over u [{:?}, {:?}], v [{:?}, {:?}]",
            us.len(),
            vs.len(),
            us.first(),
            us.last(),
            vs.first(),
            vs.last()
        );
        self.grid_at(&us, &vs)
    }

    /// Evaluate the surface at every pair of knot values, repeats included,
    /// `knots_u` major.
    fn knot_locations(&self) -> Result<Vec<Point3>> {
        Ok(self
            .grid_at(self.knots_u().as_slice(), self.knots_v().as_slice())?
            .into_iter()
            .flatten()
            .collect())
    }
}
