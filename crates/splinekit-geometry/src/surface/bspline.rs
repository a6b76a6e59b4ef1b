//! B-spline and NURBS surface implementations.

use serde::{Deserialize, Serialize};
use splinekit_core::{BoundingBox, Result, SplineError, Validate};
use splinekit_math::{Aabb3, Point3};

use super::Surface;
use crate::nurbs::knot::check_degree;
use crate::nurbs::weighted::check_weights;
use crate::nurbs::{build_knot_vector, deboor, weighted_control_grid, KnotVector};
use crate::sampling::map_samples;

/// A B-spline surface defined by degrees, knot vectors, and a 2D grid of control points.
///
/// `control_points[i][j]` is the control point at row `i` (u-direction) and
/// column `j` (v-direction).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BSplineSurfaceParts")]
pub struct BSplineSurface {
    degree_u: usize,
    degree_v: usize,
    knots_u: KnotVector,
    knots_v: KnotVector,
    control_points: Vec<Vec<Point3>>,
}

#[derive(Deserialize)]
struct BSplineSurfaceParts {
    degree_u: usize,
    degree_v: usize,
    knots_u: KnotVector,
    knots_v: KnotVector,
    control_points: Vec<Vec<Point3>>,
}

impl BSplineSurface {
    pub fn new(
        degree_u: usize,
        degree_v: usize,
        knots_u: KnotVector,
        knots_v: KnotVector,
        control_points: Vec<Vec<Point3>>,
    ) -> Result<Self> {
        let surface = Self {
            degree_u,
            degree_v,
            knots_u,
            knots_v,
            control_points,
        };
        surface.validate()?;
        Ok(surface)
    }

    /// Build the surface with knot vectors from [`build_knot_vector`] in both directions.
    pub fn with_uniform_knots(
        degree_u: usize,
        degree_v: usize,
        control_points: Vec<Vec<Point3>>,
    ) -> Result<Self> {
        let (knots_u, knots_v) = uniform_knots(&control_points, degree_u, degree_v)?;
        Self::new(degree_u, degree_v, knots_u, knots_v, control_points)
    }
}

impl TryFrom<BSplineSurfaceParts> for BSplineSurface {
    type Error = SplineError;

    fn try_from(parts: BSplineSurfaceParts) -> Result<Self> {
        Self::new(
            parts.degree_u,
            parts.degree_v,
            parts.knots_u,
            parts.knots_v,
            parts.control_points,
        )
    }
}

impl Validate for BSplineSurface {
    fn validate(&self) -> Result<()> {
        check_net(
            &self.control_points,
            (self.degree_u, self.degree_v),
            &self.knots_u,
            &self.knots_v,
        )
    }
}

impl BoundingBox for BSplineSurface {
    type Point = Point3;

    fn bounding_box(&self) -> (Point3, Point3) {
        net_bounds(&self.control_points)
    }
}

impl Surface for BSplineSurface {
    fn degrees(&self) -> (usize, usize) {
        (self.degree_u, self.degree_v)
    }

    fn knots_u(&self) -> &KnotVector {
        &self.knots_u
    }

    fn knots_v(&self) -> &KnotVector {
        &self.knots_v
    }

    fn control_points(&self) -> &[Vec<Point3>] {
        &self.control_points
    }

    fn point_at(&self, u: f64, v: f64) -> Result<Point3> {
        deboor::surface_point(
            self.degree_u,
            self.degree_v,
            self.knots_u.as_slice(),
            self.knots_v.as_slice(),
            &self.control_points,
            u,
            v,
        )
    }
}

/// A NURBS surface (rational tensor-product B-spline surface).
///
/// Extends `BSplineSurface` with a 2D grid of weights, `weights[i][j]`
/// belonging to `control_points[i][j]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NurbsSurfaceParts")]
pub struct NurbsSurface {
    degree_u: usize,
    degree_v: usize,
    knots_u: KnotVector,
    knots_v: KnotVector,
    control_points: Vec<Vec<Point3>>,
    weights: Vec<Vec<f64>>,
}

#[derive(Deserialize)]
struct NurbsSurfaceParts {
    degree_u: usize,
    degree_v: usize,
    knots_u: KnotVector,
    knots_v: KnotVector,
    control_points: Vec<Vec<Point3>>,
    weights: Vec<Vec<f64>>,
}

impl NurbsSurface {
    pub fn new(
        degree_u: usize,
        degree_v: usize,
        knots_u: KnotVector,
        knots_v: KnotVector,
        control_points: Vec<Vec<Point3>>,
        weights: Vec<Vec<f64>>,
    ) -> Result<Self> {
        let surface = Self {
            degree_u,
            degree_v,
            knots_u,
            knots_v,
            control_points,
            weights,
        };
        surface.validate()?;
        Ok(surface)
    }

    /// Build the surface with knot vectors from [`build_knot_vector`] in both directions.
    pub fn with_uniform_knots(
        degree_u: usize,
        degree_v: usize,
        control_points: Vec<Vec<Point3>>,
        weights: Vec<Vec<f64>>,
    ) -> Result<Self> {
        let (knots_u, knots_v) = uniform_knots(&control_points, degree_u, degree_v)?;
        Self::new(degree_u, degree_v, knots_u, knots_v, control_points, weights)
    }

    pub fn weights(&self) -> &[Vec<f64>] {
        &self.weights
    }
}

impl TryFrom<NurbsSurfaceParts> for NurbsSurface {
    type Error = SplineError;

    fn try_from(parts: NurbsSurfaceParts) -> Result<Self> {
        Self::new(
            parts.degree_u,
            parts.degree_v,
            parts.knots_u,
            parts.knots_v,
            parts.control_points,
            parts.weights,
        )
    }
}

impl Validate for NurbsSurface {
    fn validate(&self) -> Result<()> {
        check_net(
            &self.control_points,
            (self.degree_u, self.degree_v),
            &self.knots_u,
            &self.knots_v,
        )?;
        let rows_match = self.weights.len() == self.control_points.len()
            && self
                .weights
                .iter()
                .zip(&self.control_points)
                .all(|(w, p)| w.len() == p.len());
        if !rows_match {
            return Err(SplineError::shape_mismatch(format!(
                "weight grid {} does not match control grid {}",
                shape(&self.weights),
                shape(&self.control_points)
            )));
        }
        check_weights(self.weights.iter().flatten())
    }
}

impl BoundingBox for NurbsSurface {
    type Point = Point3;

    fn bounding_box(&self) -> (Point3, Point3) {
        net_bounds(&self.control_points)
    }
}

impl Surface for NurbsSurface {
    fn degrees(&self) -> (usize, usize) {
        (self.degree_u, self.degree_v)
    }

    fn knots_u(&self) -> &KnotVector {
        &self.knots_u
    }

    fn knots_v(&self) -> &KnotVector {
        &self.knots_v
    }

    fn control_points(&self) -> &[Vec<Point3>] {
        &self.control_points
    }

    fn point_at(&self, u: f64, v: f64) -> Result<Point3> {
        let pw = weighted_control_grid(&self.control_points, &self.weights)?;
        deboor::nurbs_surface_point(
            self.degree_u,
            self.degree_v,
            self.knots_u.as_slice(),
            self.knots_v.as_slice(),
            &pw,
            u,
            v,
        )
    }

    fn points_at(&self, params: &[(f64, f64)]) -> Result<Vec<Point3>> {
        let pw = weighted_control_grid(&self.control_points, &self.weights)?;
        let (knots_u, knots_v) = (self.knots_u.as_slice(), self.knots_v.as_slice());
        map_samples(params, |&(u, v)| {
            deboor::nurbs_surface_point(self.degree_u, self.degree_v, knots_u, knots_v, &pw, u, v)
        })
    }
}

fn shape<T>(grid: &[Vec<T>]) -> String {
    let widths: Vec<usize> = grid.iter().map(Vec::len).collect();
    format!("{}x{:?}", grid.len(), widths)
}

/// Rectangular grid, valid degrees in both directions, compatible knot vectors.
fn check_net(
    control_points: &[Vec<Point3>],
    (degree_u, degree_v): (usize, usize),
    knots_u: &KnotVector,
    knots_v: &KnotVector,
) -> Result<()> {
    let n_u = control_points.len();
    let n_v = control_points.first().map_or(0, Vec::len);
    if control_points.iter().any(|row| row.len() != n_v) {
        return Err(SplineError::shape_mismatch(format!(
            "control grid is ragged: {}",
            shape(control_points)
        )));
    }
    check_degree(n_u, degree_u)?;
    check_degree(n_v, degree_v)?;
    knots_u.check_compatible(n_u, degree_u)?;
    knots_v.check_compatible(n_v, degree_v)
}

fn uniform_knots(
    control_points: &[Vec<Point3>],
    degree_u: usize,
    degree_v: usize,
) -> Result<(KnotVector, KnotVector)> {
    let n_v = control_points.first().map_or(0, Vec::len);
    Ok((
        build_knot_vector(control_points.len(), degree_u)?,
        build_knot_vector(n_v, degree_v)?,
    ))
}

fn net_bounds(control_points: &[Vec<Point3>]) -> (Point3, Point3) {
    Aabb3::from_points(control_points.iter().flatten())
        .map(|bb| (bb.min, bb.max))
        .unwrap_or_default()
}
