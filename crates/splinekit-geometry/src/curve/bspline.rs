//! B-spline and NURBS curve implementations.

use serde::{Deserialize, Serialize};
use splinekit_core::{BoundingBox, Result, SplineError, Validate};
use splinekit_math::{Aabb3, Point3};

use super::Curve;
use crate::nurbs::knot::check_degree;
use crate::nurbs::weighted::check_weights;
use crate::nurbs::{build_knot_vector, deboor, weighted_control_points, KnotVector};
use crate::sampling::map_samples;

/// A B-spline curve defined by degree, clamped knot vector, and control points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BSplineCurveParts")]
pub struct BSplineCurve {
    degree: usize,
    knots: KnotVector,
    control_points: Vec<Point3>,
}

#[derive(Deserialize)]
struct BSplineCurveParts {
    degree: usize,
    knots: KnotVector,
    control_points: Vec<Point3>,
}

impl BSplineCurve {
    pub fn new(degree: usize, knots: KnotVector, control_points: Vec<Point3>) -> Result<Self> {
        let curve = Self {
            degree,
            knots,
            control_points,
        };
        curve.validate()?;
        Ok(curve)
    }

    /// Build the curve with a knot vector from [`build_knot_vector`].
    pub fn with_uniform_knots(degree: usize, control_points: Vec<Point3>) -> Result<Self> {
        let knots = build_knot_vector(control_points.len(), degree)?;
        Self::new(degree, knots, control_points)
    }
}

impl TryFrom<BSplineCurveParts> for BSplineCurve {
    type Error = SplineError;

    fn try_from(parts: BSplineCurveParts) -> Result<Self> {
        Self::new(parts.degree, parts.knots, parts.control_points)
    }
}

impl Validate for BSplineCurve {
    fn validate(&self) -> Result<()> {
        check_degree(self.control_points.len(), self.degree)?;
        self.knots
            .check_compatible(self.control_points.len(), self.degree)
    }
}

impl BoundingBox for BSplineCurve {
    type Point = Point3;

    fn bounding_box(&self) -> (Point3, Point3) {
        polygon_bounds(&self.control_points)
    }
}

impl Curve for BSplineCurve {
    fn degree(&self) -> usize {
        self.degree
    }

    fn knots(&self) -> &KnotVector {
        &self.knots
    }

    fn control_points(&self) -> &[Point3] {
        &self.control_points
    }

    fn point_at(&self, t: f64) -> Result<Point3> {
        deboor::curve_point(self.degree, self.knots.as_slice(), &self.control_points, t)
    }
}

/// A NURBS (Non-Uniform Rational B-Spline) curve.
///
/// Extends `BSplineCurve` with one strictly positive weight per control point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NurbsCurveParts")]
pub struct NurbsCurve {
    degree: usize,
    knots: KnotVector,
    control_points: Vec<Point3>,
    weights: Vec<f64>,
}

#[derive(Deserialize)]
struct NurbsCurveParts {
    degree: usize,
    knots: KnotVector,
    control_points: Vec<Point3>,
    weights: Vec<f64>,
}

impl NurbsCurve {
    pub fn new(
        degree: usize,
        knots: KnotVector,
        control_points: Vec<Point3>,
        weights: Vec<f64>,
    ) -> Result<Self> {
        let curve = Self {
            degree,
            knots,
            control_points,
            weights,
        };
        curve.validate()?;
        Ok(curve)
    }

    /// Build the curve with a knot vector from [`build_knot_vector`].
    pub fn with_uniform_knots(
        degree: usize,
        control_points: Vec<Point3>,
        weights: Vec<f64>,
    ) -> Result<Self> {
        let knots = build_knot_vector(control_points.len(), degree)?;
        Self::new(degree, knots, control_points, weights)
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

impl TryFrom<NurbsCurveParts> for NurbsCurve {
    type Error = SplineError;

    fn try_from(parts: NurbsCurveParts) -> Result<Self> {
        Self::new(parts.degree, parts.knots, parts.control_points, parts.weights)
    }
}

impl Validate for NurbsCurve {
    fn validate(&self) -> Result<()> {
        check_degree(self.control_points.len(), self.degree)?;
        self.knots
            .check_compatible(self.control_points.len(), self.degree)?;
        if self.weights.len() != self.control_points.len() {
            return Err(SplineError::shape_mismatch(format!(
                "{} weights for {} control points",
                self.weights.len(),
                self.control_points.len()
            )));
        }
        check_weights(&self.weights)
    }
}

impl BoundingBox for NurbsCurve {
    type Point = Point3;

    fn bounding_box(&self) -> (Point3, Point3) {
        polygon_bounds(&self.control_points)
    }
}

impl Curve for NurbsCurve {
    fn degree(&self) -> usize {
        self.degree
    }

    fn knots(&self) -> &KnotVector {
        &self.knots
    }

    fn control_points(&self) -> &[Point3] {
        &self.control_points
    }

    fn point_at(&self, t: f64) -> Result<Point3> {
        let pw = weighted_control_points(&self.control_points, &self.weights)?;
        deboor::nurbs_curve_point(self.degree, self.knots.as_slice(), &pw, t)
    }

    fn points_at(&self, params: &[f64]) -> Result<Vec<Point3>> {
        let pw = weighted_control_points(&self.control_points, &self.weights)?;
        let knots = self.knots.as_slice();
        map_samples(params, |&t| deboor::nurbs_curve_point(self.degree, knots, &pw, t))
    }
}

fn polygon_bounds(points: &[Point3]) -> (Point3, Point3) {
    Aabb3::from_points(points)
        .map(|bb| (bb.min, bb.max))
        .unwrap_or_default()
}
