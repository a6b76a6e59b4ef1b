//! Point evaluation for B-spline and NURBS curves and surfaces.
//!
//! The rational routines take control points already lifted into homogeneous
//! space (see [`weighted`](super::weighted)), so a batch of evaluations can
//! share one lifted copy.

use std::ops::{Add, Mul};

use splinekit_core::{Result, SplineError};
use splinekit_math::{project, HomogeneousPoint, Point3};

use super::basis::basis_functions;
use super::knot::{check_degree, find_span};

/// Span and non-vanishing basis functions of one parametric direction.
struct LocalBasis {
    span: usize,
    values: Vec<f64>,
}

impl LocalBasis {
    fn at(degree: usize, knots: &[f64], t: f64) -> Result<Self> {
        let span = find_span(degree, knots, t)?;
        Ok(Self {
            span,
            values: basis_functions(degree, knots, span, t),
        })
    }

    /// Index of the first control point influencing this span.
    fn first(&self) -> usize {
        self.span + 1 - self.values.len()
    }
}

fn check_count(what: &str, count: usize, degree: usize, knots: &[f64]) -> Result<()> {
    check_degree(count, degree)?;
    if count + degree + 1 != knots.len() {
        return Err(SplineError::configuration(format!(
            "{count} {what} do not match {} knots with degree {degree}",
            knots.len()
        )));
    }
    Ok(())
}

/// `Σ N_i · P_{first+i}`
fn blend<T>(basis: &LocalBasis, points: &[T], zero: T) -> T
where
    T: Copy + Add<Output = T> + Mul<f64, Output = T>,
{
    basis
        .values
        .iter()
        .zip(&points[basis.first()..])
        .fold(zero, |acc, (&b, &p)| acc + p * b)
}

/// Tensor-product blend: collapse direction 1 for each local direction-2
/// index, then collapse the intermediate points along direction 2.
fn blend_grid<T>(basis_u: &LocalBasis, basis_v: &LocalBasis, grid: &[Vec<T>], zero: T) -> T
where
    T: Copy + Add<Output = T> + Mul<f64, Output = T>,
{
    let v0 = basis_v.first();
    let rows = &grid[basis_u.first()..];

    basis_v
        .values
        .iter()
        .enumerate()
        .map(|(l, &bv)| {
            let column = basis_u
                .values
                .iter()
                .zip(rows)
                .fold(zero, |acc, (&bu, row)| acc + row[v0 + l] * bu);
            (column, bv)
        })
        .fold(zero, |acc, (column, bv)| acc + column * bv)
}

/// Evaluate a B-spline curve point at parameter `t`.
pub fn curve_point(
    degree: usize,
    knots: &[f64],
    control_points: &[Point3],
    t: f64,
) -> Result<Point3> {
    check_count("control points", control_points.len(), degree, knots)?;
    let basis = LocalBasis::at(degree, knots, t)?;
    Ok(blend(&basis, control_points, Point3::ZERO))
}

/// Evaluate a rational B-spline (NURBS) curve point at parameter `t`.
///
/// The combination is formed in homogeneous space and then projected back
/// by dividing through the accumulated weight.
pub fn nurbs_curve_point(
    degree: usize,
    knots: &[f64],
    weighted_points: &[HomogeneousPoint],
    t: f64,
) -> Result<Point3> {
    check_count("weighted control points", weighted_points.len(), degree, knots)?;
    let basis = LocalBasis::at(degree, knots, t)?;
    project(blend(&basis, weighted_points, HomogeneousPoint::ZERO))
}

/// Evaluate a B-spline surface point at parameters `(u, v)`.
///
/// `control_points[i][j]` is indexed by direction 1 (`u`) then direction 2 (`v`).
pub fn surface_point(
    degree_u: usize,
    degree_v: usize,
    knots_u: &[f64],
    knots_v: &[f64],
    control_points: &[Vec<Point3>],
    u: f64,
    v: f64,
) -> Result<Point3> {
    check_grid(control_points, degree_u, degree_v, knots_u, knots_v)?;
    let basis_u = LocalBasis::at(degree_u, knots_u, u)?;
    let basis_v = LocalBasis::at(degree_v, knots_v, v)?;
    Ok(blend_grid(&basis_u, &basis_v, control_points, Point3::ZERO))
}

/// Evaluate a NURBS surface point at parameters `(u, v)`.
pub fn nurbs_surface_point(
    degree_u: usize,
    degree_v: usize,
    knots_u: &[f64],
    knots_v: &[f64],
    weighted_points: &[Vec<HomogeneousPoint>],
    u: f64,
    v: f64,
) -> Result<Point3> {
    check_grid(weighted_points, degree_u, degree_v, knots_u, knots_v)?;
    let basis_u = LocalBasis::at(degree_u, knots_u, u)?;
    let basis_v = LocalBasis::at(degree_v, knots_v, v)?;
    project(blend_grid(
        &basis_u,
        &basis_v,
        weighted_points,
        HomogeneousPoint::ZERO,
    ))
}

fn check_grid<T>(
    grid: &[Vec<T>],
    degree_u: usize,
    degree_v: usize,
    knots_u: &[f64],
    knots_v: &[f64],
) -> Result<()> {
    check_count("control point rows", grid.len(), degree_u, knots_u)?;
    for row in grid {
        check_count("control point columns", row.len(), degree_v, knots_v)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nurbs::weighted::{weighted_control_grid, weighted_control_points};
    use approx::assert_abs_diff_eq;
    use splinekit_math::DVec3;

    #[test]
    fn test_curve_point_polyline() {
        // Degree 1 interpolates its control polygon piecewise linearly
        let knots = [0.0, 0.0, 1.0, 2.0, 2.0];
        let cps = [DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0)];

        let cases = [
            (0.0, DVec3::ZERO),
            (0.5, DVec3::new(0.5, 0.0, 0.0)),
            (1.0, DVec3::X),
            (1.5, DVec3::new(1.0, 0.5, 0.0)),
            (2.0, DVec3::new(1.0, 1.0, 0.0)),
        ];
        for (t, expected) in cases {
            let p = curve_point(1, &knots, &cps, t).unwrap();
            assert!((p - expected).length() < 1e-12, "t={t}: {p}");
        }

        assert!(matches!(
            curve_point(1, &knots, &cps, 2.5),
            Err(SplineError::ParameterOutOfRange { max, .. }) if max == 2.0
        ));
    }

    #[test]
    fn test_curve_point_parabola() {
        // A quadratic Bezier with these points traces y = 2x(1 - x)
        let knots = [0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
        let cps = [DVec3::ZERO, DVec3::new(0.5, 1.0, 0.0), DVec3::X];

        for i in 0..=8 {
            let t = i as f64 / 8.0;
            let p = curve_point(2, &knots, &cps, t).unwrap();
            assert_abs_diff_eq!(p.x, t, epsilon = 1e-12);
            assert_abs_diff_eq!(p.y, 2.0 * t * (1.0 - t), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_curve_point_rejects_degree_above_count() {
        // Knot count matches n + p + 1, but two points cannot carry a cubic
        let knots = [0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
        let cps = [DVec3::ZERO, DVec3::X];
        assert!(matches!(
            curve_point(3, &knots, &cps, 0.5),
            Err(SplineError::Configuration(_))
        ));

        let pw = weighted_control_points(&cps, &[1.0, 1.0]).unwrap();
        assert!(matches!(
            nurbs_curve_point(3, &knots, &pw, 0.5),
            Err(SplineError::Configuration(_))
        ));
    }

    #[test]
    fn test_curve_point_rejects_degree_zero() {
        let knots = [0.0, 1.0, 1.0];
        let cps = [DVec3::ZERO, DVec3::X];
        assert!(matches!(
            curve_point(0, &knots, &cps, 0.5),
            Err(SplineError::Configuration(_))
        ));
    }

    #[test]
    fn test_curve_point_count_mismatch() {
        let knots = vec![0.0, 0.0, 1.0, 1.0];
        let cps = vec![DVec3::ZERO, DVec3::X, DVec3::Y];
        assert!(matches!(
            curve_point(1, &knots, &cps, 0.5),
            Err(SplineError::Configuration(_))
        ));
    }

    #[test]
    fn test_nurbs_curve_point_quarter_circle() {
        let w = std::f64::consts::FRAC_1_SQRT_2;
        let knots = vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
        let cps = [
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
        ];
        let pw = weighted_control_points(&cps, &[1.0, w, 1.0]).unwrap();

        for i in 0..=10 {
            let p = nurbs_curve_point(2, &knots, &pw, i as f64 / 10.0).unwrap();
            assert!((p.length() - 1.0).abs() < 1e-12, "radius {}", p.length());
        }
    }

    #[test]
    fn test_nurbs_curve_point_out_of_range() {
        let knots = vec![0.0, 0.0, 1.0, 1.0];
        let pw = weighted_control_points(&[DVec3::ZERO, DVec3::X], &[1.0, 1.0]).unwrap();
        assert!(matches!(
            nurbs_curve_point(1, &knots, &pw, 1.5),
            Err(SplineError::ParameterOutOfRange { .. })
        ));
    }

    #[test]
    fn test_surface_point_bilinear_patch() {
        // Hyperbolic paraboloid z = u * v over the unit square
        let knots = [0.0, 0.0, 1.0, 1.0];
        let cps = vec![
            vec![DVec3::ZERO, DVec3::new(0.0, 1.0, 0.0)],
            vec![DVec3::X, DVec3::new(1.0, 1.0, 1.0)],
        ];

        for &(u, v) in &[(0.0, 0.0), (0.5, 0.5), (0.25, 0.75), (1.0, 0.0), (1.0, 1.0)] {
            let p = surface_point(1, 1, &knots, &knots, &cps, u, v).unwrap();
            assert!((p - DVec3::new(u, v, u * v)).length() < 1e-12, "({u}, {v}): {p}");
        }

        assert!(matches!(
            surface_point(1, 1, &knots, &knots, &cps, 0.5, -0.5),
            Err(SplineError::ParameterOutOfRange { .. })
        ));
    }

    #[test]
    fn test_surface_point_rejects_degree_above_count() {
        let cubic = [0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
        let linear = [0.0, 0.0, 1.0, 1.0];
        let cps = vec![vec![DVec3::ZERO, DVec3::Y], vec![DVec3::X, DVec3::ONE]];

        // direction 1 has two rows, direction 2 two columns
        assert!(matches!(
            surface_point(3, 1, &cubic, &linear, &cps, 0.5, 0.5),
            Err(SplineError::Configuration(_))
        ));
        assert!(matches!(
            surface_point(1, 3, &linear, &cubic, &cps, 0.5, 0.5),
            Err(SplineError::Configuration(_))
        ));

        let pw = weighted_control_grid(&cps, &[vec![1.0; 2], vec![1.0; 2]]).unwrap();
        assert!(matches!(
            nurbs_surface_point(3, 1, &cubic, &linear, &pw, 0.5, 0.5),
            Err(SplineError::Configuration(_))
        ));
    }

    #[test]
    fn test_nurbs_surface_point_mixed_degrees() {
        // Degree 1 x 2 patch with non-uniform weights in direction 2 only:
        // every row is the same rational arc, lifted by z.
        let w = std::f64::consts::FRAC_1_SQRT_2;
        let knots_u = vec![0.0, 0.0, 1.0, 1.0];
        let knots_v = vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
        let arc = |z: f64| {
            vec![
                DVec3::new(1.0, 0.0, z),
                DVec3::new(1.0, 1.0, z),
                DVec3::new(0.0, 1.0, z),
            ]
        };
        let cps = vec![arc(0.0), arc(2.0)];
        let weights = vec![vec![1.0, w, 1.0]; 2];
        let pw = weighted_control_grid(&cps, &weights).unwrap();

        for &(u, v) in &[(0.0, 0.0), (0.25, 0.4), (0.5, 0.5), (1.0, 0.9), (1.0, 1.0)] {
            let p = nurbs_surface_point(1, 2, &knots_u, &knots_v, &pw, u, v).unwrap();
            let r = (p.x * p.x + p.y * p.y).sqrt();
            assert!((r - 1.0).abs() < 1e-12, "radius {r} at ({u}, {v})");
            assert!((p.z - 2.0 * u).abs() < 1e-12);
        }
    }

    #[test]
    fn test_surface_point_ragged_grid() {
        let knots = vec![0.0, 0.0, 1.0, 1.0];
        let cps = vec![vec![DVec3::ZERO, DVec3::X], vec![DVec3::Y]];
        assert!(surface_point(1, 1, &knots, &knots, &cps, 0.5, 0.5).is_err());
    }
}
