//! Weighted (homogeneous) control points for rational evaluation.

use splinekit_core::{Result, SplineError};
use splinekit_math::{lift, HomogeneousPoint, Point3};

/// Lift a control polygon into homogeneous space, one weight per point.
pub fn weighted_control_points(
    control_points: &[Point3],
    weights: &[f64],
) -> Result<Vec<HomogeneousPoint>> {
    if control_points.len() != weights.len() {
        return Err(SplineError::shape_mismatch(format!(
            "{} weights for {} control points",
            weights.len(),
            control_points.len()
        )));
    }

    Ok(control_points
        .iter()
        .zip(weights)
        .map(|(&p, &w)| lift(p, w))
        .collect())
}

/// Lift a control grid into homogeneous space, one weight per grid cell.
///
/// `weights[i][j]` belongs to `control_points[i][j]`.
pub fn weighted_control_grid(
    control_points: &[Vec<Point3>],
    weights: &[Vec<f64>],
) -> Result<Vec<Vec<HomogeneousPoint>>> {
    if control_points.len() != weights.len() {
        return Err(SplineError::shape_mismatch(format!(
            "{} weight rows for {} control point rows",
            weights.len(),
            control_points.len()
        )));
    }

    control_points
        .iter()
        .zip(weights)
        .enumerate()
        .map(|(i, (row, row_weights))| {
            weighted_control_points(row, row_weights).map_err(|_| {
                SplineError::shape_mismatch(format!(
                    "row {i}: {} weights for {} control points",
                    row_weights.len(),
                    row.len()
                ))
            })
        })
        .collect()
}

/// Every weight must be finite and strictly positive.
pub(crate) fn check_weights<'a>(weights: impl IntoIterator<Item = &'a f64>) -> Result<()> {
    match weights.into_iter().find(|w| !(w.is_finite() && **w > 0.0)) {
        Some(w) => {
            log::warn!("rejecting non-positive weight {w}");
            Err(SplineError::configuration(format!(
                "weights must be finite and positive, got {w}"
            )))
        }
        None => Ok(()),
    }
}
