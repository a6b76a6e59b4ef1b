//! Conversions between Cartesian and homogeneous (weighted) coordinates.

use splinekit_core::{Result, SplineError};

use crate::{HomogeneousPoint, Point3};

/// Lift a Cartesian point with weight `w` into homogeneous space.
#[inline]
pub fn lift(point: Point3, w: f64) -> HomogeneousPoint {
    (point * w).extend(w)
}

/// Perspective divide: map a homogeneous point back to Cartesian space.
///
/// Fails if the trailing weight coordinate is zero or not finite, since the
/// divide would then produce non-finite coordinates.
pub fn project(hp: HomogeneousPoint) -> Result<Point3> {
    if hp.w == 0.0 || !hp.w.is_finite() {
        return Err(SplineError::Geometry(format!(
            "cannot project homogeneous point with weight {}",
            hp.w
        )));
    }
    Ok(hp.truncate() / hp.w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::{dvec3, dvec4};

    #[test]
    fn test_lift_scales_coordinates() {
        let hp = lift(dvec3(1.0, -2.0, 0.5), 3.0);
        assert_eq!(hp, dvec4(3.0, -6.0, 1.5, 3.0));
    }

    #[test]
    fn test_project_inverts_lift() {
        let p = dvec3(0.3, 7.0, -1.25);
        let back = project(lift(p, 0.7)).unwrap();
        assert_relative_eq!(back.x, p.x, epsilon = 1e-12);
        assert_relative_eq!(back.y, p.y, epsilon = 1e-12);
        assert_relative_eq!(back.z, p.z, epsilon = 1e-12);
    }

    #[test]
    fn test_project_zero_weight() {
        let err = project(dvec4(1.0, 1.0, 1.0, 0.0)).unwrap_err();
        assert!(matches!(err, SplineError::Geometry(_)));
        assert!(project(dvec4(1.0, 1.0, 1.0, f64::NAN)).is_err());
    }
}
