use serde::{Deserialize, Serialize};

use crate::{Point3, Vector3};

/// Axis-Aligned Bounding Box in 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb3 {
    pub min: Point3,
    pub max: Point3,
}

impl Aabb3 {
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point, or `None` for an empty input.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        Some(iter.fold(Self::new(first, first), |bb, &p| Self {
            min: bb.min.min(p),
            max: bb.max.max(p),
        }))
    }

    /// Containment test with a per-axis slack of `eps`.
    pub fn contains_point(&self, p: Point3, eps: f64) -> bool {
        let slack = Vector3::splat(eps);
        p.cmpge(self.min - slack).all() && p.cmple(self.max + slack).all()
    }
}
