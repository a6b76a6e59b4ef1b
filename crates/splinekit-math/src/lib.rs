pub mod aabb;
pub mod homogeneous;

pub use glam::{dvec3, dvec4, DVec3, DVec4};
pub use aabb::Aabb3;
pub use homogeneous::{lift, project};

pub type Point3 = DVec3;
pub type Vector3 = DVec3;

/// A point in projective space: `(w·x, w·y, w·z, w)`.
pub type HomogeneousPoint = DVec4;
