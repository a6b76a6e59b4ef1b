//! Knot vectors: construction, validation, and span lookup.

use serde::{Deserialize, Serialize};
use splinekit_core::{Result, SplineError};

/// A non-decreasing sequence of parametric values.
///
/// Values are checked once at construction and never change afterwards.
/// Whether the vector is clamped for a given degree is a separate question,
/// answered by [`KnotVector::is_clamped`] and enforced by the curve and
/// surface constructors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct KnotVector(Vec<f64>);

impl KnotVector {
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(SplineError::configuration("knot vector is empty"));
        }
        if let Some(bad) = values.iter().find(|k| !k.is_finite()) {
            return Err(SplineError::configuration(format!(
                "knot vector contains non-finite value {bad}"
            )));
        }
        if let Some(i) = values.windows(2).position(|w| w[1] < w[0]) {
            return Err(SplineError::configuration(format!(
                "knot vector decreases at index {}: {} > {}",
                i + 1,
                values[i],
                values[i + 1]
            )));
        }
        Ok(Self(values))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }

    pub fn first(&self) -> f64 {
        self.0[0]
    }

    pub fn last(&self) -> f64 {
        self.0[self.0.len() - 1]
    }

    /// Valid parametric domain `(knots[p], knots[len - p - 1])` for degree `p`,
    /// or `None` when the vector is too short to hold a span of that degree.
    pub fn domain(&self, degree: usize) -> Option<(f64, f64)> {
        let end = self.0.len().checked_sub(degree + 1)?;
        if end < degree {
            return None;
        }
        Some((self.0[degree], self.0[end]))
    }

    /// Number of times `value` occurs in the vector.
    pub fn multiplicity(&self, value: f64) -> usize {
        self.0.iter().filter(|&&k| k == value).count()
    }

    /// Whether the first and last values each repeat exactly `degree + 1` times.
    pub fn is_clamped(&self, degree: usize) -> bool {
        self.0.len() >= 2 * (degree + 1)
            && self.multiplicity(self.first()) == degree + 1
            && self.multiplicity(self.last()) == degree + 1
    }

    /// Distinct knot values in ascending order.
    pub fn distinct_values(&self) -> Vec<f64> {
        let mut values = self.0.clone();
        values.dedup();
        values
    }

    /// Check that this vector can carry `n_control_points` control points of
    /// the given degree: correct length, clamped ends, non-empty domain.
    pub(crate) fn check_compatible(&self, n_control_points: usize, degree: usize) -> Result<()> {
        let expected = n_control_points + degree + 1;
        if self.len() != expected {
            return Err(SplineError::configuration(format!(
                "knot vector length must be n + p + 1 = {expected}, got {} knots for {} control points with degree {}",
                self.len(),
                n_control_points,
                degree
            )));
        }
        if !self.is_clamped(degree) {
            return Err(SplineError::configuration(format!(
                "knot vector is not clamped: end values must repeat degree + 1 = {} times",
                degree + 1
            )));
        }
        let (start, end) = self
            .domain(degree)
            .ok_or_else(|| SplineError::configuration("knot vector is too short"))?;
        if start >= end {
            return Err(SplineError::configuration(format!(
                "knot vector has an empty domain [{start}, {end}]"
            )));
        }
        Ok(())
    }
}

impl TryFrom<Vec<f64>> for KnotVector {
    type Error = SplineError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::new(values)
    }
}

impl From<KnotVector> for Vec<f64> {
    fn from(knots: KnotVector) -> Self {
        knots.0
    }
}

impl AsRef<[f64]> for KnotVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a KnotVector {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Check `1 <= degree <= n_control_points - 1`.
pub(crate) fn check_degree(n_control_points: usize, degree: usize) -> Result<()> {
    if degree < 1 || degree >= n_control_points {
        log::warn!("rejecting degree {degree} for {n_control_points} control points");
        return Err(SplineError::configuration(format!(
            "degree must satisfy 1 <= degree <= n - 1, got degree {degree} with {n_control_points} control points"
        )));
    }
    Ok(())
}

/// Build a clamped knot vector with unit-spaced interior knots.
///
/// For `a = n_control_points - 1` and `q = a + degree + 1` the knots are
/// `0` for `i <= degree`, `i - degree` up to `q - degree - 1`, and
/// `q - 2 * degree` after that. The domain is `[0, n_control_points - degree]`
/// and is not normalized to `[0, 1]`.
pub fn build_knot_vector(n_control_points: usize, degree: usize) -> Result<KnotVector> {
    check_degree(n_control_points, degree)?;

    let q = n_control_points + degree;
    let knots = (0..=q)
        .map(|i| {
            if i <= degree {
                0.0
            } else if i <= q - degree - 1 {
                (i - degree) as f64
            } else {
                (q - 2 * degree) as f64
            }
        })
        .collect();

    Ok(KnotVector(knots))
}

/// Find the knot span index for parameter `t`.
///
/// With `n = knots.len() - degree - 2`, returns the index `i` such that
/// `knots[i] <= t < knots[i+1]`, or `n` when `t == knots[n + 1]`.
/// Parameters outside `[knots[degree], knots[n + 1]]` are rejected; for a
/// clamped vector those bounds are its first and last values.
pub fn find_span(degree: usize, knots: &[f64], t: f64) -> Result<usize> {
    if knots.len() < 2 * (degree + 1) {
        return Err(SplineError::configuration(format!(
            "knot vector of length {} is too short for degree {degree}",
            knots.len()
        )));
    }

    let n = knots.len() - degree - 2;
    let (min, max) = (knots[degree], knots[n + 1]);
    if !(min..=max).contains(&t) {
        return Err(SplineError::ParameterOutOfRange {
            parameter: t,
            min,
            max,
        });
    }

    // upper end belongs to the last span
    if t >= max {
        return Ok(n);
    }

    // knots[low] <= t < knots[high]
    let mut low = degree;
    let mut high = n + 1;
    let mut mid = (low + high) / 2;

    while t < knots[mid] || t >= knots[mid + 1] {
        if t < knots[mid] {
            high = mid;
        } else {
            low = mid;
        }
        mid = (low + high) / 2;
    }

    Ok(mid)
}
