//! Sampling configuration and batch evaluation helpers.

use serde::{Deserialize, Serialize};
use splinekit_core::Result;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Uniform parametric sampling of a curve.
///
/// Bounds left as `None` resolve to the curve's valid domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveSampling {
    pub start: Option<f64>,
    pub stop: Option<f64>,
    pub count: usize,
}

impl CurveSampling {
    pub const DEFAULT_COUNT: usize = 100;

    pub fn new(count: usize) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    pub fn with_range(mut self, start: f64, stop: f64) -> Self {
        self.start = Some(start);
        self.stop = Some(stop);
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Parameter values for a curve whose domain is `domain`.
    pub fn parameters(&self, domain: (f64, f64)) -> Vec<f64> {
        linspace(
            self.start.unwrap_or(domain.0),
            self.stop.unwrap_or(domain.1),
            self.count,
        )
    }
}

impl Default for CurveSampling {
    fn default() -> Self {
        Self {
            start: None,
            stop: None,
            count: Self::DEFAULT_COUNT,
        }
    }
}

/// Uniform parametric sampling of a surface over a `count1 × count2` grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceSampling {
    pub start1: Option<f64>,
    pub stop1: Option<f64>,
    pub start2: Option<f64>,
    pub stop2: Option<f64>,
    pub count1: usize,
    pub count2: usize,
}

impl SurfaceSampling {
    pub const DEFAULT_COUNT: usize = 50;

    pub fn new(count1: usize, count2: usize) -> Self {
        Self {
            count1,
            count2,
            ..Self::default()
        }
    }

    pub fn with_range_u(mut self, start: f64, stop: f64) -> Self {
        self.start1 = Some(start);
        self.stop1 = Some(stop);
        self
    }

    pub fn with_range_v(mut self, start: f64, stop: f64) -> Self {
        self.start2 = Some(start);
        self.stop2 = Some(stop);
        self
    }

    pub fn with_counts(mut self, count1: usize, count2: usize) -> Self {
        self.count1 = count1;
        self.count2 = count2;
        self
    }

    /// Parameter values in each direction for the given domains.
    pub fn parameters(&self, domain_u: (f64, f64), domain_v: (f64, f64)) -> (Vec<f64>, Vec<f64>) {
        let us = linspace(
            self.start1.unwrap_or(domain_u.0),
            self.stop1.unwrap_or(domain_u.1),
            self.count1,
        );
        let vs = linspace(
            self.start2.unwrap_or(domain_v.0),
            self.stop2.unwrap_or(domain_v.1),
            self.count2,
        );
        (us, vs)
    }
}

impl Default for SurfaceSampling {
    fn default() -> Self {
        Self {
            start1: None,
            stop1: None,
            start2: None,
            stop2: None,
            count1: Self::DEFAULT_COUNT,
            count2: Self::DEFAULT_COUNT,
        }
    }
}

/// `count` evenly spaced values from `start` to `stop`, both inclusive.
///
/// A single sample is `start`; the last of several samples is exactly `stop`.
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            let mut values: Vec<f64> = (0..count).map(|i| start + step * i as f64).collect();
            values[count - 1] = stop;
            values
        }
    }
}

/// Evaluate `f` over every item, keeping input order.
#[cfg(feature = "parallel")]
pub(crate) fn map_samples<I, T, F>(items: &[I], f: F) -> Result<Vec<T>>
where
    I: Sync,
    T: Send,
    F: Fn(&I) -> Result<T> + Sync + Send,
{
    items.par_iter().map(f).collect()
}

#[cfg(not(feature = "parallel"))]
pub(crate) fn map_samples<I, T, F>(items: &[I], f: F) -> Result<Vec<T>>
where
    I: Sync,
    T: Send,
    F: Fn(&I) -> Result<T> + Sync + Send,
{
    items.iter().map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use splinekit_core::SplineError;

    #[test]
    fn test_linspace_endpoints() {
        let values = linspace(0.0, 1.8, 7);
        assert_eq!(values.len(), 7);
        assert_eq!(values[0], 0.0);
        assert_eq!(values[6], 1.8);
        assert!((values[3] - 0.9).abs() < 1e-15);
    }

    #[test]
    fn test_linspace_degenerate_counts() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(0.25, 1.0, 1), vec![0.25]);
        assert_eq!(linspace(0.0, 1.0, 2), vec![0.0, 1.0]);
    }

    #[test]
    fn test_linspace_reversed() {
        assert_eq!(linspace(2.0, 0.0, 5), vec![2.0, 1.5, 1.0, 0.5, 0.0]);
    }

    #[test]
    fn test_curve_sampling_defaults() {
        let sampling = CurveSampling::default();
        assert_eq!(sampling.count, 100);
        let params = sampling.parameters((0.0, 2.0));
        assert_eq!(params.len(), 100);
        assert_eq!(params[0], 0.0);
        assert_eq!(params[99], 2.0);
    }

    #[test]
    fn test_curve_sampling_explicit_range() {
        let params = CurveSampling::new(4).with_range(0.5, 2.0).parameters((0.0, 3.0));
        assert_eq!(params, vec![0.5, 1.0, 1.5, 2.0]);

        let partial = CurveSampling {
            stop: Some(1.0),
            ..CurveSampling::new(3)
        };
        assert_eq!(partial.parameters((0.0, 3.0)), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_surface_sampling_defaults() {
        let sampling = SurfaceSampling::default();
        assert_eq!((sampling.count1, sampling.count2), (50, 50));

        let (us, vs) = SurfaceSampling::new(3, 2)
            .with_range_v(0.0, 0.5)
            .parameters((0.0, 1.0), (0.0, 1.0));
        assert_eq!(us, vec![0.0, 0.5, 1.0]);
        assert_eq!(vs, vec![0.0, 0.5]);
    }

    #[test]
    fn test_sampling_deserialize_partial() {
        let sampling: CurveSampling = serde_json::from_str(r#"{"count": 8}"#).unwrap();
        assert_eq!(sampling, CurveSampling::new(8));

        let sampling: SurfaceSampling =
            serde_json::from_str(r#"{"start1": 0.0, "stop1": 0.5}"#).unwrap();
        assert_eq!(sampling, SurfaceSampling::default().with_range_u(0.0, 0.5));
    }

    #[test]
    fn test_map_samples_keeps_order_and_errors() {
        let items: Vec<i32> = (0..1000).collect();
        let doubled = map_samples(&items, |&i| Ok(i * 2)).unwrap();
        assert_eq!(doubled, (0..1000).map(|i| i * 2).collect::<Vec<_>>());

        let failed: Result<Vec<i32>> = map_samples(&items, |&i| {
            if i == 500 {
                Err(SplineError::configuration("boom"))
            } else {
                Ok(i)
            }
        });
        assert!(failed.is_err());
    }
}
