use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplineError {
    /// Degree, control-point count, knot vector, or weight values do not
    /// describe a valid spline.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Parameter {parameter} out of range: [{min}, {max}]")]
    ParameterOutOfRange { parameter: f64, min: f64, max: f64 },

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Geometry error: {0}")]
    Geometry(String),
}

impl SplineError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn shape_mismatch(msg: impl Into<String>) -> Self {
        Self::ShapeMismatch(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, SplineError>;
