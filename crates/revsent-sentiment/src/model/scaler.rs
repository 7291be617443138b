use ndarray::{Array2, ArrayView1};
use serde::Deserialize;

use crate::error::{ClassifyError, ModelError};

const ARTIFACT: &str = "scaler";

/// A fitted per-column feature scaler.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scaler {
    /// `x * scale + min`
    MinMax { min: Vec<f64>, scale: Vec<f64> },
    /// `(x - mean) / scale`; either half may be absent.
    Standard {
        #[serde(default)]
        mean: Option<Vec<f64>>,
        #[serde(default)]
        scale: Option<Vec<f64>>,
    },
}

impl Scaler {
    pub(crate) fn validate(&self) -> Result<(), ModelError> {
        let invalid = |reason: String| ModelError::Invalid {
            artifact: ARTIFACT,
            reason,
        };

        match self {
            Self::MinMax { min, scale } => {
                if min.len() != scale.len() {
                    return Err(invalid(format!(
                        "min has {} columns, scale has {}",
                        min.len(),
                        scale.len()
                    )));
                }
                if min.iter().chain(scale).any(|v| !v.is_finite()) {
                    return Err(invalid("non-finite parameter".to_string()));
                }
            }
            Self::Standard { mean, scale } => {
                if let (Some(mean), Some(scale)) = (mean, scale) {
                    if mean.len() != scale.len() {
                        return Err(invalid(format!(
                            "mean has {} columns, scale has {}",
                            mean.len(),
                            scale.len()
                        )));
                    }
                }
                if mean.iter().flatten().any(|v| !v.is_finite()) {
                    return Err(invalid("non-finite mean".to_string()));
                }
                if scale.iter().flatten().any(|v| !v.is_finite() || *v == 0.0) {
                    return Err(invalid("scale must be finite and non-zero".to_string()));
                }
            }
        }
        Ok(())
    }

    /// Column count the scaler was fitted on; `None` for a pass-through
    /// standard scaler.
    #[must_use]
    pub fn n_features(&self) -> Option<usize> {
        match self {
            Self::MinMax { min, .. } => Some(min.len()),
            Self::Standard { mean, scale } => {
                mean.as_ref().or(scale.as_ref()).map(Vec::len)
            }
        }
    }

    /// Scales `x` in place.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::ShapeMismatch`] when `x` has the wrong width.
    pub fn transform(&self, x: &mut Array2<f64>) -> Result<(), ClassifyError> {
        if let Some(expected) = self.n_features() {
            if x.ncols() != expected {
                return Err(ClassifyError::ShapeMismatch {
                    expected,
                    actual: x.ncols(),
                });
            }
        }

        match self {
            Self::MinMax { min, scale } => {
                *x *= &ArrayView1::from(scale.as_slice());
                *x += &ArrayView1::from(min.as_slice());
            }
            Self::Standard { mean, scale } => {
                if let Some(mean) = mean {
                    *x -= &ArrayView1::from(mean.as_slice());
                }
                if let Some(scale) = scale {
                    *x /= &ArrayView1::from(scale.as_slice());
                }
            }
        }
        Ok(())
    }
}
