//! InL2 ranking parameters

use serde::{Deserialize, Serialize};

/// InL2 (inverse document frequency, Laplace after-effect, normalization 2)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InL2Config {
    /// Term frequency normalization constant
    ///
    /// Must be strictly positive. Larger values flatten the tf saturation curve.
    #[serde(default = "default_c")]
    pub c: f64,
}

impl Default for InL2Config {
    fn default() -> Self {
        Self { c: default_c() }
    }
}

impl crate::validation::Validate for InL2Config {
    fn validate(&self) -> crate::error::Result<()> {
        crate::validation::validate_min_exclusive("inl2.c", self.c, 0.0)
    }
}

fn default_c() -> f64 {
    1.0
}
