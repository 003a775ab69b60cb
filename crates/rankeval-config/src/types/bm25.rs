//! BM25 algorithm parameters

use serde::{Deserialize, Serialize};

/// Okapi BM25 parameters
///
/// These control term frequency saturation, document length normalization
/// and query term frequency saturation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bm25Config {
    /// Term frequency saturation parameter
    ///
    /// Must be > 0. Typical range: 1.2 - 2.0
    #[serde(default = "default_k1")]
    pub k1: f64,

    /// Document length normalization parameter
    ///
    /// Range: 0.0 (no length normalization) - 1.0 (full normalization)
    #[serde(default = "default_b")]
    pub b: f64,

    /// Query term frequency saturation parameter
    ///
    /// Must be >= 0. Large values make query term weight nearly linear.
    #[serde(default = "default_k3")]
    pub k3: f64,
}

impl Default for Bm25Config {
    fn default() -> Self {
        Self {
            k1: default_k1(),
            b: default_b(),
            k3: default_k3(),
        }
    }
}

impl crate::validation::Validate for Bm25Config {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::validation::{validate_min_exclusive, validate_non_negative, validate_range};

        validate_min_exclusive("bm25.k1", self.k1, 0.0)?;
        validate_range("bm25.b", self.b, 0.0, 1.0)?;
        validate_non_negative("bm25.k3", self.k3)?;

        Ok(())
    }
}

fn default_k1() -> f64 {
    1.2
}

fn default_b() -> f64 {
    0.75
}

fn default_k3() -> f64 {
    500.0
}
