//! Layering of file sources
//!
//! A layer overrides exactly the keys it contains. A key set back to its
//! default value still wins over earlier layers.

use crate::{error::ConfigError, Config, Result};
use serde_json::Value;

/// Apply the keys present in `layer` on top of `base`
pub fn overlay(base: &Config, layer: Value) -> Result<Config> {
    // Empty YAML documents parse to null
    if layer.is_null() {
        return Ok(base.clone());
    }

    let mut merged = serde_json::to_value(base).map_err(layering_error)?;
    merge_values(&mut merged, layer);
    serde_json::from_value(merged).map_err(layering_error)
}

fn merge_values(base: &mut Value, layer: Value) {
    match (base, layer) {
        (Value::Object(base), Value::Object(layer)) => {
            for (key, value) in layer {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, layer) => *base = layer,
    }
}

fn layering_error(err: serde_json::Error) -> ConfigError {
    ConfigError::ValidationError {
        field: "config".to_string(),
        message: format!("cannot layer configuration: {}", err),
    }
}
