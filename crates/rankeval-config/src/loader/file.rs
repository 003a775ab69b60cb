//! File-based configuration loading

use crate::{error::ConfigError, loader::ConfigFormat, Config, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Load a file as a layer holding only the keys it sets
///
/// The content is also parsed as a [`Config`] so type and enum errors carry
/// line context. Range validation is left to the fully layered config.
pub fn load_layer<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    let (format, content) = read(path)?;
    let path_str = path.to_str();

    parse_typed(format, &content, path_str)?;

    match format {
        ConfigFormat::Yaml => serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::from_yaml_error(e, &content, path_str)),
        ConfigFormat::Toml => ::toml::from_str(&content)
            .map_err(|e| ConfigError::from_toml_error(e, &content, path_str)),
        ConfigFormat::Json => serde_json::from_str(&content)
            .map_err(|e| ConfigError::from_json_error(e, &content, path_str)),
    }
}

fn read(path: &Path) -> Result<(ConfigFormat, String)> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let format = detect_format(path)?;

    let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok((format, content))
}

fn parse_typed(format: ConfigFormat, content: &str, path: Option<&str>) -> Result<Config> {
    match format {
        ConfigFormat::Yaml => super::formats::yaml::parse_with_path(content, path),
        ConfigFormat::Toml => super::formats::toml::parse_with_path(content, path),
        ConfigFormat::Json => super::formats::json::parse_with_path(content, path),
    }
}

/// Detect configuration format from file extension
fn detect_format(path: &Path) -> Result<ConfigFormat> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("yml") | Some("yaml") => Ok(ConfigFormat::Yaml),
        Some("toml") => Ok(ConfigFormat::Toml),
        Some("json") => Ok(ConfigFormat::Json),
        _ => Err(ConfigError::UnknownFormat {
            path: path.to_path_buf(),
        }),
    }
}
