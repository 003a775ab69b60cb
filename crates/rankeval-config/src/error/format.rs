//! Colored error rendering for terminal output

use crate::error::ConfigError;
use std::fmt;
use yansi::Paint;

/// Formats a [`ConfigError`] with colors when stderr is a terminal
pub struct ErrorFormatter<'a> {
    error: &'a ConfigError,
    use_colors: bool,
}

impl<'a> ErrorFormatter<'a> {
    pub fn new(error: &'a ConfigError) -> Self {
        Self {
            error,
            use_colors: supports_color(),
        }
    }

    pub fn format(&self) -> String {
        if self.use_colors {
            self.format_colored()
        } else {
            self.error.to_string()
        }
    }

    fn format_colored(&self) -> String {
        match self.error {
            ConfigError::InvalidEnum {
                field,
                value,
                options,
                hint,
            } => {
                let value_str = format!("'{}'", value);
                format!(
                    "{} Invalid value {} for {}\n  {}: {}\n  {}: {}",
                    "✗".red().bold(),
                    value_str.yellow(),
                    field.cyan(),
                    "Valid options".bold(),
                    options,
                    "Hint".bold(),
                    hint.green()
                )
            }
            ConfigError::OutOfRange {
                field,
                value,
                min,
                max,
            } => format!(
                "{} {} must be between {} and {}, got {}",
                "✗".red().bold(),
                field.cyan(),
                min.green(),
                max.green(),
                value.red()
            ),
            ConfigError::ValidationError { field, message } => {
                format!("{} {}: {}", "✗".red().bold(), field.cyan(), message)
            }
            ConfigError::FileNotFound { path } => {
                let path_str = path.display().to_string();
                format!(
                    "{} Configuration file not found: {}",
                    "✗".red().bold(),
                    path_str.yellow()
                )
            }
            _ => self.error.to_string(),
        }
    }
}

fn supports_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stderr)
}

impl fmt::Display for ErrorFormatter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_format_matches_display() {
        let error = ConfigError::invalid_enum("ranker", "foo", &["inl2", "bm25"]);
        let formatter = ErrorFormatter {
            error: &error,
            use_colors: false,
        };
        let output = formatter.format();
        assert!(output.contains("Invalid value"));
        assert!(output.contains("'foo'"));
    }

    #[test]
    fn test_colored_format_mentions_field() {
        let error = ConfigError::ValidationError {
            field: "inl2.c".to_string(),
            message: "must be > 0, got 0".to_string(),
        };
        let formatter = ErrorFormatter {
            error: &error,
            use_colors: true,
        };
        assert!(formatter.format().contains("must be > 0"));
    }
}
