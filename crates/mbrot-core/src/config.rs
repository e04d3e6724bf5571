#![forbid(unsafe_code)]

//! Validated render configuration and its error type.

use std::fmt;

use crate::scheduler::ScanConfig;
use crate::viewport::Viewport;

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A field did not parse as a number.
    InvalidNumber {
        field: &'static str,
        value: String,
    },
    /// A field parsed but is NaN or infinite.
    NonFinite { field: &'static str },
    /// A viewport string did not have exactly four components.
    ViewportArity { found: usize },
    /// A viewport has zero extent along one axis.
    DegenerateViewport { axis: char },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNumber { field, value } => {
                write!(f, "invalid {field} value: {value:?}")
            }
            Self::NonFinite { field } => write!(f, "{field} must be finite"),
            Self::ViewportArity { found } => {
                write!(f, "viewport needs 4 comma-separated bounds, got {found}")
            }
            Self::DegenerateViewport { axis } => {
                write!(f, "viewport has zero extent along the {axis} axis")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parse a finite `f64`, naming `field` in the error.
pub(crate) fn parse_finite(field: &'static str, raw: &str) -> Result<f64, ConfigError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            field,
            value: raw.to_string(),
        })?;
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field });
    }
    Ok(value)
}

/// Everything the engine needs besides a surface and a clock.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderConfig {
    pub viewport: Viewport,
    pub scan: ScanConfig,
}
