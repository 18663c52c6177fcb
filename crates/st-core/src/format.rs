//! Per-column format descriptors.
//!
//! Descriptors use the printf-style family letters: `.2f` (fixed, two
//! decimals), `.1e` (scientific, one mantissa decimal), `.3g` (shortest form
//! at three significant figures). The leading dot is optional.

use crate::error::{StError, StResult};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One of the three recognized numeric format families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    /// Fixed-point with the given number of fractional digits.
    Fixed { precision: usize },
    /// Scientific notation with the given number of mantissa fractional
    /// digits.
    Scientific { precision: usize },
    /// Shortest form at the given number of significant figures.
    General { sig_figs: usize },
}

impl FromStr for NumberFormat {
    type Err = StError;

    fn from_str(s: &str) -> StResult<Self> {
        let unsupported = || StError::UnsupportedFormat { fmt: s.to_string() };
        let body = s.strip_prefix('.').unwrap_or(s);
        let (digits, family) = body.split_at(body.len().saturating_sub(1));
        let n: usize = digits.parse().map_err(|_| unsupported())?;
        match family {
            "f" => Ok(Self::Fixed { precision: n }),
            "e" => Ok(Self::Scientific { precision: n }),
            "g" if n >= 1 => Ok(Self::General { sig_figs: n }),
            _ => Err(unsupported()),
        }
    }
}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed { precision } => write!(f, ".{precision}f"),
            Self::Scientific { precision } => write!(f, ".{precision}e"),
            Self::General { sig_figs } => write!(f, ".{sig_figs}g"),
        }
    }
}

impl Serialize for NumberFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NumberFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// Per-column formatting configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormatSpec {
    /// Explicit numeric format; required for cells without errors.
    #[serde(default)]
    pub format: Option<NumberFormat>,
    /// Use `format` even when an error pair would otherwise set precision.
    #[serde(default)]
    pub force_format: bool,
    /// Significant figures kept on errors (and on limit bounds).
    #[serde(default = "default_sig_figs_err")]
    pub sig_figs_err: usize,
}

fn default_sig_figs_err() -> usize {
    2
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self {
            format: None,
            force_format: false,
            sig_figs_err: default_sig_figs_err(),
        }
    }
}

impl FormatSpec {
    pub fn with_format(format: NumberFormat) -> Self {
        Self {
            format: Some(format),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_three_families() {
        assert_eq!(
            ".2f".parse::<NumberFormat>().unwrap(),
            NumberFormat::Fixed { precision: 2 }
        );
        assert_eq!(
            "1e".parse::<NumberFormat>().unwrap(),
            NumberFormat::Scientific { precision: 1 }
        );
        assert_eq!(
            ".3g".parse::<NumberFormat>().unwrap(),
            NumberFormat::General { sig_figs: 3 }
        );
    }

    #[test]
    fn rejects_unknown_descriptors() {
        for bad in ["", "f", "2x", ".g", "0g", "2.5f"] {
            assert!(matches!(
                bad.parse::<NumberFormat>(),
                Err(StError::UnsupportedFormat { .. })
            ));
        }
    }

    #[test]
    fn display_roundtrips() {
        for s in [".2f", ".1e", ".3g"] {
            let f: NumberFormat = s.parse().unwrap();
            assert_eq!(f.to_string(), s);
        }
    }

    #[test]
    fn default_spec_uses_two_error_figures() {
        let spec = FormatSpec::default();
        assert_eq!(spec.sig_figs_err, 2);
        assert!(!spec.force_format);
        assert!(spec.format.is_none());
    }
}
