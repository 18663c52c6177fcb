//! Measurements and null/limit classification.

use crate::error::{StError, StResult};
use serde::{Deserialize, Serialize};

/// A value with asymmetric errors. Any field may be null (`None` or
/// non-finite); a null value with exactly one error present is a one-sided
/// limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub value: Option<f64>,
    pub err_neg: Option<f64>,
    pub err_pos: Option<f64>,
}

impl Measurement {
    /// A value with no errors (requires an explicit column format to render).
    pub fn exact(value: f64) -> Self {
        Self {
            value: Some(value),
            err_neg: None,
            err_pos: None,
        }
    }

    /// A value with equal errors in both directions.
    pub fn symmetric(value: f64, err: f64) -> Self {
        Self::asymmetric(value, err, err)
    }

    /// A value with independent negative and positive errors.
    pub fn asymmetric(value: f64, err_neg: f64, err_pos: f64) -> Self {
        Self {
            value: Some(value),
            err_neg: Some(err_neg),
            err_pos: Some(err_pos),
        }
    }

    /// A lower limit: only the bound is known, rendered as "> bound".
    pub fn lower_limit(bound: f64) -> Self {
        Self {
            value: None,
            err_neg: Some(bound),
            err_pos: None,
        }
    }

    /// An upper limit: only the bound is known, rendered as "< bound".
    pub fn upper_limit(bound: f64) -> Self {
        Self {
            value: None,
            err_neg: None,
            err_pos: Some(bound),
        }
    }

    /// A fully missing entry.
    pub fn nodata() -> Self {
        Self {
            value: None,
            err_neg: None,
            err_pos: None,
        }
    }
}

/// A table cell: free text passed through as-is, or a numeric measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Text(String),
    Numeric(Measurement),
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }
}

impl From<Measurement> for Cell {
    fn from(m: Measurement) -> Self {
        Self::Numeric(m)
    }
}

/// True when a numeric field carries no usable value.
pub fn numeric_is_null(x: Option<f64>) -> bool {
    match x {
        Some(v) => !v.is_finite(),
        None => true,
    }
}

/// True when a text cell is the missing-value token (empty or "none").
pub fn text_is_null(s: &str) -> bool {
    s.is_empty() || s.eq_ignore_ascii_case("none")
}

/// Classification of a measurement prior to rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellClass {
    /// A present value, with or without an error pair.
    Normal {
        value: f64,
        errors: Option<(f64, f64)>,
    },
    /// Nothing known.
    NoData,
    /// Only a lower bound is known.
    LowerLimit(f64),
    /// Only an upper bound is known.
    UpperLimit(f64),
}

/// Classify a measurement as normal, missing, or a one-sided limit.
///
/// A null value with both errors present is ambiguous (two bounds cannot be
/// expressed as one limit); a present value with exactly one error is
/// malformed input. Both are `InvalidMeasurement`.
pub fn classify(m: &Measurement) -> StResult<CellClass> {
    let value = m.value.filter(|v| v.is_finite());
    let err_neg = m.err_neg.filter(|v| v.is_finite());
    let err_pos = m.err_pos.filter(|v| v.is_finite());

    match (value, err_neg, err_pos) {
        (None, None, None) => Ok(CellClass::NoData),
        (None, Some(bound), None) => Ok(CellClass::LowerLimit(bound)),
        (None, None, Some(bound)) => Ok(CellClass::UpperLimit(bound)),
        (None, Some(_), Some(_)) => Err(StError::InvalidMeasurement {
            what: "null value with both errors present",
        }),
        (Some(value), Some(en), Some(ep)) => Ok(CellClass::Normal {
            value,
            errors: Some((en, ep)),
        }),
        (Some(value), None, None) => Ok(CellClass::Normal {
            value,
            errors: None,
        }),
        (Some(_), _, _) => Err(StError::InvalidMeasurement {
            what: "value with exactly one error present",
        }),
    }
}
