//! st-core: numeric formatting for publication tables.
//!
//! Contains:
//! - measurement (values with asymmetric errors, null/limit classification)
//! - numstr (decomposed numeric strings, significant-digit places)
//! - format (per-column format descriptors)
//! - precision (least-significant-place selection from error pairs)
//! - render (fixed/scientific selection and TeX markup)
//!
//! Formatting is pure and deterministic: classify, select precision, select
//! notation, render. No I/O, no shared state.

pub mod error;
pub mod format;
pub mod measurement;
pub mod numstr;
pub mod precision;
pub mod render;

// Re-exports: nice ergonomics for downstream crates
pub use error::{StError, StResult};
pub use format::{FormatSpec, NumberFormat};
pub use measurement::{Cell, CellClass, Measurement, classify};
pub use numstr::NumString;
pub use precision::least_sig_place;
pub use render::{NO_DATA, RenderedNumber, format_cell, format_measurement};
