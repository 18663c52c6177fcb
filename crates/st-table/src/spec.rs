//! Table spec: per-table formatting configuration, YAML on disk.

use crate::{TableError, TableResult};
use serde::{Deserialize, Serialize};
use st_core::{FormatSpec, NumberFormat};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableSpec {
    /// Significant figures kept on errors and limit bounds.
    #[serde(default = "default_sig_figs_err")]
    pub sig_figs_err: usize,
    /// Apply column formats even to cells that carry errors.
    #[serde(default)]
    pub force_format: bool,
    /// Number references and list citations after the body instead of
    /// inlining `\citet`.
    #[serde(default)]
    pub compact_refs: bool,
    /// Per-column format descriptors; empty means none anywhere.
    #[serde(default)]
    pub formats: Vec<Option<NumberFormat>>,
    /// Optional block printed above `\startdata` (column headings etc.).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
}

impl Default for TableSpec {
    fn default() -> Self {
        Self {
            sig_figs_err: default_sig_figs_err(),
            force_format: false,
            compact_refs: false,
            formats: Vec::new(),
            header: None,
        }
    }
}

fn default_sig_figs_err() -> usize {
    2
}

impl TableSpec {
    /// The st-core formatting spec for column `col`.
    pub fn column_spec(&self, col: usize) -> FormatSpec {
        FormatSpec {
            format: self.formats.get(col).copied().flatten(),
            force_format: self.force_format,
            sig_figs_err: self.sig_figs_err,
        }
    }

    pub fn validate(&self) -> TableResult<()> {
        if self.sig_figs_err < 1 {
            return Err(TableError::InvalidSpec {
                what: "sig_figs_err must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

pub fn load_yaml(path: &Path) -> TableResult<TableSpec> {
    let content = std::fs::read_to_string(path)?;
    let spec: TableSpec = serde_yaml::from_str(&content)?;
    spec.validate()?;
    Ok(spec)
}

pub fn save_yaml(path: &Path, spec: &TableSpec) -> TableResult<()> {
    spec.validate()?;
    let content = serde_yaml::to_string(spec)?;
    std::fs::write(path, content)?;
    Ok(())
}
