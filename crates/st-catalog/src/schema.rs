//! Catalog data model.

use crate::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};
use st_core::{Cell, Measurement};
use std::collections::BTreeMap;

/// One catalog item: a value with its errors and reference key.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogEntry {
    pub value: Option<f64>,
    pub err_pos: Option<f64>,
    pub err_neg: Option<f64>,
    pub reference: Option<String>,
}

/// Named rows x named columns of measurement entries plus a reference
/// dictionary mapping citation keys to full references.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Catalog {
    pub name: String,
    pub index: Vec<String>,
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
    pub err_pos: Vec<Vec<Option<f64>>>,
    pub err_neg: Vec<Vec<Option<f64>>>,
    pub refs: Vec<Vec<Option<String>>>,
    #[serde(default)]
    pub ref_dict: BTreeMap<String, String>,
}

impl Catalog {
    /// Create a catalog of the given shape filled with null entries.
    pub fn new(
        name: impl Into<String>,
        index: Vec<String>,
        columns: Vec<String>,
    ) -> Self {
        let nrows = index.len();
        let ncols = columns.len();
        let nulls = || vec![vec![None; ncols]; nrows];
        Self {
            name: name.into(),
            index,
            columns,
            values: nulls(),
            err_pos: nulls(),
            err_neg: nulls(),
            refs: vec![vec![None; ncols]; nrows],
            ref_dict: BTreeMap::new(),
        }
    }

    /// Check that every table matches the declared row x column shape.
    /// Persisted catalogs are hand-editable, so loads must reject ragged
    /// matrices before any indexed access.
    pub fn validate(&self) -> CatalogResult<()> {
        let nrows = self.nrows();
        let ncols = self.ncols();
        let malformed = |name: &str| CatalogError::Malformed {
            what: format!("{name} table must be {nrows} x {ncols}"),
        };
        if !shape_ok(&self.values, nrows, ncols) {
            return Err(malformed("values"));
        }
        if !shape_ok(&self.err_pos, nrows, ncols) {
            return Err(malformed("err_pos"));
        }
        if !shape_ok(&self.err_neg, nrows, ncols) {
            return Err(malformed("err_neg"));
        }
        if !shape_ok(&self.refs, nrows, ncols) {
            return Err(malformed("refs"));
        }
        Ok(())
    }

    pub fn nrows(&self) -> usize {
        self.index.len()
    }

    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    fn row_pos(&self, row: &str) -> CatalogResult<usize> {
        self.index
            .iter()
            .position(|r| r == row)
            .ok_or_else(|| CatalogError::UnknownRow { id: row.to_string() })
    }

    fn col_pos(&self, col: &str) -> CatalogResult<usize> {
        self.columns
            .iter()
            .position(|c| c == col)
            .ok_or_else(|| CatalogError::UnknownColumn { id: col.to_string() })
    }

    /// Replace the entry at (row, col). Warns when the reference key is not
    /// in the dictionary.
    pub fn set(&mut self, row: &str, col: &str, entry: CatalogEntry) -> CatalogResult<()> {
        let i = self.row_pos(row)?;
        let j = self.col_pos(col)?;
        if let Some(key) = &entry.reference {
            self.check_ref(key);
        }
        self.values[i][j] = entry.value;
        self.err_pos[i][j] = entry.err_pos;
        self.err_neg[i][j] = entry.err_neg;
        self.refs[i][j] = entry.reference;
        Ok(())
    }

    pub fn entry(&self, row: &str, col: &str) -> CatalogResult<CatalogEntry> {
        let i = self.row_pos(row)?;
        let j = self.col_pos(col)?;
        Ok(CatalogEntry {
            value: self.values[i][j],
            err_pos: self.err_pos[i][j],
            err_neg: self.err_neg[i][j],
            reference: self.refs[i][j].clone(),
        })
    }

    /// The entry as a formatter cell.
    pub fn cell(&self, row: &str, col: &str) -> CatalogResult<Cell> {
        let e = self.entry(row, col)?;
        Ok(Cell::Numeric(Measurement {
            value: e.value,
            err_neg: e.err_neg,
            err_pos: e.err_pos,
        }))
    }

    /// Plain-text rendering of an entry: `value (+ep, -en) [ref]`.
    pub fn display_entry(&self, row: &str, col: &str) -> CatalogResult<String> {
        let e = self.entry(row, col)?;
        let num = |x: Option<f64>| x.map_or("none".to_string(), |v| v.to_string());
        Ok(format!(
            "{} (+{}, -{}) [{}]",
            num(e.value),
            num(e.err_pos),
            num(e.err_neg),
            e.reference.as_deref().unwrap_or("none"),
        ))
    }

    /// Append an all-null row.
    pub fn add_row(&mut self, id: impl Into<String>) {
        self.index.push(id.into());
        let ncols = self.ncols();
        self.values.push(vec![None; ncols]);
        self.err_pos.push(vec![None; ncols]);
        self.err_neg.push(vec![None; ncols]);
        self.refs.push(vec![None; ncols]);
    }

    /// Append an all-null column.
    pub fn add_col(&mut self, name: impl Into<String>) {
        self.columns.push(name.into());
        for row in &mut self.values {
            row.push(None);
        }
        for row in &mut self.err_pos {
            row.push(None);
        }
        for row in &mut self.err_neg {
            row.push(None);
        }
        for row in &mut self.refs {
            row.push(None);
        }
    }

    pub fn rename_row(&mut self, old: &str, new: impl Into<String>) -> CatalogResult<()> {
        let i = self.row_pos(old)?;
        self.index[i] = new.into();
        Ok(())
    }

    pub fn rename_col(&mut self, old: &str, new: impl Into<String>) -> CatalogResult<()> {
        let j = self.col_pos(old)?;
        self.columns[j] = new.into();
        Ok(())
    }

    /// Warn when a reference key has no dictionary entry.
    pub fn check_ref(&self, key: &str) {
        if !key.eq_ignore_ascii_case("none") && !self.ref_dict.contains_key(key) {
            tracing::warn!(
                key,
                catalog = %self.name,
                "reference key is not in the catalog's reference dictionary"
            );
        }
    }

    /// Define (or redefine, with a warning) a reference key.
    pub fn add_ref_entry(&mut self, key: impl Into<String>, definition: impl Into<String>) {
        let key = key.into();
        let definition = definition.into();
        if let Some(old) = self.ref_dict.get(&key) {
            tracing::warn!(key, old = %old, new = %definition, "replacing reference entry");
        }
        self.ref_dict.insert(key, definition);
    }

    /// Cells for the given columns in index order, plus the parallel matrix
    /// of reference keys, ready for table assembly.
    pub fn table_columns(
        &self,
        cols: &[String],
    ) -> CatalogResult<(Vec<Vec<Cell>>, Vec<Vec<Option<String>>>)> {
        let col_idx: Vec<usize> = cols
            .iter()
            .map(|c| self.col_pos(c))
            .collect::<CatalogResult<_>>()?;
        let mut cells = Vec::with_capacity(self.nrows());
        let mut refkeys = Vec::with_capacity(self.nrows());
        for i in 0..self.nrows() {
            let mut row = vec![Cell::text(self.index[i].clone())];
            let mut ref_row = vec![None];
            for &j in &col_idx {
                row.push(Cell::Numeric(Measurement {
                    value: self.values[i][j],
                    err_neg: self.err_neg[i][j],
                    err_pos: self.err_pos[i][j],
                }));
                ref_row.push(self.refs[i][j].clone());
            }
            cells.push(row);
            refkeys.push(ref_row);
        }
        Ok((cells, refkeys))
    }
}

fn shape_ok<T>(table: &[Vec<T>], nrows: usize, ncols: usize) -> bool {
    table.len() == nrows && table.iter().all(|row| row.len() == ncols)
}
