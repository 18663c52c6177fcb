//! Table body assembly.

use crate::notes::FootnoteRegistry;
use crate::refs::ReferenceRegistry;
use crate::spec::TableSpec;
use crate::{TableError, TableResult};
use st_core::measurement::text_is_null;
use st_core::{Cell, format_cell};
use std::path::Path;

/// Cell matrix plus optional parallel matrices of footnote text and
/// comma-separated reference keys.
#[derive(Debug, Clone, Default)]
pub struct TableData {
    pub cells: Vec<Vec<Cell>>,
    pub notes: Option<Vec<Vec<Option<String>>>>,
    pub refkeys: Option<Vec<Vec<Option<String>>>>,
}

impl TableData {
    pub fn from_cells(cells: Vec<Vec<Cell>>) -> Self {
        Self {
            cells,
            ..Self::default()
        }
    }

    fn check_dims(&self, ncols: usize) -> TableResult<()> {
        let nrows = self.cells.len();
        for row in &self.cells {
            if row.len() != ncols {
                return Err(TableError::Dimension {
                    what: "all cell rows must have the same length".to_string(),
                });
            }
        }
        for (name, matrix) in [("notes", &self.notes), ("refkeys", &self.refkeys)] {
            if let Some(m) = matrix {
                if m.len() != nrows || m.iter().any(|row| row.len() != ncols) {
                    return Err(TableError::Dimension {
                        what: format!("{name} must match the cell matrix shape"),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Assemble the `\startdata` .. `\enddata` block plus note and reference
/// legends. Cells render through st-core; failures carry the row/column.
pub fn build_table(data: &TableData, spec: &TableSpec) -> TableResult<String> {
    spec.validate()?;
    let ncols = data.cells.first().map_or(0, Vec::len);
    data.check_dims(ncols)?;
    if !spec.formats.is_empty() && spec.formats.len() != ncols {
        return Err(TableError::Dimension {
            what: "formats must list one entry per column".to_string(),
        });
    }

    // Reference columns only materialize when some row actually cites.
    let has_refs: Vec<bool> = (0..ncols)
        .map(|j| {
            data.refkeys.as_ref().is_some_and(|refs| {
                refs.iter()
                    .any(|row| row[j].as_deref().is_some_and(|r| !text_is_null(r)))
            })
        })
        .collect();

    let mut footnotes = FootnoteRegistry::new();
    let mut references = ReferenceRegistry::new();

    let mut lines = Vec::new();
    if let Some(header) = &spec.header {
        lines.push(header.clone());
    }
    lines.push("\\startdata".to_string());

    for (i, row) in data.cells.iter().enumerate() {
        let mut items = Vec::new();
        for (j, cell) in row.iter().enumerate() {
            let mut item = format_cell(cell, &spec.column_spec(j))
                .map_err(|source| TableError::Cell { row: i, col: j, source })?;

            if let Some(notes) = &data.notes
                && let Some(note) = &notes[i][j]
                && !text_is_null(note)
            {
                let mark = footnotes.intern(note);
                item.push_str(&format!("\\tablenotemark{{{mark}}}"));
            }
            items.push(item);

            if has_refs[j] {
                items.push(reference_item(
                    data.refkeys.as_ref().and_then(|refs| refs[i][j].as_deref()),
                    spec.compact_refs,
                    &mut references,
                ));
            }
        }
        lines.push(format!("{}\\\\", items.join(" & ")));
    }

    lines.push("\\enddata".to_string());
    lines.push(String::new());

    if !footnotes.is_empty() {
        for (mark, text) in footnotes.legend() {
            lines.push(format!("\\tablenotetext{{{mark}}}{{{text}}}"));
        }
        lines.push(String::new());
    }
    if spec.compact_refs
        && let Some(legend) = references.legend()
    {
        lines.push(legend);
        lines.push(String::new());
    }

    Ok(lines.join("\n"))
}

fn reference_item(
    entry: Option<&str>,
    compact: bool,
    references: &mut ReferenceRegistry,
) -> String {
    let Some(entry) = entry.filter(|e| !text_is_null(e)) else {
        return String::new();
    };
    let keys = entry.split(',').map(str::trim);
    if compact {
        let ids: Vec<String> = keys.map(|k| references.intern(k).to_string()).collect();
        ids.join(",")
    } else {
        let cites: Vec<String> = keys.map(|k| format!("\\citet{{{k}}}")).collect();
        cites.join(",")
    }
}

/// Write an assembled body to disk for `\input` into the enclosing document.
pub fn write_table(path: &Path, body: &str) -> TableResult<()> {
    std::fs::write(path, body)?;
    Ok(())
}
