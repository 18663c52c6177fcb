//! st-table: deluxetable body assembly.
//!
//! Composes formatted cells into an AASTeX table body: row/column iteration,
//! footnote and reference registries, YAML table specs, file output. The
//! numeric formatting itself lives in st-core.

pub mod builder;
pub mod notes;
pub mod refs;
pub mod spec;

pub use builder::{TableData, build_table, write_table};
pub use notes::FootnoteRegistry;
pub use refs::ReferenceRegistry;
pub use spec::TableSpec;

use st_core::StError;

pub type TableResult<T> = Result<T, TableError>;

#[derive(thiserror::Error, Debug)]
pub enum TableError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid table spec: {what}")]
    InvalidSpec { what: String },

    #[error("Dimension mismatch: {what}")]
    Dimension { what: String },

    #[error("Cell ({row}, {col}): {source}")]
    Cell {
        row: usize,
        col: usize,
        #[source]
        source: StError,
    },
}
