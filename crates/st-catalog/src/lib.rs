//! st-catalog: directory-backed measurement catalogs.
//!
//! A catalog holds named rows x named columns of (value, errors, reference)
//! entries plus a reference dictionary, persisted as JSON with timestamped
//! archives.

pub mod hash;
pub mod schema;
pub mod store;

pub use hash::content_hash;
pub use schema::{Catalog, CatalogEntry};
pub use store::CatalogStore;

use std::path::PathBuf;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Catalog not found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Malformed catalog: {what}")]
    Malformed { what: String },

    #[error("Unknown row: {id}")]
    UnknownRow { id: String },

    #[error("Unknown column: {id}")]
    UnknownColumn { id: String },
}
