//! Catalog storage API.

use crate::hash::content_hash;
use crate::schema::{Catalog, CatalogEntry};
use crate::{CatalogError, CatalogResult};
use std::fs;
use std::path::{Path, PathBuf};

/// A catalog directory: `catalog.json` plus timestamped copies under
/// `archive/`.
#[derive(Clone)]
pub struct CatalogStore {
    root_dir: PathBuf,
}

impl CatalogStore {
    pub fn new(root_dir: PathBuf) -> CatalogResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    pub fn open(root_dir: &Path) -> CatalogResult<Self> {
        Self::new(root_dir.to_path_buf())
    }

    fn catalog_path(&self) -> PathBuf {
        self.root_dir.join("catalog.json")
    }

    fn archive_dir(&self) -> PathBuf {
        self.root_dir.join("archive")
    }

    fn lock_path(&self) -> PathBuf {
        self.root_dir.join("lock")
    }

    pub fn exists(&self) -> bool {
        self.catalog_path().exists()
    }

    /// Claim the catalog for writing. Returns the current holder when
    /// someone else already owns it; re-locking by the same owner succeeds.
    /// The lock is advisory; callers that find it held should treat the
    /// catalog as read-only.
    pub fn lock(&self, owner: &str) -> CatalogResult<Option<String>> {
        if let Some(holder) = self.lock_owner()?
            && holder != owner
        {
            tracing::warn!(holder = %holder, "catalog is locked by another user");
            return Ok(Some(holder));
        }
        fs::write(self.lock_path(), owner)?;
        Ok(None)
    }

    pub fn unlock(&self) -> CatalogResult<()> {
        let path = self.lock_path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    pub fn lock_owner(&self) -> CatalogResult<Option<String>> {
        let path = self.lock_path();
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?.trim().to_string()))
    }

    /// One entry without keeping the catalog around.
    pub fn quick_entry(&self, row: &str, col: &str) -> CatalogResult<CatalogEntry> {
        self.load()?.entry(row, col)
    }

    pub fn save(&self, catalog: &Catalog) -> CatalogResult<()> {
        let json = serde_json::to_string_pretty(catalog)?;
        fs::write(self.catalog_path(), json)?;
        Ok(())
    }

    pub fn load(&self) -> CatalogResult<Catalog> {
        let path = self.catalog_path();
        if !path.exists() {
            return Err(CatalogError::NotFound { path });
        }
        let content = fs::read_to_string(path)?;
        let catalog: Catalog = serde_json::from_str(&content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Archive a copy under `archive/<UTC timestamp>/`, returning the stamp,
    /// or `None` when the newest archive already holds identical content.
    pub fn backup(&self, catalog: &Catalog) -> CatalogResult<Option<String>> {
        if let Some(stamp) = self.latest_archive()? {
            let archived = self.load_archive(&stamp)?;
            if content_hash(&archived) == content_hash(catalog) {
                return Ok(None);
            }
        }

        let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S%.3f").to_string();
        let dir = self.archive_dir().join(&stamp);
        fs::create_dir_all(&dir)?;
        let json = serde_json::to_string_pretty(catalog)?;
        fs::write(dir.join("catalog.json"), json)?;
        Ok(Some(stamp))
    }

    pub fn load_archive(&self, stamp: &str) -> CatalogResult<Catalog> {
        let path = self.archive_dir().join(stamp).join("catalog.json");
        if !path.exists() {
            return Err(CatalogError::NotFound { path });
        }
        let content = fs::read_to_string(path)?;
        let catalog: Catalog = serde_json::from_str(&content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Archive stamps, oldest first. Stamps sort chronologically.
    pub fn list_archives(&self) -> CatalogResult<Vec<String>> {
        let dir = self.archive_dir();
        let mut stamps = Vec::new();
        if !dir.exists() {
            return Ok(stamps);
        }
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                stamps.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        stamps.sort();
        Ok(stamps)
    }

    fn latest_archive(&self) -> CatalogResult<Option<String>> {
        Ok(self.list_archives()?.pop())
    }
}
