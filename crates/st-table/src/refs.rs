//! Reference registry: deduplicating citation keys -> compact indices.

/// Interns bibliography keys and hands out 1-based indices in first-use
/// order, for tables that cite by number with a `\tablerefs` legend.
#[derive(Debug, Default)]
pub struct ReferenceRegistry {
    keys: Vec<String>,
}

impl ReferenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 1-based index for `key`, minting a new one on first sight.
    pub fn intern(&mut self, key: &str) -> usize {
        if let Some(pos) = self.keys.iter().position(|k| k == key) {
            return pos + 1;
        }
        self.keys.push(key.to_string());
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The `\tablerefs` legend line, or `None` when nothing was cited.
    pub fn legend(&self) -> Option<String> {
        if self.keys.is_empty() {
            return None;
        }
        let entries: Vec<String> = self
            .keys
            .iter()
            .enumerate()
            .map(|(i, key)| format!("({}) \\citealt{{{key}}}", i + 1))
            .collect();
        Some(format!("\\tablerefs{{{}}}", entries.join("; ")))
    }
}
