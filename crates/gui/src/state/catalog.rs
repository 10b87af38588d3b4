//! Runtime catalog state: the read-only item snapshot for this session.

use std::path::Path;
use std::sync::Arc;

use shared::{Catalog, CatalogItem};

/// Items are Arc-wrapped once at load so placements can reference them
/// without copying.
pub struct CatalogState {
    items: Vec<Arc<CatalogItem>>,
    /// Where the snapshot came from, shown in the status bar
    source: String,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::from_catalog(crate::fixtures::demo_catalog(), "built-in demo catalog")
    }
}

impl CatalogState {
    pub fn from_catalog(catalog: Catalog, source: &str) -> Self {
        Self {
            items: catalog.items.into_iter().map(Arc::new).collect(),
            source: source.to_string(),
        }
    }

    /// Load a catalog file, falling back to the demo catalog on any error.
    /// A broken catalog is a logged inconvenience, never a startup failure.
    pub fn load_or_demo(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Catalog::load(path) {
            Ok(catalog) => {
                tracing::info!("loaded catalog from {} ({} items)", path.display(), catalog.len());
                Self::from_catalog(catalog, &path.display().to_string())
            }
            Err(e) => {
                tracing::error!("failed to load catalog from {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn items(&self) -> &[Arc<CatalogItem>] {
        &self.items
    }

    pub fn find(&self, id: &str) -> Option<&Arc<CatalogItem>> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Resolve an id to a shared item reference. None means the caller should
    /// log and ignore (best-effort deep links and drops).
    pub fn resolve(&self, id: &str) -> Option<Arc<CatalogItem>> {
        self.find(id).cloned()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_demo_catalog() {
        let state = CatalogState::default();
        assert!(!state.is_empty());
        assert_eq!(state.source(), "built-in demo catalog");
    }

    #[test]
    fn test_resolve_shares_the_item() {
        let state = CatalogState::default();
        let id = state.items()[0].id.clone();
        let a = state.resolve(&id).unwrap();
        let b = state.resolve(&id).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(state.resolve("no-such-item").is_none());
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let state = CatalogState::load_or_demo(Some(Path::new("/no/such/catalog.json")));
        assert_eq!(state.source(), "built-in demo catalog");
        assert!(!state.is_empty());
    }
}
