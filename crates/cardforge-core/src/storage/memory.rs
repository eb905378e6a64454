//! In-memory design store.

use super::{BoxFuture, DesignPatch, DesignStore, StoreError, StoreResult};
use crate::design::Design;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// In-memory mock backend for testing and ephemeral use.
///
/// Assigns ids and timestamps the way the real backend would.
#[derive(Default)]
pub struct MemoryStore {
    designs: RwLock<HashMap<String, Design>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored designs.
    pub fn len(&self) -> usize {
        self.designs.read().map(|d| d.len()).unwrap_or(0)
    }

    /// True if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DesignStore for MemoryStore {
    fn get_design(&self, id: &str) -> BoxFuture<'_, StoreResult<Option<Design>>> {
        let id = id.to_string();
        Box::pin(async move {
            let designs = self
                .designs
                .read()
                .map_err(|e| StoreError::Other(format!("Lock error: {}", e)))?;
            Ok(designs.get(&id).cloned())
        })
    }

    fn create_design(&self, mut design: Design) -> BoxFuture<'_, StoreResult<Design>> {
        Box::pin(async move {
            let mut designs = self
                .designs
                .write()
                .map_err(|e| StoreError::Other(format!("Lock error: {}", e)))?;
            let id = Uuid::new_v4().to_string();
            let now = Utc::now();
            design.id = Some(id.clone());
            design.created_at = Some(now);
            design.updated_at = Some(now);
            designs.insert(id, design.clone());
            Ok(design)
        })
    }

    fn update_design(
        &self,
        id: &str,
        patch: DesignPatch,
    ) -> BoxFuture<'_, StoreResult<Option<Design>>> {
        let id = id.to_string();
        Box::pin(async move {
            let mut designs = self
                .designs
                .write()
                .map_err(|e| StoreError::Other(format!("Lock error: {}", e)))?;
            let Some(design) = designs.get_mut(&id) else {
                return Ok(None);
            };
            patch.apply_to(design);
            design.updated_at = Some(Utc::now());
            Ok(Some(design.clone()))
        })
    }

    fn delete_design(&self, id: &str) -> BoxFuture<'_, StoreResult<bool>> {
        let id = id.to_string();
        Box::pin(async move {
            let mut designs = self
                .designs
                .write()
                .map_err(|e| StoreError::Other(format!("Lock error: {}", e)))?;
            Ok(designs.remove(&id).is_some())
        })
    }

    fn list_designs(&self) -> BoxFuture<'_, StoreResult<Vec<Design>>> {
        Box::pin(async move {
            let designs = self
                .designs
                .read()
                .map_err(|e| StoreError::Other(format!("Lock error: {}", e)))?;
            Ok(designs.values().cloned().collect())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::block_on;

    #[test]
    fn test_create_assigns_id_and_timestamps() {
        let store = MemoryStore::new();
        let created = block_on(store.create_design(Design::untitled())).unwrap();
        assert!(created.id.is_some());
        assert!(created.created_at.is_some());
        assert_eq!(created.updated_at, created.created_at);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_missing_is_none() {
        let store = MemoryStore::new();
        let found = block_on(store.get_design("nope")).unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_update_merges_patch() {
        let store = MemoryStore::new();
        let created = block_on(store.create_design(Design::untitled())).unwrap();
        let id = created.id.unwrap();

        let patch = DesignPatch {
            title: Some("Visitor badge".to_string()),
            ..DesignPatch::default()
        };
        let updated = block_on(store.update_design(&id, patch)).unwrap().unwrap();
        assert_eq!(updated.title, "Visitor badge");
        // Untouched fields keep their stored values.
        assert_eq!(updated.canvas_size, created.canvas_size);
    }

    #[test]
    fn test_update_missing_is_none() {
        let store = MemoryStore::new();
        let result = block_on(store.update_design("nope", DesignPatch::default())).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_delete() {
        let store = MemoryStore::new();
        let created = block_on(store.create_design(Design::untitled())).unwrap();
        let id = created.id.unwrap();

        assert!(block_on(store.delete_design(&id)).unwrap());
        assert!(!block_on(store.delete_design(&id)).unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn test_list() {
        let store = MemoryStore::new();
        block_on(store.create_design(Design::untitled().with_title("A"))).unwrap();
        block_on(store.create_design(Design::untitled().with_title("B"))).unwrap();

        let mut titles: Vec<_> = block_on(store.list_designs())
            .unwrap()
            .into_iter()
            .map(|d| d.title)
            .collect();
        titles.sort();
        assert_eq!(titles, vec!["A", "B"]);
    }
}
