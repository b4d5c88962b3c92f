//! Agent Catalog
//!
//! Stateless service over an `AgentStore`: search, lookup and creation. Every call reads
//! through to the store; nothing is cached between calls.

pub mod ids;
pub mod search;

use crate::agent::{validate_draft, AgentDraft, AgentRecord};
use crate::error::ApiError;
use crate::store::{AgentStore, IdPolicy};
use std::sync::Arc;
use tracing::{debug, instrument};

pub use ids::{next_sequential_id, parse_identifier};
pub use search::SearchFilter;

#[derive(Clone)]
pub struct AgentCatalog {
    store: Arc<dyn AgentStore>,
}

impl AgentCatalog {
    pub fn new(store: Arc<dyn AgentStore>) -> Self {
        Self { store }
    }

    pub fn id_policy(&self) -> IdPolicy {
        self.store.id_policy()
    }

    /// Every record matching `query` (name/description substring) and all of `tags`
    /// (comma separated). Absent or blank filters are ignored.
    #[instrument(skip(self))]
    pub fn search(
        &self,
        query: Option<&str>,
        tags: Option<&str>,
    ) -> Result<Vec<AgentRecord>, ApiError> {
        let filter = SearchFilter::parse(query, tags);
        let records = self.store.list_all()?;
        let total = records.len();
        let matched = filter.apply(records);
        debug!(total, matched = matched.len(), "Agent search");
        Ok(matched)
    }

    #[instrument(skip(self))]
    pub fn get_by_id(&self, id: &str) -> Result<AgentRecord, ApiError> {
        let id = parse_identifier(self.id_policy(), id)?;
        self.store
            .get(&id)?
            .ok_or_else(|| ApiError::NotFound(id))
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub fn create(&self, draft: AgentDraft) -> Result<AgentRecord, ApiError> {
        validate_draft(&draft).map_err(ApiError::ValidationError)?;
        let record = self.store.create(draft, &next_sequential_id)?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::store::{FileAgentStore, IdAllocator, SledAgentStore};
    use tempfile::TempDir;

    fn file_catalog(temp: &TempDir) -> AgentCatalog {
        AgentCatalog::new(Arc::new(FileAgentStore::new(temp.path().join("agents.json"))))
    }

    fn sled_catalog(temp: &TempDir) -> AgentCatalog {
        AgentCatalog::new(Arc::new(
            SledAgentStore::new(&temp.path().join("db")).unwrap(),
        ))
    }

    /// Store whose every operation fails.
    struct BrokenStore;

    impl AgentStore for BrokenStore {
        fn id_policy(&self) -> IdPolicy {
            IdPolicy::Sequential
        }

        fn list_all(&self) -> Result<Vec<AgentRecord>, StorageError> {
            Err(disk_gone())
        }

        fn create(
            &self,
            _draft: AgentDraft,
            _allocate: IdAllocator<'_>,
        ) -> Result<AgentRecord, StorageError> {
            Err(disk_gone())
        }
    }

    fn disk_gone() -> StorageError {
        StorageError::IoError(std::io::Error::new(std::io::ErrorKind::Other, "disk gone"))
    }

    #[test]
    fn test_sequential_ids_on_empty_store() {
        let temp = TempDir::new().unwrap();
        let catalog = file_catalog(&temp);
        let ids: Vec<_> = ["a", "b", "c"]
            .iter()
            .map(|n| catalog.create(AgentDraft::new(*n, "", ["x"])).unwrap().id)
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_sequential_id_follows_max_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("agents.json");
        let existing = vec![
            AgentDraft::new("five", "", ["x"]).into_record("5".to_string()),
            AgentDraft::new("seven", "", ["x"]).into_record("7".to_string()),
        ];
        std::fs::write(&path, serde_json::to_string(&existing).unwrap()).unwrap();

        let catalog = AgentCatalog::new(Arc::new(FileAgentStore::new(path)));
        let created = catalog.create(AgentDraft::new("eight", "", ["x"])).unwrap();
        assert_eq!(created.id, "8");
    }

    #[test]
    fn test_create_then_get_is_equal() {
        let temp = TempDir::new().unwrap();
        for catalog in [file_catalog(&temp), sled_catalog(&temp)] {
            let created = catalog
                .create(AgentDraft::new("Scout", "Finds", ["Web", "search"]))
                .unwrap();
            assert_eq!(catalog.get_by_id(&created.id).unwrap(), created);
        }
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let temp = TempDir::new().unwrap();
        let catalog = sled_catalog(&temp);
        assert!(matches!(
            catalog.get_by_id("12345"),
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(
            catalog.get_by_id("twelve"),
            Err(ApiError::InvalidIdentifier(_))
        ));

        let catalog = file_catalog(&temp);
        assert!(matches!(catalog.get_by_id("9"), Err(ApiError::NotFound(_))));
    }

    #[test]
    fn test_create_validates_name() {
        let temp = TempDir::new().unwrap();
        let catalog = file_catalog(&temp);
        let err = catalog
            .create(AgentDraft::new(" ", "desc", ["x"]))
            .unwrap_err();
        assert!(matches!(err, ApiError::ValidationError(_)));
        assert!(catalog.search(None, None).unwrap().is_empty());
    }

    #[test]
    fn test_search_without_filters_matches_list_all() {
        let temp = TempDir::new().unwrap();
        let store = Arc::new(FileAgentStore::new(temp.path().join("agents.json")));
        let catalog = AgentCatalog::new(store.clone());
        for n in ["b", "a", "c"] {
            catalog.create(AgentDraft::new(n, "", ["x"])).unwrap();
        }
        assert_eq!(catalog.search(None, None).unwrap(), store.list_all().unwrap());
        assert_eq!(
            catalog.search(Some("  "), Some("")).unwrap(),
            store.list_all().unwrap()
        );
    }

    #[test]
    fn test_store_failures_propagate() {
        let catalog = AgentCatalog::new(Arc::new(BrokenStore));
        assert!(matches!(
            catalog.search(None, None),
            Err(ApiError::StoreUnavailable(_))
        ));
        assert!(matches!(
            catalog.get_by_id("1"),
            Err(ApiError::StoreUnavailable(_))
        ));
        assert!(matches!(
            catalog.create(AgentDraft::new("n", "", ["x"])),
            Err(ApiError::StoreUnavailable(_))
        ));
    }

    #[test]
    fn test_reads_observe_external_writes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("agents.json");
        let reader = AgentCatalog::new(Arc::new(FileAgentStore::new(path.clone())));
        let writer = AgentCatalog::new(Arc::new(FileAgentStore::new(path)));

        assert!(reader.search(None, None).unwrap().is_empty());
        let created = writer.create(AgentDraft::new("late", "", ["x"])).unwrap();
        assert_eq!(reader.get_by_id(&created.id).unwrap(), created);
    }
}
