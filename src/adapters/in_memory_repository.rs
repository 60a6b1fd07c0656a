//! In-memory session repository for testing.
//!
//! This adapter provides a pure in-memory implementation of
//! SessionRepository, enabling fast tests without any file system I/O.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex},
};

use crate::{
    Result, error::Error, pipeline::tracking::TrackingSession, ports::SessionRepository,
};

/// In-memory repository for testing.
///
/// Stores serialized sessions in a shared HashMap keyed by path, avoiding
/// file system I/O entirely.
///
/// # Thread Safety
///
/// Clones share the same underlying storage behind a mutex.
#[derive(Clone)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Number of sessions currently stored.
    pub fn count(&self) -> usize {
        self.storage.lock().unwrap().len()
    }

    /// Clear all stored sessions.
    pub fn clear(&self) {
        self.storage.lock().unwrap().clear();
    }

    /// Check whether a session exists at the given path.
    pub fn contains(&self, path: &Path) -> bool {
        let key = path.to_string_lossy().to_string();
        self.storage.lock().unwrap().contains_key(&key)
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRepository for InMemoryRepository {
    fn save(&self, session: &TrackingSession, path: &Path) -> Result<()> {
        let key = path.to_string_lossy().to_string();

        let bytes = rmp_serde::to_vec(session).map_err(|e| Error::SerializationContext {
            operation: "serialize session for in-memory storage".to_string(),
            message: e.to_string(),
        })?;

        self.storage.lock().unwrap().insert(key, bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<TrackingSession> {
        let key = path.to_string_lossy().to_string();
        let storage = self.storage.lock().unwrap();

        let bytes = storage.get(&key).ok_or_else(|| Error::Io {
            operation: format!("load session from in-memory storage at {path:?}"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "key not found in memory"),
        })?;

        rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
            operation: "deserialize session from in-memory storage".to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::tracking::{TrackingConfig, TrackingResult};

    fn sample_session() -> TrackingSession {
        TrackingSession {
            config: TrackingConfig::default(),
            tracker: "Particle".to_string(),
            trace: Vec::new(),
            result: TrackingResult {
                steps: 0,
                adversaries: 1,
                captures: 0,
                mean_error: 0.0,
                mean_entropy: 0.0,
                final_error: 0.0,
            },
        }
    }

    #[test]
    fn save_and_load_roundtrip() {
        let repo = InMemoryRepository::new();
        let session = sample_session();
        let path = Path::new("test_session");

        assert_eq!(repo.count(), 0);
        assert!(!repo.contains(path));

        repo.save(&session, path).unwrap();
        assert_eq!(repo.count(), 1);
        assert!(repo.contains(path));

        let loaded = repo.load(path).unwrap();
        assert_eq!(loaded.tracker, session.tracker);
    }

    #[test]
    fn load_nonexistent_returns_error() {
        let repo = InMemoryRepository::new();
        assert!(repo.load(Path::new("nonexistent")).is_err());
    }

    #[test]
    fn clone_shares_storage() {
        let repo1 = InMemoryRepository::new();
        let repo2 = repo1.clone();

        repo1.save(&sample_session(), Path::new("shared")).unwrap();
        assert!(repo2.contains(Path::new("shared")));
        assert_eq!(repo2.count(), 1);

        repo2.clear();
        assert_eq!(repo1.count(), 0);
    }
}
