use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use super::models::PlatformState;
use super::StoreError;
use crate::utils::logging::{log_store_error, log_store_operation};

/// Reads the document at `path`. A missing file yields the empty state; a
/// file that exists but does not parse is an error.
pub async fn load(path: &Path) -> Result<PlatformState, StoreError> {
    let raw = match fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(PlatformState::default()),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// Replaces the document at `path` with `state` through a temp file in the
/// same directory, so readers never observe a half-written file.
pub async fn save(path: &Path, state: &PlatformState) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(io_err)?;
    }

    let payload = serde_json::to_vec_pretty(state).map_err(StoreError::Encode)?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "data.json".to_string());
    let temp_path = path.with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));

    {
        let mut file = File::create(&temp_path).await.map_err(io_err)?;
        file.write_all(&payload).await.map_err(io_err)?;
        file.sync_all().await.map_err(io_err)?;
    }

    if let Err(e) = fs::rename(&temp_path, path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(io_err(e));
    }

    Ok(())
}

/// Single-writer handle over the persisted document.
///
/// The document is loaded once and kept behind a mutex; every mutation is
/// applied to a copy, written to disk, and only then published. Concurrent
/// handlers therefore never lose each other's updates.
#[derive(Clone)]
pub struct JsonStore {
    path: Arc<PathBuf>,
    state: Arc<Mutex<PlatformState>>,
}

impl JsonStore {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let mut state = load(&path).await?;

        let drift = state.check_consistency();
        if !drift.is_empty() {
            for problem in &drift {
                warn!("Store index drift in {}: {}", path.display(), problem);
            }
            state.reindex();
            save(&path, &state).await?;
            info!("Rebuilt bots index for {}", path.display());
        }

        info!(
            "Opened store {} ({} users, {} logged creations)",
            path.display(),
            state.users.len(),
            state.stats.created_bots.len()
        );

        Ok(Self {
            path: Arc::new(path),
            state: Arc::new(Mutex::new(state)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn read<T>(&self, f: impl FnOnce(&PlatformState) -> T) -> T {
        let state = self.state.lock().await;
        f(&state)
    }

    pub async fn snapshot(&self) -> PlatformState {
        self.state.lock().await.clone()
    }

    /// Applies `f` and persists the result. The in-memory document is left
    /// untouched when the write fails; unchanged documents are not rewritten.
    pub async fn mutate<T>(
        &self,
        operation: &str,
        f: impl FnOnce(&mut PlatformState) -> T,
    ) -> Result<T, StoreError> {
        let mut state = self.state.lock().await;
        let mut next = state.clone();
        let result = f(&mut next);

        if next == *state {
            log_store_operation(operation, Some("no changes"));
            return Ok(result);
        }

        if let Err(e) = save(&self.path, &next).await {
            log_store_error(operation, &e.to_string());
            return Err(e);
        }
        *state = next;
        log_store_operation(operation, None);

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let state = load(&dir.path().join("absent.json")).await.unwrap();
        assert_eq!(state, PlatformState::default());
    }

    #[tokio::test]
    async fn test_load_corrupt_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load(&path).await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[tokio::test]
    async fn test_save_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("data.json");
        let mut state = PlatformState::default();
        state.claim_owner(1);

        save(&path, &state).await.unwrap();
        save(&path, &state).await.unwrap();

        let names: Vec<String> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["data.json".to_string()]);
        assert_eq!(load(&path).await.unwrap(), state);
    }

    #[tokio::test]
    async fn test_open_repairs_index() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        let mut state = PlatformState::default();
        state.set_user_bot(3, "3:T", "threeBot", 1).unwrap();
        state.bots.clear();
        save(&path, &state).await.unwrap();

        let store = JsonStore::open(&path).await.unwrap();
        assert!(store.read(|s| s.bots.contains_key("threeBot")).await);
        assert!(load(&path).await.unwrap().check_consistency().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_mutations_are_not_lost() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        let store = JsonStore::open(&path).await.unwrap();

        let mut tasks = Vec::new();
        for user_id in 0..20u64 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                store
                    .mutate("set_user_bot", |s| {
                        s.set_user_bot(user_id, &format!("{user_id}:T"), &format!("bot{user_id}"), 0)
                            .is_ok()
                    })
                    .await
                    .unwrap()
            }));
        }
        for task in tasks {
            assert!(task.await.unwrap());
        }

        let persisted = load(&path).await.unwrap();
        assert_eq!(persisted.users.len(), 20);
        assert_eq!(persisted.stats.created_bots.len(), 20);
    }
}
