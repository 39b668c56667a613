use super::FavoritesRemote;
use crate::error::{AdoptaError, Result};
use crate::model::EntityId;
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

/// Favorites stored as a JSON array of IDs in a single file.
///
/// A missing file means no favorites. Writes go to a temporary sibling and are
/// renamed into place, so readers never see a partial file.
pub struct FileRemote {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileRemote {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<BTreeSet<EntityId>> {
        match fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(BTreeSet::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeSet::new()),
            Err(e) => Err(AdoptaError::Io(e)),
        }
    }

    async fn save(&self, ids: &BTreeSet<EntityId>) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).await?;

        let content = serde_json::to_string_pretty(ids)?;
        let tmp_file = dir.join(format!(".favorites-{}.tmp", Uuid::new_v4()));
        let written = match fs::write(&tmp_file, content).await {
            Ok(()) => fs::rename(&tmp_file, &self.path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&tmp_file).await {
                debug!(path = %tmp_file.display(), error = %cleanup, "temp file not removed");
            }
            return Err(e.into());
        }
        debug!(path = %self.path.display(), count = ids.len(), "saved favorites");
        Ok(())
    }

    async fn update(&self, apply: impl FnOnce(&mut BTreeSet<EntityId>) -> bool) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut ids = self.load().await?;
        if apply(&mut ids) {
            self.save(&ids).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl FavoritesRemote for FileRemote {
    async fn list_favorite_ids(&self) -> Result<Vec<EntityId>> {
        Ok(self.load().await?.into_iter().collect())
    }

    async fn add_favorite(&self, id: EntityId) -> Result<()> {
        self.update(|ids| ids.insert(id)).await
    }

    async fn remove_favorite(&self, id: EntityId) -> Result<()> {
        self.update(|ids| ids.remove(&id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let remote = FileRemote::new(dir.path().join("favorites.json"));
        assert!(remote.list_favorite_ids().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_creates_parent_dirs_and_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("favorites.json");
        let remote = FileRemote::new(&path);

        remote.add_favorite(4).await.unwrap();
        remote.add_favorite(2).await.unwrap();

        assert!(path.exists());
        assert_eq!(remote.list_favorite_ids().await.unwrap(), vec![2, 4]);
    }

    #[tokio::test]
    async fn remove_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("favorites.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let remote = FileRemote::new(&path);
        remote.remove_favorite(2).await.unwrap();
        remote.remove_favorite(9).await.unwrap();

        let reopened = FileRemote::new(&path);
        assert_eq!(reopened.list_favorite_ids().await.unwrap(), vec![1, 3]);
    }

    #[tokio::test]
    async fn no_temp_files_left_behind() {
        let dir = tempdir().unwrap();
        let remote = FileRemote::new(dir.path().join("favorites.json"));
        remote.add_favorite(1).await.unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["favorites.json".to_string()]);
    }

    #[tokio::test]
    async fn failed_rename_removes_temp_file() {
        let dir = tempdir().unwrap();
        // A directory in the way makes the rename fail after the write succeeded
        let path = dir.path().join("favorites.json");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "").unwrap();

        let remote = FileRemote::new(&path);
        let ids: BTreeSet<EntityId> = [1].into_iter().collect();
        assert!(matches!(remote.save(&ids).await, Err(AdoptaError::Io(_))));

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["favorites.json".to_string()]);
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("favorites.json");
        std::fs::write(&path, "not json").unwrap();

        let remote = FileRemote::new(&path);
        assert!(matches!(
            remote.list_favorite_ids().await,
            Err(AdoptaError::Serialization(_))
        ));
        assert!(remote.add_favorite(1).await.is_err());
    }
}
