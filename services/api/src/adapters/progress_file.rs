//! services/api/src/adapters/progress_file.rs
//!
//! This module contains the file-backed implementation of the
//! `ProgressRepository` port: the user-progress snapshot is written as JSON
//! next to the server, via a temp file and rename so a crash mid-write never
//! leaves a truncated snapshot behind.

use std::path::PathBuf;

use async_trait::async_trait;

use reminder_core::domain::UserProgress;
use reminder_core::ports::{PortError, PortResult, ProgressRepository};

/// A progress repository that persists the snapshot to a single JSON file.
#[derive(Clone)]
pub struct FileProgressRepository {
    path: PathBuf,
}

impl FileProgressRepository {
    /// Creates a new `FileProgressRepository` writing to `path`.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl ProgressRepository for FileProgressRepository {
    async fn save(&self, progress: &UserProgress) -> PortResult<()> {
        let json = serde_json::to_vec_pretty(progress)
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let temp = self.temp_path();
        tokio::fs::write(&temp, &json)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }

    async fn load(&self) -> PortResult<Option<UserProgress>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PortError::Unexpected(e.to_string())),
        };

        let progress = serde_json::from_slice(&bytes)
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(Some(progress))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn repo_in(dir: &tempfile::TempDir) -> FileProgressRepository {
        FileProgressRepository::new(dir.path().join("user_progress.json"))
    }

    #[tokio::test]
    async fn test_load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(&dir);
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(&dir);

        let progress = UserProgress {
            xp: 120,
            current_streak: 4,
            last_completion_date: NaiveDate::from_ymd_opt(2024, 3, 2),
        };
        repo.save(&progress).await.unwrap();

        let loaded = repo.load().await.unwrap().unwrap();
        assert_eq!(loaded, progress);
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(&dir);

        repo.save(&UserProgress::default()).await.unwrap();
        let later = UserProgress {
            xp: 15,
            current_streak: 1,
            last_completion_date: NaiveDate::from_ymd_opt(2024, 3, 3),
        };
        repo.save(&later).await.unwrap();

        assert_eq!(repo.load().await.unwrap().unwrap(), later);
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_is_an_error_not_a_panic() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(&dir);
        tokio::fs::write(dir.path().join("user_progress.json"), b"{not json")
            .await
            .unwrap();
        assert!(repo.load().await.is_err());
    }
}
