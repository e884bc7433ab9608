//! File-backed persistence backend.
//!
//! Every session record is written to `<dir>/<session_id>.json`. Submitting the
//! same record twice overwrites the file, so retries never duplicate a session.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::actors::traits::PersistenceBackend;
use crate::error::AppError;
use crate::models::SessionRecord;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn record_path(&self, session_id: Uuid) -> PathBuf {
        self.dir.join(format!("{}.json", session_id))
    }

    /// Read a previously stored record back.
    pub async fn load(&self, session_id: Uuid) -> Result<SessionRecord, AppError> {
        let raw = fs::read_to_string(self.record_path(session_id)).await?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[async_trait]
impl PersistenceBackend for JsonFileStore {
    #[instrument(skip(self, record), fields(session_id = %record.session_id))]
    async fn submit(&self, record: &SessionRecord) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir).await.map_err(|e| {
            AppError::Persistence(format!("Cannot create {}: {}", self.dir.display(), e))
        })?;

        let json = serde_json::to_vec_pretty(record)?;
        let path = self.record_path(record.session_id);
        // write to a sibling file first so readers never see a partial record
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .await
            .map_err(|e| AppError::Persistence(format!("Cannot write {}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| AppError::Persistence(format!("Cannot replace {}: {}", path.display(), e)))?;

        debug!("Session record written to {}", path.display());
        Ok(())
    }
}
