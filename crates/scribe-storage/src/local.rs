use crate::keys::{artifact_file_name, input_file_name};
use crate::traits::{SessionStorage, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use scribe_core::SessionId;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
#[derive(Clone, Debug)]
pub struct LocalStorage {
    upload_dir: PathBuf,
    output_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance, creating both roots if needed
    ///
    /// # Arguments
    /// * `upload_dir` - Root directory for session inputs (e.g., "./uploads")
    /// * `output_dir` - Directory for combined transcripts (e.g., "./outputs")
    pub async fn new(
        upload_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> StorageResult<Self> {
        let upload_dir = upload_dir.into();
        let output_dir = output_dir.into();

        for dir in [&upload_dir, &output_dir] {
            fs::create_dir_all(dir).await.map_err(|e| {
                StorageError::ConfigError(format!(
                    "Failed to create storage directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
        }

        Ok(LocalStorage {
            upload_dir,
            output_dir,
        })
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn session_dir(&self, session: &SessionId) -> PathBuf {
        self.upload_dir.join(session.as_str())
    }

    fn artifact_path(&self, name: &str) -> StorageResult<PathBuf> {
        Ok(self.output_dir.join(artifact_file_name(name)?))
    }

    async fn write_file(path: &Path, data: &[u8]) -> StorageResult<()> {
        let mut file = fs::File::create(path).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(data).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        Ok(())
    }
}

#[async_trait]
impl SessionStorage for LocalStorage {
    async fn create_session(&self, session: &SessionId) -> StorageResult<PathBuf> {
        let dir = self.session_dir(session);
        fs::create_dir_all(&dir).await.map_err(|e| {
            StorageError::WriteFailed(format!(
                "Failed to create session directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        tracing::debug!(session_id = %session, path = %dir.display(), "Session directory created");
        Ok(dir)
    }

    async fn save_input(
        &self,
        session: &SessionId,
        index: usize,
        filename: &str,
        data: Bytes,
    ) -> StorageResult<PathBuf> {
        let path = self.session_dir(session).join(input_file_name(index, filename)?);
        let start = std::time::Instant::now();

        Self::write_file(&path, &data).await?;

        tracing::info!(
            session_id = %session,
            path = %path.display(),
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Saved uploaded file"
        );

        Ok(path)
    }

    async fn write_artifact(&self, session: &SessionId, contents: &str) -> StorageResult<String> {
        let name = session.artifact_name();
        let path = self.artifact_path(&name)?;

        Self::write_file(&path, contents.as_bytes()).await?;

        tracing::info!(
            session_id = %session,
            path = %path.display(),
            size_bytes = contents.len(),
            "Transcript saved"
        );

        Ok(name)
    }

    async fn read_artifact(&self, name: &str) -> StorageResult<Vec<u8>> {
        let path = self.artifact_path(name)?;

        match fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StorageError::NotFound(name.to_string()))
            }
            Err(e) => Err(StorageError::ReadFailed(format!(
                "Failed to read file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn purge_session(&self, session: &SessionId) -> StorageResult<()> {
        let dir = self.session_dir(session);
        let artifact = self.artifact_path(&session.artifact_name())?;

        let dir_result = match fs::remove_dir_all(&dir).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::DeleteFailed(format!(
                "Failed to remove session directory {}: {}",
                dir.display(),
                e
            ))),
        };

        let artifact_result = match fs::remove_file(&artifact).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::DeleteFailed(format!(
                "Failed to remove artifact {}: {}",
                artifact.display(),
                e
            ))),
        };

        tracing::info!(session_id = %session, "Session purged");

        dir_result.and(artifact_result)
    }
}
