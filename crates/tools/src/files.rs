use crate::traits::{FileStore, ToolError};
use async_trait::async_trait;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// File collaborator backed by the real filesystem.
///
/// Paths are used exactly as the model supplies them, resolved against
/// the process working directory.
pub struct DiskStore;

impl DiskStore {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DiskStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileStore for DiskStore {
    async fn write(&self, filename: &str, content: &str) -> Result<(), ToolError> {
        if filename.trim().is_empty() {
            return Err(ToolError::Validation("empty filename".to_string()));
        }

        if let Some(parent) = Path::new(filename).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| ToolError::Execution(e.to_string()))?;
            }
        }

        debug!("writing {} bytes to {}", content.len(), filename);
        fs::write(filename, content)
            .await
            .map_err(|e| ToolError::Execution(e.to_string()))
    }

    async fn read(&self, filename: &str) -> Result<String, ToolError> {
        fs::read_to_string(filename)
            .await
            .map_err(|e| ToolError::Execution(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        let path = path.to_str().unwrap();

        let store = DiskStore::new();
        store.write(path, "hello disk").await.unwrap();
        let content = store.read(path).await.unwrap();
        assert_eq!(content, "hello disk");
    }

    #[tokio::test]
    async fn test_write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site/css/style.css");
        let path = path.to_str().unwrap();

        let store = DiskStore::new();
        store.write(path, "body {}").await.unwrap();
        assert_eq!(store.read(path).await.unwrap(), "body {}");
    }

    #[tokio::test]
    async fn test_read_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");

        let store = DiskStore::new();
        let err = store.read(path.to_str().unwrap()).await.unwrap_err();
        assert!(matches!(err, ToolError::Execution(_)));
    }

    #[tokio::test]
    async fn test_empty_filename_is_rejected() {
        let store = DiskStore::new();
        let err = store.write("", "content").await.unwrap_err();
        assert!(matches!(err, ToolError::Validation(_)));
    }
}
