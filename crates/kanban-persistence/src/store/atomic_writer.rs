use kanban_core::{KanbanError, KanbanResult};
use std::io::Write;
use std::path::Path;
use tokio::fs;

/// Write-to-temp-file then rename, so a crash mid-write never leaves a
/// truncated document on disk
pub struct AtomicWriter;

impl AtomicWriter {
    pub async fn write_atomic(path: &Path, data: &[u8]) -> KanbanResult<()> {
        let path = path.to_path_buf();
        let data = data.to_vec();
        let len = data.len();
        let written = path.clone();

        tokio::task::spawn_blocking(move || -> KanbanResult<()> {
            // Temp file in the same directory keeps the rename on one filesystem
            let parent = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
            temp_file.write_all(&data)?;
            temp_file.as_file().sync_all()?;
            temp_file
                .persist(&path)
                .map_err(|e| KanbanError::Io(e.error))?;
            Ok(())
        })
        .await
        .map_err(|e| KanbanError::Internal(format!("atomic write task failed: {}", e)))??;

        tracing::debug!("Atomically wrote {} bytes to {}", len, written.display());
        Ok(())
    }

    /// Read a file, or `None` when it does not exist yet
    pub async fn read_optional(path: &Path) -> KanbanResult<Option<Vec<u8>>> {
        match fs::read(path).await {
            Ok(data) => {
                tracing::debug!("Read {} bytes from {}", data.len(), path.display());
                Ok(Some(data))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_atomic_write_overwrites() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("board.json");

        AtomicWriter::write_atomic(&file_path, b"First").await.unwrap();
        AtomicWriter::write_atomic(&file_path, b"Second").await.unwrap();

        let read_data = AtomicWriter::read_optional(&file_path).await.unwrap();
        assert_eq!(read_data.as_deref(), Some(&b"Second"[..]));
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let read = AtomicWriter::read_optional(&dir.path().join("absent.json"))
            .await
            .unwrap();
        assert!(read.is_none());
    }
}
