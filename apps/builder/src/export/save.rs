//! Bytes → file.

use std::io::Write;
use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("refusing to save under name {0:?}")]
    InvalidName(String),

    #[error("save task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[async_trait]
pub trait FileSaver: Send + Sync {
    /// Stores `bytes` under `file_name`; returns where it landed.
    async fn save(&self, bytes: Bytes, file_name: &str) -> Result<PathBuf, SaveError>;
}

/// Saves into one directory. The file only appears once fully written.
#[derive(Debug, Clone)]
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

fn check_name(file_name: &str) -> Result<(), SaveError> {
    let bad = file_name.is_empty()
        || file_name == "."
        || file_name == ".."
        || file_name.contains(['/', '\\']);
    if bad {
        return Err(SaveError::InvalidName(file_name.to_string()));
    }
    Ok(())
}

#[async_trait]
impl FileSaver for DirectorySaver {
    async fn save(&self, bytes: Bytes, file_name: &str) -> Result<PathBuf, SaveError> {
        check_name(file_name)?;
        let dir = self.dir.clone();
        let target = dir.join(file_name);
        let path = tokio::task::spawn_blocking(move || -> Result<PathBuf, SaveError> {
            std::fs::create_dir_all(&dir)?;
            let mut tmp = NamedTempFile::new_in(&dir)?;
            tmp.write_all(&bytes)?;
            tmp.flush()?;
            tmp.persist(&target).map_err(|e| e.error)?;
            Ok(target)
        })
        .await??;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let saver = DirectorySaver::new(dir.path());
        let path = saver
            .save(Bytes::from_static(b"hello"), "Alex_Chen_Resume.pdf")
            .await
            .unwrap();
        assert_eq!(path, dir.path().join("Alex_Chen_Resume.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"hello");
    }

    #[tokio::test]
    async fn test_save_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out/pdf");
        let path = DirectorySaver::new(&nested)
            .save(Bytes::from_static(b"x"), "Resume.pdf")
            .await
            .unwrap();
        assert!(path.starts_with(&nested));
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_save_overwrites_existing() {
        let dir = tempfile::tempdir().unwrap();
        let saver = DirectorySaver::new(dir.path());
        saver.save(Bytes::from_static(b"one"), "a.docx").await.unwrap();
        let path = saver.save(Bytes::from_static(b"two"), "a.docx").await.unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"two");
    }

    #[tokio::test]
    async fn test_path_like_names_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let saver = DirectorySaver::new(dir.path());
        for name in ["", "..", "../x.pdf", "a/b.pdf"] {
            let err = saver.save(Bytes::new(), name).await.unwrap_err();
            assert!(matches!(err, SaveError::InvalidName(_)), "{name}");
        }
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
