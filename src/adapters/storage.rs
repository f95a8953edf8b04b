use crate::domain::ports::Storage;
use crate::utils::error::{EtlError, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Local filesystem storage. Relative paths resolve against `base_path`.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.base_path.join(path)
    }
}

/// Sibling path the data is staged in before the rename.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".tmp");
    path.with_file_name(name)
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        let full_path = self.resolve(path);
        tokio::fs::read(&full_path)
            .await
            .map_err(|e| EtlError::io(&full_path, e))
    }

    async fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| EtlError::io(parent, e))?;
        }

        let staging = staging_path(&full_path);
        tokio::fs::write(&staging, data)
            .await
            .map_err(|e| EtlError::io(&staging, e))?;

        if let Err(e) = tokio::fs::rename(&staging, &full_path).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(EtlError::io(&full_path, e));
        }

        Ok(())
    }

    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(self.resolve(path))
            .await
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_staging_path_is_hidden_sibling() {
        let staged = staging_path(Path::new("data/movies/en/data-1.json"));
        assert_eq!(staged, PathBuf::from("data/movies/en/.data-1.json.tmp"));
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        let path = Path::new("movies/en/data-1.json");

        storage.write_file(path, b"{\"profiles\": []}").await.unwrap();

        assert!(storage.exists(path).await);
        assert_eq!(storage.read_file(path).await.unwrap(), b"{\"profiles\": []}");
        assert!(!dir.path().join("movies/en/.data-1.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_write_replaces_existing_content() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        let path = Path::new("manifest.json");

        storage.write_file(path, b"first version").await.unwrap();
        storage.write_file(path, b"second").await.unwrap();

        assert_eq!(storage.read_file(path).await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_read_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        let err = storage.read_file(Path::new("missing.md")).await.unwrap_err();
        assert!(matches!(err, EtlError::FileNotFound { .. }));
        assert!(!storage.exists(Path::new("missing.md")).await);
    }
}
