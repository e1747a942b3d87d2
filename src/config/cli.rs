use crate::core::Storage;
use crate::utils::error::{ExportError, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Writes output files under a base directory, creating it on demand.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    /// Joins `path` onto the base directory. Only plain relative names are
    /// accepted so a file can never land outside it.
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        let plain = relative.components().count() > 0
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));

        if !plain {
            return Err(ExportError::InvalidConfigValueError {
                field: "output file".to_string(),
                value: path.to_string(),
                reason: "must be a relative path inside the output directory".to_string(),
            });
        }

        Ok(Path::new(&self.base_path).join(relative))
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path)?;

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // 單次寫入，失敗時不會留下開啟中的檔案
        fs::write(full_path, data)?;
        Ok(())
    }

    fn display_path(&self, path: &str) -> String {
        Path::new(&self.base_path).join(path).display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("nested").join("out");
        let storage = LocalStorage::new(base.to_str().unwrap().to_string());

        storage.write_file("board.json", b"{}").await.unwrap();

        assert_eq!(std::fs::read(base.join("board.json")).unwrap(), b"{}");
        assert_eq!(
            storage.display_path("board.json"),
            base.join("board.json").display().to_string()
        );
    }

    #[tokio::test]
    async fn test_write_rejects_paths_leaving_base_directory() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("out");
        let storage = LocalStorage::new(base.to_str().unwrap().to_string());

        for path in ["a/../../b.csv", "../escaped.csv", "./x.csv", "/tmp/abs.csv", ""] {
            let err = storage.write_file(path, b"x").await.unwrap_err();
            assert!(
                matches!(err, ExportError::InvalidConfigValueError { .. }),
                "{path} should be rejected"
            );
        }

        assert!(!temp_dir.path().join("b.csv").exists());
        assert!(!temp_dir.path().join("escaped.csv").exists());
        assert!(!base.exists());
    }

    #[tokio::test]
    async fn test_write_accepts_nested_relative_path() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        storage.write_file("sub/board.csv", b"a,b").await.unwrap();
        assert!(temp_dir.path().join("sub").join("board.csv").exists());
    }
}
