use crate::domain::ports::Storage;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> std::io::Result<Option<Vec<u8>>> {
        let full_path = self.base_path.join(path);
        match tokio::fs::read(&full_path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> std::io::Result<()> {
        let full_path = self.base_path.join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Rename is atomic on the same filesystem, so readers never see a partial file.
        // Each write stages under its own name so overlapping writers never share one.
        let mut staging = full_path.clone().into_os_string();
        staging.push(format!(".{}.tmp", Uuid::new_v4()));
        let staging = PathBuf::from(staging);

        let staged = match tokio::fs::write(&staging, data).await {
            Ok(()) => tokio::fs::rename(&staging, &full_path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = staged {
            if let Err(cleanup) = tokio::fs::remove_file(&staging).await {
                tracing::debug!("Could not remove staging file {:?}: {}", staging, cleanup);
            }
            return Err(e);
        }
        Ok(())
    }

    fn document_key(&self, path: &str) -> String {
        let base = std::fs::canonicalize(&self.base_path)
            .unwrap_or_else(|_| self.base_path.clone());
        base.join(path).to_string_lossy().into_owned()
    }
}
