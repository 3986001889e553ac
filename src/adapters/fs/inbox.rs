use async_trait::async_trait;
use std::fs;
use std::path::PathBuf;

use crate::application::ports::InboxPort;
use crate::domain::errors::{DomainError, DomainResult};

/// Bandeja de entrada sobre un directorio local.
pub struct FsInbox {
    dir: PathBuf,
}

impl FsInbox {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl InboxPort for FsInbox {
    async fn snapshot(&self) -> DomainResult<Vec<String>> {
        let read_dir = fs::read_dir(&self.dir)
            .map_err(|e| DomainError::Io(format!("{}: {}", self.dir.display(), e)))?;
        let mut names = Vec::new();
        for entry in read_dir.flatten() {
            // Solo ficheros regulares: un subdirectorio no es una entrada
            // de trabajo y no debe acabar en la ruta de borrado.
            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            if is_file {
                names.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        Ok(names)
    }

    async fn remove(&self, name: &str) -> DomainResult<()> {
        let path = self.dir.join(name);
        fs::remove_file(&path).map_err(|e| DomainError::Io(format!("{}: {}", path.display(), e)))
    }
}
