use async_trait::async_trait;
use std::fs;
use std::path::PathBuf;

use crate::application::ports::ArtifactSinkPort;
use crate::domain::detection::Detection;
use crate::domain::errors::{DomainError, DomainResult};

/// Escribe el sidecar JSON con las detecciones en el directorio de salida,
/// con el nombre `<stem>.json` para poder correlacionarlo con la imagen.
pub struct FsArtifactSink {
    dir: PathBuf,
}

impl FsArtifactSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl ArtifactSinkPort for FsArtifactSink {
    async fn write_detections(
        &self,
        stem: &str,
        detections: &[Detection],
    ) -> DomainResult<PathBuf> {
        let path = self.dir.join(format!("{stem}.json"));
        let body = serde_json::to_vec(detections)
            .map_err(|e| DomainError::OperationFailed(e.to_string()))?;
        fs::write(&path, body)
            .map_err(|e| DomainError::Io(format!("{}: {}", path.display(), e)))?;
        Ok(path)
    }
}
