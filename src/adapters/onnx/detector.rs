use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::info;

use crate::adapters::onnx::{annotate::draw_detections, yolo_engine::OnnxYoloEngine};
use crate::application::ports::DetectorPort;
use crate::domain::{
    config::InferenceConfig,
    detection::Detection,
    errors::{DomainError, DomainResult},
};

/// Proveedor de inferencia sobre una sesión ONNX cargada una única vez al
/// arrancar. La sesión es el recurso compartido escaso: el Mutex garantiza
/// que nunca se invoque de forma concurrente.
pub struct OnnxDetector {
    engine: Arc<Mutex<OnnxYoloEngine>>,
    config: InferenceConfig,
}

impl OnnxDetector {
    /// Carga el modelo indicado. Un fallo aquí es la puerta de arranque:
    /// el proceso no debe llegar a sondear ningún directorio.
    pub fn load(config: InferenceConfig) -> anyhow::Result<Self> {
        let engine = OnnxYoloEngine::load(&config.model.onnx_path)?;
        info!(
            "Modelo {} cargado desde {}",
            config.model.name, config.model.onnx_path
        );
        Ok(Self {
            engine: Arc::new(Mutex::new(engine)),
            config,
        })
    }
}

fn open_rgb(path: &Path) -> DomainResult<image::RgbImage> {
    // La existencia se revalida aquí: un fichero que desapareció entre el
    // listado y el procesado es un fallo de ese fichero, no del daemon.
    let img = image::open(path)
        .map_err(|e| DomainError::InvalidInput(format!("{}: {}", path.display(), e)))?;
    Ok(img.to_rgb8())
}

#[async_trait]
impl DetectorPort for OnnxDetector {
    async fn detect(&self, image: &Path) -> DomainResult<Vec<Detection>> {
        let engine = self.engine.clone();
        let params = self.config.params.clone();
        let path = image.to_path_buf();

        // Decodificación e inferencia son bloqueantes: al pool de bloqueo.
        tokio::task::spawn_blocking(move || {
            let rgb = open_rgb(&path)?;
            let mut engine = engine
                .lock()
                .map_err(|_| DomainError::OperationFailed("lock del motor envenenado".into()))?;
            engine
                .infer(&rgb, &params)
                .map_err(|e| DomainError::OperationFailed(e.to_string()))
        })
        .await
        .map_err(|e| DomainError::OperationFailed(e.to_string()))?
    }

    async fn render_annotated(
        &self,
        image: &Path,
        detections: &[Detection],
        output_dir: &Path,
    ) -> DomainResult<PathBuf> {
        let name = image
            .file_name()
            .ok_or_else(|| DomainError::InvalidInput(format!("sin nombre: {}", image.display())))?;
        let target = output_dir.join(name);
        let path = image.to_path_buf();
        let detections = detections.to_vec();

        tokio::task::spawn_blocking(move || {
            let mut rgb = open_rgb(&path)?;
            draw_detections(&mut rgb, &detections);
            rgb.save(&target)
                .map_err(|e| DomainError::Io(format!("{}: {}", target.display(), e)))?;
            Ok(target)
        })
        .await
        .map_err(|e| DomainError::OperationFailed(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_rgb_reports_a_vanished_file_as_invalid_input() {
        let err = open_rgb(Path::new("/no/existe/cat.jpg")).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn open_rgb_rejects_a_file_that_is_not_an_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("falsa.png");
        std::fs::write(&path, b"esto no es un png").unwrap();
        assert!(open_rgb(&path).is_err());
    }
}
