use std::path::Path;

use crate::domain::config::ModelId;
use crate::domain::errors::{DomainError, DomainResult};

/// Catálogo local de modelos: resuelve (directorio, nombre) al fichero
/// ONNX correspondiente. La descarga desde un hub queda fuera del daemon;
/// el modelo debe estar ya en disco.
pub struct OnnxModelCatalog;

impl OnnxModelCatalog {
    pub fn new() -> Self {
        Self
    }

    /// Resuelve `<dir>/<nombre>.onnx` y valida que el fichero exista.
    pub fn resolve(&self, dir_or_repo: &str, name: &str) -> DomainResult<ModelId> {
        if dir_or_repo.trim().is_empty() {
            return Err(DomainError::InvalidInput("model_dir_or_repo empty".into()));
        }
        if name.trim().is_empty() {
            return Err(DomainError::InvalidInput("model_name empty".into()));
        }

        let onnx_path = format!("{}/{}.onnx", dir_or_repo.trim_end_matches('/'), name);
        if !Path::new(&onnx_path).exists() {
            return Err(DomainError::NotFound(format!(
                "model file not found: {}",
                onnx_path
            )));
        }

        Ok(ModelId {
            name: name.to_string(),
            onnx_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_an_existing_model_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("yolov5s.onnx"), b"modelo").unwrap();

        let catalog = OnnxModelCatalog::new();
        let model = catalog
            .resolve(dir.path().to_str().unwrap(), "yolov5s")
            .unwrap();

        assert_eq!(model.name, "yolov5s");
        assert!(model.onnx_path.ends_with("yolov5s.onnx"));
    }

    #[test]
    fn missing_model_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = OnnxModelCatalog::new();
        let err = catalog
            .resolve(dir.path().to_str().unwrap(), "yolov5s")
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn empty_identifiers_are_rejected() {
        let catalog = OnnxModelCatalog::new();
        assert!(catalog.resolve("", "yolov5s").is_err());
        assert!(catalog.resolve("models", "  ").is_err());
    }

    #[test]
    fn hub_style_default_without_a_local_file_fails_before_polling() {
        // El valor por defecto "ultralytics/yolov5" se interpreta como ruta
        // local: sin un fichero en disco el arranque debe fallar.
        let catalog = OnnxModelCatalog::new();
        assert!(catalog.resolve("ultralytics/yolov5", "yolov5s").is_err());
    }
}
