use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::domain::{detection::Detection, errors::DomainResult};

/// Proveedor de inferencia: mapea una imagen en disco a una secuencia de
/// detecciones y sabe renderizar su visualización anotada.
#[async_trait]
pub trait DetectorPort: Send + Sync {
    async fn detect(&self, image: &Path) -> DomainResult<Vec<Detection>>;

    /// Guarda la visualización anotada dentro de `output_dir`. El nombre del
    /// artefacto lo decide el propio proveedor; devuelve la ruta escrita.
    async fn render_annotated(
        &self,
        image: &Path,
        detections: &[Detection],
        output_dir: &Path,
    ) -> DomainResult<PathBuf>;
}

/// Bandeja de entrada basada en directorio: instantánea del contenido y
/// borrado de entradas. La instantánea se toma una sola vez por tick.
#[async_trait]
pub trait InboxPort: Send + Sync {
    async fn snapshot(&self) -> DomainResult<Vec<String>>;
    async fn remove(&self, name: &str) -> DomainResult<()>;
}

/// Destino de los registros estructurados de detección.
#[async_trait]
pub trait ArtifactSinkPort: Send + Sync {
    async fn write_detections(
        &self,
        stem: &str,
        detections: &[Detection],
    ) -> DomainResult<PathBuf>;
}
