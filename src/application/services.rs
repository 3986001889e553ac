use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::{
    application::ports::{ArtifactSinkPort, DetectorPort, InboxPort},
    domain::{
        config::WatchConfig,
        detection::summarize_detections,
        report::{ArtifactPair, FailureKind, FileOutcome, TickReport},
    },
};

/// Extensiones aceptadas como imagen de entrada (sin distinguir mayúsculas).
/// Cualquier otra entrada se trata como desecho y se borra sin procesar.
const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "tiff", "bmp"];

pub fn is_supported_image(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| IMAGE_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

fn file_stem(name: &str) -> &str {
    name.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(name)
}

/// Orquestador del ciclo observar-procesar-limpiar. Cada tick toma una
/// instantánea del directorio de entrada y procesa sus entradas en serie;
/// los fallos se aíslan a nivel de fichero y nunca detienen el bucle.
pub struct WatcherService {
    detector: Arc<dyn DetectorPort>,
    inbox: Arc<dyn InboxPort>,
    sink: Arc<dyn ArtifactSinkPort>,
    input_dir: PathBuf,
    output_dir: PathBuf,
    poll_interval: Duration,
}

impl WatcherService {
    pub fn new(
        detector: Arc<dyn DetectorPort>,
        inbox: Arc<dyn InboxPort>,
        sink: Arc<dyn ArtifactSinkPort>,
        config: &WatchConfig,
    ) -> Self {
        Self {
            detector,
            inbox,
            sink,
            input_dir: config.input_dir.clone(),
            output_dir: config.output_dir.clone(),
            poll_interval: config.poll_interval,
        }
    }

    /// Bucle sin fin: un tick por iteración y pausa incondicional entre
    /// ticks, haya habido trabajo o no. Solo la terminación del proceso
    /// detiene el bucle.
    pub async fn run(&self) {
        loop {
            let report = self.process_tick().await;
            if !report.is_empty() {
                info!("Tick completado: {}", report.summary());
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Un tick: instantánea única del directorio y procesado secuencial en
    /// el orden del listado. Los ficheros que aparezcan mientras el lote
    /// está en curso esperan al tick siguiente. Un fallo del propio listado
    /// aborta el tick, no el bucle.
    pub async fn process_tick(&self) -> TickReport {
        let mut report = TickReport::default();
        let names = match self.inbox.snapshot().await {
            Ok(names) => names,
            Err(err) => {
                error!("No se pudo listar el directorio de entrada: {}", err);
                return report;
            }
        };
        for name in names {
            let outcome = self.process_file(&name).await;
            if let FileOutcome::Processed(pair) = &outcome {
                debug!(
                    "Artefactos de {}: {} y {}",
                    name,
                    pair.annotated.display(),
                    pair.sidecar.display()
                );
            }
            report.record(name, outcome);
        }
        report
    }

    /// Pipeline por fichero: clasificar, inferir, persistir. El borrado de
    /// la entrada es incondicional: se ejecuta tanto si la inferencia o la
    /// escritura fallan como si no. Un fallo del borrado sustituye el
    /// resultado por `Failed(Cleanup, ..)`.
    pub async fn process_file(&self, name: &str) -> FileOutcome {
        info!("Procesando fichero: {}", name);
        let outcome = if is_supported_image(name) {
            self.infer_and_persist(name).await
        } else {
            warn!("{} no es una imagen, se descarta", name);
            FileOutcome::Discarded("extensión no soportada".to_string())
        };

        info!("Eliminando fichero: {}", name);
        if let Err(err) = self.inbox.remove(name).await {
            error!("No se pudo eliminar {}: {}", name, err);
            return FileOutcome::Failed(FailureKind::Cleanup, err.to_string());
        }
        outcome
    }

    async fn infer_and_persist(&self, name: &str) -> FileOutcome {
        let image = self.input_dir.join(name);

        let detections = match self.detector.detect(&image).await {
            Ok(detections) => detections,
            Err(err) => {
                error!("La inferencia falló para {}: {}", name, err);
                return FileOutcome::Failed(FailureKind::Inference, err.to_string());
            }
        };
        info!("{}: {}", name, summarize_detections(&detections));

        let annotated = match self
            .detector
            .render_annotated(&image, &detections, &self.output_dir)
            .await
        {
            Ok(path) => path,
            Err(err) => {
                error!("No se pudo guardar la imagen anotada de {}: {}", name, err);
                return FileOutcome::Failed(FailureKind::Artifact, err.to_string());
            }
        };

        let sidecar = match self
            .sink
            .write_detections(file_stem(name), &detections)
            .await
        {
            Ok(path) => path,
            Err(err) => {
                error!("No se pudo escribir el JSON de {}: {}", name, err);
                return FileOutcome::Failed(FailureKind::Artifact, err.to_string());
            }
        };

        FileOutcome::Processed(ArtifactPair { annotated, sidecar })
    }
}
