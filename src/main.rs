mod domain;
mod application;
mod adapters;

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::adapters::{
    env::load_config,
    fs::{inbox::FsInbox, sink::FsArtifactSink},
    onnx::{detector::OnnxDetector, model_catalog::OnnxModelCatalog},
};
use crate::application::services::WatcherService;
use crate::domain::config::InferenceConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Inicializar logs (RUST_LOG=info por defecto)
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    // 2. Configuración desde el entorno
    info!("🔧 Leyendo configuración del entorno...");
    let config = load_config().context("configuración de entorno inválida")?;
    info!("Directorio de entrada:\t{}", config.input_dir.display());
    info!("Directorio de salida:\t{}", config.output_dir.display());
    info!("Pausa entre ticks:\t{:?}", config.poll_interval);
    info!("Directorio del modelo:\t{}", config.model_dir_or_repo);
    info!("Nombre del modelo:\t{}", config.model_name);

    std::fs::create_dir_all(&config.input_dir)
        .with_context(|| format!("no se pudo crear {}", config.input_dir.display()))?;
    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("no se pudo crear {}", config.output_dir.display()))?;

    // 3. Cargar el modelo. Esta es la puerta de arranque: si falla, el
    // proceso termina con código distinto de cero sin sondear nada.
    info!("📦 Cargando modelo...");
    let catalog = OnnxModelCatalog::new();
    let model = catalog
        .resolve(&config.model_dir_or_repo, &config.model_name)
        .context("no se pudo resolver el modelo")?;
    let detector = Arc::new(
        OnnxDetector::load(InferenceConfig {
            model,
            params: config.params.clone(),
        })
        .context("no se pudo cargar el modelo ONNX")?,
    );

    // 4. Adaptadores de ficheros y servicio
    let inbox = Arc::new(FsInbox::new(&config.input_dir));
    let sink = Arc::new(FsArtifactSink::new(&config.output_dir));
    let service = WatcherService::new(detector, inbox, sink, &config);

    // 5. Bucle principal hasta la terminación del proceso
    info!("🚀 Watcher iniciado, observando {}", config.input_dir.display());
    tokio::select! {
        _ = service.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("👋 Saliendo de la aplicación");
        }
    }

    Ok(())
}
