use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Identificador de un modelo ya resuelto a un fichero ONNX local.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelId {
    pub name: String,      // logical name, e.g. "yolov5s"
    pub onnx_path: String, // filesystem path
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YoloParams {
    pub input_size: u32,       // 640 typical
    pub conf_threshold: f32,   // 0..1
    pub iou_threshold: f32,    // 0..1
    pub max_detections: usize, // e.g. 300
}

impl Default for YoloParams {
    fn default() -> Self {
        Self {
            input_size: 640,
            conf_threshold: 0.25,
            iou_threshold: 0.45,
            max_detections: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    pub model: ModelId,
    pub params: YoloParams,
}

/// Configuración inmutable del watcher, resuelta una única vez al arrancar.
/// El modelo se expresa aquí sin resolver (directorio + nombre); el catálogo
/// lo convierte en un [`ModelId`] durante el arranque.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub poll_interval: Duration,
    pub model_dir_or_repo: String,
    pub model_name: String,
    pub params: YoloParams,
}
