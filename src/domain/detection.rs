use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Una instancia detectada: caja en píxeles de la imagen original,
/// puntuación y clase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub score: f32,
    pub class_id: usize,
    pub label: String,
}

/// Resumen legible para los logs, del estilo "2 coche, 1 perro".
pub fn summarize_detections(detections: &[Detection]) -> String {
    if detections.is_empty() {
        return "sin detecciones".to_string();
    }
    let mut counts = HashMap::new();
    for det in detections {
        *counts.entry(&det.label).or_insert(0) += 1;
    }
    let mut parts: Vec<String> = counts
        .iter()
        .map(|(label, count)| format!("{} {}", count, label))
        .collect();
    parts.sort();
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn det(label: &str) -> Detection {
        Detection {
            x1: 0.0,
            y1: 0.0,
            x2: 10.0,
            y2: 10.0,
            score: 0.9,
            class_id: 0,
            label: label.to_string(),
        }
    }

    #[test]
    fn summary_counts_by_label() {
        let dets = vec![det("coche"), det("perro"), det("coche")];
        assert_eq!(summarize_detections(&dets), "1 perro, 2 coche");
    }

    #[test]
    fn summary_of_nothing() {
        assert_eq!(summarize_detections(&[]), "sin detecciones");
    }
}
