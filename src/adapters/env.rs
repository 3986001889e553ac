use std::str::FromStr;
use std::time::Duration;

use crate::domain::{
    config::{WatchConfig, YoloParams},
    errors::{DomainError, DomainResult},
};

/// Lee la configuración del daemon desde el entorno del proceso.
/// No hay superficie CLI: el contrato es "arrancar y seguir corriendo".
pub fn load_config() -> DomainResult<WatchConfig> {
    config_from(|name| std::env::var(name).ok())
}

/// Construcción pura de la configuración a partir de un lookup de
/// variables, para poder probarla sin tocar el entorno del proceso.
pub fn config_from(lookup: impl Fn(&str) -> Option<String>) -> DomainResult<WatchConfig> {
    let input_dir = lookup("app_input_dir").unwrap_or_else(|| "./input".to_string());
    let output_dir = lookup("app_output_dir").unwrap_or_else(|| "./output".to_string());

    let sleep: f64 = parse_or(&lookup, "app_loop_sleep", 1.0)?;
    if sleep < 0.0 {
        return Err(DomainError::InvalidInput(format!(
            "app_loop_sleep no puede ser negativo: {sleep}"
        )));
    }

    let defaults = YoloParams::default();
    let params = YoloParams {
        input_size: parse_or(&lookup, "model_imgsz", defaults.input_size)?,
        conf_threshold: parse_or(&lookup, "model_conf_thres", defaults.conf_threshold)?,
        iou_threshold: parse_or(&lookup, "model_iou_thres", defaults.iou_threshold)?,
        max_detections: parse_or(&lookup, "model_max_det", defaults.max_detections)?,
    };

    Ok(WatchConfig {
        input_dir: input_dir.into(),
        output_dir: output_dir.into(),
        poll_interval: Duration::from_secs_f64(sleep),
        model_dir_or_repo: lookup("model_dir_or_repo")
            .unwrap_or_else(|| "ultralytics/yolov5".to_string()),
        model_name: lookup("model_name").unwrap_or_else(|| "yolov5s".to_string()),
        params,
    })
}

fn parse_or<T: FromStr>(
    lookup: impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> DomainResult<T> {
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| DomainError::InvalidInput(format!("{name} inválido: {raw}"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_match_the_documented_table() {
        let config = config_from(lookup(&[])).unwrap();
        assert_eq!(config.input_dir, std::path::PathBuf::from("./input"));
        assert_eq!(config.output_dir, std::path::PathBuf::from("./output"));
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert_eq!(config.model_dir_or_repo, "ultralytics/yolov5");
        assert_eq!(config.model_name, "yolov5s");
        assert_eq!(config.params.input_size, 640);
        assert_eq!(config.params.max_detections, 100);
    }

    #[test]
    fn every_variable_can_be_overridden() {
        let config = config_from(lookup(&[
            ("app_input_dir", "/datos/entrada"),
            ("app_output_dir", "/datos/salida"),
            ("app_loop_sleep", "2.5"),
            ("model_dir_or_repo", "/opt/modelos"),
            ("model_name", "yolov5m"),
            ("model_imgsz", "320"),
            ("model_conf_thres", "0.5"),
            ("model_iou_thres", "0.6"),
            ("model_max_det", "25"),
        ]))
        .unwrap();

        assert_eq!(config.input_dir, std::path::PathBuf::from("/datos/entrada"));
        assert_eq!(config.poll_interval, Duration::from_secs_f64(2.5));
        assert_eq!(config.model_dir_or_repo, "/opt/modelos");
        assert_eq!(config.model_name, "yolov5m");
        assert_eq!(config.params.input_size, 320);
        assert_eq!(config.params.conf_threshold, 0.5);
        assert_eq!(config.params.iou_threshold, 0.6);
        assert_eq!(config.params.max_detections, 25);
    }

    #[test]
    fn garbage_sleep_is_rejected_at_startup() {
        let err = config_from(lookup(&[("app_loop_sleep", "un rato")])).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn negative_sleep_is_rejected_at_startup() {
        let err = config_from(lookup(&[("app_loop_sleep", "-1")])).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn zero_sleep_is_allowed() {
        let config = config_from(lookup(&[("app_loop_sleep", "0")])).unwrap();
        assert_eq!(config.poll_interval, Duration::ZERO);
    }

    #[test]
    fn garbage_model_params_are_rejected() {
        let err = config_from(lookup(&[("model_imgsz", "grande")])).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }
}
