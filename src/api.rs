// Request Boundary
// Entry points the HTTP or desktop shell calls; errors surface as strings

use std::time::Instant;
use tracing::{info, warn};

use crate::models::{DetectRequest, DetectResponse, HealthResponse, TextStats};
use crate::services::config_store::AppConfig;
use crate::services::detection::{ClassifierAdapter, Detector, FileModelStore, ModelStore};
use crate::services::text_processor::{split_sentences, whitespace_word_count};

/// Requests shorter than this (after trimming, in chars) are rejected.
pub const MIN_TEXT_CHARS: usize = 20;

const TOO_SHORT_MESSAGE: &str = "Texto muito curto. Mínimo 20 caracteres.";

/// Process-wide state, built once at startup and shared read-only.
pub struct AppState {
    pub detector: Detector,
    pub config: AppConfig,
}

/// Load or train the classifier and assemble the detector.
pub fn bootstrap(config: AppConfig) -> Result<AppState, String> {
    let t0 = Instant::now();
    let store = FileModelStore::new(config.model.resolved_path());

    let adapter = ClassifierAdapter::load_or_train(
        config.model.backend,
        Some(&store as &dyn ModelStore),
        config.model.persist,
        config.model.retrain,
    );
    info!(
        backend = adapter.backend().as_str(),
        trained = adapter.is_trained(),
        model_path = %store.path().display(),
        elapsed_ms = t0.elapsed().as_millis(),
        "classifier.ready"
    );

    let detector = Detector::new(adapter, &config.annotation)
        .map_err(|e| format!("Failed to build detector: {}", e))?;
    Ok(AppState { detector, config })
}

pub fn detect_text(state: &AppState, request: DetectRequest) -> Result<DetectResponse, String> {
    let text = request.text.trim();
    let original_length = text.chars().count();
    if original_length < MIN_TEXT_CHARS {
        warn!(chars = original_length, min = MIN_TEXT_CHARS, "detect_text.rejected_short_input");
        return Err(TOO_SHORT_MESSAGE.to_string());
    }

    let request_id = uuid::Uuid::new_v4().to_string();
    let t0 = Instant::now();
    let result = state.detector.predict(text);

    info!(
        request_id = %request_id,
        chars = original_length,
        spans = result.stats.total_spans,
        ai_probability = result.ai_probability,
        elapsed_ms = t0.elapsed().as_millis(),
        "detect_text.completed"
    );

    let text_stats = TextStats {
        original_length,
        analyzed_length: result.analyzed_length,
        word_count: whitespace_word_count(text),
        sentences: split_sentences(text).len(),
    };

    Ok(DetectResponse {
        success: true,
        request_id,
        result,
        text_stats,
    })
}

pub fn health(state: &AppState) -> HealthResponse {
    let classifier = state.detector.classifier();
    HealthResponse {
        status: "online".to_string(),
        model: if classifier.is_trained() { "trained" } else { "heuristic" }.to_string(),
        backend: classifier.backend().as_str().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::config_store::ModelConfig;

    fn state_in(dir: &std::path::Path) -> AppState {
        let config = AppConfig {
            model: ModelConfig {
                path: Some(dir.join("model.json")),
                ..ModelConfig::default()
            },
            ..AppConfig::default()
        };
        bootstrap(config).unwrap()
    }

    #[test]
    fn test_rejects_short_text_after_trim() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(dir.path());
        let err = detect_text(
            &state,
            DetectRequest { text: "     curto     demais      ".to_string() },
        )
        .unwrap_err();
        assert!(err.contains("20"));
    }

    #[test]
    fn test_missing_text_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(dir.path());
        let request: DetectRequest = serde_json::from_str("{}").unwrap();
        assert!(detect_text(&state, request).is_err());
    }

    #[test]
    fn test_response_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(dir.path());
        let response = detect_text(
            &state,
            DetectRequest {
                text: "  Observa-se que o método funciona. Portanto, seguimos!  ".to_string(),
            },
        )
        .unwrap();

        assert!(response.success);
        assert_eq!(response.request_id.len(), 36);
        assert_eq!(response.text_stats.word_count, 7);
        assert_eq!(response.text_stats.sentences, 2);
        assert_eq!(response.text_stats.original_length, response.result.analyzed_length);
        assert_eq!(response.result.stats.total_spans, 2);

        let json = serde_json::to_value(&response).unwrap();
        assert!(json["text_stats"]["original_length"].is_number());
        assert!(json["result"]["detected_spans"].is_array());
    }

    #[test]
    fn test_health_reports_trained_model() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(dir.path());
        let health = health(&state);
        assert_eq!(health.status, "online");
        assert_eq!(health.model, "trained");
        assert_eq!(health.backend, "logistic");
        assert!(dir.path().join("model.json").exists());
    }
}
