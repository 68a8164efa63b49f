// Classifier Adapter
// Wraps the trained statistical model and falls back to a fixed heuristic when untrained
//
// Two backends share one persisted form:
// - logistic: standardized logistic regression, deterministic full-batch gradient descent
// - gbdt: gradient-boosted trees from the `gbdt` crate (LogLikelyhood loss, labels ±1)

use gbdt::config::Config;
use gbdt::decision_tree::Data;
use gbdt::gradient_boost::GBDT;
use serde::{Deserialize, Serialize};
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{info, warn};

use super::features::extract_features;
use super::model_store::ModelStore;
use super::seed_corpus::{seed_samples, TrainingSample};
use crate::error::{DetectionError, Result};
use crate::models::{FeatureVector, FEATURE_NAMES, NUM_FEATURES};
use crate::services::config_store::ModelBackend;

const MODEL_FORMAT_VERSION: &str = "1";

// Untrained fallback
const HEURISTIC_FORMALITY_THRESHOLD: f64 = 0.1;
const HEURISTIC_FORMAL_AI_PROB: f64 = 0.3;
const HEURISTIC_DEFAULT_AI_PROB: f64 = 0.7;
const HEURISTIC_CONFIDENCE: f64 = 0.6;

// Logistic regression
const LOGISTIC_LEARNING_RATE: f64 = 0.5;
const LOGISTIC_L2: f64 = 0.01;
const LOGISTIC_EPOCHS: usize = 1000;
const MIN_SCALE: f64 = 1e-12;

// Gradient boosting
const GBDT_TREES: usize = 20;
const GBDT_MAX_DEPTH: u32 = 3;
const GBDT_SHRINKAGE: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub human: f64,
    pub ai: f64,
    pub confidence: f64,
}

impl ClassProbabilities {
    fn from_ai(ai: f64) -> Self {
        let human = 1.0 - ai;
        Self {
            human,
            ai,
            confidence: human.max(ai),
        }
    }
}

// ============ Logistic Regression ============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    mean: Vec<f64>,
    scale: Vec<f64>,
    weights: Vec<f64>,
    bias: f64,
}

#[inline]
fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

impl LogisticModel {
    pub fn fit(rows: &[[f64; NUM_FEATURES]], labels: &[u8]) -> Result<Self> {
        let n = rows.len() as f64;

        let mut mean = vec![0.0; NUM_FEATURES];
        for row in rows {
            for (m, v) in mean.iter_mut().zip(row) {
                *m += v;
            }
        }
        mean.iter_mut().for_each(|m| *m /= n);

        let mut scale = vec![0.0; NUM_FEATURES];
        for row in rows {
            for (j, s) in scale.iter_mut().enumerate() {
                *s += (row[j] - mean[j]).powi(2);
            }
        }
        for s in scale.iter_mut() {
            *s = (*s / n).sqrt();
            if *s <= MIN_SCALE {
                *s = 1.0;
            }
        }

        let standardized: Vec<Vec<f64>> = rows
            .iter()
            .map(|row| (0..NUM_FEATURES).map(|j| (row[j] - mean[j]) / scale[j]).collect())
            .collect();

        let mut weights = vec![0.0; NUM_FEATURES];
        let mut bias = 0.0;
        for _ in 0..LOGISTIC_EPOCHS {
            let mut grad_w = vec![0.0; NUM_FEATURES];
            let mut grad_b = 0.0;
            for (z, &label) in standardized.iter().zip(labels) {
                let logit = weights.iter().zip(z).map(|(w, x)| w * x).sum::<f64>() + bias;
                let err = sigmoid(logit) - label as f64;
                for (g, x) in grad_w.iter_mut().zip(z) {
                    *g += err * x;
                }
                grad_b += err;
            }
            for (w, g) in weights.iter_mut().zip(&grad_w) {
                *w -= LOGISTIC_LEARNING_RATE * (g / n + LOGISTIC_L2 * *w);
            }
            bias -= LOGISTIC_LEARNING_RATE * grad_b / n;
        }

        if !bias.is_finite() || weights.iter().any(|w| !w.is_finite()) {
            return Err(DetectionError::Training(
                "logistic regression diverged".to_string(),
            ));
        }

        Ok(Self { mean, scale, weights, bias })
    }

    /// Callers run `check_shape` first.
    fn predict_ai(&self, features: &[f64; NUM_FEATURES]) -> f64 {
        let logit = (0..NUM_FEATURES)
            .map(|j| self.weights[j] * (features[j] - self.mean[j]) / self.scale[j])
            .sum::<f64>()
            + self.bias;
        sigmoid(logit)
    }

    fn check_shape(&self) -> Result<()> {
        let params = [&self.mean, &self.scale, &self.weights];
        if !params.iter().all(|v| v.len() == NUM_FEATURES) {
            return Err(DetectionError::Prediction(
                "logistic parameters do not match the feature width".to_string(),
            ));
        }
        let finite = params.iter().all(|v| v.iter().all(|x| x.is_finite())) && self.bias.is_finite();
        if !finite || self.scale.iter().any(|&s| s == 0.0) {
            return Err(DetectionError::Prediction(
                "logistic parameters are non-finite or have a zero scale".to_string(),
            ));
        }
        Ok(())
    }
}

// ============ Gradient Boosting ============

#[derive(Serialize, Deserialize)]
pub struct GbdtModel {
    model: GBDT,
}

impl std::fmt::Debug for GbdtModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GbdtModel").finish_non_exhaustive()
    }
}

fn to_f32(features: &[f64; NUM_FEATURES]) -> Vec<f32> {
    features.iter().map(|&v| v as f32).collect()
}

impl GbdtModel {
    pub fn fit(rows: &[[f64; NUM_FEATURES]], labels: &[u8]) -> Result<Self> {
        let mut cfg = Config::new();
        cfg.set_feature_size(NUM_FEATURES);
        cfg.set_max_depth(GBDT_MAX_DEPTH);
        cfg.set_iterations(GBDT_TREES);
        cfg.set_shrinkage(GBDT_SHRINKAGE);
        cfg.set_loss("LogLikelyhood");
        cfg.set_debug(false);
        cfg.set_training_optimization_level(2);
        cfg.set_min_leaf_size(1);

        let mut training_data: Vec<Data> = rows
            .iter()
            .zip(labels)
            .map(|(row, &label)| {
                let target = if label == 1 { 1.0_f32 } else { -1.0_f32 };
                Data::new_training_data(to_f32(row), 1.0, target, None)
            })
            .collect();

        // The library panics on some degenerate inputs instead of returning errors.
        let model = catch_unwind(AssertUnwindSafe(|| {
            let mut model = GBDT::new(&cfg);
            model.fit(&mut training_data);
            model
        }))
        .map_err(|_| DetectionError::Training("gradient boosting fit panicked".to_string()))?;

        Ok(Self { model })
    }

    /// Trees read features by index; a hand-edited model can point past the
    /// vector and panic inside the library.
    pub fn predict_ai(&self, features: &[f64; NUM_FEATURES]) -> Result<f64> {
        let data = vec![Data::new_test_data(to_f32(features), None)];
        let preds = catch_unwind(AssertUnwindSafe(|| self.model.predict(&data)))
            .map_err(|_| DetectionError::Prediction("gradient boosting predict panicked".to_string()))?;
        Ok(preds.first().copied().unwrap_or(0.5) as f64)
    }
}

// ============ Persisted Model ============

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", content = "params", rename_all = "snake_case")]
pub enum TrainedModel {
    Logistic(LogisticModel),
    Gbdt(GbdtModel),
}

impl TrainedModel {
    pub fn backend(&self) -> ModelBackend {
        match self {
            Self::Logistic(_) => ModelBackend::Logistic,
            Self::Gbdt(_) => ModelBackend::Gbdt,
        }
    }

    pub fn predict_ai(&self, features: &[f64; NUM_FEATURES]) -> Result<f64> {
        let ai = match self {
            Self::Logistic(m) => {
                m.check_shape()?;
                m.predict_ai(features)
            }
            Self::Gbdt(m) => m.predict_ai(features)?,
        };
        if !ai.is_finite() {
            return Err(DetectionError::Prediction(format!(
                "{} model produced a non-finite probability",
                self.backend().as_str()
            )));
        }
        Ok(ai)
    }

    /// Structural check plus one prediction on the zero vector, so a
    /// restored model that cannot predict is rejected up front.
    pub fn validate(&self) -> Result<()> {
        self.predict_ai(&[0.0; NUM_FEATURES]).map(|_| ())
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedModel {
    pub version: String,
    pub trained_at: String,
    pub backend: ModelBackend,
    pub feature_names: Vec<String>,
    pub sample_count: usize,
    pub model: TrainedModel,
}

impl PersistedModel {
    fn matches_feature_layout(&self) -> bool {
        self.feature_names.len() == NUM_FEATURES
            && self.feature_names.iter().zip(FEATURE_NAMES).all(|(a, b)| a == b)
    }
}

// ============ Adapter ============

/// Owns the trained model. Constructed untrained, trained or loaded once at
/// startup, then used read-only.
#[derive(Debug)]
pub struct ClassifierAdapter {
    backend: ModelBackend,
    state: Option<PersistedModel>,
}

impl ClassifierAdapter {
    pub fn untrained(backend: ModelBackend) -> Self {
        Self { backend, state: None }
    }

    pub fn backend(&self) -> ModelBackend {
        self.backend
    }

    pub fn is_trained(&self) -> bool {
        self.state.is_some()
    }

    pub fn persisted(&self) -> Option<&PersistedModel> {
        self.state.as_ref()
    }

    /// Fit on labelled texts. On failure the adapter is left untrained.
    pub fn try_train(&mut self, samples: &[TrainingSample]) -> Result<()> {
        self.state = None;

        if samples.is_empty() {
            return Err(DetectionError::Training("no training samples provided".into()));
        }

        let mut rows = Vec::with_capacity(samples.len());
        let mut labels = Vec::with_capacity(samples.len());
        for (idx, sample) in samples.iter().enumerate() {
            let features = extract_features(&sample.text)
                .map_err(|e| DetectionError::Training(format!("sample {}: {}", idx, e)))?;
            rows.push(features.to_array());
            labels.push(sample.label.class());
        }

        let machine = labels.iter().filter(|&&l| l == 1).count();
        if machine == 0 || machine == labels.len() {
            return Err(DetectionError::Training(
                "training samples must include both classes".into(),
            ));
        }

        let model = match self.backend {
            ModelBackend::Logistic => TrainedModel::Logistic(LogisticModel::fit(&rows, &labels)?),
            ModelBackend::Gbdt => TrainedModel::Gbdt(GbdtModel::fit(&rows, &labels)?),
        };

        self.state = Some(PersistedModel {
            version: MODEL_FORMAT_VERSION.to_string(),
            trained_at: chrono::Utc::now().to_rfc3339(),
            backend: self.backend,
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            sample_count: samples.len(),
            model,
        });
        Ok(())
    }

    /// Fit on labelled texts; failures are logged and leave the heuristic in place.
    pub fn train(&mut self, samples: &[TrainingSample]) -> bool {
        match self.try_train(samples) {
            Ok(()) => {
                info!(
                    backend = self.backend.as_str(),
                    samples = samples.len(),
                    "classifier.trained"
                );
                true
            }
            Err(e) => {
                warn!(backend = self.backend.as_str(), error = %e, "classifier.training_failed");
                false
            }
        }
    }

    /// `(p_human, p_ai)` with confidence. Untrained adapters use the
    /// formality heuristic.
    pub fn predict_proba(&self, features: &FeatureVector) -> Result<ClassProbabilities> {
        let Some(state) = &self.state else {
            let ai = if features.formality_score > HEURISTIC_FORMALITY_THRESHOLD {
                HEURISTIC_FORMAL_AI_PROB
            } else {
                HEURISTIC_DEFAULT_AI_PROB
            };
            return Ok(ClassProbabilities {
                human: 1.0 - ai,
                ai,
                confidence: HEURISTIC_CONFIDENCE,
            });
        };

        let ai = state.model.predict_ai(&features.to_array())?;
        Ok(ClassProbabilities::from_ai(ai.clamp(0.0, 1.0)))
    }

    /// Restore persisted state. Returns `false` on a miss, a layout or
    /// backend mismatch, a model that fails validation, or a read error.
    pub fn load(&mut self, store: &dyn ModelStore) -> bool {
        match store.load() {
            Ok(Some(persisted)) => {
                if !persisted.matches_feature_layout() {
                    warn!(found = ?persisted.feature_names, "classifier.persisted_layout_mismatch");
                    return false;
                }
                if persisted.backend != self.backend || persisted.model.backend() != self.backend {
                    info!(
                        found = persisted.backend.as_str(),
                        wanted = self.backend.as_str(),
                        "classifier.persisted_backend_mismatch"
                    );
                    return false;
                }
                if let Err(e) = persisted.model.validate() {
                    warn!(error = %e, "classifier.persisted_model_invalid");
                    return false;
                }
                info!(
                    backend = self.backend.as_str(),
                    trained_at = %persisted.trained_at,
                    "classifier.loaded"
                );
                self.state = Some(persisted);
                true
            }
            Ok(None) => {
                info!("classifier.persisted_model_not_found");
                false
            }
            Err(e) => {
                warn!(error = %e, "classifier.load_failed");
                false
            }
        }
    }

    /// Adapter holding `model` as-is, skipping the checks `load` applies.
    #[cfg(test)]
    pub(crate) fn with_unchecked_model(model: PersistedModel) -> Self {
        Self {
            backend: model.backend,
            state: Some(model),
        }
    }

    pub fn save(&self, store: &dyn ModelStore) -> Result<()> {
        let state = self
            .state
            .as_ref()
            .ok_or_else(|| DetectionError::Persistence("no trained model to save".into()))?;
        store.save(state)
    }

    /// Startup path: load persisted state, otherwise train on the seed
    /// corpus and optionally persist the result.
    pub fn load_or_train(
        backend: ModelBackend,
        store: Option<&dyn ModelStore>,
        persist: bool,
        retrain: bool,
    ) -> Self {
        let mut adapter = Self::untrained(backend);

        if let Some(store) = store {
            if !retrain && adapter.load(store) {
                return adapter;
            }
        }

        if adapter.train(&seed_samples()) && persist {
            if let Some(store) = store {
                if let Err(e) = adapter.save(store) {
                    warn!(error = %e, "classifier.save_failed");
                }
            }
        }
        adapter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::detection::model_store::FileModelStore;
    use crate::services::detection::seed_corpus::Authorship;

    fn features_of(text: &str) -> FeatureVector {
        extract_features(text).unwrap()
    }

    #[test]
    fn test_untrained_heuristic_formal_text() {
        let adapter = ClassifierAdapter::untrained(ModelBackend::Logistic);
        let mut fv = FeatureVector::default();
        fv.formality_score = 0.2;
        let p = adapter.predict_proba(&fv).unwrap();
        assert_eq!(p.ai, 0.3);
        assert_eq!(p.confidence, 0.6);
        assert!((p.human - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_untrained_heuristic_default() {
        let adapter = ClassifierAdapter::untrained(ModelBackend::Gbdt);
        let mut fv = FeatureVector::default();
        fv.formality_score = 0.1;
        let p = adapter.predict_proba(&fv).unwrap();
        assert_eq!(p.ai, 0.7);
        assert_eq!(p.confidence, 0.6);
    }

    #[test]
    fn test_training_failure_leaves_adapter_untrained() {
        let mut adapter = ClassifierAdapter::untrained(ModelBackend::Logistic);
        assert!(!adapter.train(&[]));
        assert!(!adapter.is_trained());

        let one_class = vec![
            TrainingSample::new("Texto qualquer de exemplo.", Authorship::Human),
            TrainingSample::new("Outro texto qualquer aqui.", Authorship::Human),
        ];
        assert!(adapter.try_train(&one_class).is_err());
        assert!(!adapter.is_trained());
    }

    #[test]
    fn test_failed_retrain_drops_previous_model() {
        let mut adapter = ClassifierAdapter::untrained(ModelBackend::Logistic);
        assert!(adapter.train(&seed_samples()));
        assert!(!adapter.train(&[]));
        assert!(!adapter.is_trained());
    }

    #[test]
    fn test_logistic_seed_model_separates_scenarios() {
        let mut adapter = ClassifierAdapter::untrained(ModelBackend::Logistic);
        assert!(adapter.train(&seed_samples()));

        let formal = adapter
            .predict_proba(&features_of("É importante destacar que o processo é extremamente eficaz."))
            .unwrap();
        assert!(formal.ai > formal.human, "got {:?}", formal);

        let seed_human = adapter
            .predict_proba(&features_of("Meu time ganhou o jogo de virada. Foi emocionante demais!"))
            .unwrap();
        assert!(seed_human.ai < 0.5, "got {:?}", seed_human);
    }

    #[test]
    fn test_probabilities_are_complementary() {
        let mut adapter = ClassifierAdapter::untrained(ModelBackend::Logistic);
        adapter.train(&seed_samples());
        let p = adapter.predict_proba(&features_of("Um texto neutro, com algumas palavras.")).unwrap();
        assert!((0.0..=1.0).contains(&p.ai));
        assert_eq!(p.human, 1.0 - p.ai);
        assert_eq!(p.confidence, p.ai.max(p.human));
    }

    #[test]
    fn test_logistic_training_is_reproducible() {
        let rows: Vec<_> = seed_samples()
            .iter()
            .map(|s| features_of(&s.text).to_array())
            .collect();
        let labels: Vec<_> = seed_samples().iter().map(|s| s.label.class()).collect();
        let a = LogisticModel::fit(&rows, &labels).unwrap();
        let b = LogisticModel::fit(&rows, &labels).unwrap();
        assert_eq!(a.weights, b.weights);
        assert_eq!(a.bias, b.bias);
    }

    #[test]
    fn test_gbdt_backend_trains_and_predicts() {
        let mut adapter = ClassifierAdapter::untrained(ModelBackend::Gbdt);
        assert!(adapter.train(&seed_samples()));
        let p = adapter
            .predict_proba(&features_of("Conclui-se que a proposta apresenta viabilidade técnica."))
            .unwrap();
        assert!((0.0..=1.0).contains(&p.ai), "got {:?}", p);
        assert_eq!(p.human, 1.0 - p.ai);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileModelStore::new(dir.path().join("model.json"));

        let mut trained = ClassifierAdapter::untrained(ModelBackend::Logistic);
        trained.train(&seed_samples());
        trained.save(&store).unwrap();

        let mut restored = ClassifierAdapter::untrained(ModelBackend::Logistic);
        assert!(restored.load(&store));

        let fv = features_of("Observa-se que a implementação resulta em benefícios.");
        let a = trained.predict_proba(&fv).unwrap();
        let b = restored.predict_proba(&fv).unwrap();
        assert!((a.ai - b.ai).abs() < 1e-12, "{} vs {}", a.ai, b.ai);
    }

    #[test]
    fn test_gbdt_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileModelStore::new(dir.path().join("model.json"));

        let mut trained = ClassifierAdapter::untrained(ModelBackend::Gbdt);
        assert!(trained.train(&seed_samples()));
        trained.save(&store).unwrap();

        let mut restored = ClassifierAdapter::untrained(ModelBackend::Gbdt);
        assert!(restored.load(&store));

        let fv = features_of("Fui na padaria e comprei pão. Que chato!");
        let a = trained.predict_proba(&fv).unwrap();
        let b = restored.predict_proba(&fv).unwrap();
        assert!((a.ai - b.ai).abs() < 1e-6);
    }

    #[test]
    fn test_load_rejects_other_backend() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileModelStore::new(dir.path().join("model.json"));

        let mut trained = ClassifierAdapter::untrained(ModelBackend::Logistic);
        trained.train(&seed_samples());
        trained.save(&store).unwrap();

        let mut other = ClassifierAdapter::untrained(ModelBackend::Gbdt);
        assert!(!other.load(&store));
        assert!(!other.is_trained());
    }

    fn rewrite_saved(path: &std::path::Path, edit: impl FnOnce(&mut serde_json::Value)) {
        let mut raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        edit(&mut raw);
        std::fs::write(path, serde_json::to_string(&raw).unwrap()).unwrap();
    }

    #[test]
    fn test_load_rejects_wrong_width_weights() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let store = FileModelStore::new(path.clone());

        let mut trained = ClassifierAdapter::untrained(ModelBackend::Logistic);
        assert!(trained.train(&seed_samples()));
        trained.save(&store).unwrap();
        rewrite_saved(&path, |raw| {
            raw["model"]["params"]["weights"] = serde_json::json!([0.1, 0.2, 0.3]);
        });

        let mut restored = ClassifierAdapter::untrained(ModelBackend::Logistic);
        assert!(!restored.load(&store));
        assert!(!restored.is_trained());

        // startup retrains instead of keeping the broken model
        let adapter = ClassifierAdapter::load_or_train(ModelBackend::Logistic, Some(&store), true, false);
        assert!(adapter.is_trained());
        let p = adapter
            .predict_proba(&features_of("É importante destacar que o processo é extremamente eficaz."))
            .unwrap();
        assert!(p.ai > p.human, "got {:?}", p);

        let mut reloaded = ClassifierAdapter::untrained(ModelBackend::Logistic);
        assert!(reloaded.load(&store));
    }

    #[test]
    fn test_load_rejects_zero_scale() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let store = FileModelStore::new(path.clone());

        let mut trained = ClassifierAdapter::untrained(ModelBackend::Logistic);
        trained.train(&seed_samples());
        trained.save(&store).unwrap();
        rewrite_saved(&path, |raw| {
            raw["model"]["params"]["scale"][0] = serde_json::json!(0.0);
        });

        let mut restored = ClassifierAdapter::untrained(ModelBackend::Logistic);
        assert!(!restored.load(&store));
    }

    #[test]
    fn test_load_rejects_other_feature_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let store = FileModelStore::new(path.clone());

        let mut trained = ClassifierAdapter::untrained(ModelBackend::Logistic);
        trained.train(&seed_samples());
        trained.save(&store).unwrap();
        rewrite_saved(&path, |raw| {
            raw["featureNames"][7] = serde_json::json!("formalidade");
        });

        let mut restored = ClassifierAdapter::untrained(ModelBackend::Logistic);
        assert!(!restored.load(&store));
        assert!(!restored.is_trained());
    }

    #[test]
    fn test_wrong_width_model_fails_prediction() {
        let params = serde_json::json!({"mean": [0.0], "scale": [1.0], "weights": [0.1], "bias": 0.0});
        let model = TrainedModel::Logistic(serde_json::from_value(params).unwrap());
        assert!(model.validate().is_err());
        assert!(matches!(
            model.predict_ai(&[1.0; NUM_FEATURES]),
            Err(DetectionError::Prediction(_))
        ));
    }

    #[test]
    fn test_load_miss_returns_false() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileModelStore::new(dir.path().join("absent.json"));
        let mut adapter = ClassifierAdapter::untrained(ModelBackend::Logistic);
        assert!(!adapter.load(&store));
    }

    #[test]
    fn test_save_untrained_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileModelStore::new(dir.path().join("model.json"));
        let adapter = ClassifierAdapter::untrained(ModelBackend::Logistic);
        assert!(matches!(adapter.save(&store), Err(DetectionError::Persistence(_))));
    }

    #[test]
    fn test_load_or_train_persists_then_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let store = FileModelStore::new(path.clone());

        let first = ClassifierAdapter::load_or_train(ModelBackend::Logistic, Some(&store), true, false);
        assert!(first.is_trained());
        assert!(path.exists());

        let second = ClassifierAdapter::load_or_train(ModelBackend::Logistic, Some(&store), true, false);
        assert_eq!(
            second.persisted().unwrap().trained_at,
            first.persisted().unwrap().trained_at
        );
    }

    #[test]
    fn test_load_or_train_without_persist_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let store = FileModelStore::new(path.clone());

        let adapter = ClassifierAdapter::load_or_train(ModelBackend::Logistic, Some(&store), false, false);
        assert!(adapter.is_trained());
        assert!(!path.exists());
    }
}
