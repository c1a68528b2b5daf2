//! # Model Artifact
//!
//! The file-backed strength regressor.
//!
//! The artifact is a JSON document holding either a linear model or a tree
//! ensemble in the scikit-learn node layout (random forest averages its
//! trees, gradient boosting sums them). It is loaded once, checked against
//! the feature contract, and compiled into an immutable [`LoadedModel`]
//! that is safe to share across threads.
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "name": "rf_best",
//!   "feature_names": ["Cement", "BlastFurnaceSlag", "...", "Age_log"],
//!   "model": { "type": "linear", "intercept": -23.3, "coefficients": [0.12, "..."] }
//! }
//! ```

use crate::error::{ModelLoadError, PredictionError};
use crate::features::{FEATURE_COUNT, FEATURE_NAMES, FeatureRecord};
use crate::predictor::Predictor;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

/// Artifact format understood by this crate.
pub const MODEL_FORMAT_VERSION: u32 = 1;

// =============================================================================
// ARTIFACT SCHEMA
// =============================================================================

/// The on-disk model document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Must equal [`FEATURE_NAMES`], in order.
    pub feature_names: Vec<String>,
    pub model: ModelSpec,
}

/// The regressor itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelSpec {
    /// `intercept + Σ coefficients[i] * x[i]`
    Linear {
        intercept: f64,
        coefficients: Vec<f64>,
    },
    /// Decision-tree ensemble.
    TreeEnsemble {
        #[serde(default)]
        aggregation: Aggregation,
        #[serde(default)]
        base_score: f64,
        #[serde(default = "unit_learning_rate")]
        learning_rate: f64,
        trees: Vec<Tree>,
    },
}

fn unit_learning_rate() -> f64 {
    1.0
}

/// How tree outputs are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Average of tree outputs (random forest).
    #[default]
    Mean,
    /// `base_score + learning_rate * Σ tree` (gradient boosting).
    Sum,
}

/// One decision tree; node `0` is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

/// A tree node. `x[feature] <= threshold` descends to `left`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

impl ModelArtifact {
    /// A linear artifact over the standard feature names.
    #[must_use]
    pub fn linear(name: impl Into<String>, intercept: f64, coefficients: Vec<f64>) -> Self {
        Self::with_spec(
            name,
            ModelSpec::Linear {
                intercept,
                coefficients,
            },
        )
    }

    /// An artifact over the standard feature names with the given regressor.
    #[must_use]
    pub fn with_spec(name: impl Into<String>, model: ModelSpec) -> Self {
        Self {
            format_version: MODEL_FORMAT_VERSION,
            name: name.into(),
            description: None,
            feature_names: FEATURE_NAMES.iter().map(|n| (*n).to_string()).collect(),
            model,
        }
    }

    /// Read, parse and compile an artifact file.
    ///
    /// The file is read in one go; no handle outlives this call.
    pub fn load(path: impl AsRef<Path>) -> Result<LoadedModel, ModelLoadError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ModelLoadError::NotFound {
                path: path.to_path_buf(),
            },
            _ => ModelLoadError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let artifact: ModelArtifact =
            serde_json::from_slice(&bytes).map_err(|source| ModelLoadError::Corrupt {
                path: path.to_path_buf(),
                source,
            })?;

        let mut model = artifact.compile()?;
        model.source = Some(path.to_path_buf());
        #[cfg(feature = "crypto-hash")]
        {
            model.digest = Some(blake3::hash(&bytes).to_hex().to_string());
        }
        Ok(model)
    }

    /// Check the artifact against the feature contract and build the evaluator.
    pub fn compile(self) -> Result<LoadedModel, ModelLoadError> {
        if self.format_version != MODEL_FORMAT_VERSION {
            return Err(ModelLoadError::UnsupportedVersion {
                found: self.format_version,
                expected: MODEL_FORMAT_VERSION,
            });
        }
        check_feature_names(&self.feature_names)?;

        let (kind, evaluator) = match self.model {
            ModelSpec::Linear {
                intercept,
                coefficients,
            } => {
                let coefficients: [f64; FEATURE_COUNT] =
                    coefficients.try_into().map_err(|c: Vec<f64>| {
                        ModelLoadError::Schema(format!(
                            "expected {} coefficients, found {}",
                            FEATURE_COUNT,
                            c.len()
                        ))
                    })?;
                if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
                    return Err(ModelLoadError::Schema(
                        "linear model contains a non-finite parameter".to_string(),
                    ));
                }
                (
                    ModelKind::Linear,
                    Evaluator::Linear {
                        intercept,
                        coefficients,
                    },
                )
            }
            ModelSpec::TreeEnsemble {
                aggregation,
                base_score,
                learning_rate,
                trees,
            } => {
                if trees.is_empty() {
                    return Err(ModelLoadError::Schema("tree ensemble has no trees".to_string()));
                }
                if !base_score.is_finite() || !learning_rate.is_finite() {
                    return Err(ModelLoadError::Schema(
                        "tree ensemble contains a non-finite parameter".to_string(),
                    ));
                }
                for (index, tree) in trees.iter().enumerate() {
                    check_tree(index, tree)?;
                }
                let kind = match aggregation {
                    Aggregation::Mean => ModelKind::RandomForest,
                    Aggregation::Sum => ModelKind::GradientBoosting,
                };
                (
                    kind,
                    Evaluator::Ensemble {
                        aggregation,
                        base_score,
                        learning_rate,
                        trees: trees.into_iter().map(|t| t.nodes).collect(),
                    },
                )
            }
        };

        Ok(LoadedModel {
            name: self.name,
            kind,
            evaluator,
            source: None,
            digest: None,
        })
    }
}

fn check_feature_names(names: &[String]) -> Result<(), ModelLoadError> {
    let matches = names.len() == FEATURE_COUNT
        && names.iter().zip(FEATURE_NAMES).all(|(a, b)| a == b);
    if matches {
        Ok(())
    } else {
        Err(ModelLoadError::Schema(format!(
            "feature names {:?} do not match expected {:?}",
            names, FEATURE_NAMES
        )))
    }
}

/// Every child must point forward and stay in range, so evaluation always
/// reaches a leaf.
fn check_tree(index: usize, tree: &Tree) -> Result<(), ModelLoadError> {
    let schema = |msg: String| ModelLoadError::Schema(format!("tree {index}: {msg}"));

    if tree.nodes.is_empty() {
        return Err(schema("no nodes".to_string()));
    }
    let len = tree.nodes.len();
    for (id, node) in tree.nodes.iter().enumerate() {
        match *node {
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if feature >= FEATURE_COUNT {
                    return Err(schema(format!(
                        "node {id} splits on feature {feature} (only {FEATURE_COUNT} features)"
                    )));
                }
                if !threshold.is_finite() {
                    return Err(schema(format!("node {id} has a non-finite threshold")));
                }
                for child in [left, right] {
                    if child <= id || child >= len {
                        return Err(schema(format!(
                            "node {id} has invalid child {child} (must be in {}..{len})",
                            id + 1
                        )));
                    }
                }
            }
            TreeNode::Leaf { value } => {
                if !value.is_finite() {
                    return Err(schema(format!("node {id} has a non-finite leaf value")));
                }
            }
        }
    }
    Ok(())
}

// =============================================================================
// LOADED MODEL
// =============================================================================

/// Family of a loaded regressor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Linear,
    RandomForest,
    GradientBoosting,
}

#[derive(Debug, Clone)]
enum Evaluator {
    Linear {
        intercept: f64,
        coefficients: [f64; FEATURE_COUNT],
    },
    Ensemble {
        aggregation: Aggregation,
        base_score: f64,
        learning_rate: f64,
        trees: Vec<Vec<TreeNode>>,
    },
}

/// A validated, immutable regressor.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    name: String,
    kind: ModelKind,
    evaluator: Evaluator,
    source: Option<PathBuf>,
    digest: Option<String>,
}

/// Serializable summary of a loaded model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub kind: ModelKind,
    pub trees: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

impl LoadedModel {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    /// Number of trees (0 for linear models).
    #[must_use]
    pub fn tree_count(&self) -> usize {
        match &self.evaluator {
            Evaluator::Linear { .. } => 0,
            Evaluator::Ensemble { trees, .. } => trees.len(),
        }
    }

    /// Path the model was loaded from, if any.
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// BLAKE3 hex digest of the artifact bytes (`crypto-hash` feature).
    #[must_use]
    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }

    #[must_use]
    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            name: self.name.clone(),
            kind: self.kind,
            trees: self.tree_count(),
            source: self.source.clone(),
            digest: self.digest.clone(),
        }
    }
}

fn eval_tree(nodes: &[TreeNode], x: &[f64; FEATURE_COUNT]) -> Result<f64, PredictionError> {
    let mut id = 0;
    loop {
        match nodes.get(id) {
            Some(TreeNode::Leaf { value }) => return Ok(*value),
            Some(TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            }) => {
                let value = x.get(*feature).copied().ok_or_else(|| {
                    PredictionError::Predictor(format!("feature index {feature} out of range"))
                })?;
                id = if value <= *threshold { *left } else { *right };
            }
            None => {
                return Err(PredictionError::Predictor(format!(
                    "tree node {id} does not exist"
                )));
            }
        }
    }
}

impl Predictor for LoadedModel {
    fn predict(&self, record: &FeatureRecord) -> Result<f64, PredictionError> {
        let x = record.to_vector();
        match &self.evaluator {
            Evaluator::Linear {
                intercept,
                coefficients,
            } => Ok(intercept + coefficients.iter().zip(x).map(|(c, v)| c * v).sum::<f64>()),
            Evaluator::Ensemble {
                aggregation,
                base_score,
                learning_rate,
                trees,
            } => {
                let mut total = 0.0;
                for tree in trees {
                    total += eval_tree(tree, &x)?;
                }
                Ok(match aggregation {
                    Aggregation::Mean => total / trees.len() as f64,
                    Aggregation::Sum => base_score + learning_rate * total,
                })
            }
        }
    }
}

// =============================================================================
// MODEL SLOT
// =============================================================================

/// The process-wide predictor, or the reason it is missing.
///
/// Loading never aborts the process: a failed load is kept and every
/// prediction through the slot reports it as [`PredictionError::Unavailable`].
#[derive(Debug)]
pub enum ModelSlot {
    Ready(LoadedModel),
    Unavailable(ModelLoadError),
}

impl ModelSlot {
    /// Load the artifact at `path`, keeping the error if it fails.
    pub fn load(path: impl AsRef<Path>) -> Self {
        ModelArtifact::load(path).into()
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, ModelSlot::Ready(_))
    }

    #[must_use]
    pub fn model(&self) -> Option<&LoadedModel> {
        match self {
            ModelSlot::Ready(model) => Some(model),
            ModelSlot::Unavailable(_) => None,
        }
    }

    #[must_use]
    pub fn load_error(&self) -> Option<&ModelLoadError> {
        match self {
            ModelSlot::Ready(_) => None,
            ModelSlot::Unavailable(err) => Some(err),
        }
    }
}

impl From<Result<LoadedModel, ModelLoadError>> for ModelSlot {
    fn from(result: Result<LoadedModel, ModelLoadError>) -> Self {
        match result {
            Ok(model) => ModelSlot::Ready(model),
            Err(err) => ModelSlot::Unavailable(err),
        }
    }
}

impl Predictor for ModelSlot {
    fn predict(&self, record: &FeatureRecord) -> Result<f64, PredictionError> {
        match self {
            ModelSlot::Ready(model) => model.predict(record),
            ModelSlot::Unavailable(err) => Err(PredictionError::Unavailable(err.to_string())),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::derive;
    use crate::input::RawMixInput;
    use std::io::Write;

    fn linear_coefficients() -> Vec<f64> {
        // Only cement and age contribute.
        let mut c = vec![0.0; FEATURE_COUNT];
        c[0] = 0.1;
        c[7] = 0.5;
        c
    }

    /// Two stumps on Age (index 7): young mixes 20 / 30, mature 40 / 50.
    fn two_stumps() -> Vec<Tree> {
        let stump = |low: f64, high: f64| Tree {
            nodes: vec![
                TreeNode::Split {
                    feature: 7,
                    threshold: 14.0,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: low },
                TreeNode::Leaf { value: high },
            ],
        };
        vec![stump(20.0, 40.0), stump(30.0, 50.0)]
    }

    fn ensemble(aggregation: Aggregation, base_score: f64, learning_rate: f64) -> ModelArtifact {
        ModelArtifact::with_spec(
            "stumps",
            ModelSpec::TreeEnsemble {
                aggregation,
                base_score,
                learning_rate,
                trees: two_stumps(),
            },
        )
    }

    fn mix_at_age(age: u32) -> FeatureRecord {
        derive(&RawMixInput::new(300.0, 0.0, 0.0, 180.0, 10.0, 970.0, 780.0, age))
    }

    fn schema_error(artifact: ModelArtifact) -> bool {
        matches!(artifact.compile(), Err(ModelLoadError::Schema(_)))
    }

    #[test]
    fn linear_model_predicts_dot_product() {
        let model = ModelArtifact::linear("lin", 2.0, linear_coefficients()).compile();
        let model = model.ok();
        let value = model.as_ref().map(|m| m.predict(&mix_at_age(28)));
        // 2 + 0.1 * 300 + 0.5 * 28
        assert_eq!(value, Some(Ok(46.0)));
        assert_eq!(model.map(|m| m.kind()), Some(ModelKind::Linear));
    }

    #[test]
    fn random_forest_averages_trees() {
        let model = ensemble(Aggregation::Mean, 0.0, 1.0).compile().ok();
        let young = model.as_ref().map(|m| m.predict(&mix_at_age(7)));
        let mature = model.as_ref().map(|m| m.predict(&mix_at_age(28)));

        assert_eq!(young, Some(Ok(25.0)));
        assert_eq!(mature, Some(Ok(45.0)));
        assert_eq!(model.as_ref().map(LoadedModel::kind), Some(ModelKind::RandomForest));
        assert_eq!(model.map(|m| m.tree_count()), Some(2));
    }

    #[test]
    fn threshold_is_inclusive_on_the_left() {
        let model = ensemble(Aggregation::Mean, 0.0, 1.0).compile().ok();
        let at_threshold = model.map(|m| m.predict(&mix_at_age(14)));
        assert_eq!(at_threshold, Some(Ok(25.0)));
    }

    #[test]
    fn gradient_boosting_sums_scaled_trees() {
        let model = ensemble(Aggregation::Sum, 5.0, 0.5).compile().ok();
        // 5 + 0.5 * (40 + 50)
        let value = model.as_ref().map(|m| m.predict(&mix_at_age(90)));
        assert_eq!(value, Some(Ok(50.0)));
        assert_eq!(model.map(|m| m.kind()), Some(ModelKind::GradientBoosting));
    }

    #[test]
    fn rejects_wrong_feature_order() {
        let mut artifact = ModelArtifact::linear("lin", 0.0, linear_coefficients());
        artifact.feature_names.swap(0, 1);
        assert!(schema_error(artifact));
    }

    #[test]
    fn rejects_wrong_coefficient_count() {
        assert!(schema_error(ModelArtifact::linear("lin", 0.0, vec![1.0; 8])));
    }

    #[test]
    fn rejects_non_finite_parameters() {
        let mut coefficients = linear_coefficients();
        coefficients[3] = f64::NAN;
        assert!(schema_error(ModelArtifact::linear("lin", 0.0, coefficients)));
    }

    #[test]
    fn rejects_backward_and_dangling_children() {
        let backward = ModelArtifact::with_spec(
            "loop",
            ModelSpec::TreeEnsemble {
                aggregation: Aggregation::Mean,
                base_score: 0.0,
                learning_rate: 1.0,
                trees: vec![Tree {
                    nodes: vec![
                        TreeNode::Split {
                            feature: 0,
                            threshold: 1.0,
                            left: 0,
                            right: 1,
                        },
                        TreeNode::Leaf { value: 1.0 },
                    ],
                }],
            },
        );
        assert!(schema_error(backward));

        let dangling = ModelArtifact::with_spec(
            "dangling",
            ModelSpec::TreeEnsemble {
                aggregation: Aggregation::Mean,
                base_score: 0.0,
                learning_rate: 1.0,
                trees: vec![Tree {
                    nodes: vec![TreeNode::Split {
                        feature: 0,
                        threshold: 1.0,
                        left: 1,
                        right: 9,
                    }],
                }],
            },
        );
        assert!(schema_error(dangling));
    }

    #[test]
    fn rejects_out_of_range_split_feature() {
        let artifact = ModelArtifact::with_spec(
            "wide",
            ModelSpec::TreeEnsemble {
                aggregation: Aggregation::Mean,
                base_score: 0.0,
                learning_rate: 1.0,
                trees: vec![Tree {
                    nodes: vec![
                        TreeNode::Split {
                            feature: FEATURE_COUNT,
                            threshold: 1.0,
                            left: 1,
                            right: 2,
                        },
                        TreeNode::Leaf { value: 1.0 },
                        TreeNode::Leaf { value: 2.0 },
                    ],
                }],
            },
        );
        assert!(schema_error(artifact));
    }

    #[test]
    fn rejects_empty_ensemble() {
        let artifact = ModelArtifact::with_spec(
            "empty",
            ModelSpec::TreeEnsemble {
                aggregation: Aggregation::Sum,
                base_score: 0.0,
                learning_rate: 1.0,
                trees: vec![],
            },
        );
        assert!(schema_error(artifact));
    }

    #[test]
    fn rejects_unsupported_version() {
        let mut artifact = ModelArtifact::linear("lin", 0.0, linear_coefficients());
        artifact.format_version = 2;
        assert!(matches!(
            artifact.compile(),
            Err(ModelLoadError::UnsupportedVersion { found: 2, .. })
        ));
    }

    #[test]
    fn json_tree_nodes_parse_untagged() {
        let json = r#"{
            "format_version": 1,
            "name": "json-forest",
            "feature_names": ["Cement","BlastFurnaceSlag","FlyAsh","Water","Superplasticizer",
                "CoarseAggregate","FineAggregate","Age","Water_Cement","Coarse_Fine",
                "Age_Cement","Age_log"],
            "model": {
                "type": "tree_ensemble",
                "trees": [{ "nodes": [
                    { "feature": 8, "threshold": 0.5, "left": 1, "right": 2 },
                    { "value": 55.0 },
                    { "value": 25.0 }
                ]}]
            }
        }"#;
        let model = serde_json::from_str::<ModelArtifact>(json)
            .ok()
            .and_then(|a| a.compile().ok());
        // w/c 0.6 > 0.5 goes right
        let value = model.as_ref().map(|m| m.predict(&mix_at_age(28)));
        assert_eq!(value, Some(Ok(25.0)));
        assert_eq!(model.map(|m| m.kind()), Some(ModelKind::RandomForest));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().ok();
        let path = dir
            .as_ref()
            .map(|d| d.path().join("absent.json"))
            .unwrap_or_default();
        assert!(matches!(
            ModelArtifact::load(&path),
            Err(ModelLoadError::NotFound { .. })
        ));
    }

    #[test]
    fn load_reports_unreadable_path_as_io() {
        // A regular file used as a parent directory: the path does not
        // exist, but the failure is not "not found".
        let file = tempfile::NamedTempFile::new().ok();
        let loaded = file.map(|f| ModelArtifact::load(f.path().join("model.json")));
        assert!(matches!(loaded, Some(Err(ModelLoadError::Io { .. }))));
    }

    #[test]
    fn load_reports_directory_as_io() {
        let dir = tempfile::tempdir().ok();
        let loaded = dir.map(|d| ModelArtifact::load(d.path()));
        assert!(matches!(loaded, Some(Err(ModelLoadError::Io { .. }))));
    }

    #[cfg(feature = "crypto-hash")]
    #[test]
    fn load_records_blake3_digest() {
        let file = tempfile::NamedTempFile::new().ok();
        let loaded = file.map(|mut f| {
            let artifact = ModelArtifact::linear("hashed", 0.0, linear_coefficients());
            let bytes = serde_json::to_vec(&artifact).unwrap_or_default();
            let _ = f.write_all(&bytes);
            let _ = f.flush();
            (blake3::hash(&bytes).to_hex().to_string(), ModelArtifact::load(f.path()))
        });
        let Some((expected, Ok(model))) = loaded else {
            unreachable!("artifact should load");
        };

        let digest = model.digest().unwrap_or_default();
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(digest, expected);
        assert_eq!(model.info().digest.as_deref(), Some(expected.as_str()));
    }

    #[cfg(not(feature = "crypto-hash"))]
    #[test]
    fn load_without_crypto_hash_has_no_digest() {
        let model = ModelArtifact::linear("plain", 0.0, linear_coefficients()).compile();
        assert_eq!(model.ok().and_then(|m| m.info().digest), None);
    }

    #[test]
    fn load_reports_corrupt_file() {
        let file = tempfile::NamedTempFile::new().ok();
        let loaded = file.map(|mut f| {
            let _ = f.write_all(b"{ not json");
            ModelArtifact::load(f.path())
        });
        assert!(matches!(loaded, Some(Err(ModelLoadError::Corrupt { .. }))));
    }

    #[test]
    fn load_records_source_path() {
        let file = tempfile::NamedTempFile::new().ok();
        let loaded = file.map(|mut f| {
            let artifact = ModelArtifact::linear("disk", 0.0, linear_coefficients());
            let _ = serde_json::to_writer(&mut f, &artifact);
            let _ = f.flush();
            (f.path().to_path_buf(), ModelArtifact::load(f.path()))
        });
        let Some((path, Ok(model))) = loaded else {
            unreachable!("artifact should load");
        };
        assert_eq!(model.source(), Some(path.as_path()));
        assert_eq!(model.name(), "disk");
    }

    #[test]
    fn unavailable_slot_reports_load_error() {
        let slot = ModelSlot::load("definitely/not/here.json");
        assert!(!slot.is_ready());
        assert!(slot.load_error().is_some());

        let result = slot.predict(&mix_at_age(28));
        assert_eq!(result.map_err(|e| e.kind()), Err("unavailable"));
    }
}
