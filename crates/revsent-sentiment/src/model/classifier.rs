use ndarray::{Array2, ArrayView1};
use revsent_core::SentimentLabel;
use serde::Deserialize;

use crate::error::{ClassifyError, ModelError};

const ARTIFACT: &str = "classifier";

/// A fitted decision tree in flat parallel-array layout. Node 0 is the
/// root; a left child of `-1` marks a leaf.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TreeArtifact {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Per-node class weights (counts or fractions), one entry per class.
    pub value: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum ModelArtifact {
    RandomForest { trees: Vec<TreeArtifact> },
    DecisionTree { tree: TreeArtifact },
    LogisticRegression { coef: Vec<f64>, intercept: f64 },
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ClassifierArtifact {
    pub n_features: usize,
    pub classes: Vec<i64>,
    #[serde(flatten)]
    pub model: ModelArtifact,
}

#[derive(Debug, Clone)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        proba: Vec<f64>,
    },
}

#[derive(Debug, Clone)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn from_artifact(
        raw: TreeArtifact,
        n_features: usize,
        n_classes: usize,
    ) -> Result<Self, ModelError> {
        let invalid = |reason: String| ModelError::Invalid {
            artifact: ARTIFACT,
            reason,
        };

        let count = raw.children_left.len();
        if count == 0 {
            return Err(invalid("tree has no nodes".to_string()));
        }
        if [
            raw.children_right.len(),
            raw.feature.len(),
            raw.threshold.len(),
            raw.value.len(),
        ]
        .iter()
        .any(|&len| len != count)
        {
            return Err(invalid("tree arrays differ in length".to_string()));
        }

        let mut nodes = Vec::with_capacity(count);
        for (i, weights) in raw.value.into_iter().enumerate() {
            let left = raw.children_left[i];
            let right = raw.children_right[i];

            if left < 0 {
                if weights.len() != n_classes {
                    return Err(invalid(format!(
                        "leaf {i} has {} class weights, expected {n_classes}",
                        weights.len()
                    )));
                }
                let total: f64 = weights.iter().sum();
                let proba = if total > 0.0 {
                    weights.iter().map(|w| w / total).collect()
                } else {
                    weights
                };
                nodes.push(Node::Leaf { proba });
                continue;
            }

            // Children always follow their parent, which rules out cycles.
            let child = |c: i64| {
                usize::try_from(c)
                    .ok()
                    .filter(|&c| c > i && c < count)
                    .ok_or_else(|| invalid(format!("node {i} has bad child {c}")))
            };
            let feature = usize::try_from(raw.feature[i])
                .ok()
                .filter(|&f| f < n_features)
                .ok_or_else(|| {
                    invalid(format!(
                        "node {i} splits on feature {} outside 0..{n_features}",
                        raw.feature[i]
                    ))
                })?;

            nodes.push(Node::Split {
                feature,
                threshold: raw.threshold[i],
                left: child(left)?,
                right: child(right)?,
            });
        }

        Ok(Self { nodes })
    }

    fn predict_proba(&self, row: ArrayView1<'_, f64>) -> Result<&[f64], ClassifyError> {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf { proba } => return Ok(proba),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = row.get(*feature).ok_or(ClassifyError::FeatureOutOfRange {
                        feature: *feature,
                        width: row.len(),
                    })?;
                    index = if *value <= *threshold { *left } else { *right };
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
enum Model {
    Forest(Vec<Tree>),
    Linear { coef: Vec<f64>, intercept: f64 },
}

/// A fitted binary classifier over `n_features` columns.
#[derive(Debug, Clone)]
pub struct Classifier {
    n_features: usize,
    classes: [i64; 2],
    model: Model,
}

impl Classifier {
    pub(crate) fn from_artifact(raw: ClassifierArtifact) -> Result<Self, ModelError> {
        let pair = <[i64; 2]>::try_from(raw.classes.as_slice())
            .ok()
            .filter(|&[a, b]| a != b && matches!(a, 0 | 1) && matches!(b, 0 | 1));
        let Some(classes) = pair else {
            return Err(ModelError::UnsupportedClasses(raw.classes));
        };
        let n_features = raw.n_features;
        if n_features == 0 {
            return Err(ModelError::Invalid {
                artifact: ARTIFACT,
                reason: "n_features is zero".to_string(),
            });
        }

        let model = match raw.model {
            ModelArtifact::RandomForest { trees } => {
                if trees.is_empty() {
                    return Err(ModelError::Invalid {
                        artifact: ARTIFACT,
                        reason: "forest has no trees".to_string(),
                    });
                }
                Model::Forest(
                    trees
                        .into_iter()
                        .map(|t| Tree::from_artifact(t, n_features, classes.len()))
                        .collect::<Result<_, _>>()?,
                )
            }
            ModelArtifact::DecisionTree { tree } => {
                Model::Forest(vec![Tree::from_artifact(tree, n_features, classes.len())?])
            }
            ModelArtifact::LogisticRegression { coef, intercept } => {
                if coef.len() != n_features {
                    return Err(ModelError::Invalid {
                        artifact: ARTIFACT,
                        reason: format!(
                            "coef has {} entries, n_features is {n_features}",
                            coef.len()
                        ),
                    });
                }
                Model::Linear { coef, intercept }
            }
        };

        Ok(Self {
            n_features,
            classes,
            model,
        })
    }

    #[must_use]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Predicts one label per row, in row order.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::ShapeMismatch`] when `x` has the wrong width.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Vec<SentimentLabel>, ClassifyError> {
        if x.ncols() != self.n_features {
            return Err(ClassifyError::ShapeMismatch {
                expected: self.n_features,
                actual: x.ncols(),
            });
        }
        x.rows()
            .into_iter()
            .map(|row| self.predict_row(row))
            .collect()
    }

    fn predict_row(&self, row: ArrayView1<'_, f64>) -> Result<SentimentLabel, ClassifyError> {
        let index = match &self.model {
            Model::Forest(trees) => {
                let mut proba = [0.0_f64; 2];
                for tree in trees {
                    for (acc, p) in proba.iter_mut().zip(tree.predict_proba(row)?) {
                        *acc += p;
                    }
                }
                // Ties go to the first class.
                usize::from(proba[1] > proba[0])
            }
            Model::Linear { coef, intercept } => {
                let z = ArrayView1::from(coef.as_slice()).dot(&row) + intercept;
                usize::from(z > 0.0)
            }
        };

        let class = self.classes[index];
        // Classes are validated to be 0 and 1 on load.
        Ok(SentimentLabel::from_class(class).unwrap_or(SentimentLabel::Negative))
    }
}
