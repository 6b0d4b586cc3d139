use crate::ui::types::choices::TaggedChoice;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

fn default_c() -> f64 {
    1.0
}

/// Empty parameter object so the wizard can still look under "params"
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct NoModelParams {}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct LinearSvmParams {
    #[serde(default = "default_c")]
    #[schemars(
        title = "C",
        description = "Regularization strength (> 0)",
        range(min = 0.0),
        default = "default_c"
    )]
    pub c: f64,
}

impl Default for LinearSvmParams {
    fn default() -> Self {
        Self { c: default_c() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RbfSvmParams {
    #[serde(default = "default_c")]
    #[schemars(
        title = "C",
        description = "Regularization strength (> 0)",
        range(min = 0.0),
        default = "default_c"
    )]
    pub c: f64,

    #[serde(default)]
    #[schemars(
        title = "Gamma",
        description = "RBF width; None = 1 / (n_features * var(X))"
    )]
    pub gamma: Option<f64>,
}

impl Default for RbfSvmParams {
    fn default() -> Self {
        Self {
            c: default_c(),
            gamma: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants, PartialEq)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(ModelKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum ModelChoice {
    #[strum_discriminants(strum(
        message = "Linear SVM",
        detailed_message = "C-support vector classifier with a linear kernel."
    ))]
    SvmLinear(LinearSvmParams),
    #[strum_discriminants(strum(
        message = "RBF SVM",
        detailed_message = "C-support vector classifier with a Gaussian kernel."
    ))]
    SvmRbf(RbfSvmParams),
    #[serde(rename = "knn2")]
    #[strum_discriminants(strum(
        serialize = "knn2",
        message = "2-NN",
        detailed_message = "k-nearest neighbours, k = 2."
    ))]
    Knn2(NoModelParams),
    #[serde(rename = "knn5")]
    #[strum_discriminants(strum(
        serialize = "knn5",
        message = "5-NN",
        detailed_message = "k-nearest neighbours, k = 5."
    ))]
    Knn5(NoModelParams),
    #[serde(rename = "knn10")]
    #[strum_discriminants(strum(
        serialize = "knn10",
        message = "10-NN",
        detailed_message = "k-nearest neighbours, k = 10."
    ))]
    Knn10(NoModelParams),
}

impl Default for ModelChoice {
    fn default() -> Self {
        ModelChoice::SvmLinear(LinearSvmParams::default())
    }
}

impl ModelChoice {
    pub fn kind(&self) -> ModelKind {
        ModelKind::from(self)
    }

    /// Kebab-case key, also used to name output files.
    pub fn key(&self) -> &'static str {
        self.kind().into()
    }
}

impl TaggedChoice for ModelChoice {
    type Kind = ModelKind;

    fn schema() -> Schema {
        schema_for!(ModelChoice)
    }

    fn prompt_label() -> &'static str {
        "Choose a model:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        let v = match kind {
            ModelKind::SvmLinear => serde_json::to_value(LinearSvmParams::default()),
            ModelKind::SvmRbf => serde_json::to_value(RbfSvmParams::default()),
            ModelKind::Knn2 | ModelKind::Knn5 | ModelKind::Knn10 => {
                serde_json::to_value(NoModelParams::default())
            }
        };
        v.unwrap_or(Value::Null)
    }
}
