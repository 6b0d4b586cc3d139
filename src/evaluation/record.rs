use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use strum_macros::{Display as StrumDisplay, EnumString};

/// Which selection produced the labelled set a record was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, StrumDisplay, EnumString)]
pub enum TrainType {
    Initial,
    #[serde(rename = "AP")]
    #[strum(serialize = "AP")]
    AffinityPropagation,
    #[serde(rename = "BvSB")]
    #[strum(serialize = "BvSB")]
    Bvsb,
    Entropy,
    Random,
}

/// One completed training round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationRecord {
    #[serde(rename = "Accuracy")]
    pub accuracy: f64,
    #[serde(rename = "F1 Score")]
    pub f1: f64,
    #[serde(rename = "Train Accuracy")]
    pub train_accuracy: f64,
    #[serde(rename = "Number of Annotations")]
    pub annotations: usize,
    pub damping: f64,
    pub preference: f64,
    #[serde(rename = "Train_type")]
    pub train_type: TrainType,
    #[serde(rename = "Classes")]
    pub classes: usize,
    #[serde(rename = "Completed At")]
    pub completed_at: DateTime<Utc>,
}

impl Display for IterationRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] annotations={}, classes={}, acc={:.6}, f1={:.6}, train_acc={:.6}",
            self.train_type,
            self.annotations,
            self.classes,
            self.accuracy,
            self.f1,
            self.train_accuracy
        )
    }
}
