use crate::classifiers::Classifier;
use crate::core::error::Result;
use crate::sampling::random::random_sampling;
use crate::sampling::uncertainty::{bvsb_sampling, entropy_sampling};
use rand::Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumMessage, EnumString, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
    EnumIter,
    EnumString,
    Display,
    IntoStaticStr,
    EnumMessage,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SamplingStrategy {
    #[default]
    #[strum(
        message = "Best vs Second Best",
        detailed_message = "Annotate rows whose two most probable classes are closest."
    )]
    Bvsb,
    #[strum(
        message = "Entropy",
        detailed_message = "Annotate rows with the most uncertain class distribution."
    )]
    Entropy,
    #[strum(
        message = "Random",
        detailed_message = "Annotate uniformly drawn rows (baseline)."
    )]
    Random,
}

impl SamplingStrategy {
    /// Picks `n` unlabelled-relative rows to annotate next.
    ///
    /// Probability-driven strategies ask `model` for estimates on
    /// `unlabelled`; a model without them surfaces `UnsupportedOperation`.
    pub fn select<C, R>(
        &self,
        model: &C,
        unlabelled: &[Vec<f64>],
        n: usize,
        rng: &mut R,
    ) -> Result<Vec<usize>>
    where
        C: Classifier + ?Sized,
        R: Rng + ?Sized,
    {
        match self {
            SamplingStrategy::Random => random_sampling(unlabelled.len(), n, rng),
            SamplingStrategy::Bvsb => {
                let p = model.predict_probabilities(unlabelled)?;
                bvsb_sampling(p.rows(), n)
            }
            SamplingStrategy::Entropy => {
                let p = model.predict_probabilities(unlabelled)?;
                entropy_sampling(p.rows(), n)
            }
        }
    }
}
