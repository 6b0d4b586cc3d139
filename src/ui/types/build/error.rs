use crate::core::error::ActiveLearningError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Learning(#[from] ActiveLearningError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
