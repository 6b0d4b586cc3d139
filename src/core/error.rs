use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActiveLearningError {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("invalid annotation indices: {0}")]
    Index(String),

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error(
        "pool corrupted: labelled={labelled} + unlabelled={unlabelled} does not match total={total}"
    )]
    PoolCorrupted {
        labelled: usize,
        unlabelled: usize,
        total: usize,
    },

    #[error("malformed dataset: {0}")]
    Dataset(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Svm(#[from] linfa_svm::SvmError),

    #[error(transparent)]
    NeighbourIndex(#[from] linfa_nn::BuildError),

    #[error(transparent)]
    NeighbourQuery(#[from] linfa_nn::NnError),
}

pub type Result<T> = std::result::Result<T, ActiveLearningError>;

impl ActiveLearningError {
    pub(crate) fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    pub(crate) fn index<S: Into<String>>(msg: S) -> Self {
        Self::Index(msg.into())
    }

    pub(crate) fn unsupported<S: Into<String>>(msg: S) -> Self {
        Self::UnsupportedOperation(msg.into())
    }
}
