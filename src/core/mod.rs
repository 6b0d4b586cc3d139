pub mod dataset;
pub mod error;
pub mod pool;

pub use dataset::Dataset;
pub use error::{ActiveLearningError, Result};
pub use pool::{Pool, Subset};
