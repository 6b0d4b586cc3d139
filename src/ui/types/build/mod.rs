mod error;
mod experiment;
mod models;

pub use error::BuildError;

pub use experiment::build_learner;
pub use models::build_model;
