pub mod random;
pub mod strategy;
pub mod uncertainty;

pub use random::random_sampling;
pub use strategy::SamplingStrategy;
pub use uncertainty::{bvsb_sampling, entropy_sampling};
