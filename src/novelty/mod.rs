pub mod affinity_propagation;
mod detector;
pub mod selector;

pub use affinity_propagation::{AffinityPropagation, Clustering};
pub use detector::{DetectorFactory, NoveltyDetector};
pub use selector::{NoveltySelection, NoveltySelector, combine_novelty_masks};
