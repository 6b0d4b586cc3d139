mod active_learner;

pub use active_learner::{ActiveLearner, LoopParams, Outcome, RunState, Stage};
