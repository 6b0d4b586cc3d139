pub mod classifiers;
pub mod core;
pub mod evaluation;
pub mod novelty;
pub mod persistence;
pub mod preprocessing;
pub mod sampling;
pub mod tasks;
pub mod ui;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
