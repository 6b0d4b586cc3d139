pub mod classifier;
pub mod knn;
pub mod matrix;
pub mod model;
pub mod one_class_svm;
pub mod probabilities;
pub mod svc;

pub use classifier::Classifier;
pub use knn::KNearestNeighbors;
pub use model::Model;
pub use one_class_svm::OneClassSvm;
pub use probabilities::Probabilities;
pub use svc::{KernelOption, SupportVectorClassifier};
