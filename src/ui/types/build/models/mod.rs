use crate::classifiers::{KNearestNeighbors, Model};
use crate::ui::types::build::BuildError;
use crate::ui::types::choices::ModelChoice;

mod svm;

pub fn build_model(choice: ModelChoice) -> Result<Model, BuildError> {
    match choice {
        ModelChoice::SvmLinear(p) => Ok(Model::from(svm::linear(p)?)),
        ModelChoice::SvmRbf(p) => Ok(Model::from(svm::rbf(p)?)),
        ModelChoice::Knn2(_) => Ok(Model::from(KNearestNeighbors::new(2)?)),
        ModelChoice::Knn5(_) => Ok(Model::from(KNearestNeighbors::new(5)?)),
        ModelChoice::Knn10(_) => Ok(Model::from(KNearestNeighbors::new(10)?)),
    }
}
