use crate::classifiers::SupportVectorClassifier;
use crate::ui::types::build::BuildError;
use crate::ui::types::choices::{LinearSvmParams, RbfSvmParams};

pub(super) fn linear(p: LinearSvmParams) -> Result<SupportVectorClassifier, BuildError> {
    Ok(SupportVectorClassifier::linear(p.c)?)
}

pub(super) fn rbf(p: RbfSvmParams) -> Result<SupportVectorClassifier, BuildError> {
    if let Some(g) = p.gamma.filter(|g| !(*g > 0.0)) {
        return Err(BuildError::InvalidParameter(format!(
            "gamma must be positive, got {g}"
        )));
    }
    Ok(SupportVectorClassifier::rbf(p.c, p.gamma)?)
}
