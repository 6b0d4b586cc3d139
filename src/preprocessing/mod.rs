mod standard_scaler;

pub use standard_scaler::{ScalerParams, StandardScaler, write_scaled_csv};
