mod model_store;

pub use model_store::{load_model, model_path, save_model};
