mod wizard;

pub use wizard::{prompt_choice, prompt_experiment, prompt_struct};
