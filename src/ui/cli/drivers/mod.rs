mod prompter;
mod terminal;

pub use prompter::{Bounds, Prompter, Question};
pub use terminal::TerminalPrompter;
