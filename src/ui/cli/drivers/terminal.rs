use crate::ui::cli::drivers::{Bounds, Prompter, Question};
use anyhow::Result;
use inquire::{Confirm, CustomType, Select, Text, validator::Validation};
use std::str::FromStr;

/// Interactive prompts on the terminal through `inquire`.
pub struct TerminalPrompter;

/// Typed numeric prompt that re-asks until the answer is within `bounds`.
fn ask_bounded<T>(q: Question<'_>, default: T, bounds: Bounds, as_f64: fn(T) -> f64) -> Result<T>
where
    T: Copy + FromStr + ToString + 'static,
{
    let mut prompt = CustomType::<T>::new(q.title)
        .with_default(default)
        .with_help_message(q.help);
    if !bounds.is_open() {
        prompt = prompt.with_validator(move |x: &T| {
            Ok(match bounds.violation(as_f64(*x)) {
                Some(msg) => Validation::Invalid(msg.into()),
                None => Validation::Valid,
            })
        });
    }
    Ok(prompt.prompt()?)
}

impl Prompter for TerminalPrompter {
    fn confirm(&self, q: Question<'_>, default: bool) -> Result<bool> {
        Ok(Confirm::new(q.title)
            .with_default(default)
            .with_help_message(q.help)
            .prompt()?)
    }

    fn text(&self, q: Question<'_>, default: &str) -> Result<String> {
        Ok(Text::new(q.title)
            .with_initial_value(default)
            .with_help_message(q.help)
            .prompt()?)
    }

    fn count(&self, q: Question<'_>, default: u64, bounds: Bounds) -> Result<u64> {
        ask_bounded(q, default, bounds, |n| n as f64)
    }

    fn real(&self, q: Question<'_>, default: f64, bounds: Bounds) -> Result<f64> {
        ask_bounded(q, default, bounds, |x| x)
    }

    fn pick(&self, q: Question<'_>, options: &[String], default: usize) -> Result<usize> {
        let mut select = Select::new(q.title, options.to_vec()).with_starting_cursor(default);
        if !q.help.is_empty() {
            select = select.with_help_message(q.help);
        }
        Ok(select.raw_prompt()?.index)
    }
}
