use anyhow::Result;
use schemars::{JsonSchema, Schema};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use strum::{EnumMessage, IntoEnumIterator};

const DIM_ITALIC: &str = "\x1b[2m\x1b[3m";
const RESET: &str = "\x1b[0m";

/// A config enum serialized as `{ "type": <kind>, "params": {...} }`, such as
/// the classifier picked for an experiment.
///
/// `Kind` is the fieldless discriminant the wizard lists; the fields of the
/// chosen variant are then read off the JSON schema.
pub trait TaggedChoice: Sized + Serialize + DeserializeOwned + JsonSchema {
    type Kind: Copy + Into<&'static str> + EnumMessage + IntoEnumIterator;

    const TAG: &'static str = "type";
    const CONTENT: &'static str = "params";

    fn schema() -> Schema;

    fn prompt_label() -> &'static str;

    fn prompt_help() -> &'static str {
        "↑/↓ to navigate, ↵ to select"
    }

    /// Parameters the wizard starts from for `kind`.
    fn default_params(kind: Self::Kind) -> Value;

    /// Menu lines: the kind's message, then its detailed message dimmed.
    fn menu() -> Vec<(Self::Kind, String)> {
        Self::Kind::iter()
            .map(|k| {
                let label = k.get_message().unwrap_or_else(|| k.into());
                let line = match k.get_detailed_message() {
                    Some(desc) if !desc.is_empty() => format!("{label}  {DIM_ITALIC}{desc}{RESET}"),
                    _ => label.to_string(),
                };
                (k, line)
            })
            .collect()
    }

    fn from_parts(kind: Self::Kind, params: Value) -> Result<Self> {
        let key: &'static str = kind.into();
        let mut tagged = Map::new();
        tagged.insert(Self::TAG.into(), Value::from(key));
        tagged.insert(Self::CONTENT.into(), params);
        Ok(serde_json::from_value(Value::Object(tagged))?)
    }
}
