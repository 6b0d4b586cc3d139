use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::ui::cli::drivers::{Bounds, Prompter, Question};
use crate::ui::types::choices::{
    ExperimentConfig, FieldKind, FieldSpec, ModelChoice, NoveltyParams, TaggedChoice,
    UncertaintyParams, schema_for, specs_for_kind, specs_for_struct,
};

pub fn prompt_choice<C: TaggedChoice, P: Prompter>(prompter: &P) -> Result<C> {
    let menu = C::menu();
    let lines: Vec<String> = menu.iter().map(|(_, line)| line.clone()).collect();

    let q = Question::new(C::prompt_label(), C::prompt_help());
    let picked = prompter.pick(q, &lines, 0)?;
    let kind = menu
        .get(picked)
        .map(|(k, _)| *k)
        .context("selection out of range")?;

    let specs = specs_for_kind(&C::schema(), kind.into())?;
    let params = prompt_fields(prompter, &specs, &C::default_params(kind))?;
    C::from_parts(kind, Value::Object(params))
}

/// Prompts every schema field of a plain struct, starting from its
/// `Default` values.
pub fn prompt_struct<T, P>(prompter: &P) -> Result<T>
where
    T: JsonSchema + Serialize + DeserializeOwned + Default,
    P: Prompter,
{
    let specs = specs_for_struct(&schema_for::<T>())?;
    let defaults = serde_json::to_value(T::default())?;
    let params = prompt_fields(prompter, &specs, &defaults)?;
    Ok(serde_json::from_value(Value::Object(params))?)
}

/// Top-level fields, then the model, then each phase.
pub fn prompt_experiment<P: Prompter>(prompter: &P) -> Result<ExperimentConfig> {
    let specs = specs_for_struct(&schema_for::<ExperimentConfig>())?;
    let defaults = serde_json::to_value(ExperimentConfig::default())?;
    let mut params = prompt_fields(prompter, &specs, &defaults)?;

    let model = prompt_choice::<ModelChoice, _>(prompter)?;
    let novelty = prompt_struct::<NoveltyParams, _>(prompter)?;
    let uncertainty = prompt_struct::<UncertaintyParams, _>(prompter)?;
    params.insert("model".into(), serde_json::to_value(model)?);
    params.insert("novelty".into(), serde_json::to_value(novelty)?);
    params.insert("uncertainty".into(), serde_json::to_value(uncertainty)?);

    let cfg: ExperimentConfig = serde_json::from_value(Value::Object(params))?;
    cfg.validate().context("invalid experiment")?;
    Ok(cfg)
}

fn prompt_fields<P: Prompter>(
    prompter: &P,
    specs: &[FieldSpec],
    defaults: &Value,
) -> Result<Map<String, Value>> {
    let mut params = Map::new();
    for s in specs {
        let init = s.default.clone().or_else(|| defaults.get(&s.name).cloned());
        if let Some(val) = prompt_field(prompter, s, init)? {
            params.insert(s.name.clone(), val);
        }
    }
    Ok(params)
}

fn prompt_field<P: Prompter>(
    prompter: &P,
    s: &FieldSpec,
    init: Option<Value>,
) -> Result<Option<Value>> {
    let q = Question::for_field(s);
    let optional = !s.required && matches!(init, None | Some(Value::Null));

    if optional && !matches!(s.kind, FieldKind::Boolean | FieldKind::Choice(_)) {
        let blank_help = format!("{}\n(leave blank for none)", q.help);
        let answer = prompter.text(Question::new(q.title, &blank_help), "")?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(None);
        }
        let v = match s.kind {
            FieldKind::Integer => {
                let n: u64 = answer
                    .parse()
                    .with_context(|| format!("invalid integer for {}", s.title))?;
                Value::from(n)
            }
            FieldKind::Number => {
                let x: f64 = answer
                    .parse()
                    .with_context(|| format!("invalid number for {}", s.title))?;
                Value::from(x)
            }
            _ => Value::String(answer.to_string()),
        };
        return Ok(Some(v));
    }

    let v = match &s.kind {
        FieldKind::Boolean => {
            let def = init.and_then(|v| v.as_bool()).unwrap_or(false);
            Value::Bool(prompter.confirm(q, def)?)
        }
        FieldKind::Choice(options) => {
            let def = init
                .as_ref()
                .and_then(|v| v.as_str())
                .and_then(|d| options.iter().position(|o| o == d))
                .unwrap_or(0);
            let i = prompter.pick(q, options, def)?;
            let picked = options.get(i).context("selection out of range")?;
            Value::String(picked.clone())
        }
        FieldKind::String => {
            let def = init
                .and_then(|v| v.as_str().map(|s| s.to_string()))
                .unwrap_or_default();
            let answered = if s.name == "data_path" {
                let help = if q.help.is_empty() {
                    "Please type a valid .csv file path"
                } else {
                    q.help
                };
                let q = Question::new(q.title, help);
                let pb = prompt_path_until_ok(prompter, q, &def, true, true, &["csv"])?;
                pb.to_string_lossy().into_owned()
            } else {
                prompter.text(q, &def)?
            };
            Value::String(answered)
        }
        FieldKind::Integer => {
            let def = init.and_then(|v| v.as_u64()).unwrap_or(0);
            Value::from(prompter.count(q, def, Bounds::of(s))?)
        }
        FieldKind::Number => {
            let def = init.and_then(|v| v.as_f64()).unwrap_or(0.0);
            Value::from(prompter.real(q, def, Bounds::of(s))?)
        }
    };
    Ok(Some(v))
}

fn validate_path_str(
    input: &str,
    must_exist: bool,
    must_be_file: bool,
    allowed_exts: &[&str],
) -> Result<(), String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Path cannot be empty".into());
    }
    let p = Path::new(trimmed);

    if must_exist && !p.exists() {
        return Err(format!("Path does not exist: {}", p.display()));
    }
    if must_be_file && p.exists() && !p.is_file() {
        return Err("Expected a file path, not a directory".into());
    }
    if !allowed_exts.is_empty() {
        match p.extension().and_then(|e| e.to_str()) {
            Some(ext) if allowed_exts.iter().any(|e| e.eq_ignore_ascii_case(ext)) => {}
            _ => return Err(format!("Expected a .{} file", allowed_exts.join(" / ."))),
        }
    }
    Ok(())
}

fn prompt_path_until_ok<P: Prompter>(
    prompter: &P,
    q: Question<'_>,
    default: &str,
    must_exist: bool,
    must_be_file: bool,
    allowed_exts: &[&str],
) -> Result<PathBuf> {
    loop {
        let answer = prompter.text(q, default)?;
        match validate_path_str(&answer, must_exist, must_be_file, allowed_exts) {
            Ok(()) => return Ok(PathBuf::from(answer.trim())),
            Err(msg) => {
                eprintln!("✗ {}", msg);
            }
        }
    }
}
