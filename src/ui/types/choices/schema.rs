use anyhow::{Context, Result, anyhow, bail};
use schemars::{Schema, schema_for};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
    /// String restricted to the listed values (unit enums).
    Choice(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    pub required: bool,
    pub kind: FieldKind,
    pub default: Option<Value>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

// Return the whole schema for T
pub fn schema_for<T: schemars::JsonSchema>() -> Schema {
    schema_for!(T)
}

/// Field specs of the `params` object of the tagged-enum branch `kind_key`.
pub fn specs_for_kind(root: &Schema, kind_key: &str) -> Result<Vec<FieldSpec>> {
    let root_obj = root.as_object().context("root schema is not an object")?;

    let alts = root_obj
        .get("oneOf")
        .or_else(|| root_obj.get("anyOf"))
        .and_then(|v| v.as_array())
        .context("missing oneOf/anyOf")?;

    for branch in alts {
        let bobj = branch.as_object().context("branch is not object")?;
        let props = match bobj.get("properties").and_then(|v| v.as_object()) {
            Some(p) => p,
            None => continue,
        };

        if !discriminant_matches(props, kind_key) {
            continue;
        }

        let Some(params_obj) = props.get("params").and_then(|v| v.as_object()) else {
            return Ok(vec![]);
        };
        let Some(params_obj) = resolve_ref_obj(root_obj, params_obj) else {
            return Ok(vec![]);
        };
        return field_specs(root_obj, params_obj);
    }

    bail!("no branch found for type={kind_key}");
}

/// Field specs of a plain struct schema.
pub fn specs_for_struct(root: &Schema) -> Result<Vec<FieldSpec>> {
    let root_obj = root.as_object().context("root schema is not an object")?;
    field_specs(root_obj, root_obj)
}

fn field_specs(root_obj: &Map<String, Value>, obj: &Map<String, Value>) -> Result<Vec<FieldSpec>> {
    let Some(props) = obj.get("properties").and_then(|v| v.as_object()) else {
        return Ok(vec![]);
    };

    let required: Vec<String> = obj
        .get("required")
        .and_then(|v| v.as_array())
        .map(|a| {
            a.iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    let mut out = Vec::new();
    for (name, field_schema) in props {
        let field_obj = field_schema
            .as_object()
            .context("field schema not object")?;

        // title/description/default sit next to the $ref, the type behind it
        let target = resolve_ref_obj(root_obj, field_obj)
            .ok_or_else(|| anyhow!("failed to resolve field $ref for '{name}'"))?;
        let lookup = |key: &str| field_obj.get(key).or_else(|| target.get(key));

        let title = lookup("title")
            .and_then(|v| v.as_str())
            .unwrap_or(name)
            .to_string();

        let description = lookup("description")
            .and_then(|v| v.as_str())
            .map(str::to_string);

        let default = field_obj.get("default").cloned();

        let kind = match enum_values(target) {
            Some(values) => FieldKind::Choice(values),
            None => {
                let Some(kind) = detect_field_kind(target.get("type")) else {
                    continue;
                };
                kind
            }
        };

        let min = target
            .get("minimum")
            .or_else(|| target.get("exclusiveMinimum"))
            .and_then(|v| v.as_f64());

        let max = target
            .get("maximum")
            .or_else(|| target.get("exclusiveMaximum"))
            .and_then(|v| v.as_f64());

        out.push(FieldSpec {
            name: name.clone(),
            title,
            description,
            required: required.iter().any(|r| r == name),
            kind,
            default,
            min,
            max,
        });
    }

    Ok(out)
}

/// String values of a unit-enum schema, whether written as `enum` or as a
/// `oneOf` of `const`s (the latter when variants carry doc comments).
fn enum_values(obj: &Map<String, Value>) -> Option<Vec<String>> {
    if let Some(arr) = obj.get("enum").and_then(|v| v.as_array()) {
        return arr
            .iter()
            .map(|v| v.as_str().map(str::to_string))
            .collect();
    }
    let alts = obj.get("oneOf").and_then(|v| v.as_array())?;
    alts.iter()
        .map(|alt| {
            let a = alt.as_object()?;
            a.get("const")
                .and_then(|v| v.as_str())
                .or_else(|| {
                    a.get("enum")
                        .and_then(|v| v.as_array())
                        .filter(|e| e.len() == 1)
                        .and_then(|e| e[0].as_str())
                })
                .map(str::to_string)
        })
        .collect()
}

fn discriminant_matches(props: &Map<String, Value>, kind_key: &str) -> bool {
    let Some(tval) = props.get("type") else {
        return false;
    };
    let Some(tobj) = tval.as_object() else {
        return false;
    };

    if tobj.get("const").and_then(|v| v.as_str()) == Some(kind_key) {
        return true;
    }
    if let Some(arr) = tobj.get("enum").and_then(|v| v.as_array()) {
        if arr.len() == 1 && arr[0].as_str() == Some(kind_key) {
            return true;
        }
    }
    false
}

/// Resolve a local $ref like "#/$defs/NoveltyParams" against the root object.
/// Objects without a $ref resolve to themselves.
fn resolve_ref_obj<'a>(
    root_obj: &'a Map<String, Value>,
    obj: &'a Map<String, Value>,
) -> Option<&'a Map<String, Value>> {
    match obj.get("$ref") {
        Some(Value::String(r)) => {
            let path = r.strip_prefix("#/")?;
            let mut cur: &Map<String, Value> = root_obj;
            for raw_seg in path.split('/') {
                // JSON Pointer unescape (~1 => /, ~0 => ~)
                let seg = raw_seg.replace("~1", "/").replace("~0", "~");
                cur = cur.get(&seg)?.as_object()?;
            }
            Some(cur)
        }
        _ => Some(obj),
    }
}

fn detect_field_kind(ty: Option<&Value>) -> Option<FieldKind> {
    let scalar = |s: &str| match s {
        "string" => Some(FieldKind::String),
        "integer" => Some(FieldKind::Integer),
        "number" => Some(FieldKind::Number),
        "boolean" => Some(FieldKind::Boolean),
        _ => None,
    };
    match ty {
        Some(Value::String(s)) => scalar(s),
        // unions like ["null","integer"] for Option<T>
        Some(Value::Array(arr)) => arr.iter().filter_map(|v| v.as_str()).find_map(scalar),
        _ => None,
    }
}
