//! Class-tagged export for the C++ reader — the secondary encoding.
//!
//! The C++ side reads plain `nlohmann::json` and selects a target type by
//! matching on a `"class"` entry, so this encoding drops everything the
//! graph codec needs for round trips:
//!
//! - no identity markers — shared nodes are expanded inline, in full, at
//!   every occurrence;
//! - composite nodes become `{"class": "Name", ...fields}` with the tag
//!   written first;
//! - numeric arrays become nested plain JSON arrays (row-major, shape via
//!   nesting depth).
//!
//! Write-only: there is no matching decoder.

use std::path::{Path, PathBuf};

use serde_json::{Map, Number, Value};

use crate::error::EncodeError;
use crate::graph_json::number_from_f64;
use crate::value::{ObjectNode, ObjectValue};

const CLASS_TAG: &str = "class";

/// Encode `root` as pretty-printed (2-space indented) class-tagged JSON.
pub fn encode_cpp(root: &ObjectValue) -> Result<String, EncodeError> {
    let value = write_any(root)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Derive the export path from the primary path: the first literal `.json`
/// is replaced by `_for_cpp.json`; a path without `.json` gets
/// `_for_cpp.json` appended.
pub fn cpp_export_path(path: &Path) -> PathBuf {
    let s = path.to_string_lossy();
    if s.contains(".json") {
        PathBuf::from(s.replacen(".json", "_for_cpp.json", 1))
    } else {
        PathBuf::from(format!("{s}_for_cpp.json"))
    }
}

fn write_any(value: &ObjectValue) -> Result<Value, EncodeError> {
    match value {
        ObjectValue::Null => Ok(Value::Null),
        ObjectValue::Bool(b) => Ok(Value::Bool(*b)),
        ObjectValue::Int(i) => Ok(Value::Number(Number::from(*i))),
        ObjectValue::Float(f) => Ok(Value::Number(number_from_f64(*f)?)),
        ObjectValue::Str(s) => Ok(Value::String(s.clone())),
        ObjectValue::Seq(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(write_any(item)?);
            }
            Ok(Value::Array(out))
        }
        ObjectValue::Map(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, item) in map {
                out.insert(key.clone(), write_any(item)?);
            }
            Ok(Value::Object(out))
        }
        ObjectValue::Array(arr) => write_nested(&arr.view()),
        ObjectValue::Object(node) => write_node(node),
    }
}

fn write_node(node: &ObjectNode) -> Result<Value, EncodeError> {
    let mut out = Map::with_capacity(node.len() + 1);
    out.insert(CLASS_TAG.to_owned(), Value::String(node.class().to_owned()));
    for (name, value) in node.fields() {
        if name == CLASS_TAG {
            return Err(EncodeError::ReservedKey(name.to_owned()));
        }
        out.insert(name.to_owned(), write_any(value)?);
    }
    Ok(Value::Object(out))
}

/// Row-major nested rendering; a 0-d array collapses to its single element.
fn write_nested(view: &ndarray::ArrayViewD<'_, f64>) -> Result<Value, EncodeError> {
    if view.ndim() == 0 {
        let f = view.iter().next().copied().unwrap_or(0.0);
        return Ok(Value::Number(number_from_f64(f)?));
    }
    let mut out = Vec::with_capacity(view.len_of(ndarray::Axis(0)));
    for sub in view.outer_iter() {
        out.push(write_nested(&sub)?);
    }
    Ok(Value::Array(out))
}
