//! Reference-preserving graph codec — the primary encoding.
//!
//! Composite nodes are written as JSON objects with reserved `$`-prefixed
//! marker keys:
//!
//! - `{"$class": "Name", "$id": n, ...fields}` — first occurrence of a node;
//!   `$id` is present only when the node is referenced more than once.
//! - `{"$ref": n}` — every later occurrence of a shared node.
//! - `{"$ndarray": [d0, d1, ...], "$data": [...]}` — numeric array, shape
//!   plus flat row-major data.
//!
//! Ids are assigned `0, 1, 2, ...` in depth-first first-visit order over
//! shared nodes only, so re-encoding the same graph is byte-identical.
//! This is the only format [`decode_graph`] reads; the C++ export in
//! [`cpp_json`](crate::cpp_json) is write-only.

use std::collections::HashMap;
use std::sync::Arc;

use ndarray::{ArrayD, IxDyn};
use serde_json::{Map, Number, Value};

use crate::error::{DecodeError, EncodeError};
use crate::value::{ObjectNode, ObjectValue};

pub(crate) const CLASS_KEY: &str = "$class";
pub(crate) const ID_KEY: &str = "$id";
pub(crate) const REF_KEY: &str = "$ref";
pub(crate) const SHAPE_KEY: &str = "$ndarray";
pub(crate) const DATA_KEY: &str = "$data";

/// Encode `root` to compact reference-preserving JSON text.
pub fn encode_graph(root: &ObjectValue) -> Result<String, EncodeError> {
    let mut encoder = GraphEncoder::new(root);
    let value = encoder.write_any(root)?;
    Ok(serde_json::to_string(&value)?)
}

/// Decode reference-preserving JSON text back into an object graph.
///
/// Shared nodes come back as clones of one `Arc`, so identity relationships
/// survive the round trip.
pub fn decode_graph(text: &str) -> Result<ObjectValue, DecodeError> {
    let json: Value = serde_json::from_str(text)?;
    let mut nodes = HashMap::new();
    read_any(&json, &mut nodes)
}

pub(crate) fn number_from_f64(f: f64) -> Result<Number, EncodeError> {
    Number::from_f64(f).ok_or(EncodeError::NonFiniteFloat(f))
}

struct GraphEncoder {
    /// How often each node is reachable; nodes seen more than once get ids.
    occurrences: HashMap<*const ObjectNode, usize>,
    ids: HashMap<*const ObjectNode, u64>,
    next_id: u64,
}

impl GraphEncoder {
    fn new(root: &ObjectValue) -> Self {
        let mut occurrences = HashMap::new();
        count_occurrences(root, &mut occurrences);
        Self {
            occurrences,
            ids: HashMap::new(),
            next_id: 0,
        }
    }

    fn write_any(&mut self, value: &ObjectValue) -> Result<Value, EncodeError> {
        match value {
            ObjectValue::Null => Ok(Value::Null),
            ObjectValue::Bool(b) => Ok(Value::Bool(*b)),
            ObjectValue::Int(i) => Ok(Value::Number(Number::from(*i))),
            ObjectValue::Float(f) => Ok(Value::Number(number_from_f64(*f)?)),
            ObjectValue::Str(s) => Ok(Value::String(s.clone())),
            ObjectValue::Seq(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(self.write_any(item)?);
                }
                Ok(Value::Array(out))
            }
            ObjectValue::Map(map) => {
                let mut out = Map::with_capacity(map.len());
                for (key, item) in map {
                    if key.starts_with('$') {
                        return Err(EncodeError::ReservedKey(key.clone()));
                    }
                    out.insert(key.clone(), self.write_any(item)?);
                }
                Ok(Value::Object(out))
            }
            ObjectValue::Array(arr) => write_ndarray(arr),
            ObjectValue::Object(node) => self.write_node(node),
        }
    }

    fn write_node(&mut self, node: &Arc<ObjectNode>) -> Result<Value, EncodeError> {
        let ptr = Arc::as_ptr(node);
        if let Some(id) = self.ids.get(&ptr) {
            let mut out = Map::with_capacity(1);
            out.insert(REF_KEY.to_owned(), Value::Number(Number::from(*id)));
            return Ok(Value::Object(out));
        }

        let mut out = Map::with_capacity(node.len() + 2);
        out.insert(CLASS_KEY.to_owned(), Value::String(node.class().to_owned()));
        if self.occurrences.get(&ptr).copied().unwrap_or(0) > 1 {
            let id = self.next_id;
            self.next_id += 1;
            self.ids.insert(ptr, id);
            out.insert(ID_KEY.to_owned(), Value::Number(Number::from(id)));
        }
        for (name, value) in node.fields() {
            if name.starts_with('$') {
                return Err(EncodeError::ReservedKey(name.to_owned()));
            }
            out.insert(name.to_owned(), self.write_any(value)?);
        }
        Ok(Value::Object(out))
    }
}

fn count_occurrences(value: &ObjectValue, occurrences: &mut HashMap<*const ObjectNode, usize>) {
    match value {
        ObjectValue::Seq(items) => {
            for item in items {
                count_occurrences(item, occurrences);
            }
        }
        ObjectValue::Map(map) => {
            for item in map.values() {
                count_occurrences(item, occurrences);
            }
        }
        ObjectValue::Object(node) => {
            let count = occurrences.entry(Arc::as_ptr(node)).or_insert(0);
            *count += 1;
            if *count == 1 {
                // Children of repeat occurrences are never re-encoded.
                for (_, field) in node.fields() {
                    count_occurrences(field, occurrences);
                }
            }
        }
        _ => {}
    }
}

fn write_ndarray(arr: &ArrayD<f64>) -> Result<Value, EncodeError> {
    let shape: Vec<Value> = arr
        .shape()
        .iter()
        .map(|d| Value::Number(Number::from(*d as u64)))
        .collect();
    let mut data = Vec::with_capacity(arr.len());
    for f in arr.iter() {
        data.push(Value::Number(number_from_f64(*f)?));
    }
    let mut out = Map::with_capacity(2);
    out.insert(SHAPE_KEY.to_owned(), Value::Array(shape));
    out.insert(DATA_KEY.to_owned(), Value::Array(data));
    Ok(Value::Object(out))
}

fn read_any(
    json: &Value,
    nodes: &mut HashMap<u64, Arc<ObjectNode>>,
) -> Result<ObjectValue, DecodeError> {
    match json {
        Value::Null => Ok(ObjectValue::Null),
        Value::Bool(b) => Ok(ObjectValue::Bool(*b)),
        Value::Number(n) => read_number(n),
        Value::String(s) => Ok(ObjectValue::Str(s.clone())),
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(read_any(item, nodes)?);
            }
            Ok(ObjectValue::Seq(out))
        }
        Value::Object(map) => {
            if map.contains_key(REF_KEY) {
                read_ref(map, nodes)
            } else if map.contains_key(SHAPE_KEY) {
                read_ndarray(map)
            } else if map.contains_key(CLASS_KEY) {
                read_node(map, nodes)
            } else {
                let mut out = indexmap::IndexMap::with_capacity(map.len());
                for (key, item) in map {
                    if key.starts_with('$') {
                        return Err(DecodeError::BadMarker(key.clone()));
                    }
                    out.insert(key.clone(), read_any(item, nodes)?);
                }
                Ok(ObjectValue::Map(out))
            }
        }
    }
}

fn read_number(n: &Number) -> Result<ObjectValue, DecodeError> {
    if let Some(i) = n.as_i64() {
        Ok(ObjectValue::Int(i))
    } else if let Some(f) = n.as_f64() {
        Ok(ObjectValue::Float(f))
    } else {
        Err(DecodeError::BadMarker("number".to_owned()))
    }
}

fn read_ref(
    map: &Map<String, Value>,
    nodes: &mut HashMap<u64, Arc<ObjectNode>>,
) -> Result<ObjectValue, DecodeError> {
    let id = map
        .get(REF_KEY)
        .and_then(Value::as_u64)
        .filter(|_| map.len() == 1)
        .ok_or_else(|| DecodeError::BadMarker(REF_KEY.to_owned()))?;
    let node = nodes
        .get(&id)
        .cloned()
        .ok_or(DecodeError::UnresolvedRef(id))?;
    Ok(ObjectValue::Object(node))
}

fn read_ndarray(map: &Map<String, Value>) -> Result<ObjectValue, DecodeError> {
    let bad = || DecodeError::BadMarker(SHAPE_KEY.to_owned());
    if map.len() != 2 {
        return Err(bad());
    }
    let shape: Vec<usize> = map
        .get(SHAPE_KEY)
        .and_then(Value::as_array)
        .ok_or_else(bad)?
        .iter()
        .map(|d| d.as_u64().map(|d| d as usize).ok_or_else(bad))
        .collect::<Result<_, _>>()?;
    let data: Vec<f64> = map
        .get(DATA_KEY)
        .and_then(Value::as_array)
        .ok_or_else(|| DecodeError::BadMarker(DATA_KEY.to_owned()))?
        .iter()
        .map(|f| {
            f.as_f64()
                .ok_or_else(|| DecodeError::BadMarker(DATA_KEY.to_owned()))
        })
        .collect::<Result<_, _>>()?;
    let actual = data.len();
    ArrayD::from_shape_vec(IxDyn(&shape), data)
        .map(ObjectValue::Array)
        .map_err(|_| DecodeError::ShapeMismatch { shape, actual })
}

fn read_node(
    map: &Map<String, Value>,
    nodes: &mut HashMap<u64, Arc<ObjectNode>>,
) -> Result<ObjectValue, DecodeError> {
    let class = map
        .get(CLASS_KEY)
        .and_then(Value::as_str)
        .ok_or_else(|| DecodeError::BadMarker(CLASS_KEY.to_owned()))?;
    let id = match map.get(ID_KEY) {
        Some(v) => Some(
            v.as_u64()
                .ok_or_else(|| DecodeError::BadMarker(ID_KEY.to_owned()))?,
        ),
        None => None,
    };

    let mut node = ObjectNode::new(class);
    for (key, value) in map {
        if key == CLASS_KEY || key == ID_KEY {
            continue;
        }
        if key.starts_with('$') {
            return Err(DecodeError::BadMarker(key.clone()));
        }
        node.set(key, read_any(value, nodes)?);
    }

    let node = Arc::new(node);
    if let Some(id) = id {
        if nodes.insert(id, node.clone()).is_some() {
            return Err(DecodeError::DuplicateId(id));
        }
    }
    Ok(ObjectValue::Object(node))
}
