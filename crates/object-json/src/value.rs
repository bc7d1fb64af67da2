//! [`ObjectValue`] — the value model shared by both encodings.
//!
//! Everything the codec can serialize is one of a closed set of shapes:
//! primitives, plain sequences and mappings, numeric n-dimensional arrays,
//! and composite objects carrying a class name plus an ordered field map.
//! Shared sub-objects are expressed as two [`ObjectValue::Object`] variants
//! holding the same [`Arc`]; the primary encoding preserves that identity,
//! the C++ export expands it.

use std::sync::Arc;

use indexmap::IndexMap;
use ndarray::{Array1, Array2, ArrayD, Ix1, Ix2};

use crate::error::DecodeError;

/// Universal value type for the object-graph codec.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectValue {
    /// JSON null
    Null,
    /// Boolean value
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Floating-point number (must be finite to be encodable)
    Float(f64),
    /// String
    Str(String),
    /// Plain ordered sequence
    Seq(Vec<ObjectValue>),
    /// Plain ordered mapping (string keys)
    Map(IndexMap<String, ObjectValue>),
    /// Numeric n-dimensional array, row-major
    Array(ArrayD<f64>),
    /// Composite object; clones of the same `Arc` are one shared node
    Object(Arc<ObjectNode>),
}

impl ObjectValue {
    /// Short name of this value's shape, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ObjectValue::Null => "null",
            ObjectValue::Bool(_) => "bool",
            ObjectValue::Int(_) => "int",
            ObjectValue::Float(_) => "float",
            ObjectValue::Str(_) => "string",
            ObjectValue::Seq(_) => "sequence",
            ObjectValue::Map(_) => "mapping",
            ObjectValue::Array(_) => "array",
            ObjectValue::Object(_) => "object",
        }
    }

    /// The composite node, if this value is one.
    pub fn as_object(&self) -> Option<&Arc<ObjectNode>> {
        match self {
            ObjectValue::Object(node) => Some(node),
            _ => None,
        }
    }
}

/// A composite object: a class name plus its attribute dictionary.
///
/// Field order is insertion order and is preserved verbatim by both
/// encodings, with the class tag always written first.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectNode {
    class: String,
    fields: IndexMap<String, ObjectValue>,
}

impl ObjectNode {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            fields: IndexMap::new(),
        }
    }

    /// Builder-style field insertion.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ObjectValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ObjectValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &ObjectValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ObjectValue> {
        self.fields.get(name)
    }

    /// Fails with [`DecodeError::ClassMismatch`] unless this node's class
    /// name is `expected`.
    pub fn expect_class(&self, expected: &str) -> Result<(), DecodeError> {
        if self.class == expected {
            Ok(())
        } else {
            Err(DecodeError::ClassMismatch {
                expected: expected.to_owned(),
                found: self.class.clone(),
            })
        }
    }

    fn field(&self, name: &str) -> Result<&ObjectValue, DecodeError> {
        self.fields.get(name).ok_or_else(|| DecodeError::MissingField {
            class: self.class.clone(),
            field: name.to_owned(),
        })
    }

    fn wrong_type(
        &self,
        name: &str,
        expected: &'static str,
        found: &ObjectValue,
    ) -> DecodeError {
        DecodeError::WrongFieldType {
            class: self.class.clone(),
            field: name.to_owned(),
            expected,
            found: found.kind(),
        }
    }

    pub fn bool_field(&self, name: &str) -> Result<bool, DecodeError> {
        match self.field(name)? {
            ObjectValue::Bool(b) => Ok(*b),
            other => Err(self.wrong_type(name, "bool", other)),
        }
    }

    pub fn int_field(&self, name: &str) -> Result<i64, DecodeError> {
        match self.field(name)? {
            ObjectValue::Int(i) => Ok(*i),
            other => Err(self.wrong_type(name, "int", other)),
        }
    }

    /// Numeric field as `f64`; integers widen.
    pub fn float_field(&self, name: &str) -> Result<f64, DecodeError> {
        match self.field(name)? {
            ObjectValue::Float(f) => Ok(*f),
            ObjectValue::Int(i) => Ok(*i as f64),
            other => Err(self.wrong_type(name, "float", other)),
        }
    }

    pub fn str_field(&self, name: &str) -> Result<&str, DecodeError> {
        match self.field(name)? {
            ObjectValue::Str(s) => Ok(s),
            other => Err(self.wrong_type(name, "string", other)),
        }
    }

    pub fn seq_field(&self, name: &str) -> Result<&[ObjectValue], DecodeError> {
        match self.field(name)? {
            ObjectValue::Seq(items) => Ok(items),
            other => Err(self.wrong_type(name, "sequence", other)),
        }
    }

    pub fn array_field(&self, name: &str) -> Result<&ArrayD<f64>, DecodeError> {
        match self.field(name)? {
            ObjectValue::Array(arr) => Ok(arr),
            other => Err(self.wrong_type(name, "array", other)),
        }
    }

    /// Array field checked to be one-dimensional.
    pub fn array1_field(&self, name: &str) -> Result<Array1<f64>, DecodeError> {
        let arr = self.array_field(name)?;
        arr.clone()
            .into_dimensionality::<Ix1>()
            .map_err(|_| self.dim_error(name, "1-d array"))
    }

    /// Array field checked to be two-dimensional.
    pub fn array2_field(&self, name: &str) -> Result<Array2<f64>, DecodeError> {
        let arr = self.array_field(name)?;
        arr.clone()
            .into_dimensionality::<Ix2>()
            .map_err(|_| self.dim_error(name, "2-d array"))
    }

    pub fn object_field(&self, name: &str) -> Result<&Arc<ObjectNode>, DecodeError> {
        match self.field(name)? {
            ObjectValue::Object(node) => Ok(node),
            other => Err(self.wrong_type(name, "object", other)),
        }
    }

    fn dim_error(&self, name: &str, expected: &'static str) -> DecodeError {
        DecodeError::WrongFieldType {
            class: self.class.clone(),
            field: name.to_owned(),
            expected,
            found: "array",
        }
    }
}

impl From<ObjectNode> for ObjectValue {
    fn from(node: ObjectNode) -> Self {
        ObjectValue::Object(Arc::new(node))
    }
}

impl From<Arc<ObjectNode>> for ObjectValue {
    fn from(node: Arc<ObjectNode>) -> Self {
        ObjectValue::Object(node)
    }
}

impl From<bool> for ObjectValue {
    fn from(b: bool) -> Self {
        ObjectValue::Bool(b)
    }
}

impl From<i64> for ObjectValue {
    fn from(i: i64) -> Self {
        ObjectValue::Int(i)
    }
}

impl From<f64> for ObjectValue {
    fn from(f: f64) -> Self {
        ObjectValue::Float(f)
    }
}

impl From<&str> for ObjectValue {
    fn from(s: &str) -> Self {
        ObjectValue::Str(s.to_owned())
    }
}

impl From<String> for ObjectValue {
    fn from(s: String) -> Self {
        ObjectValue::Str(s)
    }
}

impl From<Vec<ObjectValue>> for ObjectValue {
    fn from(items: Vec<ObjectValue>) -> Self {
        ObjectValue::Seq(items)
    }
}

impl From<IndexMap<String, ObjectValue>> for ObjectValue {
    fn from(map: IndexMap<String, ObjectValue>) -> Self {
        ObjectValue::Map(map)
    }
}

impl From<ArrayD<f64>> for ObjectValue {
    fn from(arr: ArrayD<f64>) -> Self {
        ObjectValue::Array(arr)
    }
}

impl From<Array1<f64>> for ObjectValue {
    fn from(arr: Array1<f64>) -> Self {
        ObjectValue::Array(arr.into_dyn())
    }
}

impl From<Array2<f64>> for ObjectValue {
    fn from(arr: Array2<f64>) -> Self {
        ObjectValue::Array(arr.into_dyn())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn field_order_is_insertion_order() {
        let node = ObjectNode::new("T").with("b", 1i64).with("a", 2i64);
        let names: Vec<&str> = node.fields().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn typed_field_accessors() {
        let node = ObjectNode::new("T")
            .with("tau", 0.5f64)
            .with("n", 3i64)
            .with("name", "traj")
            .with("xs", array![1.0, 2.0]);

        assert_eq!(node.float_field("tau").unwrap(), 0.5);
        assert_eq!(node.float_field("n").unwrap(), 3.0);
        assert_eq!(node.str_field("name").unwrap(), "traj");
        assert_eq!(node.array1_field("xs").unwrap(), array![1.0, 2.0]);

        assert!(matches!(
            node.float_field("missing"),
            Err(DecodeError::MissingField { .. })
        ));
        assert!(matches!(
            node.int_field("name"),
            Err(DecodeError::WrongFieldType { .. })
        ));
    }

    #[test]
    fn shared_nodes_compare_structurally() {
        let shared = Arc::new(ObjectNode::new("P").with("w", 1.0f64));
        let a = ObjectValue::Object(shared.clone());
        let b = ObjectValue::Object(Arc::new(ObjectNode::new("P").with("w", 1.0f64)));
        assert_eq!(a, b);
        assert_eq!(a, ObjectValue::Object(shared));
    }
}
