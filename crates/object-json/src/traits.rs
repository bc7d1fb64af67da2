//! Conversion traits between domain types and the value model.
//!
//! Composite types opt in explicitly: [`ToObject`] enumerates a type's
//! fields in a fixed order (the order both encodings write them in), and
//! [`FromObject`] revives a typed value from a decoded node. A type that
//! wants a sub-object shared across several fields keeps it behind an `Arc`
//! and hands out clones of the same [`ObjectValue::Object`] — the graph
//! codec preserves that identity.

use std::sync::Arc;

use crate::error::DecodeError;
use crate::value::{ObjectNode, ObjectValue};

/// Conversion into a composite node.
pub trait ToObject {
    /// Unqualified type name written as the class tag.
    fn class_name(&self) -> &'static str;

    /// The attribute dictionary, in the order it is serialized.
    fn fields(&self) -> Vec<(&'static str, ObjectValue)>;

    /// Assemble the composite node for this value.
    fn to_object(&self) -> ObjectValue {
        let mut node = ObjectNode::new(self.class_name());
        for (name, value) in self.fields() {
            node.set(name, value);
        }
        ObjectValue::Object(Arc::new(node))
    }
}

/// Typed revival from a decoded composite node.
///
/// Implementations must reject nodes of a foreign class with
/// [`DecodeError::ClassMismatch`] (see [`ObjectNode::expect_class`]).
pub trait FromObject: Sized {
    fn from_node(node: &ObjectNode) -> Result<Self, DecodeError>;
}
