//! Error types for encoding, decoding, and the save/load file surface.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for both encoders.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// NaN and infinities have no JSON representation.
    #[error("non-finite float {0} has no JSON representation")]
    NonFiniteFloat(f64),
    /// Field or mapping key that would collide with a marker key.
    #[error("key `{0}` collides with a reserved marker key")]
    ReservedKey(String),
    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error type for decoding the reference-preserving encoding.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("`$ref` {0} does not resolve to an already-decoded node")]
    UnresolvedRef(u64),
    #[error("duplicate node id {0}")]
    DuplicateId(u64),
    #[error("malformed `{0}` marker")]
    BadMarker(String),
    #[error("array data length {actual} does not match shape {shape:?}")]
    ShapeMismatch { shape: Vec<usize>, actual: usize },
    #[error("`{class}` has no field `{field}`")]
    MissingField { class: String, field: String },
    #[error("field `{field}` of `{class}` is {found}, expected {expected}")]
    WrongFieldType {
        class: String,
        field: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("expected class `{expected}`, found `{found}`")]
    ClassMismatch { expected: String, found: String },
    #[error("unknown class `{0}`")]
    UnknownClass(String),
    #[error("root value is {0}, expected an object")]
    RootNotAnObject(&'static str),
}

/// Error type for [`save`](crate::save).
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to write file: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Error type for [`load`](crate::load).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
