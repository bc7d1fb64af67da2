//! File-level save/load surface.
//!
//! `save` writes the reference-preserving encoding to the given path and,
//! when asked, a second class-tagged file next to it for the C++ reader.
//! `load` reads only the reference-preserving encoding back. Files are
//! overwritten unconditionally; there is no retry and no rollback — if the
//! export step fails after the primary write, the primary file stays on
//! disk.

use std::fs;
use std::path::Path;

use crate::cpp_json::{cpp_export_path, encode_cpp};
use crate::error::{DecodeError, LoadError, SaveError};
use crate::graph_json::{decode_graph, encode_graph};
use crate::traits::FromObject;
use crate::value::ObjectValue;

/// Options for [`save`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveOptions {
    /// Also write the class-tagged export next to the primary file.
    pub cpp_export: bool,
}

impl SaveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with the C++ export enabled.
    pub fn with_cpp_export() -> Self {
        Self { cpp_export: true }
    }
}

/// Serialize `root` to `path`, overwriting any existing file.
///
/// With [`SaveOptions::cpp_export`] set, a second file is written to
/// [`cpp_export_path`]`(path)` in the class-tagged export encoding.
pub fn save(
    root: &ObjectValue,
    path: impl AsRef<Path>,
    options: SaveOptions,
) -> Result<(), SaveError> {
    let path = path.as_ref();
    let text = encode_graph(root)?;
    fs::write(path, text)?;

    if options.cpp_export {
        let text = encode_cpp(root)?;
        fs::write(cpp_export_path(path), text)?;
    }
    Ok(())
}

/// Load an object graph from a file written by [`save`].
pub fn load(path: impl AsRef<Path>) -> Result<ObjectValue, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })?;
    Ok(decode_graph(&text)?)
}

/// Load and revive a typed root object.
///
/// Fails with [`DecodeError::RootNotAnObject`] when the file's root is not
/// a composite, and with whatever the type's [`FromObject`] impl reports
/// (typically [`DecodeError::ClassMismatch`]) when it is the wrong one.
pub fn load_as<T: FromObject>(path: impl AsRef<Path>) -> Result<T, LoadError> {
    match load(path)? {
        ObjectValue::Object(node) => Ok(T::from_node(&node)?),
        other => Err(LoadError::Decode(DecodeError::RootNotAnObject(
            other.kind(),
        ))),
    }
}
