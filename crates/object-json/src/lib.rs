//! Object-graph JSON serialization for primo.
//!
//! One codec, two encodings:
//!
//! - the **primary** encoding is reference-preserving JSON used for save/load
//!   round trips — shared sub-objects are written once and referenced by id;
//! - the optional **C++ export** is plain class-tagged JSON for the
//!   `nlohmann::json` reader on the C++ side — reference-free, arrays as
//!   nested lists, pretty-printed.
//!
//! # Example
//!
//! ```
//! use primo_object_json::{load, save, ObjectNode, ObjectValue, SaveOptions};
//! use ndarray::array;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("trajectory.json");
//!
//! let root: ObjectValue = ObjectNode::new("Trajectory")
//!     .with("tau", 0.5)
//!     .with("ys", array![[0.0, 0.0], [0.5, 0.1], [1.0, 0.0]])
//!     .into();
//!
//! save(&root, &path, SaveOptions::new()).unwrap();
//! assert_eq!(load(&path).unwrap(), root);
//! ```

mod cpp_json;
mod error;
mod graph_json;
mod save_load;
mod traits;
mod value;

pub use cpp_json::{cpp_export_path, encode_cpp};
pub use error::{DecodeError, EncodeError, LoadError, SaveError};
pub use graph_json::{decode_graph, encode_graph};
pub use save_load::{load, load_as, save, SaveOptions};
pub use traits::{FromObject, ToObject};
pub use value::{ObjectNode, ObjectValue};
