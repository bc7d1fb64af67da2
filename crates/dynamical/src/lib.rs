//! Dynamical systems and function approximation for primo.
//!
//! The concrete types here are the objects the serialization layer exists
//! for: every one of them implements
//! [`ToObject`](primo_object_json::ToObject) /
//! [`FromObject`](primo_object_json::FromObject), so a trained system can be
//! saved with [`primo_object_json::save`], loaded back typed with
//! [`primo_object_json::load_as`], or exported for the C++ reader.
//!
//! # Example
//!
//! ```
//! use ndarray::array;
//! use primo_dynamical::{DynamicalSystem, ExponentialSystem};
//! use primo_object_json::{load_as, save, SaveOptions, ToObject};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("exponential.json");
//!
//! let system = ExponentialSystem::new(1.0, array![0.0, 1.0], array![1.0, 0.0], 6.0);
//! save(&system.to_object(), &path, SaveOptions::new()).unwrap();
//!
//! let back: ExponentialSystem = load_as(&path).unwrap();
//! assert_eq!(back, system);
//! ```

mod exponential;
mod rbfn;
mod spring_damper;
mod system;

pub use exponential::ExponentialSystem;
pub use rbfn::{FunctionApproximatorRBFN, ModelParametersRBFN};
pub use spring_damper::SpringDamperSystem;
pub use system::{dynamical_system_from_node, DynamicalSystem};
