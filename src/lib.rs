//! # auto-typecast: Record Typecast Filter
//!
//! Converts string leaves of a structured record that look like numbers,
//! booleans or null markers into typed values, leaving everything else as
//! it was.
//!
//! ## Features
//!
//! - **Classifier**: fixed literal rules for numeric, boolean and null text
//! - **Depth-bounded walk**: maps and lists are visited up to `maxdepth` levels (0 = unlimited)
//! - **Ignored keys**: entries whose key matches a regex keep their original value
//! - **Filter seam**: plugs into a host pipeline through the `RecordFilter` trait
//!
//! ## Example
//!
//! ```rust
//! use auto_typecast::{Typecaster, Value};
//! use serde_json::json;
//!
//! let caster = Typecaster::builder().unlimited_depth().build().unwrap();
//! let record = Value::from(json!({"k": ["0", "0.1", ["true", "nil"]]}));
//!
//! assert_eq!(caster.filter(record), Value::from(json!({"k": [0, 0.1, [true, null]]})));
//! ```
//!
//! ## Example: config file
//!
//! ```yaml
//! maxdepth: 3
//! ignore_key_regexp: "^(id|zip)$"
//! ```

// Core modules
pub mod value;
pub mod classifier;
pub mod typecast;

// Configuration and errors
pub mod config;
pub mod error;

// Pipeline integration
pub mod filter;
pub mod serialization;

// Re-export key types
pub use value::{Map, Value};
pub use classifier::{classify, Classification, Number};
pub use typecast::{Typecaster, TypecasterBuilder, DEFAULT_MAX_DEPTH, DISABLED_MAX_DEPTH};
pub use config::TypecastConfig;
pub use error::ConfigError;
pub use filter::{FilterChain, FnFilter, RecordFilter, AUTO_TYPECAST};
pub use serialization::{NdjsonReader, NdjsonWriter, SerializationError};
