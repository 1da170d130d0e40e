//! Configuration model for the locker client.
//!
//! Configuration is read from an optional YAML file. Unknown fields are
//! ignored for forward compatibility and every field has a default, so an
//! empty file is valid.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::Config;
