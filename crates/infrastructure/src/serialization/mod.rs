//! JSON serialization for persisted files: 2-space indentation, a trailing
//! newline and UTF-8 without BOM.

mod json;

pub use json::*;
