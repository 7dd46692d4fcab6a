//! argschema - schema-driven short-flag argument parsing.
//!
//! A compact schema string such as `"l,p#,d##,n*,f[*]"` declares which
//! single-character flags are legal and what type of value each carries.
//! [`Args`] scans an argument vector against it and exposes typed getters,
//! failing fast with a structured [`ArgsError`] on malformed input.

pub mod config;
pub mod cursor;
pub mod error;
pub mod marshaler;
pub mod output;
pub mod parser;
pub mod schema;

pub use config::{Config, ConfigError};
pub use cursor::ArgumentCursor;
pub use error::{ArgsError, ErrorKind};
pub use marshaler::{Marshaler, Value, ValueKind};
pub use output::{generate_error_output, generate_exports, generate_json_string};
pub use parser::Args;
pub use schema::Schema;
