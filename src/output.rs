//! Rendering parsed arguments as sourceable shell exports or JSON.

use crate::config::Config;
use crate::marshaler::Value;
use crate::parser::Args;
use anyhow::Result;
use indexmap::IndexMap;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Quote a string as a single shell word.
///
/// The value is wrapped in single quotes, inside which the shell takes
/// every character literally (including `$`, `!` and newlines). An
/// embedded `'` closes the quote, adds an escaped quote, and reopens it.
fn quote_shell_value(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        match c {
            '\'' => quoted.push_str("'\\''"),
            _ => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

fn shell_value(value: &Value) -> String {
    match value {
        Value::Boolean(b) => b.to_string(),
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Double(d) => d.to_string(),
        Value::StringArray(items) => items.join(" "),
    }
}

/// Render the parsed arguments as export statements.
///
/// One line per declared flag in schema order, followed by a `set --` line
/// that makes the unconsumed tokens the script's positional parameters.
pub fn generate_exports_string(args: &Args, config: &Config) -> String {
    let prefix = config.effective_prefix();
    let mut output = String::new();

    for (flag, value) in args.values() {
        let var_name = format!("{}{}", prefix, config.variable_name(flag));
        let quoted_value = quote_shell_value(&shell_value(&value));
        output.push_str(&format!("export {}={}\n", var_name, quoted_value));
    }

    output.push_str("set --");
    for token in args.remaining() {
        output.push(' ');
        output.push_str(&quote_shell_value(token));
    }
    output.push('\n');

    output
}

/// Write the export statements to a temporary file.
///
/// Returns the path to the temporary file. The file will persist
/// until it's manually deleted.
pub fn generate_exports(args: &Args, config: &Config) -> Result<PathBuf> {
    write_temp_file(&generate_exports_string(args, config))
}

/// JSON view of a parsed invocation.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub flags: IndexMap<String, Value>,
    pub found: Vec<String>,
    pub rest: &'a [String],
}

impl<'a> Report<'a> {
    pub fn new(args: &'a Args) -> Self {
        Self {
            flags: args
                .values()
                .map(|(flag, value)| (flag.to_string(), value))
                .collect(),
            found: args.found_flags().map(|flag| flag.to_string()).collect(),
            rest: args.remaining(),
        }
    }
}

/// Render the parsed arguments as pretty-printed JSON.
pub fn generate_json_string(args: &Args) -> Result<String> {
    Ok(serde_json::to_string_pretty(&Report::new(args))?)
}

/// Generate an error output file.
///
/// When sourced, the file will print the error message to stderr and exit 1.
pub fn generate_error_output(message: &str) -> Result<PathBuf> {
    write_temp_file(&generate_error_string(message))
}

/// Generate an error output as a string (for testing).
pub fn generate_error_string(message: &str) -> String {
    let quoted = quote_shell_value(&format!("argschema: {}", message));
    format!("printf '%s\\n' {} >&2\nexit 1\n", quoted)
}

/// Write content to a temporary file and return its path.
fn write_temp_file(content: &str) -> Result<PathBuf> {
    let mut file = NamedTempFile::new()?;
    file.write_all(content.as_bytes())?;
    let path = file.into_temp_path().keep()?;
    Ok(path)
}
