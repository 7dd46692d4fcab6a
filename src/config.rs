//! JSON configuration for the `argschema` command-line front end.

use crate::error::ArgsError;
use crate::schema::Schema;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

/// Prefix used for exported variables when none is configured.
pub const DEFAULT_PREFIX: &str = "ARGS_";

/// Errors that can occur during config parsing and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse JSON config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("invalid schema: {0}")]
    Schema(#[from] ArgsError),

    #[error("invalid name key '{0}': must be a single flag character")]
    InvalidNameKey(String),

    #[error("name given for undeclared flag '{0}'")]
    UnknownFlag(char),

    #[error("invalid variable name '{0}': must be letters, digits, or underscores")]
    InvalidVariableName(String),

    #[error("duplicate variable name: {0}")]
    DuplicateName(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Schema string, e.g. `"l,p#,d##"`
    pub schema: String,
    /// Variable prefix for exports (default: "ARGS_")
    pub prefix: Option<String>,
    /// Variable names for flags, keyed by flag character
    #[serde(default)]
    pub names: BTreeMap<String, String>,
}

impl Config {
    /// Parse a JSON string into a Config.
    pub fn from_json(json: &str) -> Result<Config, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Build a config around a bare schema string.
    pub fn from_schema(schema: impl Into<String>) -> Config {
        Config {
            schema: schema.into(),
            prefix: None,
            names: BTreeMap::new(),
        }
    }

    /// Validate the configuration and return the compiled schema.
    pub fn validate(&self) -> Result<Schema, ConfigError> {
        let schema = Schema::compile(&self.schema)?;

        for key in self.names.keys() {
            let flag = single_char(key).ok_or_else(|| ConfigError::InvalidNameKey(key.clone()))?;
            if !schema.contains(flag) {
                return Err(ConfigError::UnknownFlag(flag));
            }
        }

        let prefix = self.effective_prefix();
        let mut seen = HashSet::new();
        for (flag, _) in schema.elements() {
            let var = format!("{}{}", prefix, self.variable_name(flag));
            if !is_shell_identifier(&var) {
                return Err(ConfigError::InvalidVariableName(var));
            }
            if !seen.insert(var.clone()) {
                return Err(ConfigError::DuplicateName(var));
            }
        }

        Ok(schema)
    }

    /// Get the effective prefix, using the default if none is set.
    pub fn effective_prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or(DEFAULT_PREFIX)
    }

    /// Variable name (without prefix) for a flag.
    ///
    /// Configured names are uppercased with hyphens turned into
    /// underscores; unnamed flags use the flag character as-is.
    pub fn variable_name(&self, flag: char) -> String {
        let mut key = [0; 4];
        match self.names.get(flag.encode_utf8(&mut key) as &str) {
            Some(name) => name.to_uppercase().replace('-', "_"),
            None => flag.to_string(),
        }
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn is_shell_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
