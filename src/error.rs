//! Error type shared by the schema compiler and the argument session.

use thiserror::Error;

/// What went wrong while compiling a schema or scanning arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A flag character in the arguments is not declared by the schema.
    UnexpectedFlag,
    /// A string (or string-array) flag had no following token.
    MissingString,
    /// An integer flag's token could not be parsed.
    InvalidInteger,
    /// An integer flag had no following token.
    MissingInteger,
    /// A double flag's token could not be parsed.
    InvalidDouble,
    /// A double flag had no following token.
    MissingDouble,
    /// A schema element does not start with a letter.
    InvalidFlagName,
    /// A schema element has an unknown format suffix.
    InvalidSchemaFormat,
}

impl ErrorKind {
    /// Whether this kind is raised while compiling the schema (as opposed
    /// to while scanning arguments).
    pub fn is_schema_error(self) -> bool {
        matches!(self, ErrorKind::InvalidFlagName | ErrorKind::InvalidSchemaFormat)
    }
}

/// A single parse failure with its positional context.
///
/// Argument-level errors returned by [`Args::new`](crate::Args::new) always
/// carry the flag that triggered them. `parameter` holds the raw token (or
/// the raw schema suffix) where the kind has one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render(.kind, .flag, .parameter))]
pub struct ArgsError {
    kind: ErrorKind,
    flag: Option<char>,
    parameter: Option<String>,
}

impl ArgsError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            flag: None,
            parameter: None,
        }
    }

    pub fn with_parameter(kind: ErrorKind, parameter: impl Into<String>) -> Self {
        Self {
            kind,
            flag: None,
            parameter: Some(parameter.into()),
        }
    }

    /// Attach the flag that triggered this error.
    pub fn for_flag(mut self, flag: char) -> Self {
        self.flag = Some(flag);
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn flag(&self) -> Option<char> {
        self.flag
    }

    pub fn parameter(&self) -> Option<&str> {
        self.parameter.as_deref()
    }
}

fn render(kind: &ErrorKind, flag: &Option<char>, parameter: &Option<String>) -> String {
    let flag = flag.unwrap_or('?');
    let parameter = parameter.as_deref().unwrap_or("");

    match kind {
        ErrorKind::UnexpectedFlag => format!("Argument -{} unexpected.", flag),
        ErrorKind::MissingString => format!("Could not find string parameter for -{}.", flag),
        ErrorKind::InvalidInteger => format!(
            "Argument -{} expects an integer but was '{}'.",
            flag, parameter
        ),
        ErrorKind::MissingInteger => format!("Could not find integer parameter for -{}.", flag),
        ErrorKind::InvalidDouble => {
            format!("Argument -{} expects a double but was '{}'.", flag, parameter)
        }
        ErrorKind::MissingDouble => format!("Could not find double parameter for -{}.", flag),
        ErrorKind::InvalidFlagName => format!("'{}' is not a valid flag name.", flag),
        ErrorKind::InvalidSchemaFormat => format!(
            "'{}' is not a valid flag format for -{}.",
            parameter, flag
        ),
    }
}
