//! Argument scanning against a compiled schema.

use crate::cursor::ArgumentCursor;
use crate::error::{ArgsError, ErrorKind};
use crate::marshaler::{Marshaler, Value};
use crate::schema::Schema;
use indexmap::{IndexMap, IndexSet};
use tracing::debug;

/// A parsed invocation.
///
/// Construction scans every leading flag cluster and stops at the first
/// token that does not start with `-`. Getters never fail: asking for a
/// flag with the wrong type, or one that was not given, yields the zero
/// value of the requested type.
#[derive(Debug, Clone)]
pub struct Args {
    marshalers: IndexMap<char, Marshaler>,
    found: IndexSet<char>,
    next_argument: usize,
    remaining: Vec<String>,
}

impl Args {
    /// Compile `schema` and parse `args` against it.
    pub fn new(schema: &str, args: &[String]) -> Result<Args, ArgsError> {
        let schema = Schema::compile(schema)?;
        Args::with_schema(&schema, args)
    }

    /// Parse `args` against an already compiled schema.
    pub fn with_schema(schema: &Schema, args: &[String]) -> Result<Args, ArgsError> {
        let mut parser = Parser::new(schema);
        let mut cursor = ArgumentCursor::new(args);
        parser.parse(&mut cursor)?;

        Ok(Args {
            marshalers: parser.marshalers,
            found: parser.found,
            next_argument: cursor.position(),
            remaining: cursor.remaining().to_vec(),
        })
    }

    /// Whether `flag` appeared in a flag cluster.
    pub fn has(&self, flag: char) -> bool {
        self.found.contains(&flag)
    }

    pub fn get_boolean(&self, flag: char) -> bool {
        self.marshalers.get(&flag).is_some_and(Marshaler::as_bool)
    }

    pub fn get_string(&self, flag: char) -> &str {
        self.marshalers.get(&flag).map_or("", Marshaler::as_str)
    }

    pub fn get_int(&self, flag: char) -> i32 {
        self.marshalers.get(&flag).map_or(0, Marshaler::as_int)
    }

    pub fn get_double(&self, flag: char) -> f64 {
        self.marshalers.get(&flag).map_or(0.0, Marshaler::as_double)
    }

    pub fn get_string_array(&self, flag: char) -> &[String] {
        self.marshalers
            .get(&flag)
            .map(Marshaler::as_string_array)
            .unwrap_or_default()
    }

    /// Number of distinct flags found.
    pub fn cardinality(&self) -> usize {
        self.found.len()
    }

    /// Flags found, in the order first seen.
    pub fn found_flags(&self) -> impl Iterator<Item = char> + '_ {
        self.found.iter().copied()
    }

    /// Index into the original arguments of the first token that was not
    /// consumed while scanning flags.
    pub fn next_argument(&self) -> usize {
        self.next_argument
    }

    /// Tokens from `next_argument` on.
    pub fn remaining(&self) -> &[String] {
        &self.remaining
    }

    /// Every declared flag in schema order with its current value.
    pub fn values(&self) -> impl Iterator<Item = (char, Value)> + '_ {
        self.marshalers
            .iter()
            .map(|(flag, marshaler)| (*flag, marshaler.value()))
    }
}

/// Internal parser state.
struct Parser {
    marshalers: IndexMap<char, Marshaler>,
    found: IndexSet<char>,
}

impl Parser {
    fn new(schema: &Schema) -> Self {
        Self {
            marshalers: schema.marshalers(),
            found: IndexSet::new(),
        }
    }

    fn parse(&mut self, cursor: &mut ArgumentCursor<'_>) -> Result<(), ArgsError> {
        while let Some(token) = cursor.next_token() {
            match token.strip_prefix('-') {
                Some(cluster) => {
                    debug!(cluster = %token, "scanning flag cluster");
                    self.parse_cluster(cluster, cursor)?;
                }
                None => {
                    cursor.retreat();
                    break;
                }
            }
        }

        debug!(next_argument = cursor.position(), "flag scan finished");
        Ok(())
    }

    fn parse_cluster(
        &mut self,
        cluster: &str,
        cursor: &mut ArgumentCursor<'_>,
    ) -> Result<(), ArgsError> {
        for flag in cluster.chars() {
            self.parse_flag(flag, cursor)?;
        }
        Ok(())
    }

    fn parse_flag(&mut self, flag: char, cursor: &mut ArgumentCursor<'_>) -> Result<(), ArgsError> {
        let marshaler = self
            .marshalers
            .get_mut(&flag)
            .ok_or_else(|| ArgsError::new(ErrorKind::UnexpectedFlag).for_flag(flag))?;

        self.found.insert(flag);
        marshaler.set(cursor).map_err(|err| err.for_flag(flag))
    }
}
