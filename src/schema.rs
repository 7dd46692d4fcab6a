//! Schema compilation: `"l,p#,d##,n*,f[*]"` into typed flag declarations.

use crate::error::{ArgsError, ErrorKind};
use crate::marshaler::{Marshaler, ValueKind};
use indexmap::IndexMap;
use std::str::FromStr;
use tracing::{debug, warn};

/// A compiled schema: flag characters mapped to their value kinds, in the
/// order they were first declared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    elements: IndexMap<char, ValueKind>,
}

impl Schema {
    /// Compile a comma-separated schema string.
    ///
    /// Elements are trimmed and empty elements are skipped. A flag declared
    /// twice keeps the last suffix.
    pub fn compile(text: &str) -> Result<Schema, ArgsError> {
        let mut elements = IndexMap::new();

        for element in text.split(',').map(str::trim) {
            let mut chars = element.chars();
            let Some(flag) = chars.next() else {
                continue;
            };
            let kind = parse_element(flag, chars.as_str())?;
            debug!(flag = %flag, kind = %kind, "compiled schema element");
            if let Some(previous) = elements.insert(flag, kind) {
                warn!(
                    flag = %flag,
                    previous = %previous,
                    kind = %kind,
                    "flag declared twice, last declaration wins"
                );
            }
        }

        Ok(Schema { elements })
    }

    /// Flags and their kinds in declaration order.
    pub fn elements(&self) -> impl Iterator<Item = (char, ValueKind)> + '_ {
        self.elements.iter().map(|(flag, kind)| (*flag, *kind))
    }

    pub fn kind_of(&self, flag: char) -> Option<ValueKind> {
        self.elements.get(&flag).copied()
    }

    pub fn contains(&self, flag: char) -> bool {
        self.elements.contains_key(&flag)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Build a fresh marshaler for every declared flag.
    pub(crate) fn marshalers(&self) -> IndexMap<char, Marshaler> {
        self.elements
            .iter()
            .map(|(flag, kind)| (*flag, Marshaler::new(*kind)))
            .collect()
    }
}

impl FromStr for Schema {
    type Err = ArgsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Schema::compile(s)
    }
}

fn parse_element(flag: char, suffix: &str) -> Result<ValueKind, ArgsError> {
    if !flag.is_alphabetic() {
        return Err(ArgsError::new(ErrorKind::InvalidFlagName).for_flag(flag));
    }

    ValueKind::from_suffix(suffix).ok_or_else(|| {
        ArgsError::with_parameter(ErrorKind::InvalidSchemaFormat, suffix).for_flag(flag)
    })
}
