//! Applying a compiled [`Pattern`] to input text.

use crate::compiler::Pattern;
use crate::synth::DecodeError;
use crate::value::Value;
use std::collections::HashMap;
use thiserror::Error;
use tracing::trace;

#[derive(Error, Debug)]
pub enum MatchError {
    /// The regex engine gave up. Only templates with a repeated label use
    /// the backtracking engine, and it stops after a fixed step budget.
    #[error("pattern matching failed: {0}")]
    Regex(#[from] fancy_regex::Error),
    #[error("failed to decode '{text}' for label '{label}': {source}")]
    Decode {
        label: String,
        text: String,
        #[source]
        source: DecodeError,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult {
    Match(HashMap<String, Value>),
    NoMatch,
}

impl MatchResult {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchResult::Match(_))
    }

    pub fn into_option(self) -> Option<HashMap<String, Value>> {
        match self {
            MatchResult::Match(values) => Some(values),
            MatchResult::NoMatch => None,
        }
    }
}

/// Whether matched text is run through each label's decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Decode {
    #[default]
    Typed,
    /// Every value is the matched substring as a [`Value::String`].
    Raw,
}

impl Pattern {
    pub fn is_match(&self, input: &str) -> Result<bool, MatchError> {
        Ok(self.regex().is_match(input)?)
    }

    pub fn match_extract(&self, input: &str) -> Result<MatchResult, MatchError> {
        self.match_with(input, Decode::Typed)
    }

    pub fn match_raw(&self, input: &str) -> Result<MatchResult, MatchError> {
        self.match_with(input, Decode::Raw)
    }

    pub fn match_with(&self, input: &str, decode: Decode) -> Result<MatchResult, MatchError> {
        let Some(caps) = self.regex().captures(input)? else {
            return Ok(MatchResult::NoMatch);
        };

        let mut values = HashMap::with_capacity(self.fields.len());
        for field in &self.fields {
            // Every group sits outside any alternation, so it always participates.
            let text = caps.name(&field.group).map_or("", |m| m.as_str());
            trace!(label = %field.label, text = %text, "captured");

            let value = match decode {
                Decode::Raw => Value::String(text.to_string()),
                Decode::Typed => {
                    field
                        .decoder
                        .decode(text)
                        .map_err(|source| MatchError::Decode {
                            label: field.label.clone(),
                            text: text.to_string(),
                            source,
                        })?
                }
            };
            values.insert(field.label.clone(), value);
        }

        Ok(MatchResult::Match(values))
    }
}
