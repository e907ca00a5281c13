//! Template compilation: one anchored aggregate regex plus a decoder per
//! distinct label.

use crate::error::CompileError;
use crate::spec::{self, Fields, FormatSpec};
use crate::synth::{self, Decoder};
use crate::template::{parse_segments, Placeholder, Segment};
use fancy_regex::{Regex, RegexBuilder};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

// Back-references force fancy-regex onto its backtracking engine, whose
// default budget (one million steps) is exhausted by a repeated label over
// a few kilobytes of input.
const BACKTRACK_LIMIT: usize = 100_000_000;

/// The capture group owned by the first occurrence of a label.
#[derive(Debug, Clone)]
pub(crate) struct CompiledField {
    pub(crate) label: String,
    pub(crate) group: String,
    pub(crate) decoder: Decoder,
}

/// A compiled template.
///
/// Immutable once built, so one `Pattern` can be shared between threads and
/// matched against any number of inputs.
///
/// # Example
///
/// ```
/// use unformat::{MatchResult, Pattern, Value};
///
/// let pattern = Pattern::compile("{name} is {age:d} years old").unwrap();
/// let MatchResult::Match(values) = pattern.match_extract("Ada is 36 years old").unwrap() else {
///     panic!("expected a match");
/// };
/// assert_eq!(values["name"], Value::from("Ada"));
/// assert_eq!(values["age"], Value::Int(36));
/// ```
#[derive(Debug, Clone)]
pub struct Pattern {
    template: String,
    regex: Regex,
    pub(crate) fields: Vec<CompiledField>,
}

impl Pattern {
    pub fn compile(template: &str) -> Result<Self, CompileError> {
        let segments = parse_segments(template)?;

        let mut regex_str = String::from("(?s)^");
        let mut fields: Vec<CompiledField> = Vec::new();
        // label -> (group name, spec of the first occurrence)
        let mut seen: HashMap<&str, (String, Option<&str>)> = HashMap::new();

        for segment in &segments {
            match segment {
                Segment::Literal(text) => regex_str.push_str(&fancy_regex::escape(text)),
                Segment::Placeholder(Placeholder { label, spec }) => {
                    if let Some((group, first_spec)) = seen.get(label.as_str()) {
                        if *first_spec != spec.as_deref() {
                            debug!(
                                label = %label,
                                spec = ?spec,
                                "ignoring format spec of repeated label"
                            );
                        }
                        regex_str.push_str(&format!(r"\k<{group}>"));
                        continue;
                    }

                    let format_spec = match spec {
                        Some(text) => spec::parse(text)?,
                        None => FormatSpec::Fields(Fields::default()),
                    };
                    let field = synth::synthesize(&format_spec)?;
                    let group = format!("f{}", fields.len());
                    trace!(label = %label, group = %group, pattern = %field.pattern, "synthesized field");

                    regex_str.push_str(&format!("(?P<{group}>{})", field.pattern));
                    seen.insert(label.as_str(), (group.clone(), spec.as_deref()));
                    fields.push(CompiledField {
                        label: label.clone(),
                        group,
                        decoder: field.decoder,
                    });
                }
            }
        }
        regex_str.push('$');

        let regex = RegexBuilder::new(&regex_str)
            .backtrack_limit(BACKTRACK_LIMIT)
            .build()?;
        debug!(template = %template, pattern = %regex_str, "compiled template");

        Ok(Pattern {
            template: template.to_string(),
            regex,
            fields,
        })
    }

    /// The aggregate regular expression.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Distinct labels in order of first appearance.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.label.as_str())
    }

    pub(crate) fn regex(&self) -> &Regex {
        &self.regex
    }
}

impl FromStr for Pattern {
    type Err = CompileError;

    fn from_str(template: &str) -> Result<Self, Self::Err> {
        Pattern::compile(template)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

/// Compile `template` into a [`Pattern`].
pub fn compile(template: &str) -> Result<Pattern, CompileError> {
    Pattern::compile(template)
}
