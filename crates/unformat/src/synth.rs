//! Sub-pattern and decoder synthesis for a single placeholder.
//!
//! Every format spec yields a pair: the regex fragment that matches what a
//! formatter could have written for it, and a [`Decoder`] that undoes the
//! formatting (fill, grouping, base) on the matched text.

use crate::datetime;
use crate::error::CompileError;
use crate::spec::{Align, Fields, FormatSpec, FormatType, Grouping, Sign};
use crate::value::Value;
use std::borrow::Cow;
use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("invalid integer: {0}")]
    Integer(#[from] ParseIntError),
    #[error("invalid float: {0}")]
    Float(#[from] ParseFloatError),
    #[error("invalid date/time: {0}")]
    DateTime(#[from] jiff::Error),
}

/// A compiled placeholder body: its sub-pattern and how to decode a match.
#[derive(Debug, Clone)]
pub(crate) struct Field {
    pub(crate) pattern: String,
    pub(crate) decoder: Decoder,
}

/// Which side(s) of the matched text carry fill characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Trim {
    None,
    Start(char),
    End(char),
    Both(char),
}

impl Trim {
    // Without a width nothing was padded, so fill at the edges is part of
    // the value.
    fn for_fields(fields: &Fields) -> Trim {
        if fields.width.is_none() {
            return Trim::None;
        }
        let fill = fields.fill.unwrap_or(' ');
        match fields.align {
            Some(Align::Left) => Trim::End(fill),
            Some(Align::Center) => Trim::Both(fill),
            Some(Align::Right) | None => Trim::Start(fill),
        }
    }

    fn apply(self, text: &str) -> &str {
        let trimmed = match self {
            Trim::None => return text,
            Trim::Start(fill) => text.trim_start_matches(fill),
            Trim::End(fill) => text.trim_end_matches(fill),
            Trim::Both(fill) => text.trim_matches(fill),
        };
        if trimmed.is_empty() && !text.is_empty() {
            // The value itself is a fill character, e.g. `0` padded with `0`.
            let last = text.char_indices().last().map_or(0, |(i, _)| i);
            return &text[last..];
        }
        trimmed
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Decoder {
    Text(Trim),
    Integer {
        trim: Trim,
        grouping: Option<char>,
        radix: u32,
        prefix: Option<&'static str>,
    },
    Float {
        trim: Trim,
        grouping: Option<char>,
    },
    /// No declared type: a decimal point in the text selects float,
    /// otherwise integer. This is a best-effort guess.
    Inferred {
        trim: Trim,
        grouping: Option<char>,
    },
    DateTime {
        format: String,
    },
}

impl Decoder {
    pub(crate) fn decode(&self, text: &str) -> Result<Value, DecodeError> {
        match self {
            Decoder::Text(trim) => Ok(Value::String(trim.apply(text).to_string())),
            Decoder::Integer {
                trim,
                grouping,
                radix,
                prefix,
            } => parse_int(&ungroup(trim.apply(text), *grouping), *radix, *prefix),
            Decoder::Float { trim, grouping } => parse_float(&ungroup(trim.apply(text), *grouping)),
            Decoder::Inferred { trim, grouping } => {
                let number = ungroup(trim.apply(text), *grouping);
                if number.contains('.') {
                    parse_float(&number)
                } else {
                    parse_int(&number, 10, None)
                }
            }
            Decoder::DateTime { format } => Ok(datetime::decode(format, text)?),
        }
    }
}

fn ungroup(text: &str, grouping: Option<char>) -> Cow<'_, str> {
    match grouping {
        Some(separator) if text.contains(separator) => Cow::Owned(text.replace(separator, "")),
        _ => Cow::Borrowed(text),
    }
}

fn split_sign(text: &str) -> (bool, &str) {
    match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix(|c: char| c == '+' || c == ' ').unwrap_or(text)),
    }
}

fn parse_int(text: &str, radix: u32, prefix: Option<&str>) -> Result<Value, DecodeError> {
    let (negative, magnitude) = split_sign(text);
    let digits = prefix
        .and_then(|p| magnitude.strip_prefix(p))
        .unwrap_or(magnitude);
    let n = if negative {
        i64::from_str_radix(&format!("-{digits}"), radix)?
    } else {
        i64::from_str_radix(digits, radix)?
    };
    Ok(Value::Int(n))
}

fn parse_float(text: &str) -> Result<Value, DecodeError> {
    let (negative, magnitude) = split_sign(text);
    let n: f64 = magnitude.parse()?;
    Ok(Value::Float(if negative { -n } else { n }))
}

// ============ Synthesis ============

pub(crate) fn synthesize(spec: &FormatSpec) -> Result<Field, CompileError> {
    match spec {
        FormatSpec::Fields(fields) if fields.is_untyped() => Ok(untyped(fields)),
        FormatSpec::Fields(fields) => Ok(numeric(fields)),
        FormatSpec::DateTime(format) => Ok(Field {
            pattern: datetime::translate(format)?,
            decoder: Decoder::DateTime {
                format: format.clone(),
            },
        }),
    }
}

fn untyped(fields: &Fields) -> Field {
    let pattern = match fields.width {
        Some(width) => format!(".{{{width}}}"),
        None => ".+".to_string(),
    };
    Field {
        pattern,
        decoder: Decoder::Text(Trim::for_fields(fields)),
    }
}

#[derive(Debug, Clone, Copy)]
enum Fragment {
    LeadingFill,
    Sign,
    Prefix,
    Digits,
    Fraction,
    Exponent,
    TrailingFill,
}

// A number is written fill, sign, base prefix, digits, fraction, exponent,
// fill; the pattern is assembled in exactly that order.
const NUMERIC_PIPELINE: [Fragment; 7] = [
    Fragment::LeadingFill,
    Fragment::Sign,
    Fragment::Prefix,
    Fragment::Digits,
    Fragment::Fraction,
    Fragment::Exponent,
    Fragment::TrailingFill,
];

impl Fragment {
    fn render(self, fields: &Fields) -> String {
        match self {
            Fragment::LeadingFill => padding(fields, fields.align != Some(Align::Left)),
            Fragment::TrailingFill => padding(
                fields,
                matches!(fields.align, Some(Align::Left | Align::Center)),
            ),
            Fragment::Sign => match fields.sign {
                Some(Sign::Plus) => r"[+\-]",
                Some(Sign::Space) => r"[ \-]",
                None => "-?",
            }
            .to_string(),
            Fragment::Prefix => alternate_prefix(fields)
                .map(|prefix| format!("(?:{prefix})?"))
                .unwrap_or_default(),
            Fragment::Digits => digits(fields),
            Fragment::Fraction => fraction(fields),
            Fragment::Exponent => match fields.format_type {
                Some(FormatType::Exponent) => r"e[+\-][0-9]{2,3}",
                Some(FormatType::ExponentUpper) => r"E[+\-][0-9]{2,3}",
                _ => "",
            }
            .to_string(),
        }
    }
}

fn numeric(fields: &Fields) -> Field {
    let pattern = NUMERIC_PIPELINE
        .iter()
        .map(|fragment| fragment.render(fields))
        .collect();

    let trim = Trim::for_fields(fields);
    let grouping = fields.grouping.map(Grouping::separator);
    let decoder = match fields.format_type {
        Some(t) if t.is_float() => Decoder::Float { trim, grouping },
        Some(t) => match t.radix() {
            Some(radix) => Decoder::Integer {
                trim,
                grouping,
                radix,
                prefix: alternate_prefix(fields),
            },
            None => Decoder::Inferred { trim, grouping },
        },
        None => Decoder::Inferred { trim, grouping },
    };

    Field { pattern, decoder }
}

fn padding(fields: &Fields, on_this_side: bool) -> String {
    if !on_this_side || (fields.width.is_none() && fields.align.is_none()) {
        return String::new();
    }
    let fill = fields.fill.unwrap_or(' ').to_string();
    format!("{}*", fancy_regex::escape(&fill))
}

fn alternate_prefix(fields: &Fields) -> Option<&'static str> {
    if !fields.alternate {
        return None;
    }
    match fields.format_type {
        Some(FormatType::Binary) => Some("0b"),
        Some(FormatType::Octal) => Some("0o"),
        Some(FormatType::Hex) => Some("0x"),
        Some(FormatType::HexUpper) => Some("0X"),
        _ => None,
    }
}

fn digits(fields: &Fields) -> String {
    let (class, group) = match fields.format_type {
        Some(FormatType::Binary) => ("[01]", 4),
        Some(FormatType::Octal) => ("[0-7]", 4),
        Some(FormatType::Hex) => ("[0-9a-f]", 4),
        Some(FormatType::HexUpper) => ("[0-9A-F]", 4),
        _ => ("[0-9]", 3),
    };
    match fields.grouping {
        Some(grouping) => {
            let separator = fancy_regex::escape(&grouping.separator().to_string()).into_owned();
            format!("{class}{{1,{group}}}(?:{separator}{class}{{{group}}})*")
        }
        None => format!("{class}+"),
    }
}

fn fraction(fields: &Fields) -> String {
    match fields.format_type {
        Some(t) if t.is_float() => match fields.precision {
            Some(0) => String::new(),
            Some(p) => format!(r"\.[0-9]{{{p}}}"),
            None if matches!(t, FormatType::Exponent | FormatType::ExponentUpper) => {
                r"\.[0-9]+".to_string()
            }
            None => r"(?:\.[0-9]{1,6})?".to_string(),
        },
        Some(_) => String::new(),
        // Sign or grouping without a type: the value may be either kind.
        None => match fields.precision {
            Some(0) => String::new(),
            Some(p) => format!(r"(?:\.[0-9]{{1,{p}}})?"),
            None => r"(?:\.[0-9]{1,6})?".to_string(),
        },
    }
}
