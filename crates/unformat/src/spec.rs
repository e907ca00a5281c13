//! Format-specification grammar.
//!
//! ```text
//! [[fill]align][sign][#][width][grouping][.precision][type]
//! ```
//!
//! A spec that does not fit the grammar is tried as a date/time template
//! (anything carrying a year directive such as `%Y`). Neither means the
//! spec is unsupported.

use crate::datetime;
use crate::error::CompileError;
use winnow::ascii::digit1;
use winnow::combinator::{alt, opt, preceded};
use winnow::prelude::*;
use winnow::token::any;

// ============ Data Types ============

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// `+`: a sign is always written.
    Plus,
    /// ` `: positive numbers get a leading space.
    Space,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    Comma,
    Underscore,
}

impl Grouping {
    pub fn separator(self) -> char {
        match self {
            Grouping::Comma => ',',
            Grouping::Underscore => '_',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    /// `s`
    String,
    /// `d`
    Decimal,
    /// `n`
    Number,
    /// `f`
    Fixed,
    /// `F`
    FixedUpper,
    /// `e`
    Exponent,
    /// `E`
    ExponentUpper,
    /// `b`
    Binary,
    /// `o`
    Octal,
    /// `x`
    Hex,
    /// `X`
    HexUpper,
}

impl FormatType {
    /// Radix for the integer types, `None` otherwise.
    pub fn radix(self) -> Option<u32> {
        match self {
            FormatType::Decimal | FormatType::Number => Some(10),
            FormatType::Binary => Some(2),
            FormatType::Octal => Some(8),
            FormatType::Hex | FormatType::HexUpper => Some(16),
            _ => None,
        }
    }

    pub fn is_integer(self) -> bool {
        self.radix().is_some()
    }

    pub fn is_float(self) -> bool {
        matches!(
            self,
            FormatType::Fixed
                | FormatType::FixedUpper
                | FormatType::Exponent
                | FormatType::ExponentUpper
        )
    }

    fn is_non_decimal(self) -> bool {
        matches!(self.radix(), Some(2 | 8 | 16))
    }
}

/// The fields of a structured format spec. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    pub fill: Option<char>,
    pub align: Option<Align>,
    pub sign: Option<Sign>,
    pub alternate: bool,
    pub width: Option<usize>,
    pub grouping: Option<Grouping>,
    pub precision: Option<usize>,
    pub format_type: Option<FormatType>,
}

impl Fields {
    /// True when nothing gives the text a numeric shape.
    pub fn is_untyped(&self) -> bool {
        matches!(self.format_type, None | Some(FormatType::String))
            && self.sign.is_none()
            && self.grouping.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatSpec {
    Fields(Fields),
    DateTime(String),
}

// ============ Public API ============

pub fn parse(spec: &str) -> Result<FormatSpec, CompileError> {
    let mut input = spec;
    if let Ok(parsed) = fields.parse_next(&mut input) {
        if input.is_empty() {
            validate(spec, &parsed)?;
            return Ok(FormatSpec::Fields(parsed));
        }
    }

    if datetime::is_datetime_format(spec) {
        return Ok(FormatSpec::DateTime(spec.to_string()));
    }

    Err(CompileError::unsupported(
        spec,
        "not a format specification or date/time template",
    ))
}

// ============ Winnow Parsers ============

fn align(input: &mut &str) -> ModalResult<Align> {
    alt((
        '<'.value(Align::Left),
        '>'.value(Align::Right),
        '^'.value(Align::Center),
    ))
    .parse_next(input)
}

// A fill character only counts when an alignment follows it, so `<5` is
// an alignment and `<<5` is a `<` fill with left alignment.
fn fill_align(input: &mut &str) -> ModalResult<(Option<char>, Align)> {
    alt((
        (any, align).map(|(fill, align)| (Some(fill), align)),
        align.map(|align| (None, align)),
    ))
    .parse_next(input)
}

fn sign(input: &mut &str) -> ModalResult<Sign> {
    alt(('+'.value(Sign::Plus), ' '.value(Sign::Space))).parse_next(input)
}

fn count(input: &mut &str) -> ModalResult<usize> {
    digit1.try_map(|s: &str| s.parse::<usize>()).parse_next(input)
}

fn grouping(input: &mut &str) -> ModalResult<Grouping> {
    alt((
        ','.value(Grouping::Comma),
        '_'.value(Grouping::Underscore),
    ))
    .parse_next(input)
}

fn format_type(input: &mut &str) -> ModalResult<FormatType> {
    alt((
        's'.value(FormatType::String),
        'd'.value(FormatType::Decimal),
        'n'.value(FormatType::Number),
        'f'.value(FormatType::Fixed),
        'F'.value(FormatType::FixedUpper),
        'e'.value(FormatType::Exponent),
        'E'.value(FormatType::ExponentUpper),
        'b'.value(FormatType::Binary),
        'o'.value(FormatType::Octal),
        'x'.value(FormatType::Hex),
        'X'.value(FormatType::HexUpper),
    ))
    .parse_next(input)
}

fn fields(input: &mut &str) -> ModalResult<Fields> {
    let fill_align = opt(fill_align).parse_next(input)?;
    let sign = opt(sign).parse_next(input)?;
    let alternate = opt('#').parse_next(input)?.is_some();
    // A leading zero is read as part of the width.
    let width = opt(count).parse_next(input)?;
    let grouping = opt(grouping).parse_next(input)?;
    let precision = opt(preceded('.', count)).parse_next(input)?;
    let format_type = opt(format_type).parse_next(input)?;

    let (fill, align) = match fill_align {
        Some((fill, align)) => (fill, Some(align)),
        None => (None, None),
    };

    Ok(Fields {
        fill,
        align,
        sign,
        alternate,
        width: width.filter(|&w| w > 0),
        grouping,
        precision,
        format_type,
    })
}

// ============ Validation ============

// Combinations no formatter would ever produce are rejected up front.
fn validate(spec: &str, fields: &Fields) -> Result<(), CompileError> {
    let ty = fields.format_type;

    if fields.precision.is_some() && ty.is_some_and(FormatType::is_integer) {
        return Err(CompileError::unsupported(
            spec,
            "precision is not allowed with integer types",
        ));
    }

    if fields.alternate && !ty.is_some_and(FormatType::is_non_decimal) {
        return Err(CompileError::unsupported(
            spec,
            "alternate form requires one of the types b, o, x or X",
        ));
    }

    if ty == Some(FormatType::String) && (fields.sign.is_some() || fields.grouping.is_some()) {
        return Err(CompileError::unsupported(
            spec,
            "sign and grouping are not allowed with type s",
        ));
    }

    match (fields.grouping, ty) {
        (Some(Grouping::Comma), Some(t)) if t.is_non_decimal() || t == FormatType::Number => {
            Err(CompileError::unsupported(
                spec,
                "',' grouping requires a decimal type",
            ))
        }
        (Some(Grouping::Underscore), Some(FormatType::Number)) => Err(CompileError::unsupported(
            spec,
            "'_' grouping is not allowed with type n",
        )),
        _ => Ok(()),
    }
}
