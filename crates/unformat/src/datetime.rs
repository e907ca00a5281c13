//! Date/time templates: `%`-directive translation into sub-patterns and
//! decoding of matched text back into calendar values.

use crate::error::CompileError;
use crate::value::Value;
use jiff::fmt::strtime;
use regex::Regex;
use std::sync::LazyLock;

const MONTHS: &str =
    "(?:January|February|March|April|May|June|July|August|September|October|November|December)";
const MONTHS_ABBREV: &str = "(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)";
const WEEKDAYS: &str = "(?:Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday)";
const WEEKDAYS_ABBREV: &str = "(?:Mon|Tue|Wed|Thu|Fri|Sat|Sun)";

/// Directive (without the leading `%`) to the sub-pattern it matches.
///
/// A `-` flag selects the unpadded variant of a numeric directive.
///
/// `%U` and `%W` only pin down a date together with a weekday (`%a` or
/// `%A`); a template with a week number but no weekday matches, then fails
/// to decode.
const TOKENS: &[(&str, &str)] = &[
    ("Y", "[0-9]{4}"),
    ("y", "[0-9]{2}"),
    ("-y", "[0-9]{1,2}"),
    ("m", "[0-9]{2}"),
    ("-m", "[0-9]{1,2}"),
    ("B", MONTHS),
    ("b", MONTHS_ABBREV),
    ("A", WEEKDAYS),
    ("a", WEEKDAYS_ABBREV),
    ("d", "[0-9]{2}"),
    ("-d", "[0-9]{1,2}"),
    ("H", "[0-9]{2}"),
    ("-H", "[0-9]{1,2}"),
    ("I", "[0-9]{2}"),
    ("-I", "[0-9]{1,2}"),
    ("M", "[0-9]{2}"),
    ("-M", "[0-9]{1,2}"),
    ("S", "[0-9]{2}"),
    ("-S", "[0-9]{1,2}"),
    ("f", "[0-9]{6}"),
    ("j", "[0-9]{3}"),
    ("-j", "[0-9]{1,3}"),
    ("U", "[0-9]{2}"),
    ("W", "[0-9]{2}"),
    ("p", "(?:AM|PM)"),
    ("z", "[+\\-][0-9]{4}"),
    ("%", "%"),
];

const YEAR_TOKENS: &[&str] = &["Y", "y", "-y"];

// The optional `-` is tried first, so `%-d` is never read as `%-` then `d`.
static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"%(-?[A-Za-z%])").unwrap());

fn lookup(directive: &str) -> Option<&'static str> {
    TOKENS
        .iter()
        .find(|(name, _)| *name == directive)
        .map(|(_, pattern)| *pattern)
}

/// Whether `spec` should be read as a date/time template: it must carry at
/// least one year directive.
pub(crate) fn is_datetime_format(spec: &str) -> bool {
    DIRECTIVE
        .captures_iter(spec)
        .any(|caps| YEAR_TOKENS.contains(&&caps[1]))
}

/// Rewrite a date/time template into a matching sub-pattern.
///
/// Text between directives is escaped. Unknown directives are rejected
/// rather than copied through, since the decoder could never accept them.
pub(crate) fn translate(format: &str) -> Result<String, CompileError> {
    let mut pattern = String::new();
    let mut last_end = 0;

    for caps in DIRECTIVE.captures_iter(format) {
        let whole = caps.get(0).unwrap();
        push_literal(&mut pattern, format, &format[last_end..whole.start()])?;

        let Some(sub) = lookup(&caps[1]) else {
            return Err(CompileError::unsupported(
                format,
                "unknown date/time directive",
            ));
        };
        pattern.push_str(sub);
        last_end = whole.end();
    }
    push_literal(&mut pattern, format, &format[last_end..])?;

    Ok(pattern)
}

fn push_literal(pattern: &mut String, format: &str, literal: &str) -> Result<(), CompileError> {
    if literal.contains('%') {
        return Err(CompileError::unsupported(
            format,
            "dangling '%' in date/time template",
        ));
    }
    pattern.push_str(&fancy_regex::escape(literal));
    Ok(())
}

/// Parse `text` against the original date/time template.
pub(crate) fn decode(format: &str, text: &str) -> Result<Value, jiff::Error> {
    let tm = strtime::parse(format, text)?;
    let datetime = tm.to_datetime()?;
    Ok(Value::DateTime {
        datetime,
        offset: tm.offset(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;
    use jiff::tz::Offset;

    #[test]
    fn test_is_datetime_format() {
        assert!(is_datetime_format("%Y-%m-%d"));
        assert!(is_datetime_format("%d/%m/%y"));
        assert!(is_datetime_format("%-d/%-m/%-y"));
        assert!(!is_datetime_format("%H:%M:%S"));
        assert!(!is_datetime_format("Y-m-d"));
        assert!(!is_datetime_format(">5"));
    }

    #[test]
    fn test_translate_numeric() {
        assert_eq!(
            translate("%Y%m%d").unwrap(),
            "[0-9]{4}[0-9]{2}[0-9]{2}"
        );
    }

    #[test]
    fn test_translate_short_variants() {
        assert_eq!(translate("%-d").unwrap(), "[0-9]{1,2}");
        assert_eq!(translate("%d").unwrap(), "[0-9]{2}");
        assert_eq!(translate("%-d%d").unwrap(), "[0-9]{1,2}[0-9]{2}");
    }

    #[test]
    fn test_translate_escapes_literals() {
        let pattern = translate("%Y.%m (%d)").unwrap();
        let re = fancy_regex::Regex::new(&format!("^{pattern}$")).unwrap();
        assert!(re.is_match("2021.03 (04)").unwrap());
        assert!(!re.is_match("2021x03 (04)").unwrap());
    }

    #[test]
    fn test_translate_names() {
        let pattern = translate("%a %d %b %Y").unwrap();
        let re = fancy_regex::Regex::new(&format!("^{pattern}$")).unwrap();
        assert!(re.is_match("Thu 04 Mar 2021").unwrap());
        assert!(!re.is_match("Thx 04 Mar 2021").unwrap());
        assert!(!re.is_match("Thu 04 M 2021").unwrap());
    }

    #[test]
    fn test_translate_percent_literal() {
        assert_eq!(translate("%Y%%").unwrap(), "[0-9]{4}%");
    }

    #[test]
    fn test_translate_unknown_directive() {
        assert!(matches!(
            translate("%Y-%Q"),
            Err(CompileError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_translate_dangling_percent() {
        assert!(matches!(
            translate("%Y-%"),
            Err(CompileError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            translate("%Y % %m"),
            Err(CompileError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_decode_datetime() {
        let value = decode("%Y-%m-%dT%H-%M-%S", "2021-03-04T04-03-02").unwrap();
        assert_eq!(
            value,
            Value::DateTime {
                datetime: date(2021, 3, 4).at(4, 3, 2, 0),
                offset: None,
            }
        );
    }

    #[test]
    fn test_decode_date_only_is_midnight() {
        let value = decode("%Y/%m/%d", "2024/07/15").unwrap();
        assert_eq!(value.as_datetime(), Some(date(2024, 7, 15).at(0, 0, 0, 0)));
    }

    #[test]
    fn test_decode_microseconds() {
        let value = decode("%Y-%m-%d %H:%M:%S.%f", "2021-03-04 04:03:02.000123").unwrap();
        assert_eq!(
            value.as_datetime(),
            Some(date(2021, 3, 4).at(4, 3, 2, 123_000))
        );
    }

    #[test]
    fn test_decode_offset() {
        let value = decode("%Y-%m-%d %H:%M %z", "2021-03-04 04:03 +0500").unwrap();
        assert_eq!(
            value,
            Value::DateTime {
                datetime: date(2021, 3, 4).at(4, 3, 0, 0),
                offset: Some(Offset::constant(5)),
            }
        );
    }

    #[test]
    fn test_decode_week_number_with_weekday() {
        let value = decode("%Y-%W-%a", "2021-09-Mon").unwrap();
        assert_eq!(value.as_datetime(), Some(date(2021, 3, 1).at(0, 0, 0, 0)));
    }

    #[test]
    fn test_decode_week_number_alone_fails() {
        assert!(decode("%Y-%W", "2021-09").is_err());
    }

    #[test]
    fn test_decode_impossible_date() {
        assert!(decode("%Y-%m-%d", "2021-02-30").is_err());
    }
}
