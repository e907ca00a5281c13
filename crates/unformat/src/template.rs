//! Template scanning.
//!
//! A template is literal text with `{label}` / `{label:spec}` placeholders.
//! `{{` and `}}` stand for literal braces.

use crate::error::CompileError;

/// A segment of a template string - either literal text or a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Literal(String),
    Placeholder(Placeholder),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    pub label: String,
    /// Everything after the first `:`, if there was one.
    pub spec: Option<String>,
}

pub fn parse_segments(template: &str) -> Result<Vec<Segment>, CompileError> {
    let mut result = Vec::new();
    let mut literal = String::new();
    let mut remaining = template;

    while let Some(pos) = remaining.find(|c: char| c == '{' || c == '}') {
        literal.push_str(&remaining[..pos]);
        let tail = &remaining[pos..];
        let offset = template.len() - tail.len();

        if tail.starts_with("{{") {
            literal.push('{');
            remaining = &tail[2..];
            continue;
        }
        if tail.starts_with("}}") {
            literal.push('}');
            remaining = &tail[2..];
            continue;
        }
        if tail.starts_with('}') {
            // A lone closing brace has nothing to close; keep it as text.
            literal.push('}');
            remaining = &tail[1..];
            continue;
        }

        let Some(end) = tail.find('}') else {
            return Err(CompileError::UnterminatedPlaceholder { offset });
        };
        let body = &tail[1..end];
        if body.contains('{') {
            return Err(CompileError::NestedPlaceholder { offset });
        }

        if !literal.is_empty() {
            result.push(Segment::Literal(std::mem::take(&mut literal)));
        }
        result.push(Segment::Placeholder(placeholder(body, offset)?));
        remaining = &tail[end + 1..];
    }

    literal.push_str(remaining);
    if !literal.is_empty() {
        result.push(Segment::Literal(literal));
    }

    Ok(result)
}

fn placeholder(body: &str, offset: usize) -> Result<Placeholder, CompileError> {
    let (label, spec) = match body.split_once(':') {
        Some((label, spec)) => (label, Some(spec.to_string())),
        None => (body, None),
    };
    if label.is_empty() {
        return Err(CompileError::EmptyLabel { offset });
    }
    Ok(Placeholder {
        label: label.to_string(),
        spec,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> Segment {
        Segment::Literal(s.to_string())
    }

    fn ph(label: &str, spec: Option<&str>) -> Segment {
        Segment::Placeholder(Placeholder {
            label: label.to_string(),
            spec: spec.map(str::to_string),
        })
    }

    #[test]
    fn test_parse_segments_simple() {
        let segments = parse_segments("hello world").unwrap();
        assert_eq!(segments, vec![lit("hello world")]);
    }

    #[test]
    fn test_parse_segments_placeholder() {
        let segments = parse_segments("abc{x:5}abc").unwrap();
        assert_eq!(segments, vec![lit("abc"), ph("x", Some("5")), lit("abc")]);
    }

    #[test]
    fn test_parse_segments_plain_placeholder() {
        let segments = parse_segments("{a} + {b}").unwrap();
        assert_eq!(segments, vec![ph("a", None), lit(" + "), ph("b", None)]);
    }

    #[test]
    fn test_empty_spec_is_kept() {
        let segments = parse_segments("{x:}").unwrap();
        assert_eq!(segments, vec![ph("x", Some(""))]);
    }

    #[test]
    fn test_spec_split_at_first_colon() {
        let segments = parse_segments("at {t:%H:%M}").unwrap();
        assert_eq!(segments, vec![lit("at "), ph("t", Some("%H:%M"))]);
    }

    #[test]
    fn test_double_braces() {
        let segments = parse_segments("Number in {{hello}}: {n:n}").unwrap();
        assert_eq!(
            segments,
            vec![lit("Number in {hello}: "), ph("n", Some("n"))]
        );
    }

    #[test]
    fn test_triple_braces() {
        let segments = parse_segments("Number in: {{{n:n}}}").unwrap();
        assert_eq!(
            segments,
            vec![lit("Number in: {"), ph("n", Some("n")), lit("}")]
        );
    }

    #[test]
    fn test_lone_closing_brace() {
        let segments = parse_segments("a}b").unwrap();
        assert_eq!(segments, vec![lit("a}b")]);
    }

    #[test]
    fn test_unterminated() {
        assert!(matches!(
            parse_segments("abc{x:5"),
            Err(CompileError::UnterminatedPlaceholder { offset: 3 })
        ));
    }

    #[test]
    fn test_empty_label() {
        assert!(matches!(
            parse_segments("a{}b"),
            Err(CompileError::EmptyLabel { offset: 1 })
        ));
        assert!(matches!(
            parse_segments("a{:d}b"),
            Err(CompileError::EmptyLabel { offset: 1 })
        ));
    }

    #[test]
    fn test_nested() {
        assert!(matches!(
            parse_segments("{a{b}}"),
            Err(CompileError::NestedPlaceholder { offset: 0 })
        ));
    }
}
