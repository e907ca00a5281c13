use crate::cli::Format;
use std::collections::HashMap;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use unformat::{MatchError, Pattern, Value};

pub struct Output {
    stdout: StandardStream,
    format: Format,
}

impl Output {
    pub fn new(format: Format, color: bool) -> Self {
        // JSON is for machines; never color it.
        let color_choice = if color && format == Format::Text {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self {
            stdout: StandardStream::stdout(color_choice),
            format,
        }
    }

    fn set_color(&mut self, color: Color) {
        let _ = self.stdout.set_color(ColorSpec::new().set_fg(Some(color)));
    }

    fn set_bold(&mut self) {
        let _ = self.stdout.set_color(ColorSpec::new().set_bold(true));
    }

    fn set_dim(&mut self) {
        let _ = self.stdout.set_color(ColorSpec::new().set_dimmed(true));
    }

    fn reset(&mut self) {
        let _ = self.stdout.reset();
    }

    pub fn print_pattern(&mut self, pattern: &Pattern) -> io::Result<()> {
        writeln!(self.stdout, "{}", pattern.as_str())
    }

    pub fn print_match(
        &mut self,
        pattern: &Pattern,
        values: &HashMap<String, Value>,
    ) -> io::Result<()> {
        match self.format {
            Format::Json => {
                let object: serde_json::Map<String, serde_json::Value> = values
                    .iter()
                    .map(|(label, value)| (label.clone(), value_to_json(value)))
                    .collect();
                writeln!(self.stdout, "{}", serde_json::Value::Object(object))
            }
            Format::Text => {
                for label in pattern.labels() {
                    let Some(value) = values.get(label) else {
                        continue;
                    };
                    self.set_bold();
                    write!(self.stdout, "{label}")?;
                    self.reset();
                    write!(self.stdout, " = ")?;
                    self.set_color(value_color(value));
                    write!(self.stdout, "{value}")?;
                    self.set_dim();
                    writeln!(self.stdout, " ({})", value.type_name())?;
                    self.reset();
                }
                writeln!(self.stdout)
            }
        }
    }

    pub fn print_no_match(&mut self, input: &str) -> io::Result<()> {
        match self.format {
            Format::Json => writeln!(self.stdout, "null"),
            Format::Text => {
                self.set_color(Color::Red);
                write!(self.stdout, "no match")?;
                self.reset();
                writeln!(self.stdout, ": {input}")?;
                writeln!(self.stdout)
            }
        }
    }

    pub fn print_error(&mut self, input: &str, error: &MatchError) -> io::Result<()> {
        match self.format {
            Format::Json => {
                let object = serde_json::json!({ "error": error.to_string() });
                writeln!(self.stdout, "{object}")
            }
            Format::Text => {
                self.set_color(Color::Yellow);
                write!(self.stdout, "error")?;
                self.reset();
                writeln!(self.stdout, ": {input}: {error}")?;
                writeln!(self.stdout)
            }
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

fn value_color(value: &Value) -> Color {
    match value {
        Value::Int(_) | Value::Float(_) => Color::Cyan,
        Value::String(_) => Color::Green,
        Value::DateTime { .. } => Color::Magenta,
    }
}

pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Int(n) => serde_json::Value::from(*n),
        // Non-finite floats have no JSON form and come out as null.
        Value::Float(n) => serde_json::Value::from(*n),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::DateTime { .. } => serde_json::Value::String(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_to_json() {
        assert_eq!(value_to_json(&Value::Int(42)), json!(42));
        assert_eq!(value_to_json(&Value::Float(2.5)), json!(2.5));
        assert_eq!(value_to_json(&Value::from("ab")), json!("ab"));
    }

    #[test]
    fn test_datetime_to_json() {
        let values = unformat::parse("{d:%Y-%m-%d}", "2021-03-04", unformat::Decode::Typed)
            .unwrap()
            .into_option()
            .unwrap();
        assert_eq!(value_to_json(&values["d"]), json!("2021-03-04T00:00:00"));
    }
}
