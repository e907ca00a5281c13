//! Reverse string formatting.
//!
//! A template such as `"{name}: {count:,d}"` describes text produced by
//! filling values into it. This crate compiles the template into a
//! [`Pattern`] that recognizes such text and recovers the typed values.
//!
//! # Example
//!
//! ```
//! use unformat::{Decode, MatchResult, Pattern, Value};
//!
//! let pattern = Pattern::compile("{host}:{port:d} ({load:.2f})").unwrap();
//!
//! let values = pattern
//!     .match_extract("db-1:5432 (0.75)")
//!     .unwrap()
//!     .into_option()
//!     .unwrap();
//! assert_eq!(values["host"], Value::from("db-1"));
//! assert_eq!(values["port"], Value::Int(5432));
//! assert_eq!(values["load"], Value::Float(0.75));
//!
//! // Text of the wrong shape is simply not a match.
//! assert_eq!(pattern.match_extract("db-1:http (0.75)").unwrap(), MatchResult::NoMatch);
//!
//! // One-shot helper, optionally skipping decoding.
//! let raw = unformat::parse("{x:#x}", "0x2a", Decode::Raw).unwrap();
//! assert_eq!(raw.into_option().unwrap()["x"], Value::from("0x2a"));
//! ```

mod compiler;
mod datetime;
mod error;
mod matcher;
mod spec;
mod synth;
mod template;
mod value;

pub use compiler::{compile, Pattern};
pub use error::{CompileError, Error, Result};
pub use matcher::{Decode, MatchError, MatchResult};
pub use synth::DecodeError;
pub use value::Value;

/// Compile `template` and match it against `input` in one step.
pub fn parse(template: &str, input: &str, decode: Decode) -> Result<MatchResult> {
    let pattern = Pattern::compile(template)?;
    Ok(pattern.match_with(input, decode)?)
}
