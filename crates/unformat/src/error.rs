use crate::matcher::MatchError;
use thiserror::Error;

/// Errors raised while turning a template into a [`Pattern`](crate::Pattern).
///
/// These are configuration errors: a template that fails to compile never
/// yields a partial or permissive pattern.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("unsupported format '{spec}': {reason}")]
    UnsupportedFormat { spec: String, reason: &'static str },

    #[error("unterminated placeholder starting at byte {offset}")]
    UnterminatedPlaceholder { offset: usize },

    #[error("placeholder at byte {offset} has an empty label")]
    EmptyLabel { offset: usize },

    #[error("nested placeholder at byte {offset} is not supported")]
    NestedPlaceholder { offset: usize },

    #[error("failed to build pattern regex: {0}")]
    RegexBuild(#[from] fancy_regex::Error),
}

impl CompileError {
    pub(crate) fn unsupported(spec: &str, reason: &'static str) -> Self {
        CompileError::UnsupportedFormat {
            spec: spec.to_string(),
            reason,
        }
    }
}

/// Union of everything the one-shot [`parse`](crate::parse) helper can fail with.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Match(#[from] MatchError),
}

pub type Result<T> = std::result::Result<T, Error>;
