use thiserror::Error;

use crate::model::{FailureKind, ParseFailure};

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum MatchError {
    #[error("Argument '{0}' is unrecognised.")]
    UnrecognisedOption(String),

    #[error("Argument '{0}' is unrecognised; no positional parameters remain.")]
    ArgumentsExhausted(String),

    #[error("Option '{0}' requires a value.")]
    MissingValue(String),

    #[error("Flag '{0}' does not take a value.")]
    UnexpectedValue(String),

    #[error("Missing required parameter '{0}'.")]
    MissingRequired(String),
}

impl MatchError {
    pub(crate) fn kind(&self) -> FailureKind {
        match self {
            MatchError::UnrecognisedOption(_) | MatchError::ArgumentsExhausted(_) => {
                FailureKind::UnknownArgument
            }
            MatchError::MissingValue(_) => FailureKind::MissingValue,
            MatchError::UnexpectedValue(_) => FailureKind::UnexpectedValue,
            MatchError::MissingRequired(_) => FailureKind::MissingRequired,
        }
    }
}

impl From<(usize, MatchError)> for ParseFailure {
    fn from((offset, error): (usize, MatchError)) -> Self {
        ParseFailure::new(error.kind(), error.to_string(), offset)
    }
}
