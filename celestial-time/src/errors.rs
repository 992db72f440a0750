use celestial_core::{AstroError, MathErrorKind};
use thiserror::Error;

pub type TimeResult<T> = Result<T, TimeError>;

/// Errors raised by calendar, clock and time-scale operations.
///
/// Every variant is raised synchronously where it is detected and none is
/// transient. Use [`TimeError::kind`] to branch on the broad category.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimeError {
    #[error("Invalid date {year}-{month:02}-{day:02}: {message}")]
    InvalidDate {
        year: i32,
        month: i32,
        day: i32,
        message: String,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Overflow: {0}")]
    Overflow(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unsupported: {0}")]
    Unsupported(String),
}

/// Broad classification of a [`TimeError`].
///
/// `Unsupported` means "not built", which callers must not confuse with bad
/// input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    Overflow,
    Unsupported,
}

impl TimeError {
    pub fn invalid_date(year: i32, month: i32, day: i32, reason: &str) -> Self {
        Self::InvalidDate {
            year,
            month,
            day,
            message: reason.to_string(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn overflow(message: impl Into<String>) -> Self {
        Self::Overflow(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidDate { .. } | Self::InvalidArgument(_) | Self::Parse(_) => {
                ErrorKind::InvalidArgument
            }
            Self::Overflow(_) => ErrorKind::Overflow,
            Self::Unsupported(_) => ErrorKind::Unsupported,
        }
    }
}

impl From<AstroError> for TimeError {
    fn from(err: AstroError) -> Self {
        match err {
            AstroError::MathError {
                kind: MathErrorKind::Overflow,
                ..
            } => TimeError::Overflow(err.to_string()),
            AstroError::Unsupported { .. } => TimeError::Unsupported(err.to_string()),
            AstroError::MathError { .. } => TimeError::InvalidArgument(err.to_string()),
        }
    }
}
