use crate::dtype::DType;
use thiserror::Error;

/// Canonical error codes emitted by the dispatcher. The codes are stable so
/// that callers can branch on them without parsing messages.
pub mod codes {
    /// An option has the wrong shape (non-callable accessor, non-boolean copy, ...).
    pub const INVALID_OPTION: &str = "E_INVALID_OPTION";
    /// The requested dtype is not one of the recognized element types.
    pub const UNSUPPORTED_DTYPE: &str = "E_UNSUPPORTED_DTYPE";
    /// The requested dtype conflicts with mutating the input in place.
    pub const INCOMPATIBLE_DTYPE: &str = "E_INCOMPATIBLE_DTYPE";
    /// Shapes or lengths do not agree.
    pub const SHAPE_MISMATCH: &str = "E_SHAPE_MISMATCH";
}

/// Broad classification of a [`TransformError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A value of the wrong type was supplied.
    Type,
    /// A value of the right type was supplied but it is not acceptable.
    Value,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("invalid option: options argument must be an object, got {found}")]
    InvalidOptions { found: String },
    #[error("invalid option: accessor must be a function, got {found}")]
    InvalidAccessor { found: String },
    #[error("invalid option: `{key}` must be a {expected}, got {found}")]
    InvalidOptionType {
        key: &'static str,
        expected: &'static str,
        found: String,
    },
    #[error("unknown/unsupported dtype '{0}'")]
    UnsupportedDType(String),
    #[error("dtype '{requested}' cannot be written in place into '{existing}' data; set copy to true")]
    IncompatibleDType { requested: DType, existing: DType },
    #[error("shape {shape:?} describes {expected} elements but data holds {len}")]
    ShapeMismatch {
        shape: Vec<usize>,
        expected: usize,
        len: usize,
    },
}

impl TransformError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidOptions { .. }
            | Self::InvalidAccessor { .. }
            | Self::InvalidOptionType { .. } => ErrorKind::Type,
            Self::UnsupportedDType(_)
            | Self::IncompatibleDType { .. }
            | Self::ShapeMismatch { .. } => ErrorKind::Value,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidOptions { .. }
            | Self::InvalidAccessor { .. }
            | Self::InvalidOptionType { .. } => codes::INVALID_OPTION,
            Self::UnsupportedDType(_) => codes::UNSUPPORTED_DTYPE,
            Self::IncompatibleDType { .. } => codes::INCOMPATIBLE_DTYPE,
            Self::ShapeMismatch { .. } => codes::SHAPE_MISMATCH,
        }
    }
}

/// Formats an error as `CODE: message`, so bindings can split on the first
/// colon to recover the code.
pub fn format(err: &TransformError) -> String {
    format!("{}: {err}", err.code())
}
