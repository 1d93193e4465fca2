//! Binding error types.
//!
//! Every binding failure happens before any network call is made. Keys in
//! nested sub-options are reported with a dotted path (`storage_profile.iops`).

use thiserror::Error;

/// Errors raised while validating and normalizing the caller's options.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BindError {
    /// An identity key or required option is absent.
    #[error("required option '{key}' is missing")]
    MissingRequired { key: String },

    /// The option is not part of the descriptor's creatable set.
    #[error("unknown option '{key}'")]
    UnknownOption { key: String },

    /// The value could not be coerced to the declared type.
    #[error("option '{key}' expects {want}, got {got}")]
    TypeMismatch {
        key: String,
        want: &'static str,
        got: String,
    },

    /// The value is not a token in the field's fold table.
    #[error("option '{key}' has no enum token '{value}'")]
    InvalidEnum { key: String, value: String },

    /// The bound string does not match the field's declared pattern.
    #[error("option '{key}' does not match pattern {pattern}")]
    PatternMismatch { key: String, pattern: &'static str },

    /// A descriptor declared a pattern that does not compile. Table defect.
    #[error("descriptor pattern for '{key}' is invalid: {pattern}")]
    InvalidPattern { key: String, pattern: &'static str },
}

impl BindError {
    /// Stable token for the result envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingRequired { .. } => "missing_required",
            Self::UnknownOption { .. } => "unknown_option",
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::InvalidEnum { .. } => "invalid_enum",
            Self::PatternMismatch { .. } => "pattern_mismatch",
            Self::InvalidPattern { .. } => "invalid_pattern",
        }
    }

    /// Prefix the offending key with a parent path segment.
    pub(crate) fn nested(self, parent: &str) -> Self {
        let dotted = |key: String| format!("{parent}.{key}");
        match self {
            Self::MissingRequired { key } => Self::MissingRequired { key: dotted(key) },
            Self::UnknownOption { key } => Self::UnknownOption { key: dotted(key) },
            Self::TypeMismatch { key, want, got } => Self::TypeMismatch {
                key: dotted(key),
                want,
                got,
            },
            Self::InvalidEnum { key, value } => Self::InvalidEnum {
                key: dotted(key),
                value,
            },
            Self::PatternMismatch { key, pattern } => Self::PatternMismatch {
                key: dotted(key),
                pattern,
            },
            Self::InvalidPattern { key, pattern } => Self::InvalidPattern {
                key: dotted(key),
                pattern,
            },
        }
    }
}
