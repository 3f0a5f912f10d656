use thiserror::Error;

/// Errors raised when building domain objects
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {cols}x{rows}")]
    EmptyDimensions { cols: usize, rows: usize },
    #[error("grid {cols}x{rows} is too large")]
    TooLarge { cols: usize, rows: usize },
}

/// Errors raised when parsing a rule name or B/S notation
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuleParseError {
    #[error("unknown rule `{0}`")]
    Unknown(String),
    #[error("invalid neighbour count `{digit}` in rule `{rule}`")]
    InvalidCount { rule: String, digit: char },
}

/// Raised when a pattern name does not match any library entry
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown pattern `{0}`")]
pub struct UnknownPattern(pub String);
