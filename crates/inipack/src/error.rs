use thiserror::Error;

/// A syntax error found while validating configuration text.
///
/// Every error is fatal: no [`Config`](crate::Config) is produced from text
/// that fails validation. `line` and `column` are 1-based; `column` counts
/// bytes from the start of the line.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at {line}:{column}")]
pub struct ConfigError {
    kind: ErrorKind,
    /// Line of the offending byte.
    pub line: usize,
    /// Byte column of the offending byte.
    pub column: usize,
}

/// The rule an invalid line violates.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A `[` header line has no closing `]`.
    #[error("unterminated section header")]
    UnterminatedSection,
    /// Whitespace inside a key is followed by more key text.
    #[error("malformed key")]
    MalformedKey,
    /// A key-value line has no `=`.
    #[error("missing assignment")]
    MissingAssignment,
    /// Nothing printable follows `=`.
    #[error("empty value")]
    EmptyValue,
}

impl ConfigError {
    pub(crate) const fn new(kind: ErrorKind, line: usize, column: usize) -> Self {
        Self { kind, line, column }
    }

    /// Which rule was violated.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }
}
