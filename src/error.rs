/// Errors that can occur during scanning
///
/// Every fallible operation restores the cursor to its pre-call position
/// before returning an error, so callers can branch to an alternative
/// parse without bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// Requested content exceeds the remaining window
    Overflow,
    /// Matched content violates a caller-level expectation.
    /// Reserved for parsers layered on top of the scanner; the scanner
    /// itself never raises it.
    Unexpected,
    /// An operation was asked to match a zero-length literal
    EmptyString,
    /// Input bytes are not well-formed UTF-8 (construction only)
    InvalidUtf8,
}

impl core::fmt::Display for ScanError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Self::Overflow => "Request exceeds remaining window",
            Self::Unexpected => "Unexpected content",
            Self::EmptyString => "Empty string literal",
            Self::InvalidUtf8 => "Invalid UTF-8",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ScanError {}

/// Result type for scanner operations
pub type Result<T> = core::result::Result<T, ScanError>;
