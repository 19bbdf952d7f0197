//! Error types for the GRANIT library.

use std::fmt;

use thiserror::Error;

/// Shorthand for results produced by this crate.
pub type Result<T> = std::result::Result<T, GranitError>;

/// Identifies which transposition key a key-level error or advisory refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyRole {
    /// Key of the first transposition box.
    First,
    /// Key of the second transposition box.
    Second,
}

impl fmt::Display for KeyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyRole::First => write!(f, "first transposition key"),
            KeyRole::Second => write!(f, "second transposition key"),
        }
    }
}

/// Reason a digit stream cannot be the encoding of any plaintext.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Implausibility {
    /// The stream ends on the first digit of a two-digit code.
    TruncatedCode,
    /// Number mode was opened and never closed.
    UnterminatedNumberMode,
    /// Two punctuation marks meet, or the text ends on a comma.
    PunctuationCollision,
    /// A number region holds no digits at all.
    EmptyNumberRegion,
    /// A number region holds digits that are not clean triples.
    UntripledDigits,
    /// A stream value lies outside `0..=9`.
    InvalidDigit(u8),
}

impl fmt::Display for Implausibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Implausibility::TruncatedCode => write!(f, "stream ends inside a two-digit code"),
            Implausibility::UnterminatedNumberMode => write!(f, "number mode is never closed"),
            Implausibility::PunctuationCollision => {
                write!(f, "adjacent or trailing punctuation")
            }
            Implausibility::EmptyNumberRegion => write!(f, "number region without digits"),
            Implausibility::UntripledDigits => {
                write!(f, "number region contains untripled digits")
            }
            Implausibility::InvalidDigit(value) => {
                write!(f, "value {} is not a decimal digit", value)
            }
        }
    }
}

/// Errors produced by the GRANIT library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GranitError {
    /// A transposition key contains no letters after cleaning.
    #[error("{0} contains no letters")]
    EmptyKey(KeyRole),
    /// The decoded stream failed the plausibility check.
    #[error("impossible plaintext: {0}")]
    ImpossiblePlaintext(Implausibility),
}

impl From<Implausibility> for GranitError {
    fn from(reason: Implausibility) -> Self {
        GranitError::ImpossiblePlaintext(reason)
    }
}
