use thiserror::Error;

/// Errors raised while building a codec from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("alphabet must have at least 2 characters, got {0}")]
    AlphabetTooShort(usize),
    #[error("alphabet character {0:?} is not ASCII alphanumeric")]
    InvalidSymbol(char),
    #[error("alphabet character {0:?} appears more than once")]
    DuplicateSymbol(char),
    #[error("code length must be at least 1")]
    ZeroLength,
}
