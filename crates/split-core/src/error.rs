use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid participant count: {0}")]
    InvalidParticipantCount(usize),
    #[error("Shares total {actual} does not match expense amount {expected}")]
    ShareMismatch { expected: Decimal, actual: Decimal },
    #[error("Settlement of {requested} exceeds remaining share {remaining}")]
    ExceedsRemaining {
        requested: Decimal,
        remaining: Decimal,
    },
    #[error("Validation failed: {0}")]
    Validation(String),
}
