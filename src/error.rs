use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MathError {
    #[error("Math error - overflow")]
    Overflow,
    #[error("Math error - division by zero")]
    DivisionByZero,
    #[error("BitMath error - zero input value")]
    ZeroValue,
    #[error("Math error - non-zero digits would be dropped")]
    PrecisionLoss,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Input error - decimals must be 0..=18, got {0}")]
    InvalidDecimals(u8),
    #[error("Input error - logarithm of zero")]
    LogOfZero,
    #[error("Input error - negative values are not representable")]
    Negative,
    #[error("Input error - not a decimal number: {0:?}")]
    InvalidNumber(String),
    #[error("Input error - operand scale {found} does not match {expected}")]
    ScaleMismatch { expected: u8, found: u8 },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    MathError(#[from] crate::error::MathError),

    #[error(transparent)]
    InputError(#[from] crate::error::InputError),
}
