use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    #[error("Math error - overflow")]
    Overflow,
    #[error("Math error - value does not fit in 128 bits")]
    Uint128Overflow,
    #[error("Math error - division by zero")]
    DivisionByZero,
    #[error("BitMath error - zero input value")]
    ZeroValue,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    #[error("State error - point out of bounds")]
    PointOutOfBounds,
    #[error("State error - sqrtPrice out of bounds")]
    SqrtPriceOutOfBounds,
    #[error("State error - sqrtPrice does not match current point")]
    SqrtPriceMismatch,
    #[error("State error - liquidityX exceeds liquidity")]
    LiquidityXExceedsLiquidity,
    #[error("State error - point delta must be positive")]
    InvalidPointDelta,
    #[error("State error - fee must be below 1e6")]
    InvalidFee,
    #[error("State error - sqrtRate must exceed 2^96")]
    InvalidSqrtRate,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum OrdersError {
    #[error("Orders error - value and point arrays differ in length")]
    LengthMismatch,
    #[error("Orders error - points are not strictly ascending")]
    PointsNotAscending,
    #[error("Orders error - liquidity snapshot is empty")]
    EmptyLiquidity,
    #[error("Orders error - snapshot does not cover the low point")]
    LowPointNotCovered,
    #[error("Orders error - snapshot does not cover the high point")]
    HighPointNotCovered,
    #[error("Orders error - snapshot does not cover the current point")]
    CurrentPointNotCovered,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SwapError {
    #[error("Swap error - amount must be positive")]
    AmountNotPositive,
    #[error("Swap error - bound point outside the pool range")]
    BoundOutOfRange,
    #[error("Swap error - current point outside the pool range")]
    CurrentPointOutOfRange,
    #[error("Swap error - low point is above the current point")]
    LowPointNotLessThanCurrent,
    #[error("Swap error - high point is not above the current point")]
    HighPointNotGreaterThanCurrent,
    #[error("Swap error - iteration limit of {0} exceeded")]
    IterationLimitExceeded(usize),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    MathError(#[from] crate::error::MathError),

    #[error(transparent)]
    StateError(#[from] crate::error::StateError),

    #[error(transparent)]
    OrdersError(#[from] crate::error::OrdersError),

    #[error(transparent)]
    SwapError(#[from] crate::error::SwapError),
}
