use crate::Q96;
use crate::error::StateError;
use crate::math::log_pow_math::get_sqrt_price;
use alloy_primitives::U256;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Traversal state of a pool at a single point.
///
/// `liquidity_x` is the part of `liquidity` held as token X *at*
/// `current_point`; every point below holds only Y and every point above
/// only X. It has no meaning anywhere else and is recomputed whenever a
/// swap moves onto a new point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct State {
    pub current_point: i32,
    pub sqrt_price_96: U256,
    pub liquidity: u128,
    pub liquidity_x: u128,
}

impl Default for State {
    fn default() -> Self {
        Self {
            current_point: 0,
            sqrt_price_96: Q96,
            liquidity: 0,
            liquidity_x: 0,
        }
    }
}

impl State {
    /// Builds a state at `current_point`, deriving the sqrt price from the
    /// point so the two can never disagree.
    pub fn at_point(
        current_point: i32,
        liquidity: u128,
        liquidity_x: u128,
    ) -> Result<Self, StateError> {
        let state = Self {
            current_point,
            sqrt_price_96: get_sqrt_price(current_point)?,
            liquidity,
            liquidity_x,
        };
        state.validate()?;
        Ok(state)
    }

    /// Checks that `liquidity_x <= liquidity` and that the sqrt price is
    /// exactly the table price of `current_point`.
    pub fn validate(&self) -> Result<(), StateError> {
        if self.liquidity_x > self.liquidity {
            return Err(StateError::LiquidityXExceedsLiquidity);
        }
        if get_sqrt_price(self.current_point)? != self.sqrt_price_96 {
            return Err(StateError::SqrtPriceMismatch);
        }
        Ok(())
    }

    /// Liquidity at the current point still held as token Y.
    #[inline]
    pub fn liquidity_y(&self) -> u128 {
        self.liquidity - self.liquidity_x
    }
}
