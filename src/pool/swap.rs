use crate::FEE_DENOMINATOR;
use crate::error::{Error, MathError, SwapError};
use crate::math::math_helpers::{mul_div_ceil, mul_div_floor, to_u128};
use crate::pool::izi_pool::IziSwapPool;
use crate::pool::orders::Orders;
use crate::pool::state::State;
use alloy_primitives::U256;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SwapDirection {
    /// Sell X for Y, walking the price down.
    X2Y,
    /// Sell Y for X, walking the price up.
    Y2X,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SwapMode {
    /// `amount` is the input budget, fee included.
    ExactInput,
    /// `amount` is the output to acquire.
    DesiredOutput,
}

/// Totals of a simulated swap.
///
/// `amount_x`/`amount_y` are the amount paid on the input side (fee
/// included) and the amount acquired on the output side. For a desired
/// output swap the acquired side can fall short of the request when the
/// bound point is reached first.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SwapResult {
    pub amount_x: U256,
    pub amount_y: U256,
    /// Fee charged, in the input token.
    pub fee_amount: U256,
    /// Traversal state where the swap stopped.
    pub state: State,
}

/// Everything needed to run one simulation from a snapshot.
#[derive(Clone, Debug)]
pub struct SwapRequest {
    pub direction: SwapDirection,
    pub mode: SwapMode,
    pub orders: Orders,
    pub state: State,
    pub sqrt_rate_96: U256,
    pub point_delta: i32,
    pub fee: u32,
    pub amount: u128,
    /// Lowest point for X2Y, highest point for Y2X.
    pub bound_point: i32,
}

/// Builds a pool from `request` and runs the matching driver.
pub fn simulate_swap(request: SwapRequest) -> Result<SwapResult, Error> {
    let SwapRequest {
        direction,
        mode,
        orders,
        state,
        sqrt_rate_96,
        point_delta,
        fee,
        amount,
        bound_point,
    } = request;
    let pool = IziSwapPool::new(state, orders, sqrt_rate_96, point_delta, fee)?;
    pool.swap(direction, mode, amount, bound_point)
}

impl IziSwapPool {
    /// Dispatches to one of the four drivers.
    pub fn swap(
        &self,
        direction: SwapDirection,
        mode: SwapMode,
        amount: u128,
        bound_point: i32,
    ) -> Result<SwapResult, Error> {
        match (direction, mode) {
            (SwapDirection::X2Y, SwapMode::ExactInput) => self.swap_x2y(amount, bound_point),
            (SwapDirection::X2Y, SwapMode::DesiredOutput) => {
                self.swap_x2y_desire_y(amount, bound_point)
            }
            (SwapDirection::Y2X, SwapMode::ExactInput) => self.swap_y2x(amount, bound_point),
            (SwapDirection::Y2X, SwapMode::DesiredOutput) => {
                self.swap_y2x_desire_x(amount, bound_point)
            }
        }
    }

    /// Counts one driver iteration against the pool's cap.
    pub(crate) fn tick_iteration(&self, iterations: &mut usize) -> Result<(), SwapError> {
        *iterations += 1;
        if *iterations > self.iteration_limit {
            return Err(SwapError::IterationLimitExceeded(self.iteration_limit));
        }
        Ok(())
    }
}

/// Part of `amount` left for trading once the fee share is set aside.
pub(crate) fn amount_no_fee(amount: u128, fee: u32) -> Result<u128, MathError> {
    to_u128(mul_div_floor(
        U256::from(amount),
        U256::from(FEE_DENOMINATOR - fee),
        U256::from(FEE_DENOMINATOR),
    )?)
}

/// Fee grossed up on a net `cost`, rounded up.
pub(crate) fn fee_on_cost(cost: U256, fee: u32) -> Result<U256, MathError> {
    mul_div_ceil(cost, U256::from(fee), U256::from(FEE_DENOMINATOR - fee))
}

/// Fee of one exact‑input step. A step that used the whole fee‑free
/// budget keeps the rest of `amount` as fee.
pub(crate) fn exact_input_fee(
    amount: u128,
    amount_no_fee: u128,
    cost: u128,
    fee: u32,
) -> Result<u128, MathError> {
    if cost >= amount_no_fee {
        amount.checked_sub(cost).ok_or(MathError::Overflow)
    } else {
        to_u128(fee_on_cost(U256::from(cost), fee)?)
    }
}

/// Remaining budget after paying `cost + fee`.
pub(crate) fn spend(amount: u128, cost: u128, fee: u128) -> Result<u128, MathError> {
    cost.checked_add(fee)
        .and_then(|paid| amount.checked_sub(paid))
        .ok_or(MathError::Overflow)
}
