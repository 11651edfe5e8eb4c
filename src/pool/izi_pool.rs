use crate::error::{Error, StateError};
use crate::pool::orders::Orders;
use crate::pool::state::State;
use crate::{FEE_DENOMINATOR, LEFT_MOST_PT, Q96};
use alloy_primitives::U256;

/// Default cap on driver loop iterations.
///
/// A well formed snapshot needs about one iteration per order, liquidity
/// change or storage block crossed.
pub const DEFAULT_ITERATION_LIMIT: usize = 100_000;

/// An immutable pool snapshot that swaps can be simulated against.
///
/// Drivers never touch `state`; each call works on its own copy and reports
/// where it ended in the returned result.
#[derive(Clone, Debug)]
pub struct IziSwapPool {
    state: State,
    orders: Orders,
    pub sqrt_rate_96: U256,
    pub point_delta: i32,
    /// Fee in parts per million of the input amount.
    pub fee: u32,
    pub left_most_pt: i32,
    pub right_most_pt: i32,
    pub iteration_limit: usize,
}

impl IziSwapPool {
    /// Creates a pool after checking the constants and the snapshot.
    pub fn new(
        state: State,
        orders: Orders,
        sqrt_rate_96: U256,
        point_delta: i32,
        fee: u32,
    ) -> Result<Self, Error> {
        if point_delta <= 0 {
            return Err(StateError::InvalidPointDelta.into());
        }
        if fee >= FEE_DENOMINATOR {
            return Err(StateError::InvalidFee.into());
        }
        if sqrt_rate_96 <= Q96 {
            return Err(StateError::InvalidSqrtRate.into());
        }
        state.validate()?;
        orders.validate()?;

        let left_most_pt = LEFT_MOST_PT / point_delta * point_delta;
        Ok(Self {
            state,
            orders,
            sqrt_rate_96,
            point_delta,
            fee,
            left_most_pt,
            right_most_pt: -left_most_pt,
            iteration_limit: DEFAULT_ITERATION_LIMIT,
        })
    }

    /// Overrides the driver iteration cap.
    #[inline]
    pub fn with_iteration_limit(mut self, iteration_limit: usize) -> Self {
        self.iteration_limit = iteration_limit;
        self
    }

    /// Returns a copy of the initial state.
    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    #[inline]
    pub fn orders(&self) -> &Orders {
        &self.orders
    }
}
