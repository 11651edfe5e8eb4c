use crate::error::{Error, OrdersError, SwapError};
use crate::math::log_pow_math::get_sqrt_price;
use crate::math::math_helpers::to_u128;
use crate::math::swap_math_y2x::{y2x_at_price, y2x_range};
use crate::math::swap_math_y2x_desire::{y2x_at_price_desire_x, y2x_range_desire_x};
use crate::pool::izi_pool::IziSwapPool;
use crate::pool::orders::Cursor;
use crate::pool::state::State;
use crate::pool::swap::{SwapResult, amount_no_fee, exact_input_fee, fee_on_cost, spend};
use alloy_primitives::U256;
use log::{debug, trace};

impl IziSwapPool {
    fn begin_y2x(&self, amount: u128, high_pt: i32) -> Result<Cursor, Error> {
        if amount == 0 {
            return Err(SwapError::AmountNotPositive.into());
        }
        if high_pt < self.left_most_pt || high_pt > self.right_most_pt {
            return Err(SwapError::BoundOutOfRange.into());
        }
        let current = self.state().current_point;
        if current < self.left_most_pt || current > self.right_most_pt {
            return Err(SwapError::CurrentPointOutOfRange.into());
        }
        if high_pt <= current {
            return Err(SwapError::HighPointNotGreaterThanCurrent.into());
        }
        let orders = self.orders();
        if !orders.cover_high_point(high_pt) {
            return Err(OrdersError::HighPointNotCovered.into());
        }
        if !orders.cover_low_point(current) {
            return Err(OrdersError::CurrentPointNotCovered.into());
        }
        Ok(orders.find_right_cursor(current)?)
    }

    /// Moves `st` onto `point` after every point below it was bought out.
    /// The new point holds only X under the liquidity active there.
    fn arrive_at(&self, st: &mut State, cursor: &mut Cursor, point: i32) -> Result<(), Error> {
        *cursor = self.orders().find_right_from_cursor(cursor, point);
        let liquidity = self.orders().liquidity_at(cursor);
        *st = State {
            current_point: point,
            sqrt_price_96: get_sqrt_price(point)?,
            liquidity,
            liquidity_x: liquidity,
        };
        Ok(())
    }

    /// Simulates selling exactly `amount` of Y (fee included), walking the
    /// price up towards `high_pt`, which is never reached as a current
    /// point with anything left to trade on it.
    pub fn swap_y2x(&self, amount: u128, high_pt: i32) -> Result<SwapResult, Error> {
        let mut cursor = self.begin_y2x(amount, high_pt)?;
        let mut st = self.state();
        let mut result = SwapResult::default();
        debug!(
            "swap_y2x: amount={} from point {} to {}",
            amount, st.current_point, high_pt
        );

        let orders = self.orders();
        let mut amount = amount;
        let mut iterations = 0usize;

        while st.current_point < high_pt {
            self.tick_iteration(&mut iterations)?;

            let curr_x = orders.selling_x_at(&cursor);
            if curr_x > 0 {
                let budget = amount_no_fee(amount, self.fee)?;
                if budget == 0 {
                    break;
                }
                let (cost_y, acquire_x) = y2x_at_price(budget, st.sqrt_price_96, curr_x)?;
                let fee = exact_input_fee(amount, budget, cost_y, self.fee)?;
                amount = spend(amount, cost_y, fee)?;
                result.amount_y += U256::from(cost_y + fee);
                result.amount_x += U256::from(acquire_x);
                result.fee_amount += U256::from(fee);
                trace!(
                    "y2x order at {}: cost_y={} fee={} acquire_x={}",
                    st.current_point, cost_y, fee, acquire_x
                );
                if acquire_x < curr_x || amount == 0 {
                    break;
                }
            }

            let next_pt = orders
                .nearest_right_one_or_boundary(&cursor, self.point_delta)
                .min(high_pt);
            if st.liquidity == 0 {
                self.arrive_at(&mut st, &mut cursor, next_pt)?;
                continue;
            }
            let budget = amount_no_fee(amount, self.fee)?;
            if budget == 0 {
                break;
            }
            let ret = y2x_range(&st, next_pt, self.sqrt_rate_96, budget)?;
            let fee = exact_input_fee(amount, budget, ret.cost_y, self.fee)?;
            amount = spend(amount, ret.cost_y, fee)?;
            result.amount_y += U256::from(ret.cost_y + fee);
            result.amount_x += ret.acquire_x;
            result.fee_amount += U256::from(fee);
            trace!(
                "y2x range [{}, {}): cost_y={} fee={} acquire_x={} final={}",
                st.current_point, next_pt, ret.cost_y, fee, ret.acquire_x, ret.final_pt
            );

            if ret.final_pt == next_pt {
                self.arrive_at(&mut st, &mut cursor, next_pt)?;
            } else {
                st.current_point = ret.final_pt;
                st.sqrt_price_96 = ret.sqrt_final_price_96;
                st.liquidity_x = ret.liquidity_x;
            }
            if ret.finished {
                break;
            }
        }

        result.state = st;
        debug!(
            "swap_y2x done: amount_y={} amount_x={} fee={} final point {}",
            result.amount_y, result.amount_x, result.fee_amount, st.current_point
        );
        Ok(result)
    }

    /// Simulates buying `desire_x` of X with Y, walking the price up
    /// towards `high_pt`.
    pub fn swap_y2x_desire_x(&self, desire_x: u128, high_pt: i32) -> Result<SwapResult, Error> {
        let mut cursor = self.begin_y2x(desire_x, high_pt)?;
        let mut st = self.state();
        let mut result = SwapResult::default();
        debug!(
            "swap_y2x_desire_x: desire={} from point {} to {}",
            desire_x, st.current_point, high_pt
        );

        let orders = self.orders();
        let mut desire_x = desire_x;
        let mut iterations = 0usize;

        while st.current_point < high_pt {
            self.tick_iteration(&mut iterations)?;

            let curr_x = orders.selling_x_at(&cursor);
            if curr_x > 0 {
                let (cost_y, acquire_x) = y2x_at_price_desire_x(desire_x, st.sqrt_price_96, curr_x)?;
                let fee = fee_on_cost(U256::from(cost_y), self.fee)?;
                desire_x -= acquire_x;
                result.amount_y += U256::from(cost_y) + fee;
                result.amount_x += U256::from(acquire_x);
                result.fee_amount += fee;
                trace!(
                    "y2x order at {}: cost_y={} fee={} acquire_x={}",
                    st.current_point, cost_y, fee, acquire_x
                );
                if desire_x == 0 {
                    break;
                }
            }

            let next_pt = orders
                .nearest_right_one_or_boundary(&cursor, self.point_delta)
                .min(high_pt);
            if st.liquidity == 0 {
                self.arrive_at(&mut st, &mut cursor, next_pt)?;
                continue;
            }
            let ret = y2x_range_desire_x(&st, next_pt, self.sqrt_rate_96, desire_x)?;
            let fee = fee_on_cost(ret.cost_y, self.fee)?;
            desire_x = to_u128(U256::from(desire_x).saturating_sub(ret.acquire_x))?;
            result.amount_y += ret.cost_y + fee;
            result.amount_x += ret.acquire_x;
            result.fee_amount += fee;
            trace!(
                "y2x desire range [{}, {}): cost_y={} fee={} acquire_x={} final={}",
                st.current_point, next_pt, ret.cost_y, fee, ret.acquire_x, ret.final_pt
            );

            if ret.final_pt == next_pt {
                self.arrive_at(&mut st, &mut cursor, next_pt)?;
            } else {
                st.current_point = ret.final_pt;
                st.sqrt_price_96 = ret.sqrt_final_price_96;
                st.liquidity_x = ret.liquidity_x;
            }
            if ret.finished {
                break;
            }
        }

        result.state = st;
        debug!(
            "swap_y2x_desire_x done: amount_y={} amount_x={} fee={} final point {}",
            result.amount_y, result.amount_x, result.fee_amount, st.current_point
        );
        Ok(result)
    }
}
