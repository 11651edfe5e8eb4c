use crate::error::{Error, OrdersError, SwapError};
use crate::math::log_pow_math::get_sqrt_price;
use crate::math::math_helpers::to_u128;
use crate::math::swap_math_x2y::{x2y_at_price, x2y_at_price_liquidity, x2y_range};
use crate::math::swap_math_x2y_desire::{
    x2y_at_price_desire_y, x2y_at_price_liquidity_desire_y, x2y_range_desire_y,
};
use crate::pool::izi_pool::IziSwapPool;
use crate::pool::orders::Cursor;
use crate::pool::state::State;
use crate::pool::swap::{SwapResult, amount_no_fee, exact_input_fee, fee_on_cost, spend};
use alloy_primitives::U256;
use log::{debug, trace};

impl IziSwapPool {
    /// Checks an X2Y bound and positions a cursor at the current point.
    ///
    /// Returns `None` when `low_pt` is the current point, in which case
    /// there is nothing to traverse.
    fn begin_x2y(&self, amount: u128, low_pt: i32) -> Result<Option<Cursor>, Error> {
        if amount == 0 {
            return Err(SwapError::AmountNotPositive.into());
        }
        if low_pt < self.left_most_pt || low_pt > self.right_most_pt {
            return Err(SwapError::BoundOutOfRange.into());
        }
        let current = self.state().current_point;
        if current < self.left_most_pt || current > self.right_most_pt {
            return Err(SwapError::CurrentPointOutOfRange.into());
        }
        if low_pt > current {
            return Err(SwapError::LowPointNotLessThanCurrent.into());
        }
        let orders = self.orders();
        if !orders.cover_low_point(low_pt) {
            return Err(OrdersError::LowPointNotCovered.into());
        }
        if !orders.cover_high_point(current) {
            return Err(OrdersError::CurrentPointNotCovered.into());
        }
        if low_pt == current {
            return Ok(None);
        }
        Ok(Some(orders.find_left_cursor(current)?))
    }

    /// Moves `st` one point below a liquidity point it has fully settled.
    /// The new point holds only Y.
    fn step_below(&self, st: &mut State, cursor: &mut Cursor) -> Result<(), Error> {
        let below = st.current_point - 1;
        *cursor = self.orders().find_left_from_cursor(cursor, below);
        *st = State {
            current_point: below,
            sqrt_price_96: get_sqrt_price(below)?,
            liquidity: self.orders().liquidity_at(cursor),
            liquidity_x: 0,
        };
        Ok(())
    }

    /// Crosses a range with no liquidity without trading, landing on `point`.
    fn skip_to(&self, st: &mut State, cursor: &mut Cursor, point: i32) -> Result<(), Error> {
        *cursor = self.orders().find_left_from_cursor(cursor, point);
        st.current_point = point;
        st.sqrt_price_96 = get_sqrt_price(point)?;
        st.liquidity_x = 0;
        Ok(())
    }

    /// Simulates selling exactly `amount` of X (fee included), walking the
    /// price down no further than `low_pt`.
    pub fn swap_x2y(&self, amount: u128, low_pt: i32) -> Result<SwapResult, Error> {
        let mut st = self.state();
        let mut result = SwapResult {
            state: st,
            ..Default::default()
        };
        let Some(mut cursor) = self.begin_x2y(amount, low_pt)? else {
            return Ok(result);
        };
        debug!(
            "swap_x2y: amount={} from point {} to {}",
            amount, st.current_point, low_pt
        );

        let orders = self.orders();
        let mut amount = amount;
        let mut iterations = 0usize;

        while low_pt <= st.current_point {
            self.tick_iteration(&mut iterations)?;

            let curr_y = orders.selling_y_at(&cursor);
            if curr_y > 0 {
                let budget = amount_no_fee(amount, self.fee)?;
                if budget == 0 {
                    break;
                }
                let (cost_x, acquire_y) = x2y_at_price(budget, st.sqrt_price_96, curr_y)?;
                let fee = exact_input_fee(amount, budget, cost_x, self.fee)?;
                amount = spend(amount, cost_x, fee)?;
                result.amount_x += U256::from(cost_x + fee);
                result.amount_y += U256::from(acquire_y);
                result.fee_amount += U256::from(fee);
                trace!(
                    "x2y order at {}: cost_x={} fee={} acquire_y={}",
                    st.current_point, cost_x, fee, acquire_y
                );
                if acquire_y < curr_y || amount == 0 {
                    break;
                }
            }

            if cursor.is_liquidity_point {
                if st.liquidity_x < st.liquidity {
                    let budget = amount_no_fee(amount, self.fee)?;
                    if budget == 0 {
                        break;
                    }
                    let (cost_x, acquire_y, liquidity_x) = x2y_at_price_liquidity(
                        budget,
                        st.sqrt_price_96,
                        st.liquidity,
                        st.liquidity_x,
                    )?;
                    let fee = exact_input_fee(amount, budget, cost_x, self.fee)?;
                    amount = spend(amount, cost_x, fee)?;
                    result.amount_x += U256::from(cost_x + fee);
                    result.amount_y += acquire_y;
                    result.fee_amount += U256::from(fee);
                    st.liquidity_x = liquidity_x;
                    if liquidity_x < st.liquidity || amount == 0 {
                        break;
                    }
                }
                if st.current_point == low_pt {
                    break;
                }
                self.step_below(&mut st, &mut cursor)?;
                continue;
            }

            let next_pt = orders
                .nearest_left_one_or_boundary(&cursor, self.point_delta)
                .max(low_pt);
            if st.liquidity == 0 {
                if next_pt == st.current_point {
                    break;
                }
                self.skip_to(&mut st, &mut cursor, next_pt)?;
                continue;
            }
            let budget = amount_no_fee(amount, self.fee)?;
            if budget == 0 {
                break;
            }
            let ret = x2y_range(&st, next_pt, self.sqrt_rate_96, budget)?;
            let fee = exact_input_fee(amount, budget, ret.cost_x, self.fee)?;
            amount = spend(amount, ret.cost_x, fee)?;
            result.amount_x += U256::from(ret.cost_x + fee);
            result.amount_y += ret.acquire_y;
            result.fee_amount += U256::from(fee);
            trace!(
                "x2y range [{}, {}]: cost_x={} fee={} acquire_y={} final={}",
                next_pt, st.current_point, ret.cost_x, fee, ret.acquire_y, ret.final_pt
            );

            let start_pt = st.current_point;
            st.current_point = ret.final_pt;
            st.sqrt_price_96 = ret.sqrt_final_price_96;
            st.liquidity_x = ret.liquidity_x;
            if ret.finished || ret.final_pt == start_pt {
                break;
            }
            cursor = orders.find_left_from_cursor(&cursor, next_pt);
        }

        result.state = st;
        debug!(
            "swap_x2y done: amount_x={} amount_y={} fee={} final point {}",
            result.amount_x, result.amount_y, result.fee_amount, st.current_point
        );
        Ok(result)
    }

    /// Simulates buying `desire_y` of Y with X, walking the price down no
    /// further than `low_pt`.
    pub fn swap_x2y_desire_y(&self, desire_y: u128, low_pt: i32) -> Result<SwapResult, Error> {
        let mut st = self.state();
        let mut result = SwapResult {
            state: st,
            ..Default::default()
        };
        let Some(mut cursor) = self.begin_x2y(desire_y, low_pt)? else {
            return Ok(result);
        };
        debug!(
            "swap_x2y_desire_y: desire={} from point {} to {}",
            desire_y, st.current_point, low_pt
        );

        let orders = self.orders();
        let mut desire_y = desire_y;
        let mut iterations = 0usize;

        while low_pt <= st.current_point {
            self.tick_iteration(&mut iterations)?;

            let curr_y = orders.selling_y_at(&cursor);
            if curr_y > 0 {
                let (cost_x, acquire_y) = x2y_at_price_desire_y(desire_y, st.sqrt_price_96, curr_y)?;
                let fee = fee_on_cost(U256::from(cost_x), self.fee)?;
                desire_y -= acquire_y;
                result.amount_x += U256::from(cost_x) + fee;
                result.amount_y += U256::from(acquire_y);
                result.fee_amount += fee;
                trace!(
                    "x2y order at {}: cost_x={} fee={} acquire_y={}",
                    st.current_point, cost_x, fee, acquire_y
                );
                if desire_y == 0 {
                    break;
                }
            }

            if cursor.is_liquidity_point {
                if st.liquidity_x < st.liquidity {
                    let (cost_x, acquire_y, liquidity_x) = x2y_at_price_liquidity_desire_y(
                        U256::from(desire_y),
                        st.sqrt_price_96,
                        st.liquidity,
                        st.liquidity_x,
                    )?;
                    let fee = fee_on_cost(cost_x, self.fee)?;
                    desire_y = to_u128(U256::from(desire_y).saturating_sub(acquire_y))?;
                    result.amount_x += cost_x + fee;
                    result.amount_y += acquire_y;
                    result.fee_amount += fee;
                    st.liquidity_x = liquidity_x;
                    if liquidity_x < st.liquidity || desire_y == 0 {
                        break;
                    }
                }
                if st.current_point == low_pt {
                    break;
                }
                self.step_below(&mut st, &mut cursor)?;
                continue;
            }

            let next_pt = orders
                .nearest_left_one_or_boundary(&cursor, self.point_delta)
                .max(low_pt);
            if st.liquidity == 0 {
                if next_pt == st.current_point {
                    break;
                }
                self.skip_to(&mut st, &mut cursor, next_pt)?;
                continue;
            }
            let ret = x2y_range_desire_y(&st, next_pt, self.sqrt_rate_96, desire_y)?;
            let fee = fee_on_cost(ret.cost_x, self.fee)?;
            desire_y = to_u128(U256::from(desire_y).saturating_sub(ret.acquire_y))?;
            result.amount_x += ret.cost_x + fee;
            result.amount_y += ret.acquire_y;
            result.fee_amount += fee;
            trace!(
                "x2y desire range [{}, {}]: cost_x={} fee={} acquire_y={} final={}",
                next_pt, st.current_point, ret.cost_x, fee, ret.acquire_y, ret.final_pt
            );

            let start_pt = st.current_point;
            st.current_point = ret.final_pt;
            st.sqrt_price_96 = ret.sqrt_final_price_96;
            st.liquidity_x = ret.liquidity_x;
            if ret.finished || desire_y == 0 || ret.final_pt == start_pt {
                break;
            }
            cursor = orders.find_left_from_cursor(&cursor, next_pt);
        }

        result.state = st;
        debug!(
            "swap_x2y_desire_y done: amount_x={} amount_y={} fee={} final point {}",
            result.amount_x, result.amount_y, result.fee_amount, st.current_point
        );
        Ok(result)
    }
}
