use crate::Q96;
use crate::error::Error;
use crate::math::amount_math::{Range, RangeCompRet, get_amount_x, get_amount_y};
use crate::math::log_pow_math::{MAX_SQRT_PRICE, get_log_sqrt_price_floor, get_sqrt_price};
use crate::math::math_helpers::{mul_div_ceil, mul_div_floor, to_u128};
use crate::pool::state::State;
use alloy_primitives::U256;

/// Result of swapping X for Y from the current point down to a left point.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RangeRetState {
    /// The input budget ran out before the left point was reached.
    pub finished: bool,
    pub cost_x: u128,
    pub acquire_y: U256,
    pub final_pt: i32,
    pub sqrt_final_price_96: U256,
    /// Liquidity held as X at `final_pt` after the swap.
    pub liquidity_x: u128,
}

/// Sells up to `amount_x` into a resting sell‑Y order of `curr_y` at one
/// price. Returns `(cost_x, acquire_y)`, with `cost_x <= amount_x`.
pub fn x2y_at_price(
    amount_x: u128,
    sqrt_price_96: U256,
    curr_y: u128,
) -> Result<(u128, u128), Error> {
    let l = mul_div_floor(U256::from(amount_x), sqrt_price_96, Q96)?;
    let acquire_y = to_u128(mul_div_floor(l, sqrt_price_96, Q96)?)?.min(curr_y);

    let l = mul_div_ceil(U256::from(acquire_y), Q96, sqrt_price_96)?;
    let cost_x = to_u128(mul_div_ceil(l, Q96, sqrt_price_96)?)?;
    Ok((cost_x, acquire_y))
}

/// Converts the Y side of the liquidity at a single point into X.
///
/// Only `liquidity - liquidity_x` can be transformed. Returns
/// `(cost_x, acquire_y, new_liquidity_x)`.
pub fn x2y_at_price_liquidity(
    amount_x: u128,
    sqrt_price_96: U256,
    liquidity: u128,
    liquidity_x: u128,
) -> Result<(u128, U256, u128), Error> {
    let max_transform_liquidity_y = mul_div_floor(U256::from(amount_x), sqrt_price_96, Q96)?;
    let liquidity_y = liquidity - liquidity_x;
    let transform_liquidity_y =
        to_u128(max_transform_liquidity_y.min(U256::from(liquidity_y)))?;

    let cost_x = to_u128(mul_div_ceil(
        U256::from(transform_liquidity_y),
        Q96,
        sqrt_price_96,
    )?)?;
    let acquire_y = mul_div_floor(U256::from(transform_liquidity_y), sqrt_price_96, Q96)?;
    Ok((cost_x, acquire_y, liquidity_x + transform_liquidity_y))
}

/// Swaps across every point of `rg` that `amount_x` can fully pay for,
/// walking down from `rg.right_pt`.
///
/// If the whole range is affordable it completes. Otherwise the first
/// fully converted point is located through the inverse log and clamped
/// into `[left_pt + 1, right_pt]`. The point just below it, `loc_pt`, is
/// left for the caller to settle at its own price.
pub fn x2y_range_complete(rg: &Range, amount_x: u128) -> Result<RangeCompRet, Error> {
    let max_x = get_amount_x(
        rg.liquidity,
        rg.left_pt,
        rg.right_pt,
        rg.sqrt_price_r_96,
        rg.sqrt_rate_96,
        true,
    )?;
    let amount = U256::from(amount_x);

    if max_x <= amount {
        return Ok(RangeCompRet {
            cost: max_x,
            acquire: get_amount_y(
                rg.liquidity,
                rg.sqrt_price_l_96,
                rg.sqrt_price_r_96,
                rg.sqrt_rate_96,
                false,
            )?,
            complete_liquidity: true,
            loc_pt: rg.left_pt,
            sqrt_loc_96: rg.sqrt_price_l_96,
        });
    }

    // sqrt(1.0001^n) of the n points the budget covers
    let sqrt_price_pr_m1_96 = mul_div_floor(rg.sqrt_price_r_96, Q96, rg.sqrt_rate_96)?;
    let sqrt_value_96 = mul_div_floor(
        amount,
        rg.sqrt_price_r_96 - sqrt_price_pr_m1_96,
        U256::from(rg.liquidity),
    )? + Q96;
    let log_value = get_log_sqrt_price_floor(sqrt_value_96.min(MAX_SQRT_PRICE - U256::ONE))?;

    let first_full_pt = (rg.right_pt - log_value).clamp(rg.left_pt + 1, rg.right_pt);
    let loc_pt = first_full_pt - 1;

    let (cost, acquire) = if first_full_pt == rg.right_pt {
        (U256::ZERO, U256::ZERO)
    } else {
        let cost = get_amount_x(
            rg.liquidity,
            first_full_pt,
            rg.right_pt,
            rg.sqrt_price_r_96,
            rg.sqrt_rate_96,
            true,
        )?;
        let acquire = get_amount_y(
            rg.liquidity,
            get_sqrt_price(first_full_pt)?,
            rg.sqrt_price_r_96,
            rg.sqrt_rate_96,
            false,
        )?;
        (cost.min(amount), acquire)
    };

    Ok(RangeCompRet {
        cost,
        acquire,
        complete_liquidity: false,
        loc_pt,
        sqrt_loc_96: get_sqrt_price(loc_pt)?,
    })
}

/// Swaps X for Y from `state.current_point` down to `left_pt` under the
/// state's constant liquidity.
///
/// The current point is settled first. A mixed point, or the current point
/// when it is also the left bound, goes through
/// [`x2y_at_price_liquidity`]. A point holding only Y is folded into the
/// closed form by extending the range one point upward.
pub fn x2y_range(
    state: &State,
    left_pt: i32,
    sqrt_rate_96: U256,
    amount_x: u128,
) -> Result<RangeRetState, Error> {
    let mut ret = RangeRetState {
        final_pt: state.current_point,
        sqrt_final_price_96: state.sqrt_price_96,
        liquidity_x: state.liquidity_x,
        ..Default::default()
    };
    let mut amount_x = amount_x;
    let mut right_pt = state.current_point;
    let mut sqrt_price_r_96 = state.sqrt_price_96;

    let current_has_y = state.liquidity_x < state.liquidity;
    if current_has_y && (state.liquidity_x > 0 || left_pt == state.current_point) {
        let (cost_x, acquire_y, liquidity_x) = x2y_at_price_liquidity(
            amount_x,
            state.sqrt_price_96,
            state.liquidity,
            state.liquidity_x,
        )?;
        ret.cost_x = cost_x;
        ret.acquire_y = acquire_y;
        ret.liquidity_x = liquidity_x;
        if liquidity_x < state.liquidity || cost_x >= amount_x {
            ret.finished = true;
            return Ok(ret);
        }
        amount_x -= cost_x;
    } else if current_has_y {
        right_pt = state.current_point + 1;
        sqrt_price_r_96 = get_sqrt_price(right_pt)?;
    }

    if left_pt >= right_pt {
        return Ok(ret);
    }

    let sqrt_price_l_96 = get_sqrt_price(left_pt)?;
    let comp = x2y_range_complete(
        &Range {
            liquidity: state.liquidity,
            sqrt_price_l_96,
            left_pt,
            sqrt_price_r_96,
            right_pt,
            sqrt_rate_96,
        },
        amount_x,
    )?;
    let cost_x = to_u128(comp.cost)?;
    ret.cost_x += cost_x;
    amount_x -= cost_x;
    ret.acquire_y += comp.acquire;

    if comp.complete_liquidity {
        ret.finished = amount_x == 0;
        ret.final_pt = left_pt;
        ret.sqrt_final_price_96 = sqrt_price_l_96;
        ret.liquidity_x = state.liquidity;
    } else {
        let (loc_cost_x, loc_acquire_y, liquidity_x) =
            x2y_at_price_liquidity(amount_x, comp.sqrt_loc_96, state.liquidity, 0)?;
        ret.cost_x += loc_cost_x;
        ret.acquire_y += loc_acquire_y;
        ret.liquidity_x = liquidity_x;
        ret.finished = true;
        ret.final_pt = comp.loc_pt;
        ret.sqrt_final_price_96 = comp.sqrt_loc_96;
    }
    Ok(ret)
}
