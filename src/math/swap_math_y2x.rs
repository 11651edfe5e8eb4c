use crate::Q96;
use crate::error::Error;
use crate::math::amount_math::{Range, RangeCompRet, get_amount_x, get_amount_y};
use crate::math::log_pow_math::{MAX_SQRT_PRICE, get_log_sqrt_price_floor, get_sqrt_price};
use crate::math::math_helpers::{mul_div_ceil, mul_div_floor, to_u128};
use crate::pool::state::State;
use alloy_primitives::U256;

/// Result of swapping Y for X from the current point up to a right point.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RangeRetState {
    /// The input budget ran out before the right point was reached.
    pub finished: bool,
    pub cost_y: u128,
    pub acquire_x: U256,
    pub final_pt: i32,
    pub sqrt_final_price_96: U256,
    pub liquidity_x: u128,
}

/// Sells up to `amount_y` into a resting sell‑X order of `curr_x`.
/// Returns `(cost_y, acquire_x)`, with `cost_y <= amount_y`.
pub fn y2x_at_price(
    amount_y: u128,
    sqrt_price_96: U256,
    curr_x: u128,
) -> Result<(u128, u128), Error> {
    let l = mul_div_floor(U256::from(amount_y), Q96, sqrt_price_96)?;
    let acquire_x = to_u128(mul_div_floor(l, Q96, sqrt_price_96)?)?.min(curr_x);

    let l = mul_div_ceil(U256::from(acquire_x), sqrt_price_96, Q96)?;
    let cost_y = to_u128(mul_div_ceil(l, sqrt_price_96, Q96)?)?;
    Ok((cost_y, acquire_x))
}

/// Converts the X side of the liquidity at one point into Y.
/// Returns `(cost_y, acquire_x, new_liquidity_x)`.
pub fn y2x_at_price_liquidity(
    amount_y: u128,
    sqrt_price_96: U256,
    liquidity_x: u128,
) -> Result<(u128, U256, u128), Error> {
    let max_transform_liquidity_x = mul_div_floor(U256::from(amount_y), Q96, sqrt_price_96)?;
    let transform_liquidity_x =
        to_u128(max_transform_liquidity_x.min(U256::from(liquidity_x)))?;

    let cost_y = to_u128(mul_div_ceil(
        U256::from(transform_liquidity_x),
        sqrt_price_96,
        Q96,
    )?)?;
    let acquire_x = mul_div_floor(U256::from(transform_liquidity_x), Q96, sqrt_price_96)?;
    Ok((cost_y, acquire_x, liquidity_x - transform_liquidity_x))
}

/// Swaps across every point of `rg` that `amount_y` can fully pay for,
/// walking up from `rg.left_pt`.
///
/// On a partial fill `loc_pt` is the first point not paid for, clamped
/// into `[left_pt, right_pt - 1]`.
pub fn y2x_range_complete(rg: &Range, amount_y: u128) -> Result<RangeCompRet, Error> {
    let max_y = get_amount_y(
        rg.liquidity,
        rg.sqrt_price_l_96,
        rg.sqrt_price_r_96,
        rg.sqrt_rate_96,
        true,
    )?;
    let amount = U256::from(amount_y);

    if max_y <= amount {
        return Ok(RangeCompRet {
            cost: max_y,
            acquire: get_amount_x(
                rg.liquidity,
                rg.left_pt,
                rg.right_pt,
                rg.sqrt_price_r_96,
                rg.sqrt_rate_96,
                false,
            )?,
            complete_liquidity: true,
            loc_pt: rg.right_pt,
            sqrt_loc_96: rg.sqrt_price_r_96,
        });
    }

    let sqrt_loc_bound_96 = mul_div_floor(
        amount,
        rg.sqrt_rate_96 - Q96,
        U256::from(rg.liquidity),
    )? + rg.sqrt_price_l_96;
    let log_value =
        get_log_sqrt_price_floor(sqrt_loc_bound_96.min(MAX_SQRT_PRICE - U256::ONE))?;
    let loc_pt = log_value.clamp(rg.left_pt, rg.right_pt - 1);
    let sqrt_loc_96 = get_sqrt_price(loc_pt)?;

    let (cost, acquire) = if loc_pt == rg.left_pt {
        (U256::ZERO, U256::ZERO)
    } else {
        let cost = get_amount_y(
            rg.liquidity,
            rg.sqrt_price_l_96,
            sqrt_loc_96,
            rg.sqrt_rate_96,
            true,
        )?;
        let acquire = get_amount_x(
            rg.liquidity,
            rg.left_pt,
            loc_pt,
            sqrt_loc_96,
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
        sqrt_loc_96,
    })
}

/// Swaps Y for X from `state.current_point` up to (not including)
/// `right_pt` under the state's constant liquidity.
///
/// A current point held entirely as X joins the closed form. Otherwise the
/// X part, if any, is taken at the current price first and the closed
/// form starts one point higher.
pub fn y2x_range(
    state: &State,
    right_pt: i32,
    sqrt_rate_96: U256,
    amount_y: u128,
) -> Result<RangeRetState, Error> {
    let mut ret = RangeRetState {
        final_pt: state.current_point,
        sqrt_final_price_96: state.sqrt_price_96,
        liquidity_x: state.liquidity_x,
        ..Default::default()
    };
    let mut amount_y = amount_y;
    let mut left_pt = state.current_point;
    let mut sqrt_price_l_96 = state.sqrt_price_96;

    if state.liquidity_x < state.liquidity {
        if state.liquidity_x > 0 {
            let (cost_y, acquire_x, liquidity_x) =
                y2x_at_price_liquidity(amount_y, state.sqrt_price_96, state.liquidity_x)?;
            ret.cost_y = cost_y;
            ret.acquire_x = acquire_x;
            ret.liquidity_x = liquidity_x;
            if liquidity_x > 0 || cost_y >= amount_y {
                ret.finished = true;
                return Ok(ret);
            }
            amount_y -= cost_y;
        }
        left_pt = state.current_point + 1;
        sqrt_price_l_96 = get_sqrt_price(left_pt)?;
    }

    if left_pt >= right_pt {
        ret.final_pt = right_pt;
        ret.sqrt_final_price_96 = get_sqrt_price(right_pt)?;
        ret.liquidity_x = state.liquidity;
        ret.finished = amount_y == 0;
        return Ok(ret);
    }

    let sqrt_price_r_96 = get_sqrt_price(right_pt)?;
    let comp = y2x_range_complete(
        &Range {
            liquidity: state.liquidity,
            sqrt_price_l_96,
            left_pt,
            sqrt_price_r_96,
            right_pt,
            sqrt_rate_96,
        },
        amount_y,
    )?;
    let cost_y = to_u128(comp.cost)?;
    ret.cost_y += cost_y;
    amount_y -= cost_y;
    ret.acquire_x += comp.acquire;

    if comp.complete_liquidity {
        ret.finished = amount_y == 0;
        ret.final_pt = right_pt;
        ret.sqrt_final_price_96 = sqrt_price_r_96;
        ret.liquidity_x = state.liquidity;
    } else {
        let (loc_cost_y, loc_acquire_x, liquidity_x) =
            y2x_at_price_liquidity(amount_y, comp.sqrt_loc_96, state.liquidity)?;
        ret.cost_y += loc_cost_y;
        ret.acquire_x += loc_acquire_x;
        ret.liquidity_x = liquidity_x;
        ret.finished = true;
        ret.final_pt = comp.loc_pt;
        ret.sqrt_final_price_96 = comp.sqrt_loc_96;
    }
    Ok(ret)
}
