use crate::Q96;
use crate::error::Error;
use crate::math::amount_math::{Range, RangeCompRet, get_amount_x, get_amount_y};
use crate::math::log_pow_math::{MAX_SQRT_PRICE, get_log_sqrt_price_floor, get_sqrt_price};
use crate::math::math_helpers::{mul_div_ceil, mul_div_floor, to_u128};
use crate::pool::state::State;
use alloy_primitives::U256;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RangeRetState {
    pub finished: bool,
    pub cost_y: U256,
    pub acquire_x: U256,
    pub final_pt: i32,
    pub sqrt_final_price_96: U256,
    pub liquidity_x: u128,
}

/// Buys up to `desire_x` from a resting sell‑X order of `curr_x`.
/// Returns `(cost_y, acquire_x)`.
pub fn y2x_at_price_desire_x(
    desire_x: u128,
    sqrt_price_96: U256,
    curr_x: u128,
) -> Result<(u128, u128), Error> {
    let acquire_x = desire_x.min(curr_x);
    let l = mul_div_ceil(U256::from(acquire_x), sqrt_price_96, Q96)?;
    let cost_y = to_u128(mul_div_ceil(l, sqrt_price_96, Q96)?)?;
    Ok((cost_y, acquire_x))
}

/// Returns `(cost_y, acquire_x, new_liquidity_x)`.
pub fn y2x_at_price_liquidity_desire_x(
    desire_x: U256,
    sqrt_price_96: U256,
    liquidity_x: u128,
) -> Result<(U256, U256, u128), Error> {
    let max_transform_liquidity_x = mul_div_ceil(desire_x, sqrt_price_96, Q96)?;
    let transform_liquidity_x =
        to_u128(max_transform_liquidity_x.min(U256::from(liquidity_x)))?;

    let cost_y = mul_div_ceil(U256::from(transform_liquidity_x), sqrt_price_96, Q96)?;
    let acquire_x = mul_div_floor(U256::from(transform_liquidity_x), Q96, sqrt_price_96)?;
    Ok((cost_y, acquire_x, liquidity_x - transform_liquidity_x))
}

/// Desired‑output counterpart of `y2x_range_complete`.
///
/// With `r = sqrt(1.0001)`, the X held by points `[left, left + n)` reaches
/// `desire_x` once `r^n >= 1 / (1 - desire_x · (sL - sL / r) / L)`. The
/// floor of that `n` gives `loc_pt`, clamped into `[left_pt, right_pt - 1]`.
pub fn y2x_range_complete_desire_x(rg: &Range, desire_x: U256) -> Result<RangeCompRet, Error> {
    let max_x = get_amount_x(
        rg.liquidity,
        rg.left_pt,
        rg.right_pt,
        rg.sqrt_price_r_96,
        rg.sqrt_rate_96,
        false,
    )?;

    if max_x <= desire_x {
        return Ok(RangeCompRet {
            cost: get_amount_y(
                rg.liquidity,
                rg.sqrt_price_l_96,
                rg.sqrt_price_r_96,
                rg.sqrt_rate_96,
                true,
            )?,
            acquire: max_x,
            complete_liquidity: true,
            loc_pt: rg.right_pt,
            sqrt_loc_96: rg.sqrt_price_r_96,
        });
    }

    let sqrt_price_pl_m1_96 = mul_div_floor(rg.sqrt_price_l_96, Q96, rg.sqrt_rate_96)?;
    let t_96 = mul_div_floor(
        desire_x,
        rg.sqrt_price_l_96 - sqrt_price_pl_m1_96,
        U256::from(rg.liquidity),
    )?;

    let loc_pt = if t_96 >= Q96 {
        rg.right_pt - 1
    } else {
        let sqrt_value_96 = mul_div_floor(Q96, Q96, Q96 - t_96)?;
        let log_value = get_log_sqrt_price_floor(sqrt_value_96.min(MAX_SQRT_PRICE - U256::ONE))?;
        (rg.left_pt + log_value).clamp(rg.left_pt, rg.right_pt - 1)
    };
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
        (cost, acquire)
    };

    Ok(RangeCompRet {
        cost,
        acquire,
        complete_liquidity: false,
        loc_pt,
        sqrt_loc_96,
    })
}

/// Buys up to `desire_x` walking up from the current point towards
/// `right_pt`. Settles the current point the same way as `y2x_range`.
pub fn y2x_range_desire_x(
    state: &State,
    right_pt: i32,
    sqrt_rate_96: U256,
    desire_x: u128,
) -> Result<RangeRetState, Error> {
    let mut ret = RangeRetState {
        final_pt: state.current_point,
        sqrt_final_price_96: state.sqrt_price_96,
        liquidity_x: state.liquidity_x,
        ..Default::default()
    };
    let mut desire_x = U256::from(desire_x);
    let mut left_pt = state.current_point;
    let mut sqrt_price_l_96 = state.sqrt_price_96;

    if state.liquidity_x < state.liquidity {
        if state.liquidity_x > 0 {
            let (cost_y, acquire_x, liquidity_x) = y2x_at_price_liquidity_desire_x(
                desire_x,
                state.sqrt_price_96,
                state.liquidity_x,
            )?;
            ret.cost_y = cost_y;
            ret.acquire_x = acquire_x;
            ret.liquidity_x = liquidity_x;
            if liquidity_x > 0 || acquire_x >= desire_x {
                ret.finished = true;
                return Ok(ret);
            }
            desire_x -= acquire_x;
        }
        left_pt = state.current_point + 1;
        sqrt_price_l_96 = get_sqrt_price(left_pt)?;
    }

    if left_pt >= right_pt {
        ret.final_pt = right_pt;
        ret.sqrt_final_price_96 = get_sqrt_price(right_pt)?;
        ret.liquidity_x = state.liquidity;
        ret.finished = desire_x.is_zero();
        return Ok(ret);
    }

    let sqrt_price_r_96 = get_sqrt_price(right_pt)?;
    let comp = y2x_range_complete_desire_x(
        &Range {
            liquidity: state.liquidity,
            sqrt_price_l_96,
            left_pt,
            sqrt_price_r_96,
            right_pt,
            sqrt_rate_96,
        },
        desire_x,
    )?;
    ret.cost_y += comp.cost;
    ret.acquire_x += comp.acquire;
    desire_x = desire_x.saturating_sub(comp.acquire);

    if comp.complete_liquidity {
        ret.finished = desire_x.is_zero();
        ret.final_pt = right_pt;
        ret.sqrt_final_price_96 = sqrt_price_r_96;
        ret.liquidity_x = state.liquidity;
    } else {
        let (loc_cost_y, loc_acquire_x, liquidity_x) =
            y2x_at_price_liquidity_desire_x(desire_x, comp.sqrt_loc_96, state.liquidity)?;
        ret.cost_y += loc_cost_y;
        ret.acquire_x += loc_acquire_x;
        ret.liquidity_x = liquidity_x;
        ret.finished = true;
        ret.final_pt = comp.loc_pt;
        ret.sqrt_final_price_96 = comp.sqrt_loc_96;
    }
    Ok(ret)
}
