use crate::Q96;
use crate::error::Error;
use crate::math::amount_math::{Range, RangeCompRet, get_amount_x, get_amount_y};
use crate::math::log_pow_math::{get_log_sqrt_price_floor, get_sqrt_price};
use crate::math::math_helpers::{mul_div_ceil, mul_div_floor, to_u128};
use crate::pool::state::State;
use alloy_primitives::U256;

/// Result of buying a desired amount of Y with X, walking down to a left
/// point.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RangeRetState {
    /// The desired amount was reached before the left point.
    pub finished: bool,
    pub cost_x: U256,
    pub acquire_y: U256,
    pub final_pt: i32,
    pub sqrt_final_price_96: U256,
    pub liquidity_x: u128,
}

/// Buys up to `desire_y` from a resting sell‑Y order of `curr_y`.
/// Returns `(cost_x, acquire_y)`.
pub fn x2y_at_price_desire_y(
    desire_y: u128,
    sqrt_price_96: U256,
    curr_y: u128,
) -> Result<(u128, u128), Error> {
    let acquire_y = desire_y.min(curr_y);
    let l = mul_div_ceil(U256::from(acquire_y), Q96, sqrt_price_96)?;
    let cost_x = to_u128(mul_div_ceil(l, Q96, sqrt_price_96)?)?;
    Ok((cost_x, acquire_y))
}

/// Converts Y liquidity at one point into X until `desire_y` is bought or
/// the point's Y is gone. Returns `(cost_x, acquire_y, new_liquidity_x)`.
pub fn x2y_at_price_liquidity_desire_y(
    desire_y: U256,
    sqrt_price_96: U256,
    liquidity: u128,
    liquidity_x: u128,
) -> Result<(U256, U256, u128), Error> {
    let max_transform_liquidity_y = mul_div_ceil(desire_y, Q96, sqrt_price_96)?;
    let liquidity_y = liquidity - liquidity_x;
    let transform_liquidity_y =
        to_u128(max_transform_liquidity_y.min(U256::from(liquidity_y)))?;

    let cost_x = mul_div_ceil(U256::from(transform_liquidity_y), Q96, sqrt_price_96)?;
    let acquire_y = mul_div_floor(U256::from(transform_liquidity_y), sqrt_price_96, Q96)?;
    Ok((cost_x, acquire_y, liquidity_x + transform_liquidity_y))
}

/// Desired‑output counterpart of `x2y_range_complete`. Locates the first
/// point from the top whose cumulative Y would exceed `desire_y`.
pub fn x2y_range_complete_desire_y(rg: &Range, desire_y: U256) -> Result<RangeCompRet, Error> {
    let max_y = get_amount_y(
        rg.liquidity,
        rg.sqrt_price_l_96,
        rg.sqrt_price_r_96,
        rg.sqrt_rate_96,
        false,
    )?;

    if max_y <= desire_y {
        return Ok(RangeCompRet {
            cost: get_amount_x(
                rg.liquidity,
                rg.left_pt,
                rg.right_pt,
                rg.sqrt_price_r_96,
                rg.sqrt_rate_96,
                true,
            )?,
            acquire: max_y,
            complete_liquidity: true,
            loc_pt: rg.left_pt,
            sqrt_loc_96: rg.sqrt_price_l_96,
        });
    }

    // lowest sqrt price whose points up to the right end stay within desire
    let delta_96 = mul_div_ceil(desire_y, rg.sqrt_rate_96 - Q96, U256::from(rg.liquidity))?;
    let sqrt_target_96 = rg
        .sqrt_price_r_96
        .saturating_sub(delta_96)
        .max(rg.sqrt_price_l_96);
    let log_value = get_log_sqrt_price_floor(sqrt_target_96)?;

    let first_full_pt = (log_value + 1).clamp(rg.left_pt + 1, rg.right_pt);
    let loc_pt = first_full_pt - 1;

    let (cost, acquire) = if first_full_pt == rg.right_pt {
        (U256::ZERO, U256::ZERO)
    } else {
        let acquire = get_amount_y(
            rg.liquidity,
            get_sqrt_price(first_full_pt)?,
            rg.sqrt_price_r_96,
            rg.sqrt_rate_96,
            false,
        )?;
        let cost = get_amount_x(
            rg.liquidity,
            first_full_pt,
            rg.right_pt,
            rg.sqrt_price_r_96,
            rg.sqrt_rate_96,
            true,
        )?;
        (cost, acquire)
    };

    Ok(RangeCompRet {
        cost,
        acquire,
        complete_liquidity: false,
        loc_pt,
        sqrt_loc_96: get_sqrt_price(loc_pt)?,
    })
}

/// Buys up to `desire_y` walking down from the current point to `left_pt`.
/// Settles the current point the same way as `x2y_range`.
pub fn x2y_range_desire_y(
    state: &State,
    left_pt: i32,
    sqrt_rate_96: U256,
    desire_y: u128,
) -> Result<RangeRetState, Error> {
    let mut ret = RangeRetState {
        final_pt: state.current_point,
        sqrt_final_price_96: state.sqrt_price_96,
        liquidity_x: state.liquidity_x,
        ..Default::default()
    };
    let mut desire_y = U256::from(desire_y);
    let mut right_pt = state.current_point;
    let mut sqrt_price_r_96 = state.sqrt_price_96;

    let current_has_y = state.liquidity_x < state.liquidity;
    if current_has_y && (state.liquidity_x > 0 || left_pt == state.current_point) {
        let (cost_x, acquire_y, liquidity_x) = x2y_at_price_liquidity_desire_y(
            desire_y,
            state.sqrt_price_96,
            state.liquidity,
            state.liquidity_x,
        )?;
        ret.cost_x = cost_x;
        ret.acquire_y = acquire_y;
        ret.liquidity_x = liquidity_x;
        if liquidity_x < state.liquidity || acquire_y >= desire_y {
            ret.finished = true;
            return Ok(ret);
        }
        desire_y -= acquire_y;
    } else if current_has_y {
        right_pt = state.current_point + 1;
        sqrt_price_r_96 = get_sqrt_price(right_pt)?;
    }

    if left_pt >= right_pt {
        return Ok(ret);
    }

    let sqrt_price_l_96 = get_sqrt_price(left_pt)?;
    let comp = x2y_range_complete_desire_y(
        &Range {
            liquidity: state.liquidity,
            sqrt_price_l_96,
            left_pt,
            sqrt_price_r_96,
            right_pt,
            sqrt_rate_96,
        },
        desire_y,
    )?;
    ret.cost_x += comp.cost;
    ret.acquire_y += comp.acquire;
    desire_y = desire_y.saturating_sub(comp.acquire);

    if comp.complete_liquidity {
        ret.finished = desire_y.is_zero();
        ret.final_pt = left_pt;
        ret.sqrt_final_price_96 = sqrt_price_l_96;
        ret.liquidity_x = state.liquidity;
    } else {
        let (loc_cost_x, loc_acquire_y, liquidity_x) =
            x2y_at_price_liquidity_desire_y(desire_y, comp.sqrt_loc_96, state.liquidity, 0)?;
        ret.cost_x += loc_cost_x;
        ret.acquire_y += loc_acquire_y;
        ret.liquidity_x = liquidity_x;
        ret.finished = true;
        ret.final_pt = comp.loc_pt;
        ret.sqrt_final_price_96 = comp.sqrt_loc_96;
    }
    Ok(ret)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate() -> U256 {
        get_sqrt_price(1).unwrap()
    }

    #[test]
    fn at_price_desire_caps_at_order_size() {
        let s = get_sqrt_price(0).unwrap();
        assert_eq!(x2y_at_price_desire_y(500, s, 10_000).unwrap(), (500, 500));
        assert_eq!(x2y_at_price_desire_y(500, s, 300).unwrap(), (300, 300));
    }

    #[test]
    fn at_price_liquidity_desire_delivers_at_least_desired() {
        let s = get_sqrt_price(-2000).unwrap();
        let (cost, acquire, lx) =
            x2y_at_price_liquidity_desire_y(U256::from(12_345u64), s, 10_000_000, 0).unwrap();
        assert!(acquire >= U256::from(12_345u64));
        assert!(lx > 0 && lx < 10_000_000);
        assert!(cost > U256::ZERO);
    }

    #[test]
    fn range_desire_complete_takes_all_y() {
        let liquidity = 2_000_000_000u128;
        let st = State::at_point(200, liquidity, liquidity).unwrap();
        let ret = x2y_range_desire_y(&st, 0, rate(), u128::MAX / 4).unwrap();
        let expected =
            get_amount_y(liquidity, get_sqrt_price(0).unwrap(), st.sqrt_price_96, rate(), false)
                .unwrap();
        assert_eq!(ret.acquire_y, expected);
        assert!(!ret.finished);
        assert_eq!(ret.final_pt, 0);
    }

    #[test]
    fn range_desire_partial_meets_target() {
        let liquidity = 2_000_000_000u128;
        let st = State::at_point(200, liquidity, liquidity).unwrap();
        let all_y =
            get_amount_y(liquidity, get_sqrt_price(0).unwrap(), st.sqrt_price_96, rate(), false)
                .unwrap();
        let desire = to_u128(all_y / U256::from(3u8)).unwrap();

        let ret = x2y_range_desire_y(&st, 0, rate(), desire).unwrap();
        assert!(ret.finished);
        assert!(ret.acquire_y >= U256::from(desire));
        assert!(ret.final_pt > 0 && ret.final_pt < 200);
        // overshoot is bounded by one point of liquidity
        let one_point = mul_div_ceil(U256::from(liquidity), ret.sqrt_final_price_96, Q96).unwrap();
        assert!(ret.acquire_y - U256::from(desire) <= one_point);
    }
}
