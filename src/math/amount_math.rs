use crate::Q96;
use crate::error::Error;
use crate::math::log_pow_math::get_sqrt_price;
use crate::math::math_helpers::{mul_div_ceil, mul_div_floor};
use alloy_primitives::U256;

/// A contiguous price range `[left_pt, right_pt)` under one constant
/// liquidity, together with the sqrt prices at both ends.
#[derive(Copy, Clone, Debug)]
pub struct Range {
    pub liquidity: u128,
    pub sqrt_price_l_96: U256,
    pub left_pt: i32,
    pub sqrt_price_r_96: U256,
    pub right_pt: i32,
    pub sqrt_rate_96: U256,
}

/// Outcome of swapping across a [`Range`].
///
/// When `complete_liquidity` is false the budget ran out inside the range:
/// `loc_pt` is the point left partially filled, still to be settled at
/// price `sqrt_loc_96`.
#[derive(Copy, Clone, Debug, Default)]
pub struct RangeCompRet {
    pub cost: U256,
    pub acquire: U256,
    pub complete_liquidity: bool,
    pub loc_pt: i32,
    pub sqrt_loc_96: U256,
}

/// Total token Y held by `liquidity` over points `[left, right)`, where
/// `sqrt_price_l_96`/`sqrt_price_r_96` are the sqrt prices at `left` and
/// `right`.
///
/// Closed form of the geometric sum `Σ L·sqrt(1.0001^i)`. `upper` selects
/// ceiling rounding, used when the amount is paid by the trader.
pub fn get_amount_y(
    liquidity: u128,
    sqrt_price_l_96: U256,
    sqrt_price_r_96: U256,
    sqrt_rate_96: U256,
    upper: bool,
) -> Result<U256, Error> {
    let numerator = sqrt_price_r_96 - sqrt_price_l_96;
    let denominator = sqrt_rate_96 - Q96;
    let liquidity = U256::from(liquidity);
    Ok(if upper {
        mul_div_ceil(liquidity, numerator, denominator)?
    } else {
        mul_div_floor(liquidity, numerator, denominator)?
    })
}

/// Total token X held by `liquidity` over points `[left_pt, right_pt)`.
///
/// Closed form of `Σ L / sqrt(1.0001^i)`:
/// `L · (sqrt(1.0001^(r-l)) - 1) / (sqrt(P_r) - sqrt(P_r) / sqrt(1.0001))`.
/// The `sqrt(P_r) / sqrt(1.0001)` term is always floored; `upper` only
/// selects the rounding of the final division.
pub fn get_amount_x(
    liquidity: u128,
    left_pt: i32,
    right_pt: i32,
    sqrt_price_r_96: U256,
    sqrt_rate_96: U256,
    upper: bool,
) -> Result<U256, Error> {
    if left_pt >= right_pt {
        return Ok(U256::ZERO);
    }
    let sqrt_price_pr_pl_96 = get_sqrt_price(right_pt - left_pt)?;
    let sqrt_price_pr_m1_96 = mul_div_floor(sqrt_price_r_96, Q96, sqrt_rate_96)?;

    let numerator = sqrt_price_pr_pl_96 - Q96;
    let denominator = sqrt_price_r_96 - sqrt_price_pr_m1_96;
    let liquidity = U256::from(liquidity);
    Ok(if upper {
        mul_div_ceil(liquidity, numerator, denominator)?
    } else {
        mul_div_floor(liquidity, numerator, denominator)?
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::log_pow_math::get_sqrt_price;

    fn rate() -> U256 {
        get_sqrt_price(1).unwrap()
    }

    fn per_point_y(liquidity: u128, left: i32, right: i32) -> U256 {
        (left..right)
            .map(|p| {
                mul_div_floor(U256::from(liquidity), get_sqrt_price(p).unwrap(), Q96).unwrap()
            })
            .fold(U256::ZERO, |acc, y| acc + y)
    }

    fn per_point_x(liquidity: u128, left: i32, right: i32) -> U256 {
        (left..right)
            .map(|p| {
                mul_div_floor(U256::from(liquidity), Q96, get_sqrt_price(p).unwrap()).unwrap()
            })
            .fold(U256::ZERO, |acc, x| acc + x)
    }

    #[test]
    fn empty_range_holds_nothing() {
        let s = get_sqrt_price(100).unwrap();
        assert_eq!(get_amount_y(1_000_000, s, s, rate(), true).unwrap(), U256::ZERO);
        assert_eq!(get_amount_x(1_000_000, 100, 100, s, rate(), true).unwrap(), U256::ZERO);
    }

    #[test]
    fn amount_y_matches_per_point_sum() {
        let liquidity = 300_000_000_000u128;
        let (left, right) = (-1280, -880);
        let sl = get_sqrt_price(left).unwrap();
        let sr = get_sqrt_price(right).unwrap();

        let reference = per_point_y(liquidity, left, right);
        let floor = get_amount_y(liquidity, sl, sr, rate(), false).unwrap();
        let ceil = get_amount_y(liquidity, sl, sr, rate(), true).unwrap();

        let n = U256::from((right - left) as u64 + 1);
        assert!(floor.abs_diff(reference) <= n, "{floor} vs {reference}");
        assert!(ceil >= floor && ceil - floor <= U256::ONE);
    }

    #[test]
    fn amount_x_matches_per_point_sum() {
        let liquidity = 500_000_000_000u128;
        let (left, right) = (720, 2800);
        let sr = get_sqrt_price(right).unwrap();

        let reference = per_point_x(liquidity, left, right);
        let floor = get_amount_x(liquidity, left, right, sr, rate(), false).unwrap();
        let ceil = get_amount_x(liquidity, left, right, sr, rate(), true).unwrap();

        let n = U256::from((right - left) as u64 + 1);
        assert!(floor.abs_diff(reference) <= n, "{floor} vs {reference}");
        assert!(ceil >= floor);
    }

    /// `getAmountX` term by term in plain `U256` arithmetic.
    fn contract_amount_x(liquidity: u128, left: i32, right: i32, upper: bool) -> U256 {
        let sr = get_sqrt_price(right).unwrap();
        let sqrt_price_pr_m1_96 = sr * Q96 / rate();
        let numerator = get_sqrt_price(right - left).unwrap() - Q96;
        let denominator = sr - sqrt_price_pr_m1_96;
        let product = U256::from(liquidity) * numerator;
        if upper {
            (product + denominator - U256::ONE) / denominator
        } else {
            product / denominator
        }
    }

    #[test]
    fn amount_x_follows_contract_rounding_at_low_prices() {
        let cases = [
            (-800_000, -799_999, 1_000_000u128),
            (-800_000, -799_000, 1_000_000),
            (-700_000, -699_744, 1_000_000_000_000),
            (-400_000, -399_990, 1_000_000_000_000_000_000),
            (-4000, -2000, 300_000),
            (0, 1, 1_000_000_000),
            (720, 2800, 500_000_000_000),
        ];
        for (left, right, liquidity) in cases {
            let sr = get_sqrt_price(right).unwrap();
            for upper in [false, true] {
                assert_eq!(
                    get_amount_x(liquidity, left, right, sr, rate(), upper).unwrap(),
                    contract_amount_x(liquidity, left, right, upper),
                    "[{left}, {right}) L={liquidity} upper={upper}"
                );
            }
        }
    }

    #[test]
    fn ceiling_amount_x_at_the_lowest_point() {
        let sr = get_sqrt_price(-799_999).unwrap();
        let x = get_amount_x(1_000_000, -800_000, -799_999, sr, rate(), true).unwrap();
        assert_eq!(x, U256::from(234_914_996_314_448_460_317_837u128));
    }

    #[test]
    fn single_point_at_price_one() {
        // at point 0 one unit of liquidity is one unit of either token
        let s0 = get_sqrt_price(0).unwrap();
        let s1 = get_sqrt_price(1).unwrap();
        let y = get_amount_y(1_000_000_000, s0, s1, rate(), false).unwrap();
        let x = get_amount_x(1_000_000_000, 0, 1, s1, rate(), false).unwrap();
        assert!(y.abs_diff(U256::from(1_000_000_000u64)) <= U256::ONE);
        assert!(x.abs_diff(U256::from(1_000_000_000u64)) <= U256::ONE);
    }
}
