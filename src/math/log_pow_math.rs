use crate::error::StateError;
use crate::math::bit_math::most_significant_bit;
use alloy_primitives::{I256, U256};

pub const MIN_POINT: i32 = -887272;
pub const MAX_POINT: i32 = -MIN_POINT;

pub const MIN_SQRT_PRICE: U256 = U256::from_limbs([4295128739, 0, 0, 0]);
pub const MAX_SQRT_PRICE: U256 =
    U256::from_limbs([6743328256752651558, 17280870778742802505, 4294805859, 0]);

/// `log_{sqrt(1.0001)}(2)` scaled by `2^64`.
const LOG_SQRT_10001: I256 =
    I256::from_raw(U256::from_limbs([11745905768312294533, 13863, 0, 0]));
/// Lower error bracket of the log2 approximation, `Q128`.
const POINT_LOW_ERR: I256 = I256::from_raw(U256::from_limbs([
    6552757943157144234,
    184476617836266586,
    0,
    0,
]));
/// Upper error bracket of the log2 approximation, `Q128`.
const POINT_HIGH_ERR: I256 = I256::from_raw(U256::from_limbs([
    4998474450511881007,
    15793544031827761793,
    0,
    0,
]));

/// Returns `sqrt(1.0001^point)` as a Q64.96 fixed‑point value.
///
/// Multiplies together the precomputed `1 / sqrt(1.0001^(2^i))` factors
/// (Q128) for every set bit of `|point|`, inverts for positive points and
/// rounds the final Q128 → Q96 shift up. The result is bit‑identical to
/// the contract's table; range math compares these values for equality.
pub fn get_sqrt_price(point: i32) -> Result<U256, StateError> {
    let abs_point = point.unsigned_abs();

    if abs_point > MAX_POINT as u32 {
        return Err(StateError::PointOutOfBounds);
    }

    let mut ratio = if abs_point & 1 != 0 {
        U256::from_limbs([12262481743371124737, 18445821805675392311, 0, 0])
    } else {
        U256::from_limbs([0, 0, 1, 0])
    };

    macro_rules! apply_factor {
        ($bit:expr, $l0:expr, $l1:expr) => {
            if abs_point & $bit != 0 {
                ratio = ratio.wrapping_mul(U256::from_limbs([$l0, $l1, 0, 0])) >> 128;
            }
        };
    }

    apply_factor!(0x2, 6459403834229662010, 18444899583751176498);
    apply_factor!(0x4, 17226890335427755468, 18443055278223354162);
    apply_factor!(0x8, 2032852871939366096, 18439367220385604838);
    apply_factor!(0x10, 14545316742740207172, 18431993317065449817);
    apply_factor!(0x20, 5129152022828963008, 18417254355718160513);
    apply_factor!(0x40, 4894419605888772193, 18387811781193591352);
    apply_factor!(0x80, 1280255884321894483, 18329067761203520168);
    apply_factor!(0x100, 15924666964335305636, 18212142134806087854);
    apply_factor!(0x200, 8010504389359918676, 17980523815641551639);
    apply_factor!(0x400, 10668036004952895731, 17526086738831147013);
    apply_factor!(0x800, 4878133418470705625, 16651378430235024244);
    apply_factor!(0x1000, 9537173718739605541, 15030750278693429944);
    apply_factor!(0x2000, 9972618978014552549, 12247334978882834399);
    apply_factor!(0x4000, 10428997489610666743, 8131365268884726200);
    apply_factor!(0x8000, 9305304367709015974, 3584323654723342297);
    apply_factor!(0x10000, 14301143598189091785, 696457651847595233);
    apply_factor!(0x20000, 7393154844743099908, 26294789957452057);
    apply_factor!(0x40000, 2209338891292245656, 37481735321082);
    apply_factor!(0x80000, 10518117631919034274, 76158723);

    if point > 0 {
        ratio = U256::MAX / ratio;
    }

    let round_up = (ratio.as_limbs()[0] & 0xFFFF_FFFF) != 0;
    Ok((ratio >> 32) + U256::from(round_up as u64))
}

/// Returns the greatest point whose sqrt price is `<= sqrt_price_96`.
///
/// A 14‑step binary logarithm brackets the answer between two candidate
/// points; when they differ, the higher one is kept only if its exact
/// sqrt price does not exceed the input.
pub fn get_log_sqrt_price_floor(sqrt_price_96: U256) -> Result<i32, StateError> {
    if sqrt_price_96 < MIN_SQRT_PRICE || sqrt_price_96 >= MAX_SQRT_PRICE {
        return Err(StateError::SqrtPriceOutOfBounds);
    }

    let ratio = sqrt_price_96 << 32;
    let msb = most_significant_bit(ratio).map_err(|_| StateError::SqrtPriceOutOfBounds)? as usize;

    let mut r = if msb >= 128 {
        ratio >> (msb - 127)
    } else {
        ratio << (127 - msb)
    };

    let mut log_2: I256 = (I256::from_raw(U256::from(msb)) - I256::from_raw(U256::from(128u64))) << 64;

    for shift in (50..=63usize).rev() {
        r = r.wrapping_mul(r) >> 127;
        let f = (r >> 128usize).as_limbs()[0];
        log_2 |= I256::from_raw(U256::from(f) << shift);
        r >>= f as usize;
    }

    let log_sqrt = log_2.wrapping_mul(LOG_SQRT_10001);
    let point_low = ((log_sqrt - POINT_LOW_ERR) >> 128usize).low_i32();
    let point_high = ((log_sqrt + POINT_HIGH_ERR) >> 128usize).low_i32();

    Ok(if point_low == point_high {
        point_low
    } else if get_sqrt_price(point_high)? <= sqrt_price_96 {
        point_high
    } else {
        point_low
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn get_sqrt_price_rejects_out_of_range_points() {
        assert!(matches!(
            get_sqrt_price(MIN_POINT - 1),
            Err(StateError::PointOutOfBounds)
        ));
        assert!(matches!(
            get_sqrt_price(MAX_POINT + 1),
            Err(StateError::PointOutOfBounds)
        ));
    }

    #[test]
    fn get_sqrt_price_matches_contract_table() {
        assert_eq!(get_sqrt_price(MIN_POINT).unwrap(), MIN_SQRT_PRICE);
        assert_eq!(
            get_sqrt_price(MIN_POINT + 1).unwrap(),
            U256::from(4295343490u64)
        );
        assert_eq!(get_sqrt_price(MAX_POINT).unwrap(), MAX_SQRT_PRICE);
        assert_eq!(
            get_sqrt_price(MAX_POINT - 1).unwrap(),
            U256::from_str("1461373636630004318706518188784493106690254656249").unwrap()
        );
        assert_eq!(get_sqrt_price(0).unwrap(), U256::ONE << 96);
        assert_eq!(
            get_sqrt_price(50).unwrap(),
            U256::from(79426470787362580746886972461u128)
        );
        assert_eq!(
            get_sqrt_price(1000).unwrap(),
            U256::from(83290069058676223003182343270u128)
        );
        assert_eq!(
            get_sqrt_price(3000).unwrap(),
            U256::from(92049301871182272007977902845u128)
        );
        assert_eq!(
            get_sqrt_price(150000).unwrap(),
            U256::from(143194173941309278083010301478497u128)
        );
    }

    #[test]
    fn get_sqrt_price_is_strictly_increasing() {
        let mut prev = get_sqrt_price(-5000).unwrap();
        for p in -4999..5000 {
            let cur = get_sqrt_price(p).unwrap();
            assert!(cur > prev, "not increasing at {p}");
            prev = cur;
        }
    }

    #[test]
    fn get_log_sqrt_price_floor_rejects_out_of_range() {
        assert!(matches!(
            get_log_sqrt_price_floor(MIN_SQRT_PRICE - U256::ONE),
            Err(StateError::SqrtPriceOutOfBounds)
        ));
        assert!(matches!(
            get_log_sqrt_price_floor(MAX_SQRT_PRICE),
            Err(StateError::SqrtPriceOutOfBounds)
        ));
    }

    #[test]
    fn get_log_sqrt_price_floor_at_extremes() {
        assert_eq!(get_log_sqrt_price_floor(MIN_SQRT_PRICE).unwrap(), MIN_POINT);
        assert_eq!(
            get_log_sqrt_price_floor(U256::from(4295343490u64)).unwrap(),
            MIN_POINT + 1
        );
        assert_eq!(
            get_log_sqrt_price_floor(MAX_SQRT_PRICE - U256::ONE).unwrap(),
            MAX_POINT - 1
        );
    }

    #[test]
    fn get_log_sqrt_price_floor_inverts_exact_prices() {
        for p in [-800000, -123457, -3050, -1, 0, 1, 40, 3000, 51200, 799999] {
            let s = get_sqrt_price(p).unwrap();
            assert_eq!(get_log_sqrt_price_floor(s).unwrap(), p);
            // one unit below an exact price floors to the previous point
            assert_eq!(get_log_sqrt_price_floor(s - U256::ONE).unwrap(), p - 1);
        }
    }
}
