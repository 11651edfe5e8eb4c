use crate::error::MathError;
use alloy_primitives::U256;

const U256_TWO: U256 = U256::from_limbs([2, 0, 0, 0]);
const U256_THREE: U256 = U256::from_limbs([3, 0, 0, 0]);

/// Computes `floor(a * b / denominator)` over a full 512‑bit product,
/// returning a `MathError` on overflow or division by zero.
///
/// Same algorithm as the contract's `MulDivMath.mulDivFloor`: the product
/// is split into two 256‑bit halves and divided through a modular inverse.
pub fn mul_div_floor(a: U256, b: U256, mut denominator: U256) -> Result<U256, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }

    let mm = a.mul_mod(b, U256::MAX);
    let mut prod0 = a.wrapping_mul(b);

    let (mut prod1, borrow) = mm.overflowing_sub(prod0);
    if borrow {
        prod1 = prod1.wrapping_sub(U256::ONE);
    }

    if prod1.is_zero() {
        return Ok(prod0 / denominator);
    }

    if denominator <= prod1 {
        return Err(MathError::Overflow);
    }

    let remainder = a.mul_mod(b, denominator);
    let (low, borrow) = prod0.overflowing_sub(remainder);
    prod0 = low;
    if borrow {
        prod1 = prod1.wrapping_sub(U256::ONE);
    }

    let twos = denominator & denominator.wrapping_neg();
    denominator /= twos;
    prod0 /= twos;

    let flip = twos.wrapping_neg() / twos + U256::ONE;
    prod0 |= prod1.wrapping_mul(flip);

    // inverse mod 2^4, then six Newton steps double it up to 2^256
    let mut inv = U256_THREE.wrapping_mul(denominator) ^ U256_TWO;
    for _ in 0..6 {
        inv = inv.wrapping_mul(U256_TWO.wrapping_sub(denominator.wrapping_mul(inv)));
    }

    Ok(prod0.wrapping_mul(inv))
}

/// Like [`mul_div_floor`], but rounds up when the division is inexact.
pub fn mul_div_ceil(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    let result = mul_div_floor(a, b, denominator)?;

    if a.mul_mod(b, denominator).is_zero() {
        return Ok(result);
    }
    result.checked_add(U256::ONE).ok_or(MathError::Overflow)
}

/// Narrows a `U256` to the 128‑bit width the contract stores amounts in.
///
/// Anything at or above `2^128` is an error, never a truncation.
#[inline]
pub fn to_u128(x: U256) -> Result<u128, MathError> {
    u128::try_from(x).map_err(|_| MathError::Uint128Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_div_floor_simple_division() {
        let r = mul_div_floor(U256::from(10u8), U256::from(20u8), U256::from(5u8)).unwrap();
        assert_eq!(r, U256::from(40u8));
    }

    #[test]
    fn mul_div_floor_division_by_zero() {
        let r = mul_div_floor(U256::from(10u8), U256::from(20u8), U256::ZERO);
        assert!(matches!(r, Err(MathError::DivisionByZero)));
    }

    #[test]
    fn mul_div_floor_wide_intermediate() {
        // (2^256 - 1)^2 / (2^256 - 1) needs the 512-bit path
        let r = mul_div_floor(U256::MAX, U256::MAX, U256::MAX).unwrap();
        assert_eq!(r, U256::MAX);

        // 2^200 * 2^100 / 2^150 = 2^150
        let r = mul_div_floor(U256::ONE << 200, U256::ONE << 100, U256::ONE << 150).unwrap();
        assert_eq!(r, U256::ONE << 150);
    }

    #[test]
    fn mul_div_floor_odd_denominator_with_wide_product() {
        // (2^255) * 6 / 3 = 2^256, does not fit
        let r = mul_div_floor(U256::ONE << 255, U256::from(6u8), U256::from(3u8));
        assert!(matches!(r, Err(MathError::Overflow)));

        // (2^255) * 3 / 6 = 2^254
        let r = mul_div_floor(U256::ONE << 255, U256::from(3u8), U256::from(6u8)).unwrap();
        assert_eq!(r, U256::ONE << 254);
    }

    #[test]
    fn mul_div_floor_result_overflow() {
        let r = mul_div_floor(U256::MAX, U256::from(2u8), U256::ONE);
        assert!(matches!(r, Err(MathError::Overflow)));
    }

    #[test]
    fn mul_div_floor_rounds_down() {
        // 7 * 10 / 8 = 8.75
        let r = mul_div_floor(U256::from(7u8), U256::from(10u8), U256::from(8u8)).unwrap();
        assert_eq!(r, U256::from(8u8));
    }

    #[test]
    fn mul_div_ceil_exact_and_inexact() {
        let exact = mul_div_ceil(U256::from(20u8), U256::from(10u8), U256::from(5u8)).unwrap();
        assert_eq!(exact, U256::from(40u8));

        // 70 / 3 = 23.33 -> 24
        let inexact = mul_div_ceil(U256::from(7u8), U256::from(10u8), U256::from(3u8)).unwrap();
        assert_eq!(inexact, U256::from(24u8));
    }

    #[test]
    fn mul_div_ceil_propagates_overflow() {
        let r = mul_div_ceil(U256::MAX, U256::from(3u8), U256::from(2u8));
        assert!(matches!(r, Err(MathError::Overflow)));
    }

    #[test]
    fn to_u128_bounds() {
        assert_eq!(to_u128(U256::from(u128::MAX)).unwrap(), u128::MAX);
        assert!(matches!(
            to_u128(U256::ONE << 128),
            Err(MathError::Uint128Overflow)
        ));
    }
}
