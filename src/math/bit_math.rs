use crate::error::MathError;
use alloy_primitives::U256;

/// Returns the index (0–255) of the most significant set bit in a `U256`,
/// or `MathError::ZeroValue` if the input is zero.
///
/// The log/pow conversion uses this to normalise a price into `[1, 2)`
/// before the binary logarithm loop.
#[inline]
pub fn most_significant_bit(x: U256) -> Result<u32, MathError> {
    if x.is_zero() {
        return Err(MathError::ZeroValue);
    }
    Ok(255 - x.leading_zeros() as u32)
}

/// Floor division for point arithmetic, rounding toward negative infinity.
///
/// Storage blocks are aligned on multiples of `pointDelta * 256`, so a
/// negative point must land in the block *below* zero, not the one above.
#[inline]
pub fn floor_div(a: i32, b: i32) -> i32 {
    let q = a / b;
    if (a % b != 0) && ((a < 0) != (b < 0)) {
        q - 1
    } else {
        q
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn msb_errors_on_zero() {
        assert!(matches!(
            most_significant_bit(U256::ZERO),
            Err(MathError::ZeroValue)
        ));
    }

    #[test]
    fn msb_of_q96_is_96() {
        let x = U256::ONE << 96;
        assert_eq!(most_significant_bit(x).unwrap(), 96);
        assert_eq!(most_significant_bit(x + U256::from(12345u64)).unwrap(), 96);
    }

    #[test]
    fn msb_of_max_u256() {
        assert_eq!(most_significant_bit(U256::MAX).unwrap(), 255);
    }

    #[test]
    fn floor_div_rounds_toward_negative_infinity() {
        assert_eq!(floor_div(10240, 10240), 1);
        assert_eq!(floor_div(10239, 10240), 0);
        assert_eq!(floor_div(0, 10240), 0);
        assert_eq!(floor_div(-1, 10240), -1);
        assert_eq!(floor_div(-10240, 10240), -1);
        assert_eq!(floor_div(-10241, 10240), -2);
    }
}
