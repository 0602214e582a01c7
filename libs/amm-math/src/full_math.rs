use amm_types::AmmError;
use soroban_sdk::{Env, U256};

/// Multiply and divide, rounding down.
///
/// The product is formed in 128 bits when it fits and in 256 bits otherwise;
/// it is never truncated.
pub fn mul_div(env: &Env, a: u128, b: u128, denominator: u128) -> Result<u128, AmmError> {
    if denominator == 0 {
        return Err(AmmError::InvalidAmount);
    }

    match a.checked_mul(b) {
        Some(product) => Ok(product / denominator),
        None => {
            let product = U256::from_u128(env, a).mul(&U256::from_u128(env, b));
            let result = product.div(&U256::from_u128(env, denominator));
            result.to_u128().ok_or(AmmError::Overflow)
        }
    }
}

/// Returns `a * b >= c * d` without wrapping.
///
/// Compares in 128 bits when both products fit, otherwise redoes the
/// comparison in 256 bits.
pub fn product_gte(env: &Env, a: u128, b: u128, c: u128, d: u128) -> bool {
    match (a.checked_mul(b), c.checked_mul(d)) {
        (Some(lhs), Some(rhs)) => lhs >= rhs,
        _ => {
            let lhs = U256::from_u128(env, a).mul(&U256::from_u128(env, b));
            let rhs = U256::from_u128(env, c).mul(&U256::from_u128(env, d));
            lhs >= rhs
        }
    }
}

/// Integer square root (floor), Babylonian method
pub fn sqrt(y: u128) -> u128 {
    if y > 3 {
        let mut z = y;
        let mut x = y / 2 + 1;
        while x < z {
            z = x;
            x = (y / x + x) / 2;
        }
        z
    } else if y != 0 {
        1
    } else {
        0
    }
}

/// Smaller of two amounts
pub fn min(a: u64, b: u64) -> u64 {
    if a < b {
        a
    } else {
        b
    }
}

/// Narrow a wide intermediate back to a token amount
pub fn to_u64(value: u128) -> Result<u64, AmmError> {
    u64::try_from(value).map_err(|_| AmmError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::Env;

    // === mul_div tests ===

    #[test]
    fn test_mul_div_basic() {
        let env = Env::default();
        assert_eq!(mul_div(&env, 10, 20, 5), Ok(40));
    }

    #[test]
    fn test_mul_div_rounds_down() {
        let env = Env::default();
        assert_eq!(mul_div(&env, 1, 1, 2), Ok(0));
        assert_eq!(mul_div(&env, 5, 1, 3), Ok(1));
    }

    #[test]
    fn test_mul_div_wide_intermediate() {
        let env = Env::default();
        // (2^100 * 2^100) / 2^100 overflows 128 bits mid-way
        let large = 1u128 << 100;
        assert_eq!(mul_div(&env, large, large, large), Ok(large));

        let max = u128::MAX;
        assert_eq!(mul_div(&env, max, max, max), Ok(max));
    }

    #[test]
    fn test_mul_div_result_too_wide() {
        let env = Env::default();
        assert_eq!(mul_div(&env, u128::MAX, 2, 1), Err(AmmError::Overflow));
    }

    #[test]
    fn test_mul_div_zero_denominator() {
        let env = Env::default();
        assert_eq!(mul_div(&env, 10, 20, 0), Err(AmmError::InvalidAmount));
    }

    // === product_gte tests ===

    #[test]
    fn test_product_gte_narrow() {
        let env = Env::default();
        assert!(product_gte(&env, 10, 10, 5, 20));
        assert!(product_gte(&env, 10, 11, 5, 20));
        assert!(!product_gte(&env, 10, 9, 5, 20));
    }

    #[test]
    fn test_product_gte_wide() {
        let env = Env::default();
        let big = u128::MAX / 3;
        // Both sides overflow 128 bits
        assert!(product_gte(&env, big, 4, big, 3));
        assert!(!product_gte(&env, big, 3, big, 4));
        assert!(product_gte(&env, big, 4, big, 4));
        // Only one side overflows
        assert!(product_gte(&env, big, 4, 1, 1));
        assert!(!product_gte(&env, 1, 1, big, 4));
    }

    // === sqrt tests ===

    #[test]
    fn test_sqrt_small() {
        assert_eq!(sqrt(0), 0);
        assert_eq!(sqrt(1), 1);
        assert_eq!(sqrt(3), 1);
        assert_eq!(sqrt(4), 2);
        assert_eq!(sqrt(8), 2);
        assert_eq!(sqrt(9), 3);
    }

    #[test]
    fn test_sqrt_floor() {
        assert_eq!(sqrt(500_000_000u128 * 1_000_000_000u128), 707_106_781);
        assert_eq!(sqrt(u64::MAX as u128 * u64::MAX as u128), u64::MAX as u128);
        assert_eq!(sqrt(u128::MAX), u64::MAX as u128);
    }

    #[test]
    fn test_sqrt_is_floor_for_range() {
        for n in 0u128..2_000 {
            let r = sqrt(n);
            assert!(r * r <= n);
            assert!((r + 1) * (r + 1) > n);
        }
    }

    #[test]
    fn test_min() {
        assert_eq!(min(3, 7), 3);
        assert_eq!(min(7, 3), 3);
        assert_eq!(min(5, 5), 5);
    }

    #[test]
    fn test_to_u64() {
        assert_eq!(to_u64(u64::MAX as u128), Ok(u64::MAX));
        assert_eq!(to_u64(u64::MAX as u128 + 1), Err(AmmError::Overflow));
    }
}
