use crate::full_math::{mul_div, to_u64};
use amm_types::{AmmError, BPS_DENOMINATOR};
use soroban_fixed_point_math::FixedPoint;
use soroban_sdk::Env;

/// Output for an exact input, fee taken multiplicatively from the input.
///
/// `out = in * (10000 - fee) * reserve_out / (reserve_in * 10000 + in * (10000 - fee))`,
/// rounded down so the pool keeps the remainder.
pub fn get_amount_out(
    env: &Env,
    amount_in: u64,
    reserve_in: u64,
    reserve_out: u64,
    fee_bps: u128,
) -> Result<u64, AmmError> {
    if amount_in == 0 {
        return Err(AmmError::InsufficientInput);
    }
    if reserve_in == 0 || reserve_out == 0 {
        return Err(AmmError::InsufficientLiquidity);
    }
    if fee_bps >= BPS_DENOMINATOR {
        return Err(AmmError::InvalidFee);
    }

    let amount_in_with_fee = amount_in as u128 * (BPS_DENOMINATOR - fee_bps);
    let denominator = reserve_in as u128 * BPS_DENOMINATOR + amount_in_with_fee;
    let amount_out = mul_div(env, amount_in_with_fee, reserve_out as u128, denominator)?;

    to_u64(amount_out)
}

/// Input required for an exact output.
///
/// `in = reserve_in * out * 10000 / ((10000 - fee) * (reserve_out - out)) + 1`;
/// the trailing `+ 1` rounds against the caller.
pub fn get_amount_in(
    env: &Env,
    amount_out: u64,
    reserve_in: u64,
    reserve_out: u64,
    fee_bps: u128,
) -> Result<u64, AmmError> {
    if amount_out == 0 {
        return Err(AmmError::InsufficientOutput);
    }
    if reserve_in == 0 || reserve_out == 0 || amount_out >= reserve_out {
        return Err(AmmError::InsufficientLiquidity);
    }
    if fee_bps >= BPS_DENOMINATOR {
        return Err(AmmError::InvalidFee);
    }

    let numerator = reserve_in as u128 * amount_out as u128;
    let denominator = (BPS_DENOMINATOR - fee_bps) * (reserve_out - amount_out) as u128;
    let amount_in = mul_div(env, numerator, BPS_DENOMINATOR, denominator)? + 1;

    to_u64(amount_in)
}

/// Value of `amount_x` in units of y at the current reserve ratio, rounded down
pub fn quote(amount_x: u64, reserve_x: u64, reserve_y: u64) -> Result<u64, AmmError> {
    if amount_x == 0 {
        return Err(AmmError::InvalidAmount);
    }
    if reserve_x == 0 || reserve_y == 0 {
        return Err(AmmError::InsufficientLiquidity);
    }

    amount_x
        .fixed_mul_floor(reserve_y, reserve_x)
        .ok_or(AmmError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::Env;

    const RESERVE_X: u64 = 500_000_000;
    const RESERVE_Y: u64 = 1_000_000_000;

    // === get_amount_out ===

    #[test]
    fn test_amount_out_exact_value() {
        let env = Env::default();
        let amount_in = 200_000_000u64;
        let out = get_amount_out(&env, amount_in, RESERVE_X, RESERVE_Y, 25).unwrap();

        let with_fee = amount_in as u128 * 9975;
        let expected = with_fee * RESERVE_Y as u128 / (RESERVE_X as u128 * 10000 + with_fee);
        assert_eq!(out as u128, expected);
        assert_eq!(out, 285_203_716);
    }

    #[test]
    fn test_amount_out_zero_fee() {
        let env = Env::default();
        // 100 * 1000 / (1000 + 100) = 90.9 -> 90
        assert_eq!(get_amount_out(&env, 100, 1000, 1000, 0), Ok(90));
    }

    #[test]
    fn test_amount_out_fee_reduces_output() {
        let env = Env::default();
        let no_fee = get_amount_out(&env, 1_000_000, RESERVE_X, RESERVE_Y, 0).unwrap();
        let with_fee = get_amount_out(&env, 1_000_000, RESERVE_X, RESERVE_Y, 100).unwrap();
        assert!(with_fee < no_fee);
    }

    #[test]
    fn test_amount_out_never_drains_reserve() {
        let env = Env::default();
        let out = get_amount_out(&env, u64::MAX, 1, RESERVE_Y, 0).unwrap();
        assert!(out < RESERVE_Y);
    }

    #[test]
    fn test_amount_out_zero_input() {
        let env = Env::default();
        assert_eq!(
            get_amount_out(&env, 0, RESERVE_X, RESERVE_Y, 25),
            Err(AmmError::InsufficientInput)
        );
    }

    #[test]
    fn test_amount_out_empty_reserves() {
        let env = Env::default();
        assert_eq!(
            get_amount_out(&env, 10, 0, RESERVE_Y, 25),
            Err(AmmError::InsufficientLiquidity)
        );
        assert_eq!(
            get_amount_out(&env, 10, RESERVE_X, 0, 25),
            Err(AmmError::InsufficientLiquidity)
        );
    }

    #[test]
    fn test_amount_out_wide_intermediate() {
        let env = Env::default();
        // in * 10000 * reserve_out exceeds 128 bits
        let out = get_amount_out(&env, u64::MAX / 2, u64::MAX / 2, u64::MAX, 0).unwrap();
        assert_eq!(out, u64::MAX / 2);
    }

    // === get_amount_in ===

    #[test]
    fn test_amount_in_exact_value() {
        let env = Env::default();
        let out = 285_203_716u64;
        let amount_in = get_amount_in(&env, out, RESERVE_X, RESERVE_Y, 25).unwrap();
        let expected =
            RESERVE_X as u128 * out as u128 * 10000 / (9975 * (RESERVE_Y - out) as u128) + 1;
        assert_eq!(amount_in as u128, expected);
        assert_eq!(amount_in, 200_000_000);
    }

    #[test]
    fn test_amount_in_at_or_above_reserve_fails() {
        let env = Env::default();
        for out in [RESERVE_Y, RESERVE_Y + 1, u64::MAX] {
            assert_eq!(
                get_amount_in(&env, out, RESERVE_X, RESERVE_Y, 25),
                Err(AmmError::InsufficientLiquidity)
            );
        }
    }

    #[test]
    fn test_amount_in_zero_output() {
        let env = Env::default();
        assert_eq!(
            get_amount_in(&env, 0, RESERVE_X, RESERVE_Y, 25),
            Err(AmmError::InsufficientOutput)
        );
    }

    #[test]
    fn test_amount_in_too_large_for_u64() {
        let env = Env::default();
        // Buying all but one unit of a deep reserve costs more than u64 can hold
        assert_eq!(
            get_amount_in(&env, u64::MAX - 1, u64::MAX, u64::MAX, 0),
            Err(AmmError::Overflow)
        );
    }

    // === rounding direction ===

    #[test]
    fn test_round_trip_favors_pool_at_reference_reserves() {
        let env = Env::default();
        let mut amount_in = 1u64;
        while amount_in < 400_000_000 {
            let out = get_amount_out(&env, amount_in, RESERVE_X, RESERVE_Y, 25).unwrap();
            if out > 0 {
                let back = get_amount_in(&env, out, RESERVE_X, RESERVE_Y, 25).unwrap();
                assert!(back >= amount_in, "in {} out {} back {}", amount_in, out, back);
            }
            amount_in = amount_in * 3 + 7;
        }
    }

    #[test]
    fn test_paying_quoted_input_yields_requested_output() {
        let env = Env::default();
        let reserves = [
            (RESERVE_X, RESERVE_Y),
            (RESERVE_Y, RESERVE_X),
            (1_000_000, 7_000_000_000),
            (9_999_999_999, 12_345),
        ];
        for (reserve_in, reserve_out) in reserves {
            for fee in [0u128, 1, 25, 100] {
                let mut out = 1u64;
                while out < reserve_out {
                    let amount_in = get_amount_in(&env, out, reserve_in, reserve_out, fee).unwrap();
                    let got = get_amount_out(&env, amount_in, reserve_in, reserve_out, fee).unwrap();
                    assert!(got >= out);
                    out = out * 2 + 1;
                }
            }
        }
    }

    // === quote ===

    #[test]
    fn test_quote_proportional() {
        assert_eq!(quote(100, RESERVE_X, RESERVE_Y), Ok(200));
        assert_eq!(quote(100, RESERVE_Y, RESERVE_X), Ok(50));
        // 1 * 1 / 2 rounds down to 0
        assert_eq!(quote(1, RESERVE_Y, RESERVE_X), Ok(0));
    }

    #[test]
    fn test_quote_errors() {
        assert_eq!(quote(0, RESERVE_X, RESERVE_Y), Err(AmmError::InvalidAmount));
        assert_eq!(quote(1, 0, RESERVE_Y), Err(AmmError::InsufficientLiquidity));
        assert_eq!(quote(1, RESERVE_X, 0), Err(AmmError::InsufficientLiquidity));
    }
}
