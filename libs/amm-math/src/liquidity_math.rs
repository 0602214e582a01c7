use crate::full_math::{min, mul_div, sqrt, to_u64};
use crate::swap_math::quote;
use amm_types::{AmmError, MINIMUM_LIQUIDITY, PROTOCOL_FEE_NUMERATOR, PROTOCOL_FEE_ROOT_K_LAST_WEIGHT};
use soroban_fixed_point_math::FixedPoint;
use soroban_sdk::Env;

/// Amounts actually taken from a deposit of `desired_x` / `desired_y`.
///
/// An empty pool takes both desired amounts as-is, which sets the initial
/// price. Otherwise the deposit is trimmed on one side to match the current
/// reserve ratio.
pub fn optimal_amounts(
    desired_x: u64,
    desired_y: u64,
    reserve_x: u64,
    reserve_y: u64,
) -> Result<(u64, u64), AmmError> {
    if reserve_x == 0 && reserve_y == 0 {
        return Ok((desired_x, desired_y));
    }

    let optimal_y = quote(desired_x, reserve_x, reserve_y)?;
    if optimal_y <= desired_y {
        return Ok((desired_x, optimal_y));
    }

    let optimal_x = quote(desired_y, reserve_y, reserve_x)?;
    if optimal_x > desired_x {
        return Err(AmmError::InvalidAmount);
    }
    Ok((optimal_x, desired_y))
}

/// LP minted by the first deposit, before the locked minimum is split off
pub fn initial_liquidity(amount_x: u64, amount_y: u64) -> Result<u64, AmmError> {
    let liquidity = to_u64(sqrt(amount_x as u128 * amount_y as u128))?;
    if liquidity <= MINIMUM_LIQUIDITY {
        return Err(AmmError::InsufficientLiquidityMinted);
    }
    Ok(liquidity)
}

/// LP minted for a deposit into a funded pool; the smaller side wins
pub fn proportional_liquidity(
    amount_x: u64,
    amount_y: u64,
    reserve_x: u64,
    reserve_y: u64,
    total_supply: u64,
) -> Result<u64, AmmError> {
    if reserve_x == 0 || reserve_y == 0 {
        return Err(AmmError::InsufficientLiquidity);
    }

    let by_x = amount_x
        .fixed_mul_floor(total_supply, reserve_x)
        .ok_or(AmmError::Overflow)?;
    let by_y = amount_y
        .fixed_mul_floor(total_supply, reserve_y)
        .ok_or(AmmError::Overflow)?;

    let liquidity = min(by_x, by_y);
    if liquidity == 0 {
        return Err(AmmError::InsufficientLiquidityMinted);
    }
    Ok(liquidity)
}

/// Share of each vault released by burning `liquidity` LP
pub fn withdrawal_amounts(
    balance_x: u64,
    balance_y: u64,
    liquidity: u64,
    total_supply: u64,
) -> Result<(u64, u64), AmmError> {
    if total_supply == 0 || liquidity > total_supply {
        return Err(AmmError::InsufficientLiquidity);
    }

    let amount_x = balance_x
        .fixed_mul_floor(liquidity, total_supply)
        .ok_or(AmmError::Overflow)?;
    let amount_y = balance_y
        .fixed_mul_floor(liquidity, total_supply)
        .ok_or(AmmError::Overflow)?;

    if amount_x == 0 || amount_y == 0 {
        return Err(AmmError::InsufficientLiquidityBurned);
    }
    Ok((amount_x, amount_y))
}

/// LP owed to the protocol for invariant growth since the last liquidity event.
///
/// `total_supply * (root_k - root_k_last) * 8 / (root_k_last * 17 + root_k * 8)`,
/// zero when `k_last` is unset or the invariant has not grown.
pub fn protocol_fee_liquidity(
    env: &Env,
    reserve_x: u64,
    reserve_y: u64,
    k_last: u128,
    total_supply: u64,
) -> Result<u64, AmmError> {
    if k_last == 0 {
        return Ok(0);
    }

    let root_k = sqrt(reserve_x as u128 * reserve_y as u128);
    let root_k_last = sqrt(k_last);
    if root_k <= root_k_last {
        return Ok(0);
    }

    let numerator = total_supply as u128 * (root_k - root_k_last);
    let denominator = root_k_last * PROTOCOL_FEE_ROOT_K_LAST_WEIGHT + root_k * PROTOCOL_FEE_NUMERATOR;
    let liquidity = mul_div(env, numerator, PROTOCOL_FEE_NUMERATOR, denominator)?;

    to_u64(liquidity)
}
