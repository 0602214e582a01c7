use crate::full_math::product_gte;
use amm_types::{AmmError, PRECISION};
use soroban_sdk::Env;

/// Input implied by a post-transfer balance once `amount_out` has left
pub fn implied_input(balance: u64, reserve: u64, amount_out: u64) -> u64 {
    balance.saturating_sub(reserve.saturating_sub(amount_out))
}

/// Constant-product guard run after every swap.
///
/// With inputs inferred from the vault balances, requires
/// `(bx * P - in_x * fee) * (by * P - in_y * fee) >= rx * P * ry * P`.
/// Products that overflow 128 bits are compared in 256 bits.
#[allow(clippy::too_many_arguments)]
pub fn check_k(
    env: &Env,
    balance_x: u64,
    balance_y: u64,
    reserve_x: u64,
    reserve_y: u64,
    amount_x_out: u64,
    amount_y_out: u64,
    fee_bps: u128,
) -> Result<(), AmmError> {
    if fee_bps > PRECISION {
        return Err(AmmError::InvalidFee);
    }

    let amount_x_in = implied_input(balance_x, reserve_x, amount_x_out);
    let amount_y_in = implied_input(balance_y, reserve_y, amount_y_out);
    if amount_x_in == 0 && amount_y_in == 0 {
        return Err(AmmError::InsufficientInput);
    }

    // in <= balance and fee <= PRECISION, so neither side underflows
    let balance_x_adj = balance_x as u128 * PRECISION - amount_x_in as u128 * fee_bps;
    let balance_y_adj = balance_y as u128 * PRECISION - amount_y_in as u128 * fee_bps;
    let reserve_x_adj = reserve_x as u128 * PRECISION;
    let reserve_y_adj = reserve_y as u128 * PRECISION;

    if !product_gte(env, balance_x_adj, balance_y_adj, reserve_x_adj, reserve_y_adj) {
        return Err(AmmError::InvariantViolation);
    }
    Ok(())
}
