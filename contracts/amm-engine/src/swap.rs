use crate::custody::{collect, pay, Tokens};
use crate::events;
use crate::pool::Pool;
use crate::storage::get_config;
use amm_math::{get_amount_in, get_amount_out, to_u64};
use amm_types::{AmmError, ProtocolConfig, TokenPairKey, BPS_DENOMINATOR};
use soroban_sdk::{Address, Env};

/// Market-maker fee owed on `amount`, rounded down
pub fn mm_fee_on(config: &ProtocolConfig, amount: u64) -> Result<u64, AmmError> {
    to_u64(amount as u128 * config.mm_fee_bps / BPS_DENOMINATOR)
}

/// Split `fee` off `tokens` and pay it to the market-maker fee recipient
pub fn skim_mm_fee(env: &Env, config: &ProtocolConfig, tokens: &mut Tokens, fee: u64) -> Result<(), AmmError> {
    if fee == 0 {
        return Ok(());
    }
    let cut = tokens.split(fee)?;
    events::mm_fee_charged(env, cut.asset(), &config.mm_fee_recipient, fee);
    pay(env, &config.mm_fee_recipient, cut);
    Ok(())
}

/// Reserves of `pool` oriented as (in, out) for a swap entering on the
/// caller's first asset
pub fn oriented_reserves(pool: &Pool, swapped: bool) -> (u64, u64) {
    let (reserve_x, reserve_y) = pool.reserves();
    TokenPairKey::orient(swapped, reserve_x, reserve_y)
}

/// Run one hop: `input` enters the vault on the input side, `amount_out`
/// leaves the other, then the invariant is checked and reserves refreshed.
///
/// `x_to_y` is true when the input is the pool's canonical x asset.
pub fn execute_hop(
    env: &Env,
    pool: &mut Pool,
    x_to_y: bool,
    input: Tokens,
    amount_out: u64,
    trader: &Address,
) -> Result<Tokens, AmmError> {
    if amount_out == 0 {
        return Err(AmmError::InsufficientOutput);
    }
    let amount_in = input.amount();
    pool.deposit(input)?;

    let (output, x_in, y_in, x_out, y_out) = if x_to_y {
        (pool.withdraw_y(amount_out)?, amount_in, 0, 0, amount_out)
    } else {
        (pool.withdraw_x(amount_out)?, 0, amount_in, amount_out, 0)
    };

    pool.check_k(env, x_out, y_out)?;
    // Swaps leave k_last alone; only liquidity events move it
    pool.sync(env, false);
    pool.save(env);

    events::swap(env, pool.id(), trader, x_in, y_in, x_out, y_out, pool.reserves());
    Ok(output)
}

/// Sell exactly `amount_in` of `token_in`; the market-maker fee comes off
/// the input before pricing. Returns the output paid to `trader`.
pub fn swap_exact_in(
    env: &Env,
    trader: &Address,
    token_in: &Address,
    token_out: &Address,
    amount_in: u64,
    amount_out_min: u64,
) -> Result<u64, AmmError> {
    trader.require_auth();
    if amount_in == 0 {
        return Err(AmmError::InsufficientInput);
    }
    let config = get_config(env)?;
    let (mut pool, swapped) = Pool::open(env, token_in, token_out)?;

    let fee = mm_fee_on(&config, amount_in)?;
    let net_in = amount_in - fee;
    let (reserve_in, reserve_out) = oriented_reserves(&pool, swapped);
    let amount_out = get_amount_out(env, net_in, reserve_in, reserve_out, pool.swap_fee())?;
    if amount_out < amount_out_min {
        return Err(AmmError::OutputBelowMin);
    }

    let mut input = collect(env, trader, token_in, amount_in);
    skim_mm_fee(env, &config, &mut input, fee)?;
    let output = execute_hop(env, &mut pool, !swapped, input, amount_out, trader)?;
    pay(env, trader, output);

    Ok(amount_out)
}

/// Buy exactly `amount_out` of `token_out`. The market-maker fee is added on
/// top of the computed pool input; returns the total taken from `trader`.
pub fn swap_exact_out(
    env: &Env,
    trader: &Address,
    token_in: &Address,
    token_out: &Address,
    amount_out: u64,
    amount_in_max: u64,
) -> Result<u64, AmmError> {
    trader.require_auth();
    let config = get_config(env)?;
    let (mut pool, swapped) = Pool::open(env, token_in, token_out)?;

    let (reserve_in, reserve_out) = oriented_reserves(&pool, swapped);
    let amount_in = get_amount_in(env, amount_out, reserve_in, reserve_out, pool.swap_fee())?;
    let fee = mm_fee_on(&config, amount_in)?;
    let total_in = amount_in.checked_add(fee).ok_or(AmmError::Overflow)?;
    if total_in > amount_in_max {
        return Err(AmmError::InputExceedsMax);
    }

    let mut input = collect(env, trader, token_in, total_in);
    skim_mm_fee(env, &config, &mut input, fee)?;
    let output = execute_hop(env, &mut pool, !swapped, input, amount_out, trader)?;
    pay(env, trader, output);

    Ok(total_in)
}
