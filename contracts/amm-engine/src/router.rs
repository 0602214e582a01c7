use crate::custody::{collect, pay};
use crate::pair::resolve;
use crate::pool::Pool;
use crate::storage::{get_config, has_pool};
use crate::swap::{execute_hop, mm_fee_on, oriented_reserves, skim_mm_fee};
use amm_math::{get_amount_in, get_amount_out};
use amm_types::{AmmError, MAX_ROUTE_LEN, MIN_ROUTE_LEN};
use soroban_sdk::{Address, Env, Vec};

/// Shortest path accepted by the read-only quotes (a single hop)
const MIN_QUOTE_LEN: u32 = 2;

fn validate_path(path: &Vec<Address>, min_len: u32) -> Result<(), AmmError> {
    if path.len() < min_len || path.len() > MAX_ROUTE_LEN {
        return Err(AmmError::InvalidPath);
    }
    Ok(())
}

/// Assets `(in, out)` of hop `i`
fn hop(path: &Vec<Address>, i: u32) -> Result<(Address, Address), AmmError> {
    let token_in = path.get(i).ok_or(AmmError::InvalidPath)?;
    let token_out = path.get(i + 1).ok_or(AmmError::InvalidPath)?;
    Ok((token_in, token_out))
}

/// Every hop's pool must exist before any value moves
fn require_pools(env: &Env, path: &Vec<Address>) -> Result<(), AmmError> {
    for i in 0..path.len() - 1 {
        let (token_in, token_out) = hop(path, i)?;
        let (_, _, id) = resolve(env, &token_in, &token_out)?;
        if !has_pool(env, &id) {
            return Err(AmmError::PairNotFound);
        }
    }
    Ok(())
}

/// Per-hop amounts for an exact input, `amounts[0] == amount_in`
pub fn get_amounts_out(env: &Env, path: &Vec<Address>, amount_in: u64) -> Result<Vec<u64>, AmmError> {
    validate_path(path, MIN_QUOTE_LEN)?;

    let mut amounts = Vec::new(env);
    amounts.push_back(amount_in);
    let mut current = amount_in;
    for i in 0..path.len() - 1 {
        let (token_in, token_out) = hop(path, i)?;
        let (pool, swapped) = Pool::open(env, &token_in, &token_out)?;
        let (reserve_in, reserve_out) = oriented_reserves(&pool, swapped);
        current = get_amount_out(env, current, reserve_in, reserve_out, pool.swap_fee())?;
        amounts.push_back(current);
    }
    Ok(amounts)
}

/// Per-hop amounts for an exact output, computed last hop first;
/// `amounts[len - 1] == amount_out`
pub fn get_amounts_in(env: &Env, path: &Vec<Address>, amount_out: u64) -> Result<Vec<u64>, AmmError> {
    validate_path(path, MIN_QUOTE_LEN)?;

    let mut amounts = Vec::new(env);
    amounts.push_front(amount_out);
    let mut current = amount_out;
    for i in (0..path.len() - 1).rev() {
        let (token_in, token_out) = hop(path, i)?;
        let (pool, swapped) = Pool::open(env, &token_in, &token_out)?;
        let (reserve_in, reserve_out) = oriented_reserves(&pool, swapped);
        current = get_amount_in(env, current, reserve_in, reserve_out, pool.swap_fee())?;
        amounts.push_front(current);
    }
    Ok(amounts)
}

/// Multi-hop exact input. The market-maker fee is taken once from the
/// trader's input; intermediate amounts never leave engine custody.
pub fn swap_exact_in_path(
    env: &Env,
    trader: &Address,
    path: &Vec<Address>,
    amount_in: u64,
    amount_out_min: u64,
) -> Result<u64, AmmError> {
    trader.require_auth();
    validate_path(path, MIN_ROUTE_LEN)?;
    if amount_in == 0 {
        return Err(AmmError::InsufficientInput);
    }
    let config = get_config(env)?;
    require_pools(env, path)?;

    let first = path.get(0).ok_or(AmmError::InvalidPath)?;
    let mut carried = collect(env, trader, &first, amount_in);
    skim_mm_fee(env, &config, &mut carried, mm_fee_on(&config, amount_in)?)?;

    // Pools load one hop at a time so a route that revisits a pool sees
    // the previous hop's reserves
    for i in 0..path.len() - 1 {
        let (token_in, token_out) = hop(path, i)?;
        let (mut pool, swapped) = Pool::open(env, &token_in, &token_out)?;
        let (reserve_in, reserve_out) = oriented_reserves(&pool, swapped);
        let amount_out = get_amount_out(env, carried.amount(), reserve_in, reserve_out, pool.swap_fee())?;
        carried = execute_hop(env, &mut pool, !swapped, carried, amount_out, trader)?;
    }

    let amount_out = carried.amount();
    if amount_out < amount_out_min {
        return Err(AmmError::OutputBelowMin);
    }
    pay(env, trader, carried);
    Ok(amount_out)
}

/// Multi-hop exact output. Required inputs are computed back to front, then
/// executed front to back; returns the total taken from the trader,
/// market-maker fee included.
pub fn swap_exact_out_path(
    env: &Env,
    trader: &Address,
    path: &Vec<Address>,
    amount_out: u64,
    amount_in_max: u64,
) -> Result<u64, AmmError> {
    trader.require_auth();
    validate_path(path, MIN_ROUTE_LEN)?;
    let config = get_config(env)?;
    require_pools(env, path)?;

    let amounts = get_amounts_in(env, path, amount_out)?;
    let pool_in = amounts.get(0).ok_or(AmmError::InvalidPath)?;
    let fee = mm_fee_on(&config, pool_in)?;
    let total_in = pool_in.checked_add(fee).ok_or(AmmError::Overflow)?;
    if total_in > amount_in_max {
        return Err(AmmError::InputExceedsMax);
    }

    let first = path.get(0).ok_or(AmmError::InvalidPath)?;
    let mut carried = collect(env, trader, &first, total_in);
    skim_mm_fee(env, &config, &mut carried, fee)?;

    for i in 0..path.len() - 1 {
        let (token_in, token_out) = hop(path, i)?;
        let hop_out = amounts.get(i + 1).ok_or(AmmError::InvalidPath)?;
        let (mut pool, swapped) = Pool::open(env, &token_in, &token_out)?;
        carried = execute_hop(env, &mut pool, !swapped, carried, hop_out, trader)?;
    }

    pay(env, trader, carried);
    Ok(total_in)
}
