use crate::admin::check_deadline;
use crate::custody::{collect, pay};
use crate::events;
use crate::pool::Pool;
use crate::storage::get_config;
use amm_math::{initial_liquidity, optimal_amounts, proportional_liquidity, withdrawal_amounts};
use amm_types::{AmmError, TokenPairKey, MINIMUM_LIQUIDITY};
use soroban_sdk::{contracttype, Address, Env};

/// Parameters for a deposit; amounts are in the caller's token order
#[contracttype]
#[derive(Clone, Debug)]
pub struct AddLiquidityParams {
    pub token_a: Address,
    pub token_b: Address,
    pub amount_a_desired: u64,
    pub amount_b_desired: u64,
    pub amount_a_min: u64,
    pub amount_b_min: u64,
    pub deadline: u64,
}

/// Parameters for a withdrawal; minimums are in the caller's token order
#[contracttype]
#[derive(Clone, Debug)]
pub struct RemoveLiquidityParams {
    pub token_a: Address,
    pub token_b: Address,
    pub liquidity: u64,
    pub amount_a_min: u64,
    pub amount_b_min: u64,
    pub deadline: u64,
}

/// Deposit into an existing pool and mint LP to `provider`.
///
/// The protocol fee is minted first, so the depositor's share is computed
/// against the pre-deposit reserves and the supply that already includes it.
/// Returns `(used_a, used_b, liquidity)` in caller order.
pub fn add_liquidity(
    env: &Env,
    provider: &Address,
    params: &AddLiquidityParams,
) -> Result<(u64, u64, u64), AmmError> {
    provider.require_auth();
    check_deadline(env, params.deadline)?;
    get_config(env)?;

    let (mut pool, swapped) = Pool::open(env, &params.token_a, &params.token_b)?;
    let (desired_x, desired_y) = TokenPairKey::orient(swapped, params.amount_a_desired, params.amount_b_desired);
    let (min_x, min_y) = TokenPairKey::orient(swapped, params.amount_a_min, params.amount_b_min);

    pool.mint_fee(env)?;

    let (reserve_x, reserve_y) = pool.reserves();
    let (amount_x, amount_y) = optimal_amounts(desired_x, desired_y, reserve_x, reserve_y)?;
    if amount_x < min_x || amount_y < min_y {
        return Err(AmmError::OutputBelowMin);
    }

    let supply = pool.lp_supply();
    let liquidity = if supply == 0 {
        let total = initial_liquidity(amount_x, amount_y)?;
        pool.mint_locked(MINIMUM_LIQUIDITY)?;
        total - MINIMUM_LIQUIDITY
    } else {
        proportional_liquidity(amount_x, amount_y, reserve_x, reserve_y, supply)?
    };

    let x = pool.key().x.clone();
    let y = pool.key().y.clone();
    pool.deposit(collect(env, provider, &x, amount_x))?;
    pool.deposit(collect(env, provider, &y, amount_y))?;
    pool.mint_lp(env, provider, liquidity)?;

    pool.sync(env, true);
    pool.save(env);
    events::liquidity_added(env, pool.id(), provider, amount_x, amount_y, liquidity);

    let (used_a, used_b) = TokenPairKey::orient(swapped, amount_x, amount_y);
    Ok((used_a, used_b, liquidity))
}

/// Burn `liquidity` LP from `provider` and pay out its share of both vaults.
///
/// Returns `(out_a, out_b)` in caller order.
pub fn remove_liquidity(
    env: &Env,
    provider: &Address,
    params: &RemoveLiquidityParams,
) -> Result<(u64, u64), AmmError> {
    provider.require_auth();
    check_deadline(env, params.deadline)?;
    get_config(env)?;

    let (mut pool, swapped) = Pool::open(env, &params.token_a, &params.token_b)?;
    let (min_x, min_y) = TokenPairKey::orient(swapped, params.amount_a_min, params.amount_b_min);
    let liquidity = params.liquidity;

    pool.mint_fee(env)?;

    let (balance_x, balance_y) = pool.balances();
    let (amount_x, amount_y) = withdrawal_amounts(balance_x, balance_y, liquidity, pool.lp_supply())?;
    if amount_x < min_x || amount_y < min_y {
        return Err(AmmError::OutputBelowMin);
    }

    pool.burn_lp(env, provider, liquidity)?;
    let out_x = pool.withdraw_x(amount_x)?;
    let out_y = pool.withdraw_y(amount_y)?;
    pay(env, provider, out_x);
    pay(env, provider, out_y);

    pool.sync(env, true);
    pool.save(env);
    events::liquidity_removed(env, pool.id(), provider, amount_x, amount_y, liquidity);

    Ok(TokenPairKey::orient(swapped, amount_x, amount_y))
}

/// Credit the accumulated protocol fee LP to the configured recipient
pub fn withdraw_protocol_fee(env: &Env, token_a: &Address, token_b: &Address) -> Result<u64, AmmError> {
    let config = get_config(env)?;
    config.fee_recipient.require_auth();

    let (mut pool, _) = Pool::open(env, token_a, token_b)?;
    let owed = pool.take_fee();
    if owed > 0 {
        pool.credit_lp(env, &config.fee_recipient, owed)?;
        pool.save(env);
        events::fee_withdrawn(env, pool.id(), &config.fee_recipient, owed);
    }
    Ok(owed)
}

pub fn transfer_lp(
    env: &Env,
    from: &Address,
    to: &Address,
    token_a: &Address,
    token_b: &Address,
    amount: u64,
) -> Result<(), AmmError> {
    from.require_auth();
    if amount == 0 {
        return Err(AmmError::InvalidAmount);
    }

    let (pool, _) = Pool::open(env, token_a, token_b)?;
    pool.transfer_lp(env, from, to, amount)?;
    events::lp_transfer(env, pool.id(), from, to, amount);
    Ok(())
}
