#![no_std]

mod admin;
mod custody;
mod events;
mod liquidity;
mod pair;
mod pool;
mod router;
mod storage;
mod swap;

use amm_types::{AmmError, PoolState, ProtocolConfig, TokenPairKey};
pub use liquidity::{AddLiquidityParams, RemoveLiquidityParams};
use pool::Pool;
use soroban_sdk::{contract, contractimpl, log, Address, BytesN, Env, Vec};

/// Constant-product exchange holding every pool, its vaults and its LP
/// ledger in one contract.
#[contract]
pub struct AmmEngine;

#[contractimpl]
impl AmmEngine {
    // === Configuration ===

    /// One-time setup of the protocol admin, fee recipients and market-maker fee
    pub fn initialize(
        env: Env,
        admin: Address,
        fee_recipient: Address,
        mm_fee_recipient: Address,
        mm_fee_bps: u128,
    ) -> Result<(), AmmError> {
        admin::initialize(&env, admin, fee_recipient, mm_fee_recipient, mm_fee_bps)
    }

    pub fn set_pair_fee(
        env: Env,
        caller: Address,
        token_a: Address,
        token_b: Address,
        fee_bps: u128,
    ) -> Result<(), AmmError> {
        admin::require_admin(&env, &caller)?;
        let (mut pool, _) = Pool::open(&env, &token_a, &token_b)?;
        pool.set_swap_fee(fee_bps)?;
        pool.save(&env);
        events::pair_fee_updated(&env, pool.id(), fee_bps);
        Ok(())
    }

    pub fn set_mm_fee(env: Env, caller: Address, fee_bps: u128) -> Result<(), AmmError> {
        admin::set_mm_fee(&env, &caller, fee_bps)
    }

    pub fn set_fee_recipient(env: Env, caller: Address, recipient: Address) -> Result<(), AmmError> {
        admin::set_fee_recipient(&env, &caller, recipient)
    }

    pub fn set_mm_fee_recipient(env: Env, caller: Address, recipient: Address) -> Result<(), AmmError> {
        admin::set_mm_fee_recipient(&env, &caller, recipient)
    }

    pub fn set_admin(env: Env, caller: Address, new_admin: Address) -> Result<(), AmmError> {
        admin::set_admin(&env, &caller, new_admin)
    }

    pub fn get_config(env: Env) -> Result<ProtocolConfig, AmmError> {
        storage::get_config(&env)
    }

    // === Pools ===

    /// Create the pool for an unordered pair at its derived id
    pub fn create_pool(
        env: Env,
        creator: Address,
        token_a: Address,
        token_b: Address,
        fee_bps: u128,
    ) -> Result<BytesN<32>, AmmError> {
        creator.require_auth();
        storage::get_config(&env)?;

        let (key, _, id) = pair::resolve(&env, &token_a, &token_b)?;
        let pool = Pool::create(&env, key, id, creator.clone(), fee_bps)?;
        pool.save(&env);

        log!(&env, "pool created", pool.id().clone(), fee_bps);
        events::pool_created(&env, pool.key(), pool.id(), &creator, fee_bps);
        Ok(pool.id().clone())
    }

    /// Deposit up to the desired amounts at the current price.
    /// Returns `(used_a, used_b, lp_minted)`.
    pub fn add_liquidity(
        env: Env,
        provider: Address,
        params: AddLiquidityParams,
    ) -> Result<(u64, u64, u64), AmmError> {
        liquidity::add_liquidity(&env, &provider, &params)
    }

    /// Burn LP for a proportional share of both vaults. Returns `(out_a, out_b)`.
    pub fn remove_liquidity(
        env: Env,
        provider: Address,
        params: RemoveLiquidityParams,
    ) -> Result<(u64, u64), AmmError> {
        liquidity::remove_liquidity(&env, &provider, &params)
    }

    /// Credit the pool's accumulated protocol fee LP to the fee recipient
    pub fn withdraw_protocol_fee(env: Env, token_a: Address, token_b: Address) -> Result<u64, AmmError> {
        liquidity::withdraw_protocol_fee(&env, &token_a, &token_b)
    }

    pub fn transfer_lp(
        env: Env,
        from: Address,
        to: Address,
        token_a: Address,
        token_b: Address,
        amount: u64,
    ) -> Result<(), AmmError> {
        liquidity::transfer_lp(&env, &from, &to, &token_a, &token_b, amount)
    }

    // === Swaps ===

    pub fn swap_exact_in(
        env: Env,
        trader: Address,
        token_in: Address,
        token_out: Address,
        amount_in: u64,
        amount_out_min: u64,
        deadline: u64,
    ) -> Result<u64, AmmError> {
        admin::check_deadline(&env, deadline)?;
        swap::swap_exact_in(&env, &trader, &token_in, &token_out, amount_in, amount_out_min)
    }

    pub fn swap_exact_out(
        env: Env,
        trader: Address,
        token_in: Address,
        token_out: Address,
        amount_out: u64,
        amount_in_max: u64,
        deadline: u64,
    ) -> Result<u64, AmmError> {
        admin::check_deadline(&env, deadline)?;
        swap::swap_exact_out(&env, &trader, &token_in, &token_out, amount_out, amount_in_max)
    }

    /// Exact input along a path of 2 to 4 hops
    pub fn swap_exact_in_path(
        env: Env,
        trader: Address,
        path: Vec<Address>,
        amount_in: u64,
        amount_out_min: u64,
        deadline: u64,
    ) -> Result<u64, AmmError> {
        admin::check_deadline(&env, deadline)?;
        router::swap_exact_in_path(&env, &trader, &path, amount_in, amount_out_min)
    }

    /// Exact output along a path of 2 to 4 hops
    pub fn swap_exact_out_path(
        env: Env,
        trader: Address,
        path: Vec<Address>,
        amount_out: u64,
        amount_in_max: u64,
        deadline: u64,
    ) -> Result<u64, AmmError> {
        admin::check_deadline(&env, deadline)?;
        router::swap_exact_out_path(&env, &trader, &path, amount_out, amount_in_max)
    }

    pub fn get_amounts_out(env: Env, path: Vec<Address>, amount_in: u64) -> Result<Vec<u64>, AmmError> {
        router::get_amounts_out(&env, &path, amount_in)
    }

    pub fn get_amounts_in(env: Env, path: Vec<Address>, amount_out: u64) -> Result<Vec<u64>, AmmError> {
        router::get_amounts_in(&env, &path, amount_out)
    }

    // === Queries ===

    pub fn pool_id(env: Env, token_a: Address, token_b: Address) -> Result<BytesN<32>, AmmError> {
        let (_, _, id) = pair::resolve(&env, &token_a, &token_b)?;
        Ok(id)
    }

    pub fn pool_exists(env: Env, token_a: Address, token_b: Address) -> Result<bool, AmmError> {
        let (_, _, id) = pair::resolve(&env, &token_a, &token_b)?;
        Ok(storage::has_pool(&env, &id))
    }

    pub fn sort_assets(env: Env, token_a: Address, token_b: Address) -> Result<(TokenPairKey, bool), AmmError> {
        pair::sort_assets(&env, &token_a, &token_b)
    }

    /// Full pool state in canonical order
    pub fn get_pool(env: Env, token_a: Address, token_b: Address) -> Result<PoolState, AmmError> {
        let (pool, _) = Pool::open(&env, &token_a, &token_b)?;
        Ok(pool.state().clone())
    }

    /// Reserves in caller order
    pub fn reserves(env: Env, token_a: Address, token_b: Address) -> Result<(u64, u64), AmmError> {
        let (pool, swapped) = Pool::open(&env, &token_a, &token_b)?;
        Ok(swap::oriented_reserves(&pool, swapped))
    }

    pub fn pair_fee(env: Env, token_a: Address, token_b: Address) -> Result<u128, AmmError> {
        let (pool, _) = Pool::open(&env, &token_a, &token_b)?;
        Ok(pool.swap_fee())
    }

    pub fn lp_supply(env: Env, token_a: Address, token_b: Address) -> Result<u64, AmmError> {
        let (pool, _) = Pool::open(&env, &token_a, &token_b)?;
        Ok(pool.lp_supply())
    }

    pub fn lp_balance(env: Env, token_a: Address, token_b: Address, owner: Address) -> Result<u64, AmmError> {
        let (pool, _) = Pool::open(&env, &token_a, &token_b)?;
        Ok(pool.lp_balance(&env, &owner))
    }
}
