use amm_types::TokenPairKey;
use soroban_sdk::{Address, BytesN, Env, Symbol};

pub fn initialized(env: &Env, admin: &Address, mm_fee_bps: u128) {
    env.events().publish(
        (Symbol::new(env, "initialized"),),
        (admin.clone(), mm_fee_bps),
    );
}

pub fn pool_created(env: &Env, key: &TokenPairKey, id: &BytesN<32>, creator: &Address, swap_fee: u128) {
    env.events().publish(
        (Symbol::new(env, "pool_created"),),
        (key.x.clone(), key.y.clone(), id.clone(), creator.clone(), swap_fee),
    );
}

pub fn liquidity_added(env: &Env, id: &BytesN<32>, provider: &Address, amount_x: u64, amount_y: u64, liquidity: u64) {
    env.events().publish(
        (Symbol::new(env, "liq_added"), id.clone()),
        (provider.clone(), amount_x, amount_y, liquidity),
    );
}

pub fn liquidity_removed(env: &Env, id: &BytesN<32>, provider: &Address, amount_x: u64, amount_y: u64, liquidity: u64) {
    env.events().publish(
        (Symbol::new(env, "liq_removed"), id.clone()),
        (provider.clone(), amount_x, amount_y, liquidity),
    );
}

/// One executed hop; amounts are in canonical x/y order
#[allow(clippy::too_many_arguments)]
pub fn swap(
    env: &Env,
    id: &BytesN<32>,
    trader: &Address,
    amount_x_in: u64,
    amount_y_in: u64,
    amount_x_out: u64,
    amount_y_out: u64,
    reserves: (u64, u64),
) {
    env.events().publish(
        (Symbol::new(env, "swap"), id.clone()),
        (
            trader.clone(),
            amount_x_in,
            amount_y_in,
            amount_x_out,
            amount_y_out,
            reserves.0,
            reserves.1,
        ),
    );
}

pub fn mm_fee_charged(env: &Env, asset: &Address, recipient: &Address, amount: u64) {
    env.events().publish(
        (Symbol::new(env, "mm_fee"),),
        (asset.clone(), recipient.clone(), amount),
    );
}

pub fn fee_minted(env: &Env, id: &BytesN<32>, liquidity: u64) {
    env.events().publish((Symbol::new(env, "fee_minted"), id.clone()), liquidity);
}

pub fn fee_withdrawn(env: &Env, id: &BytesN<32>, recipient: &Address, liquidity: u64) {
    env.events().publish(
        (Symbol::new(env, "fee_withdrawn"), id.clone()),
        (recipient.clone(), liquidity),
    );
}

pub fn lp_transfer(env: &Env, id: &BytesN<32>, from: &Address, to: &Address, amount: u64) {
    env.events().publish(
        (Symbol::new(env, "lp_transfer"), id.clone()),
        (from.clone(), to.clone(), amount),
    );
}

/// Admin change; `field` names what changed
pub fn config_updated(env: &Env, field: &str, admin: &Address) {
    env.events().publish(
        (Symbol::new(env, "config"), Symbol::new(env, field)),
        admin.clone(),
    );
}

pub fn pair_fee_updated(env: &Env, id: &BytesN<32>, swap_fee: u128) {
    env.events().publish(
        (Symbol::new(env, "config"), Symbol::new(env, "pair_fee"), id.clone()),
        swap_fee,
    );
}
