use amm_types::{AmmError, PoolState, ProtocolConfig};
use soroban_sdk::{contracttype, Address, BytesN, Env};

// ============================================================================
// SOROBAN RESOURCE LIMITS
// ============================================================================
// - Ledger entry size: 128 KiB max per entry
// - Read entries per tx: 100 entries / 200 KB
// - Write entries per tx: 50 entries / 132 KB
//
// Storage layout:
// - Protocol config lives in Instance storage (read by every swap)
// - Each pool is one Persistent entry keyed by its derived id (~300 bytes)
// - Each LP holder is one Persistent entry per pool
// - There is no pool list; existence is a direct `has` on the derived key
//
// A 4-hop route touches 4 pool entries + config, well inside the limits.
// ============================================================================

/// Storage keys for the engine contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Protocol configuration (Instance storage)
    Config,
    /// Pool state by derived pool id (Persistent storage)
    Pool(BytesN<32>),
    /// LP balance: (pool id, owner) -> u64 (Persistent storage)
    LpBalance(BytesN<32>, Address),
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280; // ~1 day
const INSTANCE_TTL_EXTEND: u32 = 518400; // ~30 days
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

/// Extend instance storage TTL
pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

/// Extend persistent storage TTL for a key
pub fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

// === Config ===

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Result<ProtocolConfig, AmmError> {
    let config = env
        .storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(AmmError::NotInitialized)?;
    extend_instance_ttl(env);
    Ok(config)
}

pub fn set_config(env: &Env, config: &ProtocolConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance_ttl(env);
}

// === Pool ===

pub fn has_pool(env: &Env, id: &BytesN<32>) -> bool {
    env.storage().persistent().has(&DataKey::Pool(id.clone()))
}

pub fn get_pool(env: &Env, id: &BytesN<32>) -> Option<PoolState> {
    let key = DataKey::Pool(id.clone());
    let state = env.storage().persistent().get(&key);
    if state.is_some() {
        extend_persistent_ttl(env, &key);
    }
    state
}

pub fn set_pool(env: &Env, state: &PoolState) {
    let key = DataKey::Pool(state.id.clone());
    env.storage().persistent().set(&key, state);
    extend_persistent_ttl(env, &key);
}

// === LP balances ===

pub fn get_lp_balance(env: &Env, pool_id: &BytesN<32>, owner: &Address) -> u64 {
    let key = DataKey::LpBalance(pool_id.clone(), owner.clone());
    env.storage().persistent().get(&key).unwrap_or(0)
}

pub fn set_lp_balance(env: &Env, pool_id: &BytesN<32>, owner: &Address, balance: u64) {
    let key = DataKey::LpBalance(pool_id.clone(), owner.clone());
    if balance == 0 {
        // Remove empty balance
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &balance);
        extend_persistent_ttl(env, &key);
    }
}
