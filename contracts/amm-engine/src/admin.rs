use crate::events;
use crate::storage::{get_config, has_config, set_config};
use amm_types::{fee_in_bounds, AmmError, ProtocolConfig, MAX_MM_FEE};
use soroban_sdk::{Address, Env};

/// Store the protocol configuration exactly once
pub fn initialize(
    env: &Env,
    admin: Address,
    fee_recipient: Address,
    mm_fee_recipient: Address,
    mm_fee_bps: u128,
) -> Result<(), AmmError> {
    if has_config(env) {
        return Err(AmmError::AlreadyInitialized);
    }
    admin.require_auth();
    if !fee_in_bounds(mm_fee_bps, MAX_MM_FEE) {
        return Err(AmmError::InvalidFee);
    }

    let config = ProtocolConfig {
        admin,
        fee_recipient,
        mm_fee_recipient,
        mm_fee_bps,
    };
    set_config(env, &config);
    events::initialized(env, &config.admin, mm_fee_bps);
    Ok(())
}

/// Config for an admin-gated mutation: `caller` must sign and be the admin
pub fn require_admin(env: &Env, caller: &Address) -> Result<ProtocolConfig, AmmError> {
    let config = get_config(env)?;
    caller.require_auth();
    if *caller != config.admin {
        return Err(AmmError::Unauthorized);
    }
    Ok(config)
}

pub fn set_mm_fee(env: &Env, caller: &Address, fee_bps: u128) -> Result<(), AmmError> {
    let mut config = require_admin(env, caller)?;
    if !fee_in_bounds(fee_bps, MAX_MM_FEE) {
        return Err(AmmError::InvalidFee);
    }
    config.mm_fee_bps = fee_bps;
    set_config(env, &config);
    events::config_updated(env, "mm_fee", caller);
    Ok(())
}

pub fn set_fee_recipient(env: &Env, caller: &Address, recipient: Address) -> Result<(), AmmError> {
    let mut config = require_admin(env, caller)?;
    config.fee_recipient = recipient;
    set_config(env, &config);
    events::config_updated(env, "fee_recipient", caller);
    Ok(())
}

pub fn set_mm_fee_recipient(env: &Env, caller: &Address, recipient: Address) -> Result<(), AmmError> {
    let mut config = require_admin(env, caller)?;
    config.mm_fee_recipient = recipient;
    set_config(env, &config);
    events::config_updated(env, "mm_fee_recipient", caller);
    Ok(())
}

pub fn set_admin(env: &Env, caller: &Address, new_admin: Address) -> Result<(), AmmError> {
    let mut config = require_admin(env, caller)?;
    config.admin = new_admin;
    set_config(env, &config);
    events::config_updated(env, "admin", caller);
    Ok(())
}

pub fn check_deadline(env: &Env, deadline: u64) -> Result<(), AmmError> {
    if env.ledger().timestamp() > deadline {
        return Err(AmmError::Expired);
    }
    Ok(())
}
