#![no_std]

mod config;
mod error;
mod pair;
mod pool;

pub use config::*;
pub use error::*;
pub use pair::*;
pub use pool::*;

/// Basis point denominator (10000 = 100%)
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Scale applied to both sides of the K-invariant comparison
pub const PRECISION: u128 = 10_000;

/// Maximum pool swap fee in basis points (1%)
pub const MAX_FEE: u128 = 100;

/// Maximum market-maker fee in basis points (1%)
pub const MAX_MM_FEE: u128 = 100;

/// LP units locked forever on the first deposit into a pool
pub const MINIMUM_LIQUIDITY: u64 = 1_000;

/// Protocol share of invariant growth: numerator coefficient
pub const PROTOCOL_FEE_NUMERATOR: u128 = 8;

/// Protocol share of invariant growth: coefficient applied to sqrt(k_last)
pub const PROTOCOL_FEE_ROOT_K_LAST_WEIGHT: u128 = 17;

/// Shortest multi-hop route (2 hops)
pub const MIN_ROUTE_LEN: u32 = 3;

/// Longest multi-hop route (4 hops)
pub const MAX_ROUTE_LEN: u32 = 5;

/// Check that a fee in basis points does not exceed `max`
pub fn fee_in_bounds(fee_bps: u128, max: u128) -> bool {
    fee_bps <= max
}
