use soroban_sdk::{contracttype, Address, BytesN};

/// Balance of one asset held in custody on behalf of a single pool
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Vault {
    /// Asset contract address
    pub asset: Address,
    /// Units currently held for the pool
    pub balance: u64,
}

impl Vault {
    pub fn new(asset: Address) -> Self {
        Self { asset, balance: 0 }
    }
}

/// Persistent state of one constant-product pool (canonical x/y order)
#[contracttype]
#[derive(Clone, Debug)]
pub struct PoolState {
    /// Derived pool id; also identifies the pool's LP asset
    pub id: BytesN<32>,
    /// Account that created the pool (informational)
    pub creator: Address,
    /// Pool swap fee in basis points, at most MAX_FEE
    pub swap_fee: u128,
    /// Custody for asset x
    pub vault_x: Vault,
    /// Custody for asset y
    pub vault_y: Vault,
    /// Reserve of asset x used for pricing
    pub reserve_x: u64,
    /// Reserve of asset y used for pricing
    pub reserve_y: u64,
    /// Ledger timestamp of the last reserve refresh
    pub last_updated: u64,
    /// reserve_x * reserve_y after the last liquidity event (0 = none yet)
    pub k_last: u128,
    /// Protocol fee owed, in LP units
    pub fee_amount: u64,
    /// Total LP supply including the locked minimum and owed protocol fee
    pub lp_supply: u64,
}

impl PoolState {
    pub fn new(id: BytesN<32>, creator: Address, swap_fee: u128, x: Address, y: Address) -> Self {
        Self {
            id,
            creator,
            swap_fee,
            vault_x: Vault::new(x),
            vault_y: Vault::new(y),
            reserve_x: 0,
            reserve_y: 0,
            last_updated: 0,
            k_last: 0,
            fee_amount: 0,
            lp_supply: 0,
        }
    }

    /// Reserves agree with custody balances
    pub fn is_synced(&self) -> bool {
        self.reserve_x == self.vault_x.balance && self.reserve_y == self.vault_y.balance
    }
}
