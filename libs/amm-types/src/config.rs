use soroban_sdk::{contracttype, Address};

/// Engine-wide protocol configuration
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProtocolConfig {
    /// Address allowed to change fees and recipients
    pub admin: Address,
    /// Receives LP minted on invariant growth
    pub fee_recipient: Address,
    /// Receives the market-maker fee skimmed off swap inputs
    pub mm_fee_recipient: Address,
    /// Market-maker fee in basis points, at most MAX_MM_FEE
    pub mm_fee_bps: u128,
}
