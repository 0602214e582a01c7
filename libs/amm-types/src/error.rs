use soroban_sdk::contracterror;

/// Every failure the engine can report.
///
/// Any error aborts the whole invocation; the host rolls back all storage
/// writes and token transfers made before it was raised.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum AmmError {
    /// Zero or inconsistent quantities
    InvalidAmount = 1,
    /// Reserves too small, or the request would drain a reserve
    InsufficientLiquidity = 2,
    /// Zero input supplied
    InsufficientInput = 3,
    /// Zero output requested or produced
    InsufficientOutput = 4,
    /// Share computation rounded to nothing on deposit
    InsufficientLiquidityMinted = 5,
    /// Share computation rounded to nothing on withdrawal
    InsufficientLiquidityBurned = 6,
    /// No pool at the derived pool id
    PairNotFound = 7,
    /// Pool or engine already created
    AlreadyInitialized = 8,
    /// Fee above its configured bound
    InvalidFee = 9,
    /// Post-swap K check failed
    InvariantViolation = 10,
    /// Admin-gated call from a non-admin
    Unauthorized = 11,
    /// Required input above the caller's ceiling
    InputExceedsMax = 12,
    /// Produced output below the caller's floor
    OutputBelowMin = 13,
    /// Engine used before `initialize`
    NotInitialized = 14,
    /// Both sides of a pair are the same asset
    IdenticalAssets = 15,
    /// LP holder has fewer tokens than requested
    InsufficientLpBalance = 16,
    /// Route shorter or longer than supported
    InvalidPath = 17,
    /// Ledger time is past the caller's deadline
    Expired = 18,
    /// A result does not fit back into 64 bits
    Overflow = 19,
}
