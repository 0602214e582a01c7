use soroban_sdk::{contracttype, Address};

/// Canonically ordered asset pair: `x` sorts strictly before `y`
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenPairKey {
    pub x: Address,
    pub y: Address,
}

impl TokenPairKey {
    /// Put a pair of caller-ordered values into canonical order
    pub fn orient<T>(swapped: bool, a: T, b: T) -> (T, T) {
        if swapped {
            (b, a)
        } else {
            (a, b)
        }
    }
}
