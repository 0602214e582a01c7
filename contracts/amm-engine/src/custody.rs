use amm_types::AmmError;
use soroban_sdk::{token, Address, Env};

/// Units of one asset held by the engine and not yet assigned to a vault
/// or paid out. Must be consumed by a vault deposit or a payment.
#[must_use]
#[derive(Debug)]
pub struct Tokens {
    asset: Address,
    amount: u64,
}

impl Tokens {
    pub fn asset(&self) -> &Address {
        &self.asset
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    /// Carve `amount` off into a separate value
    pub fn split(&mut self, amount: u64) -> Result<Tokens, AmmError> {
        self.amount = self
            .amount
            .checked_sub(amount)
            .ok_or(AmmError::InvalidAmount)?;
        Ok(Tokens {
            asset: self.asset.clone(),
            amount,
        })
    }

    /// Dissolve into its parts; only vaults may do this
    pub(crate) fn into_parts(self) -> (Address, u64) {
        (self.asset, self.amount)
    }

    /// Re-materialize units released by a vault
    pub(crate) fn released(asset: Address, amount: u64) -> Tokens {
        Tokens { asset, amount }
    }
}

/// Pull `amount` of `asset` from `from` into engine custody
pub fn collect(env: &Env, from: &Address, asset: &Address, amount: u64) -> Tokens {
    if amount > 0 {
        let client = token::Client::new(env, asset);
        client.transfer(from, &env.current_contract_address(), &i128::from(amount));
    }
    Tokens {
        asset: asset.clone(),
        amount,
    }
}

/// Send custody-held units to `to`
pub fn pay(env: &Env, to: &Address, tokens: Tokens) {
    let (asset, amount) = tokens.into_parts();
    if amount > 0 {
        let client = token::Client::new(env, &asset);
        client.transfer(&env.current_contract_address(), to, &i128::from(amount));
    }
}
