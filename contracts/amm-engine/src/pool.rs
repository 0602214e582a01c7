use crate::custody::Tokens;
use crate::events;
use crate::pair::resolve;
use crate::storage::{get_lp_balance, get_pool, has_pool, set_lp_balance, set_pool};
use amm_math::{check_k, protocol_fee_liquidity};
use amm_types::{fee_in_bounds, AmmError, PoolState, TokenPairKey, Vault, MAX_FEE};
use soroban_sdk::{log, Address, BytesN, Env};

/// A loaded pool. The only handle through which vault balances, reserves
/// and LP supply change.
pub struct Pool {
    key: TokenPairKey,
    state: PoolState,
}

impl Pool {
    /// Create a new pool at its derived id
    pub fn create(
        env: &Env,
        key: TokenPairKey,
        id: BytesN<32>,
        creator: Address,
        swap_fee: u128,
    ) -> Result<Self, AmmError> {
        if has_pool(env, &id) {
            return Err(AmmError::AlreadyInitialized);
        }
        if !fee_in_bounds(swap_fee, MAX_FEE) {
            return Err(AmmError::InvalidFee);
        }

        let mut state = PoolState::new(id, creator, swap_fee, key.x.clone(), key.y.clone());
        state.last_updated = env.ledger().timestamp();
        Ok(Self { key, state })
    }

    /// Load the pool for an unordered pair; also returns whether the
    /// caller's order is the reverse of canonical order
    pub fn open(env: &Env, a: &Address, b: &Address) -> Result<(Self, bool), AmmError> {
        let (key, swapped, id) = resolve(env, a, b)?;
        let state = get_pool(env, &id).ok_or(AmmError::PairNotFound)?;
        Ok((Self { key, state }, swapped))
    }

    /// Write the pool state back under its id and extend its TTL
    pub fn save(&self, env: &Env) {
        set_pool(env, &self.state);
    }

    pub fn id(&self) -> &BytesN<32> {
        &self.state.id
    }

    pub fn key(&self) -> &TokenPairKey {
        &self.key
    }

    pub fn state(&self) -> &PoolState {
        &self.state
    }

    pub fn reserves(&self) -> (u64, u64) {
        (self.state.reserve_x, self.state.reserve_y)
    }

    pub fn swap_fee(&self) -> u128 {
        self.state.swap_fee
    }

    pub fn lp_supply(&self) -> u64 {
        self.state.lp_supply
    }

    pub fn set_swap_fee(&mut self, fee_bps: u128) -> Result<(), AmmError> {
        if !fee_in_bounds(fee_bps, MAX_FEE) {
            return Err(AmmError::InvalidFee);
        }
        self.state.swap_fee = fee_bps;
        Ok(())
    }

    // === Vaults ===

    /// Place custody-held units into the matching vault
    pub fn deposit(&mut self, tokens: Tokens) -> Result<(), AmmError> {
        if *tokens.asset() == self.state.vault_x.asset {
            vault_deposit(&mut self.state.vault_x, tokens)
        } else if *tokens.asset() == self.state.vault_y.asset {
            vault_deposit(&mut self.state.vault_y, tokens)
        } else {
            Err(AmmError::InvalidAmount)
        }
    }

    /// Take `amount` of x out of the vault; fails if the vault holds less
    pub fn withdraw_x(&mut self, amount: u64) -> Result<Tokens, AmmError> {
        vault_withdraw(&mut self.state.vault_x, amount)
    }

    /// Take `amount` of y out of the vault; fails if the vault holds less
    pub fn withdraw_y(&mut self, amount: u64) -> Result<Tokens, AmmError> {
        vault_withdraw(&mut self.state.vault_y, amount)
    }

    pub fn balances(&self) -> (u64, u64) {
        (self.state.vault_x.balance, self.state.vault_y.balance)
    }

    /// Refresh reserves from the vaults. Liquidity events also refresh
    /// `k_last`; swaps leave it alone.
    pub fn sync(&mut self, env: &Env, liquidity_event: bool) {
        self.state.reserve_x = self.state.vault_x.balance;
        self.state.reserve_y = self.state.vault_y.balance;
        self.state.last_updated = env.ledger().timestamp();
        if liquidity_event {
            self.state.k_last = self.state.reserve_x as u128 * self.state.reserve_y as u128;
        }
    }

    // === Invariant ===

    /// K check of the current vault balances against the stored reserves
    pub fn check_k(&self, env: &Env, amount_x_out: u64, amount_y_out: u64) -> Result<(), AmmError> {
        let (balance_x, balance_y) = self.balances();
        let result = check_k(
            env,
            balance_x,
            balance_y,
            self.state.reserve_x,
            self.state.reserve_y,
            amount_x_out,
            amount_y_out,
            self.state.swap_fee,
        );
        if result == Err(AmmError::InvariantViolation) {
            log!(env, "k invariant violated", self.state.id, balance_x, balance_y);
        }
        result
    }

    // === Protocol fee ===

    /// Mint the protocol's cut of invariant growth since the last
    /// liquidity event, against the current reserves and supply
    pub fn mint_fee(&mut self, env: &Env) -> Result<u64, AmmError> {
        let liquidity = protocol_fee_liquidity(
            env,
            self.state.reserve_x,
            self.state.reserve_y,
            self.state.k_last,
            self.state.lp_supply,
        )?;

        if liquidity > 0 {
            self.grow_supply(liquidity)?;
            self.state.fee_amount = self
                .state
                .fee_amount
                .checked_add(liquidity)
                .ok_or(AmmError::Overflow)?;
            events::fee_minted(env, &self.state.id, liquidity);
        }
        Ok(liquidity)
    }

    /// Hand out the owed protocol fee, resetting the accumulator
    pub fn take_fee(&mut self) -> u64 {
        let owed = self.state.fee_amount;
        self.state.fee_amount = 0;
        owed
    }

    // === LP ledger ===

    pub fn lp_balance(&self, env: &Env, owner: &Address) -> u64 {
        get_lp_balance(env, &self.state.id, owner)
    }

    pub fn mint_lp(&mut self, env: &Env, to: &Address, amount: u64) -> Result<(), AmmError> {
        self.grow_supply(amount)?;
        self.credit_lp(env, to, amount)
    }

    /// Assign LP that is already counted in supply (owed protocol fee)
    pub fn credit_lp(&self, env: &Env, to: &Address, amount: u64) -> Result<(), AmmError> {
        let balance = self
            .lp_balance(env, to)
            .checked_add(amount)
            .ok_or(AmmError::Overflow)?;
        set_lp_balance(env, &self.state.id, to, balance);
        Ok(())
    }

    /// Mint LP owned by nobody (locked minimum liquidity)
    pub fn mint_locked(&mut self, amount: u64) -> Result<(), AmmError> {
        self.grow_supply(amount)
    }

    pub fn burn_lp(&mut self, env: &Env, from: &Address, amount: u64) -> Result<(), AmmError> {
        let balance = self
            .lp_balance(env, from)
            .checked_sub(amount)
            .ok_or(AmmError::InsufficientLpBalance)?;
        set_lp_balance(env, &self.state.id, from, balance);
        self.state.lp_supply = self
            .state
            .lp_supply
            .checked_sub(amount)
            .ok_or(AmmError::InsufficientLiquidity)?;
        Ok(())
    }

    pub fn transfer_lp(&self, env: &Env, from: &Address, to: &Address, amount: u64) -> Result<(), AmmError> {
        let from_balance = self
            .lp_balance(env, from)
            .checked_sub(amount)
            .ok_or(AmmError::InsufficientLpBalance)?;
        set_lp_balance(env, &self.state.id, from, from_balance);

        let to_balance = self
            .lp_balance(env, to)
            .checked_add(amount)
            .ok_or(AmmError::Overflow)?;
        set_lp_balance(env, &self.state.id, to, to_balance);
        Ok(())
    }

    fn grow_supply(&mut self, amount: u64) -> Result<(), AmmError> {
        self.state.lp_supply = self
            .state
            .lp_supply
            .checked_add(amount)
            .ok_or(AmmError::Overflow)?;
        Ok(())
    }
}

fn vault_deposit(vault: &mut Vault, tokens: Tokens) -> Result<(), AmmError> {
    let (asset, amount) = tokens.into_parts();
    debug_assert!(asset == vault.asset);
    vault.balance = vault.balance.checked_add(amount).ok_or(AmmError::Overflow)?;
    Ok(())
}

fn vault_withdraw(vault: &mut Vault, amount: u64) -> Result<Tokens, AmmError> {
    vault.balance = vault
        .balance
        .checked_sub(amount)
        .ok_or(AmmError::InsufficientLiquidity)?;
    Ok(Tokens::released(vault.asset.clone(), amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::custody::collect;
    use crate::pair::sort_assets;
    use crate::AmmEngine;
    use amm_types::MINIMUM_LIQUIDITY;
    use soroban_sdk::testutils::Address as _;
    use soroban_sdk::{token, Address, Env};

    struct Setup {
        env: Env,
        contract_id: Address,
        key: TokenPairKey,
        id: BytesN<32>,
        user: Address,
    }

    fn setup() -> Setup {
        let env = Env::default();
        // Transfers are driven from inside the contract frame, not a root call
        env.mock_all_auths_allowing_non_root_auth();

        let contract_id = env.register(AmmEngine, ());
        let issuer = Address::generate(&env);
        let a = env.register_stellar_asset_contract_v2(issuer.clone()).address();
        let b = env.register_stellar_asset_contract_v2(issuer).address();
        let (key, _) = sort_assets(&env, &a, &b).unwrap();
        let id = crate::pair::derive_pool_id(&env, &key);

        let user = Address::generate(&env);
        token::StellarAssetClient::new(&env, &key.x).mint(&user, &1_000_000);
        token::StellarAssetClient::new(&env, &key.y).mint(&user, &1_000_000);

        Setup { env, contract_id, key, id, user }
    }

    #[test]
    fn test_create_rejects_fee_above_max() {
        let s = setup();
        s.env.as_contract(&s.contract_id, || {
            let result = Pool::create(&s.env, s.key.clone(), s.id.clone(), s.user.clone(), MAX_FEE + 1);
            assert!(matches!(result, Err(AmmError::InvalidFee)));
        });
    }

    #[test]
    fn test_create_twice_fails() {
        let s = setup();
        s.env.as_contract(&s.contract_id, || {
            let pool = Pool::create(&s.env, s.key.clone(), s.id.clone(), s.user.clone(), 25).unwrap();
            pool.save(&s.env);

            let again = Pool::create(&s.env, s.key.clone(), s.id.clone(), s.user.clone(), 25);
            assert!(matches!(again, Err(AmmError::AlreadyInitialized)));
        });
    }

    #[test]
    fn test_open_missing_pool() {
        let s = setup();
        s.env.as_contract(&s.contract_id, || {
            let result = Pool::open(&s.env, &s.key.x, &s.key.y);
            assert!(matches!(result, Err(AmmError::PairNotFound)));
        });
    }

    #[test]
    fn test_vaults_and_sync() {
        let s = setup();
        s.env.as_contract(&s.contract_id, || {
            let mut pool = Pool::create(&s.env, s.key.clone(), s.id.clone(), s.user.clone(), 25).unwrap();

            pool.deposit(collect(&s.env, &s.user, &s.key.x, 5_000)).unwrap();
            pool.deposit(collect(&s.env, &s.user, &s.key.y, 10_000)).unwrap();
            assert_eq!(pool.balances(), (5_000, 10_000));
            assert_eq!(pool.reserves(), (0, 0));

            pool.sync(&s.env, false);
            assert_eq!(pool.reserves(), (5_000, 10_000));
            assert_eq!(pool.state().k_last, 0);
            assert!(pool.state().is_synced());

            pool.sync(&s.env, true);
            assert_eq!(pool.state().k_last, 50_000_000);

            let out = pool.withdraw_y(10_001);
            assert!(matches!(out, Err(AmmError::InsufficientLiquidity)));

            let out = pool.withdraw_y(1_000).unwrap();
            assert_eq!(out.amount(), 1_000);
            crate::custody::pay(&s.env, &s.user, out);
            assert_eq!(pool.balances(), (5_000, 9_000));
        });
    }

    #[test]
    fn test_deposit_foreign_asset_rejected() {
        let s = setup();
        let issuer = Address::generate(&s.env);
        let other = s.env.register_stellar_asset_contract_v2(issuer).address();
        token::StellarAssetClient::new(&s.env, &other).mint(&s.user, &100);

        s.env.as_contract(&s.contract_id, || {
            let mut pool = Pool::create(&s.env, s.key.clone(), s.id.clone(), s.user.clone(), 25).unwrap();
            let result = pool.deposit(collect(&s.env, &s.user, &other, 100));
            assert!(matches!(result, Err(AmmError::InvalidAmount)));
        });
    }

    #[test]
    fn test_lp_ledger() {
        let s = setup();
        let other = Address::generate(&s.env);
        s.env.as_contract(&s.contract_id, || {
            let mut pool = Pool::create(&s.env, s.key.clone(), s.id.clone(), s.user.clone(), 25).unwrap();

            pool.mint_locked(MINIMUM_LIQUIDITY).unwrap();
            pool.mint_lp(&s.env, &s.user, 4_000).unwrap();
            assert_eq!(pool.lp_supply(), 5_000);
            assert_eq!(pool.lp_balance(&s.env, &s.user), 4_000);

            pool.transfer_lp(&s.env, &s.user, &other, 1_500).unwrap();
            assert_eq!(pool.lp_balance(&s.env, &s.user), 2_500);
            assert_eq!(pool.lp_balance(&s.env, &other), 1_500);

            let over = pool.burn_lp(&s.env, &other, 1_501);
            assert!(matches!(over, Err(AmmError::InsufficientLpBalance)));

            pool.burn_lp(&s.env, &other, 1_500).unwrap();
            assert_eq!(pool.lp_balance(&s.env, &other), 0);
            assert_eq!(pool.lp_supply(), 3_500);
        });
    }

    #[test]
    fn test_mint_fee_accumulates() {
        let s = setup();
        s.env.as_contract(&s.contract_id, || {
            let mut pool = Pool::create(&s.env, s.key.clone(), s.id.clone(), s.user.clone(), 25).unwrap();
            pool.deposit(collect(&s.env, &s.user, &s.key.x, 10_000)).unwrap();
            pool.deposit(collect(&s.env, &s.user, &s.key.y, 10_000)).unwrap();
            pool.sync(&s.env, true);
            pool.mint_locked(MINIMUM_LIQUIDITY).unwrap();
            pool.mint_lp(&s.env, &s.user, 9_000).unwrap();

            // No growth yet
            assert_eq!(pool.mint_fee(&s.env), Ok(0));

            // Donation doubles one side: root_k 14142 vs 10000
            pool.deposit(collect(&s.env, &s.user, &s.key.x, 10_000)).unwrap();
            pool.sync(&s.env, false);
            let minted = pool.mint_fee(&s.env).unwrap();
            // 10000 * 4142 * 8 / (10000 * 17 + 14142 * 8) = 1170
            assert_eq!(minted, 1_170);
            assert_eq!(pool.state().fee_amount, 1_170);
            assert_eq!(pool.lp_supply(), 11_170);

            assert_eq!(pool.take_fee(), 1_170);
            assert_eq!(pool.state().fee_amount, 0);
        });
    }
}
