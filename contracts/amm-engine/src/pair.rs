use amm_types::{AmmError, TokenPairKey};
use soroban_sdk::xdr::ToXdr;
use soroban_sdk::{Address, Bytes, BytesN, Env};

/// Domain tag mixed into every pool id preimage
const POOL_ID_TAG: &[u8] = b"amm-engine:pool";

/// Canonically order two assets by their XDR-serialized address bytes.
///
/// Returns the ordered key and whether the caller's order was reversed.
pub fn sort_assets(env: &Env, a: &Address, b: &Address) -> Result<(TokenPairKey, bool), AmmError> {
    let a_bytes = a.clone().to_xdr(env);
    let b_bytes = b.clone().to_xdr(env);

    if a_bytes == b_bytes {
        return Err(AmmError::IdenticalAssets);
    }

    let swapped = b_bytes < a_bytes;
    let (x, y) = TokenPairKey::orient(swapped, a.clone(), b.clone());
    Ok((TokenPairKey { x, y }, swapped))
}

/// Pool id for a canonical pair: sha256(tag || xdr(x) || xdr(y)).
///
/// Pure in the pair, so the id of a pool that does not exist yet can be
/// computed and probed directly.
pub fn derive_pool_id(env: &Env, key: &TokenPairKey) -> BytesN<32> {
    let mut preimage = Bytes::from_slice(env, POOL_ID_TAG);
    preimage.append(&key.x.clone().to_xdr(env));
    preimage.append(&key.y.clone().to_xdr(env));
    env.crypto().sha256(&preimage).to_bytes()
}

/// Canonical key, orientation flag and pool id for an unordered pair
pub fn resolve(env: &Env, a: &Address, b: &Address) -> Result<(TokenPairKey, bool, BytesN<32>), AmmError> {
    let (key, swapped) = sort_assets(env, a, b)?;
    let id = derive_pool_id(env, &key);
    Ok((key, swapped, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::testutils::Address as _;
    use soroban_sdk::{Address, Env};

    #[test]
    fn test_sort_is_symmetric() {
        let env = Env::default();
        let a = Address::generate(&env);
        let b = Address::generate(&env);

        let (key_ab, swapped_ab) = sort_assets(&env, &a, &b).unwrap();
        let (key_ba, swapped_ba) = sort_assets(&env, &b, &a).unwrap();

        assert_eq!(key_ab, key_ba);
        assert_ne!(swapped_ab, swapped_ba);
    }

    #[test]
    fn test_sort_orders_by_serialized_bytes() {
        let env = Env::default();
        let a = Address::generate(&env);
        let b = Address::generate(&env);

        let (key, _) = sort_assets(&env, &a, &b).unwrap();
        assert!(key.x.clone().to_xdr(&env) < key.y.clone().to_xdr(&env));
    }

    #[test]
    fn test_sort_identical_fails() {
        let env = Env::default();
        let a = Address::generate(&env);
        assert_eq!(sort_assets(&env, &a, &a), Err(AmmError::IdenticalAssets));
    }

    #[test]
    fn test_pool_id_independent_of_call_order() {
        let env = Env::default();
        let a = Address::generate(&env);
        let b = Address::generate(&env);

        let (_, swapped_ab, id_ab) = resolve(&env, &a, &b).unwrap();
        let (_, swapped_ba, id_ba) = resolve(&env, &b, &a).unwrap();

        assert_eq!(id_ab, id_ba);
        assert_ne!(swapped_ab, swapped_ba);
    }

    #[test]
    fn test_pool_id_distinct_per_pair() {
        let env = Env::default();
        let a = Address::generate(&env);
        let b = Address::generate(&env);
        let c = Address::generate(&env);

        let (_, _, id_ab) = resolve(&env, &a, &b).unwrap();
        let (_, _, id_ac) = resolve(&env, &a, &c).unwrap();
        let (_, _, id_bc) = resolve(&env, &b, &c).unwrap();

        assert_ne!(id_ab, id_ac);
        assert_ne!(id_ab, id_bc);
        assert_ne!(id_ac, id_bc);
    }

    #[test]
    fn test_pool_id_is_deterministic() {
        let env = Env::default();
        let a = Address::generate(&env);
        let b = Address::generate(&env);

        let (key, _) = sort_assets(&env, &a, &b).unwrap();
        assert_eq!(derive_pool_id(&env, &key), derive_pool_id(&env, &key));
    }
}
