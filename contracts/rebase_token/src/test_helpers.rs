//! Shared test helpers for rebase_token tests.

#![cfg(test)]

use crate::{RebaseToken, RebaseTokenClient};
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{Address, Env};

pub const ONE: i128 = 10_000_000;
pub const INITIAL_SUPPLY: i128 = 1_000_000 * ONE;

/// Deploy and initialize with the full supply held by a generated staking
/// address. Returns `(client, admin, staking)`.
pub fn setup(e: &Env) -> (RebaseTokenClient<'_>, Address, Address) {
    e.mock_all_auths();
    e.ledger().with_mut(|li| {
        li.sequence_number = 1_000;
        li.min_persistent_entry_ttl = 1_000_000;
        li.max_entry_ttl = 6_312_000;
    });

    let id = e.register(RebaseToken, ());
    let client = RebaseTokenClient::new(e, &id);
    let admin = Address::generate(e);
    let staking = Address::generate(e);
    client.initialize(&admin, &staking, &INITIAL_SUPPLY);
    (client, admin, staking)
}

/// Hand `amount` from the staking pool to a fresh holder.
pub fn fund(e: &Env, client: &RebaseTokenClient, staking: &Address, amount: i128) -> Address {
    let holder = Address::generate(e);
    client.transfer(staking, &holder, &amount);
    holder
}

pub fn assert_close(actual: i128, expected: i128, tolerance: i128) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} within {}, got {}",
        expected,
        tolerance,
        actual
    );
}
