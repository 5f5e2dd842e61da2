//! Shared test helpers for epoch_staking tests.

#![cfg(test)]

use crate::{EpochStaking, EpochStakingClient};
use rebase_token::{RebaseToken, RebaseTokenClient};
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{contract, contractimpl, contracttype, Address, Env};

pub const ONE: i128 = 10_000_000;
pub const INITIAL_SUPPLY: i128 = 5_000_000 * ONE;
pub const EPOCH_LENGTH: u32 = 2_200;
pub const START_BLOCK: u32 = 1_000;

// ─── Mock yield policy ────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone)]
enum MockKey {
    Gov,
    Recipient,
    Amount,
}

/// Pays a fixed amount of governance tokens from its own balance every
/// time it is asked to distribute.
#[contract]
pub struct MockPolicy;

#[contractimpl]
impl MockPolicy {
    pub fn configure(e: Env, gov: Address, recipient: Address, amount: i128) {
        e.storage().instance().set(&MockKey::Gov, &gov);
        e.storage().instance().set(&MockKey::Recipient, &recipient);
        e.storage().instance().set(&MockKey::Amount, &amount);
    }

    pub fn distribute(e: Env) -> i128 {
        let gov: Address = e.storage().instance().get(&MockKey::Gov).unwrap();
        let recipient: Address = e.storage().instance().get(&MockKey::Recipient).unwrap();
        let amount: i128 = e.storage().instance().get(&MockKey::Amount).unwrap();
        TokenClient::new(&e, &gov).transfer(&e.current_contract_address(), &recipient, &amount);
        amount
    }
}

// ─── Fixture ──────────────────────────────────────────────────────────────────

pub struct StakingFixture<'a> {
    pub client: EpochStakingClient<'a>,
    pub staked: RebaseTokenClient<'a>,
    pub admin: Address,
    pub staking: Address,
    pub gov: Address,
}

impl<'a> StakingFixture<'a> {
    pub fn gov_balance(&self, e: &Env, who: &Address) -> i128 {
        TokenClient::new(e, &self.gov).balance(who)
    }
}

pub fn configure_ledger(e: &Env) {
    e.ledger().with_mut(|li| {
        li.sequence_number = START_BLOCK;
        li.timestamp = 1_700_000_000;
        li.min_persistent_entry_ttl = 1_000_000;
        li.min_temp_entry_ttl = 1_000_000;
        li.max_entry_ttl = 6_312_000;
    });
}

pub fn advance_blocks(e: &Env, blocks: u32) {
    e.ledger().with_mut(|li| li.sequence_number += blocks);
}

/// Pool over a fresh rebase token whose first epoch ends one epoch length
/// after the starting block.
pub fn setup(e: &Env) -> StakingFixture<'_> {
    e.mock_all_auths();
    configure_ledger(e);

    let admin = Address::generate(e);
    let gov = e.register_stellar_asset_contract_v2(admin.clone()).address();

    let staking = e.register(EpochStaking, ());
    let client = EpochStakingClient::new(e, &staking);

    let staked = RebaseTokenClient::new(e, &e.register(RebaseToken, ()));
    staked.initialize(&admin, &staking, &INITIAL_SUPPLY);

    client.initialize(
        &admin,
        &gov,
        &staked.address,
        &EPOCH_LENGTH,
        &1,
        &(START_BLOCK + EPOCH_LENGTH),
    );

    StakingFixture {
        client,
        staked,
        admin,
        staking,
        gov,
    }
}

/// New account holding `amount` governance tokens approved to the pool.
pub fn funded_staker(e: &Env, f: &StakingFixture, amount: i128) -> Address {
    let staker = Address::generate(e);
    StellarAssetClient::new(e, &f.gov).mint(&staker, &amount);
    let expiry = e.ledger().sequence() + 100_000;
    TokenClient::new(e, &f.gov).approve(&staker, &f.staking, &amount, &expiry);
    staker
}

/// Register a policy that pays `per_epoch` into the pool from a balance of
/// `budget`.
pub fn install_policy(e: &Env, f: &StakingFixture, per_epoch: i128, budget: i128) -> Address {
    let policy = e.register(MockPolicy, ());
    StellarAssetClient::new(e, &f.gov).mint(&policy, &budget);
    MockPolicyClient::new(e, &policy).configure(&f.gov, &f.staking, &per_epoch);
    f.client.set_distributor(&f.admin, &policy);
    policy
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
