#![cfg(test)]

use crate::test_helpers::{
    advance_blocks, assert_close, funded_staker, install_policy, setup, StakingFixture,
    EPOCH_LENGTH, ONE,
};
use crate::WarmupClaim;
use reserve_errors::ContractError;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, Env};

const WARMUP: u32 = 2;

fn setup_with_warmup(e: &Env) -> StakingFixture<'_> {
    let f = setup(e);
    f.client.set_warmup_period(&f.admin, &WARMUP);
    f
}

fn close_epochs(e: &Env, f: &StakingFixture, n: u32) {
    for _ in 0..n {
        advance_blocks(e, EPOCH_LENGTH);
        assert!(f.client.rebase());
    }
}

// ═══ 1. Entering warmup ═══

#[test]
fn test_stake_parks_tokens_in_warmup() {
    let e = Env::default();
    let f = setup_with_warmup(&e);
    let staker = funded_staker(&e, &f, 10 * ONE);

    f.client.stake(&staker, &(10 * ONE), &staker);

    assert_eq!(
        f.client.warmup_info(&staker),
        Some(WarmupClaim {
            deposit: 10 * ONE,
            gons: f.staked.gons_for_balance(&(10 * ONE)),
            expiry: 1 + WARMUP,
            lock: false,
        })
    );
    assert_eq!(f.staked.balance_of(&staker), 0);
    assert_eq!(f.staked.warmup_balance(), 10 * ONE);
    assert_eq!(f.staked.circulating_supply(), 10 * ONE);
}

#[test]
fn test_restake_accumulates_and_resets_expiry() {
    let e = Env::default();
    let f = setup_with_warmup(&e);
    let staker = funded_staker(&e, &f, 30 * ONE);

    f.client.stake(&staker, &(10 * ONE), &staker);
    close_epochs(&e, &f, 1);
    f.client.stake(&staker, &(20 * ONE), &staker);

    let claim = f.client.warmup_info(&staker).unwrap();
    assert_eq!(claim.deposit, 30 * ONE);
    assert_eq!(claim.expiry, 2 + WARMUP);
    assert_eq!(claim.gons, f.staked.gons_for_balance(&(30 * ONE)));
}

// ═══ 2. Claim ═══

#[test]
fn test_claim_before_expiry_returns_zero() {
    let e = Env::default();
    let f = setup_with_warmup(&e);
    let staker = funded_staker(&e, &f, 10 * ONE);
    f.client.stake(&staker, &(10 * ONE), &staker);
    close_epochs(&e, &f, WARMUP - 1);

    assert_eq!(f.client.claim(&staker), 0);
    assert!(f.client.warmup_info(&staker).is_some());
    assert_eq!(f.staked.balance_of(&staker), 0);
}

#[test]
fn test_claim_at_expiry_releases_stake() {
    let e = Env::default();
    let f = setup_with_warmup(&e);
    let staker = funded_staker(&e, &f, 10 * ONE);
    f.client.stake(&staker, &(10 * ONE), &staker);
    close_epochs(&e, &f, WARMUP);

    assert_eq!(f.client.claim(&staker), 10 * ONE);
    assert_eq!(f.staked.balance_of(&staker), 10 * ONE);
    assert_eq!(f.staked.warmup_balance(), 0);
    assert_eq!(f.client.warmup_info(&staker), None);

    // second claim finds nothing
    assert_eq!(f.client.claim(&staker), 0);
}

#[test]
fn test_warmup_earns_rebase_yield() {
    let e = Env::default();
    let f = setup_with_warmup(&e);
    install_policy(&e, &f, 10 * ONE, 100 * ONE);
    let staker = funded_staker(&e, &f, 100 * ONE);
    f.client.stake(&staker, &(100 * ONE), &staker);

    close_epochs(&e, &f, WARMUP);
    assert_close(f.staked.warmup_balance(), 110 * ONE, 1);

    let released = f.client.claim(&staker);
    assert_close(released, 110 * ONE, 1);
    assert_eq!(f.staked.balance_of(&staker), released);
}

#[test]
fn test_claim_without_position_returns_zero() {
    let e = Env::default();
    let f = setup_with_warmup(&e);
    assert_eq!(f.client.claim(&Address::generate(&e)), 0);
}

// ═══ 3. Forfeit ═══

#[test]
fn test_forfeit_returns_original_deposit() {
    let e = Env::default();
    let f = setup_with_warmup(&e);
    let staker = funded_staker(&e, &f, 10 * ONE);
    f.client.stake(&staker, &(10 * ONE), &staker);

    assert_eq!(f.client.forfeit(&staker), 10 * ONE);

    assert_eq!(f.gov_balance(&e, &staker), 10 * ONE);
    assert_eq!(f.client.warmup_info(&staker), None);
    assert_eq!(f.staked.warmup_balance(), 0);
    assert_eq!(f.staked.circulating_supply(), 0);
    assert_eq!(f.client.contract_balance(), 0);
}

#[test]
fn test_forfeit_leaves_growth_with_pool() {
    let e = Env::default();
    let f = setup_with_warmup(&e);
    install_policy(&e, &f, 10 * ONE, 100 * ONE);
    let staker = funded_staker(&e, &f, 100 * ONE);
    f.client.stake(&staker, &(100 * ONE), &staker);
    close_epochs(&e, &f, 2);

    assert_eq!(f.client.forfeit(&staker), 100 * ONE);
    assert_eq!(f.gov_balance(&e, &staker), 100 * ONE);
    assert_eq!(f.client.contract_balance(), 20 * ONE);
}

#[test]
fn test_forfeit_without_claim_rejected() {
    let e = Env::default();
    let f = setup_with_warmup(&e);
    assert_eq!(
        f.client
            .try_forfeit(&Address::generate(&e))
            .unwrap_err(),
        Ok(ContractError::NoWarmupClaim)
    );
}

// ═══ 4. Deposit lock ═══

#[test]
fn test_locked_claim_refuses_new_stakes() {
    let e = Env::default();
    let f = setup_with_warmup(&e);
    let recipient = Address::generate(&e);
    let other = funded_staker(&e, &f, 5 * ONE);

    assert!(f.client.toggle_deposit_lock(&recipient));
    assert_eq!(
        f.client.try_stake(&other, &ONE, &recipient).unwrap_err(),
        Ok(ContractError::DepositsLocked)
    );
    assert_eq!(f.gov_balance(&e, &other), 5 * ONE);

    assert!(!f.client.toggle_deposit_lock(&recipient));
    f.client.stake(&other, &ONE, &recipient);
    assert_eq!(f.client.warmup_info(&recipient).unwrap().deposit, ONE);
}

#[test]
fn test_lock_ignored_without_warmup() {
    let e = Env::default();
    let f = setup(&e);
    let recipient = Address::generate(&e);
    let other = funded_staker(&e, &f, ONE);

    f.client.toggle_deposit_lock(&recipient);
    f.client.stake(&other, &ONE, &recipient);
    assert_eq!(f.staked.balance_of(&recipient), ONE);
}

#[test]
fn test_toggle_deposit_lock_releases_guard() {
    let e = Env::default();
    let f = setup_with_warmup(&e);
    let owner = Address::generate(&e);

    assert!(f.client.toggle_deposit_lock(&owner));
    assert!(!f.client.is_locked());
    assert!(!f.client.toggle_deposit_lock(&owner));
    assert!(!f.client.is_locked());
}
