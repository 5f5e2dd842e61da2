//! # Yield Distributor
//!
//! Reward policy queried by the staking pool once per closed epoch. Each
//! call mints `governance_supply * rate / 1_000_000` new governance tokens
//! into the pool, never more than the treasury's excess reserves.

#![no_std]

mod events;
pub mod interfaces;

use interfaces::RewardTreasuryClient;
use reserve_errors::ContractError;
use soroban_sdk::{contract, contractimpl, contracttype, Address, Env};

const BUMP_THRESHOLD: u32 = 17_280;
const BUMP_TARGET: u32 = 518_400;

/// Rates are expressed in millionths of the governance supply.
pub const RATE_DENOMINATOR: i128 = 1_000_000;

/// 10% per epoch.
pub const MAX_RATE: u32 = 100_000;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Treasury,
    Staking,
    Rate,
}

#[contract]
pub struct YieldDistributor;

fn bump_instance(e: &Env) {
    e.storage().instance().extend_ttl(BUMP_THRESHOLD, BUMP_TARGET);
}

fn load_address(e: &Env, key: &DataKey) -> Result<Address, ContractError> {
    e.storage()
        .instance()
        .get(key)
        .ok_or(ContractError::NotInitialized)
}

fn load_rate(e: &Env) -> Result<u32, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::Rate)
        .ok_or(ContractError::NotInitialized)
}

fn validate_rate(rate: u32) -> Result<(), ContractError> {
    if rate > MAX_RATE {
        return Err(ContractError::InvalidParameter);
    }
    Ok(())
}

/// Reward for one epoch, capped at `excess`.
pub fn reward_for(supply: i128, rate: u32, excess: i128) -> Result<i128, ContractError> {
    let requested = supply
        .checked_mul(rate as i128)
        .ok_or(ContractError::Overflow)?
        / RATE_DENOMINATOR;
    Ok(requested.min(excess).max(0))
}

fn requested_and_reward(e: &Env) -> Result<(i128, i128), ContractError> {
    let treasury = RewardTreasuryClient::new(e, &load_address(e, &DataKey::Treasury)?);
    let rate = load_rate(e)?;
    let supply = treasury.governance_supply();
    let requested = reward_for(supply, rate, i128::MAX)?;
    let reward = reward_for(supply, rate, treasury.excess_reserves())?;
    Ok((requested, reward))
}

#[contractimpl]
impl YieldDistributor {
    pub fn initialize(
        e: Env,
        admin: Address,
        treasury: Address,
        staking: Address,
        rate: u32,
    ) -> Result<(), ContractError> {
        if e.storage().instance().has(&DataKey::Admin) {
            return Err(ContractError::AlreadyInitialized);
        }
        validate_rate(rate)?;
        admin.require_auth();

        let storage = e.storage().instance();
        storage.set(&DataKey::Admin, &admin);
        storage.set(&DataKey::Treasury, &treasury);
        storage.set(&DataKey::Staking, &staking);
        storage.set(&DataKey::Rate, &rate);
        bump_instance(&e);
        Ok(())
    }

    /// Mint this epoch's reward into the staking pool. Staking pool only.
    /// Returns the amount minted.
    pub fn distribute(e: Env) -> Result<i128, ContractError> {
        let staking = load_address(&e, &DataKey::Staking)?;
        staking.require_auth();

        let (requested, reward) = requested_and_reward(&e)?;
        if reward > 0 {
            let treasury = RewardTreasuryClient::new(&e, &load_address(&e, &DataKey::Treasury)?);
            treasury.mint_rewards(&e.current_contract_address(), &staking, &reward);
        }
        bump_instance(&e);

        events::emit_distributed(&e, &staking, reward, requested);
        Ok(reward)
    }

    pub fn set_rate(e: Env, admin: Address, rate: u32) -> Result<(), ContractError> {
        if load_address(&e, &DataKey::Admin)? != admin {
            return Err(ContractError::NotAdmin);
        }
        admin.require_auth();
        validate_rate(rate)?;

        let old = load_rate(&e)?;
        e.storage().instance().set(&DataKey::Rate, &rate);
        bump_instance(&e);
        events::emit_rate_changed(&e, &admin, old, rate);
        Ok(())
    }

    /// What `distribute` would mint right now.
    pub fn next_reward(e: Env) -> Result<i128, ContractError> {
        Ok(requested_and_reward(&e)?.1)
    }

    pub fn rate(e: Env) -> Result<u32, ContractError> {
        load_rate(&e)
    }

    pub fn staking(e: Env) -> Result<Address, ContractError> {
        load_address(&e, &DataKey::Staking)
    }

    pub fn treasury(e: Env) -> Result<Address, ContractError> {
        load_address(&e, &DataKey::Treasury)
    }
}
