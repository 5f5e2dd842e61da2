//! # Rebase Token
//!
//! Staked governance token whose balances grow every epoch without any
//! transfer. Holders own a fixed number of internal units (gons); the
//! displayed balance is derived from a single global scale that the staking
//! pool shrinks on each rebase.
//!
//! The full initial supply is minted to the staking pool. Everything outside
//! the pool's own balance counts as circulating, including gons parked in the
//! warmup bucket on behalf of pending stakers.
//!
//! ## Storage Layout
//!
//! | Key                         | Tier           |
//! |-----------------------------|----------------|
//! | `DataKey::Admin`            | `instance()`   |
//! | `DataKey::Staking`          | `instance()`   |
//! | `DataKey::Scale`            | `instance()`   |
//! | `DataKey::IndexGons`        | `instance()`   |
//! | `DataKey::WarmupGons`       | `instance()`   |
//! | `DataKey::Gons(addr)`       | `persistent()` |
//! | `DataKey::Allowance(a, b)`  | `persistent()` |

#![no_std]

mod events;
pub mod gons;
pub mod history;

use gons::{UnitScale, INITIAL_INDEX};
use history::{RebaseRecord, PERCENT_PRECISION};
use reserve_errors::ContractError;
use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, String};

const BUMP_THRESHOLD: u32 = 17_280;
const BUMP_TARGET: u32 = 518_400;

pub const DECIMALS: u32 = 7;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Staking,
    Scale,
    IndexGons,
    WarmupGons,
    Gons(Address),
    Allowance(Address, Address),
}

#[contract]
pub struct RebaseToken;

// ─── Storage helpers ──────────────────────────────────────────────────────────

fn bump_instance(e: &Env) {
    e.storage().instance().extend_ttl(BUMP_THRESHOLD, BUMP_TARGET);
}

fn load_scale(e: &Env) -> Result<UnitScale, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::Scale)
        .ok_or(ContractError::NotInitialized)
}

fn load_staking(e: &Env) -> Result<Address, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::Staking)
        .ok_or(ContractError::NotInitialized)
}

/// Authenticate the bound staking pool.
fn require_staking(e: &Env) -> Result<Address, ContractError> {
    let staking = load_staking(e)?;
    staking.require_auth();
    Ok(staking)
}

fn gons_of(e: &Env, id: &Address) -> u128 {
    let key = DataKey::Gons(id.clone());
    let gons = e.storage().persistent().get(&key).unwrap_or(0);
    if gons > 0 {
        e.storage()
            .persistent()
            .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
    }
    gons
}

fn set_gons(e: &Env, id: &Address, gons: u128) {
    let key = DataKey::Gons(id.clone());
    e.storage().persistent().set(&key, &gons);
    e.storage()
        .persistent()
        .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
}

fn warmup_gons(e: &Env) -> u128 {
    e.storage().instance().get(&DataKey::WarmupGons).unwrap_or(0)
}

fn debit(e: &Env, id: &Address, gons: u128) -> Result<(), ContractError> {
    let held = gons_of(e, id);
    let left = held
        .checked_sub(gons)
        .ok_or(ContractError::InsufficientBalance)?;
    set_gons(e, id, left);
    Ok(())
}

fn credit(e: &Env, id: &Address, gons: u128) -> Result<(), ContractError> {
    let held = gons_of(e, id);
    let total = held.checked_add(gons).ok_or(ContractError::Overflow)?;
    set_gons(e, id, total);
    Ok(())
}

fn circulating(e: &Env, scale: &UnitScale, staking: &Address) -> i128 {
    scale.total_supply - scale.to_balance(gons_of(e, staking))
}

fn current_index(e: &Env, scale: &UnitScale) -> i128 {
    let index_gons: u128 = e.storage().instance().get(&DataKey::IndexGons).unwrap_or(0);
    scale.to_balance(index_gons)
}

/// Move a displayed `amount` from `from` to `to`, checking the displayed
/// balance rather than the raw gon count.
fn move_balance(e: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), ContractError> {
    if amount < 0 {
        return Err(ContractError::InvalidAmount);
    }
    let scale = load_scale(e)?;
    if scale.to_balance(gons_of(e, from)) < amount {
        return Err(ContractError::InsufficientBalance);
    }
    let gons = scale.to_gons(amount)?;
    debit(e, from, gons)?;
    credit(e, to, gons)?;
    events::emit_transfer(e, from, to, amount);
    Ok(())
}

fn allowance_of(e: &Env, from: &Address, spender: &Address) -> i128 {
    e.storage()
        .persistent()
        .get(&DataKey::Allowance(from.clone(), spender.clone()))
        .unwrap_or(0)
}

fn set_allowance(e: &Env, from: &Address, spender: &Address, amount: i128) {
    let key = DataKey::Allowance(from.clone(), spender.clone());
    e.storage().persistent().set(&key, &amount);
    e.storage()
        .persistent()
        .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
}

#[contractimpl]
impl RebaseToken {
    /// Mint `initial_supply` (at least one whole token) to `staking`.
    pub fn initialize(e: Env, admin: Address, staking: Address, initial_supply: i128) -> Result<(), ContractError> {
        if e.storage().instance().has(&DataKey::Admin) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();
        let scale = UnitScale::genesis(initial_supply)?;
        let index_gons = scale.to_gons(INITIAL_INDEX)?;

        let storage = e.storage().instance();
        storage.set(&DataKey::Admin, &admin);
        storage.set(&DataKey::Staking, &staking);
        storage.set(&DataKey::IndexGons, &index_gons);
        storage.set(&DataKey::Scale, &scale);
        set_gons(&e, &staking, scale.total_gons);
        bump_instance(&e);
        Ok(())
    }

    // ─── Metadata ─────────────────────────────────────────────────────────────

    pub fn name(e: Env) -> String {
        String::from_str(&e, "Staked Reserve")
    }

    pub fn symbol(e: Env) -> String {
        String::from_str(&e, "sRSV")
    }

    pub fn decimals(_e: Env) -> u32 {
        DECIMALS
    }

    // ─── Supply & balances ────────────────────────────────────────────────────

    pub fn total_supply(e: Env) -> Result<i128, ContractError> {
        Ok(load_scale(&e)?.total_supply)
    }

    pub fn balance_of(e: Env, id: Address) -> Result<i128, ContractError> {
        Ok(load_scale(&e)?.to_balance(gons_of(&e, &id)))
    }

    /// Supply held outside the staking pool.
    pub fn circulating_supply(e: Env) -> Result<i128, ContractError> {
        let scale = load_scale(&e)?;
        Ok(circulating(&e, &scale, &load_staking(&e)?))
    }

    /// Displayed value of one token staked at genesis.
    pub fn index(e: Env) -> Result<i128, ContractError> {
        let scale = load_scale(&e)?;
        Ok(current_index(&e, &scale))
    }

    pub fn gons_for_balance(e: Env, amount: i128) -> Result<u128, ContractError> {
        load_scale(&e)?.to_gons(amount)
    }

    pub fn balance_for_gons(e: Env, gons: u128) -> Result<i128, ContractError> {
        Ok(load_scale(&e)?.to_balance(gons))
    }

    // ─── Rebase ───────────────────────────────────────────────────────────────

    /// Distribute `profit` across circulating holders and log the epoch.
    ///
    /// Staking pool only. A zero profit logs an entry and leaves supply
    /// untouched. Returns the new total supply.
    pub fn rebase(e: Env, profit: i128, epoch: u32) -> Result<i128, ContractError> {
        let staking = require_staking(&e)?;
        if profit < 0 {
            return Err(ContractError::InvalidAmount);
        }
        let mut scale = load_scale(&e)?;
        let staked_before = circulating(&e, &scale, &staking);

        let supply = scale.grow(profit, staked_before)?;
        e.storage().instance().set(&DataKey::Scale, &scale);

        let rebase_percent = if staked_before > 0 {
            profit
                .checked_mul(PERCENT_PRECISION)
                .ok_or(ContractError::Overflow)?
                / staked_before
        } else {
            0
        };
        let index = current_index(&e, &scale);
        history::append(
            &e,
            &RebaseRecord {
                epoch,
                rebase_percent,
                total_staked_before: staked_before,
                total_staked_after: circulating(&e, &scale, &staking),
                amount_rebased: profit,
                index,
                ledger: e.ledger().sequence(),
            },
        );
        bump_instance(&e);

        events::emit_rebase(&e, epoch, profit, supply, index);
        Ok(supply)
    }

    pub fn rebase_count(e: Env) -> u32 {
        history::count(&e)
    }

    pub fn get_rebase(e: Env, index: u32) -> Option<RebaseRecord> {
        history::get(&e, index)
    }

    // ─── Transfers ────────────────────────────────────────────────────────────

    pub fn transfer(e: Env, from: Address, to: Address, amount: i128) -> Result<(), ContractError> {
        from.require_auth();
        move_balance(&e, &from, &to, amount)?;
        bump_instance(&e);
        Ok(())
    }

    pub fn approve(e: Env, from: Address, spender: Address, amount: i128) -> Result<(), ContractError> {
        from.require_auth();
        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }
        set_allowance(&e, &from, &spender, amount);
        events::emit_approve(&e, &from, &spender, amount);
        Ok(())
    }

    pub fn allowance(e: Env, from: Address, spender: Address) -> i128 {
        allowance_of(&e, &from, &spender)
    }

    pub fn transfer_from(
        e: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        spender.require_auth();
        let allowed = allowance_of(&e, &from, &spender);
        if allowed < amount {
            return Err(ContractError::InsufficientAllowance);
        }
        move_balance(&e, &from, &to, amount)?;
        set_allowance(&e, &from, &spender, allowed - amount);
        bump_instance(&e);
        Ok(())
    }

    // ─── Warmup bucket (staking pool only) ────────────────────────────────────

    /// Park `amount` of the pool's balance for a pending staker. Returns the
    /// gons parked, which the caller records against the claim.
    pub fn move_to_warmup(e: Env, amount: i128) -> Result<u128, ContractError> {
        let staking = require_staking(&e)?;
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        let gons = load_scale(&e)?.to_gons(amount)?;
        debit(&e, &staking, gons)?;
        let parked = warmup_gons(&e)
            .checked_add(gons)
            .ok_or(ContractError::Overflow)?;
        e.storage().instance().set(&DataKey::WarmupGons, &parked);
        bump_instance(&e);
        events::emit_warmup_moved(&e, &staking, gons, true);
        Ok(gons)
    }

    /// Hand parked gons to `recipient`. Returns their displayed value.
    pub fn release_warmup(e: Env, recipient: Address, gons: u128) -> Result<i128, ContractError> {
        require_staking(&e)?;
        let left = warmup_gons(&e)
            .checked_sub(gons)
            .ok_or(ContractError::InsufficientWarmup)?;
        e.storage().instance().set(&DataKey::WarmupGons, &left);
        credit(&e, &recipient, gons)?;
        bump_instance(&e);
        events::emit_warmup_moved(&e, &recipient, gons, false);
        Ok(load_scale(&e)?.to_balance(gons))
    }

    /// Return parked gons to the staking pool.
    pub fn return_warmup(e: Env, gons: u128) -> Result<(), ContractError> {
        let staking = require_staking(&e)?;
        let left = warmup_gons(&e)
            .checked_sub(gons)
            .ok_or(ContractError::InsufficientWarmup)?;
        e.storage().instance().set(&DataKey::WarmupGons, &left);
        credit(&e, &staking, gons)?;
        bump_instance(&e);
        events::emit_warmup_moved(&e, &staking, gons, false);
        Ok(())
    }

    pub fn warmup_balance(e: Env) -> Result<i128, ContractError> {
        Ok(load_scale(&e)?.to_balance(warmup_gons(&e)))
    }

    pub fn staking(e: Env) -> Result<Address, ContractError> {
        load_staking(&e)
    }
}

#[cfg(test)]
mod test_helpers;


#[cfg(test)]
mod test_transfer;
