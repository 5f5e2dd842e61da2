//! # Epoch Staking
//!
//! Staking pool and epoch scheduler. Holds the governance tokens backing the
//! rebase token and, once per elapsed epoch, rebases it with the profit
//! queued during the previous epoch and asks the yield policy for the next
//! allotment.
//!
//! `rebase` is safe to call by anyone at any time; before `end_block` it does
//! nothing. Stakes can be held in warmup for a configurable number of epochs
//! before the staked tokens are released to the recipient.

#![no_std]

mod events;
pub mod interfaces;
mod reentrancy;
pub mod types;

use interfaces::{RebaseLedgerClient, YieldPolicyClient};
use reserve_errors::ContractError;
use soroban_sdk::token::TokenClient;
use soroban_sdk::{contract, contractimpl, Address, Env};
pub use types::{DataKey, Epoch, WarmupClaim};

const BUMP_THRESHOLD: u32 = 17_280;
const BUMP_TARGET: u32 = 518_400;

#[contract]
pub struct EpochStaking;

// ─── Helpers ──────────────────────────────────────────────────────────────────

fn bump_instance(e: &Env) {
    e.storage().instance().extend_ttl(BUMP_THRESHOLD, BUMP_TARGET);
}

fn load_address(e: &Env, key: &DataKey) -> Result<Address, ContractError> {
    e.storage()
        .instance()
        .get(key)
        .ok_or(ContractError::NotInitialized)
}

fn require_admin(e: &Env, admin: &Address) -> Result<(), ContractError> {
    if load_address(e, &DataKey::Admin)? != *admin {
        return Err(ContractError::NotAdmin);
    }
    admin.require_auth();
    Ok(())
}

fn load_epoch(e: &Env) -> Result<Epoch, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::Epoch)
        .ok_or(ContractError::NotInitialized)
}

fn rebase_ledger(e: &Env) -> Result<RebaseLedgerClient<'_>, ContractError> {
    Ok(RebaseLedgerClient::new(e, &load_address(e, &DataKey::RebaseToken)?))
}

fn gov_token(e: &Env) -> Result<TokenClient<'_>, ContractError> {
    Ok(TokenClient::new(e, &load_address(e, &DataKey::GovToken)?))
}

fn load_warmup_period(e: &Env) -> u32 {
    e.storage().instance().get(&DataKey::WarmupPeriod).unwrap_or(0)
}

fn load_claim(e: &Env, who: &Address) -> Option<WarmupClaim> {
    let key = DataKey::Warmup(who.clone());
    let claim = e.storage().persistent().get(&key);
    if claim.is_some() {
        e.storage()
            .persistent()
            .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
    }
    claim
}

fn save_claim(e: &Env, who: &Address, claim: &WarmupClaim) {
    let key = DataKey::Warmup(who.clone());
    e.storage().persistent().set(&key, claim);
    e.storage()
        .persistent()
        .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
}

fn require_positive(amount: i128) -> Result<(), ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    Ok(())
}

/// Backing above what stakers already hold is next epoch's profit.
pub fn next_distribution(pool_balance: i128, circulating: i128) -> i128 {
    if pool_balance > circulating {
        pool_balance - circulating
    } else {
        0
    }
}

/// Close the current epoch if its end block has been reached. At most one
/// epoch is closed per call.
fn advance_epoch(e: &Env) -> Result<bool, ContractError> {
    let mut epoch = load_epoch(e)?;
    if e.ledger().sequence() < epoch.end_block {
        return Ok(false);
    }

    let ledger = rebase_ledger(e)?;
    let rebased = epoch.distribute;
    ledger.rebase(&rebased, &epoch.number);

    epoch.end_block = epoch
        .end_block
        .checked_add(epoch.length)
        .ok_or(ContractError::Overflow)?;
    epoch.number = epoch.number.checked_add(1).ok_or(ContractError::Overflow)?;

    if let Some(distributor) = e
        .storage()
        .instance()
        .get::<_, Address>(&DataKey::Distributor)
    {
        YieldPolicyClient::new(e, &distributor).distribute();
    }

    let balance = gov_token(e)?.balance(&e.current_contract_address());
    epoch.distribute = next_distribution(balance, ledger.circulating_supply());
    e.storage().instance().set(&DataKey::Epoch, &epoch);

    events::emit_epoch_advanced(e, epoch.number, epoch.end_block, rebased, epoch.distribute);
    Ok(true)
}

#[contractimpl]
impl EpochStaking {
    pub fn initialize(
        e: Env,
        admin: Address,
        gov_token: Address,
        rebase_token: Address,
        epoch_length: u32,
        first_epoch_number: u32,
        first_epoch_block: u32,
    ) -> Result<(), ContractError> {
        if e.storage().instance().has(&DataKey::Admin) {
            return Err(ContractError::AlreadyInitialized);
        }
        if epoch_length == 0 {
            return Err(ContractError::InvalidParameter);
        }
        admin.require_auth();

        let storage = e.storage().instance();
        storage.set(&DataKey::Admin, &admin);
        storage.set(&DataKey::GovToken, &gov_token);
        storage.set(&DataKey::RebaseToken, &rebase_token);
        storage.set(
            &DataKey::Epoch,
            &Epoch {
                length: epoch_length,
                number: first_epoch_number,
                end_block: first_epoch_block,
                distribute: 0,
            },
        );
        bump_instance(&e);
        Ok(())
    }

    /// Close the epoch if due. Returns whether a rebase ran.
    pub fn rebase(e: Env) -> Result<bool, ContractError> {
        bump_instance(&e);
        reentrancy::guarded(&e, || advance_epoch(&e))
    }

    /// Stake `amount` governance tokens from `from` for `recipient`.
    ///
    /// With a warmup period the staked tokens are parked in a claim that
    /// matures after the period; otherwise they go straight to `recipient`.
    pub fn stake(e: Env, from: Address, amount: i128, recipient: Address) -> Result<i128, ContractError> {
        from.require_auth();
        require_positive(amount)?;
        bump_instance(&e);

        reentrancy::guarded(&e, || {
            advance_epoch(&e)?;

            let period = load_warmup_period(&e);
            let mut claim = load_claim(&e, &recipient).unwrap_or_else(WarmupClaim::empty);
            if period > 0 && claim.lock {
                return Err(ContractError::DepositsLocked);
            }

            let this = e.current_contract_address();
            gov_token(&e)?.transfer_from(&this, &from, &this, &amount);

            let ledger = rebase_ledger(&e)?;
            if period == 0 {
                ledger.transfer(&this, &recipient, &amount);
            } else {
                let gons = ledger.move_to_warmup(&amount);
                claim.deposit = claim
                    .deposit
                    .checked_add(amount)
                    .ok_or(ContractError::Overflow)?;
                claim.gons = claim.gons.checked_add(gons).ok_or(ContractError::Overflow)?;
                claim.expiry = load_epoch(&e)?
                    .number
                    .checked_add(period)
                    .ok_or(ContractError::Overflow)?;
                save_claim(&e, &recipient, &claim);
            }

            events::emit_staked(&e, &recipient, &from, amount, period > 0);
            Ok(amount)
        })
    }

    /// Release a matured warmup claim to `recipient`. Returns the displayed
    /// amount released, or 0 if nothing has matured.
    pub fn claim(e: Env, recipient: Address) -> Result<i128, ContractError> {
        bump_instance(&e);
        reentrancy::guarded(&e, || {
            let claim = match load_claim(&e, &recipient) {
                Some(c) if c.gons > 0 => c,
                _ => return Ok(0),
            };
            if load_epoch(&e)?.number < claim.expiry {
                return Ok(0);
            }

            e.storage()
                .persistent()
                .remove(&DataKey::Warmup(recipient.clone()));
            let amount = rebase_ledger(&e)?.release_warmup(&recipient, &claim.gons);

            events::emit_warmup_claimed(&e, &recipient, amount);
            Ok(amount)
        })
    }

    /// Abandon a warmup claim and take back the original deposit. Growth
    /// accrued during warmup stays with the pool.
    pub fn forfeit(e: Env, depositor: Address) -> Result<i128, ContractError> {
        depositor.require_auth();
        bump_instance(&e);
        reentrancy::guarded(&e, || {
            let claim = match load_claim(&e, &depositor) {
                Some(c) if c.gons > 0 => c,
                _ => return Err(ContractError::NoWarmupClaim),
            };
            e.storage()
                .persistent()
                .remove(&DataKey::Warmup(depositor.clone()));

            rebase_ledger(&e)?.return_warmup(&claim.gons);
            let this = e.current_contract_address();
            gov_token(&e)?.transfer(&this, &depositor, &claim.deposit);

            events::emit_warmup_forfeited(&e, &depositor, claim.deposit);
            Ok(claim.deposit)
        })
    }

    /// Flip whether others may stake into `depositor`'s warmup claim.
    pub fn toggle_deposit_lock(e: Env, depositor: Address) -> Result<bool, ContractError> {
        depositor.require_auth();
        bump_instance(&e);
        reentrancy::guarded(&e, || {
            let mut claim = load_claim(&e, &depositor).unwrap_or_else(WarmupClaim::empty);
            claim.lock = !claim.lock;
            save_claim(&e, &depositor, &claim);
            events::emit_deposit_lock(&e, &depositor, claim.lock);
            Ok(claim.lock)
        })
    }

    /// Return `amount` staked tokens for governance tokens, optionally
    /// closing a due epoch first. `from` must have approved this pool on the
    /// rebase token.
    pub fn unstake(e: Env, from: Address, amount: i128, trigger: bool) -> Result<i128, ContractError> {
        from.require_auth();
        require_positive(amount)?;
        bump_instance(&e);

        reentrancy::guarded(&e, || {
            if trigger {
                advance_epoch(&e)?;
            }
            let this = e.current_contract_address();
            rebase_ledger(&e)?.transfer_from(&this, &from, &this, &amount);
            gov_token(&e)?.transfer(&this, &from, &amount);

            events::emit_unstaked(&e, &from, amount);
            Ok(amount)
        })
    }

    // ─── Admin ────────────────────────────────────────────────────────────────

    pub fn set_distributor(e: Env, admin: Address, distributor: Address) -> Result<(), ContractError> {
        require_admin(&e, &admin)?;
        reentrancy::guarded(&e, || {
            e.storage().instance().set(&DataKey::Distributor, &distributor);
            bump_instance(&e);
            events::emit_distributor_set(&e, &admin, &distributor);
            Ok(())
        })
    }

    /// Warmup length in epochs. Zero disables warmup.
    pub fn set_warmup_period(e: Env, admin: Address, period: u32) -> Result<(), ContractError> {
        require_admin(&e, &admin)?;
        reentrancy::guarded(&e, || {
            e.storage().instance().set(&DataKey::WarmupPeriod, &period);
            bump_instance(&e);
            events::emit_warmup_period_set(&e, &admin, period);
            Ok(())
        })
    }

    // ─── Views ────────────────────────────────────────────────────────────────

    pub fn epoch(e: Env) -> Result<Epoch, ContractError> {
        load_epoch(&e)
    }

    pub fn index(e: Env) -> Result<i128, ContractError> {
        Ok(rebase_ledger(&e)?.index())
    }

    /// Governance tokens held by the pool.
    pub fn contract_balance(e: Env) -> Result<i128, ContractError> {
        Ok(gov_token(&e)?.balance(&e.current_contract_address()))
    }

    pub fn warmup_info(e: Env, recipient: Address) -> Option<WarmupClaim> {
        load_claim(&e, &recipient)
    }

    pub fn warmup_period(e: Env) -> u32 {
        load_warmup_period(&e)
    }

    pub fn distributor(e: Env) -> Option<Address> {
        e.storage().instance().get(&DataKey::Distributor)
    }

    pub fn is_locked(e: Env) -> bool {
        reentrancy::check_lock(&e)
    }
}

#[cfg(test)]
mod test_helpers;



#[cfg(test)]
mod test_warmup;
