//! # Bond Depository
//!
//! Sells governance tokens at a discount to the oracle price in exchange for
//! one principal asset. Deposits go straight to the treasury, which mints the
//! payout to this contract; the payout then vests linearly to the depositor
//! over the configured term.
//!
//! ## Deposit checks (in order)
//! 1. `amount > 0`, `max_price > 0`
//! 2. discounted price `<= max_price`
//! 3. `total_debt + payout <= max_debt`
//! 4. `payout >= MIN_PAYOUT`
//! 5. `payout <= mint_allocation * max_payout_bps / 10_000`
//!
//! `total_debt` is the running sum of gross payouts and only grows.
//!
//! ## Storage Layout
//!
//! | Key                     | Tier           |
//! |-------------------------|----------------|
//! | configuration, `Terms`  | `instance()`   |
//! | `DataKey::TotalDebt`    | `instance()`   |
//! | `DataKey::Bond(addr)`   | `persistent()` |
//! | `HistoryKey::*`         | `persistent()` |

#![no_std]

mod events;
pub mod history;
pub mod interfaces;
pub mod pricing;
mod reentrancy;
pub mod terms;
pub mod types;
pub mod vesting;

use interfaces::{OracleClient, StakingClient, TreasuryClient};
use reserve_errors::ContractError;
use soroban_sdk::token::TokenClient;
use soroban_sdk::{contract, contractimpl, Address, Env};
pub use types::{Bond, BondParameter, BondQuote, BondTerms, DataKey, DepositRecord};

const BUMP_THRESHOLD: u32 = 17_280;
const BUMP_TARGET: u32 = 518_400;

/// Smallest gross payout accepted, 0.01 token at 7 decimals.
pub const MIN_PAYOUT: i128 = 100_000;

#[contract]
pub struct BondDepository;

// ─── Storage helpers ──────────────────────────────────────────────────────────

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

fn load_terms(e: &Env) -> Result<BondTerms, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::Terms)
        .ok_or(ContractError::NotInitialized)
}

fn load_total_debt(e: &Env) -> i128 {
    e.storage().instance().get(&DataKey::TotalDebt).unwrap_or(0)
}

fn load_bond(e: &Env, depositor: &Address) -> Option<Bond> {
    let key = DataKey::Bond(depositor.clone());
    let bond = e.storage().persistent().get(&key);
    if bond.is_some() {
        e.storage()
            .persistent()
            .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
    }
    bond
}

fn save_bond(e: &Env, depositor: &Address, bond: &Bond) {
    let key = DataKey::Bond(depositor.clone());
    e.storage().persistent().set(&key, bond);
    e.storage()
        .persistent()
        .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
}

fn treasury(e: &Env) -> Result<TreasuryClient<'_>, ContractError> {
    Ok(TreasuryClient::new(e, &load_address(e, &DataKey::Treasury)?))
}

fn gov_token(e: &Env) -> Result<TokenClient<'_>, ContractError> {
    Ok(TokenClient::new(e, &load_address(e, &DataKey::GovToken)?))
}

// ─── Pricing ──────────────────────────────────────────────────────────────────

/// Base units in one whole governance token.
fn one_token(e: &Env) -> Result<i128, ContractError> {
    10i128
        .checked_pow(gov_token(e)?.decimals())
        .ok_or(ContractError::Overflow)
}

/// Oracle price less the discount. Refreshes the oracle if due.
fn current_price(e: &Env, terms: &BondTerms) -> Result<(i128, i128), ContractError> {
    let oracle = OracleClient::new(e, &load_address(e, &DataKey::Oracle)?);
    let oracle_price = oracle.consult(&one_token(e)?);
    let discounted = pricing::discounted_price(oracle_price, terms.discount_bps)?;
    Ok((oracle_price, discounted))
}

fn quote_principal(e: &Env, terms: &BondTerms, amount: i128) -> Result<BondQuote, ContractError> {
    let principal = load_address(e, &DataKey::Principal)?;
    let value = treasury(e)?.value_of(&principal, &amount);
    let (oracle_price, discounted_price) = current_price(e, terms)?;
    let payout = pricing::payout_for(value, discounted_price, one_token(e)?)?;
    Ok(BondQuote {
        value,
        oracle_price,
        discounted_price,
        payout,
    })
}

/// Largest payout a single deposit may take right now.
fn max_payout_for(e: &Env, terms: &BondTerms) -> Result<i128, ContractError> {
    let allocation = treasury(e)?.mint_allocation(&e.current_contract_address());
    pricing::bps_of(allocation, terms.max_payout_bps)
}

// ─── Payout delivery ──────────────────────────────────────────────────────────

fn deliver(e: &Env, recipient: &Address, amount: i128, stake: bool) -> Result<(), ContractError> {
    let this = e.current_contract_address();
    let gov = gov_token(e)?;
    if stake {
        let staking: Address = e
            .storage()
            .instance()
            .get(&DataKey::Staking)
            .ok_or(ContractError::StakingNotSet)?;
        gov.approve(&this, &staking, &amount, &e.ledger().sequence());
        StakingClient::new(e, &staking).stake(&this, &amount, recipient);
    } else {
        gov.transfer(&this, recipient, &amount);
    }
    Ok(())
}

#[contractimpl]
impl BondDepository {
    // ─── Setup ────────────────────────────────────────────────────────────────

    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        e: Env,
        admin: Address,
        principal: Address,
        treasury: Address,
        oracle: Address,
        gov_token: Address,
        fee_recipient: Address,
        terms: BondTerms,
    ) -> Result<(), ContractError> {
        if e.storage().instance().has(&DataKey::Admin) {
            return Err(ContractError::AlreadyInitialized);
        }
        terms::validate(&terms)?;
        admin.require_auth();

        let storage = e.storage().instance();
        storage.set(&DataKey::Admin, &admin);
        storage.set(&DataKey::Principal, &principal);
        storage.set(&DataKey::Treasury, &treasury);
        storage.set(&DataKey::Oracle, &oracle);
        storage.set(&DataKey::GovToken, &gov_token);
        storage.set(&DataKey::FeeRecipient, &fee_recipient);
        storage.set(&DataKey::Terms, &terms);
        storage.set(&DataKey::TotalDebt, &0i128);
        bump_instance(&e);
        Ok(())
    }

    // ─── Bonding ──────────────────────────────────────────────────────────────

    /// Price a deposit of `amount` of `asset` without executing it.
    pub fn quote(e: Env, asset: Address, amount: i128) -> Result<BondQuote, ContractError> {
        if asset != load_address(&e, &DataKey::Principal)? {
            return Err(ContractError::UnsupportedAsset);
        }
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        quote_principal(&e, &load_terms(&e)?, amount)
    }

    /// Bond `amount` of principal. `depositor` must have approved this
    /// contract. Fails with `SlippageExceeded` if the discounted price is
    /// above `max_price`.
    ///
    /// Adding to an open bond accumulates the payout and restarts vesting
    /// over the full term. Returns the net payout added.
    pub fn deposit(e: Env, depositor: Address, amount: i128, max_price: i128) -> Result<i128, ContractError> {
        depositor.require_auth();
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        if max_price <= 0 {
            return Err(ContractError::InvalidPrice);
        }
        bump_instance(&e);

        reentrancy::guarded(&e, || {
            let terms = load_terms(&e)?;
            let quote = quote_principal(&e, &terms, amount)?;
            if quote.discounted_price > max_price {
                return Err(ContractError::SlippageExceeded);
            }

            let total_debt = load_total_debt(&e)
                .checked_add(quote.payout)
                .ok_or(ContractError::Overflow)?;
            if total_debt > terms.max_debt {
                return Err(ContractError::BondSoldOut);
            }
            if quote.payout < MIN_PAYOUT {
                return Err(ContractError::BondTooSmall);
            }
            if quote.payout > max_payout_for(&e, &terms)? {
                return Err(ContractError::BondTooLarge);
            }
            let (fee, net) = pricing::split_fee(quote.payout, terms.fee_bps)?;

            // principal passes through to the treasury, which mints the payout here
            let this = e.current_contract_address();
            let principal = load_address(&e, &DataKey::Principal)?;
            let treasury_addr = load_address(&e, &DataKey::Treasury)?;
            let principal_token = TokenClient::new(&e, &principal);
            principal_token.transfer_from(&this, &depositor, &this, &amount);
            principal_token.approve(&this, &treasury_addr, &amount, &e.ledger().sequence());
            TreasuryClient::new(&e, &treasury_addr).deposit(&this, &amount, &principal, &quote.payout);

            if fee > 0 {
                let fee_recipient = load_address(&e, &DataKey::FeeRecipient)?;
                gov_token(&e)?.transfer(&this, &fee_recipient, &fee);
            }
            e.storage().instance().set(&DataKey::TotalDebt, &total_debt);

            let now = e.ledger().sequence();
            let bond = match load_bond(&e, &depositor) {
                Some(open) => Bond {
                    amount_bonded: open
                        .amount_bonded
                        .checked_add(amount)
                        .ok_or(ContractError::Overflow)?,
                    payout: open.payout.checked_add(net).ok_or(ContractError::Overflow)?,
                    vesting_remaining: terms.vesting_term,
                    last_update_block: now,
                    price_paid: quote.discounted_price,
                },
                None => Bond {
                    amount_bonded: amount,
                    payout: net,
                    vesting_remaining: terms.vesting_term,
                    last_update_block: now,
                    price_paid: quote.discounted_price,
                },
            };
            save_bond(&e, &depositor, &bond);

            history::append(
                &e,
                &depositor,
                &DepositRecord {
                    amount,
                    value: quote.value,
                    payout: quote.payout,
                    fee,
                    price: quote.discounted_price,
                    block: now,
                    timestamp: e.ledger().timestamp(),
                },
            );

            events::emit_bond_created(
                &e,
                &depositor,
                amount,
                net,
                now.saturating_add(terms.vesting_term),
                quote.discounted_price,
            );
            Ok(net)
        })
    }

    /// Pay out whatever has vested for `recipient`, either as governance
    /// tokens or staked through the staking pool. Returns the amount paid;
    /// zero when nothing has vested yet.
    pub fn redeem(e: Env, recipient: Address, stake: bool) -> Result<i128, ContractError> {
        recipient.require_auth();
        bump_instance(&e);

        reentrancy::guarded(&e, || {
            let bond = load_bond(&e, &recipient).ok_or(ContractError::BondNotFound)?;
            let (paid, left) = vesting::vest(&bond, e.ledger().sequence())?;
            if paid == 0 {
                return Ok(0);
            }

            let remaining = match &left {
                Some(next) => {
                    save_bond(&e, &recipient, next);
                    next.payout
                }
                None => {
                    e.storage()
                        .persistent()
                        .remove(&DataKey::Bond(recipient.clone()));
                    0
                }
            };
            deliver(&e, &recipient, paid, stake)?;

            events::emit_bond_redeemed(&e, &recipient, paid, remaining, stake);
            Ok(paid)
        })
    }

    // ─── Admin ────────────────────────────────────────────────────────────────

    /// Change one bond term. Bounds are listed in [`terms`].
    pub fn set_bond_term(
        e: Env,
        admin: Address,
        parameter: BondParameter,
        value: i128,
    ) -> Result<(), ContractError> {
        require_admin(&e, &admin)?;
        if parameter == BondParameter::MaxDebt && value < load_total_debt(&e) {
            return Err(ContractError::InvalidParameter);
        }
        let mut current = load_terms(&e)?;
        let old = terms::apply(&mut current, parameter, value)?;
        e.storage().instance().set(&DataKey::Terms, &current);
        bump_instance(&e);
        events::emit_parameter_changed(&e, &admin, parameter, old, value);
        Ok(())
    }

    pub fn set_staking(e: Env, admin: Address, staking: Address) -> Result<(), ContractError> {
        require_admin(&e, &admin)?;
        e.storage().instance().set(&DataKey::Staking, &staking);
        bump_instance(&e);
        events::emit_staking_set(&e, &admin, &staking);
        Ok(())
    }

    pub fn set_fee_recipient(e: Env, admin: Address, fee_recipient: Address) -> Result<(), ContractError> {
        require_admin(&e, &admin)?;
        e.storage().instance().set(&DataKey::FeeRecipient, &fee_recipient);
        bump_instance(&e);
        events::emit_fee_recipient_set(&e, &admin, &fee_recipient);
        Ok(())
    }

    // ─── Views ────────────────────────────────────────────────────────────────

    pub fn pending_payout(e: Env, depositor: Address) -> Result<i128, ContractError> {
        match load_bond(&e, &depositor) {
            Some(bond) => vesting::pending(&bond, e.ledger().sequence()),
            None => Ok(0),
        }
    }

    /// Vested share of the open bond in bps, 0 without one.
    pub fn percent_vested(e: Env, depositor: Address) -> u32 {
        load_bond(&e, &depositor)
            .map(|bond| {
                let elapsed = e.ledger().sequence().saturating_sub(bond.last_update_block);
                vesting::percent_vested(elapsed, bond.vesting_remaining)
            })
            .unwrap_or(0)
    }

    pub fn bond_info(e: Env, depositor: Address) -> Option<Bond> {
        load_bond(&e, &depositor)
    }

    /// Current discounted price of one governance token.
    pub fn bond_price(e: Env) -> Result<i128, ContractError> {
        Ok(current_price(&e, &load_terms(&e)?)?.1)
    }

    pub fn max_payout(e: Env) -> Result<i128, ContractError> {
        max_payout_for(&e, &load_terms(&e)?)
    }

    pub fn total_debt(e: Env) -> i128 {
        load_total_debt(&e)
    }

    pub fn terms(e: Env) -> Result<BondTerms, ContractError> {
        load_terms(&e)
    }

    pub fn history_count(e: Env, depositor: Address) -> u32 {
        history::count(&e, &depositor)
    }

    pub fn get_history(e: Env, depositor: Address, index: u32) -> Option<DepositRecord> {
        history::get(&e, &depositor, index)
    }

    pub fn staking(e: Env) -> Option<Address> {
        e.storage().instance().get(&DataKey::Staking)
    }

    pub fn principal(e: Env) -> Result<Address, ContractError> {
        load_address(&e, &DataKey::Principal)
    }

    pub fn is_locked(e: Env) -> bool {
        reentrancy::check_lock(&e)
    }
}

#[cfg(test)]
mod test_helpers;
