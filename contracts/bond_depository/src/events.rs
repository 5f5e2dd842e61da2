use crate::types::BondParameter;
use soroban_sdk::{Address, Env, Symbol};

/// Emitted on every successful deposit.
///
/// # Topics
/// * `Symbol` - "bond_created"
/// * `Address` - Depositor
///
/// # Data
/// * `i128` - Principal deposited
/// * `i128` - Net payout added to the bond
/// * `u32` - Block at which the bond fully vests
/// * `i128` - Discounted price paid
pub fn emit_bond_created(
    e: &Env,
    depositor: &Address,
    amount: i128,
    payout: i128,
    expires: u32,
    price: i128,
) {
    let topics = (Symbol::new(e, "bond_created"), depositor.clone());
    e.events().publish(topics, (amount, payout, expires, price));
}

/// # Data
/// * `i128` - Amount paid out
/// * `i128` - Payout still vesting
/// * `bool` - Whether the payout was staked
pub fn emit_bond_redeemed(e: &Env, recipient: &Address, paid: i128, remaining: i128, staked: bool) {
    let topics = (Symbol::new(e, "bond_redeemed"), recipient.clone());
    e.events().publish(topics, (paid, remaining, staked));
}

pub fn emit_parameter_changed(e: &Env, admin: &Address, parameter: BondParameter, old: i128, new: i128) {
    let topics = (Symbol::new(e, "parameter_changed"), admin.clone());
    e.events().publish(topics, (parameter, old, new));
}

pub fn emit_staking_set(e: &Env, admin: &Address, staking: &Address) {
    let topics = (Symbol::new(e, "staking_set"), admin.clone());
    e.events().publish(topics, staking.clone());
}

pub fn emit_fee_recipient_set(e: &Env, admin: &Address, fee_recipient: &Address) {
    let topics = (Symbol::new(e, "fee_recipient_set"), admin.clone());
    e.events().publish(topics, fee_recipient.clone());
}
