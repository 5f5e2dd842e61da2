use soroban_sdk::{Address, Env, Symbol};

/// Emitted when tokens are staked.
///
/// # Topics
/// * `Symbol` - "staked"
/// * `Address` - Recipient of the staked tokens
///
/// # Data
/// * `Address` - Account the governance tokens came from
/// * `i128` - Amount staked
/// * `bool` - Whether the stake entered warmup
pub fn emit_staked(e: &Env, recipient: &Address, from: &Address, amount: i128, warmup: bool) {
    let topics = (Symbol::new(e, "staked"), recipient.clone());
    e.events().publish(topics, (from.clone(), amount, warmup));
}

pub fn emit_unstaked(e: &Env, from: &Address, amount: i128) {
    let topics = (Symbol::new(e, "unstaked"), from.clone());
    e.events().publish(topics, amount);
}

/// Emitted when an epoch closes.
///
/// # Topics
/// * `Symbol` - "epoch_advanced"
/// * `u32` - New epoch number
///
/// # Data
/// * `u32` - New end block
/// * `i128` - Profit passed to the rebase that just ran
/// * `i128` - Profit queued for the next rebase
pub fn emit_epoch_advanced(e: &Env, number: u32, end_block: u32, rebased: i128, next: i128) {
    let topics = (Symbol::new(e, "epoch_advanced"), number);
    e.events().publish(topics, (end_block, rebased, next));
}

pub fn emit_warmup_claimed(e: &Env, recipient: &Address, amount: i128) {
    let topics = (Symbol::new(e, "warmup_claimed"), recipient.clone());
    e.events().publish(topics, amount);
}

pub fn emit_warmup_forfeited(e: &Env, depositor: &Address, deposit: i128) {
    let topics = (Symbol::new(e, "warmup_forfeited"), depositor.clone());
    e.events().publish(topics, deposit);
}

pub fn emit_deposit_lock(e: &Env, depositor: &Address, locked: bool) {
    let topics = (Symbol::new(e, "deposit_lock"), depositor.clone());
    e.events().publish(topics, locked);
}

pub fn emit_distributor_set(e: &Env, admin: &Address, distributor: &Address) {
    let topics = (Symbol::new(e, "distributor_set"), admin.clone());
    e.events().publish(topics, distributor.clone());
}

pub fn emit_warmup_period_set(e: &Env, admin: &Address, period: u32) {
    let topics = (Symbol::new(e, "warmup_period_set"), admin.clone());
    e.events().publish(topics, period);
}
