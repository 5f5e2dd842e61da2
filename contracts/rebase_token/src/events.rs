use soroban_sdk::{Address, Env, Symbol};

/// Emitted on every rebase, including zero-profit ones.
///
/// # Topics
/// * `Symbol` - "rebase"
/// * `u32` - Epoch number
///
/// # Data
/// * `i128` - Profit distributed
/// * `i128` - New total supply
/// * `i128` - New index
pub fn emit_rebase(e: &Env, epoch: u32, profit: i128, total_supply: i128, index: i128) {
    let topics = (Symbol::new(e, "rebase"), epoch);
    e.events().publish(topics, (profit, total_supply, index));
}

/// Emitted when displayed balance moves between holders.
///
/// # Topics
/// * `Symbol` - "transfer"
/// * `Address` - Sender
/// * `Address` - Receiver
///
/// # Data
/// * `i128` - Displayed amount
pub fn emit_transfer(e: &Env, from: &Address, to: &Address, amount: i128) {
    let topics = (Symbol::new(e, "transfer"), from.clone(), to.clone());
    e.events().publish(topics, amount);
}

pub fn emit_approve(e: &Env, from: &Address, spender: &Address, amount: i128) {
    let topics = (Symbol::new(e, "approve"), from.clone(), spender.clone());
    e.events().publish(topics, amount);
}

/// Emitted when gons enter or leave the warmup bucket.
///
/// # Data
/// * `u128` - Gons moved
/// * `bool` - `true` into warmup, `false` out of it
pub fn emit_warmup_moved(e: &Env, account: &Address, gons: u128, into_warmup: bool) {
    let topics = (Symbol::new(e, "warmup_moved"), account.clone());
    e.events().publish(topics, (gons, into_warmup));
}
