use soroban_sdk::{Address, Env, Symbol};

/// Emitted when rewards are minted to the staking pool.
///
/// # Topics
/// * `Symbol` - "distributed"
/// * `Address` - Staking pool
///
/// # Data
/// * `i128` - Amount minted
/// * `i128` - Uncapped amount the rate asked for
pub fn emit_distributed(e: &Env, staking: &Address, amount: i128, requested: i128) {
    let topics = (Symbol::new(e, "distributed"), staking.clone());
    e.events().publish(topics, (amount, requested));
}

pub fn emit_rate_changed(e: &Env, admin: &Address, old_rate: u32, new_rate: u32) {
    let topics = (Symbol::new(e, "rate_changed"), admin.clone());
    e.events().publish(topics, (old_rate, new_rate));
}
