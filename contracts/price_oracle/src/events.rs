use soroban_sdk::{Address, Env, Symbol};

/// Emitted once when the oracle is bound to a pool.
///
/// # Topics
/// * `Symbol` - "oracle_init"
/// * `Address` - The liquidity pool
///
/// # Data
/// * `u64` - Averaging window in seconds
/// * `i128` - Seed cumulative price
pub fn emit_oracle_initialized(e: &Env, pool: &Address, window: u64, cumulative: i128) {
    let topics = (Symbol::new(e, "oracle_init"), pool.clone());
    e.events().publish(topics, (window, cumulative));
}

/// Emitted when a full window has elapsed and a new average is stored.
///
/// # Topics
/// * `Symbol` - "price_updated"
///
/// # Data
/// * `i128` - New average price
/// * `u64` - Seconds averaged over
/// * `u64` - Observation timestamp
pub fn emit_price_updated(e: &Env, average: i128, elapsed: u64, timestamp: u64) {
    let topics = (Symbol::new(e, "price_updated"),);
    e.events().publish(topics, (average, elapsed, timestamp));
}

/// Emitted when the admin changes the averaging window.
pub fn emit_window_changed(e: &Env, admin: &Address, old_window: u64, new_window: u64) {
    let topics = (Symbol::new(e, "window_changed"), admin.clone());
    e.events().publish(topics, (old_window, new_window));
}
