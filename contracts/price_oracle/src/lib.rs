//! # Price Oracle
//!
//! Time-weighted average price of the governance token against the reference
//! asset, read from a pool's cumulative price accumulator.
//!
//! A new average is only computed once a full averaging window has elapsed
//! since the stored observation. Inside the window `update` is a no-op, so it
//! can be called by anyone, any number of times.
//!
//! ## Storage Layout
//!
//! | Key                     | Tier         |
//! |-------------------------|--------------|
//! | `DataKey::Admin`        | `instance()` |
//! | `DataKey::Pool`         | `instance()` |
//! | `DataKey::Window`       | `instance()` |
//! | `DataKey::Observation`  | `instance()` |

#![no_std]

mod events;
pub mod pool;
pub mod testutils;
pub mod twap;

use pool::LiquidityPoolClient;
use reserve_errors::ContractError;
use soroban_sdk::{contract, contractimpl, contracttype, Address, Env};

/// Fixed-point scale of every price this oracle reports (7 decimals).
pub const PRICE_PRECISION: i128 = 10_000_000;

// ─── TTL constants ────────────────────────────────────────────────────────────

const BUMP_THRESHOLD: u32 = 17_280;
const BUMP_TARGET: u32 = 518_400;

// ─── Storage ──────────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Pool,
    Window,
    Observation,
}

/// Last accumulator reading and the average derived from it.
///
/// `average` is zero until the first full window has elapsed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Observation {
    pub price_cumulative: i128,
    pub timestamp: u64,
    pub average: i128,
}

#[contract]
pub struct PriceOracle;

fn bump_instance(e: &Env) {
    e.storage().instance().extend_ttl(BUMP_THRESHOLD, BUMP_TARGET);
}

fn require_admin(e: &Env, admin: &Address) -> Result<(), ContractError> {
    let stored: Address = e
        .storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(ContractError::NotInitialized)?;
    if stored != *admin {
        return Err(ContractError::NotAdmin);
    }
    admin.require_auth();
    Ok(())
}

fn load_observation(e: &Env) -> Result<Observation, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::Observation)
        .ok_or(ContractError::NotInitialized)
}

fn load_window(e: &Env) -> Result<u64, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::Window)
        .ok_or(ContractError::NotInitialized)
}

fn read_cumulative(e: &Env, pool: &Address, now: u64) -> Result<i128, ContractError> {
    let snapshot = LiquidityPoolClient::new(e, pool).price_cumulative();
    twap::cumulative_at(&snapshot, now)
}

/// Recompute the average if a full window has elapsed. Returns whether a new
/// observation was stored.
fn refresh(e: &Env) -> Result<bool, ContractError> {
    let last = load_observation(e)?;
    let window = load_window(e)?;
    let now = e.ledger().timestamp();
    let elapsed = now.saturating_sub(last.timestamp);
    if elapsed < window {
        return Ok(false);
    }

    let pool: Address = e
        .storage()
        .instance()
        .get(&DataKey::Pool)
        .ok_or(ContractError::NotInitialized)?;
    let cumulative = read_cumulative(e, &pool, now)?;
    let average = twap::average(last.price_cumulative, cumulative, elapsed)?;

    e.storage().instance().set(
        &DataKey::Observation,
        &Observation {
            price_cumulative: cumulative,
            timestamp: now,
            average,
        },
    );
    events::emit_price_updated(e, average, elapsed, now);
    Ok(true)
}

#[contractimpl]
impl PriceOracle {
    /// Bind the oracle to `pool` and seed the first observation.
    pub fn initialize(e: Env, admin: Address, pool: Address, window: u64) -> Result<(), ContractError> {
        if e.storage().instance().has(&DataKey::Admin) {
            return Err(ContractError::AlreadyInitialized);
        }
        if window == 0 {
            return Err(ContractError::InvalidParameter);
        }
        admin.require_auth();

        let now = e.ledger().timestamp();
        let cumulative = read_cumulative(&e, &pool, now)?;

        let storage = e.storage().instance();
        storage.set(&DataKey::Admin, &admin);
        storage.set(&DataKey::Pool, &pool);
        storage.set(&DataKey::Window, &window);
        storage.set(
            &DataKey::Observation,
            &Observation {
                price_cumulative: cumulative,
                timestamp: now,
                average: 0,
            },
        );
        bump_instance(&e);

        events::emit_oracle_initialized(&e, &pool, window, cumulative);
        Ok(())
    }

    /// Store a new average if the window has elapsed; otherwise do nothing.
    pub fn update(e: Env) -> Result<bool, ContractError> {
        bump_instance(&e);
        refresh(&e)
    }

    /// Value of `amount` governance base units in reference base units.
    ///
    /// Refreshes the observation first when a window has elapsed. Returns 0
    /// before the first average exists; callers must treat that as an
    /// invalid price.
    pub fn consult(e: Env, amount: i128) -> Result<i128, ContractError> {
        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }
        bump_instance(&e);
        refresh(&e)?;
        let observation = load_observation(&e)?;
        twap::scale(amount, observation.average)
    }

    pub fn set_window(e: Env, admin: Address, window: u64) -> Result<(), ContractError> {
        require_admin(&e, &admin)?;
        if window == 0 {
            return Err(ContractError::InvalidParameter);
        }
        let old = load_window(&e)?;
        e.storage().instance().set(&DataKey::Window, &window);
        bump_instance(&e);
        events::emit_window_changed(&e, &admin, old, window);
        Ok(())
    }

    pub fn observation(e: Env) -> Result<Observation, ContractError> {
        load_observation(&e)
    }

    pub fn window(e: Env) -> Result<u64, ContractError> {
        load_window(&e)
    }

    pub fn pool(e: Env) -> Result<Address, ContractError> {
        e.storage()
            .instance()
            .get(&DataKey::Pool)
            .ok_or(ContractError::NotInitialized)
    }
}

#[cfg(test)]
mod test_oracle;
