//! Stand-in liquidity pool for tests in this and dependent crates.

#![cfg(any(test, feature = "testutils"))]

use crate::pool::PoolCumulative;
use soroban_sdk::{contract, contractimpl, contracttype, Env};

#[contracttype]
#[derive(Clone)]
enum MockKey {
    State,
}

/// Pool whose spot price is set directly. The accumulator advances with
/// the previous spot price every time the price changes.
#[contract]
pub struct MockLiquidityPool;

fn state(e: &Env) -> PoolCumulative {
    e.storage()
        .instance()
        .get(&MockKey::State)
        .unwrap_or(PoolCumulative {
            price_cumulative: 0,
            spot_price: 0,
            last_update: e.ledger().timestamp(),
        })
}

#[contractimpl]
impl MockLiquidityPool {
    pub fn set_price(e: Env, price: i128) {
        let mut s = state(&e);
        let now = e.ledger().timestamp();
        if now > s.last_update {
            s.price_cumulative += s.spot_price * i128::from(now - s.last_update);
        }
        s.spot_price = price;
        s.last_update = now;
        e.storage().instance().set(&MockKey::State, &s);
    }

    /// Overwrite the accumulator, e.g. to simulate a broken pool.
    pub fn set_snapshot(e: Env, snapshot: PoolCumulative) {
        e.storage().instance().set(&MockKey::State, &snapshot);
    }

    pub fn price_cumulative(e: Env) -> PoolCumulative {
        state(&e)
    }
}
