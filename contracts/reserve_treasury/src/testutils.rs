//! Valuation stand-in for pooled-liquidity tests.

#![cfg(any(test, feature = "testutils"))]

use soroban_sdk::{contract, contractimpl, contracttype, Address, Env};

#[contracttype]
#[derive(Clone)]
enum MockKey {
    Price,
}

/// Values every pooled asset at a flat 7-decimal price per unit.
#[contract]
pub struct MockValuation;

#[contractimpl]
impl MockValuation {
    pub fn set_price(e: Env, price: i128) {
        e.storage().instance().set(&MockKey::Price, &price);
    }

    pub fn valuation(e: Env, _pooled_asset: Address, amount: i128) -> i128 {
        let price: i128 = e.storage().instance().get(&MockKey::Price).unwrap_or(10_000_000);
        amount * price / 10_000_000
    }
}
