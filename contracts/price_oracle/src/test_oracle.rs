#![cfg(test)]

use crate::pool::PoolCumulative;
use crate::testutils::{MockLiquidityPool, MockLiquidityPoolClient};
use crate::{PriceOracle, PriceOracleClient, PRICE_PRECISION};
use reserve_errors::ContractError;
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{Address, Env};

const WINDOW: u64 = 3_600;
const START: u64 = 1_700_000_000;

fn advance(e: &Env, seconds: u64) {
    e.ledger().with_mut(|li| li.timestamp += seconds);
}

fn setup(e: &Env) -> (PriceOracleClient<'_>, MockLiquidityPoolClient<'_>, Address) {
    e.mock_all_auths();
    e.ledger().with_mut(|li| li.timestamp = START);

    let pool_id = e.register(MockLiquidityPool, ());
    let pool = MockLiquidityPoolClient::new(e, &pool_id);
    pool.set_price(&PRICE_PRECISION);

    let oracle_id = e.register(PriceOracle, ());
    let oracle = PriceOracleClient::new(e, &oracle_id);
    let admin = Address::generate(e);
    oracle.initialize(&admin, &pool_id, &WINDOW);

    (oracle, pool, admin)
}

// ═══ 1. Initialization ═══

#[test]
fn test_initialize_seeds_observation() {
    let e = Env::default();
    let (oracle, _, _) = setup(&e);

    let obs = oracle.observation();
    assert_eq!(obs.timestamp, START);
    assert_eq!(obs.average, 0);
    assert_eq!(oracle.window(), WINDOW);
}

#[test]
fn test_initialize_twice_fails() {
    let e = Env::default();
    let (oracle, _, admin) = setup(&e);
    let pool = oracle.pool();
    assert_eq!(
        oracle.try_initialize(&admin, &pool, &WINDOW).unwrap_err(),
        Ok(ContractError::AlreadyInitialized)
    );
}

#[test]
fn test_initialize_zero_window_fails() {
    let e = Env::default();
    e.mock_all_auths();
    let pool_id = e.register(MockLiquidityPool, ());
    let oracle = PriceOracleClient::new(&e, &e.register(PriceOracle, ()));
    assert_eq!(
        oracle
            .try_initialize(&Address::generate(&e), &pool_id, &0)
            .unwrap_err(),
        Ok(ContractError::InvalidParameter)
    );
}

// ═══ 2. Window behaviour ═══

#[test]
fn test_update_inside_window_is_noop() {
    let e = Env::default();
    let (oracle, _, _) = setup(&e);

    advance(&e, WINDOW - 1);
    assert!(!oracle.update());
    assert_eq!(oracle.observation().timestamp, START);
    assert_eq!(oracle.consult(&(100 * PRICE_PRECISION)), 0);
}

#[test]
fn test_update_after_window_stores_average() {
    let e = Env::default();
    let (oracle, _, _) = setup(&e);

    advance(&e, WINDOW);
    assert!(oracle.update());
    let obs = oracle.observation();
    assert_eq!(obs.average, PRICE_PRECISION);
    assert_eq!(obs.timestamp, START + WINDOW);
    assert_eq!(oracle.consult(&(100 * PRICE_PRECISION)), 100 * PRICE_PRECISION);
}

#[test]
fn test_second_update_in_same_window_keeps_average() {
    let e = Env::default();
    let (oracle, pool, _) = setup(&e);

    advance(&e, WINDOW);
    assert!(oracle.update());
    let first = oracle.consult(&PRICE_PRECISION);

    pool.set_price(&(5 * PRICE_PRECISION));
    advance(&e, 600);
    assert!(!oracle.update());
    assert!(!oracle.update());
    assert_eq!(oracle.consult(&PRICE_PRECISION), first);
    assert_eq!(oracle.observation().average, PRICE_PRECISION);
}

#[test]
fn test_consult_refreshes_lazily() {
    let e = Env::default();
    let (oracle, _, _) = setup(&e);

    advance(&e, WINDOW * 2);
    assert_eq!(oracle.consult(&(3 * PRICE_PRECISION)), 3 * PRICE_PRECISION);
    assert_eq!(oracle.observation().timestamp, START + WINDOW * 2);
}

// ═══ 3. Averaging ═══

#[test]
fn test_average_weights_time() {
    let e = Env::default();
    let (oracle, pool, _) = setup(&e);

    advance(&e, WINDOW / 2);
    pool.set_price(&(3 * PRICE_PRECISION));
    advance(&e, WINDOW / 2);

    assert!(oracle.update());
    assert_eq!(oracle.observation().average, 2 * PRICE_PRECISION);
}

#[test]
fn test_last_second_spike_is_dampened() {
    let e = Env::default();
    let (oracle, pool, _) = setup(&e);

    advance(&e, WINDOW - 1);
    pool.set_price(&(101 * PRICE_PRECISION));
    advance(&e, 1);

    assert!(oracle.update());
    // (3599 * 1.0 + 1 * 101.0) / 3600
    assert_eq!(oracle.observation().average, 10_277_777);
}

#[test]
fn test_unrecorded_seconds_use_spot_price() {
    let e = Env::default();
    let (oracle, pool, _) = setup(&e);

    // pool never touched after the price change; oracle carries spot forward
    pool.set_price(&(2 * PRICE_PRECISION));
    advance(&e, WINDOW);
    assert!(oracle.update());
    assert_eq!(oracle.observation().average, 2 * PRICE_PRECISION);
}

#[test]
fn test_regressed_cumulative_rejected() {
    let e = Env::default();
    let (oracle, pool, _) = setup(&e);

    advance(&e, WINDOW);
    pool.set_snapshot(&PoolCumulative {
        price_cumulative: -1,
        spot_price: 0,
        last_update: START + WINDOW,
    });
    assert_eq!(
        oracle.try_update().unwrap_err(),
        Ok(ContractError::CumulativeRegressed)
    );
}

// ═══ 4. Admin ═══

#[test]
fn test_set_window() {
    let e = Env::default();
    let (oracle, _, admin) = setup(&e);

    oracle.set_window(&admin, &60);
    assert_eq!(oracle.window(), 60);
    assert_eq!(
        oracle.try_set_window(&admin, &0).unwrap_err(),
        Ok(ContractError::InvalidParameter)
    );
}

#[test]
fn test_set_window_non_admin_rejected() {
    let e = Env::default();
    let (oracle, _, _) = setup(&e);
    assert_eq!(
        oracle
            .try_set_window(&Address::generate(&e), &60)
            .unwrap_err(),
        Ok(ContractError::NotAdmin)
    );
}

#[test]
fn test_consult_negative_amount_rejected() {
    let e = Env::default();
    let (oracle, _, _) = setup(&e);
    assert_eq!(
        oracle.try_consult(&-1).unwrap_err(),
        Ok(ContractError::InvalidAmount)
    );
}
