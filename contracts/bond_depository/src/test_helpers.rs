//! Shared test helpers for bond_depository tests.

#![cfg(test)]

use crate::{BondDepository, BondDepositoryClient, BondTerms};
use price_oracle::testutils::{MockLiquidityPool, MockLiquidityPoolClient};
use price_oracle::{PriceOracle, PriceOracleClient};
use reserve_treasury::{AssetKind, ReserveTreasury, ReserveTreasuryClient, Role};
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{Address, Env};

pub const ONE: i128 = 10_000_000;

/// Principal minted to the depositor.
pub const DEFAULT_MINT: i128 = 1_000_000 * ONE;

/// Bond engine mint allocation on the treasury.
pub const ALLOCATION: i128 = 1_000_000 * ONE;

pub const VESTING_TERM: u32 = 10_000;
pub const ORACLE_WINDOW: u64 = 3_600;

/// 100 tokens deposited at a 1.00 price and 5% discount.
pub const SCENARIO_PAYOUT: i128 = 1_052_631_578;

pub struct BondFixture<'a> {
    pub client: BondDepositoryClient<'a>,
    pub treasury: ReserveTreasuryClient<'a>,
    pub oracle: PriceOracleClient<'a>,
    pub admin: Address,
    pub bond: Address,
    pub gov: Address,
    pub usdc: Address,
    pub depositor: Address,
    pub fee_recipient: Address,
}

impl<'a> BondFixture<'a> {
    pub fn gov_balance(&self, e: &Env, who: &Address) -> i128 {
        TokenClient::new(e, &self.gov).balance(who)
    }

    pub fn usdc_balance(&self, e: &Env, who: &Address) -> i128 {
        TokenClient::new(e, &self.usdc).balance(who)
    }
}

pub fn default_terms() -> BondTerms {
    BondTerms {
        vesting_term: VESTING_TERM,
        max_payout_bps: 1_000,
        fee_bps: 0,
        discount_bps: 500,
        max_debt: 1_000_000 * ONE,
    }
}

pub fn configure_ledger(e: &Env) {
    e.ledger().with_mut(|li| {
        li.sequence_number = 1_000;
        li.timestamp = 1_700_000_000;
        li.min_persistent_entry_ttl = 1_000_000;
        li.min_temp_entry_ttl = 1_000_000;
        li.max_entry_ttl = 6_312_000;
    });
}

pub fn advance_blocks(e: &Env, blocks: u32) {
    e.ledger().with_mut(|li| li.sequence_number += blocks);
}

/// Oracle over a mock pool quoting `price`. With `warm` the first average
/// has already been taken.
pub fn deploy_oracle<'a>(e: &'a Env, admin: &Address, price: i128, warm: bool) -> PriceOracleClient<'a> {
    let pool = e.register(MockLiquidityPool, ());
    MockLiquidityPoolClient::new(e, &pool).set_price(&price);
    let oracle = PriceOracleClient::new(e, &e.register(PriceOracle, ()));
    oracle.initialize(admin, &pool, &ORACLE_WINDOW);
    if warm {
        e.ledger().with_mut(|li| li.timestamp += ORACLE_WINDOW);
        oracle.update();
    }
    oracle
}

fn build(e: &Env, price: i128, warm: bool) -> BondFixture<'_> {
    e.mock_all_auths();
    configure_ledger(e);

    let admin = Address::generate(e);
    let depositor = Address::generate(e);
    let fee_recipient = Address::generate(e);

    let treasury_id = e.register(ReserveTreasury, ());
    let treasury = ReserveTreasuryClient::new(e, &treasury_id);
    let gov = e.register_stellar_asset_contract_v2(admin.clone()).address();
    StellarAssetClient::new(e, &gov).set_admin(&treasury_id);
    let usdc = e.register_stellar_asset_contract_v2(admin.clone()).address();
    StellarAssetClient::new(e, &usdc).mint(&depositor, &DEFAULT_MINT);

    let oracle = deploy_oracle(e, &admin, price, warm);

    let bond = e.register(BondDepository, ());
    let client = BondDepositoryClient::new(e, &bond);
    client.initialize(
        &admin,
        &usdc,
        &treasury_id,
        &oracle.address,
        &gov,
        &fee_recipient,
        &default_terms(),
    );

    treasury.initialize(&admin, &gov);
    treasury.set_asset(&admin, &usdc, &AssetKind::Reserve, &true);
    treasury.set_permission(&admin, &Role::ReserveDepositor, &bond, &true);
    treasury.set_mint_allocation(&admin, &bond, &ALLOCATION);

    let expiry = e.ledger().sequence() + 100_000;
    TokenClient::new(e, &usdc).approve(&depositor, &bond, &DEFAULT_MINT, &expiry);

    BondFixture {
        client,
        treasury,
        oracle,
        admin,
        bond,
        gov,
        usdc,
        depositor,
        fee_recipient,
    }
}

/// Bond engine selling governance tokens at an oracle price of 1.00 with a
/// 5% discount, no fee and a 10,000-block term.
pub fn setup(e: &Env) -> BondFixture<'_> {
    build(e, ONE, true)
}

pub fn setup_with_price(e: &Env, price: i128) -> BondFixture<'_> {
    build(e, price, true)
}

/// Oracle that has not produced an average yet.
pub fn setup_cold_oracle(e: &Env) -> BondFixture<'_> {
    build(e, ONE, false)
}
