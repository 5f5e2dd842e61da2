use soroban_sdk::{contractclient, contracttype, Env};

/// Snapshot of a liquidity pool's price accumulator.
///
/// `price_cumulative` is the running sum of `spot_price * seconds` up to
/// `last_update`. Prices are fixed point with [`crate::PRICE_PRECISION`].
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolCumulative {
    pub price_cumulative: i128,
    pub spot_price: i128,
    pub last_update: u64,
}

/// Interface the oracle reads from the underlying pool.
#[contractclient(name = "LiquidityPoolClient")]
pub trait LiquidityPool {
    fn price_cumulative(env: Env) -> PoolCumulative;
}
