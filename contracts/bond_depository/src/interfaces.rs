use soroban_sdk::{contractclient, Address, Env};

/// Treasury surface the engine deposits through.
#[contractclient(name = "TreasuryClient")]
pub trait Treasury {
    fn deposit(env: Env, caller: Address, amount: i128, asset: Address, mint_value: i128) -> i128;
    fn value_of(env: Env, asset: Address, amount: i128) -> i128;
    fn mint_allocation(env: Env, minter: Address) -> i128;
}

/// Time-weighted price of the governance token.
#[contractclient(name = "OracleClient")]
pub trait Oracle {
    fn consult(env: Env, amount: i128) -> i128;
}

/// Staking pool that redeemed payouts can be forwarded to.
#[contractclient(name = "StakingClient")]
pub trait Staking {
    fn stake(env: Env, from: Address, amount: i128, recipient: Address) -> i128;
}
