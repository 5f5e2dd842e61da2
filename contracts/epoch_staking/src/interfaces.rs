use soroban_sdk::{contractclient, Address, Env};

/// The rebasing staked-token ledger driven by this pool.
#[contractclient(name = "RebaseLedgerClient")]
pub trait RebaseLedger {
    fn rebase(env: Env, profit: i128, epoch: u32) -> i128;
    fn circulating_supply(env: Env) -> i128;
    fn index(env: Env) -> i128;
    fn transfer(env: Env, from: Address, to: Address, amount: i128);
    fn transfer_from(env: Env, spender: Address, from: Address, to: Address, amount: i128);
    fn move_to_warmup(env: Env, amount: i128) -> u128;
    fn release_warmup(env: Env, recipient: Address, gons: u128) -> i128;
    fn return_warmup(env: Env, gons: u128);
}

/// Mints the next epoch's yield into the pool.
#[contractclient(name = "YieldPolicyClient")]
pub trait YieldPolicy {
    fn distribute(env: Env) -> i128;
}
