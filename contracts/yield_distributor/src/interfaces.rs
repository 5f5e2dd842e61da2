use soroban_sdk::{contractclient, Address, Env};

/// Treasury surface used to size and mint rewards.
#[contractclient(name = "RewardTreasuryClient")]
pub trait RewardTreasury {
    fn governance_supply(env: Env) -> i128;
    fn excess_reserves(env: Env) -> i128;
    fn mint_rewards(env: Env, caller: Address, recipient: Address, amount: i128);
}
