use soroban_sdk::{Address, Env, Symbol};

use crate::types::{AssetKind, Role};

/// Emitted when an asset is listed, relisted or delisted.
///
/// # Topics
/// * `Symbol` - "asset_listed"
/// * `Address` - The asset
///
/// # Data
/// * `AssetKind` - Valuation kind
/// * `bool` - Whether deposits are accepted
pub fn emit_asset_listed(e: &Env, asset: &Address, kind: &AssetKind, accepted: bool) {
    let topics = (Symbol::new(e, "asset_listed"), asset.clone());
    e.events().publish(topics, (kind.clone(), accepted));
}

/// Emitted when a role is granted or revoked.
///
/// # Topics
/// * `Symbol` - "permission_set"
/// * `Address` - The account
///
/// # Data
/// * `Role` - The role
/// * `bool` - Granted (`true`) or revoked
pub fn emit_permission_set(e: &Env, account: &Address, role: Role, enabled: bool) {
    let topics = (Symbol::new(e, "permission_set"), account.clone());
    e.events().publish(topics, (role, enabled));
}

/// Emitted when a minter's allocation is replaced.
pub fn emit_allocation_set(e: &Env, minter: &Address, amount: i128) {
    let topics = (Symbol::new(e, "allocation_set"), minter.clone());
    e.events().publish(topics, amount);
}

/// Emitted when reserves are deposited and governance tokens minted.
///
/// # Topics
/// * `Symbol` - "reserves_deposited"
/// * `Address` - The depositor
///
/// # Data
/// * `Address` - Asset deposited
/// * `i128` - Asset amount
/// * `i128` - Reference value credited
/// * `i128` - Governance tokens minted
pub fn emit_reserves_deposited(
    e: &Env,
    depositor: &Address,
    asset: &Address,
    amount: i128,
    value: i128,
    minted: i128,
) {
    let topics = (Symbol::new(e, "reserves_deposited"), depositor.clone());
    e.events()
        .publish(topics, (asset.clone(), amount, value, minted));
}

/// Emitted when a spender redeems governance tokens for reserves.
pub fn emit_reserves_withdrawn(e: &Env, spender: &Address, asset: &Address, amount: i128, value: i128) {
    let topics = (Symbol::new(e, "reserves_withdrawn"), spender.clone());
    e.events().publish(topics, (asset.clone(), amount, value));
}

/// Emitted when a manager moves reserves into outstanding debt.
pub fn emit_reserves_borrowed(e: &Env, manager: &Address, asset: &Address, amount: i128, value: i128) {
    let topics = (Symbol::new(e, "reserves_borrowed"), manager.clone());
    e.events().publish(topics, (asset.clone(), amount, value));
}

/// Emitted when a manager returns borrowed reserves.
pub fn emit_reserves_repaid(e: &Env, manager: &Address, asset: &Address, amount: i128, value: i128) {
    let topics = (Symbol::new(e, "reserves_repaid"), manager.clone());
    e.events().publish(topics, (asset.clone(), amount, value));
}

/// Emitted when debt is settled by burning governance tokens.
pub fn emit_debt_repaid_with_governance(e: &Env, manager: &Address, amount: i128) {
    let topics = (Symbol::new(e, "debt_repaid_gov"), manager.clone());
    e.events().publish(topics, amount);
}

/// Emitted when staking rewards are minted out of excess reserves.
pub fn emit_rewards_minted(e: &Env, caller: &Address, recipient: &Address, amount: i128) {
    let topics = (Symbol::new(e, "rewards_minted"), recipient.clone());
    e.events().publish(topics, (caller.clone(), amount));
}
