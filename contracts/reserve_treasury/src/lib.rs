//! # Reserve Treasury
//!
//! Custodies reserve assets, tracks per-asset reserves and outstanding debt,
//! and is the sole issuer of the governance token.
//!
//! Depositors must hold the role matching the asset kind. Governance tokens
//! are minted to a depositor only against the allocation the admin granted
//! it; the mint value itself is supplied by the caller and not re-derived.
//! Only audited bond engines should be given depositor roles.
//!
//! The governance token is a Stellar asset whose admin is this contract, so
//! the treasury keeps the circulating supply in its own ledger.

#![no_std]

mod events;
pub mod ledger;
pub mod testutils;
pub mod types;
pub mod valuation;

use ledger::ReserveLedger;
use reserve_errors::ContractError;
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{contract, contractimpl, Address, Env};
pub use types::{AssetConfig, AssetKind, DataKey, Role};

// ─── TTL constants ────────────────────────────────────────────────────────────

const BUMP_THRESHOLD: u32 = 17_280;
const BUMP_TARGET: u32 = 518_400;

#[contract]
pub struct ReserveTreasury;

// ─── Storage helpers ──────────────────────────────────────────────────────────

fn bump_instance(e: &Env) {
    e.storage().instance().extend_ttl(BUMP_THRESHOLD, BUMP_TARGET);
}

fn get_persistent<V>(e: &Env, key: &DataKey) -> Option<V>
where
    V: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>,
{
    let value = e.storage().persistent().get(key);
    if value.is_some() {
        e.storage()
            .persistent()
            .extend_ttl(key, BUMP_THRESHOLD, BUMP_TARGET);
    }
    value
}

fn set_persistent<V>(e: &Env, key: &DataKey, value: &V)
where
    V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    e.storage().persistent().set(key, value);
    e.storage()
        .persistent()
        .extend_ttl(key, BUMP_THRESHOLD, BUMP_TARGET);
}

fn amount_of(e: &Env, key: &DataKey) -> i128 {
    get_persistent(e, key).unwrap_or(0)
}

fn load_gov_token(e: &Env) -> Result<Address, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::GovToken)
        .ok_or(ContractError::NotInitialized)
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

fn has_role(e: &Env, role: Role, account: &Address) -> bool {
    get_persistent(e, &DataKey::Permission(role, account.clone())).unwrap_or(false)
}

fn require_role(e: &Env, role: Role, account: &Address, err: ContractError) -> Result<(), ContractError> {
    account.require_auth();
    if !has_role(e, role, account) {
        return Err(err);
    }
    Ok(())
}

fn accepted_asset(e: &Env, asset: &Address) -> Result<AssetConfig, ContractError> {
    match get_persistent::<AssetConfig>(e, &DataKey::Asset(asset.clone())) {
        Some(config) if config.accepted => Ok(config),
        _ => Err(ContractError::AssetNotAccepted),
    }
}

fn value_of_accepted(e: &Env, asset: &Address, amount: i128) -> Result<(AssetConfig, i128), ContractError> {
    let config = accepted_asset(e, asset)?;
    let value = valuation::value_of(e, &load_gov_token(e)?, asset, &config, amount)?;
    Ok((config, value))
}

/// [`value_of_accepted`] for flows that move custody. A value that
/// truncates to zero is rejected.
fn value_of_flow(e: &Env, asset: &Address, amount: i128) -> Result<(AssetConfig, i128), ContractError> {
    let (config, value) = value_of_accepted(e, asset, amount)?;
    if value <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    Ok((config, value))
}

fn require_positive(amount: i128) -> Result<(), ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    Ok(())
}

/// Debit `minter`'s allocation. Fails without touching storage if short.
fn debit_allocation(e: &Env, minter: &Address, amount: i128) -> Result<(), ContractError> {
    let key = DataKey::MintAllocation(minter.clone());
    let remaining = amount_of(e, &key);
    if amount > remaining {
        return Err(ContractError::InsufficientAllocation);
    }
    set_persistent(e, &key, &(remaining - amount));
    Ok(())
}

fn mint_governance(
    e: &Env,
    ledger: &mut ReserveLedger,
    to: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if amount == 0 {
        return Ok(());
    }
    ledger.record_mint(amount)?;
    StellarAssetClient::new(e, &load_gov_token(e)?).mint(to, &amount);
    Ok(())
}

fn adjust(e: &Env, key: DataKey, delta: i128, short: ContractError) -> Result<(), ContractError> {
    let current = amount_of(e, &key);
    let next = current.checked_add(delta).ok_or(ContractError::Overflow)?;
    if next < 0 {
        return Err(short);
    }
    set_persistent(e, &key, &next);
    Ok(())
}

#[contractimpl]
impl ReserveTreasury {
    // ─── Setup ────────────────────────────────────────────────────────────────

    /// `gov_token` must be a Stellar asset whose admin will be this contract.
    pub fn initialize(e: Env, admin: Address, gov_token: Address) -> Result<(), ContractError> {
        if e.storage().instance().has(&DataKey::Admin) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();
        e.storage().instance().set(&DataKey::Admin, &admin);
        e.storage().instance().set(&DataKey::GovToken, &gov_token);
        ledger::save(&e, &ReserveLedger::empty());
        bump_instance(&e);
        Ok(())
    }

    pub fn set_asset(
        e: Env,
        admin: Address,
        asset: Address,
        kind: AssetKind,
        accepted: bool,
    ) -> Result<(), ContractError> {
        require_admin(&e, &admin)?;
        let config = AssetConfig {
            kind: kind.clone(),
            accepted,
        };
        set_persistent(&e, &DataKey::Asset(asset.clone()), &config);
        bump_instance(&e);
        events::emit_asset_listed(&e, &asset, &kind, accepted);
        Ok(())
    }

    pub fn set_permission(
        e: Env,
        admin: Address,
        role: Role,
        account: Address,
        enabled: bool,
    ) -> Result<(), ContractError> {
        require_admin(&e, &admin)?;
        set_persistent(&e, &DataKey::Permission(role, account.clone()), &enabled);
        bump_instance(&e);
        events::emit_permission_set(&e, &account, role, enabled);
        Ok(())
    }

    /// Replace `minter`'s remaining mint allocation.
    pub fn set_mint_allocation(e: Env, admin: Address, minter: Address, amount: i128) -> Result<(), ContractError> {
        require_admin(&e, &admin)?;
        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }
        set_persistent(&e, &DataKey::MintAllocation(minter.clone()), &amount);
        bump_instance(&e);
        events::emit_allocation_set(&e, &minter, amount);
        Ok(())
    }

    // ─── Reserve flows ────────────────────────────────────────────────────────

    /// Take custody of `amount` of `asset` and mint `mint_value` governance
    /// tokens to the caller against its allocation.
    ///
    /// The caller must have approved this contract to spend `amount`.
    /// Returns the reference value credited to reserves.
    pub fn deposit(
        e: Env,
        caller: Address,
        amount: i128,
        asset: Address,
        mint_value: i128,
    ) -> Result<i128, ContractError> {
        require_positive(amount)?;
        if mint_value < 0 {
            return Err(ContractError::InvalidAmount);
        }
        let (config, value) = value_of_flow(&e, &asset, amount)?;
        let role = match config.kind {
            AssetKind::Reserve => Role::ReserveDepositor,
            AssetKind::Liquidity(_) => Role::LiquidityDepositor,
        };
        require_role(&e, role, &caller, ContractError::UnauthorizedDepositor)?;
        debit_allocation(&e, &caller, mint_value)?;

        let this = e.current_contract_address();
        TokenClient::new(&e, &asset).transfer_from(&this, &caller, &this, &amount);

        let mut ledger = ledger::load(&e);
        adjust(&e, DataKey::Reserve(asset.clone()), amount, ContractError::Overflow)?;
        ledger.add_reserves(value)?;
        mint_governance(&e, &mut ledger, &caller, mint_value)?;
        ledger::save(&e, &ledger);
        bump_instance(&e);

        events::emit_reserves_deposited(&e, &caller, &asset, amount, value, mint_value);
        Ok(value)
    }

    /// Burn governance tokens equal to the value of `amount` and release
    /// that much of `asset` to the spender. Returns the value burned.
    pub fn withdraw(e: Env, spender: Address, asset: Address, amount: i128) -> Result<i128, ContractError> {
        require_positive(amount)?;
        let (_, value) = value_of_flow(&e, &asset, amount)?;
        require_role(&e, Role::ReserveSpender, &spender, ContractError::UnauthorizedSpender)?;

        let mut ledger = ledger::load(&e);
        adjust(
            &e,
            DataKey::Reserve(asset.clone()),
            -amount,
            ContractError::InsufficientReserves,
        )?;
        ledger.remove_reserves(value)?;
        ledger.record_burn(value)?;
        ledger::save(&e, &ledger);

        let this = e.current_contract_address();
        let gov = load_gov_token(&e)?;
        TokenClient::new(&e, &gov).burn_from(&this, &spender, &value);
        TokenClient::new(&e, &asset).transfer(&this, &spender, &amount);
        bump_instance(&e);

        events::emit_reserves_withdrawn(&e, &spender, &asset, amount, value);
        Ok(value)
    }

    /// Lend reserves to a manager. Only excess reserves may be lent.
    pub fn borrow_reserves(e: Env, manager: Address, asset: Address, amount: i128) -> Result<i128, ContractError> {
        require_positive(amount)?;
        let (_, value) = value_of_flow(&e, &asset, amount)?;
        require_role(&e, Role::ReserveManager, &manager, ContractError::UnauthorizedManager)?;

        let mut ledger = ledger::load(&e);
        if value > ledger.excess_reserves() {
            return Err(ContractError::InsufficientReserves);
        }
        adjust(
            &e,
            DataKey::Reserve(asset.clone()),
            -amount,
            ContractError::InsufficientReserves,
        )?;
        adjust(&e, DataKey::AssetDebt(asset.clone()), amount, ContractError::Overflow)?;
        ledger.remove_reserves(value)?;
        ledger.incur_debt(value)?;
        ledger::save(&e, &ledger);

        let this = e.current_contract_address();
        TokenClient::new(&e, &asset).transfer(&this, &manager, &amount);
        bump_instance(&e);

        events::emit_reserves_borrowed(&e, &manager, &asset, amount, value);
        Ok(value)
    }

    /// Return borrowed `asset` to the treasury.
    pub fn repay_reserves(e: Env, manager: Address, asset: Address, amount: i128) -> Result<i128, ContractError> {
        require_positive(amount)?;
        let (_, value) = value_of_flow(&e, &asset, amount)?;
        require_role(&e, Role::ReserveManager, &manager, ContractError::UnauthorizedManager)?;

        adjust(
            &e,
            DataKey::AssetDebt(asset.clone()),
            -amount,
            ContractError::InsufficientDebt,
        )?;
        adjust(&e, DataKey::Reserve(asset.clone()), amount, ContractError::Overflow)?;

        let mut ledger = ledger::load(&e);
        // liquidity valuations can drift between borrow and repay
        ledger.repay_debt(value.min(ledger.total_debt))?;
        ledger.add_reserves(value)?;
        ledger::save(&e, &ledger);

        let this = e.current_contract_address();
        TokenClient::new(&e, &asset).transfer_from(&this, &manager, &this, &amount);
        bump_instance(&e);

        events::emit_reserves_repaid(&e, &manager, &asset, amount, value);
        Ok(value)
    }

    /// Settle debt by burning the manager's governance tokens.
    pub fn repay_with_governance(e: Env, manager: Address, amount: i128) -> Result<(), ContractError> {
        require_positive(amount)?;
        require_role(&e, Role::ReserveManager, &manager, ContractError::UnauthorizedManager)?;

        let mut ledger = ledger::load(&e);
        ledger.repay_debt(amount)?;
        ledger.record_burn(amount)?;
        ledger::save(&e, &ledger);

        let this = e.current_contract_address();
        TokenClient::new(&e, &load_gov_token(&e)?).burn_from(&this, &manager, &amount);
        bump_instance(&e);

        events::emit_debt_repaid_with_governance(&e, &manager, amount);
        Ok(())
    }

    /// Mint staking rewards. Bounded by excess reserves.
    pub fn mint_rewards(e: Env, caller: Address, recipient: Address, amount: i128) -> Result<(), ContractError> {
        require_positive(amount)?;
        require_role(&e, Role::RewardManager, &caller, ContractError::UnauthorizedRewardManager)?;

        let mut ledger = ledger::load(&e);
        if amount > ledger.excess_reserves() {
            return Err(ContractError::InsufficientReserves);
        }
        mint_governance(&e, &mut ledger, &recipient, amount)?;
        ledger::save(&e, &ledger);
        bump_instance(&e);

        events::emit_rewards_minted(&e, &caller, &recipient, amount);
        Ok(())
    }

    // ─── Views ────────────────────────────────────────────────────────────────

    pub fn value_of(e: Env, asset: Address, amount: i128) -> Result<i128, ContractError> {
        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }
        value_of_accepted(&e, &asset, amount).map(|(_, value)| value)
    }

    pub fn excess_reserves(e: Env) -> i128 {
        ledger::load(&e).excess_reserves()
    }

    pub fn total_reserves(e: Env) -> i128 {
        ledger::load(&e).total_reserves
    }

    pub fn total_debt(e: Env) -> i128 {
        ledger::load(&e).total_debt
    }

    pub fn governance_supply(e: Env) -> i128 {
        ledger::load(&e).governance_supply
    }

    pub fn reserve_balance(e: Env, asset: Address) -> i128 {
        amount_of(&e, &DataKey::Reserve(asset))
    }

    pub fn asset_debt(e: Env, asset: Address) -> i128 {
        amount_of(&e, &DataKey::AssetDebt(asset))
    }

    pub fn mint_allocation(e: Env, minter: Address) -> i128 {
        amount_of(&e, &DataKey::MintAllocation(minter))
    }

    pub fn has_permission(e: Env, role: Role, account: Address) -> bool {
        has_role(&e, role, &account)
    }

    pub fn asset_config(e: Env, asset: Address) -> Option<AssetConfig> {
        get_persistent(&e, &DataKey::Asset(asset))
    }

    pub fn gov_token(e: Env) -> Result<Address, ContractError> {
        load_gov_token(&e)
    }
}
