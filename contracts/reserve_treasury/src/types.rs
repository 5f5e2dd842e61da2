use soroban_sdk::{contracttype, Address};

// ─── Asset registry ───────────────────────────────────────────────────────────

/// How an accepted asset is valued in reference units.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AssetKind {
    /// Valued by decimal scaling against the governance token.
    Reserve,
    /// Pooled liquidity, valued by the given valuation contract.
    Liquidity(Address),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssetConfig {
    pub kind: AssetKind,
    pub accepted: bool,
}

// ─── Permissions ──────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    ReserveDepositor,
    LiquidityDepositor,
    ReserveManager,
    ReserveSpender,
    RewardManager,
}

// ─── Storage keys ─────────────────────────────────────────────────────────────

/// * `Admin`, `GovToken`, `Ledger` live in `instance()`.
/// * Everything keyed by address lives in `persistent()`.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    GovToken,
    Ledger,
    Asset(Address),
    Reserve(Address),
    AssetDebt(Address),
    Permission(Role, Address),
    MintAllocation(Address),
}
