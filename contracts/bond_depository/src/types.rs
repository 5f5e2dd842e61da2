use soroban_sdk::{contracttype, Address};

/// Issuance terms shared by every bond of this engine.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BondTerms {
    /// Blocks for a fresh deposit to vest fully.
    pub vesting_term: u32,
    /// Largest single payout, in bps of the engine's remaining mint allocation.
    pub max_payout_bps: u32,
    /// Share of each payout sent to the fee recipient, in bps.
    pub fee_bps: u32,
    /// Discount off the oracle price, in bps.
    pub discount_bps: u32,
    /// Ceiling on cumulative payouts issued.
    pub max_debt: i128,
}

/// Selector for `set_bond_term`.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BondParameter {
    VestingTerm,
    MaxPayout,
    Fee,
    Discount,
    MaxDebt,
}

/// A depositor's open position. At most one per depositor.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bond {
    pub amount_bonded: i128,
    /// Governance tokens still owed.
    pub payout: i128,
    pub vesting_remaining: u32,
    pub last_update_block: u32,
    /// Discounted price of the most recent deposit.
    pub price_paid: i128,
}

/// Result of pricing a deposit without executing it.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BondQuote {
    /// Deposit value in reference units.
    pub value: i128,
    /// Oracle price of one governance token.
    pub oracle_price: i128,
    pub discounted_price: i128,
    /// Gross payout before the fee.
    pub payout: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositRecord {
    pub amount: i128,
    pub value: i128,
    pub payout: i128,
    pub fee: i128,
    pub price: i128,
    pub block: u32,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Principal,
    Treasury,
    Oracle,
    GovToken,
    FeeRecipient,
    Staking,
    Terms,
    TotalDebt,
    Bond(Address),
}
