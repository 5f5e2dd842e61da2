use soroban_sdk::{contracttype, Env};

/// Fixed-point scale of `RebaseRecord::rebase_percent` (1.0 = 1e18).
pub const PERCENT_PRECISION: i128 = 1_000_000_000_000_000_000;

const BUMP_THRESHOLD: u32 = 17_280;
const BUMP_TARGET: u32 = 518_400;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RebaseRecord {
    pub epoch: u32,
    /// `profit / total_staked_before`, scaled by [`PERCENT_PRECISION`].
    pub rebase_percent: i128,
    pub total_staked_before: i128,
    pub total_staked_after: i128,
    pub amount_rebased: i128,
    pub index: i128,
    pub ledger: u32,
}

#[contracttype]
#[derive(Clone)]
pub enum HistoryKey {
    Count,
    Record(u32),
}

/// Append-only; records are never rewritten or pruned.
pub fn append(e: &Env, record: &RebaseRecord) -> u32 {
    let index = count(e);
    let key = HistoryKey::Record(index);
    e.storage().persistent().set(&key, record);
    e.storage()
        .persistent()
        .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
    e.storage().instance().set(&HistoryKey::Count, &(index + 1));
    index
}

pub fn count(e: &Env) -> u32 {
    e.storage().instance().get(&HistoryKey::Count).unwrap_or(0)
}

pub fn get(e: &Env, index: u32) -> Option<RebaseRecord> {
    e.storage().persistent().get(&HistoryKey::Record(index))
}
