use crate::types::DepositRecord;
use soroban_sdk::{contracttype, Address, Env};

const BUMP_THRESHOLD: u32 = 17_280;
const BUMP_TARGET: u32 = 518_400;

#[contracttype]
#[derive(Clone)]
pub enum HistoryKey {
    Count(Address),
    Record(Address, u32),
}

/// Append-only per-depositor log.
pub fn append(e: &Env, depositor: &Address, record: &DepositRecord) -> u32 {
    let count_key = HistoryKey::Count(depositor.clone());
    let index = count(e, depositor);

    let key = HistoryKey::Record(depositor.clone(), index);
    e.storage().persistent().set(&key, record);
    e.storage()
        .persistent()
        .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);

    e.storage().persistent().set(&count_key, &(index + 1));
    e.storage()
        .persistent()
        .extend_ttl(&count_key, BUMP_THRESHOLD, BUMP_TARGET);
    index
}

pub fn count(e: &Env, depositor: &Address) -> u32 {
    e.storage()
        .persistent()
        .get(&HistoryKey::Count(depositor.clone()))
        .unwrap_or(0)
}

pub fn get(e: &Env, depositor: &Address, index: u32) -> Option<DepositRecord> {
    e.storage()
        .persistent()
        .get(&HistoryKey::Record(depositor.clone(), index))
}
