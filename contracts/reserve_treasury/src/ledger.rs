//! Global reserve/debt/supply counters.
//!
//! All three totals are kept in one struct so every mutation goes through a
//! single load-modify-save path.

use reserve_errors::ContractError;
use soroban_sdk::{contracttype, Env};

use crate::types::DataKey;

/// Totals in reference value, expressed in governance token base units.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReserveLedger {
    pub total_reserves: i128,
    pub total_debt: i128,
    pub governance_supply: i128,
}

impl ReserveLedger {
    pub fn empty() -> Self {
        ReserveLedger {
            total_reserves: 0,
            total_debt: 0,
            governance_supply: 0,
        }
    }

    /// `total_reserves - (governance_supply - total_debt)`, floored at zero.
    pub fn excess_reserves(&self) -> i128 {
        let backing_required = self.governance_supply.saturating_sub(self.total_debt);
        self.total_reserves.saturating_sub(backing_required).max(0)
    }

    pub fn add_reserves(&mut self, value: i128) -> Result<(), ContractError> {
        self.total_reserves = self
            .total_reserves
            .checked_add(value)
            .ok_or(ContractError::Overflow)?;
        Ok(())
    }

    pub fn remove_reserves(&mut self, value: i128) -> Result<(), ContractError> {
        if value > self.total_reserves {
            return Err(ContractError::InsufficientReserves);
        }
        self.total_reserves -= value;
        Ok(())
    }

    pub fn incur_debt(&mut self, value: i128) -> Result<(), ContractError> {
        self.total_debt = self
            .total_debt
            .checked_add(value)
            .ok_or(ContractError::Overflow)?;
        Ok(())
    }

    pub fn repay_debt(&mut self, value: i128) -> Result<(), ContractError> {
        if value > self.total_debt {
            return Err(ContractError::InsufficientDebt);
        }
        self.total_debt -= value;
        Ok(())
    }

    pub fn record_mint(&mut self, amount: i128) -> Result<(), ContractError> {
        self.governance_supply = self
            .governance_supply
            .checked_add(amount)
            .ok_or(ContractError::Overflow)?;
        Ok(())
    }

    pub fn record_burn(&mut self, amount: i128) -> Result<(), ContractError> {
        self.governance_supply = self
            .governance_supply
            .checked_sub(amount)
            .filter(|s| *s >= 0)
            .ok_or(ContractError::Underflow)?;
        Ok(())
    }
}

pub fn load(e: &Env) -> ReserveLedger {
    e.storage()
        .instance()
        .get(&DataKey::Ledger)
        .unwrap_or_else(ReserveLedger::empty)
}

pub fn save(e: &Env, ledger: &ReserveLedger) {
    e.storage().instance().set(&DataKey::Ledger, ledger);
}
