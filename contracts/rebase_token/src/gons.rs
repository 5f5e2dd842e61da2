//! Fixed-point conversion between internal units (gons) and displayed
//! balances.
//!
//! Total gons are fixed at genesis. Balances are stored in gons only; the
//! displayed balance is `gons / gons_per_fragment`, so a rebase that lowers
//! `gons_per_fragment` grows every holder by the same ratio without touching
//! any balance entry.

use reserve_errors::ContractError;
use soroban_sdk::contracttype;

/// Displayed supply never exceeds this.
pub const MAX_SUPPLY: i128 = i64::MAX as i128;

/// Index at genesis (1.0 at 7 decimals).
pub const INITIAL_INDEX: i128 = 10_000_000;

/// Global scale shared by every balance.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnitScale {
    pub total_gons: u128,
    pub total_supply: i128,
    pub gons_per_fragment: u128,
}

impl UnitScale {
    /// Largest gon total exactly divisible by `initial_supply`, so the
    /// starting ratio carries no rounding error.
    pub fn genesis(initial_supply: i128) -> Result<Self, ContractError> {
        if initial_supply < INITIAL_INDEX || initial_supply > MAX_SUPPLY {
            return Err(ContractError::InvalidParameter);
        }
        let supply = initial_supply as u128;
        let total_gons = u128::MAX - (u128::MAX % supply);
        Ok(UnitScale {
            total_gons,
            total_supply: initial_supply,
            gons_per_fragment: total_gons / supply,
        })
    }

    pub fn to_gons(&self, amount: i128) -> Result<u128, ContractError> {
        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }
        (amount as u128)
            .checked_mul(self.gons_per_fragment)
            .ok_or(ContractError::Overflow)
    }

    /// Truncating. `gons_per_fragment` is at least `u128::MAX / MAX_SUPPLY`,
    /// so the quotient always fits in `i128`.
    pub fn to_balance(&self, gons: u128) -> i128 {
        (gons / self.gons_per_fragment) as i128
    }

    /// Grow supply so that `circulating` holders gain exactly `profit`.
    ///
    /// The staking pool's own balance grows by the same ratio, which is why
    /// the increase is `profit * total / circulating` rather than `profit`.
    /// When nothing circulates the profit is added as-is. The result is
    /// clamped to [`MAX_SUPPLY`]. Returns the new total supply.
    pub fn grow(&mut self, profit: i128, circulating: i128) -> Result<i128, ContractError> {
        if profit < 0 {
            return Err(ContractError::InvalidAmount);
        }
        if profit == 0 {
            return Ok(self.total_supply);
        }
        let increase = if circulating > 0 {
            profit
                .checked_mul(self.total_supply)
                .ok_or(ContractError::Overflow)?
                / circulating
        } else {
            profit
        };
        let supply = self
            .total_supply
            .checked_add(increase)
            .ok_or(ContractError::Overflow)?
            .min(MAX_SUPPLY);

        self.total_supply = supply;
        self.gons_per_fragment = self.total_gons / supply as u128;
        Ok(supply)
    }
}
