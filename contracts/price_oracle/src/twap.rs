//! Pure TWAP arithmetic. No storage access.

use crate::pool::PoolCumulative;
use crate::PRICE_PRECISION;
use reserve_errors::ContractError;

/// Accumulator value at `now`, carrying the last spot price forward over the
/// seconds the pool has not yet recorded.
pub fn cumulative_at(snapshot: &PoolCumulative, now: u64) -> Result<i128, ContractError> {
    if now <= snapshot.last_update {
        return Ok(snapshot.price_cumulative);
    }
    let pending = i128::from(now - snapshot.last_update);
    let carried = snapshot
        .spot_price
        .checked_mul(pending)
        .ok_or(ContractError::Overflow)?;
    snapshot
        .price_cumulative
        .checked_add(carried)
        .ok_or(ContractError::Overflow)
}

/// Average price between two accumulator readings `elapsed` seconds apart.
pub fn average(last: i128, current: i128, elapsed: u64) -> Result<i128, ContractError> {
    if elapsed == 0 {
        return Err(ContractError::DivisionByZero);
    }
    if current < last {
        return Err(ContractError::CumulativeRegressed);
    }
    let delta = current.checked_sub(last).ok_or(ContractError::Underflow)?;
    Ok(delta / i128::from(elapsed))
}

/// Value of `amount` at `average`, in the same base units as `amount`.
pub fn scale(amount: i128, average: i128) -> Result<i128, ContractError> {
    amount
        .checked_mul(average)
        .map(|v| v / PRICE_PRECISION)
        .ok_or(ContractError::Overflow)
}
