//! Bond term bounds and single-field updates.
//!
//! ## Bounds
//! | Field            | Unit   | Range            |
//! |------------------|--------|------------------|
//! | `vesting_term`   | blocks | `>= 10_000`      |
//! | `max_payout_bps` | bps    | `1 ..= 10_000`   |
//! | `fee_bps`        | bps    | `0 ..= 10_000`   |
//! | `discount_bps`   | bps    | `0 ..= 10_000`   |
//! | `max_debt`       | tokens | `>= 0`           |

use crate::types::{BondParameter, BondTerms};
use reserve_errors::ContractError;

pub const BPS_DENOMINATOR: u32 = 10_000;

/// Shortest vesting term accepted, in blocks.
pub const MIN_VESTING_TERM: u32 = 10_000;

pub fn validate(terms: &BondTerms) -> Result<(), ContractError> {
    if terms.vesting_term < MIN_VESTING_TERM
        || terms.max_payout_bps == 0
        || terms.max_payout_bps > BPS_DENOMINATOR
        || terms.fee_bps > BPS_DENOMINATOR
        || terms.discount_bps > BPS_DENOMINATOR
        || terms.max_debt < 0
    {
        return Err(ContractError::InvalidParameter);
    }
    Ok(())
}

fn as_u32(value: i128) -> Result<u32, ContractError> {
    u32::try_from(value).map_err(|_| ContractError::InvalidParameter)
}

/// Set one field of `terms` to `value` and validate the result.
///
/// Returns the previous value of the field. `terms` is left unchanged on
/// error.
pub fn apply(terms: &mut BondTerms, parameter: BondParameter, value: i128) -> Result<i128, ContractError> {
    let mut next = terms.clone();
    let old = match parameter {
        BondParameter::VestingTerm => {
            let old = next.vesting_term as i128;
            next.vesting_term = as_u32(value)?;
            old
        }
        BondParameter::MaxPayout => {
            let old = next.max_payout_bps as i128;
            next.max_payout_bps = as_u32(value)?;
            old
        }
        BondParameter::Fee => {
            let old = next.fee_bps as i128;
            next.fee_bps = as_u32(value)?;
            old
        }
        BondParameter::Discount => {
            let old = next.discount_bps as i128;
            next.discount_bps = as_u32(value)?;
            old
        }
        BondParameter::MaxDebt => {
            let old = next.max_debt;
            next.max_debt = value;
            old
        }
    };
    validate(&next)?;
    *terms = next;
    Ok(old)
}
