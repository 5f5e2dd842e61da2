//! Linear vesting of bond payouts.

use crate::pricing::bps_of;
use crate::terms::BPS_DENOMINATOR;
use crate::types::Bond;
use reserve_errors::ContractError;

/// Share of the remaining payout vested after `elapsed` blocks, in bps,
/// capped at 100%.
pub fn percent_vested(elapsed: u32, vesting_remaining: u32) -> u32 {
    if vesting_remaining == 0 {
        return BPS_DENOMINATOR;
    }
    let pct = elapsed as u64 * BPS_DENOMINATOR as u64 / vesting_remaining as u64;
    pct.min(BPS_DENOMINATOR as u64) as u32
}

/// Amount claimable from `bond` at block `now`.
pub fn pending(bond: &Bond, now: u32) -> Result<i128, ContractError> {
    let elapsed = now.saturating_sub(bond.last_update_block);
    let pct = percent_vested(elapsed, bond.vesting_remaining);
    if pct >= BPS_DENOMINATOR {
        return Ok(bond.payout);
    }
    bps_of(bond.payout, pct)
}

/// Release the vested part of `bond` at block `now`.
///
/// Returns the amount paid and the position left behind, `None` once fully
/// vested. Paying zero leaves the bond untouched.
pub fn vest(bond: &Bond, now: u32) -> Result<(i128, Option<Bond>), ContractError> {
    let elapsed = now.saturating_sub(bond.last_update_block);
    let pct = percent_vested(elapsed, bond.vesting_remaining);
    if pct >= BPS_DENOMINATOR {
        return Ok((bond.payout, None));
    }

    let paid = bps_of(bond.payout, pct)?;
    if paid == 0 {
        return Ok((0, Some(bond.clone())));
    }
    Ok((
        paid,
        Some(Bond {
            payout: bond.payout - paid,
            vesting_remaining: bond.vesting_remaining - elapsed,
            last_update_block: now,
            ..bond.clone()
        }),
    ))
}
