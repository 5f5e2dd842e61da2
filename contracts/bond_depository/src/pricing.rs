//! Discounted price and payout arithmetic. Prices are reference base units
//! per whole governance token.

use crate::terms::BPS_DENOMINATOR;
use reserve_errors::ContractError;

/// `amount * bps / 10_000`, truncating.
pub fn bps_of(amount: i128, bps: u32) -> Result<i128, ContractError> {
    Ok(amount
        .checked_mul(bps as i128)
        .ok_or(ContractError::Overflow)?
        / BPS_DENOMINATOR as i128)
}

/// Oracle price less the discount. A zero result is never a valid price.
pub fn discounted_price(oracle_price: i128, discount_bps: u32) -> Result<i128, ContractError> {
    if oracle_price <= 0 || discount_bps > BPS_DENOMINATOR {
        return Err(ContractError::InvalidPrice);
    }
    let price = bps_of(oracle_price, BPS_DENOMINATOR - discount_bps)?;
    if price == 0 {
        return Err(ContractError::InvalidPrice);
    }
    Ok(price)
}

/// Governance base units bought by `value` at `price`, where `one_token`
/// is one whole governance token in base units.
pub fn payout_for(value: i128, price: i128, one_token: i128) -> Result<i128, ContractError> {
    if price <= 0 {
        return Err(ContractError::InvalidPrice);
    }
    value
        .checked_mul(one_token)
        .ok_or(ContractError::Overflow)?
        .checked_div(price)
        .ok_or(ContractError::DivisionByZero)
}

/// Split a gross payout into `(fee, net)`.
pub fn split_fee(payout: i128, fee_bps: u32) -> Result<(i128, i128), ContractError> {
    let fee = bps_of(payout, fee_bps)?;
    Ok((fee, payout - fee))
}
