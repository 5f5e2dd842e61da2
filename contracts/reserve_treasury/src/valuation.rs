use reserve_errors::ContractError;
use soroban_sdk::{contractclient, token::TokenClient, Address, Env};

use crate::types::{AssetConfig, AssetKind};

/// Prices pooled-liquidity positions in reference units.
#[contractclient(name = "LiquidityValuationClient")]
pub trait LiquidityValuation {
    fn valuation(env: Env, pooled_asset: Address, amount: i128) -> i128;
}

/// Move `amount` from `from_decimals` to `to_decimals` precision, truncating.
pub fn rescale(amount: i128, from_decimals: u32, to_decimals: u32) -> Result<i128, ContractError> {
    if to_decimals >= from_decimals {
        let factor = 10i128
            .checked_pow(to_decimals - from_decimals)
            .ok_or(ContractError::Overflow)?;
        amount.checked_mul(factor).ok_or(ContractError::Overflow)
    } else {
        let factor = 10i128
            .checked_pow(from_decimals - to_decimals)
            .ok_or(ContractError::Overflow)?;
        Ok(amount / factor)
    }
}

/// Reference value of `amount` of `asset`, in governance token base units.
pub fn value_of(
    e: &Env,
    gov_token: &Address,
    asset: &Address,
    config: &AssetConfig,
    amount: i128,
) -> Result<i128, ContractError> {
    let value = match &config.kind {
        AssetKind::Reserve => {
            let asset_decimals = TokenClient::new(e, asset).decimals();
            let gov_decimals = TokenClient::new(e, gov_token).decimals();
            rescale(amount, asset_decimals, gov_decimals)?
        }
        AssetKind::Liquidity(valuator) => {
            LiquidityValuationClient::new(e, valuator).valuation(asset, &amount)
        }
    };
    if value < 0 {
        return Err(ContractError::InvalidPrice);
    }
    Ok(value)
}
