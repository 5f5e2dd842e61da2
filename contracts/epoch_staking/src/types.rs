use soroban_sdk::{contracttype, Address};

/// Block-counted accounting period.
///
/// `end_block` only ever grows by `length`, `number` only by one.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Epoch {
    pub length: u32,
    pub number: u32,
    pub end_block: u32,
    /// Profit handed to the next rebase.
    pub distribute: i128,
}

/// Staked tokens held back until `expiry` epoch.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WarmupClaim {
    pub deposit: i128,
    pub gons: u128,
    pub expiry: u32,
    /// Set by the recipient to refuse stakes made on their behalf.
    pub lock: bool,
}

impl WarmupClaim {
    pub fn empty() -> Self {
        WarmupClaim {
            deposit: 0,
            gons: 0,
            expiry: 0,
            lock: false,
        }
    }
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    GovToken,
    RebaseToken,
    Epoch,
    Distributor,
    WarmupPeriod,
    Warmup(Address),
}
