#![no_std]

use soroban_sdk::contracterror;

/// @title  ErrorCategory
/// @notice Groups errors by the contract domain that raises them.
/// @dev    Off-chain consumers should switch on this value first, then on the
///         specific `ContractError` code for fine-grained handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Contract setup and initialization errors (codes 1-99).
    Initialization,
    /// Caller identity and capability errors (codes 100-199).
    Authorization,
    /// Malformed arguments (codes 200-299).
    Validation,
    /// Bond issuance and redemption errors (codes 300-399).
    Bond,
    /// Reserve and debt ledger errors (codes 400-499).
    Treasury,
    /// Price observation errors (codes 500-599).
    Oracle,
    /// Staked-token ledger and warmup errors (codes 600-699).
    Staking,
    /// Safe-math errors (codes 700-799).
    Arithmetic,
    /// Execution guard errors (codes 800-899).
    Guard,
}

/// How a caller is expected to react to an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    /// Bad input; fix the arguments and resubmit.
    InputValidation,
    /// A market or capacity limit was hit. Expected, not a bug.
    EconomicLimit,
    /// The caller lacks a role, allocation or ownership.
    Authorization,
    /// An internal invariant would have been violated.
    InvariantProtection,
}

/// @title  ContractError
/// @notice Canonical error enum shared by all reserve protocol contracts.
/// @dev    Codes are wire-stable. Never renumber a variant after deployment.
///         Append new variants at the end of their category block only.
///
/// Error Code Layout:
///   1  -  99  : Initialization
///   100 - 199 : Authorization
///   200 - 299 : Validation
///   300 - 399 : Bond
///   400 - 499 : Treasury
///   500 - 599 : Oracle
///   600 - 699 : Staking
///   700 - 799 : Arithmetic
///   800 - 899 : Guard
#[contracterror]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    // --- Initialization (1-99) ---
    /// Contract has not been initialized yet.
    /// Contracts: all
    NotInitialized = 1,

    /// Contract has already been initialized and cannot be re-initialized.
    /// Contracts: all
    AlreadyInitialized = 2,

    // --- Authorization (100-199) ---
    /// Caller is not the admin.
    /// Contracts: all
    NotAdmin = 100,

    /// Caller lacks the depositor role matching the asset kind.
    /// Contracts: treasury
    UnauthorizedDepositor = 101,

    /// Caller is not a reserve manager.
    /// Contracts: treasury
    UnauthorizedManager = 102,

    /// Caller is not a reserve spender.
    /// Contracts: treasury
    UnauthorizedSpender = 103,

    /// Caller is not a reward manager.
    /// Contracts: treasury
    UnauthorizedRewardManager = 104,

    /// Minter's remaining allocation is below the requested mint.
    /// Contracts: treasury
    InsufficientAllocation = 105,

    /// Recipient has locked third-party deposits into warmup.
    /// Contracts: staking
    DepositsLocked = 106,

    // --- Validation (200-299) ---
    /// Amount argument must be strictly positive.
    /// Contracts: all
    InvalidAmount = 200,

    /// Configuration value is outside its permitted range.
    /// Contracts: oracle, treasury, bond, rebase token, staking, distributor
    InvalidParameter = 201,

    /// Asset is not the principal this bond engine accepts.
    /// Contracts: bond
    UnsupportedAsset = 202,

    // --- Bond (300-399) ---
    /// Issuing this payout would exceed the debt ceiling.
    /// Contracts: bond
    BondSoldOut = 300,

    /// Discounted price is above the depositor's maximum.
    /// Contracts: bond
    SlippageExceeded = 301,

    /// Payout is below the dust minimum.
    /// Contracts: bond
    BondTooSmall = 302,

    /// Payout is above the per-bond maximum.
    /// Contracts: bond
    BondTooLarge = 303,

    /// No open bond exists for the depositor.
    /// Contracts: bond
    BondNotFound = 304,

    /// Stake-on-redeem requested but no staking pool is configured.
    /// Contracts: bond
    StakingNotSet = 305,

    // --- Treasury (400-499) ---
    /// Asset is not registered or has been delisted.
    /// Contracts: treasury
    AssetNotAccepted = 400,

    /// Request exceeds the reserves available to cover it.
    /// Contracts: treasury
    InsufficientReserves = 401,

    /// Repayment exceeds the outstanding debt.
    /// Contracts: treasury
    InsufficientDebt = 402,

    // --- Oracle (500-599) ---
    /// Price is zero or otherwise unusable.
    /// Contracts: oracle, bond
    InvalidPrice = 500,

    /// The pool's cumulative price moved backwards.
    /// Contracts: oracle
    CumulativeRegressed = 501,

    // --- Staking (600-699) ---
    /// Displayed balance is below the requested amount.
    /// Contracts: rebase token
    InsufficientBalance = 600,

    /// Allowance is below the requested amount.
    /// Contracts: rebase token
    InsufficientAllowance = 601,

    /// No warmup claim exists for the address.
    /// Contracts: staking
    NoWarmupClaim = 602,

    /// Warmup bucket holds fewer units than requested.
    /// Contracts: rebase token
    InsufficientWarmup = 603,

    // --- Arithmetic (700-799) ---
    /// Integer overflow detected during a checked arithmetic operation.
    Overflow = 700,

    /// Integer underflow detected during a checked arithmetic operation.
    Underflow = 701,

    /// Division by zero detected during a checked arithmetic operation.
    DivisionByZero = 702,

    // --- Guard (800-899) ---
    /// Reentrancy was detected; the call is rejected.
    /// Contracts: bond, staking
    ReentrancyDetected = 800,
}

/// @title  ErrorExt
/// @notice Provides category(), class() and description() on every ContractError variant.
pub trait ErrorExt {
    /// @return The ErrorCategory bucket this error belongs to.
    fn category(&self) -> ErrorCategory;

    /// @return How the caller should treat the failure.
    fn class(&self) -> ErrorClass;

    /// @return A static string description safe for logging or display.
    fn description(&self) -> &'static str;
}

impl ErrorExt for ContractError {
    fn category(&self) -> ErrorCategory {
        match *self as u32 {
            1..=99 => ErrorCategory::Initialization,
            100..=199 => ErrorCategory::Authorization,
            200..=299 => ErrorCategory::Validation,
            300..=399 => ErrorCategory::Bond,
            400..=499 => ErrorCategory::Treasury,
            500..=599 => ErrorCategory::Oracle,
            600..=699 => ErrorCategory::Staking,
            700..=799 => ErrorCategory::Arithmetic,
            _ => ErrorCategory::Guard,
        }
    }

    fn class(&self) -> ErrorClass {
        match self {
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::InvalidAmount
            | ContractError::InvalidParameter
            | ContractError::UnsupportedAsset
            | ContractError::BondNotFound
            | ContractError::StakingNotSet
            | ContractError::AssetNotAccepted
            | ContractError::NoWarmupClaim => ErrorClass::InputValidation,

            ContractError::BondSoldOut
            | ContractError::SlippageExceeded
            | ContractError::BondTooSmall
            | ContractError::BondTooLarge
            | ContractError::InsufficientReserves
            | ContractError::InsufficientDebt
            | ContractError::InvalidPrice
            | ContractError::CumulativeRegressed
            | ContractError::InsufficientBalance
            | ContractError::InsufficientAllowance => ErrorClass::EconomicLimit,

            ContractError::NotAdmin
            | ContractError::UnauthorizedDepositor
            | ContractError::UnauthorizedManager
            | ContractError::UnauthorizedSpender
            | ContractError::UnauthorizedRewardManager
            | ContractError::InsufficientAllocation
            | ContractError::DepositsLocked => ErrorClass::Authorization,

            ContractError::InsufficientWarmup
            | ContractError::Overflow
            | ContractError::Underflow
            | ContractError::DivisionByZero
            | ContractError::ReentrancyDetected => ErrorClass::InvariantProtection,
        }
    }

    fn description(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Contract has already been initialized",
            ContractError::NotAdmin => "Caller is not the admin",
            ContractError::UnauthorizedDepositor => {
                "Caller lacks the depositor role for this asset kind"
            }
            ContractError::UnauthorizedManager => "Caller is not a reserve manager",
            ContractError::UnauthorizedSpender => "Caller is not a reserve spender",
            ContractError::UnauthorizedRewardManager => "Caller is not a reward manager",
            ContractError::InsufficientAllocation => "Mint exceeds the remaining allocation",
            ContractError::DepositsLocked => "Recipient has locked warmup deposits",
            ContractError::InvalidAmount => "Amount must be strictly positive (> 0)",
            ContractError::InvalidParameter => "Parameter is outside its permitted range",
            ContractError::UnsupportedAsset => "Asset is not accepted by this bond",
            ContractError::BondSoldOut => "Payout would exceed the debt ceiling",
            ContractError::SlippageExceeded => "Bond price is above the accepted maximum",
            ContractError::BondTooSmall => "Payout is below the dust minimum",
            ContractError::BondTooLarge => "Payout is above the per-bond maximum",
            ContractError::BondNotFound => "No open bond for the depositor",
            ContractError::StakingNotSet => "No staking pool configured",
            ContractError::AssetNotAccepted => "Asset is not accepted by the treasury",
            ContractError::InsufficientReserves => "Insufficient reserves for the request",
            ContractError::InsufficientDebt => "Repayment exceeds outstanding debt",
            ContractError::InvalidPrice => "Price is zero or unusable",
            ContractError::CumulativeRegressed => "Cumulative price moved backwards",
            ContractError::InsufficientBalance => "Balance is below the requested amount",
            ContractError::InsufficientAllowance => "Allowance is below the requested amount",
            ContractError::NoWarmupClaim => "No warmup claim for the address",
            ContractError::InsufficientWarmup => "Warmup bucket holds too few units",
            ContractError::Overflow => "Integer overflow in checked arithmetic",
            ContractError::Underflow => "Integer underflow in checked arithmetic",
            ContractError::DivisionByZero => "Division by zero in checked arithmetic",
            ContractError::ReentrancyDetected => "Reentrancy detected; call rejected",
        }
    }
}
