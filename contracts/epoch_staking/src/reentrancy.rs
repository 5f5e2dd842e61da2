use reserve_errors::ContractError;
use soroban_sdk::{Env, Symbol};

fn lock_key(e: &Env) -> Symbol {
    Symbol::new(e, "lock")
}

pub fn check_lock(e: &Env) -> bool {
    e.storage().instance().get(&lock_key(e)).unwrap_or(false)
}

pub fn acquire_lock(e: &Env) -> Result<(), ContractError> {
    if check_lock(e) {
        return Err(ContractError::ReentrancyDetected);
    }
    e.storage().instance().set(&lock_key(e), &true);
    Ok(())
}

pub fn release_lock(e: &Env) {
    e.storage().instance().set(&lock_key(e), &false);
}

/// Run `f` holding the lock. An error discards the whole invocation, so the
/// lock only needs releasing on success.
pub fn guarded<T>(e: &Env, f: impl FnOnce() -> Result<T, ContractError>) -> Result<T, ContractError> {
    acquire_lock(e)?;
    let out = f()?;
    release_lock(e);
    Ok(out)
}
