use crate::error::VaultError;
use crate::events;
use crate::storage::{get_state, set_state};
use soroban_sdk::{log, Address, Env};
use vault_types::{is_zero_address, VaultState};

/// Authenticate `caller` and check it is the current manager
pub fn require_manager(env: &Env, caller: &Address) -> Result<VaultState, VaultError> {
    caller.require_auth();
    let state = get_state(env);
    if *caller != state.manager {
        return Err(VaultError::NotManager);
    }
    Ok(state)
}

pub fn require_not_paused(state: &VaultState) -> Result<(), VaultError> {
    if state.paused {
        return Err(VaultError::Paused);
    }
    Ok(())
}

pub fn pause(env: &Env, caller: &Address) -> Result<(), VaultError> {
    let mut state = require_manager(env, caller)?;
    require_not_paused(&state)?;
    state.paused = true;
    set_state(env, &state);
    events::paused(env, caller);
    Ok(())
}

pub fn unpause(env: &Env, caller: &Address) -> Result<(), VaultError> {
    let mut state = require_manager(env, caller)?;
    if !state.paused {
        return Err(VaultError::NotPaused);
    }
    state.paused = false;
    set_state(env, &state);
    events::unpaused(env, caller);
    Ok(())
}

pub fn transfer_manager(env: &Env, caller: &Address, new_manager: &Address) -> Result<(), VaultError> {
    let mut state = require_manager(env, caller)?;
    if is_zero_address(env, new_manager) {
        return Err(VaultError::ZeroManagerAddress);
    }
    state.manager = new_manager.clone();
    set_state(env, &state);
    log!(env, "manager transferred", caller.clone(), new_manager.clone());
    events::manager_transferred(env, caller, new_manager);
    Ok(())
}
