use crate::access::{require_manager, require_not_paused};
use crate::error::VaultError;
use crate::events;
use crate::fees::collect_pending_fees;
use crate::storage::{get_config, set_state};
use soroban_sdk::{log, Address, Env};
use vault_types::{VaultState, MAX_TICK, MIN_TICK};

/// Check a candidate range against the pool's tick domain and spacing.
/// Bounds are checked before spacing, and spacing before ordering.
pub fn validate_ticks(tick_lower: i32, tick_upper: i32, tick_spacing: i32) -> Result<(), VaultError> {
    if tick_lower < MIN_TICK || tick_upper > MAX_TICK || tick_lower > MAX_TICK || tick_upper < MIN_TICK {
        return Err(VaultError::TicksOutOfRange);
    }
    if tick_lower % tick_spacing != 0 || tick_upper % tick_spacing != 0 {
        return Err(VaultError::InvalidTickSpacing);
    }
    if tick_lower >= tick_upper {
        return Err(VaultError::InvalidTickOrder);
    }
    Ok(())
}

/// Store new bounds and open minting if this is the first range
pub fn apply_range(env: &Env, state: &mut VaultState, tick_lower: i32, tick_upper: i32) {
    state.lower_tick = tick_lower;
    state.upper_tick = tick_upper;
    if !state.mint_started {
        state.mint_started = true;
        events::mint_started(env);
    }
    events::range_set(env, tick_lower, tick_upper);
}

/// Manager entry point: choose the range future liquidity will be supplied to
pub fn set_range(env: &Env, caller: &Address, tick_lower: i32, tick_upper: i32) -> Result<(), VaultError> {
    let mut state = require_manager(env, caller)?;
    require_not_paused(&state)?;
    if state.in_position {
        return Err(VaultError::PositionActive);
    }

    let config = get_config(env);
    validate_ticks(tick_lower, tick_upper, config.tick_spacing)?;

    collect_pending_fees(env, &config, &mut state);
    apply_range(env, &mut state, tick_lower, tick_upper);
    set_state(env, &state);

    log!(env, "range set", tick_lower, tick_upper);
    Ok(())
}
