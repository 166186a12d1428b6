use crate::access::{require_manager, require_not_paused};
use crate::deposit::free_idle_balances;
use crate::error::VaultError;
use crate::events;
use crate::fees::collect_pending_fees;
use crate::pool::{invoke_pool_add_liquidity, invoke_pool_remove_liquidity, pool_position_liquidity};
use crate::position::{apply_range, validate_ticks};
use crate::storage::{get_config, set_state};
use soroban_sdk::{log, Address, Env};
use vault_math::{amount_to_i128, amount_to_u128};

/// Supply idle tokens to a new range and enter the position
pub fn add_liquidity(
    env: &Env,
    caller: &Address,
    tick_lower: i32,
    tick_upper: i32,
    amount0: i128,
    amount1: i128,
    amount0_min: i128,
    amount1_min: i128,
) -> Result<u128, VaultError> {
    let mut state = require_manager(env, caller)?;
    require_not_paused(&state)?;
    if state.in_position {
        return Err(VaultError::LiquidityAlreadyAdded);
    }

    let config = get_config(env);
    validate_ticks(tick_lower, tick_upper, config.tick_spacing)?;

    if amount0 < 0 || amount1 < 0 || (amount0 == 0 && amount1 == 0) {
        return Err(VaultError::InvalidAmount);
    }
    let (free0, free1) = free_idle_balances(env, &config, &state);
    let (amount0, amount1) = (amount_to_u128(amount0), amount_to_u128(amount1));
    if amount0 > free0 || amount1 > free1 {
        return Err(VaultError::InsufficientIdleBalance);
    }

    let (liquidity, used0, used1) =
        invoke_pool_add_liquidity(env, &config, tick_lower, tick_upper, amount0, amount1);
    let (used0, used1) = (amount_to_i128(used0), amount_to_i128(used1));
    if used0 < amount0_min || used1 < amount1_min {
        return Err(VaultError::SlippageExceeded);
    }

    apply_range(env, &mut state, tick_lower, tick_upper);
    state.in_position = true;
    set_state(env, &state);

    log!(env, "position entered", liquidity, tick_lower, tick_upper);
    events::liquidity_added(env, liquidity, tick_lower, tick_upper, used0, used1);
    events::position_status(env, true);
    Ok(liquidity)
}

/// Withdraw the whole position back into idle balances
pub fn remove_liquidity(
    env: &Env,
    caller: &Address,
    amount0_min: i128,
    amount1_min: i128,
) -> Result<(i128, i128), VaultError> {
    let mut state = require_manager(env, caller)?;
    require_not_paused(&state)?;
    if !state.in_position {
        return Err(VaultError::NotInPosition);
    }

    let config = get_config(env);
    collect_pending_fees(env, &config, &mut state);

    let liquidity = pool_position_liquidity(env, &config.pool, state.lower_tick, state.upper_tick);
    let (amount0, amount1) = if liquidity > 0 {
        invoke_pool_remove_liquidity(env, &config.pool, state.lower_tick, state.upper_tick, liquidity)
    } else {
        (0, 0)
    };
    let (amount0, amount1) = (amount_to_i128(amount0), amount_to_i128(amount1));
    if amount0 < amount0_min || amount1 < amount1_min {
        return Err(VaultError::SlippageExceeded);
    }

    state.in_position = false;
    state.clear_range();
    set_state(env, &state);

    log!(env, "position left", liquidity, amount0, amount1);
    events::position_status(env, false);
    events::liquidity_removed(env, liquidity, amount0, amount1);
    Ok((amount0, amount1))
}
