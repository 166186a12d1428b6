use crate::access::require_manager;
use crate::error::VaultError;
use crate::events;
use crate::pool::{invoke_pool_collect_fees, pool_uncollected_fees};
use crate::storage::{get_config, get_state, set_state};
use soroban_sdk::{log, token, Address, Env};
use vault_math::{amount_to_i128, amount_to_u128, fee_for};
use vault_types::{VaultConfig, VaultState, MAX_MANAGING_FEE_BPS, MAX_PERFORMANCE_FEE_BPS};

/// Collect trading fees from the active position into the vault.
///
/// The performance share is credited to the manager and the remainder stays
/// idle, growing every holder's claim. Returns the gross amounts collected.
/// Callers persist `state`.
pub fn collect_pending_fees(env: &Env, config: &VaultConfig, state: &mut VaultState) -> (i128, i128) {
    if !state.in_position {
        return (0, 0);
    }

    let (fee0, fee1) = invoke_pool_collect_fees(env, &config.pool, state.lower_tick, state.upper_tick);
    if fee0 == 0 && fee1 == 0 {
        return (0, 0);
    }

    let (fee0, fee1) = (amount_to_i128(fee0), amount_to_i128(fee1));
    let (perf0, perf1) = performance_share(env, state, fee0, fee1);
    state.manager_balance_0 += perf0;
    state.manager_balance_1 += perf1;

    log!(env, "fees collected", fee0, fee1, perf0, perf1);
    events::fees_earned(env, fee0, fee1);
    (fee0, fee1)
}

/// Manager's cut of gross trading fees
pub fn performance_share(env: &Env, state: &VaultState, fee0: i128, fee1: i128) -> (i128, i128) {
    (
        amount_to_i128(fee_for(env, amount_to_u128(fee0), state.performance_fee_bps)),
        amount_to_i128(fee_for(env, amount_to_u128(fee1), state.performance_fee_bps)),
    )
}

/// Withdrawal fee on a burn payout; credits the manager and returns the fee
pub fn charge_managing_fee(env: &Env, state: &mut VaultState, payout0: i128, payout1: i128) -> (i128, i128) {
    let fee0 = amount_to_i128(fee_for(env, amount_to_u128(payout0), state.managing_fee_bps));
    let fee1 = amount_to_i128(fee_for(env, amount_to_u128(payout1), state.managing_fee_bps));
    state.manager_balance_0 += fee0;
    state.manager_balance_1 += fee1;
    (fee0, fee1)
}

pub fn pull_fees(env: &Env, caller: &Address) -> Result<(i128, i128), VaultError> {
    let mut state = require_manager(env, caller)?;
    let config = get_config(env);
    let fees = collect_pending_fees(env, &config, &mut state);
    set_state(env, &state);
    Ok(fees)
}

/// Gross trading fees the position has accrued but not yet collected
pub fn current_fees(env: &Env) -> (i128, i128) {
    let state = get_state(env);
    if !state.in_position {
        return (0, 0);
    }
    let config = get_config(env);
    let (fee0, fee1) = pool_uncollected_fees(env, &config.pool, state.lower_tick, state.upper_tick);
    (amount_to_i128(fee0), amount_to_i128(fee1))
}

pub fn update_fees(
    env: &Env,
    caller: &Address,
    managing_fee_bps: u32,
    performance_fee_bps: u32,
) -> Result<(), VaultError> {
    let mut state = require_manager(env, caller)?;
    if managing_fee_bps > MAX_MANAGING_FEE_BPS {
        return Err(VaultError::InvalidManagingFee);
    }
    if performance_fee_bps > MAX_PERFORMANCE_FEE_BPS {
        return Err(VaultError::InvalidPerformanceFee);
    }

    // Fees accrued so far are split at the old rate
    let config = get_config(env);
    collect_pending_fees(env, &config, &mut state);

    state.managing_fee_bps = managing_fee_bps;
    state.performance_fee_bps = performance_fee_bps;
    set_state(env, &state);

    events::fees_updated(env, managing_fee_bps, performance_fee_bps);
    Ok(())
}

/// Pay out everything owed to the manager
pub fn collect_manager(env: &Env, caller: &Address) -> Result<(i128, i128), VaultError> {
    let mut state = require_manager(env, caller)?;
    let config = get_config(env);

    let amount0 = state.manager_balance_0;
    let amount1 = state.manager_balance_1;
    state.manager_balance_0 = 0;
    state.manager_balance_1 = 0;
    set_state(env, &state);

    let vault = env.current_contract_address();
    if amount0 > 0 {
        token::Client::new(env, &config.token0).transfer(&vault, caller, &amount0);
    }
    if amount1 > 0 {
        token::Client::new(env, &config.token1).transfer(&vault, caller, &amount1);
    }

    events::manager_collected(env, caller, amount0, amount1);
    Ok((amount0, amount1))
}
