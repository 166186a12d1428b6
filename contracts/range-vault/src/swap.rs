use crate::access::{require_manager, require_not_paused};
use crate::deposit::free_idle_balances;
use crate::error::VaultError;
use crate::events;
use crate::pool::invoke_pool_swap;
use crate::storage::get_config;
use soroban_sdk::{Address, Env};
use vault_math::{amount_to_i128, amount_to_u128};

/// Rebalance idle balances through the pool. Exact input only; shares and
/// the position are untouched.
pub fn swap(
    env: &Env,
    caller: &Address,
    zero_for_one: bool,
    amount_in: i128,
    sqrt_price_limit_x96: u128,
    amount_out_min: i128,
) -> Result<(i128, i128), VaultError> {
    let state = require_manager(env, caller)?;
    require_not_paused(&state)?;
    if amount_in <= 0 {
        return Err(VaultError::InvalidAmount);
    }

    let config = get_config(env);
    let (free0, free1) = free_idle_balances(env, &config, &state);
    let available = if zero_for_one { free0 } else { free1 };
    if amount_to_u128(amount_in) > available {
        return Err(VaultError::InsufficientIdleBalance);
    }

    let (used, received) = invoke_pool_swap(
        env,
        &config,
        zero_for_one,
        amount_to_u128(amount_in),
        sqrt_price_limit_x96,
    );
    let (used, received) = (amount_to_i128(used), amount_to_i128(received));
    if received < amount_out_min {
        return Err(VaultError::SlippageExceeded);
    }

    events::swapped(env, zero_for_one, used, received);
    Ok((used, received))
}
