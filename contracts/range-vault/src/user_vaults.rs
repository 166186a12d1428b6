//! Per-holder contribution tracking.
//!
//! Every address that ever held a non-zero stake gets an entry in an
//! append-only registry together with a running `(token0, token1)`
//! contribution. Contributions are reporting data only; payouts always come
//! from the share fraction of current underlying balances.

use crate::error::VaultError;
use crate::storage::{get_user_at, get_user_count, get_user_vault, push_user, set_user_vault};
use soroban_sdk::{Address, Env, Vec};
use vault_math::{amount_to_i128, amount_to_u128, mul_div, scale_down};
use vault_types::{page_bounds, UserVault, UserVaultInfo};

fn load_or_register(env: &Env, user: &Address) -> UserVault {
    let vault = get_user_vault(env, user);
    if vault.exists {
        return vault;
    }
    push_user(env, user);
    UserVault {
        exists: true,
        token0: 0,
        token1: 0,
    }
}

/// Record a deposit of `amount0`/`amount1` backing newly minted shares
pub fn record_deposit(env: &Env, user: &Address, amount0: i128, amount1: i128) {
    let mut vault = load_or_register(env, user);
    vault.token0 += amount0;
    vault.token1 += amount1;
    set_user_vault(env, user, &vault);
}

/// Shrink a holder's contribution by the fraction of `balance` being burned
pub fn record_burn(env: &Env, user: &Address, burned: i128, balance: i128) {
    let mut vault = get_user_vault(env, user);
    if !vault.exists {
        return;
    }
    let (balance, burned) = (amount_to_u128(balance), amount_to_u128(burned));
    vault.token0 = amount_to_i128(scale_down(env, amount_to_u128(vault.token0), balance, burned));
    vault.token1 = amount_to_i128(scale_down(env, amount_to_u128(vault.token1), balance, burned));
    set_user_vault(env, user, &vault);
}

/// Move the slice of `from`'s contribution that `amount` of its `balance` represents
pub fn record_transfer(env: &Env, from: &Address, to: &Address, amount: i128, balance: i128) {
    if amount == 0 || from == to {
        return;
    }
    let mut sender = get_user_vault(env, from);
    let (amount, balance) = (amount_to_u128(amount), amount_to_u128(balance));
    let slice0 = amount_to_i128(mul_div(env, amount_to_u128(sender.token0), amount, balance));
    let slice1 = amount_to_i128(mul_div(env, amount_to_u128(sender.token1), amount, balance));

    let mut receiver = load_or_register(env, to);
    sender.token0 -= slice0;
    sender.token1 -= slice1;
    receiver.token0 += slice0;
    receiver.token1 += slice1;

    if sender.exists {
        set_user_vault(env, from, &sender);
    }
    set_user_vault(env, to, &receiver);
}

pub fn user_count(env: &Env) -> u32 {
    get_user_count(env)
}

pub fn user_at(env: &Env, index: u32) -> Option<Address> {
    get_user_at(env, index)
}

pub fn user_vault(env: &Env, user: &Address) -> UserVault {
    get_user_vault(env, user)
}

/// Inclusive page `[start, end]` of the holder registry, cut to the first
/// `MAX_PAGE_SIZE` entries; walk longer ranges with successive calls.
pub fn get_user_vaults(env: &Env, start: u32, end: u32) -> Result<Vec<UserVaultInfo>, VaultError> {
    let (from, to) = page_bounds(get_user_count(env), start, end).ok_or(VaultError::IndexOutOfRange)?;

    let mut page = Vec::new(env);
    for index in from..to {
        if let Some(user) = get_user_at(env, index) {
            let vault = get_user_vault(env, &user);
            page.push_back(UserVaultInfo {
                user,
                token0: vault.token0,
                token1: vault.token1,
            });
        }
    }
    Ok(page)
}
