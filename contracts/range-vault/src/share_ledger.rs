use crate::error::VaultError;
use crate::events;
use crate::storage::{
    get_allowance, get_balance, get_total_supply, set_allowance, set_balance, set_total_supply,
};
use crate::user_vaults;
use soroban_sdk::{Address, Env};
use vault_types::AllowanceValue;

/// Credit freshly minted shares backed by `amount0`/`amount1`
pub fn mint(env: &Env, to: &Address, shares: i128, amount0: i128, amount1: i128) {
    user_vaults::record_deposit(env, to, amount0, amount1);
    set_balance(env, to, get_balance(env, to) + shares);
    set_total_supply(env, get_total_supply(env) + shares);
}

pub fn burn(env: &Env, from: &Address, shares: i128) -> Result<(), VaultError> {
    let balance = get_balance(env, from);
    if shares > balance {
        return Err(VaultError::InsufficientBalance);
    }
    user_vaults::record_burn(env, from, shares, balance);
    set_balance(env, from, balance - shares);
    set_total_supply(env, get_total_supply(env) - shares);
    Ok(())
}

pub fn transfer(env: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), VaultError> {
    if amount < 0 {
        return Err(VaultError::InvalidAmount);
    }
    let from_balance = get_balance(env, from);
    if amount > from_balance {
        return Err(VaultError::InsufficientBalance);
    }

    if from != to && amount > 0 {
        user_vaults::record_transfer(env, from, to, amount, from_balance);
        set_balance(env, from, from_balance - amount);
        set_balance(env, to, get_balance(env, to) + amount);
    }

    events::transfer(env, from, to, amount);
    Ok(())
}

pub fn approve(
    env: &Env,
    from: &Address,
    spender: &Address,
    amount: i128,
    expiration_ledger: u32,
) -> Result<(), VaultError> {
    if amount < 0 {
        return Err(VaultError::InvalidAmount);
    }
    if amount > 0 && expiration_ledger < env.ledger().sequence() {
        return Err(VaultError::InvalidAmount);
    }
    set_allowance(
        env,
        from,
        spender,
        &AllowanceValue {
            amount,
            expiration_ledger,
        },
    );
    events::approve(env, from, spender, amount, expiration_ledger);
    Ok(())
}

pub fn spend_allowance(env: &Env, from: &Address, spender: &Address, amount: i128) -> Result<(), VaultError> {
    let mut allowance = get_allowance(env, from, spender);
    if allowance.amount < amount {
        return Err(VaultError::InsufficientAllowance);
    }
    if amount > 0 {
        allowance.amount -= amount;
        set_allowance(env, from, spender, &allowance);
    }
    Ok(())
}

pub fn balance(env: &Env, holder: &Address) -> i128 {
    get_balance(env, holder)
}

pub fn total_supply(env: &Env) -> i128 {
    get_total_supply(env)
}

pub fn allowance(env: &Env, from: &Address, spender: &Address) -> i128 {
    get_allowance(env, from, spender).amount
}
