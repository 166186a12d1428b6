#![no_std]

mod access;
mod deposit;
mod error;
mod events;
mod fees;
mod liquidity;
mod pool;
mod position;
mod share_ledger;
mod storage;
mod swap;
mod user_vaults;

#[cfg(test)]
mod testutils;

pub use error::VaultError;

use soroban_sdk::{contract, contractimpl, log, Address, BytesN, Env, String, Vec};
use storage::{get_config, get_metadata, get_state, is_initialized, set_config, set_metadata, set_state};
use vault_types::{
    is_zero_address, TokenMetadata, UserVault, UserVaultInfo, VaultConfig, VaultInitParams,
    VaultState, SHARE_DECIMALS,
};

#[contract]
pub struct RangeVault;

#[contractimpl]
impl RangeVault {
    /// One-shot setup, called by the factory right after deployment.
    /// Tokens and tick spacing are read from the pool.
    pub fn initialize(
        env: Env,
        factory: Address,
        pool: Address,
        params: VaultInitParams,
    ) -> Result<(), VaultError> {
        if is_initialized(&env) {
            return Err(VaultError::AlreadyInitialized);
        }
        if is_zero_address(&env, &params.manager) {
            return Err(VaultError::ZeroManagerAddress);
        }
        factory.require_auth();

        let config = VaultConfig {
            factory,
            token0: pool::pool_token0(&env, &pool),
            token1: pool::pool_token1(&env, &pool),
            tick_spacing: pool::pool_tick_spacing(&env, &pool),
            pool,
        };
        set_config(&env, &config);
        set_state(&env, &VaultState::new(params.manager));
        set_metadata(
            &env,
            &TokenMetadata {
                name: params.name,
                symbol: params.symbol,
                decimals: SHARE_DECIMALS,
            },
        );
        Ok(())
    }

    /// Replace the vault code, keeping its address and storage.
    /// Only the factory that deployed the vault may do this.
    pub fn upgrade(env: Env, new_wasm_hash: BytesN<32>) -> Result<u32, VaultError> {
        let config = get_config(&env);
        config.factory.require_auth();

        env.deployer()
            .update_current_contract_wasm(new_wasm_hash.clone());

        let mut state = get_state(&env);
        state.version += 1;
        set_state(&env, &state);

        log!(&env, "vault upgraded", state.version);
        events::upgraded(&env, &new_wasm_hash, state.version);
        Ok(state.version)
    }

    // === Range and position ===

    /// Set the range that minting and the next `add_liquidity` use
    pub fn set_range(env: Env, caller: Address, tick_lower: i32, tick_upper: i32) -> Result<(), VaultError> {
        position::set_range(&env, &caller, tick_lower, tick_upper)
    }

    /// Supply idle tokens to `[tick_lower, tick_upper)`
    ///
    /// # Returns
    /// Liquidity minted in the pool
    pub fn add_liquidity(
        env: Env,
        caller: Address,
        tick_lower: i32,
        tick_upper: i32,
        amount0: i128,
        amount1: i128,
        amount0_min: i128,
        amount1_min: i128,
    ) -> Result<u128, VaultError> {
        liquidity::add_liquidity(
            &env,
            &caller,
            tick_lower,
            tick_upper,
            amount0,
            amount1,
            amount0_min,
            amount1_min,
        )
    }

    /// Withdraw the full position
    ///
    /// # Returns
    /// (amount0, amount1) - Principal returned by the pool
    pub fn remove_liquidity(
        env: Env,
        caller: Address,
        amount0_min: i128,
        amount1_min: i128,
    ) -> Result<(i128, i128), VaultError> {
        liquidity::remove_liquidity(&env, &caller, amount0_min, amount1_min)
    }

    /// Swap idle tokens through the pool (exact input)
    ///
    /// # Returns
    /// (amount_in, amount_out)
    pub fn swap(
        env: Env,
        caller: Address,
        zero_for_one: bool,
        amount_in: i128,
        sqrt_price_limit_x96: u128,
        amount_out_min: i128,
    ) -> Result<(i128, i128), VaultError> {
        swap::swap(
            &env,
            &caller,
            zero_for_one,
            amount_in,
            sqrt_price_limit_x96,
            amount_out_min,
        )
    }

    // === Deposits ===

    /// Quote a deposit of at most `amount0_max`/`amount1_max`
    ///
    /// # Returns
    /// (shares, amount0, amount1)
    pub fn get_mint_amounts(
        env: Env,
        amount0_max: i128,
        amount1_max: i128,
    ) -> Result<(i128, i128, i128), VaultError> {
        deposit::get_mint_amounts(&env, amount0_max, amount1_max)
    }

    /// Mint `shares`, paying no more than the given maxima
    ///
    /// # Returns
    /// (amount0, amount1) - Tokens pulled from `user`
    pub fn mint(
        env: Env,
        user: Address,
        shares: i128,
        amount0_max: i128,
        amount1_max: i128,
    ) -> Result<(i128, i128), VaultError> {
        deposit::mint(&env, &user, shares, amount0_max, amount1_max)
    }

    /// Burn `shares` for a pro-rata slice of the vault, net of the managing fee
    ///
    /// # Returns
    /// (amount0, amount1) - Tokens sent to `user`
    pub fn burn(
        env: Env,
        user: Address,
        shares: i128,
        amount0_min: i128,
        amount1_min: i128,
    ) -> Result<(i128, i128), VaultError> {
        deposit::burn(&env, &user, shares, amount0_min, amount1_min)
    }

    pub fn get_underlying_balances(env: Env) -> (i128, i128) {
        deposit::get_underlying_balances(&env)
    }

    pub fn get_underlying_balances_by_share(env: Env, shares: i128) -> Result<(i128, i128), VaultError> {
        deposit::get_underlying_balances_by_share(&env, shares)
    }

    // === Fees ===

    pub fn pull_fees(env: Env, caller: Address) -> Result<(i128, i128), VaultError> {
        fees::pull_fees(&env, &caller)
    }

    pub fn get_current_fees(env: Env) -> (i128, i128) {
        fees::current_fees(&env)
    }

    pub fn update_fees(
        env: Env,
        caller: Address,
        managing_fee_bps: u32,
        performance_fee_bps: u32,
    ) -> Result<(), VaultError> {
        fees::update_fees(&env, &caller, managing_fee_bps, performance_fee_bps)
    }

    pub fn collect_manager(env: Env, caller: Address) -> Result<(i128, i128), VaultError> {
        fees::collect_manager(&env, &caller)
    }

    // === Manager controls ===

    pub fn pause(env: Env, caller: Address) -> Result<(), VaultError> {
        access::pause(&env, &caller)
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), VaultError> {
        access::unpause(&env, &caller)
    }

    pub fn transfer_manager(env: Env, caller: Address, new_manager: Address) -> Result<(), VaultError> {
        access::transfer_manager(&env, &caller, &new_manager)
    }

    // === Share token ===

    pub fn balance(env: Env, id: Address) -> i128 {
        share_ledger::balance(&env, &id)
    }

    pub fn total_supply(env: Env) -> i128 {
        share_ledger::total_supply(&env)
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), VaultError> {
        from.require_auth();
        share_ledger::transfer(&env, &from, &to, amount)
    }

    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), VaultError> {
        spender.require_auth();
        if amount < 0 {
            return Err(VaultError::InvalidAmount);
        }
        share_ledger::spend_allowance(&env, &from, &spender, amount)?;
        share_ledger::transfer(&env, &from, &to, amount)
    }

    pub fn approve(
        env: Env,
        from: Address,
        spender: Address,
        amount: i128,
        expiration_ledger: u32,
    ) -> Result<(), VaultError> {
        from.require_auth();
        share_ledger::approve(&env, &from, &spender, amount, expiration_ledger)
    }

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        share_ledger::allowance(&env, &from, &spender)
    }

    pub fn name(env: Env) -> String {
        get_metadata(&env).name
    }

    pub fn symbol(env: Env) -> String {
        get_metadata(&env).symbol
    }

    pub fn decimals(env: Env) -> u32 {
        get_metadata(&env).decimals
    }

    // === Holder registry ===

    pub fn user_count(env: Env) -> u32 {
        user_vaults::user_count(&env)
    }

    pub fn users(env: Env, index: u32) -> Option<Address> {
        user_vaults::user_at(&env, index)
    }

    pub fn user_vault(env: Env, user: Address) -> UserVault {
        user_vaults::user_vault(&env, &user)
    }

    /// Inclusive page `[start, end]` of holders and their contributions.
    /// At most 50 entries are returned per call; page through larger ranges.
    pub fn get_user_vaults(env: Env, start: u32, end: u32) -> Result<Vec<UserVaultInfo>, VaultError> {
        user_vaults::get_user_vaults(&env, start, end)
    }

    // === View Functions ===

    pub fn get_config(env: Env) -> VaultConfig {
        get_config(&env)
    }

    pub fn get_state(env: Env) -> VaultState {
        get_state(&env)
    }

    pub fn manager(env: Env) -> Address {
        get_state(&env).manager
    }

    pub fn version(env: Env) -> u32 {
        get_state(&env).version
    }
}
