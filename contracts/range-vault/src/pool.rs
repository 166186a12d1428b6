use soroban_sdk::{token, Address, Env, IntoVal, Symbol};
use vault_types::VaultConfig;

// Calls into the AMM pool. The pool takes tokens on a prepaid basis: the
// vault transfers the maximum it is willing to spend, and the pool refunds
// whatever it did not use to the position owner.

pub fn pool_token0(env: &Env, pool: &Address) -> Address {
    env.invoke_contract(pool, &Symbol::new(env, "token0"), ().into_val(env))
}

pub fn pool_token1(env: &Env, pool: &Address) -> Address {
    env.invoke_contract(pool, &Symbol::new(env, "token1"), ().into_val(env))
}

pub fn pool_tick_spacing(env: &Env, pool: &Address) -> i32 {
    env.invoke_contract(pool, &Symbol::new(env, "tick_spacing"), ().into_val(env))
}

pub fn pool_sqrt_price(env: &Env, pool: &Address) -> u128 {
    env.invoke_contract(pool, &Symbol::new(env, "sqrt_price_x96"), ().into_val(env))
}

/// Principal plus uncollected fees of the vault's position
pub fn pool_underlying_balances(
    env: &Env,
    pool: &Address,
    tick_lower: i32,
    tick_upper: i32,
) -> (u128, u128) {
    env.invoke_contract(
        pool,
        &Symbol::new(env, "underlying_balances"),
        (env.current_contract_address(), tick_lower, tick_upper).into_val(env),
    )
}

pub fn pool_uncollected_fees(
    env: &Env,
    pool: &Address,
    tick_lower: i32,
    tick_upper: i32,
) -> (u128, u128) {
    env.invoke_contract(
        pool,
        &Symbol::new(env, "uncollected_fees"),
        (env.current_contract_address(), tick_lower, tick_upper).into_val(env),
    )
}

pub fn pool_position_liquidity(env: &Env, pool: &Address, tick_lower: i32, tick_upper: i32) -> u128 {
    env.invoke_contract(
        pool,
        &Symbol::new(env, "position_liquidity"),
        (env.current_contract_address(), tick_lower, tick_upper).into_val(env),
    )
}

/// Supply up to `amount0`/`amount1` to the range; returns (liquidity, used0, used1)
pub fn invoke_pool_add_liquidity(
    env: &Env,
    config: &VaultConfig,
    tick_lower: i32,
    tick_upper: i32,
    amount0: u128,
    amount1: u128,
) -> (u128, u128, u128) {
    let vault = env.current_contract_address();
    prepay(env, &config.token0, &config.pool, amount0);
    prepay(env, &config.token1, &config.pool, amount1);

    env.invoke_contract(
        &config.pool,
        &Symbol::new(env, "add_liquidity"),
        (vault, tick_lower, tick_upper, amount0, amount1).into_val(env),
    )
}

pub fn invoke_pool_remove_liquidity(
    env: &Env,
    pool: &Address,
    tick_lower: i32,
    tick_upper: i32,
    liquidity: u128,
) -> (u128, u128) {
    env.invoke_contract(
        pool,
        &Symbol::new(env, "remove_liquidity"),
        (env.current_contract_address(), tick_lower, tick_upper, liquidity).into_val(env),
    )
}

pub fn invoke_pool_collect_fees(env: &Env, pool: &Address, tick_lower: i32, tick_upper: i32) -> (u128, u128) {
    env.invoke_contract(
        pool,
        &Symbol::new(env, "collect_fees"),
        (env.current_contract_address(), tick_lower, tick_upper).into_val(env),
    )
}

/// Exact-input swap; returns (amount_in, amount_out)
pub fn invoke_pool_swap(
    env: &Env,
    config: &VaultConfig,
    zero_for_one: bool,
    amount_in: u128,
    sqrt_price_limit_x96: u128,
) -> (u128, u128) {
    let token_in = if zero_for_one { &config.token0 } else { &config.token1 };
    prepay(env, token_in, &config.pool, amount_in);

    env.invoke_contract(
        &config.pool,
        &Symbol::new(env, "swap"),
        (
            env.current_contract_address(),
            zero_for_one,
            amount_in,
            sqrt_price_limit_x96,
        )
            .into_val(env),
    )
}

fn prepay(env: &Env, token: &Address, pool: &Address, amount: u128) {
    if amount > 0 {
        token::Client::new(env, token).transfer(
            &env.current_contract_address(),
            pool,
            &vault_math::amount_to_i128(amount),
        );
    }
}

/// Token balance held by the vault itself
pub fn idle_balance(env: &Env, token: &Address) -> u128 {
    let balance = token::Client::new(env, token).balance(&env.current_contract_address());
    vault_math::amount_to_u128(balance)
}

/// Sqrt prices at the range bounds
pub fn range_sqrt_ratios(env: &Env, tick_lower: i32, tick_upper: i32) -> (u128, u128) {
    (
        vault_math::get_sqrt_ratio_at_tick(env, tick_lower),
        vault_math::get_sqrt_ratio_at_tick(env, tick_upper),
    )
}
