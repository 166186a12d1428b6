//! Deterministic stand-in for the AMM pool: fixed price (until moved by the
//! test), positions valued with the same liquidity math the vault uses, and
//! fees that only appear when a test accrues them.

use soroban_sdk::{contract, contractimpl, contracttype, token, Address, Env};
use vault_math::{get_amounts_for_liquidity, get_liquidity_for_amounts, get_sqrt_ratio_at_tick, mul_div};
use vault_types::Q96;

#[contracttype]
#[derive(Clone)]
enum MockKey {
    Token0,
    Token1,
    TickSpacing,
    SqrtPrice,
    Liquidity(Address, i32, i32),
    Fees(Address, i32, i32),
}

#[contract]
pub struct MockPool;

fn read<V: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>>(env: &Env, key: &MockKey) -> V {
    match env.storage().instance().get(key) {
        Some(value) => value,
        None => panic!("mock pool not initialized"),
    }
}

fn position_amounts(env: &Env, liquidity: u128, tick_lower: i32, tick_upper: i32) -> (u128, u128) {
    let price: u128 = read(env, &MockKey::SqrtPrice);
    get_amounts_for_liquidity(
        env,
        price,
        get_sqrt_ratio_at_tick(env, tick_lower),
        get_sqrt_ratio_at_tick(env, tick_upper),
        liquidity,
    )
}

fn pay(env: &Env, token: &Address, to: &Address, amount: u128) {
    if amount > 0 {
        token::Client::new(env, token).transfer(&env.current_contract_address(), to, &(amount as i128));
    }
}

#[contractimpl]
impl MockPool {
    pub fn init(env: Env, token0: Address, token1: Address, tick_spacing: i32, sqrt_price_x96: u128) {
        env.storage().instance().set(&MockKey::Token0, &token0);
        env.storage().instance().set(&MockKey::Token1, &token1);
        env.storage().instance().set(&MockKey::TickSpacing, &tick_spacing);
        env.storage().instance().set(&MockKey::SqrtPrice, &sqrt_price_x96);
    }

    /// Simulate other traders moving the price
    pub fn set_sqrt_price(env: Env, sqrt_price_x96: u128) {
        env.storage().instance().set(&MockKey::SqrtPrice, &sqrt_price_x96);
    }

    /// Simulate trading fees earned by a position (tokens must be minted to the pool separately)
    pub fn accrue_fees(env: Env, owner: Address, tick_lower: i32, tick_upper: i32, fee0: u128, fee1: u128) {
        let key = MockKey::Fees(owner, tick_lower, tick_upper);
        let (owed0, owed1): (u128, u128) = env.storage().instance().get(&key).unwrap_or((0, 0));
        env.storage().instance().set(&key, &(owed0 + fee0, owed1 + fee1));
    }

    pub fn token0(env: Env) -> Address {
        read(&env, &MockKey::Token0)
    }

    pub fn token1(env: Env) -> Address {
        read(&env, &MockKey::Token1)
    }

    pub fn tick_spacing(env: Env) -> i32 {
        read(&env, &MockKey::TickSpacing)
    }

    pub fn sqrt_price_x96(env: Env) -> u128 {
        read(&env, &MockKey::SqrtPrice)
    }

    pub fn position_liquidity(env: Env, owner: Address, tick_lower: i32, tick_upper: i32) -> u128 {
        env.storage()
            .instance()
            .get(&MockKey::Liquidity(owner, tick_lower, tick_upper))
            .unwrap_or(0)
    }

    pub fn uncollected_fees(env: Env, owner: Address, tick_lower: i32, tick_upper: i32) -> (u128, u128) {
        env.storage()
            .instance()
            .get(&MockKey::Fees(owner, tick_lower, tick_upper))
            .unwrap_or((0, 0))
    }

    pub fn underlying_balances(env: Env, owner: Address, tick_lower: i32, tick_upper: i32) -> (u128, u128) {
        let liquidity = Self::position_liquidity(env.clone(), owner.clone(), tick_lower, tick_upper);
        let (amount0, amount1) = position_amounts(&env, liquidity, tick_lower, tick_upper);
        let (fee0, fee1) = Self::uncollected_fees(env, owner, tick_lower, tick_upper);
        (amount0 + fee0, amount1 + fee1)
    }

    pub fn add_liquidity(
        env: Env,
        owner: Address,
        tick_lower: i32,
        tick_upper: i32,
        amount0_max: u128,
        amount1_max: u128,
    ) -> (u128, u128, u128) {
        let price: u128 = read(&env, &MockKey::SqrtPrice);
        let liquidity = get_liquidity_for_amounts(
            &env,
            price,
            get_sqrt_ratio_at_tick(&env, tick_lower),
            get_sqrt_ratio_at_tick(&env, tick_upper),
            amount0_max,
            amount1_max,
        );
        let (used0, used1) = position_amounts(&env, liquidity, tick_lower, tick_upper);

        let key = MockKey::Liquidity(owner.clone(), tick_lower, tick_upper);
        let current: u128 = env.storage().instance().get(&key).unwrap_or(0);
        env.storage().instance().set(&key, &(current + liquidity));

        pay(&env, &read(&env, &MockKey::Token0), &owner, amount0_max - used0);
        pay(&env, &read(&env, &MockKey::Token1), &owner, amount1_max - used1);
        (liquidity, used0, used1)
    }

    pub fn remove_liquidity(
        env: Env,
        owner: Address,
        tick_lower: i32,
        tick_upper: i32,
        liquidity: u128,
    ) -> (u128, u128) {
        let key = MockKey::Liquidity(owner.clone(), tick_lower, tick_upper);
        let current: u128 = env.storage().instance().get(&key).unwrap_or(0);
        if liquidity > current {
            panic!("insufficient position liquidity");
        }
        env.storage().instance().set(&key, &(current - liquidity));

        let (amount0, amount1) = position_amounts(&env, liquidity, tick_lower, tick_upper);
        pay(&env, &read(&env, &MockKey::Token0), &owner, amount0);
        pay(&env, &read(&env, &MockKey::Token1), &owner, amount1);
        (amount0, amount1)
    }

    pub fn collect_fees(env: Env, owner: Address, tick_lower: i32, tick_upper: i32) -> (u128, u128) {
        let key = MockKey::Fees(owner.clone(), tick_lower, tick_upper);
        let (fee0, fee1): (u128, u128) = env.storage().instance().get(&key).unwrap_or((0, 0));
        env.storage().instance().remove(&key);

        pay(&env, &read(&env, &MockKey::Token0), &owner, fee0);
        pay(&env, &read(&env, &MockKey::Token1), &owner, fee1);
        (fee0, fee1)
    }

    /// Exact-input swap at the current price; the input is already in the pool
    pub fn swap(
        env: Env,
        recipient: Address,
        zero_for_one: bool,
        amount_in: u128,
        sqrt_price_limit_x96: u128,
    ) -> (u128, u128) {
        let price: u128 = read(&env, &MockKey::SqrtPrice);
        if (zero_for_one && sqrt_price_limit_x96 >= price) || (!zero_for_one && sqrt_price_limit_x96 <= price) {
            panic!("Invalid price limit");
        }

        let (amount_out, token_out): (u128, Address) = if zero_for_one {
            let out = mul_div(&env, mul_div(&env, amount_in, price, Q96), price, Q96);
            (out, read(&env, &MockKey::Token1))
        } else {
            let out = mul_div(&env, mul_div(&env, amount_in, Q96, price), Q96, price);
            (out, read(&env, &MockKey::Token0))
        };

        pay(&env, &token_out, &recipient, amount_out);
        (amount_in, amount_out)
    }
}
