use soroban_sdk::{Address, BytesN, Env, Symbol};

// Every vault event is published under a single symbol topic; holder-scoped
// events add the holder address as a second topic so indexers can filter.

pub fn mint_started(env: &Env) {
    env.events()
        .publish((Symbol::new(env, "mint_started"),), ());
}

pub fn range_set(env: &Env, lower_tick: i32, upper_tick: i32) {
    env.events()
        .publish((Symbol::new(env, "range_set"),), (lower_tick, upper_tick));
}

pub fn minted(env: &Env, user: &Address, shares: i128, amount0: i128, amount1: i128) {
    env.events().publish(
        (Symbol::new(env, "minted"), user.clone()),
        (shares, amount0, amount1),
    );
}

pub fn burned(env: &Env, user: &Address, shares: i128, amount0: i128, amount1: i128) {
    env.events().publish(
        (Symbol::new(env, "burned"), user.clone()),
        (shares, amount0, amount1),
    );
}

pub fn fees_earned(env: &Env, fee0: i128, fee1: i128) {
    env.events()
        .publish((Symbol::new(env, "fees_earned"),), (fee0, fee1));
}

pub fn liquidity_added(
    env: &Env,
    liquidity: u128,
    lower_tick: i32,
    upper_tick: i32,
    amount0: i128,
    amount1: i128,
) {
    env.events().publish(
        (Symbol::new(env, "liquidity_added"),),
        (liquidity, lower_tick, upper_tick, amount0, amount1),
    );
}

pub fn liquidity_removed(env: &Env, liquidity: u128, amount0: i128, amount1: i128) {
    env.events().publish(
        (Symbol::new(env, "liquidity_removed"),),
        (liquidity, amount0, amount1),
    );
}

pub fn position_status(env: &Env, in_position: bool) {
    env.events()
        .publish((Symbol::new(env, "position_status"),), in_position);
}

pub fn swapped(env: &Env, zero_for_one: bool, amount_in: i128, amount_out: i128) {
    env.events().publish(
        (Symbol::new(env, "swapped"),),
        (zero_for_one, amount_in, amount_out),
    );
}

pub fn fees_updated(env: &Env, managing_fee_bps: u32, performance_fee_bps: u32) {
    env.events().publish(
        (Symbol::new(env, "fees_updated"),),
        (managing_fee_bps, performance_fee_bps),
    );
}

pub fn manager_collected(env: &Env, manager: &Address, amount0: i128, amount1: i128) {
    env.events().publish(
        (Symbol::new(env, "manager_collected"), manager.clone()),
        (amount0, amount1),
    );
}

pub fn paused(env: &Env, manager: &Address) {
    env.events()
        .publish((Symbol::new(env, "paused"),), manager.clone());
}

pub fn unpaused(env: &Env, manager: &Address) {
    env.events()
        .publish((Symbol::new(env, "unpaused"),), manager.clone());
}

pub fn manager_transferred(env: &Env, previous: &Address, manager: &Address) {
    env.events().publish(
        (Symbol::new(env, "manager_transferred"),),
        (previous.clone(), manager.clone()),
    );
}

pub fn upgraded(env: &Env, wasm_hash: &BytesN<32>, version: u32) {
    env.events()
        .publish((Symbol::new(env, "upgraded"),), (wasm_hash.clone(), version));
}

// Share token events follow the SEP-41 topic layout

pub fn transfer(env: &Env, from: &Address, to: &Address, amount: i128) {
    env.events().publish(
        (Symbol::new(env, "transfer"), from.clone(), to.clone()),
        amount,
    );
}

pub fn approve(env: &Env, from: &Address, spender: &Address, amount: i128, expiration_ledger: u32) {
    env.events().publish(
        (Symbol::new(env, "approve"), from.clone(), spender.clone()),
        (amount, expiration_ledger),
    );
}
