use crate::full_math::{mul_div, mul_div_rounding_up};
use soroban_sdk::Env;
use vault_types::BPS;

/// Shares that `amount0_max`/`amount1_max` can buy against the current
/// underlying balances. A side with no underlying balance does not constrain
/// the result; when both sides are empty nothing can be minted.
pub fn shares_for_amounts(
    env: &Env,
    total_supply: u128,
    current0: u128,
    current1: u128,
    amount0_max: u128,
    amount1_max: u128,
) -> u128 {
    match (current0, current1) {
        (0, 0) => 0,
        (0, _) => mul_div(env, amount1_max, total_supply, current1),
        (_, 0) => mul_div(env, amount0_max, total_supply, current0),
        _ => mul_div(env, amount0_max, total_supply, current0)
            .min(mul_div(env, amount1_max, total_supply, current1)),
    }
}

/// Amounts a minter owes for `shares`, rounded up so existing holders are never diluted
pub fn amounts_for_mint(
    env: &Env,
    shares: u128,
    total_supply: u128,
    current0: u128,
    current1: u128,
) -> (u128, u128) {
    (
        mul_div_rounding_up(env, shares, current0, total_supply),
        mul_div_rounding_up(env, shares, current1, total_supply),
    )
}

/// Pro-rata slice of `amount` for `shares` out of `total_supply`, rounded down
pub fn share_of(env: &Env, amount: u128, shares: u128, total_supply: u128) -> u128 {
    if amount == 0 || shares == 0 {
        return 0;
    }
    mul_div(env, amount, shares, total_supply)
}

/// Fee charged on `amount` at `fee_bps`
pub fn fee_for(env: &Env, amount: u128, fee_bps: u32) -> u128 {
    mul_div(env, amount, fee_bps as u128, BPS as u128)
}

/// Scale a running contribution by `(balance - burned) / balance`
pub fn scale_down(env: &Env, contribution: u128, balance: u128, burned: u128) -> u128 {
    if burned >= balance {
        return 0;
    }
    mul_div(env, contribution, balance - burned, balance)
}
