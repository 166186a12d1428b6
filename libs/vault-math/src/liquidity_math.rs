use crate::full_math::mul_div;
use soroban_sdk::Env;
use vault_types::Q96;

fn sorted(sqrt_ratio_a_x96: u128, sqrt_ratio_b_x96: u128) -> (u128, u128) {
    if sqrt_ratio_a_x96 > sqrt_ratio_b_x96 {
        (sqrt_ratio_b_x96, sqrt_ratio_a_x96)
    } else {
        (sqrt_ratio_a_x96, sqrt_ratio_b_x96)
    }
}

/// Largest liquidity that the given amounts can back for a price range
pub fn get_liquidity_for_amounts(
    env: &Env,
    sqrt_ratio_x96: u128,
    sqrt_ratio_a_x96: u128,
    sqrt_ratio_b_x96: u128,
    amount0: u128,
    amount1: u128,
) -> u128 {
    let (sqrt_lower, sqrt_upper) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    if sqrt_lower == sqrt_upper {
        return 0;
    }

    if sqrt_ratio_x96 <= sqrt_lower {
        liquidity_for_amount0(env, sqrt_lower, sqrt_upper, amount0)
    } else if sqrt_ratio_x96 < sqrt_upper {
        let liquidity0 = liquidity_for_amount0(env, sqrt_ratio_x96, sqrt_upper, amount0);
        let liquidity1 = liquidity_for_amount1(env, sqrt_lower, sqrt_ratio_x96, amount1);
        liquidity0.min(liquidity1)
    } else {
        liquidity_for_amount1(env, sqrt_lower, sqrt_upper, amount1)
    }
}

/// L = amount0 * sqrt_pa * sqrt_pb / (sqrt_pb - sqrt_pa)
///
/// `sqrt_pa * sqrt_pb / 2^96` does not fit a u128 near the top of the tick
/// range, so the division by the width happens first.
fn liquidity_for_amount0(env: &Env, sqrt_lower: u128, sqrt_upper: u128, amount0: u128) -> u128 {
    let scaled = mul_div(env, amount0, sqrt_lower, sqrt_upper - sqrt_lower);
    mul_div(env, scaled, sqrt_upper, Q96)
}

/// L = amount1 / (sqrt_pb - sqrt_pa)
fn liquidity_for_amount1(env: &Env, sqrt_lower: u128, sqrt_upper: u128, amount1: u128) -> u128 {
    mul_div(env, amount1, Q96, sqrt_upper - sqrt_lower)
}

/// Token amounts a liquidity amount is worth over a price range (rounded down)
pub fn get_amounts_for_liquidity(
    env: &Env,
    sqrt_ratio_x96: u128,
    sqrt_ratio_a_x96: u128,
    sqrt_ratio_b_x96: u128,
    liquidity: u128,
) -> (u128, u128) {
    let (sqrt_lower, sqrt_upper) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);

    if sqrt_ratio_x96 <= sqrt_lower {
        (amount0_for_liquidity(env, sqrt_lower, sqrt_upper, liquidity), 0)
    } else if sqrt_ratio_x96 < sqrt_upper {
        (
            amount0_for_liquidity(env, sqrt_ratio_x96, sqrt_upper, liquidity),
            amount1_for_liquidity(env, sqrt_lower, sqrt_ratio_x96, liquidity),
        )
    } else {
        (0, amount1_for_liquidity(env, sqrt_lower, sqrt_upper, liquidity))
    }
}

/// amount0 = L * (sqrt_pb - sqrt_pa) / sqrt_pb / sqrt_pa, in Q96
///
/// Split into two mul_divs so `L << 96` never has to fit in a u128.
fn amount0_for_liquidity(env: &Env, sqrt_lower: u128, sqrt_upper: u128, liquidity: u128) -> u128 {
    let scaled = mul_div(env, liquidity, sqrt_upper - sqrt_lower, sqrt_upper);
    mul_div(env, scaled, Q96, sqrt_lower)
}

/// amount1 = L * (sqrt_pb - sqrt_pa)
fn amount1_for_liquidity(env: &Env, sqrt_lower: u128, sqrt_upper: u128, liquidity: u128) -> u128 {
    mul_div(env, liquidity, sqrt_upper - sqrt_lower, Q96)
}
