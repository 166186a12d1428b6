use soroban_sdk::{Env, U256};

/// Multiply and divide with 256-bit intermediate precision (rounds down)
/// Returns (a * b) / denominator
pub fn mul_div(env: &Env, a: u128, b: u128, denominator: u128) -> u128 {
    let (quotient, _) = mul_div_rem(env, a, b, denominator);
    quotient
}

/// Multiply and divide with 256-bit intermediate precision (rounds up)
/// Returns ceil((a * b) / denominator)
pub fn mul_div_rounding_up(env: &Env, a: u128, b: u128, denominator: u128) -> u128 {
    let (quotient, has_remainder) = mul_div_rem(env, a, b, denominator);
    if has_remainder {
        quotient + 1
    } else {
        quotient
    }
}

/// Shared body of the mul_div variants: quotient plus whether anything was truncated
fn mul_div_rem(env: &Env, a: u128, b: u128, denominator: u128) -> (u128, bool) {
    if denominator == 0 {
        panic!("Division by zero");
    }

    let denom_256 = U256::from_u128(env, denominator);
    let product = U256::from_u128(env, a).mul(&U256::from_u128(env, b));
    let quotient = product.div(&denom_256);
    let remainder = product.rem_euclid(&denom_256);

    let quotient = match quotient.to_u128() {
        Some(value) => value,
        None => panic!("U256 overflow when converting to u128"),
    };
    (quotient, remainder.gt(&U256::from_u32(env, 0)))
}

/// Token amounts are i128 on the wire; vault math runs on u128.
pub fn amount_to_u128(amount: i128) -> u128 {
    if amount < 0 {
        panic!("Negative amount");
    }
    amount as u128
}

pub fn amount_to_i128(amount: u128) -> i128 {
    if amount > i128::MAX as u128 {
        panic!("Amount overflow");
    }
    amount as i128
}
