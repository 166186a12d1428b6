#![no_std]

mod user;
mod vault;

pub use user::*;
pub use vault::*;

use soroban_sdk::{Address, Env, String};

/// Q96 constant (2^96) for fixed-point math
pub const Q96: u128 = 1 << 96;

/// Minimum tick index
/// Limited by u128 representation (originally -887272 for uint160)
pub const MIN_TICK: i32 = -443636;

/// Maximum tick index
/// Limited by u128 representation (originally 887272 for uint160)
pub const MAX_TICK: i32 = 443636;

/// Minimum sqrt price (at MIN_TICK)
pub const MIN_SQRT_RATIO: u128 = 18446743374134;

/// Maximum sqrt price (at MAX_TICK), bounded by u128::MAX
pub const MAX_SQRT_RATIO: u128 = 340275971719517849884101479065584693834;

/// Basis point denominator used by both vault fees
pub const BPS: u32 = 10_000;

/// Ceiling for the withdrawal (managing) fee: 1%
pub const MAX_MANAGING_FEE_BPS: u32 = 100;

/// Ceiling for the performance fee on collected trading fees: 100%
pub const MAX_PERFORMANCE_FEE_BPS: u32 = 10_000;

/// Decimals reported by the vault share token
pub const SHARE_DECIMALS: u32 = 7;

/// Page size cap for registry reads (Soroban read entry limit is 100)
pub const MAX_PAGE_SIZE: u32 = 50;

/// Strkey of the all-zero ed25519 account, the closest thing Stellar has to a null address
pub const ZERO_ACCOUNT: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

pub fn zero_address(env: &Env) -> Address {
    Address::from_string(&String::from_str(env, ZERO_ACCOUNT))
}

pub fn is_zero_address(env: &Env, address: &Address) -> bool {
    *address == zero_address(env)
}

/// Resolve an inclusive `[start, end]` page over a registry of `len` entries.
///
/// Returns `None` when `start` is past the end of the registry. An `end`
/// below `start` yields an empty range; an `end` past the registry is
/// clamped, and pages never exceed `MAX_PAGE_SIZE` entries.
pub fn page_bounds(len: u32, start: u32, end: u32) -> Option<(u32, u32)> {
    if end < start {
        return Some((start, start));
    }
    if start >= len {
        return None;
    }
    let last = end.min(len - 1).min(start.saturating_add(MAX_PAGE_SIZE - 1));
    Some((start, last + 1))
}
