use crate::access::require_not_paused;
use crate::error::VaultError;
use crate::events;
use crate::fees::{charge_managing_fee, collect_pending_fees, performance_share};
use crate::pool::{
    idle_balance, invoke_pool_add_liquidity, invoke_pool_remove_liquidity, pool_position_liquidity,
    pool_sqrt_price, pool_uncollected_fees, pool_underlying_balances, range_sqrt_ratios,
};
use crate::share_ledger;
use crate::storage::{get_config, get_state, set_state};
use soroban_sdk::{log, token, Address, Env};
use vault_math::{
    amount_to_i128, amount_to_u128, amounts_for_mint, get_amounts_for_liquidity,
    get_liquidity_for_amounts, share_of, shares_for_amounts,
};
use vault_types::{VaultConfig, VaultState};

/// Idle balance net of what is owed to the manager
pub fn free_idle_balances(env: &Env, config: &VaultConfig, state: &VaultState) -> (u128, u128) {
    let idle0 = idle_balance(env, &config.token0);
    let idle1 = idle_balance(env, &config.token1);
    (
        idle0 - amount_to_u128(state.manager_balance_0),
        idle1 - amount_to_u128(state.manager_balance_1),
    )
}

/// Everything holders collectively own: free idle tokens plus the position's
/// principal and uncollected fees, less the manager's performance cut of
/// those fees. Always read fresh from the pool.
pub fn underlying_balances(env: &Env, config: &VaultConfig, state: &VaultState) -> (u128, u128) {
    let (mut amount0, mut amount1) = free_idle_balances(env, config, state);

    if state.in_position {
        let (principal0, principal1) =
            pool_underlying_balances(env, &config.pool, state.lower_tick, state.upper_tick);
        let (fee0, fee1) = pool_uncollected_fees(env, &config.pool, state.lower_tick, state.upper_tick);
        let (perf0, perf1) = performance_share(env, state, amount_to_i128(fee0), amount_to_i128(fee1));
        amount0 += principal0 - amount_to_u128(perf0);
        amount1 += principal1 - amount_to_u128(perf1);
    }

    (amount0, amount1)
}

/// Amounts owed for `shares` at the current supply.
///
/// The first mint is denominated in liquidity units of the active range, so
/// the amounts are what that liquidity is worth at the current price.
fn amounts_for_shares(
    env: &Env,
    config: &VaultConfig,
    state: &VaultState,
    shares: u128,
    total_supply: u128,
) -> (u128, u128) {
    if total_supply == 0 {
        let price = pool_sqrt_price(env, &config.pool);
        let (sqrt_lower, sqrt_upper) = range_sqrt_ratios(env, state.lower_tick, state.upper_tick);
        get_amounts_for_liquidity(env, price, sqrt_lower, sqrt_upper, shares)
    } else {
        let (current0, current1) = underlying_balances(env, config, state);
        amounts_for_mint(env, shares, total_supply, current0, current1)
    }
}

/// Quote the shares and exact amounts a deposit of at most `amount0_max`/`amount1_max` gets
pub fn get_mint_amounts(
    env: &Env,
    amount0_max: i128,
    amount1_max: i128,
) -> Result<(i128, i128, i128), VaultError> {
    if amount0_max < 0 || amount1_max < 0 {
        return Err(VaultError::InvalidAmount);
    }
    let config = get_config(env);
    let state = get_state(env);
    let total_supply = amount_to_u128(share_ledger::total_supply(env));
    let (max0, max1) = (amount_to_u128(amount0_max), amount_to_u128(amount1_max));

    let (shares, amount0, amount1) = if total_supply == 0 {
        if !state.has_active_range() {
            return Ok((0, 0, 0));
        }
        let price = pool_sqrt_price(env, &config.pool);
        let (sqrt_lower, sqrt_upper) = range_sqrt_ratios(env, state.lower_tick, state.upper_tick);
        let liquidity = get_liquidity_for_amounts(env, price, sqrt_lower, sqrt_upper, max0, max1);
        let (amount0, amount1) = get_amounts_for_liquidity(env, price, sqrt_lower, sqrt_upper, liquidity);
        (liquidity, amount0, amount1)
    } else {
        let (current0, current1) = underlying_balances(env, &config, &state);
        let shares = shares_for_amounts(env, total_supply, current0, current1, max0, max1);
        let (amount0, amount1) = amounts_for_mint(env, shares, total_supply, current0, current1);
        (shares, amount0, amount1)
    };

    if shares == 0 {
        return Ok((0, 0, 0));
    }
    Ok((amount_to_i128(shares), amount_to_i128(amount0), amount_to_i128(amount1)))
}

pub fn mint(
    env: &Env,
    user: &Address,
    shares: i128,
    amount0_max: i128,
    amount1_max: i128,
) -> Result<(i128, i128), VaultError> {
    user.require_auth();
    let config = get_config(env);
    let state = get_state(env);

    require_not_paused(&state)?;
    if !state.mint_started {
        return Err(VaultError::MintNotStarted);
    }
    if shares <= 0 {
        return Err(VaultError::InvalidMintAmount);
    }
    let total_supply = amount_to_u128(share_ledger::total_supply(env));
    if total_supply == 0 && !state.has_active_range() {
        return Err(VaultError::MintNotAllowed);
    }

    let (amount0, amount1) = amounts_for_shares(env, &config, &state, amount_to_u128(shares), total_supply);
    if amount0 == 0 && amount1 == 0 {
        return Err(VaultError::InvalidMintAmount);
    }
    let (amount0, amount1) = (amount_to_i128(amount0), amount_to_i128(amount1));
    if amount0 > amount0_max || amount1 > amount1_max {
        return Err(VaultError::SlippageExceeded);
    }

    let vault = env.current_contract_address();
    if amount0 > 0 {
        token::Client::new(env, &config.token0).transfer(user, &vault, &amount0);
    }
    if amount1 > 0 {
        token::Client::new(env, &config.token1).transfer(user, &vault, &amount1);
    }

    share_ledger::mint(env, user, shares, amount0, amount1);

    if state.in_position {
        invoke_pool_add_liquidity(
            env,
            &config,
            state.lower_tick,
            state.upper_tick,
            amount_to_u128(amount0),
            amount_to_u128(amount1),
        );
    }

    events::minted(env, user, shares, amount0, amount1);
    Ok((amount0, amount1))
}

pub fn burn(
    env: &Env,
    user: &Address,
    shares: i128,
    amount0_min: i128,
    amount1_min: i128,
) -> Result<(i128, i128), VaultError> {
    user.require_auth();
    let config = get_config(env);
    let mut state = get_state(env);

    require_not_paused(&state)?;
    if shares <= 0 {
        return Err(VaultError::InvalidBurnAmount);
    }
    if share_ledger::balance(env, user) < shares {
        return Err(VaultError::InsufficientBalance);
    }

    let total_supply = amount_to_u128(share_ledger::total_supply(env));
    let burned = amount_to_u128(shares);

    let (payout0, payout1) = if state.in_position {
        collect_pending_fees(env, &config, &mut state);
        let (free0, free1) = free_idle_balances(env, &config, &state);

        let liquidity = pool_position_liquidity(env, &config.pool, state.lower_tick, state.upper_tick);
        let removed = share_of(env, liquidity, burned, total_supply);
        let (removed0, removed1) = if removed > 0 {
            invoke_pool_remove_liquidity(env, &config.pool, state.lower_tick, state.upper_tick, removed)
        } else {
            (0, 0)
        };

        (
            removed0 + share_of(env, free0, burned, total_supply),
            removed1 + share_of(env, free1, burned, total_supply),
        )
    } else {
        let (current0, current1) = underlying_balances(env, &config, &state);
        (
            share_of(env, current0, burned, total_supply),
            share_of(env, current1, burned, total_supply),
        )
    };

    let (payout0, payout1) = (amount_to_i128(payout0), amount_to_i128(payout1));
    let (fee0, fee1) = charge_managing_fee(env, &mut state, payout0, payout1);
    let (amount0, amount1) = (payout0 - fee0, payout1 - fee1);
    if amount0 < amount0_min || amount1 < amount1_min {
        return Err(VaultError::SlippageExceeded);
    }

    share_ledger::burn(env, user, shares)?;
    if share_ledger::total_supply(env) == 0 && !state.in_position {
        // An emptied vault must be given a fresh range before it can be reseeded
        state.clear_range();
        log!(env, "vault emptied, range cleared");
    }
    set_state(env, &state);

    let vault = env.current_contract_address();
    if amount0 > 0 {
        token::Client::new(env, &config.token0).transfer(&vault, user, &amount0);
    }
    if amount1 > 0 {
        token::Client::new(env, &config.token1).transfer(&vault, user, &amount1);
    }

    events::burned(env, user, shares, amount0, amount1);
    Ok((amount0, amount1))
}

pub fn get_underlying_balances(env: &Env) -> (i128, i128) {
    let config = get_config(env);
    let state = get_state(env);
    let (amount0, amount1) = underlying_balances(env, &config, &state);
    (amount_to_i128(amount0), amount_to_i128(amount1))
}

pub fn get_underlying_balances_by_share(env: &Env, shares: i128) -> Result<(i128, i128), VaultError> {
    if shares < 0 {
        return Err(VaultError::InvalidAmount);
    }
    let total_supply = amount_to_u128(share_ledger::total_supply(env));
    if total_supply == 0 {
        return Ok((0, 0));
    }
    let config = get_config(env);
    let state = get_state(env);
    let (current0, current1) = underlying_balances(env, &config, &state);
    let shares = amount_to_u128(shares);
    Ok((
        amount_to_i128(share_of(env, current0, shares, total_supply)),
        amount_to_i128(share_of(env, current1, shares, total_supply)),
    ))
}

#[cfg(test)]
mod tests {
    use crate::testutils::{count_events, VaultTest, E18, LOWER, ROUNDING_TOLERANCE, UPPER};
    use crate::VaultError;
    use soroban_sdk::testutils::Address as _;
    use soroban_sdk::token::StellarAssetClient;
    use soroban_sdk::Address;

    #[test]
    fn test_mint_before_first_range() {
        let t = VaultTest::new();
        let alice = t.user(2 * E18, 3 * E18);

        assert_eq!(t.vault.get_mint_amounts(&(2 * E18), &(3 * E18)), (0, 0, 0));
        assert_eq!(
            t.vault.try_mint(&alice, &1000, &(2 * E18), &(3 * E18)),
            Err(Ok(VaultError::MintNotStarted))
        );
    }

    #[test]
    fn test_first_deposit_and_full_exit() {
        let t = VaultTest::new();
        t.open_range();
        assert!(t.vault.get_state().mint_started);

        let alice = t.user(2 * E18, 3 * E18);
        let (shares, amount0, amount1) = t.vault.get_mint_amounts(&(2 * E18), &(3 * E18));
        assert!(shares > 0);
        assert!(amount0 > 0 && amount0 <= 2 * E18);
        assert!(amount1 > 0 && amount1 <= 3 * E18);

        assert_eq!(
            t.vault.mint(&alice, &shares, &(2 * E18), &(3 * E18)),
            (amount0, amount1)
        );
        assert_eq!(count_events(&t.env, "minted"), 1);
        assert_eq!(t.vault.total_supply(), shares);
        assert_eq!(t.vault.balance(&alice), shares);
        assert_eq!(t.balances(&t.vault.address), (amount0, amount1));
        assert_eq!(t.vault.get_underlying_balances(), (amount0, amount1));

        assert_eq!(t.vault.burn(&alice, &shares, &amount0, &amount1), (amount0, amount1));
        assert_eq!(count_events(&t.env, "burned"), 1);
        assert_eq!(t.vault.total_supply(), 0);
        assert_eq!(t.balances(&alice), (2 * E18, 3 * E18));
        assert_eq!(t.balances(&t.vault.address), (0, 0));
    }

    #[test]
    fn test_emptied_vault_needs_new_range() {
        let t = VaultTest::new();
        t.open_range();
        let alice = t.user(2 * E18, 3 * E18);
        let (shares, _, _) = t.deposit(&alice, 2 * E18, 3 * E18);
        t.vault.burn(&alice, &shares, &0, &0);

        let state = t.vault.get_state();
        assert!(state.mint_started);
        assert!(!state.has_active_range());
        assert_eq!(t.vault.get_mint_amounts(&E18, &E18), (0, 0, 0));
        assert_eq!(
            t.vault.try_mint(&alice, &shares, &(2 * E18), &(3 * E18)),
            Err(Ok(VaultError::MintNotAllowed))
        );

        t.open_range();
        let (reseeded, _, _) = t.deposit(&alice, 2 * E18, 3 * E18);
        assert_eq!(reseeded, shares);
    }

    #[test]
    fn test_mint_checks() {
        let t = VaultTest::new();
        t.open_range();
        let alice = t.user(2 * E18, 3 * E18);
        let (shares, amount0, amount1) = t.vault.get_mint_amounts(&(2 * E18), &(3 * E18));

        assert_eq!(
            t.vault.try_mint(&alice, &0, &amount0, &amount1),
            Err(Ok(VaultError::InvalidMintAmount))
        );
        assert_eq!(
            t.vault.try_mint(&alice, &shares, &(amount0 - 1), &amount1),
            Err(Ok(VaultError::SlippageExceeded))
        );
        assert_eq!(
            t.vault.try_get_mint_amounts(&-1, &E18),
            Err(Ok(VaultError::InvalidAmount))
        );
        assert_eq!(t.vault.total_supply(), 0);
    }

    #[test]
    fn test_burn_checks() {
        let t = VaultTest::new();
        t.open_range();
        let alice = t.user(2 * E18, 3 * E18);
        let (shares, amount0, amount1) = t.deposit(&alice, 2 * E18, 3 * E18);

        assert_eq!(
            t.vault.try_burn(&alice, &0, &0, &0),
            Err(Ok(VaultError::InvalidBurnAmount))
        );
        assert_eq!(
            t.vault.try_burn(&alice, &(shares + 1), &0, &0),
            Err(Ok(VaultError::InsufficientBalance))
        );
        assert_eq!(
            t.vault.try_burn(&alice, &shares, &(amount0 + 1), &amount1),
            Err(Ok(VaultError::SlippageExceeded))
        );
        assert_eq!(t.vault.balance(&alice), shares);
    }

    #[test]
    fn test_later_deposit_does_not_dilute() {
        let t = VaultTest::new();
        t.open_range();
        let alice = t.user(2 * E18, 3 * E18);
        let bob = t.user(5 * E18, 5 * E18);
        let (alice_shares, _, _) = t.deposit(&alice, 2 * E18, 3 * E18);

        // skew the vault's ratio with an odd donation
        StellarAssetClient::new(&t.env, &t.token0.address).mint(&t.vault.address, &7);
        let before = t.vault.get_underlying_balances_by_share(&alice_shares);

        let (bob_shares, paid0, paid1) = t.deposit(&bob, E18 + 3, E18);
        assert!(bob_shares > 0);
        assert!(paid0 <= E18 + 3 && paid1 <= E18);

        let after = t.vault.get_underlying_balances_by_share(&alice_shares);
        assert!(after.0 >= before.0);
        assert!(after.1 >= before.1);

        // an immediate exit never returns more than was paid in
        let (out0, out1) = t.vault.burn(&bob, &bob_shares, &0, &0);
        assert!(out0 <= paid0 && out1 <= paid1);
        assert!(paid0 - out0 <= 1 && paid1 - out1 <= 1);
    }

    #[test]
    fn test_supply_matches_balances() {
        let t = VaultTest::new();
        t.open_range();
        let alice = t.user(2 * E18, 3 * E18);
        let bob = t.user(2 * E18, 3 * E18);
        let carol = Address::generate(&t.env);

        let (alice_shares, _, _) = t.deposit(&alice, 2 * E18, 3 * E18);
        let (bob_shares, _, _) = t.deposit(&bob, E18, E18);
        t.vault.transfer(&alice, &carol, &(alice_shares / 3));
        t.vault.burn(&bob, &(bob_shares / 2), &0, &0);

        let held = t.vault.balance(&alice) + t.vault.balance(&bob) + t.vault.balance(&carol);
        assert_eq!(t.vault.total_supply(), held);
        assert_eq!(t.vault.user_count(), 3);
    }

    #[test]
    fn test_deposit_and_exit_in_position() {
        let t = VaultTest::new();
        t.open_range();
        let alice = t.user(2 * E18, 3 * E18);
        let bob = t.user(E18, E18);
        let (alice_shares, _, _) = t.deposit(&alice, 2 * E18, 3 * E18);

        let liquidity = t.enter_position();
        assert!(liquidity > 0);
        let alice_before = t.vault.get_underlying_balances_by_share(&alice_shares);

        let (bob_shares, paid0, paid1) = t.deposit(&bob, E18, E18);
        assert!(bob_shares > 0);
        // bob's deposit went straight into the position
        assert!(t.pool.position_liquidity(&t.vault.address, &LOWER, &UPPER) > liquidity);

        let (out0, out1) = t.vault.burn(&bob, &bob_shares, &0, &0);
        assert!((paid0 - out0).abs() <= ROUNDING_TOLERANCE);
        assert!((paid1 - out1).abs() <= ROUNDING_TOLERANCE);

        let alice_after = t.vault.get_underlying_balances_by_share(&alice_shares);
        assert!(alice_after.0 + ROUNDING_TOLERANCE >= alice_before.0);
        assert!(alice_after.1 + ROUNDING_TOLERANCE >= alice_before.1);
    }

    #[test]
    fn test_high_tick_range_quotes_and_mints() {
        let t = VaultTest::new();
        t.vault.set_range(&t.manager, &400000, &443600);
        let alice = t.user(2 * E18, 3 * E18);

        // the price sits below the range, so only token0 is taken
        let (shares, amount0, amount1) = t.vault.get_mint_amounts(&(2 * E18), &(3 * E18));
        assert!(shares > 0);
        assert!(amount0 > 0 && amount0 <= 2 * E18);
        assert_eq!(amount1, 0);

        assert_eq!(
            t.vault.mint(&alice, &shares, &(2 * E18), &(3 * E18)),
            (amount0, 0)
        );
        assert_eq!(t.vault.balance(&alice), shares);
        assert_eq!(t.vault.get_underlying_balances(), (amount0, 0));
    }

    #[test]
    fn test_managing_fee_on_burn() {
        let t = VaultTest::new();
        t.open_range();
        t.vault.update_fees(&t.manager, &100, &0);
        let alice = t.user(2 * E18, 3 * E18);
        let (shares, amount0, amount1) = t.deposit(&alice, 2 * E18, 3 * E18);

        let fee0 = amount0 / 100;
        let fee1 = amount1 / 100;
        assert_eq!(
            t.vault.burn(&alice, &shares, &0, &0),
            (amount0 - fee0, amount1 - fee1)
        );
        assert_eq!(t.balances(&alice), (2 * E18 - fee0, 3 * E18 - fee1));

        let state = t.vault.get_state();
        assert_eq!((state.manager_balance_0, state.manager_balance_1), (fee0, fee1));
        // owed fees are not part of anyone's claim
        assert_eq!(t.vault.get_underlying_balances(), (0, 0));

        assert_eq!(t.vault.collect_manager(&t.manager), (fee0, fee1));
        assert_eq!(t.balances(&t.manager), (fee0, fee1));
        assert_eq!(t.balances(&t.vault.address), (0, 0));
        assert_eq!(t.vault.collect_manager(&t.manager), (0, 0));
    }

    #[test]
    fn test_underlying_by_share() {
        let t = VaultTest::new();
        assert_eq!(t.vault.get_underlying_balances_by_share(&1000), (0, 0));
        assert_eq!(
            t.vault.try_get_underlying_balances_by_share(&-1),
            Err(Ok(VaultError::InvalidAmount))
        );

        t.open_range();
        let alice = t.user(2 * E18, 3 * E18);
        let (shares, amount0, amount1) = t.deposit(&alice, 2 * E18, 3 * E18);
        assert_eq!(t.vault.get_underlying_balances_by_share(&shares), (amount0, amount1));
        assert_eq!(
            t.vault.get_underlying_balances_by_share(&(shares / 2)),
            (amount0 * (shares / 2) / shares, amount1 * (shares / 2) / shares)
        );
    }
}
