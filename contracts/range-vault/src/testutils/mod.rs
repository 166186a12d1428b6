//! Shared fixture for the contract tests: a vault wired to a mock pool over
//! two Stellar asset contracts.

extern crate std;

mod mock_pool;

use crate::RangeVault;
use crate::RangeVaultClient;
use mock_pool::{MockPool, MockPoolClient};
use soroban_sdk::testutils::{Address as _, Events as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{Address, Env, String, Symbol, TryFromVal};
use vault_types::{VaultInitParams, Q96};

pub const TICK_SPACING: i32 = 200;
pub const LOWER: i32 = -10000;
pub const UPPER: i32 = 20000;
pub const E18: i128 = 1_000_000_000_000_000_000;

/// Liquidity conversions in the pool floor a handful of times per round trip
pub const ROUNDING_TOLERANCE: i128 = 10;

pub struct VaultTest<'a> {
    pub env: Env,
    pub vault: RangeVaultClient<'a>,
    pub pool: MockPoolClient<'a>,
    pub token0: TokenClient<'a>,
    pub token1: TokenClient<'a>,
    pub factory: Address,
    pub manager: Address,
}

impl<'a> VaultTest<'a> {
    /// Vault over a mock pool priced at tick 0 with spacing 200
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let issuer = Address::generate(&env);
        let asset_a = env.register_stellar_asset_contract_v2(issuer.clone()).address();
        let asset_b = env.register_stellar_asset_contract_v2(issuer).address();
        let (token0, token1) = if asset_a < asset_b {
            (asset_a, asset_b)
        } else {
            (asset_b, asset_a)
        };

        let pool_id = env.register(MockPool, ());
        let pool = MockPoolClient::new(&env, &pool_id);
        pool.init(&token0, &token1, &TICK_SPACING, &Q96);

        // reserves for swaps and rounding dust
        StellarAssetClient::new(&env, &token0).mint(&pool_id, &(1_000 * E18));
        StellarAssetClient::new(&env, &token1).mint(&pool_id, &(1_000 * E18));

        let vault_id = env.register(RangeVault, ());
        let vault = RangeVaultClient::new(&env, &vault_id);
        let factory = Address::generate(&env);
        let manager = Address::generate(&env);
        vault.initialize(
            &factory,
            &pool_id,
            &VaultInitParams {
                manager: manager.clone(),
                name: String::from_str(&env, "Range Vault Share"),
                symbol: String::from_str(&env, "RVS"),
            },
        );

        VaultTest {
            token0: TokenClient::new(&env, &token0),
            token1: TokenClient::new(&env, &token1),
            env,
            vault,
            pool,
            factory,
            manager,
        }
    }

    pub fn fund(&self, who: &Address, amount0: i128, amount1: i128) {
        if amount0 > 0 {
            StellarAssetClient::new(&self.env, &self.token0.address).mint(who, &amount0);
        }
        if amount1 > 0 {
            StellarAssetClient::new(&self.env, &self.token1.address).mint(who, &amount1);
        }
    }

    /// Fresh account holding the given token amounts
    pub fn user(&self, amount0: i128, amount1: i128) -> Address {
        let user = Address::generate(&self.env);
        self.fund(&user, amount0, amount1);
        user
    }

    pub fn open_range(&self) {
        self.vault.set_range(&self.manager, &LOWER, &UPPER);
    }

    /// Quote and mint in one go
    pub fn deposit(&self, user: &Address, amount0_max: i128, amount1_max: i128) -> (i128, i128, i128) {
        let quote = self.vault.get_mint_amounts(&amount0_max, &amount1_max);
        self.vault.mint(user, &quote.0, &amount0_max, &amount1_max);
        quote
    }

    /// Supply every free idle token to the default range
    pub fn enter_position(&self) -> u128 {
        let state = self.vault.get_state();
        let idle0 = self.token0.balance(&self.vault.address) - state.manager_balance_0;
        let idle1 = self.token1.balance(&self.vault.address) - state.manager_balance_1;
        self.vault
            .add_liquidity(&self.manager, &LOWER, &UPPER, &idle0, &idle1, &0, &0)
    }

    /// Credit trading fees to the vault's current position
    pub fn accrue_fees(&self, fee0: i128, fee1: i128) {
        let state = self.vault.get_state();
        self.fund(&self.pool.address, fee0, fee1);
        self.pool.accrue_fees(
            &self.vault.address,
            &state.lower_tick,
            &state.upper_tick,
            &(fee0 as u128),
            &(fee1 as u128),
        );
    }

    pub fn balances(&self, who: &Address) -> (i128, i128) {
        (self.token0.balance(who), self.token1.balance(who))
    }
}

/// Events named `name` published during the most recent invocation.
/// Any later client call, views included, replaces the recorded list.
pub fn count_events(env: &Env, name: &str) -> usize {
    let wanted = Symbol::new(env, name);
    env.events()
        .all()
        .iter()
        .filter(|(_, topics, _)| {
            topics
                .first()
                .and_then(|topic| Symbol::try_from_val(env, &topic).ok())
                .is_some_and(|symbol| symbol == wanted)
        })
        .count()
}
