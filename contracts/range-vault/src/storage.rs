use crate::error::VaultError;
use soroban_sdk::{contracttype, panic_with_error, Address, Env};
use vault_types::{AllowanceValue, TokenMetadata, UserVault, VaultConfig, VaultState};

// ============================================================================
// Storage layout:
// - Config, State, Metadata, TotalSupply, UserCount live in Instance storage
//   and are touched by almost every call
// - Share balances and the holder registry are Persistent, one entry per
//   holder, so the registry never becomes a single unbounded entry
// - Allowances are Temporary and expire with their `expiration_ledger`
// ============================================================================

/// Storage keys for the vault contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Vault configuration (Instance storage)
    Config,
    /// Vault state (Instance storage)
    State,
    /// Share token metadata (Instance storage)
    Metadata,
    /// Total shares outstanding (Instance storage)
    TotalSupply,
    /// Share balance per holder (Persistent storage)
    Balance(Address),
    /// Share allowance (from, spender) (Temporary storage)
    Allowance(Address, Address),
    /// Number of registered holders (Instance storage)
    UserCount,
    /// Holder address at registry index (Persistent storage)
    UserAt(u32),
    /// Holder contribution (Persistent storage)
    UserVault(Address),
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280; // ~1 day
const INSTANCE_TTL_EXTEND: u32 = 518400; // ~30 days
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

pub fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

/// Read a persistent entry, refreshing its TTL when it exists
fn read_persistent<V>(env: &Env, key: &DataKey) -> Option<V>
where
    V: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>,
{
    let value = env.storage().persistent().get(key);
    if value.is_some() {
        extend_persistent_ttl(env, key);
    }
    value
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

// === Config ===

pub fn get_config(env: &Env) -> VaultConfig {
    extend_instance_ttl(env);
    match env.storage().instance().get(&DataKey::Config) {
        Some(config) => config,
        None => panic_with_error!(env, VaultError::NotInitialized),
    }
}

pub fn set_config(env: &Env, config: &VaultConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance_ttl(env);
}

// === State ===

pub fn get_state(env: &Env) -> VaultState {
    extend_instance_ttl(env);
    match env.storage().instance().get(&DataKey::State) {
        Some(state) => state,
        None => panic_with_error!(env, VaultError::NotInitialized),
    }
}

pub fn set_state(env: &Env, state: &VaultState) {
    env.storage().instance().set(&DataKey::State, state);
    extend_instance_ttl(env);
}

// === Metadata ===

pub fn get_metadata(env: &Env) -> TokenMetadata {
    extend_instance_ttl(env);
    match env.storage().instance().get(&DataKey::Metadata) {
        Some(metadata) => metadata,
        None => panic_with_error!(env, VaultError::NotInitialized),
    }
}

pub fn set_metadata(env: &Env, metadata: &TokenMetadata) {
    env.storage().instance().set(&DataKey::Metadata, metadata);
}

// === Shares ===

pub fn get_total_supply(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

pub fn set_total_supply(env: &Env, supply: i128) {
    env.storage().instance().set(&DataKey::TotalSupply, &supply);
}

pub fn get_balance(env: &Env, holder: &Address) -> i128 {
    read_persistent(env, &DataKey::Balance(holder.clone())).unwrap_or(0)
}

pub fn set_balance(env: &Env, holder: &Address, balance: i128) {
    let key = DataKey::Balance(holder.clone());
    env.storage().persistent().set(&key, &balance);
    extend_persistent_ttl(env, &key);
}

// === Allowances ===

pub fn get_allowance(env: &Env, from: &Address, spender: &Address) -> AllowanceValue {
    let key = DataKey::Allowance(from.clone(), spender.clone());
    match env.storage().temporary().get::<_, AllowanceValue>(&key) {
        Some(allowance) if allowance.expiration_ledger >= env.ledger().sequence() => allowance,
        _ => AllowanceValue::default(),
    }
}

pub fn set_allowance(env: &Env, from: &Address, spender: &Address, allowance: &AllowanceValue) {
    let key = DataKey::Allowance(from.clone(), spender.clone());
    env.storage().temporary().set(&key, allowance);

    let sequence = env.ledger().sequence();
    if allowance.amount > 0 && allowance.expiration_ledger > sequence {
        let live_for = allowance.expiration_ledger - sequence;
        env.storage().temporary().extend_ttl(&key, live_for, live_for);
    }
}

// === Holder registry ===

pub fn get_user_count(env: &Env) -> u32 {
    env.storage().instance().get(&DataKey::UserCount).unwrap_or(0)
}

pub fn get_user_at(env: &Env, index: u32) -> Option<Address> {
    read_persistent(env, &DataKey::UserAt(index))
}

/// Append a holder to the registry and return its index
pub fn push_user(env: &Env, user: &Address) -> u32 {
    let index = get_user_count(env);
    let key = DataKey::UserAt(index);
    env.storage().persistent().set(&key, user);
    extend_persistent_ttl(env, &key);
    env.storage()
        .instance()
        .set(&DataKey::UserCount, &(index + 1));
    index
}

pub fn get_user_vault(env: &Env, user: &Address) -> UserVault {
    read_persistent(env, &DataKey::UserVault(user.clone())).unwrap_or_default()
}

pub fn set_user_vault(env: &Env, user: &Address, vault: &UserVault) {
    let key = DataKey::UserVault(user.clone());
    env.storage().persistent().set(&key, vault);
    extend_persistent_ttl(env, &key);
}
