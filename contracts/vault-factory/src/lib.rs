#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, log, Address, Bytes, BytesN, Env, IntoVal,
    Symbol, Vec,
};
use vault_types::{is_zero_address, page_bounds, VaultInitParams};

#[contract]
pub struct VaultFactory;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum FactoryError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotOwner = 3,
    /// A token is the zero account, both tokens are equal, or the AMM has no pool for them
    ZeroPoolAddress = 4,
    ZeroManagerAddress = 5,
    ZeroOwnerAddress = 6,
    /// The code hash was never installed through this factory
    ImplIsNotAContract = 7,
    LengthMismatch = 8,
    IndexOutOfRange = 9,
    UnknownVault = 10,
}

/// Storage keys for Factory contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Owner address, allowed to deploy and upgrade vaults
    Owner,
    /// AMM factory used to resolve pools
    AmmFactory,
    /// Installed vault code hash -> true
    Implementation(BytesN<32>),
    /// Total number of vaults created (counter for indexed storage)
    VaultCount,
    /// Vault address at index
    VaultAt(u32),
    /// Vault address -> true, for upgrade checks
    Vault(Address),
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280;
const INSTANCE_TTL_EXTEND: u32 = 518400;
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

#[contractimpl]
impl VaultFactory {
    /// Initialize factory with its owner and the AMM factory pools are looked up on
    pub fn initialize(env: Env, owner: Address, amm_factory: Address) -> Result<(), FactoryError> {
        if env.storage().instance().has(&DataKey::Owner) {
            return Err(FactoryError::AlreadyInitialized);
        }
        if is_zero_address(&env, &owner) {
            return Err(FactoryError::ZeroOwnerAddress);
        }

        owner.require_auth();

        env.storage().instance().set(&DataKey::Owner, &owner);
        env.storage().instance().set(&DataKey::AmmFactory, &amm_factory);
        env.storage().instance().set(&DataKey::VaultCount, &0u32);

        extend_instance_ttl(&env);
        Ok(())
    }

    /// Upload vault code and record its hash as a deployable implementation
    pub fn install_implementation(env: Env, caller: Address, wasm: Bytes) -> Result<BytesN<32>, FactoryError> {
        require_owner(&env, &caller)?;

        let wasm_hash = env.deployer().upload_contract_wasm(wasm);
        let key = DataKey::Implementation(wasm_hash.clone());
        env.storage().persistent().set(&key, &true);
        extend_persistent_ttl(&env, &key);

        env.events()
            .publish((Symbol::new(&env, "impl_installed"),), wasm_hash.clone());

        extend_instance_ttl(&env);
        Ok(wasm_hash)
    }

    /// Deploy and initialize a vault over the AMM pool for `token_a`/`token_b` at `fee`.
    /// Several vaults may share a pool.
    /// Returns the vault contract address
    pub fn create_vault(
        env: Env,
        caller: Address,
        token_a: Address,
        token_b: Address,
        fee: u32,
        implementation: BytesN<32>,
        init: VaultInitParams,
    ) -> Result<Address, FactoryError> {
        require_owner(&env, &caller)?;

        if is_zero_address(&env, &token_a) || is_zero_address(&env, &token_b) || token_a == token_b {
            return Err(FactoryError::ZeroPoolAddress);
        }
        if is_zero_address(&env, &init.manager) {
            return Err(FactoryError::ZeroManagerAddress);
        }

        let amm_factory = read_amm_factory(&env)?;
        let pool = get_amm_pool(&env, &amm_factory, &token_a, &token_b, fee)
            .ok_or(FactoryError::ZeroPoolAddress)?;
        if !is_known_implementation(&env, &implementation) {
            return Err(FactoryError::ImplIsNotAContract);
        }

        let vault_count = read_vault_count(&env);

        // Deterministic salt from vault count + fee
        let mut salt_bytes = [0u8; 32];
        salt_bytes[0..4].copy_from_slice(&vault_count.to_be_bytes());
        salt_bytes[4..8].copy_from_slice(&fee.to_be_bytes());
        let salt = BytesN::from_array(&env, &salt_bytes);

        let vault = env
            .deployer()
            .with_current_contract(salt)
            .deploy_v2(implementation, ());

        attach_vault(&env, &vault, &pool, &init);

        extend_instance_ttl(&env);
        Ok(vault)
    }

    /// Point one vault at new code
    pub fn upgrade_vault(
        env: Env,
        caller: Address,
        vault: Address,
        implementation: BytesN<32>,
    ) -> Result<(), FactoryError> {
        require_owner(&env, &caller)?;
        upgrade_one(&env, &vault, &implementation)?;
        extend_instance_ttl(&env);
        Ok(())
    }

    /// Batch form of `upgrade_vault`; `vaults[i]` gets `implementations[i]`
    pub fn upgrade_vaults(
        env: Env,
        caller: Address,
        vaults: Vec<Address>,
        implementations: Vec<BytesN<32>>,
    ) -> Result<(), FactoryError> {
        require_owner(&env, &caller)?;
        if vaults.len() != implementations.len() {
            return Err(FactoryError::LengthMismatch);
        }

        for (vault, implementation) in vaults.iter().zip(implementations.iter()) {
            upgrade_one(&env, &vault, &implementation)?;
        }

        extend_instance_ttl(&env);
        Ok(())
    }

    pub fn transfer_ownership(env: Env, caller: Address, new_owner: Address) -> Result<(), FactoryError> {
        require_owner(&env, &caller)?;
        if is_zero_address(&env, &new_owner) {
            return Err(FactoryError::ZeroOwnerAddress);
        }

        env.storage().instance().set(&DataKey::Owner, &new_owner);
        env.events().publish(
            (Symbol::new(&env, "ownership_transferred"),),
            (caller, new_owner),
        );

        extend_instance_ttl(&env);
        Ok(())
    }

    /// Get total number of vaults created
    pub fn vault_count(env: Env) -> u32 {
        extend_instance_ttl(&env);
        read_vault_count(&env)
    }

    /// Get vaults in the inclusive index range `[start, end]`.
    /// At most 50 entries are returned per call to stay within read limits.
    pub fn get_vault_addresses(env: Env, start: u32, end: u32) -> Result<Vec<Address>, FactoryError> {
        let (from, to) =
            page_bounds(read_vault_count(&env), start, end).ok_or(FactoryError::IndexOutOfRange)?;

        let mut vaults: Vec<Address> = Vec::new(&env);
        for i in from..to {
            if let Some(vault) = env.storage().persistent().get(&DataKey::VaultAt(i)) {
                vaults.push_back(vault);
            }
        }
        Ok(vaults)
    }

    pub fn is_vault(env: Env, vault: Address) -> bool {
        env.storage().persistent().has(&DataKey::Vault(vault))
    }

    pub fn is_implementation(env: Env, implementation: BytesN<32>) -> bool {
        is_known_implementation(&env, &implementation)
    }

    pub fn owner(env: Env) -> Result<Address, FactoryError> {
        extend_instance_ttl(&env);
        read_owner(&env)
    }

    pub fn amm_factory(env: Env) -> Result<Address, FactoryError> {
        extend_instance_ttl(&env);
        read_amm_factory(&env)
    }
}

fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

fn read_owner(env: &Env) -> Result<Address, FactoryError> {
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(FactoryError::NotInitialized)
}

fn read_amm_factory(env: &Env) -> Result<Address, FactoryError> {
    env.storage()
        .instance()
        .get(&DataKey::AmmFactory)
        .ok_or(FactoryError::NotInitialized)
}

fn read_vault_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::VaultCount)
        .unwrap_or(0)
}

fn require_owner(env: &Env, caller: &Address) -> Result<(), FactoryError> {
    caller.require_auth();
    if *caller != read_owner(env)? {
        return Err(FactoryError::NotOwner);
    }
    Ok(())
}

fn is_known_implementation(env: &Env, implementation: &BytesN<32>) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Implementation(implementation.clone()))
}

/// Append to the indexed registry (O(1)) and mark the address as ours
fn register_vault(env: &Env, vault: &Address) {
    let vault_count = read_vault_count(env);

    let vault_at_key = DataKey::VaultAt(vault_count);
    env.storage().persistent().set(&vault_at_key, vault);
    extend_persistent_ttl(env, &vault_at_key);

    let vault_key = DataKey::Vault(vault.clone());
    env.storage().persistent().set(&vault_key, &true);
    extend_persistent_ttl(env, &vault_key);

    env.storage()
        .instance()
        .set(&DataKey::VaultCount, &(vault_count + 1));
}

/// Initialize a freshly deployed vault against `pool` and add it to the registry
fn attach_vault(env: &Env, vault: &Address, pool: &Address, init: &VaultInitParams) {
    init_vault(env, vault, &env.current_contract_address(), pool, init);
    register_vault(env, vault);

    log!(env, "vault created", vault.clone(), pool.clone());
    env.events()
        .publish((Symbol::new(env, "vault_created"),), (pool.clone(), vault.clone()));
}

fn upgrade_one(env: &Env, vault: &Address, implementation: &BytesN<32>) -> Result<(), FactoryError> {
    if !is_known_implementation(env, implementation) {
        return Err(FactoryError::ImplIsNotAContract);
    }
    let vault_key = DataKey::Vault(vault.clone());
    if !env.storage().persistent().has(&vault_key) {
        return Err(FactoryError::UnknownVault);
    }
    extend_persistent_ttl(env, &vault_key);

    let version = upgrade_vault_code(env, vault, implementation);
    log!(env, "vault upgraded", vault.clone(), version);
    env.events().publish(
        (Symbol::new(env, "vault_impl_upgraded"),),
        (vault.clone(), implementation.clone()),
    );
    Ok(())
}

// AMM factory lookup via invoke
fn get_amm_pool(
    env: &Env,
    amm_factory: &Address,
    token_a: &Address,
    token_b: &Address,
    fee: u32,
) -> Option<Address> {
    env.invoke_contract::<Option<Address>>(
        amm_factory,
        &Symbol::new(env, "get_pool"),
        (token_a, token_b, fee).into_val(env),
    )
}

// Vault initialization via invoke
fn init_vault(env: &Env, vault: &Address, factory: &Address, pool: &Address, init: &VaultInitParams) {
    env.invoke_contract::<()>(
        vault,
        &Symbol::new(env, "initialize"),
        (factory, pool, init.clone()).into_val(env),
    );
}

fn upgrade_vault_code(env: &Env, vault: &Address, implementation: &BytesN<32>) -> u32 {
    env.invoke_contract::<u32>(
        vault,
        &Symbol::new(env, "upgrade"),
        (implementation.clone(),).into_val(env),
    )
}
