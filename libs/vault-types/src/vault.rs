use soroban_sdk::{contracttype, Address, String};

/// Vault configuration - immutable after initialization
#[contracttype]
#[derive(Clone, Debug)]
pub struct VaultConfig {
    /// Factory that deployed the vault and gates its upgrades
    pub factory: Address,
    /// AMM pool the vault provides liquidity to
    pub pool: Address,
    /// Token0 address (lower address)
    pub token0: Address,
    /// Token1 address (higher address)
    pub token1: Address,
    /// Tick spacing required by the pool
    pub tick_spacing: i32,
}

/// Mutable vault state - stored in Instance storage for frequent access
#[contracttype]
#[derive(Clone, Debug)]
pub struct VaultState {
    /// Operator allowed to move the range and rebalance
    pub manager: Address,
    /// Lower tick of the managed range
    pub lower_tick: i32,
    /// Upper tick of the managed range (equal to lower when no range is active)
    pub upper_tick: i32,
    /// Set once a range has been chosen; gates minting
    pub mint_started: bool,
    /// True while liquidity is supplied to the pool
    pub in_position: bool,
    pub paused: bool,
    /// Withdrawal fee in basis points
    pub managing_fee_bps: u32,
    /// Share of collected trading fees kept by the manager, in basis points
    pub performance_fee_bps: u32,
    /// Token0 fees owed to the manager
    pub manager_balance_0: i128,
    /// Token1 fees owed to the manager
    pub manager_balance_1: i128,
    /// Code version, bumped on every upgrade
    pub version: u32,
}

impl VaultState {
    pub fn new(manager: Address) -> Self {
        Self {
            manager,
            lower_tick: 0,
            upper_tick: 0,
            mint_started: false,
            in_position: false,
            paused: false,
            managing_fee_bps: 0,
            performance_fee_bps: 0,
            manager_balance_0: 0,
            manager_balance_1: 0,
            version: 1,
        }
    }

    /// A range is active when its bounds are strictly ordered.
    pub fn has_active_range(&self) -> bool {
        self.lower_tick < self.upper_tick
    }

    /// Drop the active range while keeping `mint_started`.
    pub fn clear_range(&mut self) {
        self.lower_tick = self.upper_tick;
    }
}

/// Parameters the factory hands to a freshly deployed vault
#[contracttype]
#[derive(Clone, Debug)]
pub struct VaultInitParams {
    pub manager: Address,
    /// Share token name
    pub name: String,
    /// Share token symbol
    pub symbol: String,
}

/// Share token metadata
#[contracttype]
#[derive(Clone, Debug)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
}
