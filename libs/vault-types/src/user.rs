use soroban_sdk::{contracttype, Address};

/// Running token contribution of a share holder
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserVault {
    pub exists: bool,
    pub token0: i128,
    pub token1: i128,
}

/// One row of the paginated holder registry
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserVaultInfo {
    pub user: Address,
    pub token0: i128,
    pub token1: i128,
}

/// Share token allowance
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AllowanceValue {
    pub amount: i128,
    pub expiration_ledger: u32,
}
