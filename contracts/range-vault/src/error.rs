use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VaultError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotManager = 3,
    Paused = 4,
    NotPaused = 5,
    MintNotStarted = 6,
    MintNotAllowed = 7,
    InvalidMintAmount = 8,
    InvalidBurnAmount = 9,
    InsufficientBalance = 10,
    InsufficientAllowance = 11,
    TicksOutOfRange = 12,
    InvalidTickSpacing = 13,
    InvalidTickOrder = 14,
    /// Range changes require the position to be removed first
    PositionActive = 15,
    LiquidityAlreadyAdded = 16,
    NotInPosition = 17,
    SlippageExceeded = 18,
    InvalidManagingFee = 19,
    InvalidPerformanceFee = 20,
    /// Requested amount exceeds idle balance net of manager fees
    InsufficientIdleBalance = 21,
    InvalidAmount = 22,
    IndexOutOfRange = 23,
    ZeroManagerAddress = 24,
}
