use fintap_shared::{Address, TokenAmount};
use serde::{Deserialize, Serialize};

/// Token name used when constructor params don't override it.
pub const DEFAULT_NAME: &str = "Fintap";
/// Token symbol used when constructor params don't override it.
pub const DEFAULT_SYMBOL: &str = "FTP";
/// Number of decimal places a display layer should assume.
pub const DEFAULT_DECIMALS: u8 = 8;

/// Immutable descriptive metadata, fixed when the ledger is constructed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl Default for TokenMetadata {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            symbol: DEFAULT_SYMBOL.to_string(),
            decimals: DEFAULT_DECIMALS,
        }
    }
}

/// Construction-time configuration for a ledger.
///
/// The whole initial supply is credited to `initial_holder`; the constructing
/// caller itself receives nothing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorParams {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub initial_holder: Address,
    pub initial_supply: TokenAmount,
}

impl ConstructorParams {
    /// The canonical Fintap parameters: name "Fintap", symbol "FTP", 8
    /// decimals.
    pub fn fintap(initial_holder: Address, initial_supply: TokenAmount) -> Self {
        let TokenMetadata { name, symbol, decimals } = TokenMetadata::default();
        Self { name, symbol, decimals, initial_holder, initial_supply }
    }

    /// The metadata portion of the params.
    pub fn metadata(&self) -> TokenMetadata {
        TokenMetadata {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            decimals: self.decimals,
        }
    }
}

pub type TotalSupplyReturn = TokenAmount;
pub type BalanceReturn = TokenAmount;
pub type AllowanceReturn = TokenAmount;

/// Return value after a successful transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReturn {
    /// The new balance of the `from` address
    pub from_balance: TokenAmount,
    /// The new balance of the `to` address
    pub to_balance: TokenAmount,
}

/// Return value after a successful delegated transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferFromReturn {
    /// The new balance of the `from` address
    pub from_balance: TokenAmount,
    /// The new balance of the `to` address
    pub to_balance: TokenAmount,
    /// The remaining allowance between `from` and the calling spender
    pub allowance: TokenAmount,
}
