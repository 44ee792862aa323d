use fintap_shared::Address;
use thiserror::Error;

use crate::ledger::state::StateError as LedgerStateError;
use crate::ledger::state::StateInvariantError;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("error in underlying state {0}")]
    TokenState(#[from] LedgerStateError),
    #[error("{0} is the reserved zero identity and cannot receive tokens")]
    InvalidRecipient(Address),
    #[error("error in state invariants {0}")]
    StateInvariant(#[from] StateInvariantError),
}

/// Stable failure code surfaced to callers alongside the error message.
///
/// Every rejection maps to exactly one code; no failure collapses into a
/// generic bucket.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidRecipient,
    InsufficientBalance,
    InsufficientAllowance,
    AllowanceUnderflow,
    ArithmeticOverflow,
    IllegalState,
}

impl From<&TokenError> for ErrorCode {
    fn from(error: &TokenError) -> Self {
        match error {
            TokenError::InvalidRecipient(_) => ErrorCode::InvalidRecipient,
            TokenError::StateInvariant(_) => ErrorCode::IllegalState,
            TokenError::TokenState(state_error) => match state_error {
                LedgerStateError::InsufficientBalance { owner: _, balance: _, required: _ } => {
                    ErrorCode::InsufficientBalance
                }
                LedgerStateError::InsufficientAllowance {
                    owner: _,
                    spender: _,
                    allowance: _,
                    required: _,
                } => ErrorCode::InsufficientAllowance,
                LedgerStateError::AllowanceUnderflow {
                    owner: _,
                    spender: _,
                    allowance: _,
                    decrease: _,
                } => ErrorCode::AllowanceUnderflow,
                LedgerStateError::ArithmeticOverflow { amount: _, delta: _ } => {
                    ErrorCode::ArithmeticOverflow
                }
            },
        }
    }
}
