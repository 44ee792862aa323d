//! Value types shared across the Fintap token workspace.
//!
//! These are deliberately small: an opaque account identity and a fixed-width
//! token amount. Everything protocol-shaped lives in `fintap_token`.

pub mod address;
pub mod amount;

pub use address::Address;
pub use amount::TokenAmount;
