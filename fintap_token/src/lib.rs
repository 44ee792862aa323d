//! Accounting core for the Fintap fungible token.
//!
//! The crate tracks ownership of a fixed, construction-time supply across
//! opaque addresses and lets an owner delegate bounded spending power to a
//! third party (allowances). The [`ledger::Ledger`] handle exposes the
//! operation set; [`event`] carries the notification records observers
//! consume.
//!
//! The core is synchronous and deterministic. Serializing calls, persisting
//! state and delivering events to the outside world are the embedding
//! environment's concerns.

pub mod event;
pub mod ledger;
