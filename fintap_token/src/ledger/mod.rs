pub use error::{ErrorCode, TokenError};
use fintap_shared::{Address, TokenAmount};

use self::state::{LedgerState, StateError, StateInvariantError, StateSummary};
use self::types::{
    AllowanceReturn, ConstructorParams, TokenMetadata, TransferFromReturn, TransferReturn,
};
use crate::event::{EventSink, TokenEvent};

mod error;
pub mod state;
pub mod types;

type Result<T> = std::result::Result<T, TokenError>;

/// The fungible-token accounting core.
///
/// Wraps the ledger state that will be inspected/mutated, the immutable token
/// metadata, and an injected sink that receives one notification per
/// successful mutation. Every mutating operation takes the caller identity as
/// an explicit parameter; resolving who the caller is belongs to the embedding
/// environment.
///
/// Each operation is an all-or-nothing transition: the full precondition set
/// is checked before any state changes, a failure leaves state untouched, and
/// the event fires only after the state commit.
pub struct Ledger<'st, E: EventSink> {
    /// Sink receiving notifications of completed mutations
    sink: E,
    /// Reference to ledger state that will be inspected/mutated
    state: &'st mut LedgerState,
    /// Immutable descriptive metadata fixed at construction
    metadata: TokenMetadata,
}

impl<'st, E: EventSink> Ledger<'st, E> {
    /// Creates the genesis state for a new token.
    ///
    /// The whole supply is credited to `initial_holder`, which must not be
    /// the reserved zero identity. This should be wrapped in a Ledger handle
    /// for use.
    pub fn create_state(params: &ConstructorParams) -> Result<LedgerState> {
        if params.initial_holder.is_zero() {
            return Err(TokenError::InvalidRecipient(params.initial_holder));
        }
        Ok(LedgerState::with_initial_supply(params.initial_holder, params.initial_supply))
    }

    /// Wrap an existing ledger state.
    pub fn wrap(sink: E, metadata: TokenMetadata, state: &'st mut LedgerState) -> Self {
        Self { sink, metadata, state }
    }

    /// Replace the current state with another.
    /// The previous state is returned and can be safely dropped.
    pub fn replace(&mut self, state: LedgerState) -> LedgerState {
        std::mem::replace(self.state, state)
    }

    /// Get a reference to the wrapped state.
    pub fn state(&self) -> &LedgerState {
        self.state
    }

    /// Get a reference to the injected event sink.
    pub fn sink(&self) -> &E {
        &self.sink
    }

    /// Applies a closure to the ledger state atomically.
    ///
    /// The closure runs against a copy; only if it returns `Ok` is the copy
    /// committed, so a failing call observes no partial mutation.
    fn transaction<F, Res>(&mut self, f: F) -> Result<Res>
    where
        F: FnOnce(&mut LedgerState) -> Result<Res>,
    {
        let mut mutable_state = self.state.clone();
        let res = f(&mut mutable_state)?;
        // if closure didn't error, commit state
        *self.state = mutable_state;
        Ok(res)
    }
}

impl<'st, E: EventSink> Ledger<'st, E> {
    /// The token name.
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// The token ticker symbol.
    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    /// Number of decimal places a display layer should assume.
    pub fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    /// The total number of tokens in existence.
    ///
    /// Equals the sum of `balance_of` over all addresses at all times; the
    /// supply is fixed at construction.
    pub fn total_supply(&self) -> TokenAmount {
        self.state.supply
    }

    /// The balance associated with a particular address.
    ///
    /// Addresses that have never received a transfer implicitly hold zero.
    pub fn balance_of(&self, account: &Address) -> TokenAmount {
        self.state.get_balance(account)
    }

    /// The amount `spender` may still move out of `owner`'s balance via
    /// [`transfer_from`](Self::transfer_from).
    pub fn allowance(&self, owner: &Address, spender: &Address) -> TokenAmount {
        self.state.get_allowance(owner, spender)
    }

    /// Moves `amount` from the caller's balance to `to`.
    ///
    /// - `to` must not be the reserved zero identity
    /// - the caller's balance must cover the amount
    ///
    /// A self-transfer is a net no-op but both checks still apply and the
    /// event still fires. Emits `Transfer` and returns both resulting
    /// balances.
    pub fn transfer(
        &mut self,
        caller: &Address,
        to: &Address,
        amount: &TokenAmount,
    ) -> Result<TransferReturn> {
        validate_recipient(to)?;

        let ret = self.transaction(|state| {
            // don't move anything if to == from, but the balance must still
            // cover the amount
            if caller == to {
                let balance = state.get_balance(caller);
                if balance < *amount {
                    return Err(StateError::InsufficientBalance {
                        owner: *caller,
                        balance,
                        required: *amount,
                    }
                    .into());
                }
                Ok(TransferReturn { from_balance: balance, to_balance: balance })
            } else {
                let from_balance = state.debit(*caller, amount)?;
                let to_balance = state.credit(*to, amount)?;
                Ok(TransferReturn { from_balance, to_balance })
            }
        })?;

        tracing::debug!(from = %caller, to = %to, amount = %amount, "transfer");
        self.sink.emit(TokenEvent::Transfer { from: *caller, to: *to, amount: *amount });
        Ok(ret)
    }

    /// Sets the allowance between the caller and `spender` to `amount`.
    ///
    /// An absolute set, not an increment, and deliberately unconstrained by
    /// the caller's current balance; coverage is enforced when the allowance
    /// is spent. Emits `Approval` and returns the previous allowance.
    pub fn approve(
        &mut self,
        caller: &Address,
        spender: &Address,
        amount: &TokenAmount,
    ) -> Result<AllowanceReturn> {
        let previous = self.state.set_allowance(*caller, *spender, amount);

        tracing::debug!(owner = %caller, spender = %spender, amount = %amount, "approve");
        self.sink.emit(TokenEvent::Approval {
            owner: *caller,
            spender: *spender,
            amount: *amount,
        });
        Ok(previous)
    }

    /// Moves `amount` out of `from`'s balance to `to`, with the caller acting
    /// as a delegated spender.
    ///
    /// Preconditions, checked in order:
    /// - `to` must not be the reserved zero identity
    /// - the allowance `from` granted the caller must cover the amount
    /// - `from`'s balance must cover the amount
    ///
    /// A covering allowance is decremented even when it lands on exactly
    /// zero; an allowance stored at [`TokenAmount::MAX`] is unlimited and left
    /// untouched. Emits a single `Transfer`; the allowance decrement emits no
    /// separate `Approval`.
    pub fn transfer_from(
        &mut self,
        caller: &Address,
        from: &Address,
        to: &Address,
        amount: &TokenAmount,
    ) -> Result<TransferFromReturn> {
        validate_recipient(to)?;

        let ret = self.transaction(|state| {
            let allowance = state.attempt_use_allowance(*caller, *from, amount)?;
            // don't move anything if to == from, but the balance must still
            // cover the amount
            if from == to {
                let balance = state.get_balance(from);
                if balance < *amount {
                    return Err(StateError::InsufficientBalance {
                        owner: *from,
                        balance,
                        required: *amount,
                    }
                    .into());
                }
                Ok(TransferFromReturn { from_balance: balance, to_balance: balance, allowance })
            } else {
                let from_balance = state.debit(*from, amount)?;
                let to_balance = state.credit(*to, amount)?;
                Ok(TransferFromReturn { from_balance, to_balance, allowance })
            }
        })?;

        tracing::debug!(spender = %caller, from = %from, to = %to, amount = %amount, "transfer_from");
        self.sink.emit(TokenEvent::Transfer { from: *from, to: *to, amount: *amount });
        Ok(ret)
    }

    /// Raises the allowance between the caller and `spender` by `delta`.
    ///
    /// Fails with `ArithmeticOverflow` past the representable maximum. Emits
    /// `Approval` carrying the new total and returns it.
    pub fn increase_allowance(
        &mut self,
        caller: &Address,
        spender: &Address,
        delta: &TokenAmount,
    ) -> Result<AllowanceReturn> {
        let new_allowance = self.state.increase_allowance(*caller, *spender, delta)?;

        tracing::debug!(owner = %caller, spender = %spender, allowance = %new_allowance, "increase_allowance");
        self.sink.emit(TokenEvent::Approval {
            owner: *caller,
            spender: *spender,
            amount: new_allowance,
        });
        Ok(new_allowance)
    }

    /// Lowers the allowance between the caller and `spender` by `delta`.
    ///
    /// The current allowance must cover the decrease, else the call fails
    /// with `AllowanceUnderflow`. Emits `Approval` carrying the new total and
    /// returns it.
    pub fn decrease_allowance(
        &mut self,
        caller: &Address,
        spender: &Address,
        delta: &TokenAmount,
    ) -> Result<AllowanceReturn> {
        let new_allowance = self.state.decrease_allowance(*caller, *spender, delta)?;

        tracing::debug!(owner = %caller, spender = %spender, allowance = %new_allowance, "decrease_allowance");
        self.sink.emit(TokenEvent::Approval {
            owner: *caller,
            spender: *spender,
            amount: new_allowance,
        });
        Ok(new_allowance)
    }

    /// Checks the state invariants, throwing an error if they are not met.
    pub fn assert_invariants(&self) -> std::result::Result<StateSummary, StateInvariantError> {
        self.state.check_invariants()
    }
}

/// Validates that a transfer destination is not the reserved zero identity.
///
/// Returns the argument, or an error.
fn validate_recipient(to: &Address) -> Result<&Address> {
    if to.is_zero() {
        return Err(TokenError::InvalidRecipient(*to));
    }
    Ok(to)
}
