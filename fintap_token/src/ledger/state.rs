use std::collections::HashMap;

use fintap_shared::{Address, TokenAmount};
use num_traits::{CheckedAdd, CheckedSub, Zero};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StateError {
    #[error("{owner} holds {balance} which cannot cover a debit of {required}")]
    InsufficientBalance { owner: Address, balance: TokenAmount, required: TokenAmount },
    #[error("{spender} attempted to use {required} of the {allowance} approved by {owner}")]
    InsufficientAllowance {
        owner: Address,
        spender: Address,
        allowance: TokenAmount,
        required: TokenAmount,
    },
    #[error(
        "cannot decrease the allowance {owner} granted {spender} below zero ({allowance} - {decrease})"
    )]
    AllowanceUnderflow {
        owner: Address,
        spender: Address,
        allowance: TokenAmount,
        decrease: TokenAmount,
    },
    #[error("adding {delta} to {amount} exceeds the representable amount range")]
    ArithmeticOverflow { amount: TokenAmount, delta: TokenAmount },
}

#[derive(Error, Debug)]
pub enum StateInvariantError {
    #[error("the sum of all balances {balance_sum} does not match the recorded supply {supply}")]
    SupplyMismatch { supply: TokenAmount, balance_sum: TokenAmount },
    #[error("summing balances exceeded the representable amount range")]
    BalanceSumOverflow,
    #[error("the reserved zero identity holds a balance of {0}")]
    ReservedIdentityBalance(TokenAmount),
}

type Result<T> = std::result::Result<T, StateError>;

/// Balances and allowances behind the ledger.
///
/// This is a plain mutation layer: it enforces arithmetic soundness (a debit
/// can never push a balance negative, an addition can never wrap) but not
/// protocol rules such as recipient validation or event emission, which live
/// in the [`Ledger`](super::Ledger) handle.
///
/// Entries that reach zero stay in the maps; absent keys are implicitly zero.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerState {
    /// Total supply of the token, fixed at construction
    pub supply: TokenAmount,
    /// Balance per holder. Allowances are stored allowances[owner][spender]
    balances: HashMap<Address, TokenAmount>,
    allowances: HashMap<Address, HashMap<Address, TokenAmount>>,
}

impl LedgerState {
    /// An empty ledger with zero supply.
    pub fn new() -> Self {
        Self::default()
    }

    /// The genesis state: the whole supply credited to a single holder.
    pub(crate) fn with_initial_supply(holder: Address, supply: TokenAmount) -> Self {
        let mut balances = HashMap::new();
        balances.insert(holder, supply);
        Self { supply, balances, allowances: HashMap::new() }
    }

    /// The balance held by an address, implicitly zero for absent keys.
    pub fn get_balance(&self, owner: &Address) -> TokenAmount {
        self.balances.get(owner).copied().unwrap_or_else(TokenAmount::zero)
    }

    /// Number of addresses with a represented balance entry.
    pub fn holder_count(&self) -> usize {
        self.balances.len()
    }

    /// Adds to an account's balance, returning the new balance.
    pub fn credit(&mut self, owner: Address, amount: &TokenAmount) -> Result<TokenAmount> {
        let balance = self.get_balance(&owner);
        let new_balance = balance
            .checked_add(amount)
            .ok_or(StateError::ArithmeticOverflow { amount: balance, delta: *amount })?;
        self.balances.insert(owner, new_balance);
        Ok(new_balance)
    }

    /// Removes from an account's balance, returning the new balance.
    pub fn debit(&mut self, owner: Address, amount: &TokenAmount) -> Result<TokenAmount> {
        let balance = self.get_balance(&owner);
        let new_balance = balance.checked_sub(amount).ok_or(StateError::InsufficientBalance {
            owner,
            balance,
            required: *amount,
        })?;
        self.balances.insert(owner, new_balance);
        Ok(new_balance)
    }

    /// The allowance `owner` has approved for `spender`, implicitly zero.
    pub fn get_allowance(&self, owner: &Address, spender: &Address) -> TokenAmount {
        self.allowances
            .get(owner)
            .and_then(|owner_allowances| owner_allowances.get(spender))
            .copied()
            .unwrap_or_else(TokenAmount::zero)
    }

    /// Sets the allowance between owner and spender to a specific amount,
    /// returning the old allowance.
    pub fn set_allowance(
        &mut self,
        owner: Address,
        spender: Address,
        amount: &TokenAmount,
    ) -> TokenAmount {
        self.allowances
            .entry(owner)
            .or_default()
            .insert(spender, *amount)
            .unwrap_or_else(TokenAmount::zero)
    }

    /// Raises the allowance between owner and spender by `delta`, returning
    /// the new allowance.
    pub fn increase_allowance(
        &mut self,
        owner: Address,
        spender: Address,
        delta: &TokenAmount,
    ) -> Result<TokenAmount> {
        let allowance = self.get_allowance(&owner, &spender);
        let new_allowance = allowance
            .checked_add(delta)
            .ok_or(StateError::ArithmeticOverflow { amount: allowance, delta: *delta })?;
        self.allowances.entry(owner).or_default().insert(spender, new_allowance);
        Ok(new_allowance)
    }

    /// Lowers the allowance between owner and spender by `delta`, returning
    /// the new allowance. The current allowance must cover the decrease.
    pub fn decrease_allowance(
        &mut self,
        owner: Address,
        spender: Address,
        delta: &TokenAmount,
    ) -> Result<TokenAmount> {
        let allowance = self.get_allowance(&owner, &spender);
        let new_allowance = allowance.checked_sub(delta).ok_or(StateError::AllowanceUnderflow {
            owner,
            spender,
            allowance,
            decrease: *delta,
        })?;
        self.allowances.entry(owner).or_default().insert(spender, new_allowance);
        Ok(new_allowance)
    }

    /// Atomically checks that `amount` is covered by the spender's allowance
    /// and deducts it.
    ///
    /// An allowance stored at exactly [`TokenAmount::MAX`] is unlimited and is
    /// left untouched; any other covering allowance is decremented, including
    /// down to exactly zero. Returns the remaining allowance.
    pub fn attempt_use_allowance(
        &mut self,
        spender: Address,
        owner: Address,
        amount: &TokenAmount,
    ) -> Result<TokenAmount> {
        let allowance = self.get_allowance(&owner, &spender);
        if allowance < *amount {
            return Err(StateError::InsufficientAllowance {
                owner,
                spender,
                allowance,
                required: *amount,
            });
        }

        if allowance == TokenAmount::MAX {
            return Ok(allowance);
        }

        self.decrease_allowance(owner, spender, amount)
    }

    /// Checks that the current state obeys the system invariants.
    ///
    /// The sum of all balances must equal the recorded supply, and the
    /// reserved zero identity must hold nothing (it can never legally receive
    /// a transfer). Returns a summary that embedders can use to check their
    /// own invariants.
    pub fn check_invariants(&self) -> std::result::Result<StateSummary, StateInvariantError> {
        let mut balance_sum = TokenAmount::zero();
        for balance in self.balances.values() {
            balance_sum = balance_sum
                .checked_add(balance)
                .ok_or(StateInvariantError::BalanceSumOverflow)?;
        }

        if balance_sum != self.supply {
            return Err(StateInvariantError::SupplyMismatch { supply: self.supply, balance_sum });
        }

        let reserved = self.get_balance(&Address::ZERO);
        if !reserved.is_zero() {
            return Err(StateInvariantError::ReservedIdentityBalance(reserved));
        }

        Ok(StateSummary {
            supply: self.supply,
            balance_sum,
            holder_count: self.balances.len(),
            approval_count: self
                .allowances
                .values()
                .map(|owner_allowances| owner_allowances.len())
                .sum(),
        })
    }
}

/// A summary of the current state to allow checking embedder-specific
/// invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateSummary {
    pub supply: TokenAmount,
    pub balance_sum: TokenAmount,
    pub holder_count: usize,
    pub approval_count: usize,
}
