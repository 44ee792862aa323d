//! Property tests for the ledger's accounting guarantees.
//!
//! Two properties hold over arbitrary operation sequences: the sum of all
//! balances never drifts from the fixed supply, and a rejected call leaves
//! the state exactly as it found it.

use fintap_shared::{Address, TokenAmount};
use fintap_token::event::EventLog;
use fintap_token::ledger::state::LedgerState;
use fintap_token::ledger::types::{ConstructorParams, TokenMetadata};
use fintap_token::ledger::Ledger;
use proptest::prelude::*;

const INITIAL_SUPPLY: u128 = 10_000;

/// One caller-attributed ledger operation.
#[derive(Clone, Debug)]
enum Op {
    Transfer { caller: Address, to: Address, amount: TokenAmount },
    Approve { caller: Address, spender: Address, amount: TokenAmount },
    TransferFrom { caller: Address, from: Address, to: Address, amount: TokenAmount },
    IncreaseAllowance { caller: Address, spender: Address, delta: TokenAmount },
    DecreaseAllowance { caller: Address, spender: Address, delta: TokenAmount },
}

/// A small pool of identities, including the reserved zero identity so that
/// recipient validation gets exercised.
fn address_strategy() -> impl Strategy<Value = Address> {
    (0u64..5).prop_map(Address::new_id)
}

/// Amounts straddle the supply so both success and rejection paths occur, and
/// occasionally sit at the unlimited-allowance sentinel.
fn amount_strategy() -> impl Strategy<Value = TokenAmount> {
    prop_oneof![
        8 => (0u128..=2 * INITIAL_SUPPLY).prop_map(TokenAmount::from_units),
        1 => Just(TokenAmount::MAX),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (address_strategy(), address_strategy(), amount_strategy())
            .prop_map(|(caller, to, amount)| Op::Transfer { caller, to, amount }),
        (address_strategy(), address_strategy(), amount_strategy())
            .prop_map(|(caller, spender, amount)| Op::Approve { caller, spender, amount }),
        (address_strategy(), address_strategy(), address_strategy(), amount_strategy()).prop_map(
            |(caller, from, to, amount)| Op::TransferFrom { caller, from, to, amount }
        ),
        (address_strategy(), address_strategy(), amount_strategy())
            .prop_map(|(caller, spender, delta)| Op::IncreaseAllowance { caller, spender, delta }),
        (address_strategy(), address_strategy(), amount_strategy())
            .prop_map(|(caller, spender, delta)| Op::DecreaseAllowance { caller, spender, delta }),
    ]
}

fn apply(ledger: &mut Ledger<'_, EventLog>, op: &Op) -> bool {
    match op {
        Op::Transfer { caller, to, amount } => ledger.transfer(caller, to, amount).is_ok(),
        Op::Approve { caller, spender, amount } => ledger.approve(caller, spender, amount).is_ok(),
        Op::TransferFrom { caller, from, to, amount } => {
            ledger.transfer_from(caller, from, to, amount).is_ok()
        }
        Op::IncreaseAllowance { caller, spender, delta } => {
            ledger.increase_allowance(caller, spender, delta).is_ok()
        }
        Op::DecreaseAllowance { caller, spender, delta } => {
            ledger.decrease_allowance(caller, spender, delta).is_ok()
        }
    }
}

fn genesis() -> LedgerState {
    let params =
        ConstructorParams::fintap(Address::new_id(1), TokenAmount::from_units(INITIAL_SUPPLY));
    Ledger::<EventLog>::create_state(&params).unwrap()
}

proptest! {
    #[test]
    fn supply_is_conserved_under_arbitrary_operations(
        ops in proptest::collection::vec(op_strategy(), 1..64)
    ) {
        let mut state = genesis();
        let mut ledger = Ledger::wrap(EventLog::new(), TokenMetadata::default(), &mut state);

        for op in &ops {
            apply(&mut ledger, op);
            let summary = ledger.assert_invariants().unwrap();
            prop_assert_eq!(summary.balance_sum, TokenAmount::from_units(INITIAL_SUPPLY));
            prop_assert_eq!(ledger.total_supply(), TokenAmount::from_units(INITIAL_SUPPLY));
        }
    }

    #[test]
    fn failed_calls_leave_state_and_events_untouched(
        ops in proptest::collection::vec(op_strategy(), 1..64)
    ) {
        let mut state = genesis();
        let mut ledger = Ledger::wrap(EventLog::new(), TokenMetadata::default(), &mut state);

        for op in &ops {
            let snapshot = ledger.state().clone();
            let events_before = ledger.sink().len();
            let ok = apply(&mut ledger, op);

            if ok {
                // exactly one notification per successful mutation
                prop_assert_eq!(ledger.sink().len(), events_before + 1);
            } else {
                prop_assert_eq!(ledger.state(), &snapshot);
                prop_assert_eq!(ledger.sink().len(), events_before);
            }
        }
    }
}
