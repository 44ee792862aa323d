//! Notification records emitted by the ledger.
//!
//! Every successful mutating operation produces exactly one event, handed to
//! the [`EventSink`] only after the state change has been committed. Failed
//! calls never reach the sink.

use fintap_shared::{Address, TokenAmount};
use serde::{Deserialize, Serialize};

/// An observable record of a completed ledger mutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenEvent {
    /// Tokens moved out of `from`'s balance into `to`'s.
    Transfer { from: Address, to: Address, amount: TokenAmount },
    /// `owner` set the amount `spender` may move on its behalf.
    Approval { owner: Address, spender: Address, amount: TokenAmount },
}

/// Receives notifications from the ledger.
///
/// Implementations forward events to whatever observers live outside the
/// accounting core. The ledger guarantees one call per successful mutation,
/// made after state is fully updated.
pub trait EventSink {
    fn emit(&mut self, event: TokenEvent);
}

/// An append-only, in-memory event log.
///
/// The default sink for embedding environments and tests that want to inspect
/// the notification stream directly.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<TokenEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The most recently recorded event, if any.
    pub fn last(&self) -> Option<&TokenEvent> {
        self.events.last()
    }

    /// All recorded events, oldest first.
    pub fn as_slice(&self) -> &[TokenEvent] {
        &self.events
    }

    /// Removes and returns all recorded events, oldest first.
    pub fn drain(&mut self) -> Vec<TokenEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: TokenEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod test {
    use fintap_shared::{Address, TokenAmount};

    use super::{EventLog, EventSink, TokenEvent};

    #[test]
    fn it_records_in_order() {
        let mut log = EventLog::new();
        assert!(log.is_empty());

        let transfer = TokenEvent::Transfer {
            from: Address::new_id(1),
            to: Address::new_id(2),
            amount: TokenAmount::from_units(10),
        };
        let approval = TokenEvent::Approval {
            owner: Address::new_id(1),
            spender: Address::new_id(3),
            amount: TokenAmount::from_units(5),
        };

        log.emit(transfer.clone());
        log.emit(approval.clone());

        assert_eq!(log.len(), 2);
        assert_eq!(log.last(), Some(&approval));
        assert_eq!(log.drain(), vec![transfer, approval]);
        assert!(log.is_empty());
    }
}
