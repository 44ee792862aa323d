use std::fmt;

use serde::{Deserialize, Serialize};

/// Width of an address payload in bytes.
pub const PAYLOAD_LEN: usize = 20;

/// An opaque, fixed-width account identity.
///
/// The ledger never inspects the payload; addresses are only compared and used
/// as map keys. The all-zero payload is reserved and can never receive a
/// transfer.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address([u8; PAYLOAD_LEN]);

impl Address {
    /// The reserved all-zero identity.
    pub const ZERO: Address = Address([0u8; PAYLOAD_LEN]);

    /// Wraps a raw payload as an address.
    pub const fn new(payload: [u8; PAYLOAD_LEN]) -> Self {
        Address(payload)
    }

    /// Constructs an address from a numeric id.
    ///
    /// The id is written big-endian into the tail of an otherwise zero
    /// payload, so distinct ids yield distinct addresses and id 0 is the
    /// reserved zero identity. Mainly useful for fixtures and tests.
    pub const fn new_id(id: u64) -> Self {
        let mut payload = [0u8; PAYLOAD_LEN];
        let bytes = id.to_be_bytes();
        let mut i = 0;
        while i < bytes.len() {
            payload[PAYLOAD_LEN - bytes.len() + i] = bytes[i];
            i += 1;
        }
        Address(payload)
    }

    /// True for the reserved zero identity.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// The raw payload bytes.
    pub fn payload(&self) -> &[u8; PAYLOAD_LEN] {
        &self.0
    }
}

impl From<[u8; PAYLOAD_LEN]> for Address {
    fn from(payload: [u8; PAYLOAD_LEN]) -> Self {
        Address(payload)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod test {
    use super::{Address, PAYLOAD_LEN};

    #[test]
    fn it_reserves_the_zero_identity() {
        assert!(Address::ZERO.is_zero());
        assert_eq!(Address::new_id(0), Address::ZERO);
        assert!(!Address::new_id(1).is_zero());
    }

    #[test]
    fn it_distinguishes_ids() {
        assert_ne!(Address::new_id(1), Address::new_id(2));
        assert_eq!(Address::new_id(7), Address::new_id(7));
    }

    #[test]
    fn it_renders_as_hex() {
        let mut payload = [0u8; PAYLOAD_LEN];
        payload[PAYLOAD_LEN - 1] = 0xff;
        let address = Address::new(payload);
        assert_eq!(address.to_string(), format!("0x{}ff", "00".repeat(PAYLOAD_LEN - 1)));
    }
}
