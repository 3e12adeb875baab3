//! Chain id classification
//!
//! The host identifies chains as `"<namespace>:<reference>"` (CAIP-2 style,
//! e.g. `eip155:7560`). Only the Cyber mainnet and testnet references are
//! served; every other chain gets no answer.

/// Cyber mainnet chain id
pub const CYBER_MAINNET_ID: u64 = 7560;

/// Cyber testnet chain id
pub const CYBER_TESTNET_ID: u64 = 111_557_560;

/// The network a lookup is served from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    /// Classify a numeric chain id. Unknown chains are unsupported.
    #[must_use]
    pub fn from_chain_id(id: u64) -> Option<Self> {
        match id {
            CYBER_MAINNET_ID => Some(Network::Mainnet),
            CYBER_TESTNET_ID => Some(Network::Testnet),
            _ => None,
        }
    }

    /// Parse and classify a composite `"namespace:reference"` chain id
    #[must_use]
    pub fn from_caip2(chain_id: &str) -> Option<Self> {
        parse_chain_reference(chain_id).and_then(Self::from_chain_id)
    }

    #[inline]
    #[must_use]
    pub fn is_testnet(self) -> bool {
        matches!(self, Network::Testnet)
    }

    /// Chain id sent as the `chainId` GraphQL variable
    #[inline]
    #[must_use]
    pub fn chain_id(self) -> u64 {
        match self {
            Network::Mainnet => CYBER_MAINNET_ID,
            Network::Testnet => CYBER_TESTNET_ID,
        }
    }
}

/// Extract the decimal reference from a composite chain id.
///
/// Takes the segment between the first and second `:` and reads it leniently:
/// leading whitespace and a sign are allowed and trailing garbage is ignored,
/// so `"eip155: 7560abc"` yields 7560. Returns `None` when the segment is
/// missing, holds no digits, is negative, or overflows.
#[must_use]
pub fn parse_chain_reference(chain_id: &str) -> Option<u64> {
    let reference = chain_id.split(':').nth(1)?;
    let reference = reference.trim_start();

    let (negative, digits) = match reference.as_bytes().first()? {
        b'-' => (true, &reference[1..]),
        b'+' => (false, &reference[1..]),
        _ => (false, reference),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value = digits[..end].parse::<u64>().ok()?;
    // -0 is still zero; any other negative id cannot name a chain
    if negative && value != 0 {
        return None;
    }
    Some(value)
}
