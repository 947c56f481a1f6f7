use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Query operations a currency's explorer backend can answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    BlockHeight,
    Difficulty,
    ReceivedAmount,
    ConfirmableBalance,
    BlockBalanceable,
    Hashable,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::BlockHeight => "block height",
            Capability::Difficulty => "difficulty",
            Capability::ReceivedAmount => "received amount",
            Capability::ConfirmableBalance => "balance with explicit confirmations",
            Capability::BlockBalanceable => "balance at block",
            Capability::Hashable => "network hashrate",
        };
        f.write_str(name)
    }
}

/// Immutable set of capabilities declared by a currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CapabilitySet(BTreeSet<Capability>);

impl CapabilitySet {
    pub fn new(capabilities: &[Capability]) -> Self {
        Self(capabilities.iter().copied().collect())
    }

    pub fn contains(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
