//! Per-nation resource ledger

use serde::{Deserialize, Serialize};

/// Resource kinds a nation stockpiles
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    Gold,
    Food,
    Production,
    Science,
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::Gold,
        Resource::Food,
        Resource::Production,
        Resource::Science,
    ];
}

/// Resource stock of one nation. Amounts are unsigned, so a balance can
/// never go negative; spend refuses instead of overdrawing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    amounts: [u32; 4],
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current balance of one resource
    pub fn amount(&self, resource: Resource) -> u32 {
        self.amounts[resource as usize]
    }

    /// Add to a balance
    pub fn add(&mut self, resource: Resource, amount: u32) {
        self.amounts[resource as usize] += amount;
    }

    /// Spend from a balance; refuses without mutating when the balance is
    /// insufficient
    pub fn spend(&mut self, resource: Resource, amount: u32) -> bool {
        if !self.has(resource, amount) {
            return false;
        }
        self.amounts[resource as usize] -= amount;
        true
    }

    /// Whether at least `amount` of the resource is available
    pub fn has(&self, resource: Resource, amount: u32) -> bool {
        self.amount(resource) >= amount
    }
}
