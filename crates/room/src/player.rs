use mole_core::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// Role dealt to a player at the moment they join.
/// Exactly one role per player, immutable for the life of the seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Submits sector allocations and is scored by total invested amount.
    Investor,
    /// The one player per room whose tips are intentionally misleading.
    Impostor,
}

/// A seated connection in a room.
/// Created on join, mutated by investment submissions, discarded on
/// disconnect. Names are caller-supplied and never deduplicated.
#[derive(Clone, Debug)]
pub struct Player {
    id: ID<Player>,
    name: String,
    role: Role,
    investment: BTreeMap<String, Amount>,
}

impl Player {
    pub fn new(id: ID<Player>, name: &str, role: Role) -> Self {
        Self {
            id,
            name: name.to_string(),
            role,
            investment: BTreeMap::new(),
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn role(&self) -> Role {
        self.role
    }
    pub fn investment(&self) -> &BTreeMap<String, Amount> {
        &self.investment
    }
    /// Replaces the allocation wholesale. Last write wins; submissions
    /// never merge or accumulate.
    pub(crate) fn reinvest(&mut self, investment: BTreeMap<String, Amount>) {
        self.investment = investment;
    }
    /// Sum of all allocated amounts. Sector identity is irrelevant here.
    pub fn total(&self) -> Amount {
        self.investment.values().sum()
    }
}

impl Unique for Player {
    fn id(&self) -> ID<Self> {
        self.id
    }
}
