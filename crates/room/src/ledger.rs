use super::*;
use mole_core::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// One row of the room-wide investment snapshot broadcast after every
/// submission.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Portfolio {
    pub name: String,
    pub investment: BTreeMap<String, Amount>,
}

impl Room {
    /// Records a submission by replacing the caller's allocation
    /// wholesale. Returns false when the id is no longer seated (already
    /// swept by a disconnect), which callers treat as a no-op.
    pub fn invest(&mut self, id: ID<Player>, investment: BTreeMap<String, Amount>) -> bool {
        match self.player_mut(id) {
            Some(player) => {
                player.reinvest(investment);
                true
            }
            None => false,
        }
    }
    /// Snapshot of every seated player's current allocation, in join
    /// order. Broadcast after each submission whether or not it changed
    /// anything.
    pub fn portfolios(&self) -> Vec<Portfolio> {
        self.players()
            .iter()
            .map(|p| Portfolio {
                name: p.name().to_string(),
                investment: p.investment().clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allocation(pairs: &[(&str, Amount)]) -> BTreeMap<String, Amount> {
        pairs
            .iter()
            .map(|(sector, amount)| (sector.to_string(), *amount))
            .collect()
    }

    #[test]
    fn resubmission_replaces_rather_than_merges() {
        let mut room = Room::new("X");
        let id = ID::default();
        room.join(id, "Alice");
        assert!(room.invest(id, allocation(&[("tech", 5.0)])));
        assert!(room.invest(id, allocation(&[("energy", 3.0)])));
        let investment = room.player(id).unwrap().investment();
        assert_eq!(investment.get("energy"), Some(&3.0));
        assert!(!investment.contains_key("tech"));
    }

    #[test]
    fn unknown_id_is_a_noop() {
        let mut room = Room::new("X");
        room.join(ID::default(), "Alice");
        assert!(!room.invest(ID::default(), allocation(&[("tech", 1.0)])));
        assert!(room.players()[0].investment().is_empty());
    }

    #[test]
    fn snapshot_covers_all_players_in_join_order() {
        let mut room = Room::new("X");
        let (p1, p2) = (ID::default(), ID::default());
        room.join(p1, "Alice");
        room.join(p2, "Bob");
        room.invest(p2, allocation(&[("tech", 2.0)]));
        let portfolios = room.portfolios();
        assert_eq!(portfolios.len(), 2);
        assert_eq!(portfolios[0].name, "Alice");
        assert!(portfolios[0].investment.is_empty());
        assert_eq!(portfolios[1].investment.get("tech"), Some(&2.0));
    }
}
