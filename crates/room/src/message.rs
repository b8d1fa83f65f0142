use super::*;
use mole_core::*;
use serde::Serialize;

/// Messages sent from server to client over WebSocket.
///
/// `RoleAssignment` is unicast to the joining connection; everything
/// else is broadcast to the whole room.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Your dealt role, the current unlock count, and whether you host.
    RoleAssignment {
        role: Role,
        sectors_unlocked: Sectors,
        host: bool,
    },
    /// Display names of everyone seated, in join order.
    UpdatePlayers { players: Vec<String> },
    /// The host started the game.
    GameStarted { sectors_unlocked: Sectors },
    /// A news item about a sector.
    NewsFlashed { sector: String, message: String },
    /// The unlock count changed.
    SectorsUnlocked { new_unlock: Sectors },
    /// Everyone's current allocations.
    UpdateInvestments { portfolios: Vec<Portfolio> },
    /// A tip aimed at a named player.
    ReceiveTip {
        target_name: String,
        message: String,
    },
    /// Final ranking and the unmasked impostor.
    GameEnded {
        #[serde(skip_serializing_if = "Option::is_none")]
        winner: Option<Standing>,
        impostor_id: Option<String>,
        scores: Vec<Standing>,
    },
}

impl ServerMessage {
    pub fn role_assignment(role: Role, sectors_unlocked: Sectors, host: bool) -> Self {
        Self::RoleAssignment {
            role,
            sectors_unlocked,
            host,
        }
    }
    pub fn update_players(players: Vec<String>) -> Self {
        Self::UpdatePlayers { players }
    }
    pub fn game_started(sectors_unlocked: Sectors) -> Self {
        Self::GameStarted { sectors_unlocked }
    }
    pub fn news_flashed(sector: String, message: String) -> Self {
        Self::NewsFlashed { sector, message }
    }
    pub fn sectors_unlocked(new_unlock: Sectors) -> Self {
        Self::SectorsUnlocked { new_unlock }
    }
    pub fn update_investments(portfolios: Vec<Portfolio>) -> Self {
        Self::UpdateInvestments { portfolios }
    }
    pub fn receive_tip(target_name: String, message: String) -> Self {
        Self::ReceiveTip {
            target_name,
            message,
        }
    }
    pub fn game_ended(results: Results) -> Self {
        Self::GameEnded {
            winner: results.winner,
            impostor_id: results.impostor_id,
            scores: results.scores,
        }
    }
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("serialize server message")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_tags_are_snake_case() {
        let json = ServerMessage::game_started(3).to_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "game_started");
        assert_eq!(value["sectors_unlocked"], 3);
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = ServerMessage::role_assignment(Role::Impostor, 3, false).to_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["role"], "impostor");
        assert_eq!(value["host"], false);
    }

    #[test]
    fn winnerless_result_omits_winner_field() {
        let json = ServerMessage::game_ended(Results {
            winner: None,
            impostor_id: None,
            scores: vec![],
        })
        .to_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("winner").is_none());
        assert!(value["impostor_id"].is_null());
    }
}
