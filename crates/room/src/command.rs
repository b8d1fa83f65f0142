use mole_core::*;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Client-to-server frames, one per player action.
///
/// Disconnects carry no frame: the transport reports socket closure out
/// of band. Room codes and names ride along uninterpreted.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Create-or-join a room under the given code.
    Join { room_code: String, name: String },
    /// Host starts the game.
    Start { room_code: String },
    /// Broadcast a news item about a sector. Pure relay.
    FlashNews {
        room_code: String,
        sector: String,
        message: String,
    },
    /// Host resets the number of investable sectors.
    UnlockSectors {
        room_code: String,
        new_unlock: Sectors,
    },
    /// Replace the caller's entire allocation.
    SubmitInvestment {
        room_code: String,
        investments: BTreeMap<String, Amount>,
    },
    /// Whisper a (possibly misleading) tip at a named player. Pure relay.
    SendTip {
        room_code: String,
        target_name: String,
        message: String,
    },
    /// Compute and reveal the final ranking.
    EndGame { room_code: String },
}
