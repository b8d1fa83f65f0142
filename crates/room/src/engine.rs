use super::*;
use mole_core::*;

/// A message leaving the engine, already addressed.
#[derive(Clone, Debug)]
pub enum Outgoing {
    /// For the connection that sent the inbound frame.
    Reply(ServerMessage),
    /// For every connection subscribed to the room code.
    Broadcast(String, ServerMessage),
}

/// Synchronous command dispatcher over the room table.
///
/// One inbound message is applied to completion before the next; the
/// transport serializes calls, so each read-modify-broadcast sequence is
/// atomic. Unknown rooms, unauthorized callers, and stale player ids are
/// all handled by logging and skipping the mutation, fire-and-forget.
#[derive(Debug, Default)]
pub struct Engine {
    registry: Registry,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
    /// Applies one decoded client frame and returns the addressed
    /// messages to deliver.
    pub fn apply(&mut self, caller: ID<Player>, msg: ClientMessage) -> Vec<Outgoing> {
        match msg {
            ClientMessage::Join { room_code, name } => self.join(caller, &room_code, &name),
            ClientMessage::Start { room_code } => self.start(caller, &room_code),
            ClientMessage::FlashNews {
                room_code,
                sector,
                message,
            } => vec![Outgoing::Broadcast(
                room_code,
                ServerMessage::news_flashed(sector, message),
            )],
            ClientMessage::UnlockSectors {
                room_code,
                new_unlock,
            } => self.unlock(caller, &room_code, new_unlock),
            ClientMessage::SubmitInvestment {
                room_code,
                investments,
            } => self.invest(caller, &room_code, investments),
            ClientMessage::SendTip {
                room_code,
                target_name,
                message,
            } => vec![Outgoing::Broadcast(
                room_code,
                ServerMessage::receive_tip(target_name, message),
            )],
            ClientMessage::EndGame { room_code } => self.end_game(&room_code),
        }
    }
    /// Sweeps a closed connection out of every room. No broadcast: the
    /// remaining players keep their last seen roster.
    pub fn hangup(&mut self, caller: ID<Player>) {
        self.registry.sweep(caller);
        log::debug!("[engine] swept {} from all rooms", caller);
    }
}

impl Engine {
    fn join(&mut self, caller: ID<Player>, code: &str, name: &str) -> Vec<Outgoing> {
        let (lookup, room) = self.registry.get_or_create(code);
        if lookup == Lookup::Created {
            log::info!("[room {}] created", code);
        }
        let role = room.join(caller, name);
        log::info!("[room {}] {} joined as {:?}", code, name, role);
        vec![
            Outgoing::Reply(ServerMessage::role_assignment(
                role,
                room.sectors_unlocked(),
                room.is_host(caller),
            )),
            Outgoing::Broadcast(code.to_string(), ServerMessage::update_players(room.names())),
        ]
    }
    fn start(&mut self, caller: ID<Player>, code: &str) -> Vec<Outgoing> {
        let Some(room) = self.registry.get_mut(code) else {
            log::warn!("[room {}] start for unknown room", code);
            return vec![];
        };
        match room.start(caller) {
            Ok(sectors) => {
                log::info!("[room {}] game started", code);
                vec![Outgoing::Broadcast(
                    code.to_string(),
                    ServerMessage::game_started(sectors),
                )]
            }
            Err(denied) => {
                log::debug!("[room {}] start denied: {}", code, denied);
                vec![]
            }
        }
    }
    fn unlock(&mut self, caller: ID<Player>, code: &str, count: Sectors) -> Vec<Outgoing> {
        let Some(room) = self.registry.get_mut(code) else {
            log::warn!("[room {}] unlock for unknown room", code);
            return vec![];
        };
        match room.unlock(caller, count) {
            Ok(count) => vec![Outgoing::Broadcast(
                code.to_string(),
                ServerMessage::sectors_unlocked(count),
            )],
            Err(denied) => {
                log::debug!("[room {}] unlock denied: {}", code, denied);
                vec![]
            }
        }
    }
    fn invest(
        &mut self,
        caller: ID<Player>,
        code: &str,
        investments: std::collections::BTreeMap<String, Amount>,
    ) -> Vec<Outgoing> {
        let Some(room) = self.registry.get_mut(code) else {
            log::warn!("[room {}] investment for unknown room", code);
            return vec![];
        };
        if !room.invest(caller, investments) {
            log::debug!("[room {}] investment from unseated connection {}", code, caller);
        }
        // the snapshot goes out whether or not the submission landed
        vec![Outgoing::Broadcast(
            code.to_string(),
            ServerMessage::update_investments(room.portfolios()),
        )]
    }
    fn end_game(&mut self, code: &str) -> Vec<Outgoing> {
        let Some(room) = self.registry.get_mut(code) else {
            log::warn!("[room {}] end for unknown room", code);
            return vec![];
        };
        let results = room.results();
        room.finish();
        log::info!("[room {}] game ended", code);
        vec![Outgoing::Broadcast(
            code.to_string(),
            ServerMessage::game_ended(results),
        )]
    }
}
