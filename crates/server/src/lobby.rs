use mole_core::*;
use mole_room::*;
use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::sync::RwLock;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;

type Tx = UnboundedSender<String>;

/// Connection hub bridging WebSocket sessions to the room engine.
///
/// The engine sits behind a single mutex so inbound frames apply one at
/// a time to completion, which keeps every read-modify-broadcast
/// sequence atomic without per-room locking. Subscription bookkeeping
/// lives here, not in the engine: a connection stays subscribed to every
/// code it joined, even after its player record has been swept.
pub struct Lobby {
    engine: Mutex<Engine>,
    sessions: RwLock<HashMap<ID<Player>, Tx>>,
    channels: RwLock<HashMap<String, HashSet<ID<Player>>>>,
}

impl Default for Lobby {
    fn default() -> Self {
        Self::new()
    }
}

impl Lobby {
    pub fn new() -> Self {
        Self {
            engine: Mutex::new(Engine::new()),
            sessions: RwLock::new(HashMap::new()),
            channels: RwLock::new(HashMap::new()),
        }
    }
    /// Registers a fresh connection and returns its minted id plus the
    /// outbound frame receiver.
    pub async fn connect(&self) -> (ID<Player>, UnboundedReceiver<String>) {
        let id = ID::default();
        let (tx, rx) = unbounded_channel();
        self.sessions.write().await.insert(id, tx);
        log::debug!("[lobby] connection {} registered", id);
        (id, rx)
    }
    /// Applies one inbound text frame and fans out the results.
    /// Malformed frames are logged and dropped, nothing goes back.
    pub async fn handle(&self, caller: ID<Player>, text: &str) {
        let msg = match Protocol::decode(text) {
            Ok(msg) => msg,
            Err(e) => {
                log::warn!("[lobby] dropping frame from {}: {}", caller, e);
                return;
            }
        };
        if let ClientMessage::Join { ref room_code, .. } = msg {
            self.channels
                .write()
                .await
                .entry(room_code.clone())
                .or_default()
                .insert(caller);
        }
        let outgoing = self.engine.lock().await.apply(caller, msg);
        for out in outgoing {
            match out {
                Outgoing::Reply(msg) => self.unicast(caller, msg).await,
                Outgoing::Broadcast(code, msg) => self.broadcast(&code, msg).await,
            }
        }
    }
    /// Tears down a closed connection: sweeps it from every room and
    /// forgets its session and subscriptions.
    pub async fn hangup(&self, id: ID<Player>) {
        self.engine.lock().await.hangup(id);
        self.sessions.write().await.remove(&id);
        for members in self.channels.write().await.values_mut() {
            members.remove(&id);
        }
        log::info!("[lobby] connection {} closed", id);
    }
    async fn unicast(&self, id: ID<Player>, msg: ServerMessage) {
        if let Some(tx) = self.sessions.read().await.get(&id) {
            let _ = tx.send(msg.to_json());
        }
    }
    async fn broadcast(&self, code: &str, msg: ServerMessage) {
        let json = msg.to_json();
        let channels = self.channels.read().await;
        let Some(members) = channels.get(code) else {
            return;
        };
        let sessions = self.sessions.read().await;
        for id in members {
            if let Some(tx) = sessions.get(id) {
                let _ = tx.send(json.clone());
            }
        }
    }
}

impl Lobby {
    /// Spawns the per-connection bridge between actix-ws and the engine:
    /// outbound channel frames go down the socket, socket text frames go
    /// into the engine, and socket closure sweeps the player.
    pub async fn bridge(
        self: Arc<Self>,
        mut session: actix_ws::Session,
        mut stream: actix_ws::MessageStream,
    ) {
        use futures::StreamExt;
        let (id, mut rx) = self.connect().await;
        log::debug!("[bridge {}] connected", id);
        actix_web::rt::spawn(async move {
            'sesh: loop {
                tokio::select! {
                    biased;
                    msg = rx.recv() => match msg {
                        Some(json) => if session.text(json).await.is_err() { break 'sesh },
                        None => break 'sesh,
                    },
                    msg = stream.next() => match msg {
                        Some(Ok(actix_ws::Message::Text(text))) => self.handle(id, &text).await,
                        Some(Ok(actix_ws::Message::Close(_))) => break 'sesh,
                        Some(Err(_)) => break 'sesh,
                        None => break 'sesh,
                        _ => continue 'sesh,
                    },
                }
            }
            self.hangup(id).await;
            log::debug!("[bridge {}] disconnected", id);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn joined(lobby: &Lobby, code: &str, name: &str) -> (ID<Player>, UnboundedReceiver<String>) {
        let (id, rx) = lobby.connect().await;
        let frame = format!(r#"{{"type":"join","room_code":"{}","name":"{}"}}"#, code, name);
        lobby.handle(id, &frame).await;
        (id, rx)
    }

    fn kind(frame: &str) -> String {
        let value: serde_json::Value = serde_json::from_str(frame).unwrap();
        value["type"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn replies_go_to_the_joiner_broadcasts_to_the_room() {
        let lobby = Lobby::new();
        let (_, mut rx1) = joined(&lobby, "ABC123", "Alice").await;
        let (_, mut rx2) = joined(&lobby, "ABC123", "Bob").await;
        // Alice: her role assignment, then two roster broadcasts
        assert_eq!(kind(&rx1.try_recv().unwrap()), "role_assignment");
        assert_eq!(kind(&rx1.try_recv().unwrap()), "update_players");
        assert_eq!(kind(&rx1.try_recv().unwrap()), "update_players");
        // Bob: his role assignment, then the roster broadcast he was in
        assert_eq!(kind(&rx2.try_recv().unwrap()), "role_assignment");
        assert_eq!(kind(&rx2.try_recv().unwrap()), "update_players");
        assert!(rx2.try_recv().is_err());
    }

    #[tokio::test]
    async fn rooms_are_isolated() {
        let lobby = Lobby::new();
        let (host, mut rx1) = joined(&lobby, "one", "Alice").await;
        let (_, mut rx2) = joined(&lobby, "two", "Bob").await;
        lobby
            .handle(host, r#"{"type":"start","room_code":"one"}"#)
            .await;
        assert_eq!(kind(&rx1.try_recv().unwrap()), "role_assignment");
        assert_eq!(kind(&rx1.try_recv().unwrap()), "update_players");
        assert_eq!(kind(&rx1.try_recv().unwrap()), "game_started");
        assert_eq!(kind(&rx2.try_recv().unwrap()), "role_assignment");
        assert_eq!(kind(&rx2.try_recv().unwrap()), "update_players");
        assert!(rx2.try_recv().is_err());
    }

    #[tokio::test]
    async fn malformed_frames_are_dropped() {
        let lobby = Lobby::new();
        let (id, mut rx) = lobby.connect().await;
        lobby.handle(id, "not json").await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn hangup_unsubscribes_and_sweeps() {
        let lobby = Lobby::new();
        let (ghost, _rx1) = joined(&lobby, "ABC123", "ghost").await;
        let (stays, mut rx2) = joined(&lobby, "ABC123", "stays").await;
        lobby.hangup(ghost).await;
        lobby
            .handle(stays, r#"{"type":"end_game","room_code":"ABC123"}"#)
            .await;
        while let Ok(frame) = rx2.try_recv() {
            if kind(&frame) == "game_ended" {
                let value: serde_json::Value = serde_json::from_str(&frame).unwrap();
                let scores = value["scores"].as_array().unwrap();
                assert_eq!(scores.len(), 1);
                assert_eq!(scores[0]["name"], "stays");
                return;
            }
        }
        panic!("game_ended never reached the surviving connection");
    }
}
