use super::*;
use mole_core::*;

/// Where a room sits in its lifecycle. Transitions only ever move
/// forward; an ended room can never restart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Lobby,
    InProgress,
    Ended,
}

impl Phase {
    /// Transition table. Lobby may start or end, a game in progress may
    /// only end, everything else is rejected.
    pub fn permits(self, next: Phase) -> bool {
        matches!(
            (self, next),
            (Phase::Lobby, Phase::InProgress)
                | (Phase::Lobby, Phase::Ended)
                | (Phase::InProgress, Phase::Ended)
        )
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Phase::Lobby => write!(f, "lobby"),
            Phase::InProgress => write!(f, "in progress"),
            Phase::Ended => write!(f, "ended"),
        }
    }
}

/// Why a gated action was dropped. Denials are logged and swallowed,
/// never surfaced on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Denied {
    NotHost,
    Phase(Phase),
}

impl std::fmt::Display for Denied {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Denied::NotHost => write!(f, "caller is not the host"),
            Denied::Phase(p) => write!(f, "room is {}", p),
        }
    }
}

/// An isolated game session identified by a caller-chosen code.
///
/// The first joiner becomes host, the second becomes the impostor, and
/// neither designation is ever reassigned, even after the holder
/// disconnects. Rooms persist for the life of the process.
#[derive(Debug)]
pub struct Room {
    code: String,
    host: Option<ID<Player>>,
    impostor: Option<ID<Player>>,
    players: Vec<Player>,
    sectors_unlocked: Sectors,
    phase: Phase,
}

impl Room {
    pub fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
            host: None,
            impostor: None,
            players: Vec::new(),
            sectors_unlocked: DEFAULT_SECTORS_UNLOCKED,
            phase: Phase::Lobby,
        }
    }
    pub fn code(&self) -> &str {
        &self.code
    }
    pub fn host(&self) -> Option<ID<Player>> {
        self.host
    }
    pub fn impostor(&self) -> Option<ID<Player>> {
        self.impostor
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn sectors_unlocked(&self) -> Sectors {
        self.sectors_unlocked
    }
    pub fn players(&self) -> &[Player] {
        &self.players
    }
    /// Display names in join order.
    pub fn names(&self) -> Vec<String> {
        self.players.iter().map(|p| p.name().to_string()).collect()
    }
    pub fn is_host(&self, id: ID<Player>) -> bool {
        self.host == Some(id)
    }
    pub fn player(&self, id: ID<Player>) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }
    pub(crate) fn player_mut(&mut self, id: ID<Player>) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id() == id)
    }
}

impl Room {
    /// Seats a joining connection and deals its role.
    ///
    /// Deterministic one-shot assignment: the first joiner hosts (as an
    /// investor), the second becomes the impostor, everyone after is an
    /// investor. No re-rolling and no reassignment on disconnect.
    pub fn join(&mut self, id: ID<Player>, name: &str) -> Role {
        let role = if self.host.is_none() {
            self.host = Some(id);
            Role::Investor
        } else if self.impostor.is_none() {
            self.impostor = Some(id);
            Role::Impostor
        } else {
            Role::Investor
        };
        self.players.push(Player::new(id, name, role));
        role
    }
    /// Host-gated Lobby -> InProgress transition.
    /// Returns the unlock count to broadcast on success.
    pub fn start(&mut self, caller: ID<Player>) -> Result<Sectors, Denied> {
        if !self.is_host(caller) {
            return Err(Denied::NotHost);
        }
        if !self.phase.permits(Phase::InProgress) {
            return Err(Denied::Phase(self.phase));
        }
        self.phase = Phase::InProgress;
        Ok(self.sectors_unlocked)
    }
    /// Host-gated sector count update. The value is stored verbatim;
    /// zero, negative, and shrinking counts all pass through unchecked.
    pub fn unlock(&mut self, caller: ID<Player>, count: Sectors) -> Result<Sectors, Denied> {
        if !self.is_host(caller) {
            return Err(Denied::NotHost);
        }
        self.sectors_unlocked = count;
        Ok(count)
    }
    /// Marks the room ended. Idempotent: ending an already-ended room
    /// changes nothing, and callers may still recompute results.
    pub fn finish(&mut self) {
        if self.phase.permits(Phase::Ended) {
            self.phase = Phase::Ended;
        }
    }
    /// Drops the player record. Host and impostor ids are left pointing
    /// at the departed connection by design.
    pub fn remove(&mut self, id: ID<Player>) {
        self.players.retain(|p| p.id() != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_joiner_hosts_second_is_impostor() {
        let mut room = Room::new("ABC123");
        assert_eq!(room.code(), "ABC123");
        let (p1, p2, p3) = (ID::default(), ID::default(), ID::default());
        assert_eq!(room.join(p1, "Alice"), Role::Investor);
        assert_eq!(room.join(p2, "Bob"), Role::Impostor);
        assert_eq!(room.join(p3, "Cara"), Role::Investor);
        assert_eq!(room.host(), Some(p1));
        assert_eq!(room.impostor(), Some(p2));
        assert_eq!(room.names(), vec!["Alice", "Bob", "Cara"]);
    }

    #[test]
    fn exactly_one_impostor_ever() {
        let mut room = Room::new("X");
        let ids: Vec<ID<Player>> = (0..5).map(|_| ID::default()).collect();
        for (i, id) in ids.iter().enumerate() {
            room.join(*id, &format!("p{}", i));
        }
        let impostors = room
            .players()
            .iter()
            .filter(|p| p.role() == Role::Impostor)
            .count();
        assert_eq!(impostors, 1);
        assert_eq!(room.impostor(), Some(ids[1]));
    }

    #[test]
    fn start_requires_host() {
        let mut room = Room::new("X");
        let host = ID::default();
        let other = ID::default();
        room.join(host, "host");
        room.join(other, "other");
        assert_eq!(room.start(other), Err(Denied::NotHost));
        assert_eq!(room.phase(), Phase::Lobby);
        assert_eq!(room.start(host), Ok(DEFAULT_SECTORS_UNLOCKED));
        assert_eq!(room.phase(), Phase::InProgress);
    }

    #[test]
    fn start_rejected_once_started_or_ended() {
        let mut room = Room::new("X");
        let host = ID::default();
        room.join(host, "host");
        assert!(room.start(host).is_ok());
        assert_eq!(room.start(host), Err(Denied::Phase(Phase::InProgress)));
        room.finish();
        assert_eq!(room.start(host), Err(Denied::Phase(Phase::Ended)));
    }

    #[test]
    fn unlock_is_host_gated_and_unclamped() {
        let mut room = Room::new("X");
        let host = ID::default();
        let other = ID::default();
        room.join(host, "host");
        room.join(other, "other");
        assert_eq!(room.unlock(other, 7), Err(Denied::NotHost));
        assert_eq!(room.sectors_unlocked(), DEFAULT_SECTORS_UNLOCKED);
        assert_eq!(room.unlock(host, -2), Ok(-2));
        assert_eq!(room.sectors_unlocked(), -2);
        assert_eq!(room.unlock(host, 0), Ok(0));
        assert_eq!(room.sectors_unlocked(), 0);
    }

    #[test]
    fn roles_survive_removal() {
        let mut room = Room::new("X");
        let (p1, p2) = (ID::default(), ID::default());
        room.join(p1, "host");
        room.join(p2, "mole");
        room.remove(p2);
        assert!(room.player(p2).is_none());
        assert_eq!(room.impostor(), Some(p2));
        assert_eq!(room.host(), Some(p1));
    }

    #[test]
    fn phase_table_rejects_backward_moves() {
        assert!(Phase::Lobby.permits(Phase::InProgress));
        assert!(Phase::Lobby.permits(Phase::Ended));
        assert!(Phase::InProgress.permits(Phase::Ended));
        assert!(!Phase::InProgress.permits(Phase::Lobby));
        assert!(!Phase::Ended.permits(Phase::InProgress));
        assert!(!Phase::Ended.permits(Phase::Lobby));
        assert!(!Phase::Ended.permits(Phase::Ended));
    }
}
