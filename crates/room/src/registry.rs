use super::*;
use mole_core::*;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Whether a lookup hit an existing room or lazily created one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lookup {
    Created,
    Found,
}

/// Process-wide table of live rooms, keyed by caller-supplied code.
///
/// Rooms come into existence on the first join to an unseen code and are
/// never removed, even once empty. Codes are opaque: no format, length,
/// or case validation.
#[derive(Debug, Default)]
pub struct Registry {
    rooms: HashMap<String, Room>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }
    /// Fetches the room for `code`, creating it with default state if
    /// this is the first time the code has been seen.
    pub fn get_or_create(&mut self, code: &str) -> (Lookup, &mut Room) {
        match self.rooms.entry(code.to_string()) {
            Entry::Occupied(entry) => (Lookup::Found, entry.into_mut()),
            Entry::Vacant(entry) => (Lookup::Created, entry.insert(Room::new(code))),
        }
    }
    /// Lookup for non-join actions. Absence is the caller's problem to
    /// log and skip, never a fault.
    pub fn get_mut(&mut self, code: &str) -> Option<&mut Room> {
        self.rooms.get_mut(code)
    }
    pub fn get(&self, code: &str) -> Option<&Room> {
        self.rooms.get(code)
    }
    pub fn len(&self) -> usize {
        self.rooms.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
    /// Removes a departed connection from every room's player list.
    ///
    /// A global scan proportional to the number of rooms, fine for this
    /// domain's cardinality. Host and impostor designations stay frozen
    /// on the departed id, and emptied rooms are kept.
    pub fn sweep(&mut self, id: ID<Player>) {
        for room in self.rooms.values_mut() {
            room.remove(id);
        }
    }
}
