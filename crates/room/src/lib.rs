//! Room session engine for Market Mole.
//!
//! This crate is the in-memory authority for rooms, players, roles, and
//! game phase. Every inbound client action is dispatched synchronously
//! through [`Engine`], mutates a single [`Room`] in the [`Registry`],
//! and comes back out as addressed [`Outgoing`] messages for the
//! transport to deliver.
//!
//! ## Components
//!
//! - [`Room`] — phase and role invariants for one session
//! - [`Registry`] — lazy create-on-first-join room table
//! - [`Engine`] — synchronous command dispatcher
//! - [`Protocol`] — JSON frame decoding
//!
//! ## Wire types
//!
//! - [`ClientMessage`] — inbound frames, one per player action
//! - [`ServerMessage`] — outbound frames, unicast or room broadcast
mod command;
mod engine;
mod ledger;
mod message;
mod player;
mod protocol;
mod registry;
mod room;
mod scoring;

pub use command::*;
pub use engine::*;
pub use ledger::*;
pub use message::*;
pub use player::*;
pub use protocol::*;
pub use registry::*;
pub use room::*;
pub use scoring::*;
