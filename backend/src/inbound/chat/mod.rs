//! Chat inbound adapter.
//!
//! Turns transport-neutral chat events into calls on the driving ports and
//! renders the outcomes as German replies with the main menu keyboard. The
//! HTTP adapter and any bot transport share this layer.

pub mod command;
pub mod dispatcher;
pub mod event;
pub mod render;

pub use command::{ChatCommand, CommandParseError};
pub use dispatcher::{ChatDispatcher, ChatPorts, DEFAULT_LEADERBOARD_SIZE};
pub use event::{ChatEvent, ChatInput, OutboundMessage};
