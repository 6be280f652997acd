//! Inbound adapters that translate external requests into domain service
//! calls while keeping framework details at the edge.
//!
//! [`chat`] holds the transport-neutral command layer and dispatcher;
//! [`http`] exposes it over REST.

pub mod chat;
pub mod http;
