//! Leerstand backend library.
//!
//! Citizens report vacant dwellings through a chat conversation, earn points
//! for their reports and for confirmations of them, and compete on a
//! leaderboard. The crate follows a hexagonal layout: [`domain`] holds the
//! model, services, and ports; [`outbound`] implements the driven ports;
//! [`inbound`] adapts chat events and HTTP requests.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
