//! Tabletop Engine library.
//!
//! Session services for a shared tabletop: who may do what in a campaign,
//! the encounter and fog-of-war workflows, dice and chat, and the fan-out
//! that keeps every client's view in step.
//!
//! ## Structure
//!
//! - `entities/` - Entity modules wrapping domain operations
//! - `use_cases/` - User story orchestration across entities
//! - `infrastructure/` - Ports plus in-memory and broadcast adapters
//! - `app` - Application composition

pub mod app;
pub mod entities;
pub mod infrastructure;
pub mod use_cases;

/// Shared helpers for unit tests.
#[cfg(test)]
pub mod test_fixtures;


pub use app::App;
pub use infrastructure::settings::EngineSettings;
