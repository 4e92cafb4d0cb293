//! In-memory adapters for every storage port.
//!
//! Used by tests and by single-process tables. All of them are safe to share
//! across tasks behind an `Arc`.

mod campaign;
mod encounter;
mod map;
mod table_log;

pub use campaign::{InMemoryCampaignRepo, InMemoryCharacterRepo};
pub use encounter::InMemoryTurnOrderRepo;
pub use map::InMemoryMapRepo;
pub use table_log::{InMemoryChatRepo, InMemoryDiceRollRepo};
