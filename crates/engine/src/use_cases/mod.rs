//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific area of the table.
//! Use cases resolve the caller's role, run the domain rule, persist, and
//! announce the change.

pub mod campaign;
pub mod character;
pub mod chat;
pub mod dice;
pub mod encounter;
pub mod fog;
pub mod sync;

// Re-export main types
pub use campaign::{CampaignError, CampaignUseCases};
pub use character::{CharacterError, CharacterUseCases};
pub use chat::{ChatError, ChatUseCases};
pub use dice::{DiceError, DiceUseCases};
pub use encounter::{EncounterError, EncounterUseCases};
pub use fog::{FogError, FogUseCases};
pub use sync::{ApplyOutcome, CampaignMirror};
