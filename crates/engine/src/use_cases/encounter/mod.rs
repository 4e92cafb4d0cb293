//! Encounter use cases.
//!
//! Running initiative for a campaign:
//! - Starting an encounter from the campaign's characters
//! - Advancing to the next turn
//! - Ending the encounter
//! - Asking whose turn it is

mod advance;
mod current_turn;
mod end;
mod error;
mod start;

use std::sync::Arc;

pub use advance::AdvanceTurn;
pub use current_turn::{CurrentTurn, GetCurrentTurn};
pub use end::EndEncounter;
pub use error::EncounterError;
pub use start::{StartEncounter, DEFAULT_INITIATIVE};

/// Container for encounter use cases.
pub struct EncounterUseCases {
    pub start: Arc<StartEncounter>,
    pub advance: Arc<AdvanceTurn>,
    pub end: Arc<EndEncounter>,
    pub current_turn: Arc<GetCurrentTurn>,
}

impl EncounterUseCases {
    pub fn new(
        start: Arc<StartEncounter>,
        advance: Arc<AdvanceTurn>,
        end: Arc<EndEncounter>,
        current_turn: Arc<GetCurrentTurn>,
    ) -> Self {
        Self {
            start,
            advance,
            end,
            current_turn,
        }
    }
}
