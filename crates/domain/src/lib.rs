//! Tabletop domain.
//!
//! Pure rules for a multiplayer tabletop session: initiative and turn order,
//! the fog-of-war grid, campaigns and membership, character sheets, dice and
//! chat. Nothing here performs I/O; persistence and fan-out live in the
//! engine crate.

pub mod aggregates;
pub mod character_sheet;
pub mod encounter;
pub mod entities;
pub mod error;
pub mod fog;
pub mod ids;
pub mod types;
pub mod value_objects;

pub use aggregates::{Campaign, CampaignStatus, Character, JoinOutcome};

pub use character_sheet::{
    ability_modifier, format_modifier, AbilityScores, CharacterSheet, HitPoints,
    NewCharacterSheet,
};

pub use encounter::{
    advance_turn, end_encounter, is_participants_turn, start_encounter, ActiveEncounter,
    ActiveTurnPointer, EncounterState, EncounterVersion, Participant, TurnOrder, TurnSlot,
};

pub use entities::{ChatMessage, ChatMessageKind, DiceRollRecord, TabletopMap};

pub use error::DomainError;

pub use fog::{
    FogGrid, GridDimensions, StoredFogGrid, DEFAULT_FOG_COLS, DEFAULT_FOG_ROWS, MAX_FOG_EXTENT,
};

pub use ids::{
    CampaignId, CharacterId, ChatMessageId, DiceRollId, EncounterId, MapId, ParticipantId,
    UserId,
};

pub use types::CampaignRole;

pub use value_objects::{
    CampaignName, CharacterName, DiceFormula, DiceParseError, DiceRollResult, InviteCode,
    Revision, STANDARD_DIE_SIZES,
};
