//! Initiative and turn order for combat encounters.
//!
//! The engine is pure: it orders a roster by initiative and moves an
//! active-turn pointer around the resulting order. Persistence and fan-out
//! to other clients belong to the caller.
//!
//! # Lifecycle
//!
//! ```text
//! NoEncounter --start--> Active --advance--> Active
//!      ^                    |
//!      +-------end----------+
//! ```
//!
//! Only a DM may start, advance, or end an encounter. The DM check itself is
//! resolved outside the domain and passed in as `requester_is_dm`.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{EncounterId, ParticipantId, UserId};
use crate::value_objects::Revision;

/// A roster entry submitted when an encounter starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: ParticipantId,
    /// Initiative score; higher acts first. May be negative, may tie.
    pub initiative: i32,
    /// The user who plays this participant, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controlled_by: Option<UserId>,
}

impl Participant {
    pub fn new(id: impl Into<ParticipantId>, initiative: i32) -> Self {
        Self {
            id: id.into(),
            initiative,
            controlled_by: None,
        }
    }

    pub fn controlled_by(mut self, user_id: UserId) -> Self {
        self.controlled_by = Some(user_id);
        self
    }
}

/// One position in a computed turn order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnSlot {
    pub participant_id: ParticipantId,
    pub initiative: i32,
    /// 1-based position in the order
    pub position: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controlled_by: Option<UserId>,
}

/// Participants in acting order.
///
/// # Invariants
///
/// - Never empty when produced by [`start_encounter`]
/// - Positions run `1..=len` in slot order
/// - Never re-sorted after creation; advancing only moves a pointer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnOrder {
    slots: Vec<TurnSlot>,
}

impl TurnOrder {
    /// Rebuild an order from stored slots, preserving their sequence.
    pub fn from_slots(slots: Vec<TurnSlot>) -> Self {
        Self { slots }
    }

    pub fn slots(&self) -> &[TurnSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, pointer: ActiveTurnPointer) -> Option<&TurnSlot> {
        self.slots.get(pointer.index())
    }

    /// Position of a participant in the order, if present.
    pub fn pointer_of(&self, participant_id: ParticipantId) -> Option<ActiveTurnPointer> {
        self.slots
            .iter()
            .position(|slot| slot.participant_id == participant_id)
            .map(ActiveTurnPointer::new)
    }
}

/// Index of the participant whose turn it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveTurnPointer(usize);

impl ActiveTurnPointer {
    pub const FIRST: ActiveTurnPointer = ActiveTurnPointer(0);

    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

// =============================================================================
// Engine operations
// =============================================================================

/// Order a roster by initiative, highest first.
///
/// Ties keep the roster's original relative order (the sort is stable).
/// Position 1 is the active turn, i.e. [`ActiveTurnPointer::FIRST`].
///
/// # Errors
///
/// - `Unauthorized` if the requester is not the DM (checked first)
/// - `EmptyRoster` if `roster` is empty
pub fn start_encounter(
    mut roster: Vec<Participant>,
    requester_is_dm: bool,
) -> Result<TurnOrder, DomainError> {
    if !requester_is_dm {
        return Err(DomainError::unauthorized("only the DM can start an encounter"));
    }
    if roster.is_empty() {
        return Err(DomainError::EmptyRoster);
    }

    // `sort_by` is stable
    roster.sort_by(|a, b| b.initiative.cmp(&a.initiative));

    let slots = roster
        .into_iter()
        .enumerate()
        .map(|(index, participant)| TurnSlot {
            participant_id: participant.id,
            initiative: participant.initiative,
            position: index as u32 + 1,
            controlled_by: participant.controlled_by,
        })
        .collect();

    Ok(TurnOrder { slots })
}

/// Move the active turn to the next participant, wrapping at the end.
///
/// # Errors
///
/// - `Unauthorized` if the requester is not the DM
/// - `NoActiveEncounter` if `order` is empty
/// - `Validation` if `pointer` does not index into `order`
pub fn advance_turn(
    order: &TurnOrder,
    pointer: ActiveTurnPointer,
    requester_is_dm: bool,
) -> Result<ActiveTurnPointer, DomainError> {
    if !requester_is_dm {
        return Err(DomainError::unauthorized("only the DM can advance turns"));
    }
    if order.is_empty() {
        return Err(DomainError::NoActiveEncounter);
    }
    if pointer.index() >= order.len() {
        return Err(DomainError::validation(format!(
            "Active turn pointer {} is outside a turn order of {}",
            pointer.index(),
            order.len()
        )));
    }
    Ok(ActiveTurnPointer((pointer.index() + 1) % order.len()))
}

/// Authorize ending an encounter. The caller discards order and pointer.
pub fn end_encounter(requester_is_dm: bool) -> Result<(), DomainError> {
    if !requester_is_dm {
        return Err(DomainError::unauthorized("only the DM can end an encounter"));
    }
    Ok(())
}

/// Whether `participant_id` holds the active turn.
pub fn is_participants_turn(
    order: &TurnOrder,
    pointer: ActiveTurnPointer,
    participant_id: ParticipantId,
) -> bool {
    order
        .get(pointer)
        .is_some_and(|slot| slot.participant_id == participant_id)
}

// =============================================================================
// Encounter state
// =============================================================================

/// Identifies one stored state of one encounter.
///
/// Revisions restart at [`Revision::INITIAL`] for every new encounter, so a
/// revision alone cannot tell a restarted encounter from the one it replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterVersion {
    pub encounter_id: EncounterId,
    pub revision: Revision,
}

/// Snapshot of a running encounter as persisted and broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveEncounter {
    pub id: EncounterId,
    pub order: TurnOrder,
    pub active: ActiveTurnPointer,
    pub revision: Revision,
}

impl ActiveEncounter {
    /// A freshly started encounter: new id, first slot active, initial revision.
    pub fn begin(order: TurnOrder) -> Self {
        Self {
            id: EncounterId::new(),
            order,
            active: ActiveTurnPointer::FIRST,
            revision: Revision::INITIAL,
        }
    }

    pub fn version(&self) -> EncounterVersion {
        EncounterVersion {
            encounter_id: self.id,
            revision: self.revision,
        }
    }

    /// Whether `other` is this same encounter at a later revision.
    pub fn is_superseded_by(&self, other: &ActiveEncounter) -> bool {
        self.id == other.id && self.revision.is_superseded_by(other.revision)
    }

    pub fn active_slot(&self) -> Option<&TurnSlot> {
        self.order.get(self.active)
    }

    /// Advance to the next turn, bumping the revision.
    ///
    /// On error `self` is unchanged.
    pub fn advance(&mut self, requester_is_dm: bool) -> Result<ActiveTurnPointer, DomainError> {
        let next = advance_turn(&self.order, self.active, requester_is_dm)?;
        self.active = next;
        self.revision = self.revision.next();
        Ok(next)
    }

    pub fn is_participants_turn(&self, participant_id: ParticipantId) -> bool {
        is_participants_turn(&self.order, self.active, participant_id)
    }

    /// Whether the active slot is played by `user_id`.
    pub fn is_users_turn(&self, user_id: UserId) -> bool {
        self.active_slot()
            .is_some_and(|slot| slot.controlled_by == Some(user_id))
    }
}

/// Encounter state machine for one scope (campaign).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "encounter", rename_all = "camelCase")]
pub enum EncounterState {
    #[default]
    NoEncounter,
    Active(ActiveEncounter),
}

impl EncounterState {
    /// Start (or restart) an encounter. Any running encounter is replaced.
    pub fn start(
        &mut self,
        roster: Vec<Participant>,
        requester_is_dm: bool,
    ) -> Result<&ActiveEncounter, DomainError> {
        let order = start_encounter(roster, requester_is_dm)?;
        *self = Self::Active(ActiveEncounter::begin(order));
        match self {
            Self::Active(encounter) => Ok(encounter),
            Self::NoEncounter => Err(DomainError::NoActiveEncounter),
        }
    }

    pub fn advance(&mut self, requester_is_dm: bool) -> Result<ActiveTurnPointer, DomainError> {
        if !requester_is_dm {
            return Err(DomainError::unauthorized("only the DM can advance turns"));
        }
        match self {
            Self::Active(encounter) => encounter.advance(requester_is_dm),
            Self::NoEncounter => Err(DomainError::NoActiveEncounter),
        }
    }

    pub fn end(&mut self, requester_is_dm: bool) -> Result<(), DomainError> {
        end_encounter(requester_is_dm)?;
        *self = Self::NoEncounter;
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    pub fn encounter(&self) -> Option<&ActiveEncounter> {
        match self {
            Self::Active(encounter) => Some(encounter),
            Self::NoEncounter => None,
        }
    }

    /// False for everyone while no encounter is running.
    pub fn is_participants_turn(&self, participant_id: ParticipantId) -> bool {
        self.encounter()
            .is_some_and(|e| e.is_participants_turn(participant_id))
    }
}

impl From<Option<ActiveEncounter>> for EncounterState {
    fn from(value: Option<ActiveEncounter>) -> Self {
        value.map_or(Self::NoEncounter, Self::Active)
    }
}
