//! Campaign aggregate - a DM's game and the players who joined it
//!
//! # Invariants
//!
//! - `dm_id` is never listed in `members`
//! - `members` contains no duplicates

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;
use crate::ids::{CampaignId, UserId};
use crate::types::CampaignRole;
use crate::value_objects::{CampaignName, InviteCode};

/// Lifecycle status of a campaign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    #[default]
    Active,
    Inactive,
    Archived,
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
            Self::Archived => write!(f, "archived"),
        }
    }
}

/// Result of a player joining a campaign
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The user was added to the member list
    Joined,
    /// The user was already the DM or a member
    AlreadyMember,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    id: CampaignId,
    dm_id: UserId,
    name: CampaignName,
    status: CampaignStatus,
    invite_code: InviteCode,
    members: Vec<UserId>,
    created_at: DateTime<Utc>,
}

impl Campaign {
    pub fn new(
        dm_id: UserId,
        name: CampaignName,
        invite_code: InviteCode,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CampaignId::new(),
            dm_id,
            name,
            status: CampaignStatus::Active,
            invite_code,
            members: Vec::new(),
            created_at: now,
        }
    }

    // Read-only accessors

    pub fn id(&self) -> CampaignId {
        self.id
    }

    pub fn dm_id(&self) -> UserId {
        self.dm_id
    }

    pub fn name(&self) -> &CampaignName {
        &self.name
    }

    pub fn status(&self) -> CampaignStatus {
        self.status
    }

    pub fn invite_code(&self) -> &InviteCode {
        &self.invite_code
    }

    pub fn members(&self) -> &[UserId] {
        &self.members
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The user's role in this campaign, if they belong to it.
    pub fn role_of(&self, user_id: UserId) -> Option<CampaignRole> {
        if user_id == self.dm_id {
            Some(CampaignRole::Dm)
        } else if self.members.contains(&user_id) {
            Some(CampaignRole::Player)
        } else {
            None
        }
    }

    pub fn is_dm(&self, user_id: UserId) -> bool {
        self.dm_id == user_id
    }

    pub fn is_member(&self, user_id: UserId) -> bool {
        self.role_of(user_id).is_some()
    }

    /// Add a player. Joining twice, or the DM joining, is a no-op.
    ///
    /// # Errors
    ///
    /// `InvalidStateTransition` if the campaign is archived.
    pub fn join(&mut self, user_id: UserId) -> Result<JoinOutcome, DomainError> {
        if self.is_member(user_id) {
            return Ok(JoinOutcome::AlreadyMember);
        }
        if self.status == CampaignStatus::Archived {
            return Err(DomainError::invalid_state_transition(
                "cannot join an archived campaign",
            ));
        }
        self.members.push(user_id);
        Ok(JoinOutcome::Joined)
    }

    pub fn set_status(
        &mut self,
        status: CampaignStatus,
        requester_is_dm: bool,
    ) -> Result<(), DomainError> {
        if !requester_is_dm {
            return Err(DomainError::unauthorized(
                "only the DM can change campaign status",
            ));
        }
        self.status = status;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campaign(dm: UserId) -> Campaign {
        Campaign::new(
            dm,
            CampaignName::new("Lost Mine").unwrap(),
            InviteCode::parse("ABC123").unwrap(),
            Utc::now(),
        )
    }

    #[test]
    fn roles_resolve_from_dm_and_members() {
        let dm = UserId::new();
        let player = UserId::new();
        let stranger = UserId::new();
        let mut c = campaign(dm);
        c.join(player).unwrap();

        assert_eq!(c.role_of(dm), Some(CampaignRole::Dm));
        assert_eq!(c.role_of(player), Some(CampaignRole::Player));
        assert_eq!(c.role_of(stranger), None);
    }

    #[test]
    fn join_is_idempotent() {
        let dm = UserId::new();
        let player = UserId::new();
        let mut c = campaign(dm);

        assert_eq!(c.join(player).unwrap(), JoinOutcome::Joined);
        assert_eq!(c.join(player).unwrap(), JoinOutcome::AlreadyMember);
        assert_eq!(c.join(dm).unwrap(), JoinOutcome::AlreadyMember);
        assert_eq!(c.members(), &[player]);
    }

    #[test]
    fn archived_campaigns_refuse_new_members() {
        let dm = UserId::new();
        let mut c = campaign(dm);
        c.set_status(CampaignStatus::Archived, true).unwrap();
        assert!(matches!(
            c.join(UserId::new()),
            Err(DomainError::InvalidStateTransition(_))
        ));
    }

    #[test]
    fn only_dm_changes_status() {
        let mut c = campaign(UserId::new());
        assert!(c.set_status(CampaignStatus::Inactive, false).is_err());
        assert_eq!(c.status(), CampaignStatus::Active);
    }
}
