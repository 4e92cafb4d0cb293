//! Repository port traits for session state storage.

use async_trait::async_trait;
use tabletop_domain::*;

use super::error::RepoError;

// =============================================================================
// Encounter Storage
// =============================================================================

/// Persisted turn order for each campaign.
///
/// `save` is a compare-and-set: `expected` must match the stored encounter's
/// id and revision (`None` meaning nothing is stored), otherwise
/// `RepoError::Conflict`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TurnOrderRepo: Send + Sync {
    async fn load(&self, campaign_id: CampaignId) -> Result<Option<ActiveEncounter>, RepoError>;
    async fn save(
        &self,
        campaign_id: CampaignId,
        encounter: &ActiveEncounter,
        expected: Option<EncounterVersion>,
    ) -> Result<(), RepoError>;
    async fn clear(&self, campaign_id: CampaignId) -> Result<(), RepoError>;
}

// =============================================================================
// Map Storage
// =============================================================================

/// Maps and their fog grids.
///
/// Both `save` and `save_fog_grid` are compare-and-set on the stored fog
/// revision, so an image upload and a fog toggle racing on the same map
/// cannot overwrite each other.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MapRepo: Send + Sync {
    async fn get(&self, id: MapId) -> Result<Option<TabletopMap>, RepoError>;
    async fn latest_in_campaign(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Option<TabletopMap>, RepoError>;
    /// Store a whole map. `expected` is the fog revision the map was read at,
    /// `None` for a map that must not exist yet.
    async fn save(&self, map: &TabletopMap, expected: Option<Revision>) -> Result<(), RepoError>;

    // Fog grid, versioned separately so toggles don't rewrite the map
    async fn load_fog_grid(&self, id: MapId) -> Result<Option<(FogGrid, Revision)>, RepoError>;
    /// Store a grid written against `expected`. Returns the new revision.
    async fn save_fog_grid(
        &self,
        id: MapId,
        grid: &FogGrid,
        expected: Revision,
    ) -> Result<Revision, RepoError>;
}

// =============================================================================
// Campaign & Character Storage
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CampaignRepo: Send + Sync {
    async fn get(&self, id: CampaignId) -> Result<Option<Campaign>, RepoError>;
    async fn find_by_invite_code(&self, code: &InviteCode)
        -> Result<Option<Campaign>, RepoError>;
    async fn save(&self, campaign: &Campaign) -> Result<(), RepoError>;
    /// Campaigns the user runs or plays in.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Campaign>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepo: Send + Sync {
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError>;
    async fn save(&self, character: &Character) -> Result<(), RepoError>;
    /// Characters in creation order.
    async fn list_in_campaign(&self, campaign_id: CampaignId)
        -> Result<Vec<Character>, RepoError>;
}

// =============================================================================
// Table Log Storage
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiceRollRepo: Send + Sync {
    async fn save(&self, roll: &DiceRollRecord) -> Result<(), RepoError>;
    /// Newest first.
    async fn list_recent(
        &self,
        campaign_id: CampaignId,
        limit: usize,
    ) -> Result<Vec<DiceRollRecord>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatRepo: Send + Sync {
    async fn save(&self, message: &ChatMessage) -> Result<(), RepoError>;
    /// The last `limit` messages, oldest first.
    async fn list_recent(
        &self,
        campaign_id: CampaignId,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, RepoError>;
}
