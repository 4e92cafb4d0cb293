//! In-memory map and fog grid storage.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tabletop_domain::{CampaignId, FogGrid, MapId, Revision, TabletopMap};

use crate::infrastructure::ports::{MapRepo, RepoError};

#[derive(Default)]
pub struct InMemoryMapRepo {
    maps: DashMap<MapId, TabletopMap>,
}

impl InMemoryMapRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MapRepo for InMemoryMapRepo {
    async fn get(&self, id: MapId) -> Result<Option<TabletopMap>, RepoError> {
        Ok(self.maps.get(&id).map(|m| m.value().clone()))
    }

    async fn latest_in_campaign(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Option<TabletopMap>, RepoError> {
        Ok(self
            .maps
            .iter()
            .filter(|m| m.campaign_id() == campaign_id)
            .max_by_key(|m| m.created_at())
            .map(|m| m.value().clone()))
    }

    async fn save(&self, map: &TabletopMap, expected: Option<Revision>) -> Result<(), RepoError> {
        match self.maps.entry(map.id()) {
            Entry::Occupied(mut stored) => {
                let actual = stored.get().fog_revision();
                if expected != Some(actual) {
                    return Err(RepoError::conflict("Map", expected, Some(actual)));
                }
                stored.insert(map.clone());
            }
            Entry::Vacant(slot) => {
                if expected.is_some() {
                    return Err(RepoError::conflict("Map", expected, None));
                }
                slot.insert(map.clone());
            }
        }
        Ok(())
    }

    async fn load_fog_grid(&self, id: MapId) -> Result<Option<(FogGrid, Revision)>, RepoError> {
        Ok(self
            .maps
            .get(&id)
            .map(|m| (m.fog().clone(), m.fog_revision())))
    }

    async fn save_fog_grid(
        &self,
        id: MapId,
        grid: &FogGrid,
        expected: Revision,
    ) -> Result<Revision, RepoError> {
        let mut map = self
            .maps
            .get_mut(&id)
            .ok_or_else(|| RepoError::not_found("Map", id))?;

        let actual = map.fog_revision();
        if actual != expected {
            return Err(RepoError::conflict("FogGrid", Some(expected), Some(actual)));
        }
        let next = actual.next();
        map.set_fog(grid.clone(), next);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use tabletop_domain::GridDimensions;

    fn map(campaign_id: CampaignId, offset_secs: i64) -> TabletopMap {
        TabletopMap::new(
            campaign_id,
            "https://cdn.example/maps/a.png",
            GridDimensions::default(),
            Utc::now() + Duration::seconds(offset_secs),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn latest_map_wins() {
        let repo = InMemoryMapRepo::new();
        let campaign = CampaignId::new();
        let older = map(campaign, 0);
        let newer = map(campaign, 60);
        repo.save(&older, None).await.unwrap();
        repo.save(&newer, None).await.unwrap();
        repo.save(&map(CampaignId::new(), 120), None).await.unwrap();

        let latest = repo.latest_in_campaign(campaign).await.unwrap().unwrap();
        assert_eq!(latest.id(), newer.id());
    }

    #[tokio::test]
    async fn fog_save_checks_revision() {
        let repo = InMemoryMapRepo::new();
        let map = map(CampaignId::new(), 0);
        repo.save(&map, None).await.unwrap();

        let (mut grid, rev) = repo.load_fog_grid(map.id()).await.unwrap().unwrap();
        grid.toggle_cell(0, 0, true).unwrap();
        let next = repo.save_fog_grid(map.id(), &grid, rev).await.unwrap();
        assert_eq!(next, rev.next());

        let stale = repo.save_fog_grid(map.id(), &grid, rev).await;
        assert!(stale.unwrap_err().is_conflict());

        let (stored, stored_rev) = repo.load_fog_grid(map.id()).await.unwrap().unwrap();
        assert_eq!(stored.is_covered(0, 0), Some(false));
        assert_eq!(stored_rev, next);
    }

    #[tokio::test]
    async fn image_replace_loses_to_an_earlier_toggle() {
        let repo = InMemoryMapRepo::new();
        let original = map(CampaignId::new(), 0);
        repo.save(&original, None).await.unwrap();
        assert!(repo.save(&original, None).await.unwrap_err().is_conflict());

        // Upload reads the map, then a toggle lands first
        let mut replaced = original.clone();
        replaced
            .replace_image("https://cdn.example/maps/b.png", GridDimensions::default(), true)
            .unwrap();
        let mut grid = original.fog().clone();
        grid.toggle_cell(2, 2, true).unwrap();
        let toggled = repo
            .save_fog_grid(original.id(), &grid, original.fog_revision())
            .await
            .unwrap();

        let err = repo
            .save(&replaced, Some(original.fog_revision()))
            .await
            .unwrap_err();
        assert!(err.is_conflict());

        let stored = repo.get(original.id()).await.unwrap().unwrap();
        assert_eq!(stored.image_url(), original.image_url());
        assert_eq!(stored.fog().is_covered(2, 2), Some(false));
        assert_eq!(stored.fog_revision(), toggled);

        // Retrying against the fresh revision goes through
        let mut retried = stored.clone();
        retried
            .replace_image("https://cdn.example/maps/b.png", GridDimensions::default(), true)
            .unwrap();
        repo.save(&retried, Some(toggled)).await.unwrap();
        let stored = repo.get(original.id()).await.unwrap().unwrap();
        assert_eq!(stored.fog().revealed_count(), 0);
        assert!(toggled.is_superseded_by(stored.fog_revision()));
    }

    #[tokio::test]
    async fn fog_save_on_missing_map_is_not_found() {
        let repo = InMemoryMapRepo::new();
        let err = repo
            .save_fog_grid(MapId::new(), &FogGrid::default(), Revision::INITIAL)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
