//! Character use cases.
//!
//! Characters are created by campaign members and make up the roster an
//! encounter is rolled from.

use std::sync::Arc;

use tabletop_domain::{
    CampaignId, Character, CharacterSheet, DomainError, NewCharacterSheet, UserId,
};

use crate::entities::{AccessError, Authorization};
use crate::infrastructure::ports::{
    ChangeNotification, ChangeNotifier, CharacterRepo, ClockPort, RepoError,
};

/// Container for character use cases.
pub struct CharacterUseCases {
    pub create: Arc<CreateCharacter>,
    pub list: Arc<ListCharacters>,
}

impl CharacterUseCases {
    pub fn new(create: Arc<CreateCharacter>, list: Arc<ListCharacters>) -> Self {
        Self { create, list }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CharacterError {
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

// =============================================================================
// Create
// =============================================================================

/// Builds a level-1 sheet for a campaign member and stores it.
pub struct CreateCharacter {
    auth: Arc<Authorization>,
    characters: Arc<dyn CharacterRepo>,
    notifier: Arc<dyn ChangeNotifier>,
    clock: Arc<dyn ClockPort>,
}

impl CreateCharacter {
    pub fn new(
        auth: Arc<Authorization>,
        characters: Arc<dyn CharacterRepo>,
        notifier: Arc<dyn ChangeNotifier>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            auth,
            characters,
            notifier,
            clock,
        }
    }

    pub async fn execute(
        &self,
        campaign_id: CampaignId,
        player_id: UserId,
        input: NewCharacterSheet,
    ) -> Result<Character, CharacterError> {
        self.auth.access(campaign_id, player_id).await?;

        let sheet = CharacterSheet::from_new(input)?;
        let character = Character::new(campaign_id, player_id, sheet, self.clock.now());
        self.characters.save(&character).await?;

        tracing::info!(
            campaign_id = %campaign_id,
            character_id = %character.id(),
            player_id = %player_id,
            "Character created"
        );

        self.notifier.publish(ChangeNotification::CharacterCreated {
            campaign_id,
            character_id: character.id(),
            player_id,
            name: character.name().to_string(),
        });
        Ok(character)
    }
}

// =============================================================================
// List
// =============================================================================

/// The campaign's characters in creation order.
pub struct ListCharacters {
    auth: Arc<Authorization>,
    characters: Arc<dyn CharacterRepo>,
}

impl ListCharacters {
    pub fn new(auth: Arc<Authorization>, characters: Arc<dyn CharacterRepo>) -> Self {
        Self { auth, characters }
    }

    pub async fn execute(
        &self,
        campaign_id: CampaignId,
        user_id: UserId,
    ) -> Result<Vec<Character>, CharacterError> {
        self.auth.access(campaign_id, user_id).await?;
        Ok(self.characters.list_in_campaign(campaign_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockChangeNotifier, MockCharacterRepo, MockClockPort};
    use crate::test_fixtures::*;
    use tabletop_domain::AbilityScores;

    fn clock() -> MockClockPort {
        let mut clock = MockClockPort::new();
        clock.expect_now().returning(fixed_time);
        clock
    }

    #[tokio::test]
    async fn member_creates_level_one_character() {
        let table = Table::new();
        let campaign_id = table.campaign.id();

        let mut characters = MockCharacterRepo::new();
        characters
            .expect_save()
            .withf(move |c| c.campaign_id() == campaign_id)
            .times(1)
            .returning(|_| Ok(()));
        let mut notifier = MockChangeNotifier::new();
        notifier
            .expect_publish()
            .withf(|n| {
                matches!(n, ChangeNotification::CharacterCreated { name, .. } if name == "Grog")
            })
            .times(1)
            .return_const(());

        let use_case = CreateCharacter::new(
            table.auth(),
            Arc::new(characters),
            Arc::new(notifier),
            Arc::new(clock()),
        );
        let character = use_case
            .execute(campaign_id, table.player, sheet("Grog"))
            .await
            .unwrap();

        assert_eq!(character.player_id(), table.player);
        assert_eq!(character.sheet().level, 1);
        assert_eq!(character.sheet().hit_points.max, 10);
        assert_eq!(character.sheet().armor_class, 10);
    }

    #[tokio::test]
    async fn out_of_range_scores_are_rejected() {
        let table = Table::new();
        let use_case = CreateCharacter::new(
            table.auth(),
            Arc::new(MockCharacterRepo::new()),
            Arc::new(MockChangeNotifier::new()),
            Arc::new(MockClockPort::new()),
        );

        let mut input = sheet("Grog");
        input.ability_scores = AbilityScores {
            strength: 31,
            ..AbilityScores::default()
        };
        let err = use_case
            .execute(table.campaign.id(), table.player, input)
            .await
            .unwrap_err();
        assert!(matches!(err, CharacterError::Validation(_)));
    }

    #[tokio::test]
    async fn outsiders_cannot_create_characters() {
        let table = Table::new();
        let use_case = CreateCharacter::new(
            table.auth(),
            Arc::new(MockCharacterRepo::new()),
            Arc::new(MockChangeNotifier::new()),
            Arc::new(MockClockPort::new()),
        );
        let err = use_case
            .execute(table.campaign.id(), UserId::new(), sheet("Grog"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CharacterError::Access(AccessError::NotAMember { .. })
        ));
    }
}
