//! Application state and composition.

use std::sync::Arc;

use tabletop_domain::{CampaignId, MapId};

use crate::entities::Authorization;
use crate::infrastructure::{
    clock::{SystemClock, SystemRandom},
    memory::{
        InMemoryCampaignRepo, InMemoryCharacterRepo, InMemoryChatRepo, InMemoryDiceRollRepo,
        InMemoryMapRepo, InMemoryTurnOrderRepo,
    },
    notifier::{BroadcastNotifier, ScopedSubscription},
    ports::{
        CampaignRepo, ChangeNotifier, ChangeScope, CharacterRepo, ChatRepo, ClockPort,
        DiceRollRepo, MapRepo, RandomPort, RepoError, TurnOrderRepo,
    },
    settings::EngineSettings,
};
use crate::use_cases::{self, CampaignMirror};

/// Main application state.
///
/// Holds all repository ports and use cases.
pub struct App {
    pub settings: EngineSettings,
    pub repositories: Repositories,
    pub use_cases: UseCases,
    pub notifier: Arc<BroadcastNotifier>,
}

/// Container for all repository ports.
pub struct Repositories {
    pub campaign: Arc<dyn CampaignRepo>,
    pub character: Arc<dyn CharacterRepo>,
    pub turn_order: Arc<dyn TurnOrderRepo>,
    pub map: Arc<dyn MapRepo>,
    pub dice: Arc<dyn DiceRollRepo>,
    pub chat: Arc<dyn ChatRepo>,
}

impl Repositories {
    /// Fresh in-memory storage for every port.
    pub fn in_memory() -> Self {
        Self {
            campaign: Arc::new(InMemoryCampaignRepo::new()),
            character: Arc::new(InMemoryCharacterRepo::new()),
            turn_order: Arc::new(InMemoryTurnOrderRepo::new()),
            map: Arc::new(InMemoryMapRepo::new()),
            dice: Arc::new(InMemoryDiceRollRepo::new()),
            chat: Arc::new(InMemoryChatRepo::new()),
        }
    }
}

/// Container for all use cases.
pub struct UseCases {
    pub campaign: use_cases::CampaignUseCases,
    pub character: use_cases::CharacterUseCases,
    pub encounter: use_cases::EncounterUseCases,
    pub fog: use_cases::FogUseCases,
    pub dice: use_cases::DiceUseCases,
    pub chat: use_cases::ChatUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        settings: EngineSettings,
        repos: Repositories,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        let notifier = Arc::new(BroadcastNotifier::new(settings.notify_capacity));
        let notifier_port: Arc<dyn ChangeNotifier> = notifier.clone();
        let auth = Arc::new(Authorization::new(repos.campaign.clone()));

        let campaign = use_cases::CampaignUseCases::new(
            Arc::new(use_cases::campaign::CreateCampaign::new(
                repos.campaign.clone(),
                clock.clone(),
                random.clone(),
            )),
            Arc::new(use_cases::campaign::JoinCampaign::new(
                repos.campaign.clone(),
                notifier_port.clone(),
            )),
            Arc::new(use_cases::campaign::ListCampaigns::new(repos.campaign.clone())),
        );

        let character = use_cases::CharacterUseCases::new(
            Arc::new(use_cases::character::CreateCharacter::new(
                auth.clone(),
                repos.character.clone(),
                notifier_port.clone(),
                clock.clone(),
            )),
            Arc::new(use_cases::character::ListCharacters::new(
                auth.clone(),
                repos.character.clone(),
            )),
        );

        let encounter = use_cases::EncounterUseCases::new(
            Arc::new(use_cases::encounter::StartEncounter::new(
                auth.clone(),
                repos.character.clone(),
                repos.turn_order.clone(),
                notifier_port.clone(),
            )),
            Arc::new(use_cases::encounter::AdvanceTurn::new(
                auth.clone(),
                repos.turn_order.clone(),
                notifier_port.clone(),
            )),
            Arc::new(use_cases::encounter::EndEncounter::new(
                auth.clone(),
                repos.turn_order.clone(),
                notifier_port.clone(),
            )),
            Arc::new(use_cases::encounter::GetCurrentTurn::new(
                auth.clone(),
                repos.turn_order.clone(),
            )),
        );

        let fog = use_cases::FogUseCases::new(
            Arc::new(use_cases::fog::LoadMap::new(auth.clone(), repos.map.clone())),
            Arc::new(use_cases::fog::UploadMap::new(
                auth.clone(),
                repos.map.clone(),
                notifier_port.clone(),
                clock.clone(),
                settings.fog_dimensions,
            )),
            Arc::new(use_cases::fog::ToggleFogCell::new(
                auth.clone(),
                repos.map.clone(),
                notifier_port.clone(),
            )),
        );

        let dice = use_cases::DiceUseCases::new(
            Arc::new(use_cases::dice::RollDice::new(
                auth.clone(),
                repos.dice.clone(),
                notifier_port.clone(),
                clock.clone(),
                random,
            )),
            Arc::new(use_cases::dice::RecentRolls::new(
                auth.clone(),
                repos.dice.clone(),
                settings.recent_rolls,
            )),
        );

        let chat = use_cases::ChatUseCases::new(
            Arc::new(use_cases::chat::PostChatMessage::new(
                auth.clone(),
                repos.chat.clone(),
                notifier_port,
                clock,
            )),
            Arc::new(use_cases::chat::RecentMessages::new(
                auth,
                repos.chat.clone(),
                settings.chat_history,
            )),
        );

        Self {
            settings,
            repositories: repos,
            use_cases: UseCases {
                campaign,
                character,
                encounter,
                fog,
                dice,
                chat,
            },
            notifier,
        }
    }

    /// An app backed entirely by in-memory storage and the system clock.
    pub fn in_memory(settings: EngineSettings) -> Self {
        Self::new(
            settings,
            Repositories::in_memory(),
            Arc::new(SystemClock),
            Arc::new(SystemRandom),
        )
    }

    pub fn subscribe_campaign(&self, campaign_id: CampaignId) -> ScopedSubscription {
        self.notifier.subscribe(ChangeScope::Campaign(campaign_id))
    }

    pub fn subscribe_map(&self, map_id: MapId) -> ScopedSubscription {
        self.notifier.subscribe(ChangeScope::Map(map_id))
    }

    /// A mirror seeded with the campaign's current encounter and map.
    ///
    /// Subscribe before calling this so no change slips between the snapshot
    /// and the first notification; stale ones are ignored by the mirror.
    pub async fn mirror(
        &self,
        campaign_id: CampaignId,
    ) -> Result<CampaignMirror, RepoError> {
        let encounter = self.repositories.turn_order.load(campaign_id).await?;
        let map = self.repositories.map.latest_in_campaign(campaign_id).await?;
        let mut mirror = CampaignMirror::new(campaign_id, self.settings.chat_history);
        mirror.seed(encounter, map);
        Ok(mirror)
    }
}
