//! Dice use cases.
//!
//! Rolls are made server-side with the injected random source and appended
//! to the campaign's roll log so everyone at the table sees the same result.

use std::sync::Arc;

use tabletop_domain::{CampaignId, DiceFormula, DiceRollRecord, DomainError, UserId};

use crate::entities::{AccessError, Authorization};
use crate::infrastructure::ports::{
    ChangeNotification, ChangeNotifier, ClockPort, DiceRollRepo, RandomPort, RepoError,
};

/// Container for dice use cases.
pub struct DiceUseCases {
    pub roll: Arc<RollDice>,
    pub recent: Arc<RecentRolls>,
}

impl DiceUseCases {
    pub fn new(roll: Arc<RollDice>, recent: Arc<RecentRolls>) -> Self {
        Self { roll, recent }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DiceError {
    #[error("Unsupported die: d{0}")]
    UnsupportedDie(u8),
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error("{0}")]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

/// Parses and rolls a formula like `2d6+3` for a campaign member.
pub struct RollDice {
    auth: Arc<Authorization>,
    rolls: Arc<dyn DiceRollRepo>,
    notifier: Arc<dyn ChangeNotifier>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

impl RollDice {
    pub fn new(
        auth: Arc<Authorization>,
        rolls: Arc<dyn DiceRollRepo>,
        notifier: Arc<dyn ChangeNotifier>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            auth,
            rolls,
            notifier,
            clock,
            random,
        }
    }

    pub async fn execute(
        &self,
        campaign_id: CampaignId,
        player_id: UserId,
        formula: &str,
    ) -> Result<DiceRollRecord, DiceError> {
        self.auth.access(campaign_id, player_id).await?;

        let formula = DiceFormula::parse(formula).map_err(DomainError::from)?;
        if !formula.is_standard_die() {
            return Err(DiceError::UnsupportedDie(formula.die_size));
        }

        let result = formula.roll_with(|min, max| self.random.gen_range(min, max));
        let record = DiceRollRecord::from_result(campaign_id, player_id, &result, self.clock.now());
        self.rolls.save(&record).await?;

        tracing::debug!(
            campaign_id = %campaign_id,
            player_id = %player_id,
            roll = %result.breakdown(),
            "Dice rolled"
        );

        self.notifier.publish(ChangeNotification::DiceRolled {
            roll: record.clone(),
        });
        Ok(record)
    }
}

/// The campaign's latest rolls, newest first.
pub struct RecentRolls {
    auth: Arc<Authorization>,
    rolls: Arc<dyn DiceRollRepo>,
    limit: usize,
}

impl RecentRolls {
    pub fn new(auth: Arc<Authorization>, rolls: Arc<dyn DiceRollRepo>, limit: usize) -> Self {
        Self { auth, rolls, limit }
    }

    pub async fn execute(
        &self,
        campaign_id: CampaignId,
        user_id: UserId,
    ) -> Result<Vec<DiceRollRecord>, DiceError> {
        self.auth.access(campaign_id, user_id).await?;
        Ok(self.rolls.list_recent(campaign_id, self.limit).await?)
    }
}
