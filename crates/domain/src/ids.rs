use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            pub fn to_uuid(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

// Accounts and campaigns
define_id!(UserId);
define_id!(CampaignId);

// Characters and turn participants
define_id!(CharacterId);
define_id!(ParticipantId);
define_id!(EncounterId);

// Maps
define_id!(MapId);

// Table activity
define_id!(DiceRollId);
define_id!(ChatMessageId);

// A turn slot may be held by a character or, for ad-hoc rosters, by a user directly.
impl From<CharacterId> for ParticipantId {
    fn from(value: CharacterId) -> Self {
        Self(value.to_uuid())
    }
}

impl From<UserId> for ParticipantId {
    fn from(value: UserId) -> Self {
        Self(value.to_uuid())
    }
}
