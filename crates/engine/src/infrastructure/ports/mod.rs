//! Port traits for infrastructure boundaries.
//!
//! These are the only abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Session state storage (in-memory here, a hosted database in production)
//! - Change fan-out to connected clients
//! - Clock/Random (for testing)

mod error;
mod notifier;
mod repos;
mod testing;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::{CampaignRepo, CharacterRepo, ChatRepo, DiceRollRepo, MapRepo, TurnOrderRepo};

// =============================================================================
// Notification Port
// =============================================================================
pub use notifier::{ChangeNotification, ChangeNotifier, ChangeScope};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::{
    MockCampaignRepo, MockCharacterRepo, MockChatRepo, MockDiceRollRepo, MockMapRepo,
    MockTurnOrderRepo,
};

#[cfg(test)]
pub use notifier::MockChangeNotifier;

#[cfg(test)]
pub use testing::{MockClockPort, MockRandomPort};

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::{ClockPort, RandomPort};

// =============================================================================
// Error Types
// =============================================================================
pub use error::RepoError;
