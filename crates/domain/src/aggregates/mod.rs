//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Has a unique identity
//! - Owns all its constituent parts (enforced by Rust ownership)
//! - Exposes behavior through methods, not public fields
//! - Reports outcomes of mutations as return values

pub mod campaign;
pub mod character;

pub use campaign::{Campaign, CampaignStatus, JoinOutcome};
pub use character::Character;
