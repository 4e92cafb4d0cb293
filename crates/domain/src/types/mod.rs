//! Shared vocabulary types.
//!
//! Pure data with no I/O, used by the domain and by anything that puts
//! domain state on the wire.

mod session;
pub use session::CampaignRole;
