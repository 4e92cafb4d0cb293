//! Domain entities - Core business objects with identity

mod chat_message;
mod dice_roll;
mod map;

pub use chat_message::{ChatMessage, ChatMessageKind, MAX_CHAT_MESSAGE_LENGTH};
pub use dice_roll::DiceRollRecord;
pub use map::TabletopMap;
