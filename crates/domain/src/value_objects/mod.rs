//! Value objects - immutable, validated-by-construction domain values.

mod dice;
mod invite_code;
mod names;
mod revision;

pub use dice::{
    DiceFormula, DiceParseError, DiceRollResult, MAX_DICE_COUNT, MAX_MODIFIER, STANDARD_DIE_SIZES,
};
pub use invite_code::{InviteCode, INVITE_CODE_LENGTH};
pub use names::{CampaignName, CharacterName};
pub use revision::Revision;
