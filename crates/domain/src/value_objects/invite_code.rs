//! Campaign invite codes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Number of characters in an invite code.
pub const INVITE_CODE_LENGTH: usize = 6;

const ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// A short code that lets a player join a campaign without DM action.
///
/// Always six characters from `[A-Z0-9]`. Parsing trims whitespace and
/// upper-cases, so `" ab12cd "` and `"AB12CD"` name the same campaign.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InviteCode(String);

impl InviteCode {
    /// Parse and normalize a user-entered code.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let normalized = input.trim().to_ascii_uppercase();
        if normalized.len() != INVITE_CODE_LENGTH {
            return Err(DomainError::validation(format!(
                "Invite code must be {} characters",
                INVITE_CODE_LENGTH
            )));
        }
        if !normalized.bytes().all(|b| ALPHABET.contains(&b)) {
            return Err(DomainError::validation(
                "Invite code may only contain letters and digits",
            ));
        }
        Ok(Self(normalized))
    }

    /// Generate a code, drawing each character index from `pick`.
    ///
    /// `pick(min, max)` must return a value in `min..=max`; out-of-range
    /// values are clamped.
    pub fn generate(mut pick: impl FnMut(i32, i32) -> i32) -> Self {
        let max = ALPHABET.len() as i32 - 1;
        let code = (0..INVITE_CODE_LENGTH)
            .map(|_| {
                let index = pick(0, max).clamp(0, max) as usize;
                ALPHABET[index] as char
            })
            .collect();
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InviteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for InviteCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for InviteCode {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<InviteCode> for String {
    fn from(code: InviteCode) -> String {
        code.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_case_and_whitespace() {
        let code = InviteCode::parse("  ab12cd ").expect("valid code");
        assert_eq!(code.as_str(), "AB12CD");
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert!(InviteCode::parse("ABC").is_err());
        assert!(InviteCode::parse("ABCDEFG").is_err());
    }

    #[test]
    fn parse_rejects_symbols() {
        assert!(matches!(
            InviteCode::parse("AB-12C"),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn generate_uses_picked_indices() {
        let mut next = 0;
        let code = InviteCode::generate(|_, _| {
            next += 1;
            next - 1
        });
        assert_eq!(code.as_str(), "ABCDEF");
    }

    #[test]
    fn generate_clamps_out_of_range_picks() {
        let code = InviteCode::generate(|_, _| 1000);
        assert_eq!(code.as_str(), "999999");
        assert!(InviteCode::parse(code.as_str()).is_ok());
    }
}
