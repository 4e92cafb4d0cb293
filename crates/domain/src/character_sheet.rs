//! Typed character sheet.
//!
//! Known fields are explicit. Anything else a table tracks (house rules,
//! homebrew resources) goes into the open `house_rules` map, which is
//! flattened on the wire so unknown keys survive a round trip.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::CharacterName;

/// Lowest legal ability score.
pub const MIN_ABILITY_SCORE: u8 = 1;
/// Highest legal ability score.
pub const MAX_ABILITY_SCORE: u8 = 30;

const STARTING_HIT_POINTS: u32 = 10;
const STARTING_ARMOR_CLASS: u32 = 10;

/// Ability modifier for a score: `floor((score - 10) / 2)`.
pub fn ability_modifier(score: u8) -> i32 {
    (score as i32 - 10).div_euclid(2)
}

/// Render a modifier with an explicit sign, e.g. `+2` or `-1`.
pub fn format_modifier(modifier: i32) -> String {
    if modifier >= 0 {
        format!("+{}", modifier)
    } else {
        modifier.to_string()
    }
}

/// The six ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityScores {
    pub strength: u8,
    pub dexterity: u8,
    pub constitution: u8,
    pub intelligence: u8,
    pub wisdom: u8,
    pub charisma: u8,
}

impl AbilityScores {
    /// Validate that every score is within 1..=30.
    pub fn validate(&self) -> Result<(), DomainError> {
        let scores = [
            ("strength", self.strength),
            ("dexterity", self.dexterity),
            ("constitution", self.constitution),
            ("intelligence", self.intelligence),
            ("wisdom", self.wisdom),
            ("charisma", self.charisma),
        ];
        for (name, score) in scores {
            if !(MIN_ABILITY_SCORE..=MAX_ABILITY_SCORE).contains(&score) {
                return Err(DomainError::validation(format!(
                    "{} must be between {} and {}, got {}",
                    name, MIN_ABILITY_SCORE, MAX_ABILITY_SCORE, score
                )));
            }
        }
        Ok(())
    }
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self {
            strength: 10,
            dexterity: 10,
            constitution: 10,
            intelligence: 10,
            wisdom: 10,
            charisma: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HitPoints {
    pub current: u32,
    pub max: u32,
}

/// What a player fills in when creating a character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCharacterSheet {
    pub name: String,
    pub race: String,
    pub class: String,
    pub ability_scores: AbilityScores,
    pub background: Option<String>,
    pub alignment: Option<String>,
}

/// A character sheet with explicit fields and an open extension map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSheet {
    pub name: CharacterName,
    pub race: String,
    pub class: String,
    pub level: u32,
    #[serde(flatten)]
    pub ability_scores: AbilityScores,
    pub hit_points: HitPoints,
    pub armor_class: u32,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub alignment: Option<String>,
    #[serde(default)]
    pub equipment: String,
    #[serde(default)]
    pub spells: String,
    #[serde(default)]
    pub features: String,
    #[serde(default)]
    pub notes: String,
    /// Table-specific fields not modelled above
    #[serde(flatten)]
    pub house_rules: BTreeMap<String, serde_json::Value>,
}

impl CharacterSheet {
    /// Build a level-1 sheet with starting hit points and armor class.
    ///
    /// # Errors
    ///
    /// `Validation` if the name, race, or class is blank or a score is out
    /// of range.
    pub fn from_new(input: NewCharacterSheet) -> Result<Self, DomainError> {
        let name = CharacterName::new(input.name)?;
        let race = required("Race", input.race)?;
        let class = required("Class", input.class)?;
        input.ability_scores.validate()?;

        Ok(Self {
            name,
            race,
            class,
            level: 1,
            ability_scores: input.ability_scores,
            hit_points: HitPoints {
                current: STARTING_HIT_POINTS,
                max: STARTING_HIT_POINTS,
            },
            armor_class: STARTING_ARMOR_CLASS,
            background: input.background.filter(|s| !s.trim().is_empty()),
            alignment: input.alignment.filter(|s| !s.trim().is_empty()),
            equipment: String::new(),
            spells: String::new(),
            features: String::new(),
            notes: String::new(),
            house_rules: BTreeMap::new(),
        })
    }

    /// Initiative bonus derived from dexterity.
    pub fn initiative_modifier(&self) -> i32 {
        ability_modifier(self.ability_scores.dexterity)
    }

    pub fn with_house_rule(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.house_rules.insert(key.into(), value);
        self
    }
}

fn required(field: &str, value: String) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_sheet() -> NewCharacterSheet {
        NewCharacterSheet {
            name: "Vex".into(),
            race: "Half-Elf".into(),
            class: "Ranger".into(),
            ability_scores: AbilityScores {
                dexterity: 17,
                ..AbilityScores::default()
            },
            background: Some("Outlander".into()),
            alignment: Some("  ".into()),
        }
    }

    #[test]
    fn ability_modifier_floors_toward_negative_infinity() {
        assert_eq!(ability_modifier(10), 0);
        assert_eq!(ability_modifier(11), 0);
        assert_eq!(ability_modifier(17), 3);
        assert_eq!(ability_modifier(9), -1);
        assert_eq!(ability_modifier(1), -5);
        assert_eq!(ability_modifier(30), 10);
    }

    #[test]
    fn format_modifier_signs() {
        assert_eq!(format_modifier(0), "+0");
        assert_eq!(format_modifier(3), "+3");
        assert_eq!(format_modifier(-2), "-2");
    }

    #[test]
    fn new_sheet_starts_at_level_one() {
        let sheet = CharacterSheet::from_new(new_sheet()).unwrap();
        assert_eq!(sheet.level, 1);
        assert_eq!(sheet.hit_points, HitPoints { current: 10, max: 10 });
        assert_eq!(sheet.armor_class, 10);
        assert_eq!(sheet.initiative_modifier(), 3);
        assert_eq!(sheet.alignment, None);
    }

    #[test]
    fn out_of_range_scores_are_rejected() {
        let mut input = new_sheet();
        input.ability_scores.wisdom = 0;
        assert!(matches!(
            CharacterSheet::from_new(input),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn blank_class_is_rejected() {
        let mut input = new_sheet();
        input.class = " ".into();
        assert!(CharacterSheet::from_new(input).is_err());
    }

    #[test]
    fn house_rules_round_trip_as_top_level_keys() {
        let sheet = CharacterSheet::from_new(new_sheet())
            .unwrap()
            .with_house_rule("sanity", serde_json::json!(42));
        let json = serde_json::to_value(&sheet).unwrap();
        assert_eq!(json["sanity"], 42);
        assert_eq!(json["dexterity"], 17);

        let back: CharacterSheet = serde_json::from_value(json).unwrap();
        assert_eq!(back.house_rules.get("sanity"), Some(&serde_json::json!(42)));
        assert_eq!(back, sheet);
    }
}
