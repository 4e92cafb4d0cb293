//! Dice rolling value objects and parsing
//!
//! Supports dice formulas like "1d20+5", "2d6-1", "1d100", etc.
//! Randomness is supplied by the caller as a closure so the domain stays
//! deterministic under test.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::IntErrorKind;
use thiserror::Error;

/// Die sizes offered by the table's dice roller.
pub const STANDARD_DIE_SIZES: [u8; 7] = [4, 6, 8, 10, 12, 20, 100];

/// Maximum number of dice in a single roll.
pub const MAX_DICE_COUNT: u8 = 20;

/// Largest modifier magnitude a formula may carry.
pub const MAX_MODIFIER: i32 = 1000;

/// Error when parsing a dice formula
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceParseError {
    /// The formula string is empty
    #[error("Empty dice formula")]
    Empty,
    /// Invalid format - expected XdY or XdY+Z
    #[error("Invalid dice format: {0}")]
    InvalidFormat(String),
    /// Dice count must be at least 1
    #[error("Dice count must be at least 1")]
    InvalidDiceCount,
    /// Too many dice in a single roll
    #[error("Cannot roll more than {MAX_DICE_COUNT} dice at once")]
    TooManyDice,
    /// Die size must be at least 2
    #[error("Die size must be at least 2")]
    InvalidDieSize,
    #[error("Modifier must be within ±{MAX_MODIFIER}")]
    ModifierOverflow,
}

/// A parsed dice formula like "2d6+3"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceFormula {
    /// Number of dice to roll (X in XdY)
    pub dice_count: u8,
    /// Size of each die (Y in XdY)
    pub die_size: u8,
    /// Modifier to add/subtract after rolling (+Z or -Z)
    pub modifier: i32,
}

impl DiceFormula {
    /// Create a new dice formula
    pub fn new(dice_count: u8, die_size: u8, modifier: i32) -> Result<Self, DiceParseError> {
        if dice_count == 0 {
            return Err(DiceParseError::InvalidDiceCount);
        }
        if dice_count > MAX_DICE_COUNT {
            return Err(DiceParseError::TooManyDice);
        }
        if die_size < 2 {
            return Err(DiceParseError::InvalidDieSize);
        }
        if !(-MAX_MODIFIER..=MAX_MODIFIER).contains(&modifier) {
            return Err(DiceParseError::ModifierOverflow);
        }
        Ok(Self {
            dice_count,
            die_size,
            modifier,
        })
    }

    /// Parse `XdY`, `XdY+Z`, `XdY-Z` or the one-die shorthand `dY`.
    /// Case and surrounding whitespace are ignored.
    pub fn parse(input: &str) -> Result<Self, DiceParseError> {
        let input = input.trim().to_ascii_lowercase();
        if input.is_empty() {
            return Err(DiceParseError::Empty);
        }
        let invalid = |what: &str| DiceParseError::InvalidFormat(format!("{what} in '{input}'"));

        let (count, rest) = input
            .split_once('d')
            .ok_or_else(|| invalid("missing 'd'"))?;
        let (size, modifier) = match rest.find(['+', '-']) {
            Some(at) => {
                let (size, signed) = rest.split_at(at);
                let modifier = signed.parse::<i32>().map_err(|e| match e.kind() {
                    IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                        DiceParseError::ModifierOverflow
                    }
                    _ => invalid("bad modifier"),
                })?;
                (size, modifier)
            }
            None => (rest, 0),
        };

        let dice_count = match count {
            "" => 1,
            n => n.parse().map_err(|_| invalid("bad dice count"))?,
        };
        let die_size = size.parse().map_err(|_| invalid("bad die size"))?;

        Self::new(dice_count, die_size, modifier)
    }

    /// Whether the die is one the table roller offers (d4 through d100).
    pub fn is_standard_die(&self) -> bool {
        STANDARD_DIE_SIZES.contains(&self.die_size)
    }

    /// Roll the dice using `rng(min, max)`, which must return a value in
    /// `min..=max`.
    pub fn roll_with(&self, mut rng: impl FnMut(i32, i32) -> i32) -> DiceRollResult {
        let individual_rolls: Vec<i32> = (0..self.dice_count)
            .map(|_| rng(1, self.die_size as i32).clamp(1, self.die_size as i32))
            .collect();

        let dice_total: i32 = individual_rolls.iter().sum();

        DiceRollResult {
            formula: self.clone(),
            individual_rolls,
            dice_total,
            total: dice_total.saturating_add(self.modifier),
        }
    }

    /// Get the minimum possible roll
    pub fn min_roll(&self) -> i32 {
        (self.dice_count as i32).saturating_add(self.modifier)
    }

    /// Get the maximum possible roll
    pub fn max_roll(&self) -> i32 {
        (self.dice_count as i32 * self.die_size as i32).saturating_add(self.modifier)
    }
}

impl fmt::Display for DiceFormula {
    /// Formats as "1d20+5", "2d6-1" or "3d8".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.modifier {
            0 => write!(f, "{}d{}", self.dice_count, self.die_size),
            m if m > 0 => write!(f, "{}d{}+{}", self.dice_count, self.die_size, m),
            m => write!(f, "{}d{}{}", self.dice_count, self.die_size, m),
        }
    }
}

/// Result of rolling dice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceRollResult {
    /// The formula that was rolled
    pub formula: DiceFormula,
    /// Individual die results
    pub individual_rolls: Vec<i32>,
    /// Sum of dice before modifier
    pub dice_total: i32,
    /// Final total (dice_total + modifier)
    pub total: i32,
}

impl DiceRollResult {
    /// Format as a breakdown string (e.g., "1d20(14) + 5 = 19")
    pub fn breakdown(&self) -> String {
        let rolls = if self.individual_rolls.len() == 1 {
            format!("({})", self.individual_rolls[0])
        } else {
            let joined: Vec<String> = self.individual_rolls.iter().map(|r| r.to_string()).collect();
            format!("[{}]", joined.join(", "))
        };
        let dice = format!("{}d{}", self.formula.dice_count, self.formula.die_size);
        match self.formula.modifier {
            0 => format!("{}{} = {}", dice, rolls, self.total),
            m if m > 0 => format!("{}{} + {} = {}", dice, rolls, m, self.total),
            m => format!("{}{} - {} = {}", dice, rolls, -m, self.total),
        }
    }

    /// Check if this is a natural 20 (single d20)
    pub fn is_natural_20(&self) -> bool {
        self.formula.die_size == 20
            && self.formula.dice_count == 1
            && self.individual_rolls.first() == Some(&20)
    }

    /// Check if this is a natural 1 (single d20)
    pub fn is_natural_1(&self) -> bool {
        self.formula.die_size == 20
            && self.formula.dice_count == 1
            && self.individual_rolls.first() == Some(&1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_d20() {
        let formula = DiceFormula::parse("1d20").unwrap();
        assert_eq!(formula.dice_count, 1);
        assert_eq!(formula.die_size, 20);
        assert_eq!(formula.modifier, 0);
    }

    #[test]
    fn test_parse_shorthand_d20() {
        let formula = DiceFormula::parse("d20").unwrap();
        assert_eq!(formula.dice_count, 1);
        assert_eq!(formula.die_size, 20);
    }

    #[test]
    fn test_parse_with_modifiers() {
        assert_eq!(DiceFormula::parse("2d6+3").unwrap().modifier, 3);
        assert_eq!(DiceFormula::parse("1D20-1").unwrap().modifier, -1);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(DiceFormula::parse(""), Err(DiceParseError::Empty));
        assert_eq!(
            DiceFormula::parse("0d6"),
            Err(DiceParseError::InvalidDiceCount)
        );
        assert_eq!(DiceFormula::parse("1d1"), Err(DiceParseError::InvalidDieSize));
        assert_eq!(DiceFormula::parse("21d6"), Err(DiceParseError::TooManyDice));
        assert!(matches!(
            DiceFormula::parse("abc"),
            Err(DiceParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            DiceFormula::parse("1d-5"),
            Err(DiceParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_display_matches_roll_type_format() {
        assert_eq!(DiceFormula::new(1, 20, 0).unwrap().to_string(), "1d20");
        assert_eq!(DiceFormula::new(2, 6, 3).unwrap().to_string(), "2d6+3");
        assert_eq!(DiceFormula::new(3, 8, -2).unwrap().to_string(), "3d8-2");
    }

    #[test]
    fn test_standard_die_sizes() {
        assert!(DiceFormula::parse("1d100").unwrap().is_standard_die());
        assert!(!DiceFormula::parse("1d7").unwrap().is_standard_die());
    }

    #[test]
    fn test_roll_with_sums_dice_and_modifier() {
        let mut faces = vec![3, 5].into_iter();
        let formula = DiceFormula::parse("2d6+2").unwrap();
        let result = formula.roll_with(|_, _| faces.next().unwrap_or(1));
        assert_eq!(result.individual_rolls, vec![3, 5]);
        assert_eq!(result.dice_total, 8);
        assert_eq!(result.total, 10);
        assert_eq!(result.breakdown(), "2d6[3, 5] + 2 = 10");
    }

    #[test]
    fn test_roll_with_clamps_to_die_faces() {
        let formula = DiceFormula::parse("1d6").unwrap();
        let result = formula.roll_with(|_, _| 42);
        assert_eq!(result.total, 6);
    }

    #[test]
    fn test_natural_results() {
        let formula = DiceFormula::parse("1d20-1").unwrap();
        let nat20 = formula.roll_with(|_, max| max);
        assert!(nat20.is_natural_20());
        assert_eq!(nat20.breakdown(), "1d20(20) - 1 = 19");
        let nat1 = formula.roll_with(|min, _| min);
        assert!(nat1.is_natural_1());
    }

    #[test]
    fn test_modifier_is_bounded() {
        assert_eq!(DiceFormula::parse("1d20+1000").unwrap().modifier, 1000);
        assert_eq!(DiceFormula::parse("1d20-1000").unwrap().modifier, -1000);
        assert_eq!(
            DiceFormula::parse("1d20+1001"),
            Err(DiceParseError::ModifierOverflow)
        );
        assert_eq!(
            DiceFormula::parse("1d20+2147483647"),
            Err(DiceParseError::ModifierOverflow)
        );
        assert_eq!(
            DiceFormula::parse("1d20-99999999999"),
            Err(DiceParseError::ModifierOverflow)
        );
        assert_eq!(
            DiceFormula::new(1, 20, i32::MIN),
            Err(DiceParseError::ModifierOverflow)
        );
    }

    #[test]
    fn test_extreme_modifier_from_storage_saturates() {
        let formula = DiceFormula {
            dice_count: 1,
            die_size: 20,
            modifier: i32::MAX,
        };
        assert_eq!(formula.roll_with(|_, max| max).total, i32::MAX);
        assert_eq!(formula.max_roll(), i32::MAX);
    }

    #[test]
    fn test_min_max_roll() {
        let formula = DiceFormula::parse("2d6+1").unwrap();
        assert_eq!(formula.min_roll(), 3);
        assert_eq!(formula.max_roll(), 13);
    }
}
