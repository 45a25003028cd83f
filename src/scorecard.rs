//! Scorecards.

use std::fmt::Display;
use std::ops::Index;

use delegate::delegate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::{Category, DiceSet};

/// The points needed in Ones through Sixes to earn the upper-section bonus.
pub const UPPER_BONUS_THRESHOLD: u16 = 63;
/// The upper-section bonus.
pub const UPPER_BONUS: u16 = 35;
/// Awarded for each Yahtzee rolled after Yahtzee has been scored at 50.
pub const YAHTZEE_BONUS: u16 = 100;

/// One row of a scorecard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Points for this category.
    pub score: u16,
    /// Positions of the dice that justify the score.
    pub contributing: Vec<usize>,
    /// Values of the dice that justify the score.
    pub dice: Vec<u8>,
    /// How many rolls into the turn this entry was computed. Zero means not yet evaluated on a
    /// theoretical card, or not yet scored on a committed one.
    pub rolls_used: u8,
}

impl ScoreEntry {
    /// Creates an entry backed by the dice at `contributing`.
    pub fn new(score: u16, contributing: Vec<usize>, dice: &DiceSet, rolls_used: u8) -> Self {
        let values = contributing.iter().map(|&i| dice.values()[i]).collect();
        Self {
            score,
            contributing,
            dice: values,
            rolls_used,
        }
    }

    /// An evaluated entry that the dice do not achieve.
    pub fn missed(rolls_used: u8) -> Self {
        Self {
            rolls_used,
            ..Self::default()
        }
    }

    /// Returns true if the entry has been evaluated or scored.
    pub fn is_scored(&self) -> bool {
        self.rolls_used != 0
    }
}

impl Display for ScoreEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.is_scored() {
            return f.write_str("-");
        }
        write!(
            f,
            "{} [{}] ({} roll{})",
            self.score,
            self.dice.iter().join(", "),
            self.rolls_used,
            if self.rolls_used == 1 { "" } else { "s" }
        )
    }
}

/// A full scorecard: one entry per [`Category`], in scorecard order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    entries: [ScoreEntry; 13],
}

impl Index<Category> for ScoreCard {
    type Output = ScoreEntry;

    fn index(&self, category: Category) -> &Self::Output {
        &self.entries[category.index()]
    }
}

impl Display for ScoreCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (category, entry) in self.categories() {
            writeln!(f, "{category:>15}: {entry}")?;
        }
        Ok(())
    }
}

impl ScoreCard {
    delegate! {
        to self.entries {
            /// Iterates over entries in scorecard order.
            pub fn iter(&self) -> std::slice::Iter<'_, ScoreEntry>;
        }
    }

    /// Iterates over entries alongside their categories.
    pub fn categories(&self) -> impl Iterator<Item = (Category, &ScoreEntry)> {
        Category::all_categories()
            .iter()
            .copied()
            .zip(self.entries.iter())
    }

    /// Categories that have not been scored.
    pub fn open_categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.categories()
            .filter(|(_, e)| !e.is_scored())
            .map(|(c, _)| c)
    }

    /// Returns true if the category has been scored.
    pub fn is_scored(&self, category: Category) -> bool {
        self[category].is_scored()
    }

    /// Returns true once every category has been scored.
    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(ScoreEntry::is_scored)
    }

    /// Returns true if Yahtzee has been scored for 50 points.
    pub fn has_yahtzee(&self) -> bool {
        let entry = &self[Category::Yahtzee];
        entry.is_scored() && entry.score == Category::Yahtzee.fixed_score().unwrap_or_default()
    }

    /// The sum of Ones through Sixes.
    pub fn upper_total(&self) -> u16 {
        self.categories()
            .filter(|(c, _)| c.is_upper())
            .map(|(_, e)| e.score)
            .sum()
    }

    /// The sum of every entry, excluding bonuses.
    pub fn total(&self) -> u16 {
        self.entries.iter().map(|e| e.score).sum()
    }

    /// Replaces the entry for `category`.
    pub(crate) fn set(&mut self, category: Category, entry: ScoreEntry) {
        self.entries[category.index()] = entry;
    }

    /// Resets every entry.
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod test {
    use std::convert::TryFrom;

    use super::*;

    fn dice(values: [u8; 5]) -> DiceSet {
        DiceSet::try_from(values).unwrap()
    }

    #[test]
    fn test_entry_records_values() {
        let entry = ScoreEntry::new(6, vec![1, 3], &dice([1, 3, 2, 3, 5]), 2);
        assert_eq!(entry.dice, vec![3, 3]);
        assert!(entry.is_scored());
        assert_eq!(entry.to_string(), "6 [3, 3] (2 rolls)");
        assert_eq!(ScoreEntry::default().to_string(), "-");
    }

    #[test]
    fn test_totals() {
        let mut card = ScoreCard::default();
        assert!(!card.is_complete());
        card.set(Category::Sixes, ScoreEntry::new(18, vec![0, 1, 2], &dice([6, 6, 6, 1, 2]), 1));
        card.set(Category::Chance, ScoreEntry::new(21, vec![0, 1, 2, 3, 4], &dice([6, 6, 6, 1, 2]), 3));
        card.set(Category::Ones, ScoreEntry::missed(3));
        assert_eq!(card.upper_total(), 18);
        assert_eq!(card.total(), 39);
        assert_eq!(card.open_categories().count(), 10);
        assert!(card.is_scored(Category::Ones));
        assert!(!card.has_yahtzee());
    }

    #[test]
    fn test_zero_yahtzee_is_not_a_yahtzee() {
        let mut card = ScoreCard::default();
        card.set(Category::Yahtzee, ScoreEntry::missed(3));
        assert!(!card.has_yahtzee());
        card.set(Category::Yahtzee, ScoreEntry::new(50, (0..5).collect(), &dice([4; 5]), 2));
        assert!(card.has_yahtzee());
    }

    #[test]
    fn test_serialized_in_order() {
        let card = ScoreCard::default();
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["entries"].as_array().map(Vec::len), Some(13));
    }
}
