//! Scoring categories.

use std::convert::TryFrom;
use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the thirteen scoring slots, in scorecard order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Ones,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    ThreeOfKind,
    FourOfKind,
    FullHouse,
    SmallStraight,
    LargeStraight,
    Yahtzee,
    Chance,
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Category::Ones => "Ones",
            Category::Twos => "Twos",
            Category::Threes => "Threes",
            Category::Fours => "Fours",
            Category::Fives => "Fives",
            Category::Sixes => "Sixes",
            Category::ThreeOfKind => "Three of a Kind",
            Category::FourOfKind => "Four of a Kind",
            Category::FullHouse => "Full House",
            Category::SmallStraight => "Small Straight",
            Category::LargeStraight => "Large Straight",
            Category::Yahtzee => "Yahtzee",
            Category::Chance => "Chance",
        })
    }
}

impl TryFrom<usize> for Category {
    type Error = ();

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Category::all_categories()
            .get(index)
            .copied()
            .ok_or(())
    }
}

impl FromStr for Category {
    type Err = ();

    /// Parses a scorecard index, an abbreviation, or a full name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(index) = s.parse::<usize>() {
            return Category::try_from(index);
        }
        Category::all_categories()
            .iter()
            .find(|c| {
                c.to_abbr().eq_ignore_ascii_case(s) || c.to_string().eq_ignore_ascii_case(s)
            })
            .copied()
            .ok_or(())
    }
}

impl Category {
    /// All categories, in scorecard order.
    pub fn all_categories() -> &'static [Category; 13] {
        static CATEGORIES: [Category; 13] = [
            Category::Ones,
            Category::Twos,
            Category::Threes,
            Category::Fours,
            Category::Fives,
            Category::Sixes,
            Category::ThreeOfKind,
            Category::FourOfKind,
            Category::FullHouse,
            Category::SmallStraight,
            Category::LargeStraight,
            Category::Yahtzee,
            Category::Chance,
        ];
        &CATEGORIES
    }

    /// The position of this category on the scorecard.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns true for Ones through Sixes.
    pub fn is_upper(self) -> bool {
        self.face().is_some()
    }

    /// The die face counted by an upper-section category.
    pub fn face(self) -> Option<u8> {
        match self {
            Category::Ones => Some(1),
            Category::Twos => Some(2),
            Category::Threes => Some(3),
            Category::Fours => Some(4),
            Category::Fives => Some(5),
            Category::Sixes => Some(6),
            _ => None,
        }
    }

    /// The upper-section category that counts `face`.
    pub fn for_face(face: u8) -> Option<Category> {
        Category::all_categories()[..6]
            .iter()
            .find(|c| c.face() == Some(face))
            .copied()
    }

    /// The fixed value of a pattern category.
    pub fn fixed_score(self) -> Option<u16> {
        match self {
            Category::FullHouse => Some(25),
            Category::SmallStraight => Some(30),
            Category::LargeStraight => Some(40),
            Category::Yahtzee => Some(50),
            _ => None,
        }
    }

    /// Returns a short name for the category.
    pub fn to_abbr(self) -> &'static str {
        match self {
            Category::Ones => "1s",
            Category::Twos => "2s",
            Category::Threes => "3s",
            Category::Fours => "4s",
            Category::Fives => "5s",
            Category::Sixes => "6s",
            Category::ThreeOfKind => "3k",
            Category::FourOfKind => "4k",
            Category::FullHouse => "fh",
            Category::SmallStraight => "ss",
            Category::LargeStraight => "ls",
            Category::Yahtzee => "y",
            Category::Chance => "c",
        }
    }
}
