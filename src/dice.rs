//! Dice.

use std::convert::TryFrom;
use std::fmt::Display;
use std::str::FromStr;

use itertools::Itertools;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::RollError;

/// The number of dice in play.
pub const NUM_DICE: usize = 5;

/// A source of die values.
pub trait DieSource {
    /// Draws a value in `1..=6`.
    fn roll_die(&mut self) -> u8;
}

/// A [`DieSource`] backed by a random number generator.
#[derive(Debug, Clone)]
pub struct RandomDice<R = StdRng> {
    rng: R,
    faces: Uniform<u8>,
}

impl<R: Rng> RandomDice<R> {
    /// Creates a new [`RandomDice`] drawing from `rng`.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            faces: Uniform::new_inclusive(1, 6),
        }
    }
}

impl RandomDice<StdRng> {
    /// Creates a [`RandomDice`] seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Creates a reproducible [`RandomDice`].
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> DieSource for RandomDice<R> {
    fn roll_die(&mut self) -> u8 {
        self.faces.sample(&mut self.rng)
    }
}

/// Selects which dice to re-roll. A set position means "roll this die".
///
/// As a raw mask, `1` re-rolls the die at that position and `0` keeps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection([bool; NUM_DICE]);

impl Selection {
    /// Re-roll every die.
    pub const ALL: Selection = Selection([true; NUM_DICE]);

    /// Returns true if the die at `index` is to be rolled.
    pub fn rolls(self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }

    /// Returns true if every die is to be rolled.
    pub fn is_all(self) -> bool {
        self.0.iter().all(|&r| r)
    }

    /// The number of dice to be rolled.
    pub fn count(self) -> usize {
        self.0.iter().filter(|&&r| r).count()
    }

    /// Returns the selection as a raw mask.
    pub fn mask(self) -> [u8; NUM_DICE] {
        self.0.map(u8::from)
    }
}

impl From<[bool; NUM_DICE]> for Selection {
    fn from(rolls: [bool; NUM_DICE]) -> Self {
        Selection(rolls)
    }
}

impl TryFrom<&[u8]> for Selection {
    type Error = RollError;

    fn try_from(mask: &[u8]) -> Result<Self, Self::Error> {
        if mask.len() != NUM_DICE {
            return Err(RollError::InvalidSelectionLength(mask.len()));
        }
        let mut rolls = [false; NUM_DICE];
        for (index, (&value, roll)) in mask.iter().zip(rolls.iter_mut()).enumerate() {
            *roll = match value {
                0 => false,
                1 => true,
                _ => return Err(RollError::InvalidSelectionValue { index, value }),
            };
        }
        Ok(Selection(rolls))
    }
}

impl FromStr for Selection {
    type Err = ();

    /// Parses a mask written as five digits, such as `10011`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mask: Vec<u8> = s
            .trim()
            .chars()
            .map(|c| c.to_digit(2).map(|d| d as u8).ok_or(()))
            .collect::<Result<_, _>>()?;
        Selection::try_from(mask.as_slice()).map_err(|_| ())
    }
}

impl Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mask().iter().join(""))
    }
}

/// Five dice, addressed by position.
///
/// Positions identify a physical die for the whole turn. A value of zero marks a die that has
/// not been rolled yet this turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiceSet {
    values: [u8; NUM_DICE],
    #[serde(skip)]
    sorted: [u8; NUM_DICE],
}

impl TryFrom<[u8; NUM_DICE]> for DiceSet {
    type Error = ();

    fn try_from(values: [u8; NUM_DICE]) -> Result<Self, Self::Error> {
        if values.iter().all(|v| (1..=6).contains(v)) {
            let mut dice = DiceSet::default();
            dice.set(values);
            Ok(dice)
        } else {
            Err(())
        }
    }
}

impl Display for DiceSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.values.iter().join(", "))
    }
}

impl DiceSet {
    /// The die values, by position.
    pub fn values(&self) -> &[u8; NUM_DICE] {
        &self.values
    }

    /// The die values in ascending order. Positions are not preserved.
    pub fn sorted(&self) -> &[u8; NUM_DICE] {
        &self.sorted
    }

    /// Returns true once the dice have been rolled this turn.
    pub fn is_rolled(&self) -> bool {
        self.values.iter().all(|&v| v != 0)
    }

    /// Returns true if all five dice show the same face.
    pub fn is_five_of_a_kind(&self) -> bool {
        self.is_rolled() && self.sorted[0] == self.sorted[NUM_DICE - 1]
    }

    /// The sum of all dice.
    pub fn sum(&self) -> u16 {
        self.values.iter().map(|&v| u16::from(v)).sum()
    }

    /// Positions of the dice showing `face`.
    pub fn positions(&self, face: u8) -> Vec<usize> {
        self.values.iter().positions(|&v| v == face).collect()
    }

    /// The first position showing `face`.
    pub fn first_position(&self, face: u8) -> Option<usize> {
        self.values.iter().position(|&v| v == face)
    }

    /// Rolls the selected dice, leaving the rest in place.
    pub fn roll<D: DieSource + ?Sized>(&mut self, selection: Selection, source: &mut D) {
        let mut values = self.values;
        for (index, value) in values.iter_mut().enumerate() {
            if selection.rolls(index) {
                *value = source.roll_die();
            }
        }
        self.set(values);
    }

    /// Returns the dice to the unrolled state.
    pub fn clear(&mut self) {
        self.set([0; NUM_DICE]);
    }

    fn set(&mut self, values: [u8; NUM_DICE]) {
        self.values = values;
        self.sorted = values;
        self.sorted.sort_unstable();
    }
}

/// A scripted [`DieSource`], for testing.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct LoadedDice(std::collections::VecDeque<u8>);

#[cfg(test)]
impl LoadedDice {
    pub fn new<I: IntoIterator<Item = u8>>(values: I) -> Self {
        Self(values.into_iter().collect())
    }

    /// Queues more values.
    pub fn load<I: IntoIterator<Item = u8>>(&mut self, values: I) {
        self.0.extend(values);
    }
}

#[cfg(test)]
impl DieSource for LoadedDice {
    fn roll_die(&mut self) -> u8 {
        self.0.pop_front().expect("loaded dice exhausted")
    }
}
