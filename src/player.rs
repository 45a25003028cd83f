//! Player state.

use std::convert::TryFrom;

use tracing::{debug, info};

use super::evaluator;
use super::{
    Category, CommitError, DiceSet, DieSource, RollError, ScoreCard, Selection, UPPER_BONUS,
    UPPER_BONUS_THRESHOLD, YAHTZEE_BONUS,
};

/// The number of rolls allowed in a turn.
pub const ROLLS_PER_TURN: u8 = 3;

/// A player's scorecard and the state of their current turn.
///
/// ## Turns
///
/// A turn opens with three rolls available. The first roll must roll every die; later rolls
/// re-roll any subset. After each roll the theoretical scorecard is recomputed for every open
/// category. The turn closes with [`end_turn`](`Player::end_turn`), which copies one theoretical
/// entry onto the scorecard for good.
///
/// ## Bonuses
///
/// Bonuses are added to the cumulative score as soon as they are earned: 100 points for each
/// roll of five of a kind after Yahtzee has been scored for 50, and 35 points, once, when Ones
/// through Sixes reach 63.
#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    scorecard: ScoreCard,
    theoretical: ScoreCard,
    dice: DiceSet,
    rolls_left: u8,
    cumulative_score: u16,
    joker_count: u8,
    bonus_applied: bool,
    yahtzee_bonus_count: u8,
    /// The last roll may be played as a Joker.
    joker: bool,
    finalized: bool,
}

impl Player {
    /// Creates a new [`Player`] with an empty scorecard.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            scorecard: ScoreCard::default(),
            theoretical: ScoreCard::default(),
            dice: DiceSet::default(),
            rolls_left: ROLLS_PER_TURN,
            cumulative_score: 0,
            joker_count: 0,
            bonus_applied: false,
            yahtzee_bonus_count: 0,
            joker: false,
            finalized: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The committed scorecard.
    pub fn scorecard(&self) -> &ScoreCard {
        &self.scorecard
    }

    /// What could be committed right now, based on the last roll.
    pub fn theoretical_scorecard(&self) -> &ScoreCard {
        &self.theoretical
    }

    pub fn dice(&self) -> &DiceSet {
        &self.dice
    }

    pub fn rolls_left(&self) -> u8 {
        self.rolls_left
    }

    /// Returns true if the dice have been rolled this turn.
    pub fn has_rolled(&self) -> bool {
        self.rolls_left < ROLLS_PER_TURN
    }

    /// Bonuses earned so far. After the game ends, the final score.
    pub fn cumulative_score(&self) -> u16 {
        self.cumulative_score
    }

    /// The number of times a Joker was committed to Full House or a straight.
    pub fn joker_count(&self) -> u8 {
        self.joker_count
    }

    /// Returns true once the upper-section bonus has been earned.
    pub fn bonus_applied(&self) -> bool {
        self.bonus_applied
    }

    pub fn yahtzee_bonus_count(&self) -> u8 {
        self.yahtzee_bonus_count
    }

    /// Returns true if the last roll may be played as a Joker.
    pub fn is_joker(&self) -> bool {
        self.joker
    }

    /// The score so far: committed entries plus bonuses.
    pub fn total_score(&self) -> u16 {
        if self.finalized {
            self.cumulative_score
        } else {
            self.scorecard.total() + self.cumulative_score
        }
    }

    /// Rolls the dice marked `1` in `mask`, keeping those marked `0`.
    pub fn roll<D: DieSource + ?Sized>(
        &mut self,
        mask: &[u8],
        source: &mut D,
    ) -> Result<(), RollError> {
        if self.rolls_left == 0 {
            return Err(RollError::NoRollsRemaining);
        }
        let selection = Selection::try_from(mask)?;
        self.roll_selection(selection, source)
    }

    /// Rolls the selected dice.
    pub fn roll_selection<D: DieSource + ?Sized>(
        &mut self,
        selection: Selection,
        source: &mut D,
    ) -> Result<(), RollError> {
        if self.rolls_left == 0 {
            return Err(RollError::NoRollsRemaining);
        }
        if self.rolls_left == ROLLS_PER_TURN && !selection.is_all() {
            return Err(RollError::FirstRollMustUseAllDice);
        }
        self.dice.roll(selection, source);
        self.rolls_left -= 1;
        debug!(player = %self.name, dice = %self.dice, rolls_left = self.rolls_left, "roll");
        self.apply_yahtzee_bonus();

        let rolls_used = ROLLS_PER_TURN - self.rolls_left;
        self.joker = evaluator::is_joker(&self.dice, &self.scorecard);
        self.theoretical = evaluator::theoretical_scorecard(&self.dice, &self.scorecard, rolls_used);
        Ok(())
    }

    /// Commits the category at `index` on the scorecard and ends the turn.
    pub fn end_turn(&mut self, index: usize) -> Result<(), CommitError> {
        let category =
            Category::try_from(index).map_err(|()| CommitError::InvalidCategory(index))?;
        self.score(category)
    }

    /// Commits `category` on the scorecard and ends the turn.
    pub fn score(&mut self, category: Category) -> Result<(), CommitError> {
        if self.scorecard.is_scored(category) {
            return Err(CommitError::CategoryAlreadyScored(category));
        }
        if !self.has_rolled() {
            return Err(CommitError::NotRolled);
        }
        let entry = self.theoretical[category].clone();
        info!(player = %self.name, %category, score = entry.score, "score");
        self.scorecard.set(category, entry);
        if self.joker
            && matches!(
                category,
                Category::FullHouse | Category::SmallStraight | Category::LargeStraight
            )
        {
            self.joker_count += 1;
        }
        self.apply_upper_bonus();
        self.reset_turn();
        Ok(())
    }

    /// Folds the committed entries into the cumulative score. Subsequent calls have no effect.
    ///
    /// It is the caller's responsibility to ensure that the scorecard is complete.
    pub(crate) fn finalize(&mut self) -> u16 {
        if !self.finalized {
            self.finalized = true;
            self.cumulative_score += self.scorecard.total();
        }
        self.cumulative_score
    }

    fn apply_yahtzee_bonus(&mut self) {
        if self.scorecard.has_yahtzee() && self.dice.is_five_of_a_kind() {
            self.yahtzee_bonus_count += 1;
            self.cumulative_score += YAHTZEE_BONUS;
            info!(player = %self.name, "yahtzee bonus");
        }
    }

    fn apply_upper_bonus(&mut self) {
        if !self.bonus_applied && self.scorecard.upper_total() >= UPPER_BONUS_THRESHOLD {
            self.bonus_applied = true;
            self.cumulative_score += UPPER_BONUS;
            info!(player = %self.name, "upper bonus");
        }
    }

    fn reset_turn(&mut self) {
        self.rolls_left = ROLLS_PER_TURN;
        self.dice.clear();
        self.theoretical.clear();
        self.joker = false;
    }
}
