//! Error types

use super::{ActionType, Category, Seat};

/// A rejected roll. The player's state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RollError {
    /// All three rolls of the turn have been used.
    #[error("no rolls remaining")]
    NoRollsRemaining,

    /// The selection mask must name every die.
    #[error("selection must have 5 entries, got {0}")]
    InvalidSelectionLength(usize),

    /// Selection entries are 1 (roll) or 0 (keep).
    #[error("selection entry {index} must be 0 or 1, got {value}")]
    InvalidSelectionValue { index: usize, value: u8 },

    /// The first roll of a turn has nothing to keep.
    #[error("the first roll of a turn must roll all dice")]
    FirstRollMustUseAllDice,
}

/// A rejected commit. The player's state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommitError {
    #[error("invalid category {0}")]
    InvalidCategory(usize),
    #[error("{0} has already been scored")]
    CategoryAlreadyScored(Category),
    #[error("the dice have not been rolled this turn")]
    NotRolled,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("a game needs at least one player")]
    InvalidGameConfiguration,
    #[error("{0} must score before the turn passes")]
    TurnNotComplete(Seat),
    #[error("{0} has already scored this turn")]
    TurnAlreadyScored(Seat),
    #[error("{0} has unscored categories")]
    IncompleteScorecard(Seat),
    #[error("expected {seat} to {action}")]
    ExpectActioned { seat: Seat, action: ActionType },
    #[error("game over")]
    GameOver,
    #[error(transparent)]
    Roll(#[from] RollError),
    #[error(transparent)]
    Commit(#[from] CommitError),
}

impl GameError {
    /// Returns true if the error is a rejected move that the caller may retry.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            GameError::Roll(_)
                | GameError::Commit(_)
                | GameError::ExpectActioned { .. }
                | GameError::TurnAlreadyScored(_)
        )
    }
}
