//! Actions

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::{Category, Seat, Selection};

/// Types of actions that the game can expect from a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    /// Open the turn by rolling all dice.
    Roll,
    /// Re-roll some dice, or score the current roll.
    RollOrScore,
    /// Score the current roll; no rolls remain.
    Score,
    /// Pass the turn to the next player.
    Advance,
}
impl Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ActionType::Roll => "roll",
            ActionType::RollOrScore => "roll or score",
            ActionType::Score => "score",
            ActionType::Advance => "pass the turn",
        })
    }
}

impl ActionType {
    /// Returns true if `data` is a valid response to this type of action.
    pub fn allows(self, data: &ActionData) -> bool {
        matches!(
            (self, data),
            (ActionType::Roll | ActionType::RollOrScore, ActionData::Roll { .. })
                | (ActionType::RollOrScore | ActionType::Score, ActionData::Score { .. })
                | (ActionType::Advance, ActionData::Advance)
        )
    }
}

/// The payload for actions that a player can take during the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionData {
    /// Roll the selected dice.
    Roll { selection: Selection },
    /// Commit the current roll to a category.
    Score { category: Category },
    /// Pass the turn.
    Advance,
}

/// The action that the game's state machine expects to happen next.
#[derive(Debug, Clone, Copy)]
pub struct ExpectAction {
    /// The player expected to take the action.
    pub seat: Seat,
    /// The type of action.
    pub action: ActionType,
}

impl ExpectAction {
    /// Create a new [`ExpectAction`].
    pub fn new(seat: Seat, action: ActionType) -> Self {
        Self { seat, action }
    }

    /// Bind in a payload to create an [`Action`].
    pub fn with_data(self, data: ActionData) -> Action {
        Action::new(self.seat, data)
    }
}

/// An action taken by a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The player taking the action.
    pub seat: Seat,
    /// The action payload.
    pub data: ActionData,
}

impl Action {
    /// Create a new [`Action`].
    pub fn new(seat: Seat, data: ActionData) -> Self {
        Self { seat, data }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_allows() {
        let roll = ActionData::Roll {
            selection: Selection::ALL,
        };
        let score = ActionData::Score {
            category: Category::Chance,
        };
        assert!(ActionType::Roll.allows(&roll));
        assert!(!ActionType::Roll.allows(&score));
        assert!(ActionType::RollOrScore.allows(&roll));
        assert!(ActionType::RollOrScore.allows(&score));
        assert!(!ActionType::Score.allows(&roll));
        assert!(ActionType::Score.allows(&score));
        assert!(!ActionType::Score.allows(&ActionData::Advance));
        assert!(ActionType::Advance.allows(&ActionData::Advance));
    }
}
