//! Robot player
//!

use std::cmp::Reverse;
use std::sync::Arc;

use itertools::Itertools;

use super::{ActionData, ActionType, Agent, Event, GameError, PlayerView};
use crate::{Category, Player, Selection, NUM_DICE};

/// A greedy, deterministic player.
///
/// The robot scores as soon as the dice fill Full House, Large Straight or Yahtzee. Otherwise it
/// keeps the most common face and re-rolls the rest. Once out of rolls it takes the open
/// category worth the most points, falling back to the top of the card.
#[derive(Debug, Default)]
pub struct Robot;

impl Robot {
    pub fn into_agent(self) -> Arc<dyn Agent> {
        Arc::new(self)
    }

    /// The open category worth the most points right now.
    fn best_category(player: &Player) -> Option<Category> {
        let card = player.theoretical_scorecard();
        player
            .scorecard()
            .open_categories()
            .min_by_key(|&c| (Reverse(card[c].score), c.index()))
    }

    fn score(player: &Player) -> ActionData {
        let category = Self::best_category(player).unwrap_or(Category::Chance);
        ActionData::Score { category }
    }

    fn roll_or_score(player: &Player) -> ActionData {
        if let Some(category) = Self::best_category(player) {
            let made = player.theoretical_scorecard()[category].score > 0
                && matches!(
                    category,
                    Category::FullHouse | Category::LargeStraight | Category::Yahtzee
                );
            if made {
                return ActionData::Score { category };
            }
        }
        let selection = Self::keep_most_common(player);
        if selection.count() == 0 {
            return Self::score(player);
        }
        ActionData::Roll { selection }
    }

    /// Keeps every die showing the most common face, preferring higher faces.
    fn keep_most_common(player: &Player) -> Selection {
        let values = player.dice().values();
        let keep = values
            .iter()
            .counts()
            .into_iter()
            .max_by_key(|&(&face, count)| (count, face))
            .map(|(&face, _)| face)
            .unwrap_or_default();
        let mut rolls = [true; NUM_DICE];
        for (roll, &value) in rolls.iter_mut().zip(values.iter()) {
            *roll = value != keep;
        }
        Selection::from(rolls)
    }
}

impl Agent for Robot {
    fn take_action(&self, view: PlayerView, action: ActionType) -> ActionData {
        match action {
            ActionType::Roll => ActionData::Roll {
                selection: Selection::ALL,
            },
            ActionType::RollOrScore => Self::roll_or_score(view.player),
            ActionType::Score => Self::score(view.player),
            ActionType::Advance => ActionData::Advance,
        }
    }

    fn notify(&self, _: PlayerView, _: &Event) {}

    fn handle_error(&self, _: GameError) -> bool {
        false
    }
}
