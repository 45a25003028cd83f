//! The game of Yahtzee.
//!
//! The engine is meant to be driven by an external decision maker: a [`Game`] enforces the
//! structure of each turn, and after every roll each [`Player`] exposes a theoretical
//! [`ScoreCard`] listing what could be committed right now.

use std::sync::Arc;

mod action;
mod agent;
mod category;
mod dice;
mod error;
mod evaluator;
mod game;
mod player;
mod scorecard;
mod seat;
pub use self::action::{Action, ActionData, ActionType, ExpectAction};
pub use self::agent::{Agent, Console, Robot};
pub use self::category::Category;
pub use self::dice::{DiceSet, DieSource, RandomDice, Selection, NUM_DICE};
pub use self::error::{CommitError, GameError, RollError};
pub use self::evaluator::{evaluate, is_joker, theoretical_scorecard};
pub use self::game::{Game, GameConfig, GameResult, PlayerView, Standing, TURNS_PER_GAME};
pub use self::player::{Player, ROLLS_PER_TURN};
pub use self::scorecard::{
    ScoreCard, ScoreEntry, UPPER_BONUS, UPPER_BONUS_THRESHOLD, YAHTZEE_BONUS,
};
pub use self::seat::Seat;

/// An event that occurs during the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A player rolled the dice.
    Rolled { seat: Seat, dice: [u8; NUM_DICE] },
    /// A player rolled another Yahtzee after scoring one.
    YahtzeeBonus(Seat),
    /// A player committed a category.
    Scored {
        seat: Seat,
        category: Category,
        score: u16,
    },
    /// A player earned the upper-section bonus.
    UpperBonus(Seat),
    /// The game is over.
    GameOver(GameResult),
}

/// Plays a full game on the command line.
///
/// Robots fill every seat, except the first seat when `interactive` is set, which is played from
/// the console. Returns the final standings.
pub fn cli_main(
    config: GameConfig,
    seed: Option<u64>,
    interactive: bool,
) -> Result<Vec<Standing>, GameError> {
    let source = match seed {
        Some(seed) => RandomDice::seeded(seed),
        None => RandomDice::from_entropy(),
    };
    let mut game = Game::with_source(config, source)?;
    let console = Console::default().into_agent();
    let robot = Robot::default().into_agent();
    let my_seat = Seat::FIRST;

    loop {
        while let Some(event) = game.pop_event() {
            if interactive {
                console.notify(game.player_view(my_seat), &event);
            }
        }
        let Some(expect) = game.next_action() else {
            break;
        };
        let agent: &Arc<dyn Agent> = if interactive && expect.seat == my_seat {
            &console
        } else {
            &robot
        };
        let data = agent.take_action(game.player_view(expect.seat), expect.action);
        match game.apply_action(expect.with_data(data)) {
            Err(err) if err.is_usage() && agent.handle_error(err.clone()) => continue,
            Err(err) => return Err(err),
            Ok(()) => (),
        }
    }
    Ok(game.standings())
}
