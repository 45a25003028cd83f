//! Game management.
//!
//! A game consists of thirteen rounds. In each round, every [`Player`] takes one turn in seat
//! order: up to three rolls, then a single commit to an open category. When the last seat of
//! the last round passes the turn, the game ends and the highest total wins.

use std::cmp::Reverse;
use std::collections::VecDeque;
use std::convert::TryFrom;
use std::fmt::Display;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    Action, ActionData, ActionType, Category, CommitError, DieSource, Event, ExpectAction,
    GameError, Player, RandomDice, RollError, Seat, Selection, ROLLS_PER_TURN,
};

/// The number of rounds in a game.
pub const TURNS_PER_GAME: u8 = 13;

/// Configuration for a new game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Player names, in seat order.
    pub players: Vec<String>,
}

impl GameConfig {
    /// Creates a configuration from a list of names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            players: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a configuration with `count` players, named after their seats.
    pub fn with_players(count: usize) -> Self {
        Self::new((0..count).map(|i| Seat::from(i).to_string()))
    }

    /// Checks that the game can be played.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.players.is_empty() {
            return Err(GameError::InvalidGameConfiguration);
        }
        Ok(())
    }
}

/// The outcome of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    InProgress,
    Winner(Seat),
    Tie(Vec<Seat>),
}

impl Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::InProgress => f.write_str("in progress"),
            GameResult::Winner(seat) => write!(f, "{seat} wins"),
            GameResult::Tie(seats) => write!(f, "tie between {}", seats.iter().join(", ")),
        }
    }
}

/// A player's line in the final standings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub seat: Seat,
    pub name: String,
    pub score: u16,
    pub upper_bonus: bool,
    pub yahtzee_bonuses: u8,
}

impl Display for Standing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:<12} {:>4}", self.seat, self.name, self.score)?;
        if self.upper_bonus {
            f.write_str("  upper bonus")?;
        }
        if self.yahtzee_bonuses > 0 {
            write!(f, "  yahtzee bonus x{}", self.yahtzee_bonuses)?;
        }
        Ok(())
    }
}

/// The state visible to a particular seat.
#[derive(Debug, Clone, Copy)]
pub struct PlayerView<'a> {
    /// The player who has access to this state.
    pub seat: Seat,
    /// The player's scorecard and turn.
    pub player: &'a Player,
    /// Rounds left in the game, including the current one.
    pub remaining_turns: u8,
}

/// A game of Yahtzee.
///
/// ## Actions
///
/// The game may be driven directly, with [`roll`](`Game::roll`),
/// [`end_turn`](`Game::end_turn`) and [`next_player`](`Game::next_player`), or as a state
/// machine. In the latter case, [`next_action`](`Game::next_action`) names the seat and the
/// type of action expected, and [`apply_action`](`Game::apply_action`) applies it. Scoring
/// through `apply_action` passes the turn.
///
/// ## Events
///
/// Rolls, commits and bonuses are stored in a queue of [`Event`]s, which may be drained using
/// [`pop_event`](`Game::pop_event`).
#[derive(Debug)]
pub struct Game<D = RandomDice> {
    players: Vec<Player>,
    remaining_turns: u8,
    seat: Seat,
    /// The current player has committed this turn.
    scored: bool,
    result: Option<GameResult>,
    source: D,
    events: VecDeque<Event>,
}

impl Game<RandomDice> {
    /// Creates a game with `num_players` players and a randomly seeded dice source.
    pub fn new(num_players: usize) -> Result<Self, GameError> {
        Self::with_source(
            GameConfig::with_players(num_players),
            RandomDice::from_entropy(),
        )
    }
}

impl<D: DieSource> Game<D> {
    /// Creates a game that rolls dice from `source`.
    pub fn with_source(config: GameConfig, source: D) -> Result<Self, GameError> {
        config.validate()?;
        debug!(players = config.players.len(), "new game");
        Ok(Self {
            players: config.players.into_iter().map(Player::new).collect(),
            remaining_turns: TURNS_PER_GAME,
            seat: Seat::FIRST,
            scored: false,
            result: None,
            source,
            events: VecDeque::new(),
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Returns the player in `seat`.
    ///
    /// Panics if the seat is not part of this game.
    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    pub fn current_seat(&self) -> Seat {
        self.seat
    }

    pub fn current_player(&self) -> &Player {
        self.player(self.seat)
    }

    /// Rounds left in the game, including the current one.
    pub fn remaining_turns(&self) -> u8 {
        self.remaining_turns
    }

    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Returns the state visible to `seat`.
    ///
    /// Panics if the seat is not part of this game.
    pub fn player_view(&self, seat: Seat) -> PlayerView<'_> {
        PlayerView {
            seat,
            player: self.player(seat),
            remaining_turns: self.remaining_turns,
        }
    }

    /// Rolls the current player's dice marked `1` in `mask`.
    pub fn roll(&mut self, mask: &[u8]) -> Result<(), GameError> {
        self.check_turn_open()?;
        if self.current_player().rolls_left() == 0 {
            return Err(RollError::NoRollsRemaining.into());
        }
        let selection = Selection::try_from(mask)?;
        self.roll_selection(selection)
    }

    /// Rolls the current player's selected dice.
    pub fn roll_selection(&mut self, selection: Selection) -> Result<(), GameError> {
        self.check_turn_open()?;
        let seat = self.seat;
        let player = &mut self.players[seat.index()];
        let bonuses = player.yahtzee_bonus_count();
        player.roll_selection(selection, &mut self.source)?;
        self.events.push_back(Event::Rolled {
            seat,
            dice: *player.dice().values(),
        });
        if player.yahtzee_bonus_count() > bonuses {
            self.events.push_back(Event::YahtzeeBonus(seat));
        }
        Ok(())
    }

    /// Commits the category at `index` for the current player.
    pub fn end_turn(&mut self, index: usize) -> Result<(), GameError> {
        let category =
            Category::try_from(index).map_err(|()| CommitError::InvalidCategory(index))?;
        self.score(category)
    }

    /// Commits `category` for the current player.
    pub fn score(&mut self, category: Category) -> Result<(), GameError> {
        self.check_turn_open()?;
        let seat = self.seat;
        let player = &mut self.players[seat.index()];
        let had_bonus = player.bonus_applied();
        player.score(category)?;
        self.scored = true;
        self.events.push_back(Event::Scored {
            seat,
            category,
            score: player.scorecard()[category].score,
        });
        if player.bonus_applied() && !had_bonus {
            self.events.push_back(Event::UpperBonus(seat));
        }
        Ok(())
    }

    /// Passes the turn to the next seat, once the current player has scored. Passing the turn
    /// from the last seat of the last round ends the game.
    pub fn next_player(&mut self) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        if !self.scored {
            return Err(GameError::TurnNotComplete(self.seat));
        }
        if !self.seat.is_last(self.players.len()) {
            self.seat = self.seat.next();
        } else if self.remaining_turns > 1 {
            self.remaining_turns -= 1;
            self.seat = Seat::FIRST;
        } else {
            self.end_game()?;
        }
        self.scored = false;
        Ok(())
    }

    /// Returns the outcome of the game.
    pub fn game_result(&self) -> GameResult {
        self.result.clone().unwrap_or(GameResult::InProgress)
    }

    /// Returns every player's score, best first. Ties are listed in seat order.
    pub fn standings(&self) -> Vec<Standing> {
        self.players
            .iter()
            .enumerate()
            .map(|(i, p)| Standing {
                seat: Seat::from(i),
                name: p.name().to_string(),
                score: p.total_score(),
                upper_bonus: p.bonus_applied(),
                yahtzee_bonuses: p.yahtzee_bonus_count(),
            })
            .sorted_by_key(|s| Reverse(s.score))
            .collect()
    }

    /// Returns the next expected action, or `None` if the game is over.
    pub fn next_action(&self) -> Option<ExpectAction> {
        if self.is_over() {
            return None;
        }
        let action = if self.scored {
            ActionType::Advance
        } else {
            match self.current_player().rolls_left() {
                ROLLS_PER_TURN => ActionType::Roll,
                0 => ActionType::Score,
                _ => ActionType::RollOrScore,
            }
        };
        Some(ExpectAction::new(self.seat, action))
    }

    /// Applies an action. A successful score passes the turn.
    pub fn apply_action(&mut self, action: Action) -> Result<(), GameError> {
        let expect = self.next_action().ok_or(GameError::GameOver)?;
        if action.seat != expect.seat || !expect.action.allows(&action.data) {
            return Err(GameError::ExpectActioned {
                seat: expect.seat,
                action: expect.action,
            });
        }
        match action.data {
            ActionData::Roll { selection } => self.roll_selection(selection),
            ActionData::Score { category } => {
                self.score(category)?;
                self.next_player()
            }
            ActionData::Advance => self.next_player(),
        }
    }

    /// Pops the oldest event from the queue of events.
    pub fn pop_event(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    fn check_turn_open(&self) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        if self.scored {
            return Err(GameError::TurnAlreadyScored(self.seat));
        }
        Ok(())
    }

    fn end_game(&mut self) -> Result<(), GameError> {
        if let Some(i) = self.players.iter().position(|p| !p.scorecard().is_complete()) {
            return Err(GameError::IncompleteScorecard(Seat::from(i)));
        }
        self.remaining_turns = 0;
        let scores: Vec<u16> = self.players.iter_mut().map(Player::finalize).collect();
        let best = scores.iter().copied().max().unwrap_or_default();
        let mut winners = scores
            .iter()
            .positions(|&s| s == best)
            .map(Seat::from)
            .collect_vec();
        let result = if winners.len() == 1 {
            GameResult::Winner(winners.remove(0))
        } else {
            GameResult::Tie(winners)
        };
        info!(%result, score = best, "game over");
        self.result = Some(result.clone());
        self.events.push_back(Event::GameOver(result));
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use assert_matches::assert_matches;

    use super::*;
    use crate::dice::LoadedDice;
    use crate::{Agent, Robot};

    const ALL: [u8; 5] = [1; 5];
    const STRAIGHT: [u8; 5] = [1, 2, 3, 4, 5];

    fn scripted(players: usize) -> Game<LoadedDice> {
        Game::with_source(GameConfig::with_players(players), LoadedDice::default()).unwrap()
    }

    fn play_turn(game: &mut Game<LoadedDice>, values: [u8; 5], category: Category) {
        game.source.load(values);
        game.roll(&ALL).unwrap();
        game.end_turn(category.index()).unwrap();
        game.next_player().unwrap();
    }

    /// Plays a whole game where every roll is a small straight, except that the first seat
    /// rolls `chance` for its Chance turn.
    fn play_game(game: &mut Game<LoadedDice>, chance: [u8; 5]) {
        let seats = game.players().len();
        for &category in Category::all_categories() {
            for seat in 0..seats {
                let values = if seat == 0 && category == Category::Chance {
                    chance
                } else {
                    STRAIGHT
                };
                play_turn(game, values, category);
            }
        }
    }

    #[test]
    fn test_zero_players() {
        assert_matches!(Game::new(0), Err(GameError::InvalidGameConfiguration));
        assert_matches!(
            Game::with_source(GameConfig::new(Vec::<String>::new()), LoadedDice::default()),
            Err(GameError::InvalidGameConfiguration)
        );
    }

    #[test]
    fn test_config_names() {
        let config = GameConfig::with_players(3);
        assert_eq!(config.players, vec!["P1", "P2", "P3"]);
        let game = Game::with_source(GameConfig::new(["Ann", "Bob"]), LoadedDice::default())
            .unwrap();
        assert_eq!(game.player(Seat::from(1)).name(), "Bob");
    }

    #[test]
    fn test_rotation() {
        let mut game = scripted(3);
        assert_eq!(game.current_seat(), Seat::FIRST);
        assert_eq!(game.remaining_turns(), TURNS_PER_GAME);
        play_turn(&mut game, STRAIGHT, Category::Chance);
        assert_eq!(game.current_seat(), Seat::from(1));
        play_turn(&mut game, STRAIGHT, Category::Chance);
        play_turn(&mut game, STRAIGHT, Category::Chance);
        assert_eq!(game.current_seat(), Seat::FIRST);
        assert_eq!(game.remaining_turns(), TURNS_PER_GAME - 1);
    }

    #[test]
    fn test_turn_not_complete() {
        let mut game = scripted(2);
        game.source.load(STRAIGHT);
        game.roll(&ALL).unwrap();
        assert_matches!(
            game.next_player(),
            Err(GameError::TurnNotComplete(seat)) if seat == Seat::FIRST
        );
        assert_eq!(game.current_seat(), Seat::FIRST);
    }

    #[test]
    fn test_turn_already_scored() {
        let mut game = scripted(2);
        game.source.load(STRAIGHT);
        game.roll(&ALL).unwrap();
        game.end_turn(Category::Chance.index()).unwrap();
        assert_matches!(game.roll(&ALL), Err(GameError::TurnAlreadyScored(_)));
        assert_matches!(
            game.end_turn(Category::Ones.index()),
            Err(GameError::TurnAlreadyScored(_))
        );
    }

    #[test]
    fn test_usage_errors_pass_through() {
        let mut game = scripted(1);
        assert_matches!(
            game.roll(&[1, 1]),
            Err(GameError::Roll(RollError::InvalidSelectionLength(2)))
        );
        assert_matches!(
            game.end_turn(20),
            Err(GameError::Commit(CommitError::InvalidCategory(20)))
        );
        game.source.load([1, 2, 3, 4, 5, 6, 6]);
        game.roll(&ALL).unwrap();
        game.roll(&[1, 1, 0, 0, 0]).unwrap();
        game.roll(&[0; 5]).unwrap();
        assert_matches!(
            game.roll(&ALL),
            Err(GameError::Roll(RollError::NoRollsRemaining))
        );
    }

    #[test]
    fn test_winner() {
        let mut game = scripted(2);
        play_game(&mut game, [6, 6, 6, 6, 5]);
        assert!(game.is_over());
        assert_eq!(game.remaining_turns(), 0);
        assert_eq!(game.game_result(), GameResult::Winner(Seat::FIRST));
        // 15 points from Ones through Fives, 30 + 40 from the straights, and Chance.
        assert_eq!(game.player(Seat::FIRST).cumulative_score(), 15 + 70 + 29);
        assert_eq!(game.player(Seat::from(1)).cumulative_score(), 15 + 70 + 15);
        assert_matches!(game.next_player(), Err(GameError::GameOver));
        assert_matches!(game.roll(&ALL), Err(GameError::GameOver));
        assert!(game.next_action().is_none());
    }

    #[test]
    fn test_tie() {
        let mut game = scripted(2);
        play_game(&mut game, STRAIGHT);
        assert_eq!(
            game.game_result(),
            GameResult::Tie(vec![Seat::FIRST, Seat::from(1)])
        );
    }

    #[test]
    fn test_game_result_is_idempotent() {
        let mut game = scripted(1);
        assert_eq!(game.game_result(), GameResult::InProgress);
        play_game(&mut game, STRAIGHT);
        let score = game.player(Seat::FIRST).total_score();
        assert_eq!(game.game_result(), GameResult::Winner(Seat::FIRST));
        assert_eq!(game.game_result(), GameResult::Winner(Seat::FIRST));
        assert_eq!(game.player(Seat::FIRST).total_score(), score);
        assert_eq!(game.standings()[0].score, score);
    }

    #[test]
    fn test_unrolled_turn_cannot_pass() {
        let mut game = scripted(2);
        assert_matches!(
            game.next_player(),
            Err(GameError::TurnNotComplete(seat)) if seat == Seat::FIRST
        );
        assert_eq!(game.current_seat(), Seat::FIRST);
        assert_eq!(game.remaining_turns(), TURNS_PER_GAME);
        assert_eq!(game.next_action().unwrap().action, ActionType::Roll);

        // The turn is still playable, and the game can still finish.
        play_turn(&mut game, STRAIGHT, Category::Ones);
        assert_eq!(game.current_seat(), Seat::from(1));
    }

    #[test]
    fn test_incomplete_scorecard() {
        let mut game = scripted(1);
        for &category in &Category::all_categories()[..12] {
            play_turn(&mut game, STRAIGHT, category);
        }
        assert_eq!(game.remaining_turns(), 1);
        // Force the end of the game with Chance still open.
        game.scored = true;
        assert_matches!(
            game.next_player(),
            Err(GameError::IncompleteScorecard(seat)) if seat == Seat::FIRST
        );
        assert_eq!(game.remaining_turns(), 1);
        assert_eq!(game.game_result(), GameResult::InProgress);
        assert_eq!(game.player(Seat::FIRST).total_score(), 15 + 70);
    }

    #[test]
    #[should_panic]
    fn test_player_view_outside_game() {
        let game = scripted(2);
        game.player_view(Seat::from(2));
    }

    #[test]
    fn test_events() {
        let mut game = scripted(1);
        play_turn(&mut game, [3; 5], Category::Yahtzee);
        game.source.load([3; 5]);
        game.roll(&ALL).unwrap();
        game.end_turn(Category::Threes.index()).unwrap();
        assert_eq!(
            game.pop_event(),
            Some(Event::Rolled {
                seat: Seat::FIRST,
                dice: [3; 5]
            })
        );
        assert_matches!(
            game.pop_event(),
            Some(Event::Scored {
                category: Category::Yahtzee,
                score: 50,
                ..
            })
        );
        assert_matches!(game.pop_event(), Some(Event::Rolled { .. }));
        assert_eq!(game.pop_event(), Some(Event::YahtzeeBonus(Seat::FIRST)));
        assert_matches!(
            game.pop_event(),
            Some(Event::Scored {
                category: Category::Threes,
                score: 15,
                ..
            })
        );
        assert_eq!(game.pop_event(), None);
    }

    #[test]
    fn test_next_action() {
        let mut game = scripted(2);
        let expect = game.next_action().unwrap();
        assert_eq!(expect.seat, Seat::FIRST);
        assert_eq!(expect.action, ActionType::Roll);

        let wrong = Action::new(
            Seat::from(1),
            ActionData::Roll {
                selection: Selection::ALL,
            },
        );
        assert_matches!(
            game.apply_action(wrong),
            Err(GameError::ExpectActioned {
                action: ActionType::Roll,
                ..
            })
        );
        let early = expect.with_data(ActionData::Score {
            category: Category::Chance,
        });
        assert_matches!(game.apply_action(early), Err(GameError::ExpectActioned { .. }));

        game.source.load([1, 2, 3, 4, 5, 5]);
        let roll = ActionData::Roll {
            selection: Selection::ALL,
        };
        game.apply_action(expect.with_data(roll)).unwrap();
        assert_eq!(game.next_action().unwrap().action, ActionType::RollOrScore);
        game.apply_action(expect.with_data(ActionData::Roll {
            selection: "00001".parse::<Selection>().unwrap(),
        }))
        .unwrap();
        assert_eq!(game.current_player().dice().values(), &[1, 2, 3, 4, 5]);

        game.apply_action(expect.with_data(ActionData::Score {
            category: Category::LargeStraight,
        }))
        .unwrap();
        let expect = game.next_action().unwrap();
        assert_eq!(expect.seat, Seat::from(1));
        assert_eq!(expect.action, ActionType::Roll);
    }

    #[test]
    fn test_advance_after_direct_score() {
        let mut game = scripted(2);
        game.source.load(STRAIGHT);
        game.roll(&ALL).unwrap();
        game.end_turn(Category::Chance.index()).unwrap();
        let expect = game.next_action().unwrap();
        assert_eq!(expect.action, ActionType::Advance);
        game.apply_action(expect.with_data(ActionData::Advance))
            .unwrap();
        assert_eq!(game.current_seat(), Seat::from(1));
    }

    #[test]
    fn test_robot_game() {
        let config = GameConfig::with_players(3);
        let mut game = Game::with_source(config, RandomDice::seeded(17)).unwrap();
        let robot = Robot::default();
        while let Some(expect) = game.next_action() {
            let data = robot.take_action(game.player_view(expect.seat), expect.action);
            game.apply_action(expect.with_data(data)).unwrap();
        }
        assert!(game.is_over());
        assert_ne!(game.game_result(), GameResult::InProgress);
        for player in game.players() {
            assert!(player.scorecard().is_complete());
            let bonuses = u16::from(player.yahtzee_bonus_count()) * crate::YAHTZEE_BONUS
                + if player.bonus_applied() {
                    crate::UPPER_BONUS
                } else {
                    0
                };
            assert_eq!(
                player.total_score(),
                player.scorecard().total() + bonuses
            );
        }
        let standings = game.standings();
        assert!(standings.windows(2).all(|w| w[0].score >= w[1].score));
        match game.game_result() {
            GameResult::Winner(seat) => assert_eq!(standings[0].seat, seat),
            GameResult::Tie(seats) => assert!(seats.contains(&standings[0].seat)),
            GameResult::InProgress => unreachable!(),
        }
    }
}
