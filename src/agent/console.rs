//! Simple console interactive player.

use std::{fmt::Display, io::Write, str::FromStr, sync::Arc};

use ansi_term::{ANSIString, ANSIStrings, Colour, Style};

use super::{ActionData, ActionType, Agent, Event, GameError, PlayerView};
use crate::{Category, Player, Selection, TURNS_PER_GAME};

pub struct Console {
    color: bool,
}
impl Default for Console {
    fn default() -> Self {
        Self::new(true)
    }
}

fn prompt<T: FromStr, S: Display>(prompt: S) -> T {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    loop {
        let mut buffer = String::new();
        print!("{prompt}");
        stdout.flush().expect("flush");
        stdin.read_line(&mut buffer).expect("read");
        let trimmed = buffer.trim();
        if !trimmed.is_empty() {
            if let Ok(obj) = T::from_str(trimmed) {
                return obj;
            }
            println!("Invalid input, try again");
        }
    }
}

/// A response to the roll-or-score prompt.
#[derive(Debug)]
enum Choice {
    Roll(Selection),
    Score(Category),
}

impl FromStr for Choice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Selection>()
            .map(Choice::Roll)
            .or_else(|()| s.parse::<Category>().map(Choice::Score))
    }
}

impl Console {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn into_agent(self) -> Arc<dyn Agent> {
        Arc::new(self)
    }

    fn format(&self, s: &ANSIStrings) -> String {
        if self.color {
            s.to_string()
        } else {
            ansi_term::unstyle(s)
        }
    }

    /// Formats the dice, highlighting those behind the best open category.
    fn format_dice(&self, player: &Player) -> String {
        let card = player.theoretical_scorecard();
        let best = player
            .scorecard()
            .open_categories()
            .max_by_key(|&c| card[c].score)
            .map(|c| card[c].contributing.clone())
            .unwrap_or_default();
        let mut parts: Vec<ANSIString> = vec!["[".into()];
        for (i, value) in player.dice().values().iter().enumerate() {
            if i != 0 {
                parts.push(" ".into());
            }
            let style = if best.contains(&i) {
                Colour::Yellow.bold()
            } else {
                Style::new().dimmed()
            };
            parts.push(style.paint(value.to_string()));
        }
        parts.push("]".into());
        self.format(&ANSIStrings(&parts))
    }

    fn print_card(&self, player: &Player) {
        let card = player.theoretical_scorecard();
        for category in player.scorecard().open_categories() {
            let entry = &card[category];
            let line = format!("{:>3} {category:>15}: {:>3}", category.to_abbr(), entry.score);
            let style = if entry.score > 0 {
                Style::new().bold()
            } else {
                Style::new()
            };
            println!("{}", self.format(&ANSIStrings(&[style.paint(line)])));
        }
    }

    fn roll_or_score(&self, player: &Player) -> ActionData {
        self.print_card(player);
        println!(
            "Dice: {} ({} roll{} left)",
            self.format_dice(player),
            player.rolls_left(),
            if player.rolls_left() == 1 { "" } else { "s" }
        );
        match prompt::<Choice, _>("Re-roll (e.g. 10011) or score (category)? ") {
            Choice::Roll(selection) => ActionData::Roll { selection },
            Choice::Score(category) => ActionData::Score { category },
        }
    }

    fn score(&self, player: &Player) -> ActionData {
        self.print_card(player);
        println!("Dice: {}", self.format_dice(player));
        let category = prompt("Score? ");
        ActionData::Score { category }
    }
}

impl Agent for Console {
    fn take_action(&self, view: PlayerView, action: ActionType) -> ActionData {
        match action {
            ActionType::Roll => {
                println!("Round {}", TURNS_PER_GAME + 1 - view.remaining_turns);
                ActionData::Roll {
                    selection: Selection::ALL,
                }
            }
            ActionType::RollOrScore => self.roll_or_score(view.player),
            ActionType::Score => self.score(view.player),
            ActionType::Advance => ActionData::Advance,
        }
    }

    fn notify(&self, view: PlayerView, event: &Event) {
        match event {
            Event::Rolled { seat, dice } if *seat != view.seat => {
                println!("{seat}: rolled {dice:?}");
            }
            Event::Rolled { .. } => (),
            Event::YahtzeeBonus(seat) => println!("{seat}: Yahtzee bonus!"),
            Event::Scored {
                seat,
                category,
                score,
            } => {
                println!("{seat}: {score} points for {category}");
            }
            Event::UpperBonus(seat) => println!("{seat}: upper section bonus!"),
            Event::GameOver(result) => {
                println!("{}", view.player.scorecard());
                println!("Game over: {result}");
            }
        }
    }

    fn handle_error(&self, err: GameError) -> bool {
        println!("Error: {err}");
        true
    }
}

#[cfg(test)]
mod test {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn test_choice() {
        assert_matches!("00110".parse::<Choice>(), Ok(Choice::Roll(s)) if s.count() == 2);
        assert_matches!("fh".parse::<Choice>(), Ok(Choice::Score(Category::FullHouse)));
        assert_matches!("12".parse::<Choice>(), Ok(Choice::Score(Category::Chance)));
        assert_matches!("00112".parse::<Choice>(), Err(()));
    }
}
