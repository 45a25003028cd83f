//! Command line arguments

use clap::Parser;
use yahtzee::GameConfig;

#[derive(Debug, Clone, Parser)]
#[command(version, about = "Plays a game of Yahtzee", long_about = None)]
pub struct Args {
    /// Number of players, when no names are given
    #[arg(short, long, default_value_t = 2)]
    pub players: usize,

    /// Player name, in seat order; may be repeated
    #[arg(short, long = "name")]
    pub names: Vec<String>,

    /// Play the first seat from the console
    #[arg(short, long)]
    pub interactive: bool,

    /// Seed for a reproducible game
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the final standings to stdout as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging, unless RUST_LOG is set
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn game_config(&self) -> GameConfig {
        if self.names.is_empty() {
            GameConfig::with_players(self.players)
        } else {
            GameConfig::new(self.names.iter().cloned())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["yahtzee"]);
        assert_eq!(args.game_config().players, vec!["P1", "P2"]);
        assert!(!args.interactive);
        assert_eq!(args.seed, None);
    }

    #[test]
    fn test_names() {
        let args = Args::parse_from(["yahtzee", "-n", "Ann", "--name", "Bob", "--seed", "7"]);
        assert_eq!(args.game_config().players, vec!["Ann", "Bob"]);
        assert_eq!(args.seed, Some(7));
    }
}
