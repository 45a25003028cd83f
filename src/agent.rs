//! Decision makers that drive a [`Game`](`crate::Game`).

use super::{ActionData, ActionType, Event, GameError, PlayerView};

mod console;
mod robot;
pub use self::console::Console;
pub use self::robot::Robot;

/// A trait that implements a Yahtzee player.
pub trait Agent {
    /// Chooses the next action. The response must be allowed by `action`.
    fn take_action(&self, view: PlayerView, action: ActionType) -> ActionData;

    /// A notification of an event that all players can see.
    fn notify(&self, view: PlayerView, event: &Event);

    /// Indicates that the agent's action was rejected.
    ///
    /// The implementation may return true, if a retry is desired. Otherwise, the error is
    /// fatal.
    fn handle_error(&self, err: GameError) -> bool;
}
