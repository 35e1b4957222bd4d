//! Commands the presentation layer can issue.
//!
//! The UI never touches engine state directly: it sends one of these and
//! reads the snapshot back. Every command is answered with a plain
//! accepted/rejected boolean; rejection is never an error.

use crate::board::Mark;
use crate::player::Seat;
use serde::{Deserialize, Serialize};

/// Everything the outside world can ask the engine to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    // ==================== Before play ====================
    /// Leave the intro for character selection
    ProceedToSelection,
    /// Pick a character for a seat; the other seat gets the complement
    SelectCharacter { seat: Seat, character: Mark },
    /// Start the first game once both seats are ready
    StartGame,

    // ==================== During play ====================
    /// A move was requested for cell (row, col)
    RequestMove { row: usize, col: usize },
    /// Suspend or resume play and the turn clock together
    TogglePause,
    /// Grow the board after a draw
    ExpandAfterDraw,

    // ==================== Resets ====================
    /// Start the current game over, keeping scores
    RestartGame,
    /// Start the whole match over, clearing scores
    RestartMatch,
    /// Abandon everything and return to character selection
    BackToSelection,
}
