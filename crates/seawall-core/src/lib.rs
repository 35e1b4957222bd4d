//! Seawall - a rat-versus-octopus duel over an ever-growing grid
//!
//! This crate provides the full game engine for Seawall, including:
//! - Board representation with win detection and draw-driven expansion
//! - Session lifecycle state machine
//! - Per-turn countdown timer and keyed one-shot scheduler
//! - Two-seat player registry with match scoring
//! - Character dialogue queue and on-disk display preferences
//!
//! # Architecture
//!
//! The engine is platform-agnostic and wholly deterministic: it never
//! reads wall-clock time or spawns anything. A host (the bundled
//! terminal app, or a browser through the `wasm` feature) feeds commands
//! in, advances a logical millisecond clock, and renders read-only
//! snapshots.
//!
//! # Modules
//!
//! - [`board`]: The grid, marks, and outcome queries
//! - [`session`]: Lifecycle phases and move bookkeeping
//! - [`player`]: Seats, player records, and the roster
//! - [`timer`]: The per-turn countdown
//! - [`schedule`]: Deferred one-shot continuations
//! - [`dialogue`]: Flavor scripts and the notification queue
//! - [`controller`]: The orchestration layer tying it all together
//! - [`prefs`]: The small persisted preference store

pub mod actions;
pub mod board;
pub mod controller;
pub mod dialogue;
pub mod player;
pub mod prefs;
pub mod schedule;
pub mod session;
pub mod timer;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use actions::Command;
pub use board::{Board, BoardError, Mark};
pub use controller::{ConfigError, GameConfig, GameController, Snapshot, MATCH_VICTORY_SCORE};
pub use dialogue::{
    DialogueEntry, DialogueQueue, FixedPicker, LineKind, LinePicker, RandomPicker, ScreenSide,
};
pub use player::{Player, Roster, Seat};
pub use prefs::{Preferences, PrefsError, Theme};
pub use schedule::{Scheduler, TaskKind};
pub use session::{MoveRecord, Phase, Session, BOARD_SIZES, DEFAULT_WIN_LENGTH, MAX_BOARD_SIZE};
pub use timer::{TimerView, TurnTimer};
