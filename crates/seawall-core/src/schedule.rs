//! One-shot deferred continuations, keyed by purpose.
//!
//! The orchestration layer defers work (switching players, automatic
//! restarts) instead of running it inline. Each pending task is keyed by
//! what it will do: scheduling the same purpose again supersedes the
//! earlier deadline, so a task can never fire twice, and every reset
//! path cancels the lot.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What a pending continuation will do when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaskKind {
    /// Hand the turn to the other seat after the switch window
    SwitchPlayers,
    /// Check the match-victory threshold after a game win
    MatchCheck,
    /// Start the next individual game after victory or a max-size draw
    AutoRestart,
    /// Run the start-game sequence after an explicit restart
    Kickoff,
    /// Start the first turn's clock once the greetings have played
    TimerStart,
}

/// Pending one-shot tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheduler {
    pending: HashMap<TaskKind, u64>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` to fire at `due_ms`, superseding any earlier
    /// deadline for the same purpose.
    pub fn schedule(&mut self, kind: TaskKind, due_ms: u64) {
        self.pending.insert(kind, due_ms);
    }

    /// Drop a pending task, if present
    pub fn cancel(&mut self, kind: TaskKind) {
        self.pending.remove(&kind);
    }

    /// Drop every pending task
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Whether `kind` is waiting to fire
    pub fn is_pending(&self, kind: TaskKind) -> bool {
        self.pending.contains_key(&kind)
    }

    /// Earliest pending deadline, if any
    pub fn next_due(&self) -> Option<u64> {
        self.pending.values().copied().min()
    }

    /// Remove and return every task due at or before `now_ms`, ordered
    /// by deadline (ties break on task kind for determinism).
    pub fn take_due(&mut self, now_ms: u64) -> Vec<TaskKind> {
        let mut due: Vec<(u64, TaskKind)> = self
            .pending
            .iter()
            .filter_map(|(&kind, &at)| (at <= now_ms).then_some((at, kind)))
            .collect();
        due.sort();
        for (_, kind) in &due {
            self.pending.remove(kind);
        }
        due.into_iter().map(|(_, kind)| kind).collect()
    }
}
