//! Character dialogue: flavor scripts and the notification queue.
//!
//! This module contains:
//! - Per-character script tables for eight situations
//! - The `LinePicker` trait for choosing a line (random by default,
//!   deterministic in tests)
//! - A FIFO queue of dialogue entries with a currently-showing slot and
//!   auto-close deadlines
//!
//! The queue observes the game; it never drives it. Game transitions
//! push entries, the presentation layer reads the current one.

use crate::board::Mark;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Situations a character can speak to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineKind {
    /// Start of a match
    Greeting,
    /// A move was played
    Move,
    /// Won an individual game
    Victory,
    /// Lost an individual game
    Defeat,
    /// Goading the opponent
    Taunt,
    /// Tried an occupied or out-of-bounds cell
    InvalidMove,
    /// Ran out the turn clock
    Timeout,
    /// The board filled with no winner
    Draw,
}

/// Which side of the screen a speaker occupies.
///
/// The Rat fights from the land on the left, the Octopus from the sea on
/// the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenSide {
    Left,
    Right,
}

impl ScreenSide {
    /// Home side for a character
    pub fn of(mark: Mark) -> ScreenSide {
        match mark {
            Mark::Rat => ScreenSide::Left,
            Mark::Octopus => ScreenSide::Right,
        }
    }
}

/// The script table for one character and situation.
pub fn lines(mark: Mark, kind: LineKind) -> &'static [&'static str] {
    match (mark, kind) {
        (Mark::Rat, LineKind::Greeting) => &[
            "Time to show these sea creatures who really runs this town!",
            "The rats shall inherit the earth!",
            "Ready to get outsmarted by something without tentacles?",
        ],
        (Mark::Rat, LineKind::Move) => &[
            "A clever play, for a land dweller...",
            "The rat pack strikes again!",
            "Calculating my next brilliant move...",
        ],
        (Mark::Rat, LineKind::Victory) => &[
            "Brains beat tentacles every time!",
            "Another win for the rats!",
            "Dry-land supremacy, confirmed!",
        ],
        (Mark::Rat, LineKind::Defeat) => &[
            "This isn't over, squid!",
            "Even the sharpest rat has an off day...",
            "I'll be back with reinforcements!",
        ],
        (Mark::Rat, LineKind::Taunt) => &[
            "Is that the best an octopus can do?",
            "Eight arms and still not one decent move!",
            "Maybe stick to the ocean, sea creature!",
        ],
        (Mark::Rat, LineKind::InvalidMove) => &[
            "That square is taken, genius!",
            "Eyes on the board!",
            "Even a rat knows that move doesn't work!",
        ],
        (Mark::Rat, LineKind::Timeout) => &[
            "Out of time! Decision paralysis?",
            "The clock waits for no one!",
            "Hesitation is the enemy of victory!",
        ],
        (Mark::Rat, LineKind::Draw) => &[
            "A tactical stalemate... impressive.",
            "Neither land nor sea claims victory today.",
            "The board grows... the battle goes on!",
        ],
        (Mark::Octopus, LineKind::Greeting) => &[
            "Prepare to be swept away by the tide!",
            "The fury of the ocean knows no limits!",
            "Eight arms, endless possibilities!",
        ],
        (Mark::Octopus, LineKind::Move) => &[
            "The deep taught me well...",
            "Flowing like the current itself!",
            "Watch and learn, surface dweller!",
        ],
        (Mark::Octopus, LineKind::Victory) => &[
            "The ocean conquers all!",
            "The tentacles triumph once more!",
            "The deep sea reigns supreme!",
        ],
        (Mark::Octopus, LineKind::Defeat) => &[
            "The tide will turn in my favor...",
            "This surface victory is temporary!",
            "The ocean remembers everything...",
        ],
        (Mark::Octopus, LineKind::Taunt) => &[
            "Is that how you play on land?",
            "Four limbs against eight... hardly fair!",
            "Maybe crawl back to your sewers!",
        ],
        (Mark::Octopus, LineKind::InvalidMove) => &[
            "The sea makes no such mistakes!",
            "Focus, land creature!",
            "Even a starfish would do better!",
        ],
        (Mark::Octopus, LineKind::Timeout) => &[
            "The ocean waits for no one!",
            "Tick-tock goes the surface clock!",
            "Indecision is not the way of the sea!",
        ],
        (Mark::Octopus, LineKind::Draw) => &[
            "An oceanic standoff... intriguing.",
            "No realm claims dominion today.",
            "The battlefield widens... let us continue!",
        ],
    }
}

/// Chooses one line from a script.
///
/// Pluggable so that gameplay flavor stays random while tests inject a
/// deterministic picker.
pub trait LinePicker {
    fn pick<'a>(&mut self, lines: &[&'a str]) -> &'a str;
}

/// Picks a uniformly random line.
#[derive(Debug, Default)]
pub struct RandomPicker;

impl LinePicker for RandomPicker {
    fn pick<'a>(&mut self, lines: &[&'a str]) -> &'a str {
        let index = rand::thread_rng().gen_range(0..lines.len());
        lines[index]
    }
}

/// Always picks the line at a fixed index (modulo script length).
#[derive(Debug, Clone, Copy)]
pub struct FixedPicker(pub usize);

impl LinePicker for FixedPicker {
    fn pick<'a>(&mut self, lines: &[&'a str]) -> &'a str {
        lines[self.0 % lines.len()]
    }
}

/// One notification for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueEntry {
    /// Who is speaking
    pub speaker: Mark,
    /// What prompted the line
    pub kind: LineKind,
    /// The text to show
    pub text: String,
    /// Which side of the screen the speaker occupies
    pub side: ScreenSide,
    /// Close automatically after this many milliseconds, or stay until
    /// dismissed
    pub auto_close_ms: Option<u64>,
}

impl DialogueEntry {
    /// An entry speaking one of `speaker`'s scripted lines for `kind`
    pub fn scripted(
        speaker: Mark,
        kind: LineKind,
        picker: &mut dyn LinePicker,
        auto_close_ms: Option<u64>,
    ) -> Self {
        Self {
            speaker,
            kind,
            text: picker.pick(lines(speaker, kind)).to_string(),
            side: ScreenSide::of(speaker),
            auto_close_ms,
        }
    }

    /// An entry with bespoke text (end-of-match announcements)
    pub fn spoken(speaker: Mark, kind: LineKind, text: String, auto_close_ms: Option<u64>) -> Self {
        Self {
            speaker,
            kind,
            text,
            side: ScreenSide::of(speaker),
            auto_close_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Showing {
    entry: DialogueEntry,
    /// Absolute queue-clock deadline, if the entry auto-closes
    deadline_ms: Option<u64>,
}

/// FIFO queue of dialogue entries with a currently-showing slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueQueue {
    current: Option<Showing>,
    queue: VecDeque<DialogueEntry>,
    now_ms: u64,
}

impl DialogueQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an entry; it shows immediately if nothing is on screen
    pub fn push(&mut self, entry: DialogueEntry) {
        self.queue.push_back(entry);
        if self.current.is_none() {
            self.promote(self.now_ms);
        }
    }

    fn promote(&mut self, base_ms: u64) {
        self.current = self.queue.pop_front().map(|entry| Showing {
            deadline_ms: entry.auto_close_ms.map(|after| base_ms + after),
            entry,
        });
    }

    /// Close the current entry and show the next queued one
    pub fn dismiss(&mut self) {
        self.promote(self.now_ms);
    }

    /// Drop the current entry and everything queued behind it
    pub fn force_close(&mut self) {
        self.current = None;
        self.queue.clear();
    }

    /// Advance the queue clock, expiring auto-close entries in order.
    ///
    /// A successor's deadline is measured from its predecessor's expiry,
    /// not from the end of the slice, so a long `advance` walks the
    /// queue chronologically.
    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
        while let Some(deadline) = self
            .current
            .as_ref()
            .and_then(|showing| showing.deadline_ms)
            .filter(|&deadline| deadline <= self.now_ms)
        {
            self.promote(deadline);
        }
    }

    /// The entry on screen, if any
    pub fn current(&self) -> Option<&DialogueEntry> {
        self.current.as_ref().map(|showing| &showing.entry)
    }

    /// Number of entries waiting behind the current one
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Whether anything is on screen or waiting
    pub fn is_idle(&self) -> bool {
        self.current.is_none() && self.queue.is_empty()
    }
}
