//! Player records and the two-seat registry.
//!
//! This module contains:
//! - The `Seat` identifier for the two local players
//! - The immutable `Player` value object with functional updates
//! - The `Roster` that owns both records and the turn marker

use crate::board::Mark;
use serde::{Deserialize, Serialize};

/// Identifies one of the two seats at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    One,
    Two,
}

impl Seat {
    /// Both seats, in turn order
    pub const ALL: [Seat; 2] = [Seat::One, Seat::Two];

    /// The opposite seat
    pub fn other(&self) -> Seat {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }
}

/// One seat's record.
///
/// Players are immutable value objects: every update returns a new
/// instance. That keeps score history and undo reasoning simple and
/// makes structural equality usable in tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Which seat this record belongs to
    pub seat: Seat,
    /// Chosen character, if any
    pub character: Option<Mark>,
    /// Individual games won this match
    pub score: u32,
    /// Whether it is this player's turn
    pub is_active: bool,
}

impl Player {
    /// A fresh record with no character, no score, and an inactive turn
    pub fn new(seat: Seat) -> Self {
        Self {
            seat,
            character: None,
            score: 0,
            is_active: false,
        }
    }

    /// This player with `character` assigned
    pub fn with_character(&self, character: Mark) -> Self {
        Self {
            character: Some(character),
            ..self.clone()
        }
    }

    /// This player with the turn flag set to `is_active`
    pub fn with_active(&self, is_active: bool) -> Self {
        Self {
            is_active,
            ..self.clone()
        }
    }

    /// This player with `delta` added to the score
    pub fn scored(&self, delta: u32) -> Self {
        Self {
            score: self.score + delta,
            ..self.clone()
        }
    }

    /// This player with the score cleared
    pub fn with_score_reset(&self) -> Self {
        Self {
            score: 0,
            ..self.clone()
        }
    }

    /// Whether a character has been chosen
    pub fn has_character(&self) -> bool {
        self.character.is_some()
    }
}

/// The two-seat registry.
///
/// Owns both player records and the marker for whose turn it is. All
/// mutation goes through these methods; the records themselves are
/// replaced, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    player_one: Player,
    player_two: Player,
    current: Seat,
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

impl Roster {
    /// Two fresh records; seat One moves first
    pub fn new() -> Self {
        Self {
            player_one: Player::new(Seat::One),
            player_two: Player::new(Seat::Two),
            current: Seat::One,
        }
    }

    /// The record for `seat`
    pub fn player(&self, seat: Seat) -> &Player {
        match seat {
            Seat::One => &self.player_one,
            Seat::Two => &self.player_two,
        }
    }

    fn set_player(&mut self, seat: Seat, player: Player) {
        match seat {
            Seat::One => self.player_one = player,
            Seat::Two => self.player_two = player,
        }
    }

    /// Whose turn it is
    pub fn current_seat(&self) -> Seat {
        self.current
    }

    /// The record whose turn it is
    pub fn current_player(&self) -> &Player {
        self.player(self.current)
    }

    /// The record waiting for its turn
    pub fn other_player(&self) -> &Player {
        self.player(self.current.other())
    }

    /// The seat playing `mark`, if either seat picked it
    pub fn seat_with(&self, mark: Mark) -> Option<Seat> {
        Seat::ALL
            .into_iter()
            .find(|&seat| self.player(seat).character == Some(mark))
    }

    /// Assign `character` to `seat`.
    ///
    /// Only two characters exist, so the other seat is forced onto the
    /// complement. A deliberate selection shortcut, not a conflict to
    /// resolve.
    pub fn select_character(&mut self, seat: Seat, character: Mark) {
        self.set_player(seat, self.player(seat).with_character(character));
        let other = seat.other();
        self.set_player(
            other,
            self.player(other).with_character(character.opponent()),
        );
    }

    /// Make `seat` the active player and the other seat inactive
    pub fn set_current(&mut self, seat: Seat) {
        self.current = seat;
        self.player_one = self.player_one.with_active(seat == Seat::One);
        self.player_two = self.player_two.with_active(seat == Seat::Two);
    }

    /// Toggle the active seat
    pub fn switch_to_next(&mut self) {
        self.set_current(self.current.other());
    }

    /// Add `delta` to the score at `seat`
    pub fn add_score(&mut self, seat: Seat, delta: u32) {
        self.set_player(seat, self.player(seat).scored(delta));
    }

    /// Clear both scores, keeping characters and the turn marker
    pub fn reset_scores(&mut self) {
        self.player_one = self.player_one.with_score_reset();
        self.player_two = self.player_two.with_score_reset();
    }

    /// Fresh records with characters preserved; seat One moves first
    pub fn reset_game(&mut self) {
        let one = self.player_one.character;
        let two = self.player_two.character;
        *self = Self::new();
        if let Some(character) = one {
            self.player_one = self.player_one.with_character(character);
        }
        if let Some(character) = two {
            self.player_two = self.player_two.with_character(character);
        }
    }

    /// Full reset including characters
    pub fn reset_all(&mut self) {
        *self = Self::new();
    }

    /// Whether both seats have chosen a character
    pub fn both_ready(&self) -> bool {
        self.player_one.has_character() && self.player_two.has_character()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_player_updates_return_new_instances() {
        let player = Player::new(Seat::One);
        let scored = player.scored(2);

        assert_eq!(player.score, 0);
        assert_eq!(scored.score, 2);
        assert_eq!(scored.seat, Seat::One);
    }

    #[test]
    fn test_select_character_forces_the_complement() {
        let mut roster = Roster::new();
        roster.select_character(Seat::One, Mark::Octopus);

        assert_eq!(roster.player(Seat::One).character, Some(Mark::Octopus));
        assert_eq!(roster.player(Seat::Two).character, Some(Mark::Rat));
        assert!(roster.both_ready());
    }

    #[test]
    fn test_reselect_flips_both_seats() {
        let mut roster = Roster::new();
        roster.select_character(Seat::One, Mark::Rat);
        roster.select_character(Seat::Two, Mark::Rat);

        assert_eq!(roster.player(Seat::One).character, Some(Mark::Octopus));
        assert_eq!(roster.player(Seat::Two).character, Some(Mark::Rat));
    }

    #[test]
    fn test_switch_to_next_toggles_active_flags() {
        let mut roster = Roster::new();
        roster.set_current(Seat::One);
        assert!(roster.player(Seat::One).is_active);
        assert!(!roster.player(Seat::Two).is_active);

        roster.switch_to_next();
        assert_eq!(roster.current_seat(), Seat::Two);
        assert!(!roster.player(Seat::One).is_active);
        assert!(roster.player(Seat::Two).is_active);
    }

    #[test]
    fn test_seat_with_finds_the_mark() {
        let mut roster = Roster::new();
        assert_eq!(roster.seat_with(Mark::Rat), None);

        roster.select_character(Seat::Two, Mark::Rat);
        assert_eq!(roster.seat_with(Mark::Rat), Some(Seat::Two));
        assert_eq!(roster.seat_with(Mark::Octopus), Some(Seat::One));
    }

    #[test]
    fn test_scoring() {
        let mut roster = Roster::new();
        roster.add_score(Seat::Two, 1);
        roster.add_score(Seat::Two, 1);

        assert_eq!(roster.player(Seat::Two).score, 2);
        assert_eq!(roster.player(Seat::One).score, 0);

        roster.reset_scores();
        assert_eq!(roster.player(Seat::Two).score, 0);
    }

    #[test]
    fn test_reset_game_keeps_characters() {
        let mut roster = Roster::new();
        roster.select_character(Seat::One, Mark::Rat);
        roster.add_score(Seat::One, 3);
        roster.set_current(Seat::Two);

        roster.reset_game();

        assert_eq!(roster.player(Seat::One).character, Some(Mark::Rat));
        assert_eq!(roster.player(Seat::One).score, 0);
        assert_eq!(roster.current_seat(), Seat::One);
    }

    #[test]
    fn test_reset_all_clears_characters() {
        let mut roster = Roster::new();
        roster.select_character(Seat::One, Mark::Rat);
        roster.reset_all();

        assert!(!roster.both_ready());
        assert_eq!(roster, Roster::new());
    }
}
