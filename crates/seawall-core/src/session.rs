//! Session lifecycle and move bookkeeping.
//!
//! The session owns one game's board, history, and lifecycle phase. It
//! decides win and draw exactly once, inside `make_move`; the
//! orchestration layer branches on the phase the session transitioned
//! to, so there is a single source of truth for every outcome.

use crate::board::{Board, Mark};
use serde::{Deserialize, Serialize};

/// Board sizes a match steps through on draws
pub const BOARD_SIZES: [usize; 4] = [3, 5, 7, 9];

/// Largest board in the progression
pub const MAX_BOARD_SIZE: usize = 9;

/// Run length required on a fresh 3x3 game
pub const DEFAULT_WIN_LENGTH: usize = 3;

/// Lifecycle phase of a session. Phases are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Title sequence, nothing selectable yet
    Intro,
    /// Waiting for both seats to pick a character
    CharacterSelection,
    /// A game is in progress
    Playing,
    /// Play suspended; the timer is frozen in lockstep by the controller
    Paused,
    /// The last move won an individual game
    Victory,
    /// The board filled with no winner
    Draw,
    /// A seat reached the match threshold
    MatchVictory,
}

/// One applied move. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub row: usize,
    pub col: usize,
    pub mark: Mark,
    /// 1-based position in the game's move sequence
    pub sequence: u32,
    /// Logical-clock time the move was applied
    pub timestamp_ms: u64,
}

/// One game's state, owned by the orchestration layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    phase: Phase,
    board: Board,
    win_length: usize,
    move_history: Vec<MoveRecord>,
    winner: Option<Mark>,
    is_active: bool,
    can_expand: bool,
    total_moves: u32,
}

fn fresh_board(size: usize) -> Board {
    Board::empty(size).expect("board sizes in the fixed progression are positive")
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A session at the intro, with an untouched 3x3 board
    pub fn new() -> Self {
        Self {
            phase: Phase::Intro,
            board: fresh_board(BOARD_SIZES[0]),
            win_length: DEFAULT_WIN_LENGTH,
            move_history: Vec::new(),
            winner: None,
            is_active: false,
            can_expand: true,
            total_moves: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_size(&self) -> usize {
        self.board.size()
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    pub fn winner(&self) -> Option<Mark> {
        self.winner
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn can_expand(&self) -> bool {
        self.can_expand
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.move_history
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.move_history.last()
    }

    pub fn can_undo(&self) -> bool {
        !self.move_history.is_empty()
    }

    /// Force a lifecycle phase.
    ///
    /// The controller uses this for transitions the session cannot see
    /// on its own (entering character selection, match victory).
    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Begin a fresh game: 3x3 board, run length 3, cleared history.
    ///
    /// Used both to leave character selection and as the cycle reset
    /// after a draw on the largest board.
    pub fn start_new_game(&mut self) {
        self.phase = Phase::Playing;
        self.board = fresh_board(BOARD_SIZES[0]);
        self.win_length = DEFAULT_WIN_LENGTH;
        self.move_history.clear();
        self.winner = None;
        self.is_active = true;
        self.can_expand = true;
        self.total_moves = 0;
    }

    /// Begin the next game at the current size and run length.
    ///
    /// Size and run length only change through the draw/expand path, so
    /// a win keeps the progression where it stands.
    pub fn reset_board(&mut self) {
        self.phase = Phase::Playing;
        self.board = fresh_board(self.board.size());
        self.move_history.clear();
        self.winner = None;
        self.is_active = true;
        self.total_moves = 0;
    }

    /// Back to the pristine intro state
    pub fn reset_to_intro(&mut self) {
        *self = Self::new();
    }

    /// Whether (row, col) can be played right now
    pub fn is_valid_move(&self, row: usize, col: usize) -> bool {
        self.is_active && self.board.is_open(row, col)
    }

    /// Apply a move for `mark`.
    ///
    /// Returns `false` without touching anything when the session is
    /// inactive or the cell is unplayable. On success the board snapshot
    /// is replaced, the move is recorded, and the outcome (win, draw, or
    /// neither) is decided here and nowhere else.
    pub fn make_move(&mut self, row: usize, col: usize, mark: Mark, now_ms: u64) -> bool {
        if !self.is_valid_move(row, col) {
            return false;
        }

        let board = self.board.with_move(row, col, mark);
        self.total_moves += 1;
        self.move_history.push(MoveRecord {
            row,
            col,
            mark,
            sequence: self.total_moves,
            timestamp_ms: now_ms,
        });

        let won = board.has_win(mark, self.win_length);
        let full = board.is_full();
        self.board = board;

        if won {
            self.phase = Phase::Victory;
            self.winner = Some(mark);
            self.is_active = false;
        } else if full {
            self.phase = Phase::Draw;
            self.winner = None;
            self.is_active = false;
        }

        true
    }

    /// Grow the board after a draw, or cycle back to 3x3 at the cap.
    ///
    /// Rejected (returns `false`) outside the draw phase. Below the cap
    /// the board grows one step, the run length grows by one, and the
    /// recorded history is re-offset so undo keeps working against the
    /// recentered board. At the cap the progression restarts from a
    /// fresh 3x3 rather than growing without bound.
    pub fn expand_board(&mut self) -> bool {
        if self.phase != Phase::Draw {
            return false;
        }

        let size = self.board.size();
        let Some(position) = BOARD_SIZES.iter().position(|&s| s == size) else {
            return false;
        };

        if position + 1 >= BOARD_SIZES.len() {
            self.start_new_game();
            return true;
        }

        if !self.can_expand {
            return false;
        }

        let next_size = BOARD_SIZES[position + 1];
        let offset = (next_size - size) / 2;
        self.board = self
            .board
            .expanded(next_size)
            .expect("progression sizes grow strictly");
        for record in &mut self.move_history {
            record.row += offset;
            record.col += offset;
        }
        self.win_length += 1;
        self.phase = Phase::Playing;
        self.winner = None;
        self.is_active = true;
        self.can_expand = next_size < MAX_BOARD_SIZE;
        true
    }

    /// Suspend or resume play. Rejected outside Playing/Paused.
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Playing => {
                self.phase = Phase::Paused;
                self.is_active = false;
                true
            }
            Phase::Paused => {
                self.phase = Phase::Playing;
                self.is_active = true;
                true
            }
            _ => false,
        }
    }

    /// Remove the last move and rebuild the board from what remains.
    ///
    /// Clears any recorded winner and reactivates play. Returns `false`
    /// when there is nothing to undo.
    pub fn undo_last_move(&mut self) -> bool {
        if self.move_history.pop().is_none() {
            return false;
        }

        let mut board = fresh_board(self.board.size());
        for record in &self.move_history {
            board = board.with_move(record.row, record.col, record.mark);
        }
        self.board = board;
        self.total_moves = self.total_moves.saturating_sub(1);
        self.winner = None;
        self.phase = Phase::Playing;
        self.is_active = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn playing_session() -> Session {
        let mut session = Session::new();
        session.start_new_game();
        session
    }

    /// Fill a 3x3 board in an order that ends with a full board and no
    /// winner: R O R / O R O / O R O.
    fn play_to_draw(session: &mut Session) {
        let moves = [
            (0, 0, Mark::Rat),
            (0, 1, Mark::Octopus),
            (0, 2, Mark::Rat),
            (1, 0, Mark::Octopus),
            (1, 1, Mark::Rat),
            (2, 0, Mark::Octopus),
            (2, 1, Mark::Rat),
            (1, 2, Mark::Octopus),
            (2, 2, Mark::Octopus),
        ];
        for (row, col, mark) in moves {
            assert!(session.make_move(row, col, mark, 0));
        }
    }

    #[test]
    fn test_new_session_starts_at_intro() {
        let session = Session::new();
        assert_eq!(session.phase(), Phase::Intro);
        assert_eq!(session.board_size(), 3);
        assert_eq!(session.win_length(), 3);
        assert!(!session.is_active());
    }

    #[test]
    fn test_moves_rejected_before_start() {
        let mut session = Session::new();
        assert!(!session.make_move(0, 0, Mark::Rat, 0));
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_move_is_recorded() {
        let mut session = playing_session();
        assert!(session.make_move(1, 1, Mark::Rat, 42));

        let record = session.last_move().unwrap();
        assert_eq!(
            record,
            &MoveRecord {
                row: 1,
                col: 1,
                mark: Mark::Rat,
                sequence: 1,
                timestamp_ms: 42,
            }
        );
        assert_eq!(session.phase(), Phase::Playing);
    }

    #[test]
    fn test_occupied_cell_rejected() {
        let mut session = playing_session();
        session.make_move(0, 0, Mark::Rat, 0);
        assert!(!session.make_move(0, 0, Mark::Octopus, 0));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_three_in_a_row_wins() {
        let mut session = playing_session();
        session.make_move(0, 0, Mark::Rat, 0);
        session.make_move(1, 0, Mark::Octopus, 0);
        session.make_move(0, 1, Mark::Rat, 0);
        session.make_move(1, 1, Mark::Octopus, 0);
        session.make_move(0, 2, Mark::Rat, 0);

        assert_eq!(session.phase(), Phase::Victory);
        assert_eq!(session.winner(), Some(Mark::Rat));
        assert!(!session.is_active());
        assert!(!session.make_move(2, 2, Mark::Octopus, 0));
    }

    #[test]
    fn test_full_board_without_winner_is_a_draw() {
        let mut session = playing_session();
        play_to_draw(&mut session);

        assert_eq!(session.phase(), Phase::Draw);
        assert_eq!(session.winner(), None);
        assert!(!session.is_active());
    }

    #[test]
    fn test_expand_after_draw_grows_board_and_run_length() {
        let mut session = playing_session();
        play_to_draw(&mut session);

        assert!(session.expand_board());
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.board_size(), 5);
        assert_eq!(session.win_length(), 4);
        assert!(session.is_active());

        // Old contents sit recentered at offset 1.
        assert_eq!(session.board().get(1, 1), Some(Mark::Rat));
        assert_eq!(session.board().get(3, 3), Some(Mark::Octopus));
    }

    #[test]
    fn test_expand_rejected_outside_draw() {
        let mut session = playing_session();
        assert!(!session.expand_board());
        assert_eq!(session.board_size(), 3);
    }

    #[test]
    fn test_run_length_tracks_each_expansion() {
        let mut session = playing_session();
        for (expected_size, expected_length) in [(5, 4), (7, 5), (9, 6)] {
            session.set_phase(Phase::Draw);
            assert!(session.expand_board());
            assert_eq!(session.board_size(), expected_size);
            assert_eq!(session.win_length(), expected_length);
        }
        assert!(!session.can_expand());
    }

    #[test]
    fn test_draw_at_max_size_cycles_to_fresh_3x3() {
        let mut session = playing_session();
        for _ in 0..3 {
            session.set_phase(Phase::Draw);
            session.expand_board();
        }
        assert_eq!(session.board_size(), 9);

        session.set_phase(Phase::Draw);
        assert!(session.expand_board());
        assert_eq!(session.board_size(), 3);
        assert_eq!(session.win_length(), DEFAULT_WIN_LENGTH);
        assert_eq!(session.phase(), Phase::Playing);
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_reset_board_keeps_size_and_run_length() {
        let mut session = playing_session();
        play_to_draw(&mut session);
        session.expand_board();
        session.make_move(0, 0, Mark::Rat, 0);

        session.reset_board();
        assert_eq!(session.board_size(), 5);
        assert_eq!(session.win_length(), 4);
        assert!(session.history().is_empty());
        assert_eq!(session.phase(), Phase::Playing);
    }

    #[test]
    fn test_toggle_pause_flips_activity() {
        let mut session = playing_session();
        assert!(session.toggle_pause());
        assert_eq!(session.phase(), Phase::Paused);
        assert!(!session.is_active());
        assert!(!session.make_move(0, 0, Mark::Rat, 0));

        assert!(session.toggle_pause());
        assert_eq!(session.phase(), Phase::Playing);
        assert!(session.is_active());
    }

    #[test]
    fn test_toggle_pause_rejected_at_intro() {
        let mut session = Session::new();
        assert!(!session.toggle_pause());
    }

    #[test]
    fn test_undo_removes_the_last_move() {
        let mut session = playing_session();
        session.make_move(0, 0, Mark::Rat, 0);
        session.make_move(1, 1, Mark::Octopus, 0);

        assert!(session.undo_last_move());
        assert_eq!(session.board().get(1, 1), None);
        assert_eq!(session.board().get(0, 0), Some(Mark::Rat));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_undo_on_empty_history_fails() {
        let mut session = playing_session();
        assert!(!session.undo_last_move());
    }

    #[test]
    fn test_undo_reactivates_a_won_game() {
        let mut session = playing_session();
        session.make_move(0, 0, Mark::Rat, 0);
        session.make_move(1, 0, Mark::Octopus, 0);
        session.make_move(0, 1, Mark::Rat, 0);
        session.make_move(1, 1, Mark::Octopus, 0);
        session.make_move(0, 2, Mark::Rat, 0);
        assert_eq!(session.phase(), Phase::Victory);

        assert!(session.undo_last_move());
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.winner(), None);
        assert!(session.is_active());
    }

    #[test]
    fn test_undo_after_expansion_uses_recentered_coordinates() {
        let mut session = playing_session();
        play_to_draw(&mut session);
        session.expand_board();

        // The last pre-expansion move was Octopus at (2, 2), now (3, 3).
        assert_eq!(session.board().get(3, 3), Some(Mark::Octopus));
        assert!(session.undo_last_move());
        assert_eq!(session.board().get(3, 3), None);
        // The rest of the recentered content survives.
        assert_eq!(session.board().get(1, 1), Some(Mark::Rat));
    }
}
