//! Orchestration of a full match.
//!
//! The controller owns every piece of shared state: the session, the
//! two-seat roster, the turn timer, the dialogue queue, and the task
//! scheduler. Nothing else holds a writable reference. Commands come in,
//! a boolean comes back, and the presentation layer reads the snapshot.
//!
//! All time is logical. The host advances a millisecond clock through
//! `advance`; within one call, scheduled tasks, timer second boundaries,
//! and dialogue deadlines fire in chronological order, so behavior is
//! deterministic and fully testable without wall-clock time.

use crate::actions::Command;
use crate::board::{Board, Mark};
use crate::dialogue::{DialogueEntry, DialogueQueue, LineKind, LinePicker, RandomPicker};
use crate::player::{Player, Roster, Seat};
use crate::schedule::{Scheduler, TaskKind};
use crate::session::{Phase, Session, MAX_BOARD_SIZE};
use crate::timer::{TimerView, TurnTimer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Individual-game wins needed to take the match
pub const MATCH_VICTORY_SCORE: u32 = 5;

/// How long move and invalid-move lines stay up
const DIALOGUE_CLOSE_MS: u64 = 1500;

/// How long draw, timeout, and end-of-game lines stay up
const OUTCOME_DIALOGUE_MS: u64 = 2000;

/// How long each greeting line stays up
const GREETING_MS: u64 = 3000;

/// Width of the switching window between turns
const SWITCH_MS: u64 = 300;

/// Delay before an automatic next game
const RESTART_MS: u64 = 5000;

/// Delay before the start sequence after an explicit restart
const RESTART_QUICK_MS: u64 = 500;

/// Delay between scoring a win and checking the match threshold
const MATCH_CHECK_MS: u64 = 200;

/// Delay before the first turn clock starts, covering the greetings
const TIMER_KICKOFF_MS: u64 = 6000;

/// Tunables for a controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seconds each player gets per turn
    pub turn_duration_secs: u32,
    /// Whether running out the clock surfaces a timeout line
    pub show_timeout_dialogue: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            turn_duration_secs: 5,
            show_timeout_dialogue: true,
        }
    }
}

/// Errors that can occur when constructing a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("turn duration must be at least 1 second")]
    ZeroTurnDuration,
}

/// Read-only view of the whole game for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub board: Board,
    pub board_size: usize,
    pub win_length: usize,
    pub winner: Option<Mark>,
    pub is_active: bool,
    pub is_switching: bool,
    pub current_seat: Seat,
    pub players: [Player; 2],
    pub timer: TimerView,
    pub dialogue: Option<DialogueEntry>,
    pub queued_dialogues: usize,
}

/// The orchestration layer.
pub struct GameController {
    config: GameConfig,
    session: Session,
    roster: Roster,
    timer: TurnTimer,
    dialogue: DialogueQueue,
    scheduler: Scheduler,
    picker: Box<dyn LinePicker>,
    now_ms: u64,
    switching: bool,
}

impl GameController {
    /// A controller with random flavor lines
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_picker(config, Box::new(RandomPicker))
    }

    /// A controller with an injected line picker (deterministic tests)
    pub fn with_picker(
        config: GameConfig,
        picker: Box<dyn LinePicker>,
    ) -> Result<Self, ConfigError> {
        if config.turn_duration_secs == 0 {
            return Err(ConfigError::ZeroTurnDuration);
        }
        let timer = TurnTimer::new(config.turn_duration_secs);
        Ok(Self {
            config,
            session: Session::new(),
            roster: Roster::new(),
            timer,
            dialogue: DialogueQueue::new(),
            scheduler: Scheduler::new(),
            picker,
            now_ms: 0,
            switching: false,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn timer(&self) -> &TurnTimer {
        &self.timer
    }

    pub fn dialogue(&self) -> &DialogueQueue {
        &self.dialogue
    }

    pub fn is_switching(&self) -> bool {
        self.switching
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Apply one command. `true` means accepted.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::ProceedToSelection => self.proceed_to_selection(),
            Command::SelectCharacter { seat, character } => self.select_character(seat, character),
            Command::StartGame => self.start_game(),
            Command::RequestMove { row, col } => self.request_move(row, col),
            Command::TogglePause => self.toggle_pause(),
            Command::ExpandAfterDraw => self.expand_after_draw(),
            Command::RestartGame => self.restart_game(),
            Command::RestartMatch => self.restart_match(),
            Command::BackToSelection => self.back_to_selection(),
        }
    }

    /// Advance the logical clock by `ms`.
    ///
    /// Pending tasks, timer ticks, and dialogue deadlines fire in
    /// chronological order within the slice.
    pub fn advance(&mut self, mut ms: u64) {
        while ms > 0 {
            let mut step = ms;
            if let Some(due) = self.scheduler.next_due() {
                step = step.min(due.saturating_sub(self.now_ms));
            }
            if let Some(until_tick) = self.timer.ms_until_tick() {
                step = step.min(until_tick);
            }

            if step == 0 {
                // A task is already due; fire it before time moves.
                for task in self.scheduler.take_due(self.now_ms) {
                    self.run_task(task);
                }
                continue;
            }

            self.now_ms += step;
            self.dialogue.advance(step);
            let timed_out = self.timer.advance(step);
            if timed_out {
                self.handle_timeout();
            }
            for task in self.scheduler.take_due(self.now_ms) {
                self.run_task(task);
            }
            ms -= step;
        }
    }

    /// The current state, packaged for rendering.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.session.phase(),
            board: self.session.board().clone(),
            board_size: self.session.board_size(),
            win_length: self.session.win_length(),
            winner: self.session.winner(),
            is_active: self.session.is_active(),
            is_switching: self.switching,
            current_seat: self.roster.current_seat(),
            players: [
                self.roster.player(Seat::One).clone(),
                self.roster.player(Seat::Two).clone(),
            ],
            timer: self.timer.view(),
            dialogue: self.dialogue.current().cloned(),
            queued_dialogues: self.dialogue.queued(),
        }
    }

    // ==================== Command handlers ====================

    fn proceed_to_selection(&mut self) -> bool {
        if self.session.phase() != Phase::Intro {
            return false;
        }
        self.session.set_phase(Phase::CharacterSelection);
        true
    }

    fn select_character(&mut self, seat: Seat, character: Mark) -> bool {
        if self.session.phase() != Phase::CharacterSelection {
            return false;
        }
        self.roster.select_character(seat, character);
        true
    }

    fn start_game(&mut self) -> bool {
        if !self.roster.both_ready() {
            return false;
        }

        self.session.start_new_game();
        self.roster.set_current(Seat::One);
        self.switching = false;
        self.timer.reset();

        for seat in Seat::ALL {
            if let Some(character) = self.roster.player(seat).character {
                self.push_scripted(character, LineKind::Greeting, Some(GREETING_MS));
            }
        }
        self.scheduler
            .schedule(TaskKind::TimerStart, self.now_ms + TIMER_KICKOFF_MS);
        true
    }

    fn request_move(&mut self, row: usize, col: usize) -> bool {
        if self.switching {
            return false;
        }

        let Some(mark) = self.roster.current_player().character else {
            return false;
        };

        if !self.session.is_valid_move(row, col) {
            // Non-fatal: surface a complaint and change nothing.
            if self.session.is_active() {
                self.push_scripted(mark, LineKind::InvalidMove, Some(DIALOGUE_CLOSE_MS));
            }
            return false;
        }

        if !self.session.make_move(row, col, mark, self.now_ms) {
            return false;
        }

        self.push_scripted(mark, LineKind::Move, Some(DIALOGUE_CLOSE_MS));

        match self.session.phase() {
            Phase::Victory => {
                self.timer.stop();
                self.roster.add_score(self.roster.current_seat(), 1);
                self.scheduler
                    .schedule(TaskKind::MatchCheck, self.now_ms + MATCH_CHECK_MS);
            }
            Phase::Draw => {
                self.timer.stop();
                self.handle_draw();
            }
            _ => {
                self.timer.stop();
                self.begin_switch();
            }
        }
        true
    }

    fn toggle_pause(&mut self) -> bool {
        if !self.session.toggle_pause() {
            return false;
        }
        if self.session.phase() == Phase::Paused {
            self.timer.pause();
        } else {
            self.timer.resume();
        }
        true
    }

    fn expand_after_draw(&mut self) -> bool {
        if !self.session.expand_board() {
            return false;
        }
        self.dialogue.force_close();
        self.switching = false;
        self.timer.restart();
        true
    }

    fn restart_game(&mut self) -> bool {
        if !self.in_match() {
            return false;
        }
        self.clear_transients();
        self.roster.set_current(Seat::One);
        self.scheduler
            .schedule(TaskKind::Kickoff, self.now_ms + RESTART_QUICK_MS);
        true
    }

    fn restart_match(&mut self) -> bool {
        if !self.in_match() {
            return false;
        }
        self.clear_transients();
        self.roster.reset_scores();
        self.roster.set_current(Seat::One);
        self.session.reset_to_intro();
        self.scheduler
            .schedule(TaskKind::Kickoff, self.now_ms + RESTART_QUICK_MS);
        true
    }

    fn back_to_selection(&mut self) -> bool {
        self.clear_transients();
        self.roster.reset_all();
        self.session.reset_to_intro();
        self.session.set_phase(Phase::CharacterSelection);
        true
    }

    // ==================== Deferred work ====================

    fn run_task(&mut self, task: TaskKind) {
        match task {
            TaskKind::SwitchPlayers => self.finish_switch(),
            TaskKind::MatchCheck => self.check_match_victory(),
            TaskKind::AutoRestart => self.auto_restart(),
            TaskKind::Kickoff => {
                let _ = self.start_game();
            }
            TaskKind::TimerStart => self.timer.start(),
        }
    }

    fn begin_switch(&mut self) {
        self.switching = true;
        self.scheduler
            .schedule(TaskKind::SwitchPlayers, self.now_ms + SWITCH_MS);
    }

    fn finish_switch(&mut self) {
        self.roster.switch_to_next();
        self.switching = false;
        if self.session.is_active() {
            self.timer.start();
        }
    }

    /// Timer reached zero: treat it as a forfeited turn.
    fn handle_timeout(&mut self) {
        self.timer.stop();
        if !self.session.is_active() || self.switching {
            return;
        }

        if self.config.show_timeout_dialogue {
            if let Some(mark) = self.roster.current_player().character {
                self.push_scripted(mark, LineKind::Timeout, Some(OUTCOME_DIALOGUE_MS));
            }
        }
        self.begin_switch();
    }

    fn handle_draw(&mut self) {
        if self.session.board_size() >= MAX_BOARD_SIZE {
            // The progression does not grow past the cap; cycle back to
            // a fresh 3x3 after the dialogue plays out.
            self.push_draw_lines(Some(OUTCOME_DIALOGUE_MS));
            self.scheduler
                .schedule(TaskKind::AutoRestart, self.now_ms + RESTART_MS);
        } else {
            // Stay in the draw phase until an explicit expand command.
            self.push_draw_lines(None);
        }
    }

    fn check_match_victory(&mut self) {
        // A reset may have superseded the win this check belongs to.
        let Some(winner_mark) = self.session.winner() else {
            return;
        };
        let Some(winner_seat) = self.roster.seat_with(winner_mark) else {
            return;
        };

        if self.roster.player(winner_seat).score >= MATCH_VICTORY_SCORE {
            self.finish_match(winner_seat);
            return;
        }

        self.push_scripted(winner_mark, LineKind::Victory, Some(OUTCOME_DIALOGUE_MS));
        self.push_scripted(
            winner_mark.opponent(),
            LineKind::Defeat,
            Some(OUTCOME_DIALOGUE_MS),
        );
        self.scheduler
            .schedule(TaskKind::AutoRestart, self.now_ms + RESTART_MS);
    }

    fn finish_match(&mut self, winner_seat: Seat) {
        self.session.set_phase(Phase::MatchVictory);
        self.timer.reset();

        let winner = self.roster.player(winner_seat).clone();
        let loser = self.roster.player(winner_seat.other()).clone();
        let (Some(winner_mark), Some(loser_mark)) = (winner.character, loser.character) else {
            return;
        };

        self.dialogue.push(DialogueEntry::spoken(
            winner_mark,
            LineKind::Victory,
            format!(
                "Total victory! {} takes the match with {} wins!",
                winner_mark.display_name(),
                winner.score
            ),
            None,
        ));
        self.dialogue.push(DialogueEntry::spoken(
            loser_mark,
            LineKind::Defeat,
            format!(
                "What a battle! {} fought bravely, but the match belongs to the rival!",
                loser_mark.display_name()
            ),
            None,
        ));
    }

    fn auto_restart(&mut self) {
        match self.session.phase() {
            Phase::Victory => self.session.reset_board(),
            Phase::Draw => self.session.start_new_game(),
            _ => return,
        }
        self.switching = false;
        self.timer.restart();
    }

    // ==================== Helpers ====================

    fn in_match(&self) -> bool {
        !matches!(
            self.session.phase(),
            Phase::Intro | Phase::CharacterSelection
        )
    }

    /// Cancel pending work and transient UI state ahead of a reset
    fn clear_transients(&mut self) {
        self.scheduler.cancel_all();
        self.dialogue.force_close();
        self.timer.reset();
        self.switching = false;
    }

    fn push_scripted(&mut self, speaker: Mark, kind: LineKind, auto_close_ms: Option<u64>) {
        let entry = DialogueEntry::scripted(speaker, kind, self.picker.as_mut(), auto_close_ms);
        self.dialogue.push(entry);
    }

    fn push_draw_lines(&mut self, auto_close_ms: Option<u64>) {
        for seat in Seat::ALL {
            if let Some(mark) = self.roster.player(seat).character {
                self.push_scripted(mark, LineKind::Draw, auto_close_ms);
            }
        }
    }
}
