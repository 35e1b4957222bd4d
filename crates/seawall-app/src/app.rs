//! Terminal session: command parsing, rendering, and the tick loop.

use anyhow::Result;
use seawall_core::{
    Command, GameController, Mark, Phase, Preferences, Seat, Snapshot,
};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, Duration};
use tracing::{debug, warn};

/// Real-time resolution mapped onto the engine's logical clock
const TICK_MS: u64 = 100;

const HELP: &str = "\
commands:
  select <1|2> <rat|octopus>   pick a character for a seat
  start                        start the match
  move <row> <col>             claim a cell (0-based)
  pause                        pause or resume
  expand                       grow the board after a draw
  restart                      restart the current game
  rematch                      restart the whole match
  back                         return to character selection
  theme                        toggle light/dark and save
  color <rat|octopus> <hex>    set a character accent and save
  help                         show this text
  quit                         leave";

pub struct App {
    controller: GameController,
    prefs: Preferences,
    prefs_path: PathBuf,
    last: Option<Snapshot>,
}

impl App {
    pub fn new(controller: GameController, prefs: Preferences, prefs_path: PathBuf) -> Self {
        Self {
            controller,
            prefs,
            prefs_path,
            last: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        println!("{HELP}\n");

        // The terminal has no title sequence; go straight to selection.
        self.controller.apply(Command::ProceedToSelection);
        self.render();

        let mut ticker = interval(Duration::from_millis(TICK_MS));
        let stdin = BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.controller.advance(TICK_MS);
                    self.render();
                }
                line = lines.next_line() => {
                    match line? {
                        Some(input) => {
                            if !self.handle(input.trim()) {
                                break;
                            }
                            self.render();
                        }
                        None => break,
                    }
                }
            }
        }
        Ok(())
    }

    /// Handle one input line. Returns `false` to leave the loop.
    fn handle(&mut self, input: &str) -> bool {
        if input.is_empty() {
            return true;
        }
        let parts: Vec<&str> = input.split_whitespace().collect();

        let command = match parts.as_slice() {
            ["help"] => {
                println!("{HELP}");
                return true;
            }
            ["quit"] | ["exit"] => return false,
            ["theme"] => {
                self.prefs.toggle_theme();
                self.save_prefs();
                println!("theme: {:?}", self.prefs.theme);
                return true;
            }
            ["color", character, value] => {
                match parse_mark(character) {
                    Some(mark) => {
                        self.prefs.set_accent(mark, value.to_string());
                        self.save_prefs();
                        println!("{} accent: {value}", mark.display_name());
                    }
                    None => println!("unknown character: {character}"),
                }
                return true;
            }
            ["select", seat, character] => match (parse_seat(seat), parse_mark(character)) {
                (Some(seat), Some(character)) => Command::SelectCharacter { seat, character },
                _ => {
                    println!("usage: select <1|2> <rat|octopus>");
                    return true;
                }
            },
            ["start"] => Command::StartGame,
            ["move", row, col] => match (row.parse(), col.parse()) {
                (Ok(row), Ok(col)) => Command::RequestMove { row, col },
                _ => {
                    println!("usage: move <row> <col>");
                    return true;
                }
            },
            ["pause"] => Command::TogglePause,
            ["expand"] => Command::ExpandAfterDraw,
            ["restart"] => Command::RestartGame,
            ["rematch"] => Command::RestartMatch,
            ["back"] => Command::BackToSelection,
            _ => {
                println!("unknown command (try: help)");
                return true;
            }
        };

        let accepted = self.controller.apply(command);
        debug!(?command, accepted, "command handled");
        if !accepted {
            println!("(rejected)");
        }
        true
    }

    fn save_prefs(&self) {
        if let Err(error) = self.prefs.save(&self.prefs_path) {
            warn!(%error, "could not save preferences");
        }
    }

    /// Print the parts of the snapshot that changed since the last one.
    fn render(&mut self) {
        let snapshot = self.controller.snapshot();
        if self.last.as_ref() == Some(&snapshot) {
            return;
        }
        let last = self.last.take();

        let board_changed = last
            .as_ref()
            .map(|last| last.board != snapshot.board || last.phase != snapshot.phase)
            .unwrap_or(true);
        let timer_changed = last
            .as_ref()
            .map(|last| last.timer.remaining_secs != snapshot.timer.remaining_secs)
            .unwrap_or(false);
        let dialogue_changed = last
            .as_ref()
            .map(|last| last.dialogue != snapshot.dialogue)
            .unwrap_or(true);

        if board_changed {
            println!("{}", render_board(&snapshot));
            println!("{}", render_status(&snapshot));
        } else if timer_changed {
            println!("{}", render_status(&snapshot));
        }
        if dialogue_changed {
            if let Some(dialogue) = &snapshot.dialogue {
                println!("[{}] {}", dialogue.speaker.display_name(), dialogue.text);
            }
        }
        self.last = Some(snapshot);
    }
}

fn parse_seat(input: &str) -> Option<Seat> {
    match input {
        "1" => Some(Seat::One),
        "2" => Some(Seat::Two),
        _ => None,
    }
}

fn parse_mark(input: &str) -> Option<Mark> {
    match input {
        "rat" => Some(Mark::Rat),
        "octopus" => Some(Mark::Octopus),
        _ => None,
    }
}

fn render_board(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    for row in 0..snapshot.board_size {
        let cells: Vec<String> = snapshot
            .board
            .row(row)
            .iter()
            .map(|cell| match cell {
                Some(mark) => mark.letter().to_string(),
                None => ".".to_string(),
            })
            .collect();
        out.push_str(&cells.join(" "));
        out.push('\n');
    }
    out.pop();
    out
}

fn render_status(snapshot: &Snapshot) -> String {
    let scores = format!(
        "{} {} x {} {}",
        snapshot.players[0]
            .character
            .map(|mark| mark.display_name())
            .unwrap_or("?"),
        snapshot.players[0].score,
        snapshot.players[1].score,
        snapshot.players[1]
            .character
            .map(|mark| mark.display_name())
            .unwrap_or("?"),
    );
    match snapshot.phase {
        Phase::Playing if snapshot.timer.is_running => format!(
            "{scores} | {:?} to {} in a row | {}s{}",
            snapshot.current_seat,
            snapshot.win_length,
            snapshot.timer.remaining_secs,
            if snapshot.timer.in_warning_zone {
                " !"
            } else {
                ""
            },
        ),
        phase => format!("{scores} | {phase:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seat_and_mark() {
        assert_eq!(parse_seat("1"), Some(Seat::One));
        assert_eq!(parse_seat("3"), None);
        assert_eq!(parse_mark("octopus"), Some(Mark::Octopus));
        assert_eq!(parse_mark("squid"), None);
    }

    #[test]
    fn test_render_board_shows_marks_and_gaps() {
        let mut controller =
            GameController::new(seawall_core::GameConfig::default()).unwrap();
        controller.apply(Command::ProceedToSelection);
        controller.apply(Command::SelectCharacter {
            seat: Seat::One,
            character: Mark::Rat,
        });
        controller.apply(Command::StartGame);
        controller.apply(Command::RequestMove { row: 0, col: 0 });

        let rendered = render_board(&controller.snapshot());
        assert!(rendered.starts_with("R . ."));
    }
}
