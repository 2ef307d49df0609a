//! Line-oriented text protocol for driving a game.
//!
//! Requests and responses are framed like GTP: an optional numeric id, a
//! command and its arguments on one line; the reply is `=id message` on
//! success or `?id message` on failure, followed by a blank line.
//!
//! ## Supported Commands
//!
//! - `name` / `version` - Engine name and version
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit
//! - `new [width height gem_types seed]` - Start a new random board
//! - `load <row>...` - Load a board from symbol rows, top row first
//! - `show` - Print the board
//! - `gem <col> <row>` - Describe one cell
//! - `select <col> <row>` - Select a gem
//! - `swap <col> <row> <col> <row>` - Swap two gems and report the cascade

use std::io::{self, BufRead, Write};

use crate::board::Board;
use crate::cascade::RoundDelta;
use crate::config::BoardConfig;
use crate::game::Game;
use crate::gem::Pos;
use crate::rng::SeededSource;
use crate::swap::SwapOutcome;

const KNOWN_COMMANDS: &[&str] = &[
    "gem",
    "known_command",
    "list_commands",
    "load",
    "name",
    "new",
    "quit",
    "select",
    "show",
    "swap",
    "version",
];

/// Protocol state: the config used by `new` and the current game.
pub struct Shell {
    config: BoardConfig,
    game: Game,
}

impl Shell {
    /// Start a shell with a fresh game built from `config`.
    pub fn new(config: BoardConfig) -> crate::error::Result<Self> {
        let game = Game::new(&config)?;
        Ok(Self { config, game })
    }

    /// The game currently being played.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Serve commands from stdin until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        for line in stdin.lock().lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            writeln!(stdout, "{prefix}{id_str} {message}\n")?;
            stdout.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Split an optional leading numeric id from the command.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end == 0 {
            return (None, trimmed);
        }
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute one command and return (success, response).
    pub fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(cmd) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "new" => {
                let mut config = self.config.clone();
                if !args.is_empty() {
                    let Some(nums) = parse_numbers(args, 4) else {
                        let usage = "usage: new <width> <height> <gem_types> <seed>";
                        return (false, usage.to_string());
                    };
                    config = BoardConfig::new(nums[0], nums[1], nums[2], nums[3] as u64);
                }
                match Game::new(&config) {
                    Ok(game) => {
                        self.game = game;
                        self.config = config;
                        (true, format!("\n{}", self.game.board()))
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "load" => {
                let loaded = Board::from_rows(args).and_then(|board| {
                    let height = board.height();
                    let source = SeededSource::new(self.config.seed, self.config.gem_types)?;
                    Game::from_board(board, source, height)
                });
                match loaded {
                    Ok(game) => {
                        self.game = game;
                        (true, format!("\n{}", self.game.board()))
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "show" => (true, format!("\n{}", self.game.board())),

            "gem" => {
                let Some(pos) = parse_pos(args) else {
                    return (false, "usage: gem <col> <row>".to_string());
                };
                match self.game.gem_at(pos) {
                    Some(d) => (true, format!("{} {} at {:?}", d.id, d.kind, d.pos)),
                    None => (true, "empty".to_string()),
                }
            }

            "select" => {
                let Some(pos) = parse_pos(args) else {
                    return (false, "usage: select <col> <row>".to_string());
                };
                match self.game.select(pos) {
                    Ok(true) => (true, String::new()),
                    Ok(false) => (false, "empty cell".to_string()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "swap" => {
                let Some(nums) = parse_numbers(args, 4) else {
                    return (false, "usage: swap <col> <row> <col> <row>".to_string());
                };
                let (a, b) = ((nums[0], nums[1]), (nums[2], nums[3]));
                match self.game.attempt_swap(a, b) {
                    Ok(SwapOutcome::Rejected) => (true, "rejected".to_string()),
                    Ok(SwapOutcome::Committed { rounds }) => (true, format_rounds(&rounds)),
                    Err(e) => (false, e.to_string()),
                }
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }
}

fn parse_numbers(args: &[&str], count: usize) -> Option<Vec<usize>> {
    if args.len() != count {
        return None;
    }
    args.iter().map(|a| a.parse().ok()).collect()
}

fn parse_pos(args: &[&str]) -> Option<Pos> {
    let nums = parse_numbers(args, 2)?;
    Some((nums[0], nums[1]))
}

/// One line per round: `round N: removed R moved M created C`.
pub fn format_rounds(rounds: &[RoundDelta]) -> String {
    rounds
        .iter()
        .enumerate()
        .map(|(i, r)| {
            format!(
                "round {}: removed {} moved {} created {}",
                i + 1,
                r.removed.len(),
                r.moved.len(),
                r.created.len()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell() -> Shell {
        Shell::new(BoardConfig::new(6, 6, 4, 17)).unwrap()
    }

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = Shell::parse_id("123 show");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "show");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = Shell::parse_id("show");
        assert_eq!(id, None);
        assert_eq!(cmd, "show");
    }

    #[test]
    fn test_name_command() {
        let mut sh = shell();
        let (success, response) = sh.execute("name", &[]);
        assert!(success);
        assert_eq!(response, "gemfall");
    }

    #[test]
    fn test_known_command() {
        let mut sh = shell();
        assert_eq!(sh.execute("known_command", &["swap"]), (true, "true".to_string()));
        assert_eq!(sh.execute("known_command", &["genmove"]), (true, "false".to_string()));
    }

    #[test]
    fn test_new_with_arguments() {
        let mut sh = shell();
        let (success, _) = sh.execute("new", &["5", "4", "3", "8"]);
        assert!(success);
        assert_eq!(sh.game().width(), 5);
        assert_eq!(sh.game().height(), 4);

        let (success, msg) = sh.execute("new", &["5", "4", "2", "8"]);
        assert!(!success);
        assert!(msg.contains("gem types"));
    }

    #[test]
    fn test_load_and_swap() {
        let mut sh = shell();
        let (success, _) = sh.execute("load", &["ABA", "CAB", "BCA"]);
        assert!(success);

        let (success, msg) = sh.execute("swap", &["0", "0", "0", "1"]);
        assert!(success);
        assert_eq!(msg, "rejected");

        let (success, msg) = sh.execute("swap", &["1", "1", "2", "1"]);
        assert!(success);
        assert!(msg.starts_with("round 1: removed 3 moved 0 created 3"));
    }

    #[test]
    fn test_load_rejects_match() {
        let mut sh = shell();
        let (success, msg) = sh.execute("load", &["AAA"]);
        assert!(!success);
        assert_eq!(msg, "layout contains a match");
    }

    #[test]
    fn test_swap_errors_are_reported() {
        let mut sh = shell();
        let (success, msg) = sh.execute("swap", &["0", "0", "2", "0"]);
        assert!(!success);
        assert!(msg.contains("not adjacent"));

        let (success, _) = sh.execute("swap", &["0", "0"]);
        assert!(!success);
    }

    #[test]
    fn test_gem_and_select() {
        let mut sh = shell();
        sh.execute("load", &["AB", "BA"]);
        assert_eq!(sh.execute("gem", &["0", "0"]), (true, "#0 pink at (0, 0)".to_string()));
        assert!(sh.execute("select", &["1", "0"]).0);
        assert_eq!(sh.game().selected(), Some((1, 0)));
    }

    #[test]
    fn test_load_rejects_types_out_of_play() {
        let mut sh = Shell::new(BoardConfig::new(6, 6, 3, 17)).unwrap();
        let (success, msg) = sh.execute("load", &["ABE", "BAC"]);
        assert!(!success);
        assert!(msg.contains("not among the 3 types"));
    }
}
