//! Command line parsing
//!
//! One command per line: a keyword, then its arguments separated by
//! whitespace. `add` and `enqueue` take the rest of the line as a single
//! MRL so that paths with spaces work.

use crate::error::{RcError, Result};
use cue_playlist::{SortCriterion, SortKey};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Append and play
    Add(String),
    /// Append
    Enqueue(String),
    Playlist,
    Goto(usize),
    Next,
    Prev,
    Play,
    Stop,
    /// Toggle between paused and playing
    Pause,
    Clear,
    /// `None` toggles
    Repeat(Option<bool>),
    Loop(Option<bool>),
    Random(Option<bool>),
    Sort(SortCriterion),
    Shuffle,
    Move {
        index: usize,
        count: usize,
        target: usize,
    },
    Delete {
        index: usize,
        count: usize,
    },
    Status,
    Help,
    Quit,
}

impl Command {
    /// Commands refused while the current item is paused
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Command::Add(_) | Command::Goto(_) | Command::Next | Command::Prev | Command::Play
        )
    }
}

/// Parse one input line; `None` for a blank line
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    line.parse().map(Some)
}

impl FromStr for Command {
    type Err = RcError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (line, ""),
        };
        let mut args = rest.split_whitespace();

        let command = match keyword {
            "add" => Command::Add(mrl("add", rest)?),
            "enqueue" => Command::Enqueue(mrl("enqueue", rest)?),
            "playlist" => Command::Playlist,
            "goto" | "gotoitem" => Command::Goto(index("goto", args.next())?),
            "next" => Command::Next,
            "prev" => Command::Prev,
            "play" => Command::Play,
            "stop" => Command::Stop,
            "pause" => Command::Pause,
            "clear" => Command::Clear,
            "repeat" => Command::Repeat(switch("repeat", args.next())?),
            "loop" => Command::Loop(switch("loop", args.next())?),
            "random" => Command::Random(switch("random", args.next())?),
            "sort" => Command::Sort(sort_criterion(args.next(), args.next())?),
            "shuffle" => Command::Shuffle,
            "move" => Command::Move {
                index: index("move", args.next())?,
                count: index("move", args.next())?,
                target: index("move", args.next())?,
            },
            "delete" => Command::Delete {
                index: index("delete", args.next())?,
                count: match args.next() {
                    Some(count) => index("delete", Some(count))?,
                    None => 1,
                },
            },
            "status" => Command::Status,
            "help" | "h" | "H" | "?" => Command::Help,
            "quit" | "logout" => Command::Quit,
            other => return Err(RcError::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }
}

fn mrl(command: &'static str, rest: &str) -> Result<String> {
    if rest.is_empty() {
        return Err(RcError::MissingArgument(command));
    }
    Ok(rest.to_string())
}

fn index(command: &'static str, arg: Option<&str>) -> Result<usize> {
    let arg = arg.ok_or(RcError::MissingArgument(command))?;
    arg.parse().map_err(|_| RcError::BadArgument {
        command,
        reason: format!("`{arg}' is not an index greater or equal to zero"),
    })
}

fn switch(command: &'static str, arg: Option<&str>) -> Result<Option<bool>> {
    match arg {
        None => Ok(None),
        Some("on") => Ok(Some(true)),
        Some("off") => Ok(Some(false)),
        Some(other) => Err(RcError::BadArgument {
            command,
            reason: format!("expected `on' or `off', got `{other}'"),
        }),
    }
}

fn sort_criterion(key: Option<&str>, order: Option<&str>) -> Result<SortCriterion> {
    let key = match key {
        Some(key) => key.parse::<SortKey>().map_err(|reason| RcError::BadArgument {
            command: "sort",
            reason,
        })?,
        None => SortKey::Artist,
    };
    match order {
        None | Some("asc") => Ok(SortCriterion::ascending(key)),
        Some("desc") => Ok(SortCriterion::descending(key)),
        Some(other) => Err(RcError::BadArgument {
            command: "sort",
            reason: format!("expected `asc' or `desc', got `{other}'"),
        }),
    }
}
