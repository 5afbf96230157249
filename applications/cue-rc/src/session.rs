//! Command execution for one remote control client
//!
//! Each session registers its own listener on the shared playlist and
//! renders the events it collected after every command, followed by the
//! player changes the command caused.

use crate::command::{parse_line, Command};
use crate::error::{RcError, Result};
use crossbeam_channel::Receiver;
use cue_playlist::{
    ChannelListener, ListenerId, Media, PlaybackOrder, PlaybackRepeat, PlayerState, Playlist,
    PlaylistError, PlaylistEvent, SharedPlaylist,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const STATUS_CHANGE: &str = "status change: ";

/// Events kept for a client between two of its commands
pub const EVENT_BACKLOG: usize = 256;

const HELP: &[&str] = &[
    "+----[ Remote control commands ]",
    "| ",
    "| add XYZ  . . . . . . . . . . . . add XYZ to playlist",
    "| enqueue XYZ  . . . . . . . . . queue XYZ to playlist",
    "| playlist . . . . .  show items currently in playlist",
    "| play . . . . . . . . . . . . . . . . . . play stream",
    "| stop . . . . . . . . . . . . . . . . . . stop stream",
    "| next . . . . . . . . . . . . . .  next playlist item",
    "| prev . . . . . . . . . . . .  previous playlist item",
    "| goto . . . . . . . . . . . . . .  goto item at index",
    "| repeat [on|off] . . . .  toggle playlist item repeat",
    "| loop [on|off] . . . . . . . . . toggle playlist loop",
    "| random [on|off] . . . . . . .  toggle random jumping",
    "| sort [key] [desc]  . . . . . . . . sort the playlist",
    "| shuffle  . . . . . . . . . . .  shuffle the playlist",
    "| move X N Y . . . .  move N items from index X to Y",
    "| delete X [N] . . . .  delete N items from index X on",
    "| clear . . . . . . . . . . . . . . clear the playlist",
    "| status . . . . . . . . . . . current playlist status",
    "| pause  . . . . . . . . . . . . . . . .  toggle pause",
    "| ",
    "| help . . . . . . . . . . . . . . . this help message",
    "| logout . . . . . . .  exit (if in socket connection)",
    "| quit . . . . . . . . . . . . . . . . . . . quit",
    "+----[ end of help ]",
];

/// Lines to send back, and whether the client asked to leave
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Reply {
    pub lines: Vec<String>,
    pub quit: bool,
}

pub struct Session {
    playlist: SharedPlaylist,
    events: Receiver<PlaylistEvent>,
    listener: ListenerId,
}

impl Session {
    pub fn new(playlist: SharedPlaylist) -> Self {
        Self::with_backlog(playlist, EVENT_BACKLOG)
    }

    /// Events beyond `backlog` are dropped while the client stays idle
    pub fn with_backlog(playlist: SharedPlaylist, backlog: usize) -> Self {
        let (listener, events) = ChannelListener::bounded(backlog);
        let listener = playlist.add_listener(Box::new(listener), false);
        Self {
            playlist,
            events,
            listener,
        }
    }

    /// Parse and run one input line
    pub fn handle_line(&mut self, line: &str) -> Reply {
        match parse_line(line) {
            Ok(Some(command)) => self.handle(&command),
            Ok(None) => Reply::default(),
            Err(err) => Reply {
                lines: vec![err.to_string()],
                quit: false,
            },
        }
    }

    pub fn handle(&mut self, command: &Command) -> Reply {
        debug!(?command, "Executing command");
        let mut lines = Vec::new();

        let (before, after) = {
            let mut playlist = self.playlist.lock();
            let before = PlayerSnapshot::of(&playlist);
            if let Err(err) = execute(&mut playlist, command, &mut lines) {
                lines.push(err.to_string());
            }
            (before, PlayerSnapshot::of(&playlist))
        };

        lines.extend(self.events.try_iter().filter_map(|event| render_event(&event)));
        lines.extend(before.changes(&after));

        Reply {
            lines,
            quit: *command == Command::Quit,
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.playlist.remove_listener(self.listener);
    }
}

/// Run `command` against the locked playlist, appending output to `out`
pub fn execute(playlist: &mut Playlist, command: &Command, out: &mut Vec<String>) -> Result<()> {
    if command.is_navigation()
        && playlist.current_index().is_some()
        && playlist.player_state() == PlayerState::Paused
    {
        out.push("Type 'pause' to continue.".to_string());
        return Ok(());
    }

    match command {
        Command::Add(mrl) | Command::Enqueue(mrl) => {
            let play = matches!(command, Command::Add(_));
            let verb = if play { "add" } else { "enqueue" };
            out.push(format!("Trying to {} {} to playlist.", verb, mrl));

            let index = playlist.count();
            playlist.append(&[Arc::new(Media::new(mrl.as_str()))])?;
            if play {
                playlist.goto(Some(index))?;
                playlist.start()?;
            }
        }
        Command::Playlist => {
            out.push("+----[ Playlist ]".to_string());
            let current = playlist.current_index();
            for (index, item) in playlist.items().iter().enumerate() {
                let marker = if current == Some(index) { '*' } else { '-' };
                let media = item.media();
                let line = match media.meta().duration {
                    Some(duration) => {
                        format!("|{}- {} ({})", marker, media.name(), format_duration(duration))
                    }
                    None => format!("|{}- {}", marker, media.name()),
                };
                out.push(line);
            }
            out.push("+----[ End of playlist ]".to_string());
        }
        Command::Goto(index) => {
            let count = playlist.count();
            if *index < count {
                playlist.goto(Some(*index))?;
                playlist.start()?;
            } else {
                let plural = if count == 1 { "" } else { "s" };
                out.push(format!("Playlist has only {} element{}", count, plural));
            }
        }
        Command::Next => ignore_not_found(playlist.next())?,
        Command::Prev => ignore_not_found(playlist.prev())?,
        Command::Play => ignore_not_found(playlist.start())?,
        Command::Stop => playlist.stop(),
        Command::Pause => match playlist.player_state() {
            PlayerState::Paused => playlist.resume(),
            PlayerState::Playing => playlist.pause(),
            PlayerState::Stopped => {}
        },
        Command::Clear => {
            playlist.stop();
            playlist.clear();
        }
        Command::Repeat(switch) => {
            let enabled = playlist.playback_repeat() == PlaybackRepeat::Current;
            let on = switch.unwrap_or(!enabled);
            if on != enabled {
                playlist.set_playback_repeat(if on {
                    PlaybackRepeat::Current
                } else {
                    PlaybackRepeat::None
                });
            }
            out.push(format!("Setting repeat to {}", on));
        }
        Command::Loop(switch) => {
            let enabled = playlist.playback_repeat() == PlaybackRepeat::All;
            let on = switch.unwrap_or(!enabled);
            if on != enabled {
                playlist.set_playback_repeat(if on {
                    PlaybackRepeat::All
                } else {
                    PlaybackRepeat::None
                });
            }
            out.push(format!("Setting loop to {}", on));
        }
        Command::Random(switch) => {
            let enabled = playlist.playback_order() == PlaybackOrder::Random;
            let on = switch.unwrap_or(!enabled);
            if on != enabled {
                playlist.set_playback_order(if on {
                    PlaybackOrder::Random
                } else {
                    PlaybackOrder::Normal
                });
            }
            out.push(format!("Setting random to {}", on));
        }
        Command::Sort(criterion) => playlist.sort(&[*criterion]),
        Command::Shuffle => playlist.shuffle(),
        Command::Move {
            index,
            count,
            target,
        } => playlist.move_items(*index, *count, *target)?,
        Command::Delete { index, count } => playlist.remove(*index, *count)?,
        Command::Status => {
            if let Some(media) = playlist.player().current_media() {
                out.push(format!("{}( new input: {} )", STATUS_CHANGE, media.uri()));
            }
            out.push(state_line(playlist.player_state()));
        }
        Command::Help => out.extend(HELP.iter().map(|line| (*line).to_string())),
        Command::Quit => out.push(format!("{}( quit )", STATUS_CHANGE)),
    }
    Ok(())
}

/// Nothing to navigate to is not worth an error line
fn ignore_not_found(result: cue_playlist::Result<()>) -> Result<()> {
    match result {
        Err(PlaylistError::NotFound) => Ok(()),
        other => other.map_err(RcError::from),
    }
}

fn state_line(state: PlayerState) -> String {
    let state = match state {
        PlayerState::Stopped => "stop state: 5",
        PlayerState::Playing => "play state: 3",
        PlayerState::Paused => "pause state: 4",
    };
    format!("{}( {} )", STATUS_CHANGE, state)
}

/// `H:MM:SS`, or `MM:SS` under one hour
fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let (hours, minutes, seconds) = (secs / 3600, (secs / 60) % 60, secs % 60);
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

pub fn render_event(event: &PlaylistEvent) -> Option<String> {
    let change = match event {
        PlaylistEvent::ItemsReset { items } => format!("playlist reset: {} items", items.len()),
        PlaylistEvent::ItemsAdded { index, items } => {
            format!("items added: {} at {}", items.len(), index)
        }
        PlaylistEvent::ItemsMoved {
            index,
            count,
            target,
        } => format!("items moved: {} from {} to {}", count, index, target),
        PlaylistEvent::ItemsRemoved { index, count } => {
            format!("items removed: {} at {}", count, index)
        }
        PlaylistEvent::ItemsUpdated { index, items } => {
            format!("items updated: {} at {}", items.len(), index)
        }
        PlaylistEvent::PlaybackRepeatChanged(repeat) => format!(
            "repeat: {}",
            match repeat {
                PlaybackRepeat::None => "none",
                PlaybackRepeat::Current => "current",
                PlaybackRepeat::All => "all",
            }
        ),
        PlaylistEvent::PlaybackOrderChanged(order) => format!(
            "order: {}",
            match order {
                PlaybackOrder::Normal => "normal",
                PlaybackOrder::Random => "random",
            }
        ),
        PlaylistEvent::CurrentIndexChanged(Some(index)) => format!("current index: {}", index),
        PlaylistEvent::CurrentIndexChanged(None) => "current index: none".to_string(),
        PlaylistEvent::Dropped { count } => format!("{} playlist events dropped", count),
        PlaylistEvent::HasPrevChanged(_) | PlaylistEvent::HasNextChanged(_) => return None,
    };
    Some(format!("{}( {} )", STATUS_CHANGE, change))
}

/// What the player was doing, to report changes after a command
struct PlayerSnapshot {
    media: Option<Arc<Media>>,
    state: PlayerState,
}

impl PlayerSnapshot {
    fn of(playlist: &Playlist) -> Self {
        Self {
            media: playlist.player().current_media(),
            state: playlist.player_state(),
        }
    }

    fn changes(&self, after: &PlayerSnapshot) -> Vec<String> {
        let mut lines = Vec::new();
        let same_media = match (&self.media, &after.media) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        if let (false, Some(media)) = (same_media, &after.media) {
            lines.push(format!("{}( new input: {} )", STATUS_CHANGE, media.uri()));
        }
        if self.state != after.state {
            lines.push(state_line(after.state));
        }
        lines
    }
}
