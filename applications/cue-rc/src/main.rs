/// Cue RC - Playback queue remote control
use clap::Parser;
use cue_playlist::{PlaybackOrder, PlaybackRepeat};
use cue_rc::{build_playlist, server, RcConfig};
use std::path::PathBuf;
use tokio::io::BufReader;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cue-rc")]
#[command(about = "Remote control shell for the cue playback queue", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./cue-rc.toml if present)
    #[arg(short, long, env = "CUE_RC_CONFIG")]
    config: Option<PathBuf>,

    /// Serve the shell over TCP on this address instead of stdin
    #[arg(short, long)]
    listen: Option<String>,

    /// Start in random order
    #[arg(long)]
    random: bool,

    /// Repeat all items
    #[arg(long = "loop")]
    loop_all: bool,

    /// Repeat the current item
    #[arg(long)]
    repeat: bool,

    /// MRLs to enqueue at startup
    mrls: Vec<String>,
}

impl Cli {
    /// Command line flags take precedence over file and environment
    fn apply(self, config: &mut RcConfig) {
        if let Some(listen) = self.listen {
            config.rc.listen = Some(listen);
        }
        if self.random {
            config.playlist.order = PlaybackOrder::Random;
        }
        if self.loop_all {
            config.playlist.repeat = PlaybackRepeat::All;
        }
        if self.repeat {
            config.playlist.repeat = PlaybackRepeat::Current;
        }
        config.startup.items.extend(self.mrls);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr, stdout carries the protocol
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cue_rc=info,cue_playlist=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = RcConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);

    let playlist = build_playlist(&config)?;

    match config.rc.listen.as_deref() {
        Some(addr) => {
            let listener = TcpListener::bind(addr).await?;
            server::serve(listener, playlist, config.rc.prompt).await?;
        }
        None => {
            tracing::info!("Reading commands from stdin");
            server::run_session(
                BufReader::new(tokio::io::stdin()),
                tokio::io::stdout(),
                playlist,
                config.rc.prompt,
            )
            .await?;
        }
    }

    Ok(())
}
