//! Line transports: any async reader/writer pair, and a TCP listener
//! serving one session per connection

use crate::error::Result;
use crate::session::Session;
use cue_playlist::SharedPlaylist;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tracing::{info, warn};

pub const GREETING: &str = "remote control interface initialized. Type `help' for help.";

/// Serve one client until it quits or closes its input
pub async fn run_session<R, W>(
    reader: R,
    mut writer: W,
    playlist: SharedPlaylist,
    prompt: bool,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut session = Session::new(playlist);
    let mut lines = reader.lines();

    writer.write_all(GREETING.as_bytes()).await?;
    writer.write_all(b"\n").await?;

    loop {
        if prompt {
            writer.write_all(b"> ").await?;
        }
        writer.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let reply = session.handle_line(&line);
        for line in &reply.lines {
            writer.write_all(line.as_bytes()).await?;
            writer.write_all(b"\n").await?;
        }
        if reply.quit {
            break;
        }
    }

    writer.flush().await?;
    Ok(())
}

/// Accept clients forever, each in its own task
pub async fn serve(listener: TcpListener, playlist: SharedPlaylist, prompt: bool) -> Result<()> {
    info!(addr = %listener.local_addr()?, "Remote control listening");

    loop {
        let (stream, peer) = listener.accept().await?;
        info!(%peer, "Client connected");

        let playlist = playlist.clone();
        tokio::spawn(async move {
            let (read, write) = stream.into_split();
            match run_session(BufReader::new(read), write, playlist, prompt).await {
                Ok(()) => info!(%peer, "Client disconnected"),
                Err(e) => warn!(%peer, error = %e, "Client session failed"),
            }
        });
    }
}
