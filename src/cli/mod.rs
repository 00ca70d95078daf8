mod console;
mod interactive;

use crate::{media::MediaDownloader, search::VideoSearch, session::SessionState};
use anyhow::Result;
use console::Console;
use interactive::InteractiveLoop;
use tokio::io::BufReader;

/// Runs the interactive loop on the process's stdin and stdout.
pub async fn run(search: &VideoSearch, downloader: &MediaDownloader) -> Result<SessionState> {
    let console = Console::new(BufReader::new(tokio::io::stdin()), std::io::stdout());
    InteractiveLoop::new(search, downloader, console).run().await
}
