use super::console::Console;
use crate::{
    media::{DownloadFormat, MediaDownloader},
    search::{Candidate, VideoSearch},
    session::SessionState,
    utils::format_minutes,
};
use anyhow::Result;
use std::io::Write;
use tokio::io::AsyncBufRead;
use tracing::warn;

const INSTRUCTIONS: &str = "\
YouTube video downloader
Search YouTube by keyword or give a URL, then download the video or its audio.
Keyword searches only list videos up to the maximum length you enter.

Usage:
1. Choose `keyword` to search or `url` to download a known video.
2. Pick a video from the numbered results.
3. Choose `video` or `audio` as the download format.
4. From the results, `reget` fetches new results, `reset` starts over
   and `end` quits.";

const TOP_MENU_PROMPT: &str =
    "\nSearch by keyword? (keyword)\nDownload from a URL? (url)\nOr quit? (end): ";
const URL_PROMPT: &str = "URL of the video to download: ";
const QUERY_PROMPT: &str = "\nSearch keyword: ";
const BOUND_PROMPT: &str =
    "Maximum video length in minutes (e.g. 5).\nLeave blank for the default: ";
const SELECTION_PROMPT: &str =
    "\nNumber of the video to download (or reset / reget / end): ";
const FORMAT_PROMPT: &str = "Download format (video/audio): ";
const RETURN_PROMPT: &str = "\nReturn to start? (y/n): ";
const GOODBYE: &str = "Exiting.";

/// Where control goes after a flow finishes.
#[derive(Debug, PartialEq, Eq)]
enum Step {
    TopMenu,
    Exit,
}

/// How the result menu was left.
#[derive(Debug, PartialEq, Eq)]
enum MenuExit {
    /// Back out to the "return to start?" prompt
    Leave,
    /// Quit the program right away
    End,
}

pub struct InteractiveLoop<'a, R, W> {
    search: &'a VideoSearch,
    downloader: &'a MediaDownloader,
    console: Console<R, W>,
}

impl<'a, R, W> InteractiveLoop<'a, R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(
        search: &'a VideoSearch,
        downloader: &'a MediaDownloader,
        console: Console<R, W>,
    ) -> Self {
        Self {
            search,
            downloader,
            console,
        }
    }

    /// Runs until the user quits or input ends. Returns the session so the
    /// caller can report on it.
    pub async fn run(&mut self) -> Result<SessionState> {
        let mut session = SessionState::new();
        self.console.say(INSTRUCTIONS)?;

        loop {
            let Some(choice) = self.console.prompt(TOP_MENU_PROMPT).await? else {
                break;
            };

            let step = match choice.to_lowercase().as_str() {
                "keyword" => self.keyword_flow(&mut session).await?,
                "url" => self.url_flow().await?,
                "end" => Step::Exit,
                _ => {
                    self.console.say("Invalid choice.")?;
                    Step::TopMenu
                }
            };

            if step == Step::Exit {
                break;
            }
        }

        self.console.say(GOODBYE)?;
        Ok(session)
    }

    async fn url_flow(&mut self) -> Result<Step> {
        let Some(url) = self.console.prompt(URL_PROMPT).await? else {
            return Ok(Step::Exit);
        };
        if url.is_empty() {
            self.console.say("Please enter a URL.")?;
            return Ok(Step::TopMenu);
        }

        let Some(format) = self.console.prompt(FORMAT_PROMPT).await? else {
            return Ok(Step::Exit);
        };
        match format.parse::<DownloadFormat>() {
            Ok(format) => {
                self.console.say(format!("Downloading {url} as {format}..."))?;
                self.download(&url, format).await?;
            }
            Err(_) => self.console.say("Invalid format selection.")?,
        }

        Ok(Step::TopMenu)
    }

    async fn keyword_flow(&mut self, session: &mut SessionState) -> Result<Step> {
        let Some(query) = self.console.prompt(QUERY_PROMPT).await? else {
            return Ok(Step::Exit);
        };
        let Some(bound) = self.console.prompt(BOUND_PROMPT).await? else {
            return Ok(Step::Exit);
        };

        if query.is_empty() {
            self.console.say("Please enter a search keyword.")?;
            return Ok(Step::TopMenu);
        }

        let max_minutes = if bound.is_empty() {
            self.search.default_max_duration()
        } else {
            match bound.parse::<f64>() {
                Ok(minutes) if minutes.is_finite() && minutes >= 0.0 => Some(minutes),
                _ => {
                    self.console
                        .say("Invalid number of minutes. Please enter a number.")?;
                    return Ok(Step::TopMenu);
                }
            }
        };

        if self.result_menu(&query, max_minutes, session).await? == MenuExit::End {
            return Ok(Step::Exit);
        }

        match self.console.prompt(RETURN_PROMPT).await? {
            Some(answer) if answer.eq_ignore_ascii_case("y") => Ok(Step::TopMenu),
            _ => Ok(Step::Exit),
        }
    }

    async fn result_menu(
        &mut self,
        query: &str,
        max_minutes: Option<f64>,
        session: &mut SessionState,
    ) -> Result<MenuExit> {
        loop {
            let candidates = match self
                .search
                .find_candidates(query, max_minutes, session)
                .await
            {
                Ok(candidates) => candidates,
                Err(e) => {
                    warn!("Search for {:?} failed: {}", query, e);
                    self.console.say(format!("\nSearch failed: {e}"))?;
                    return Ok(MenuExit::Leave);
                }
            };

            if candidates.is_empty() {
                self.console
                    .say("\nNo videos matched. Change the keyword and search again.")?;
                return Ok(MenuExit::Leave);
            }

            self.render(&candidates)?;

            let Some(choice) = self.console.prompt(SELECTION_PROMPT).await? else {
                return Ok(MenuExit::End);
            };

            match choice.to_lowercase().as_str() {
                "reset" => return Ok(MenuExit::Leave),
                "reget" => continue,
                "end" => return Ok(MenuExit::End),
                _ => {}
            }

            let index = if !choice.is_empty() && choice.bytes().all(|b| b.is_ascii_digit()) {
                // All digits, so only overflow can fail here; treat it as out of range.
                Some(choice.parse::<usize>().unwrap_or(usize::MAX))
            } else {
                None
            };

            let candidate = match index {
                Some(n) if (1..=candidates.len()).contains(&n) => &candidates[n - 1],
                Some(_) => {
                    self.console
                        .say("Invalid selection. Please change the keyword.")?;
                    return Ok(MenuExit::Leave);
                }
                None => {
                    self.console
                        .say("Invalid number entered. Please change the keyword.")?;
                    return Ok(MenuExit::Leave);
                }
            };

            let Some(format) = self.console.prompt(FORMAT_PROMPT).await? else {
                return Ok(MenuExit::End);
            };
            let Ok(format) = format.parse::<DownloadFormat>() else {
                self.console.say("Invalid format selection.")?;
                continue;
            };

            self.console
                .say(format!("\nDownloading {} as {}...", candidate.title, format))?;
            if self.download(&candidate.url, format).await? {
                session.record(candidate.url.clone());
            }
        }
    }

    fn render(&mut self, candidates: &[Candidate]) -> Result<()> {
        self.console.say("\nSearch results:")?;
        for (i, candidate) in candidates.iter().enumerate() {
            self.console.say(format!(
                "{}. {} [{}] ({})",
                i + 1,
                candidate.title,
                format_minutes(candidate.duration_minutes),
                candidate.url
            ))?;
        }
        Ok(())
    }

    /// Returns whether the download succeeded. Failures are reported, not
    /// propagated.
    async fn download(&mut self, url: &str, format: DownloadFormat) -> Result<bool> {
        match self.downloader.download(url, format).await {
            Ok(()) => {
                self.console.say("Download finished.")?;
                Ok(true)
            }
            Err(e) => {
                self.console.say(format!("Download failed: {e}"))?;
                Ok(false)
            }
        }
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.console.into_output()
    }
}
