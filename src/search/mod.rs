mod duration;
mod types;
mod youtube;

pub use duration::parse_duration_minutes;
pub use types::{Candidate, SearchError, SearchHit};
pub use youtube::YouTubeSearch;

use crate::{config::SearchSettings, session::SessionState};
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{debug, info};

pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Human-readable name of the backend
    fn name(&self) -> &'static str;

    /// Keyword search returning at most `max_results` hits
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<SearchHit>, SearchError>;

    /// Duration tokens keyed by video id, fetched in a single call
    async fn fetch_durations(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, String>, SearchError>;
}

/// Keeps candidates no longer than `max_minutes`, preserving order.
pub fn filter_by_duration(candidates: Vec<Candidate>, max_minutes: Option<f64>) -> Vec<Candidate> {
    match max_minutes {
        Some(bound) => candidates
            .into_iter()
            .filter(|c| c.duration_minutes <= bound)
            .collect(),
        None => candidates,
    }
}

pub struct VideoSearch {
    backend: Box<dyn SearchBackend>,
    max_results: u32,
    default_max_duration: Option<f64>,
}

impl VideoSearch {
    pub fn new(backend: Box<dyn SearchBackend>, settings: &SearchSettings) -> Self {
        Self {
            backend,
            max_results: settings.max_results,
            default_max_duration: settings.default_max_duration_minutes,
        }
    }

    pub fn default_max_duration(&self) -> Option<f64> {
        self.default_max_duration
    }

    pub async fn verify_credentials(&self) -> Result<(), SearchError> {
        self.backend.search("test", 1).await.map(|_| ())
    }

    /// Searches, drops URLs already in the session, resolves durations and
    /// applies the duration bound.
    pub async fn find_candidates(
        &self,
        query: &str,
        max_minutes: Option<f64>,
        session: &SessionState,
    ) -> Result<Vec<Candidate>, SearchError> {
        info!("Searching {} for {:?}", self.backend.name(), query);

        let hits: Vec<SearchHit> = self
            .backend
            .search(query, self.max_results)
            .await?
            .into_iter()
            .filter(|hit| !session.contains(&watch_url(&hit.id)))
            .collect();

        if hits.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = hits.iter().map(|hit| hit.id.clone()).collect();
        let durations = self.backend.fetch_durations(&ids).await?;

        let candidates = hits
            .into_iter()
            .filter_map(|hit| match durations.get(&hit.id) {
                Some(token) => Some(Candidate {
                    duration_minutes: parse_duration_minutes(token),
                    url: watch_url(&hit.id),
                    title: hit.title,
                }),
                None => {
                    debug!("No details returned for {}, skipping", hit.id);
                    None
                }
            })
            .collect();

        Ok(filter_by_duration(candidates, max_minutes))
    }
}
