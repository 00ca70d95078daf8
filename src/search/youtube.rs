use super::{types::SearchHit, SearchBackend, SearchError};
use crate::config::SearchSettings;
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::{collections::HashMap, time::Duration};
use tracing::{debug, warn};
use url::Url;

/// YouTube Data API v3 search client.
pub struct YouTubeSearch {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl YouTubeSearch {
    pub fn new(settings: &SearchSettings) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api_key: settings.api_key.clone(),
            base_url: settings.api_base_url.clone(),
        })
    }

    async fn get_json(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value, SearchError> {
        let mut url = Url::parse_with_params(&format!("{}/{}", self.base_url, endpoint), params)?;
        url.query_pairs_mut()
            .append_pair("key", self.api_key.expose_secret());

        debug!("GET {}/{} {:?}", self.base_url, endpoint, params);

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            let message = body["error"]["message"]
                .as_str()
                .unwrap_or("no error message")
                .to_string();
            warn!("Search API request failed with status {}: {}", status, message);
            return Err(SearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    fn items(body: &Value) -> Result<&Vec<Value>, SearchError> {
        body["items"]
            .as_array()
            .ok_or_else(|| SearchError::InvalidResponse("missing `items` array".to_string()))
    }
}

#[async_trait]
impl SearchBackend for YouTubeSearch {
    fn name(&self) -> &'static str {
        "YouTube"
    }

    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<SearchHit>, SearchError> {
        let max_results = max_results.to_string();
        let body = self
            .get_json(
                "search",
                &[
                    ("part", "id,snippet"),
                    ("type", "video"),
                    ("q", query),
                    ("maxResults", max_results.as_str()),
                ],
            )
            .await?;

        let hits = Self::items(&body)?
            .iter()
            .filter_map(|item| {
                // Channels and playlists have no videoId.
                let id = item["id"]["videoId"].as_str()?;
                Some(SearchHit {
                    id: id.to_string(),
                    title: item["snippet"]["title"]
                        .as_str()
                        .unwrap_or("Unknown Title")
                        .to_string(),
                })
            })
            .collect::<Vec<_>>();

        debug!("Search for {:?} returned {} videos", query, hits.len());
        Ok(hits)
    }

    async fn fetch_durations(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, String>, SearchError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let joined = ids.join(",");
        let body = self
            .get_json("videos", &[("part", "contentDetails"), ("id", joined.as_str())])
            .await?;

        Ok(Self::items(&body)?
            .iter()
            .filter_map(|item| {
                let id = item["id"].as_str()?;
                let duration = item["contentDetails"]["duration"].as_str()?;
                Some((id.to_string(), duration.to_string()))
            })
            .collect())
    }
}
