use async_trait::async_trait;
use reqwest::Client;

use crate::{
    Res, config,
    types::{YoutubeSearchItem, YoutubeSearchResponse},
    youtube::{SearchFilter, SearchResult, SongSearch},
};

/// YouTube Data API v3 search client authenticated by API key.
pub struct YoutubeClient {
    http: Client,
    api_url: String,
    api_key: String,
}

impl YoutubeClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: Client::new(),
            api_url: config::youtube_apiurl(),
            api_key,
        }
    }
}

#[async_trait]
impl SongSearch for YoutubeClient {
    async fn search(
        &self,
        query: &str,
        filter: SearchFilter,
        limit: u32,
    ) -> Res<Vec<SearchResult>> {
        let limit = limit.to_string();
        let response = self
            .http
            .get(format!("{uri}/search", uri = self.api_url))
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("maxResults", limit.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .query(filter.query_params())
            .send()
            .await?
            .error_for_status()?;

        let json = response.json::<YoutubeSearchResponse>().await?;
        Ok(json.items.into_iter().map(search_result).collect())
    }
}

fn search_result(item: YoutubeSearchItem) -> SearchResult {
    SearchResult {
        title: item.snippet.and_then(|s| s.title),
        video_id: item.id.and_then(|id| id.video_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_hit_has_no_video_id() {
        let json = r#"{"items":[{"id":{"kind":"youtube#channel","channelId":"UC1"},"snippet":{"title":"Queen - Topic"}}]}"#;
        let response: YoutubeSearchResponse = serde_json::from_str(json).unwrap();
        let results: Vec<SearchResult> = response.items.into_iter().map(search_result).collect();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title.as_deref(), Some("Queen - Topic"));
        assert_eq!(results[0].video_id, None);
    }

    #[test]
    fn test_empty_response_has_no_results() {
        let response: YoutubeSearchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.items.is_empty());
    }
}
