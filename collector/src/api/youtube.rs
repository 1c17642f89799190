use super::{
    resources::{
        ChannelResource,
        ErrorResponse,
        ListResponse,
        PlaylistItem,
        VideoResource,
    },
    ApiError,
    ChannelPart,
    VideoPlatform,
};
use crate::channel::ChannelId;
use reqwest::{
    blocking::Client as HttpClient,
    StatusCode,
};
use serde::de::DeserializeOwned;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Blocking client for the YouTube Data API v3, authenticated with a static API key.
pub struct YouTubeClient {
    http_client: HttpClient,
    base_url: Url,
    api_key: String,
}

impl std::fmt::Debug for YouTubeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YouTubeClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key_len", &self.api_key.len())
            .finish()
    }
}

impl YouTubeClient {
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Result<Self, ApiError> {
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url));
        }
        let http_client = HttpClient::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| ApiError::Transport {
                endpoint: "client",
                source,
            })?;

        Ok(Self {
            http_client,
            base_url,
            api_key: api_key.into(),
        })
    }

    fn endpoint_url(&self, endpoint: &str) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejected bases that cannot carry path segments.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(endpoint);
        }
        url
    }

    #[instrument(level = "debug", skip(self, query))]
    fn get<T: DeserializeOwned>(&self, endpoint: &'static str, query: &[(&str, &str)]) -> Result<T, ApiError> {
        let url = self.endpoint_url(endpoint);
        debug!(%url, ?query, "requesting");

        let transport = |source| ApiError::Transport { endpoint, source };
        let response = self
            .http_client
            .get(url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().map_err(transport)?;
        decode(endpoint, status, &body)
    }
}

/// Turns a response body into `T`, or into [`ApiError::Status`] carrying the
/// platform's error message for non-2xx statuses.
fn decode<T: DeserializeOwned>(endpoint: &'static str, status: StatusCode, body: &str) -> Result<T, ApiError> {
    if !status.is_success() {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| body.trim().chars().take(200).collect());
        return Err(ApiError::Status {
            endpoint,
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(body).map_err(|source| ApiError::Decode { endpoint, source })
}

impl VideoPlatform for YouTubeClient {
    fn channels(&self, channel_id: &ChannelId, parts: &[ChannelPart]) -> Result<Vec<ChannelResource>, ApiError> {
        let part = join_parts(parts);
        let response: ListResponse<ChannelResource> =
            self.get("channels", &[("part", part.as_str()), ("id", channel_id.as_str())])?;
        Ok(response.items)
    }

    fn playlist_items(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
        max_results: usize,
    ) -> Result<ListResponse<PlaylistItem>, ApiError> {
        let max_results = max_results.to_string();
        let mut query = vec![
            ("part", "snippet"),
            ("playlistId", playlist_id),
            ("maxResults", max_results.as_str()),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }
        self.get("playlistItems", &query)
    }

    fn videos(&self, video_ids: &[String]) -> Result<Vec<VideoResource>, ApiError> {
        let ids = video_ids.join(",");
        let response: ListResponse<VideoResource> =
            self.get("videos", &[("part", "statistics,contentDetails"), ("id", ids.as_str())])?;
        Ok(response.items)
    }
}

fn join_parts(parts: &[ChannelPart]) -> String {
    parts.iter().map(ChannelPart::to_string).collect::<Vec<_>>().join(",")
}
