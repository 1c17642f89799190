//! Access to the video platform.
//!
//! [`VideoPlatform`] is the seam between the collection pipeline and the
//! network: [`YouTubeClient`] talks to the real API, tests plug in an
//! in-memory implementation.

pub mod resources;
mod youtube;

use crate::channel::ChannelId;
use resources::{
    ChannelResource,
    ListResponse,
    PlaylistItem,
    VideoResource,
};
use strum::{
    AsRefStr,
    Display,
};
pub use youtube::{
    YouTubeClient,
    DEFAULT_BASE_URL,
};

/// Resource parts that can be requested for a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum ChannelPart {
    Snippet,
    Statistics,
    ContentDetails,
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("invalid API base URL {0}")]
    InvalidBaseUrl(url::Url),
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned HTTP {status}: {message}")]
    Status {
        endpoint: &'static str,
        status: u16,
        message: String,
    },
    #[error("failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("response is missing {0}")]
    MissingField(&'static str),
}

/// Read-only operations the collector needs from the platform.
pub trait VideoPlatform {
    /// Looks up a channel by id, returning only the requested `parts`.
    /// An unknown id yields an empty list, not an error.
    fn channels(&self, channel_id: &ChannelId, parts: &[ChannelPart]) -> Result<Vec<ChannelResource>, ApiError>;

    /// Fetches one page of a playlist. `page_token` is the continuation token
    /// of the previous page, `None` for the first one.
    fn playlist_items(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
        max_results: usize,
    ) -> Result<ListResponse<PlaylistItem>, ApiError>;

    /// Fetches statistics and content details for all `video_ids` in one request.
    fn videos(&self, video_ids: &[String]) -> Result<Vec<VideoResource>, ApiError>;
}

impl<P: VideoPlatform + ?Sized> VideoPlatform for &P {
    fn channels(&self, channel_id: &ChannelId, parts: &[ChannelPart]) -> Result<Vec<ChannelResource>, ApiError> {
        (**self).channels(channel_id, parts)
    }

    fn playlist_items(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
        max_results: usize,
    ) -> Result<ListResponse<PlaylistItem>, ApiError> {
        (**self).playlist_items(playlist_id, page_token, max_results)
    }

    fn videos(&self, video_ids: &[String]) -> Result<Vec<VideoResource>, ApiError> {
        (**self).videos(video_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_parts_use_api_names() {
        assert_eq!(ChannelPart::Snippet.to_string(), "snippet");
        assert_eq!(ChannelPart::ContentDetails.as_ref(), "contentDetails");
    }
}
