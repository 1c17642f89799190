use crate::{
    api::ApiError,
    channel::ChannelId,
};
use channel_insights_dataset::DatasetError;

#[derive(thiserror::Error, Debug)]
pub enum CollectorError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("channel {0} not found")]
    ChannelNotFound(ChannelId),
    #[error("failed to save collected videos: {0}")]
    Dataset(#[from] DatasetError),
}

impl CollectorError {
    pub fn is_api_error(&self) -> bool {
        matches!(self, CollectorError::Api(_))
    }
}
