use crate::api::resources::ChannelResource;
use derive_more::{
    Deref,
    Display,
};
use serde::{
    Deserialize,
    Serialize,
};

/// Opaque platform identifier of the channel to collect, e.g. `UCeVMnSShP_Iviwkknt83cww`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, Serialize, Deserialize)]
pub struct ChannelId(String);

impl From<String> for ChannelId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ChannelId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Identity and headline numbers of a resolved channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelSummary {
    pub id: ChannelId,
    pub title: String,
    /// `None` when the channel hides its subscriber count.
    pub subscriber_count: Option<u64>,
    pub view_count: Option<u64>,
    pub video_count: Option<u64>,
}

impl ChannelSummary {
    /// Returns `None` when the resource carries no snippet.
    pub(crate) fn from_resource(resource: ChannelResource) -> Option<Self> {
        let snippet = resource.snippet?;
        let statistics = resource.statistics.unwrap_or_default();
        let subscriber_count = if statistics.hidden_subscriber_count {
            None
        } else {
            statistics.subscriber_count
        };

        Some(Self {
            id: ChannelId::from(resource.id),
            title: snippet.title,
            subscriber_count,
            view_count: statistics.view_count,
            video_count: statistics.video_count,
        })
    }
}
