//! # Channel Collector
//!
//! Fetches the uploads of a single channel from the video platform API and
//! writes them to the intermediate dataset file.
//!
//! ## Architecture
//!
//! - **`api`**: the [`VideoPlatform`] trait plus the blocking [`YouTubeClient`]
//!   implementation and the response resources it decodes
//! - **`collector`**: [`ChannelCollector`], which resolves the channel, walks
//!   the uploads playlist page by page, batch-fetches statistics per page and
//!   joins both by video id
//! - **`channel`**: the channel handle and the summary shown after resolution
//!
//! Every failure talking to the API is terminal; the dataset file is only
//! written once the whole collection succeeded.

#[macro_use]
extern crate tracing;

pub mod api;
pub mod channel;
pub mod collector;
mod error;

pub use api::{
    ApiError,
    VideoPlatform,
    YouTubeClient,
};
pub use channel::{
    ChannelId,
    ChannelSummary,
};
pub use collector::{
    ChannelCollector,
    CollectionStats,
    PAGE_SIZE,
};
pub use error::CollectorError;
