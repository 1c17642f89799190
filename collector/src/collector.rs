use crate::{
    api::{
        resources::{
            PlaylistItemSnippet,
            VideoResource,
        },
        ApiError,
        ChannelPart,
        VideoPlatform,
    },
    channel::{
        ChannelId,
        ChannelSummary,
    },
    error::CollectorError,
};
use channel_insights_dataset::{
    format_thousands,
    VideoRecord,
};
use comfy_table::{
    presets,
    Attribute,
    Cell,
    CellAlignment,
    ContentArrangement,
    Table,
};
use serde::Serialize;
use std::{
    collections::{
        HashMap,
        HashSet,
    },
    path::Path,
};

/// Largest page the platform serves for playlist items.
pub const PAGE_SIZE: usize = 50;

/// Number of rows shown by [`ChannelCollector::format`].
const PREVIEW_ROWS: usize = 5;

/// Bookkeeping of a single collection run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollectionStats {
    pub pages_fetched: usize,
    pub statistics_calls: usize,
    pub duplicates_skipped: usize,
    pub dropped_without_statistics: usize,
    pub page_limit_reached: bool,
}

/// Collects up to `target` uploads of one channel.
pub struct ChannelCollector<P> {
    platform: P,
    channel_id: ChannelId,
    target: usize,
    channel: Option<ChannelSummary>,
    records: Vec<VideoRecord>,
    stats: CollectionStats,
}

impl<P: VideoPlatform> ChannelCollector<P> {
    pub fn new(platform: P, channel_id: ChannelId, target: usize) -> Self {
        Self {
            platform,
            channel_id,
            target,
            channel: None,
            records: Vec::new(),
            stats: CollectionStats::default(),
        }
    }

    /// Upper bound of playlist page requests for `target` records.
    ///
    /// One page more than a well-behaved API needs, so a platform that keeps
    /// handing out continuation tokens cannot keep the loop alive.
    pub fn max_page_fetches(target: usize) -> usize {
        target.div_ceil(PAGE_SIZE) + 1
    }

    /// Runs the whole pipeline: channel, uploads playlist, pages, statistics.
    ///
    /// Any API failure aborts the run; previously collected records are discarded.
    pub fn collect(&mut self) -> Result<&[VideoRecord], CollectorError> {
        self.records.clear();
        self.stats = CollectionStats::default();

        let channel = self.resolve_channel()?;
        info!(
            title = %channel.title,
            subscribers = ?channel.subscriber_count,
            "connected to channel"
        );
        self.channel = Some(channel);

        let uploads = self.resolve_uploads_playlist()?;
        debug!(%uploads, "resolved uploads playlist");

        let (records, stats) = self.collect_uploads(&uploads)?;
        info!(
            videos = records.len(),
            pages = stats.pages_fetched,
            statistics_calls = stats.statistics_calls,
            "collected uploads"
        );
        self.records = records;
        self.stats = stats;

        Ok(&self.records)
    }

    /// Looks up the channel's snippet and statistics.
    pub fn resolve_channel(&self) -> Result<ChannelSummary, CollectorError> {
        let resource = self
            .platform
            .channels(&self.channel_id, &[ChannelPart::Snippet, ChannelPart::Statistics])?
            .into_iter()
            .next()
            .ok_or_else(|| CollectorError::ChannelNotFound(self.channel_id.clone()))?;

        ChannelSummary::from_resource(resource).ok_or_else(|| ApiError::MissingField("channel snippet").into())
    }

    /// Looks up the id of the playlist holding all uploads of the channel.
    pub fn resolve_uploads_playlist(&self) -> Result<String, CollectorError> {
        let uploads = self
            .platform
            .channels(&self.channel_id, &[ChannelPart::ContentDetails])?
            .into_iter()
            .next()
            .and_then(|resource| resource.content_details)
            .and_then(|details| details.related_playlists.uploads)
            .filter(|id| !id.is_empty())
            .ok_or(ApiError::MissingField("contentDetails.relatedPlaylists.uploads"))?;
        Ok(uploads)
    }

    /// Walks the playlist page by page until `target` records are joined, the
    /// playlist ends, or the page budget is spent.
    fn collect_uploads(&self, playlist_id: &str) -> Result<(Vec<VideoRecord>, CollectionStats), CollectorError> {
        let page_limit = Self::max_page_fetches(self.target);
        let mut stats = CollectionStats::default();
        let mut records = Vec::with_capacity(self.target);
        let mut seen = HashSet::new();
        let mut cursor: Option<String> = None;

        while records.len() < self.target {
            if stats.pages_fetched >= page_limit {
                warn!(
                    page_limit,
                    collected = records.len(),
                    "page limit reached while the platform still reports more pages"
                );
                stats.page_limit_reached = true;
                break;
            }

            let remaining = self.target - records.len();
            let page = self
                .platform
                .playlist_items(playlist_id, cursor.as_deref(), remaining.min(PAGE_SIZE))?;
            stats.pages_fetched += 1;

            let mut fresh = Vec::with_capacity(page.items.len());
            for item in page.items {
                let Some(video_id) = item.snippet.resource_id.video_id.clone() else {
                    debug!(title = %item.snippet.title, "skipping playlist item without video id");
                    continue;
                };
                if seen.insert(video_id.clone()) {
                    fresh.push((video_id, item.snippet));
                } else {
                    stats.duplicates_skipped += 1;
                }
            }
            fresh.truncate(remaining);
            debug!(page = stats.pages_fetched, items = fresh.len(), "fetched playlist page");

            if !fresh.is_empty() {
                let ids = fresh.iter().map(|(id, _)| id.clone()).collect::<Vec<_>>();
                let videos = self.platform.videos(&ids)?;
                stats.statistics_calls += 1;

                let joined = join_by_id(fresh, videos);
                stats.dropped_without_statistics += joined.dropped;
                records.extend(joined.records);
            }

            cursor = match page.next_page_token {
                Some(token) if !token.is_empty() => Some(token),
                _ => {
                    debug!("reached the end of the uploads playlist");
                    break;
                }
            };
        }

        records.truncate(self.target);
        Ok((records, stats))
    }

    /// Writes the collected records, replacing any existing file.
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<(), CollectorError> {
        let path = path.as_ref();
        info!(videos = self.records.len(), path = %path.display(), "saving videos");
        channel_insights_dataset::write_records(path, &self.records)?;
        Ok(())
    }

    pub fn channel(&self) -> Option<&ChannelSummary> {
        self.channel.as_ref()
    }

    pub fn records(&self) -> &[VideoRecord] {
        &self.records
    }

    pub fn stats(&self) -> &CollectionStats {
        &self.stats
    }

    /// Preview of the first collected records.
    pub fn format(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_width(120)
            .set_header(
                ["Title", "Views", "Likes", "Comments", "Date", "Duration"]
                    .into_iter()
                    .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
            );

        for record in self.records.iter().take(PREVIEW_ROWS) {
            table.add_row(vec![
                Cell::new(&record.title),
                Cell::new(format_thousands(record.view_count)).set_alignment(CellAlignment::Right),
                Cell::new(format_thousands(record.like_count)).set_alignment(CellAlignment::Right),
                Cell::new(format_thousands(record.comment_count)).set_alignment(CellAlignment::Right),
                Cell::new(record.published_at.format("%Y-%m-%d %H:%M")),
                Cell::new(&record.duration),
            ]);
        }

        let channel = self
            .channel
            .as_ref()
            .map(|c| format!("{} ({})", c.title, c.id))
            .unwrap_or_else(|| self.channel_id.to_string());
        format!(
            "{channel}: {} videos collected, showing the first {}\n{table}",
            self.records.len(),
            self.records.len().min(PREVIEW_ROWS)
        )
    }

    /// Machine readable summary of the run.
    pub fn summary(&self) -> serde_json::Value {
        serde_json::json!({
            "channel": self.channel,
            "target": self.target,
            "videos_collected": self.records.len(),
            "stats": self.stats,
        })
    }
}

struct Joined {
    records: Vec<VideoRecord>,
    dropped: usize,
}

/// Pairs playlist entries with their statistics by video id, keeping playlist
/// order. Entries the platform returned no statistics for are dropped.
fn join_by_id(items: Vec<(String, PlaylistItemSnippet)>, videos: Vec<VideoResource>) -> Joined {
    let mut by_id = videos
        .into_iter()
        .map(|video| (video.id.clone(), video))
        .collect::<HashMap<_, _>>();

    let mut joined = Joined {
        records: Vec::with_capacity(items.len()),
        dropped: 0,
    };
    for (video_id, snippet) in items {
        match by_id.remove(&video_id) {
            Some(video) => joined.records.push(to_record(snippet, video)),
            None => {
                warn!(%video_id, title = %snippet.title, "no statistics returned, dropping video");
                joined.dropped += 1;
            }
        }
    }
    joined
}

fn to_record(snippet: PlaylistItemSnippet, video: VideoResource) -> VideoRecord {
    VideoRecord {
        title: snippet.title,
        view_count: video.statistics.view_count.unwrap_or(0),
        like_count: video.statistics.like_count.unwrap_or(0),
        comment_count: video.statistics.comment_count.unwrap_or(0),
        published_at: snippet.published_at,
        duration: video.content_details.and_then(|c| c.duration).unwrap_or_default(),
    }
}
