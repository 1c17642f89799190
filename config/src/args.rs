use clap::{
    Parser,
    Subcommand,
};
use std::path::PathBuf;

/// Collects a channel's video statistics and renders a content strategy dashboard.
#[derive(Parser, Debug, Clone)]
#[command(author, version = version(), about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// YouTube Data API v3 key.
    #[clap(long, env = "YOUTUBE_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Channel to collect, e.g. `UCeVMnSShP_Iviwkknt83cww`.
    #[clap(long, value_name = "ID", global = true)]
    pub channel_id: Option<String>,

    /// Upper bound of videos to collect.
    #[clap(long, value_name = "N", global = true)]
    pub max_videos: Option<usize>,

    /// CSV file written by `collect` and read by `report`.
    #[clap(long, value_name = "FILE", global = true)]
    pub data_file: Option<PathBuf>,

    /// HTML dashboard written by `report`.
    #[clap(long, value_name = "FILE", global = true)]
    pub report_file: Option<PathBuf>,

    /// Also export the report summary as JSON.
    #[clap(long, value_name = "FILE", global = true)]
    pub summary_file: Option<PathBuf>,

    /// Base URL of the platform API.
    #[clap(long, value_name = "URL", global = true)]
    pub api_base_url: Option<String>,

    /// Log at debug level unless `RUST_LOG` is set.
    #[clap(short, long, action, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Fetch the channel's uploads and write the CSV dataset.
    Collect,
    /// Render the dashboard from an existing dataset.
    Report,
    /// `collect`, then `report`.
    Run,
}

mod config_ext {
    use super::*;
    use config::{
        Map,
        Source,
        Value,
    };
    use std::collections::HashMap;

    impl Source for Args {
        fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
            Box::new((*self).clone())
        }

        fn collect(&self) -> Result<Map<String, Value>, config::ConfigError> {
            let mut cache = HashMap::<String, Value>::new();
            if let Some(api_key) = &self.api_key {
                cache.insert("api_key".to_string(), api_key.clone().into());
            }
            if let Some(channel_id) = &self.channel_id {
                cache.insert("channel_id".to_string(), channel_id.clone().into());
            }
            if let Some(max_videos) = self.max_videos {
                cache.insert("max_videos".to_string(), (max_videos as u64).into());
            }
            for (key, path) in [
                ("data_file", &self.data_file),
                ("report_file", &self.report_file),
                ("summary_file", &self.summary_file),
            ] {
                if let Some(path) = path {
                    cache.insert(key.to_string(), path.display().to_string().into());
                }
            }
            if let Some(url) = &self.api_base_url {
                cache.insert("api_base_url".to_string(), url.clone().into());
            }
            Ok(cache)
        }
    }
}

pub fn version() -> String {
    let author = clap::crate_authors!();
    let config_dir_path = crate::get_config_dir().display().to_string();
    let data_dir_path = crate::get_data_dir().display().to_string();

    format!(
        "\
Authors: {author}

Config directory: {config_dir_path}
Data directory: {data_dir_path}"
    )
}
