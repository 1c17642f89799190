//! Layered configuration for `channel-insights`.
//!
//! Values are resolved from lowest to highest priority: the embedded
//! `default-config.yaml`, an optional `config.yaml` in the config directory,
//! then command-line arguments and their environment variables.

#[macro_use]
extern crate tracing;

mod app_config;
mod args;

use app_config::AppConfig;
pub use app_config::{
    get_config_dir,
    get_data_dir,
};
pub use args::{
    version,
    Args,
    Command,
};
use color_eyre::{
    Result,
    Section as _,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::{
    collections::HashMap,
    fmt,
    path::{
        Path,
        PathBuf,
    },
};
use url::Url;

pub const CONFIG_FILE: &str = "config.yaml";

#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten, skip_serializing)]
    app_config: AppConfig,
    pub api_base_url: Url,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub channel_id: String,
    pub max_videos: usize,
    pub data_file: PathBuf,
    pub report_file: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_file: Option<PathBuf>,
}

const DEFAULT_CONFIG: &str = include_str!("default-config.yaml");

impl Default for Config {
    fn default() -> Self {
        serde_yml::from_str(DEFAULT_CONFIG).expect("Failed to parse default config")
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_base_url", &self.api_base_url.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("channel_id", &self.channel_id)
            .field("max_videos", &self.max_videos)
            .field("data_file", &self.data_file)
            .field("report_file", &self.report_file)
            .field("summary_file", &self.summary_file)
            .finish()
    }
}

impl config::Source for Config {
    fn clone_into_box(&self) -> Box<dyn config::Source + Send + Sync> {
        Box::new((*self).clone())
    }

    fn collect(&self) -> Result<config::Map<String, config::Value>, config::ConfigError> {
        let mut cache = HashMap::<String, config::Value>::new();
        cache.insert("api_base_url".to_string(), self.api_base_url.to_string().into());
        if let Some(api_key) = &self.api_key {
            cache.insert("api_key".to_string(), api_key.clone().into());
        }
        cache.insert("channel_id".to_string(), self.channel_id.clone().into());
        cache.insert("max_videos".to_string(), (self.max_videos as u64).into());
        cache.insert("data_file".to_string(), self.data_file.display().to_string().into());
        cache.insert("report_file".to_string(), self.report_file.display().to_string().into());
        if let Some(summary_file) = &self.summary_file {
            cache.insert("summary_file".to_string(), summary_file.display().to_string().into());
        }
        Ok(cache)
    }
}

impl Config {
    pub fn new(args: Args) -> Result<Self, config::ConfigError> {
        Self::load(args, &get_config_dir(), &get_data_dir())
    }

    fn load(args: Args, config_dir: &Path, data_dir: &Path) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("data_dir", data_dir.display().to_string())?
            .set_default("config_dir", config_dir.display().to_string())?;

        builder = builder.add_source(Config::default());

        let config_files = [(CONFIG_FILE, config::FileFormat::Yaml)];

        for (file, format) in &config_files {
            let source = config::File::from(config_dir.join(file))
                .format(*format)
                .required(false);
            builder = builder.add_source(source);
        }

        builder = builder.add_source(args);

        let cfg: Self = builder.build()?.try_deserialize()?;
        debug!(config = ?cfg, "configuration loaded");

        Ok(cfg)
    }

    pub fn data_dir(&self) -> &Path {
        &self.app_config.data_dir
    }

    pub fn config_dir(&self) -> &Path {
        &self.app_config.config_dir
    }

    /// Rejects values no run could succeed with.
    pub fn validate(&self) -> Result<()> {
        if self.channel_id.trim().is_empty() {
            return Err(eyre::eyre!("channel_id must not be empty"))
                .suggestion("Pass --channel-id or set channel_id in config.yaml");
        }
        if self.max_videos == 0 {
            return Err(eyre::eyre!("max_videos must be at least 1"));
        }
        Ok(())
    }

    /// The configured API key; only the collector needs one.
    pub fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| eyre::eyre!("No API key configured"))
            .suggestion("Pass --api-key or set the YOUTUBE_API_KEY environment variable")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use temp_dir::TempDir;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["channel-insights", "run"];
        argv.extend_from_slice(extra);
        let mut args = Args::try_parse_from(argv).unwrap();
        // Keep a key from the environment out of the assertions.
        args.api_key = None;
        args
    }

    #[test]
    fn defaults_are_embedded() {
        let config = Config::default();
        assert_eq!(config.api_base_url.as_str(), "https://www.googleapis.com/youtube/v3");
        assert_eq!(config.channel_id, "UCeVMnSShP_Iviwkknt83cww");
        assert_eq!(config.max_videos, 50);
        assert_eq!(config.data_file, PathBuf::from("youtube_data.csv"));
        assert_eq!(config.report_file, PathBuf::from("youtube_dashboard.html"));
        assert_eq!(config.summary_file, None);
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn layers_file_over_defaults_and_args_over_file() {
        let config_dir = TempDir::new().unwrap();
        let data_dir = TempDir::new().unwrap();
        std::fs::write(
            config_dir.child(CONFIG_FILE),
            "channel_id: \"UCfromfile\"\nmax_videos: 10\nsummary_file: \"summary.json\"\n",
        )
        .unwrap();

        let config = Config::load(args(&["--channel-id", "UCfromargs"]), config_dir.path(), data_dir.path()).unwrap();

        assert_eq!(config.channel_id, "UCfromargs");
        assert_eq!(config.max_videos, 10);
        assert_eq!(config.summary_file, Some(PathBuf::from("summary.json")));
        assert_eq!(config.data_file, PathBuf::from("youtube_data.csv"));
        assert_eq!(config.config_dir(), config_dir.path());
        assert_eq!(config.data_dir(), data_dir.path());
    }

    #[test]
    fn missing_config_file_is_fine() {
        let config_dir = TempDir::new().unwrap();
        let config = Config::load(args(&["--max-videos", "3"]), config_dir.path(), config_dir.path()).unwrap();
        assert_eq!(config.max_videos, 3);
        assert_eq!(config.channel_id, "UCeVMnSShP_Iviwkknt83cww");
    }

    #[test]
    fn validation_rejects_unusable_values() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.max_videos = 0;
        assert!(config.validate().is_err());

        config.max_videos = 5;
        config.channel_id = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn api_key_is_required_for_collection() {
        let mut config = Config::default();
        assert!(config.api_key().is_err());

        config.api_key = Some(" ".to_string());
        assert!(config.api_key().is_err());

        config.api_key = Some(" secret ".to_string());
        assert_eq!(config.api_key().unwrap(), "secret");
    }

    #[test]
    fn debug_output_hides_the_key() {
        let config = Config {
            api_key: Some("secret".to_string()),
            ..Config::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }
}
