use crate::{
    Args,
    Command,
    Config,
};
use channel_insights_collector::{
    ChannelCollector,
    ChannelId,
    YouTubeClient,
};
use channel_insights_reporter::Report;
use color_eyre::{
    Result,
    Section as _,
};
use eyre::Context as _;

const API_SUGGESTION: &str = "Check the API key and that the YouTube Data API v3 is enabled for it";

pub struct App {
    command: Command,
    config: Config,
}

impl App {
    pub fn new(args: Args) -> Result<Self> {
        let command = args.command;
        let config = Config::new(args).wrap_err("Failed to load configuration")?;
        config.validate()?;
        debug!(
            config_dir = %config.config_dir().display(),
            data_dir = %config.data_dir().display(),
            "directories"
        );
        Ok(Self { command, config })
    }

    pub fn run(self) -> Result<()> {
        match self.command {
            Command::Collect => self.collect(),
            Command::Report => self.report(),
            Command::Run => {
                self.collect()?;
                self.report()
            }
        }
    }

    /// Fetches the channel's uploads and writes the dataset. Nothing is
    /// written unless the whole collection succeeds.
    #[instrument(level = "debug", skip(self), fields(channel = %self.config.channel_id))]
    fn collect(&self) -> Result<()> {
        let api_key = self.config.api_key()?;
        let client = YouTubeClient::new(self.config.api_base_url.clone(), api_key)
            .wrap_err("Failed to create the API client")?;
        let mut collector = ChannelCollector::new(
            client,
            ChannelId::from(self.config.channel_id.as_str()),
            self.config.max_videos,
        );

        info!(max_videos = self.config.max_videos, "collecting uploads");
        if let Err(err) = collector.collect() {
            let api_failure = err.is_api_error();
            let report = eyre::Report::new(err).wrap_err("Collection failed");
            return Err(if api_failure {
                report.suggestion(API_SUGGESTION)
            } else {
                report
            });
        }

        let data_file = &self.config.data_file;
        collector
            .persist(data_file)
            .wrap_err_with(|| format!("Failed to write {}", data_file.display()))?;
        debug!(summary = %collector.summary(), "collection summary");

        println!("{}", collector.format());
        Ok(())
    }

    /// Renders the dashboard from the dataset written by [`App::collect`].
    #[instrument(level = "debug", skip(self))]
    fn report(&self) -> Result<()> {
        let report = Report::load(&self.config.data_file)?;
        report.write(&self.config.report_file)?;

        if let Some(summary_file) = &self.config.summary_file {
            report.write_summary(summary_file)?;
        }

        println!("{}", report.format());
        info!(path = %self.config.report_file.display(), "dashboard ready");
        Ok(())
    }
}
