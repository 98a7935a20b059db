use crate::core::{PipelineError, PipelineResult};
use crate::services::DefaultPipelineConfig;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "text_pipeline")]
#[command(about = "Relay stdin lines through a rate-limited, rot13-encoding pipeline")]
#[command(version)]
pub struct Cli {
    /// Seconds between two releases from stage A
    #[arg(short, long)]
    pub interval: Option<f64>,

    /// Wait for timed receives, in milliseconds
    #[arg(long)]
    pub poll_ms: Option<u64>,

    /// Seconds to wait for each worker during shutdown (defaults to the interval)
    #[arg(short, long)]
    pub join_timeout: Option<f64>,

    /// Configuration preset (default, fast, testing)
    #[arg(short = 'p', long, default_value = "default")]
    pub preset: String,

    /// Write a JSON summary of the run to this file
    #[arg(short, long)]
    pub summary: Option<PathBuf>,

    /// Only print data lines
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// プリセットに個別指定を上書きして設定を組み立てる
    pub fn to_config(&self) -> PipelineResult<DefaultPipelineConfig> {
        let mut config = DefaultPipelineConfig::from_preset(&self.preset)?;

        if let Some(seconds) = self.interval {
            config = config.with_batch_interval(parse_seconds("interval", seconds)?);
        }
        if let Some(millis) = self.poll_ms {
            config = config.with_poll_interval(Duration::from_millis(millis));
        }
        if let Some(seconds) = self.join_timeout {
            config = config.with_join_timeout(parse_seconds("join-timeout", seconds)?);
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_seconds(field: &str, seconds: f64) -> PipelineResult<Duration> {
    Duration::try_from_secs_f64(seconds).map_err(|error| {
        PipelineError::configuration(format!("--{field} に不正な秒数が指定されました: {seconds} ({error})"))
    })
}
