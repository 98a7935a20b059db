use anyhow::Result;
use clap::Parser;
use text_pipeline::cli::{execute_run, Cli};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 診断ログはstderrへ。既定はwarn、RUST_LOG=text_pipeline=debug などで上書き
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let summary = execute_run(&cli).await?;
    tracing::debug!(?summary, "pipeline finished");

    Ok(())
}
