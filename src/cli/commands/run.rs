use crate::cli::Cli;
use crate::core::{PipelineError, PipelineResult, PipelineSummary};
use crate::engine::TextPipeline;
use crate::services::{ConsoleEventReporter, StdinLineSource};
use anyhow::Result;
use std::path::Path;

/// 標準入力を読みながらパイプラインを実行する
///
/// Ctrl-Cと入力終端はどちらも同じシャットダウン経路に入る。
pub async fn execute_run(cli: &Cli) -> Result<PipelineSummary> {
    let config = cli.to_config()?;
    let reporter = if cli.quiet {
        ConsoleEventReporter::quiet()
    } else {
        ConsoleEventReporter::new()
    };

    let pipeline = TextPipeline::new(config, reporter);
    let mut source = StdinLineSource::new();
    let summary = pipeline.run(&mut source, interrupt_signal()).await?;

    if let Some(path) = &cli.summary {
        write_summary(path, &summary)?;
        tracing::info!(path = %path.display(), "summary written");
    }

    Ok(summary)
}

/// Ctrl-Cを待つ。ハンドラを登録できない場合は割り込みを発生させない
pub async fn interrupt_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for ctrl-c, only end of input will stop the pipeline");
        std::future::pending::<()>().await;
    }
}

/// 実行結果をJSONで書き出す
pub fn write_summary(path: &Path, summary: &PipelineSummary) -> PipelineResult<()> {
    let json = serde_json::to_string_pretty(summary)
        .map_err(|error| PipelineError::summary(path.display().to_string(), error.into()))?;
    std::fs::write(path, json)
        .map_err(|error| PipelineError::summary(path.display().to_string(), error.into()))
}
