// 高レベル公開API
// TextPipelineを簡単に使用できるようにするための便利な関数

use super::TextPipeline;
use crate::{
    core::{EventReporter, PipelineConfig, PipelineResult, PipelineSummary},
    services::{ConsoleEventReporter, DefaultPipelineConfig, NoOpEventReporter, VecLineSource},
};

/// デフォルト設定・コンソール出力のパイプラインを作成
pub fn create_default_pipeline() -> TextPipeline<DefaultPipelineConfig, ConsoleEventReporter> {
    TextPipeline::new(DefaultPipelineConfig::default(), ConsoleEventReporter::new())
}

/// 出力なしのパイプラインを作成（テスト・ベンチマーク用）
pub fn create_quiet_pipeline<C>(config: C) -> TextPipeline<C, NoOpEventReporter>
where
    C: PipelineConfig,
{
    TextPipeline::new(config, NoOpEventReporter::new())
}

/// 事前に用意した行をパイプラインに流し、入力終端まで処理する
pub async fn run_lines<C, R, I, S>(
    pipeline: &TextPipeline<C, R>,
    lines: I,
) -> PipelineResult<PipelineSummary>
where
    C: PipelineConfig,
    R: EventReporter + ?Sized + 'static,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut source = VecLineSource::new(lines);
    pipeline.run(&mut source, std::future::pending::<()>()).await
}
