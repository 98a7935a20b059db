// TextPipeline - Ingestion → Stage A → Stage B → Reporter のオーケストレーション

use super::{
    batcher::spawn_batcher,
    ingestion::run_ingestion,
    reporter::spawn_reporter,
    shutdown::{ShutdownCoordinator, ShutdownSignal, WorkerHandles},
    transformer::spawn_transformer,
};
use crate::{
    channel::channel,
    cipher::RotationCipher,
    core::{
        EventReporter, LineSource, PipelineConfig, PipelineError, PipelineResult, PipelineSummary,
        TransformedItem,
    },
};
use std::future::Future;
use std::sync::Arc;

/// 3段パイプライン
///
/// Stage AとStage Bは互いに状態を共有せず、チャンネル経由でのみデータを受け渡す。
/// Reporterとシャットダウンフラグはコントローラー側に属する。
pub struct TextPipeline<C, R: ?Sized> {
    config: Arc<C>,
    reporter: Arc<R>,
}

impl<C, R> TextPipeline<C, R>
where
    C: PipelineConfig,
    R: EventReporter + 'static,
{
    pub fn new(config: C, reporter: R) -> Self {
        Self::with_shared_reporter(config, Arc::new(reporter))
    }
}

impl<C, R> TextPipeline<C, R>
where
    C: PipelineConfig,
    R: EventReporter + ?Sized + 'static,
{
    pub fn with_shared_reporter(config: C, reporter: Arc<R>) -> Self {
        Self {
            config: Arc::new(config),
            reporter,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// 入力終端または`interrupt`の完了までパイプラインを実行し、シャットダウンまで行う
    ///
    /// ワーカーのタイムアウトは失敗として扱わない。エラーになるのは設定が不正な場合のみ。
    pub async fn run<S, F>(&self, source: &mut S, interrupt: F) -> PipelineResult<PipelineSummary>
    where
        S: LineSource + ?Sized,
        F: Future<Output = ()>,
    {
        if self.config.poll_interval().is_zero() {
            return Err(PipelineError::configuration(
                "ポーリング間隔は0より大きい必要があります",
            ));
        }

        let (ingest_tx, ingest_rx) = channel::<String>();
        let (batched_tx, batched_rx) = channel::<String>();
        let (result_tx, result_rx) = channel::<TransformedItem>();

        let batcher = spawn_batcher(
            ingest_rx,
            batched_tx,
            self.config.batch_interval(),
            self.config.poll_interval(),
        );
        let transformer = spawn_transformer(
            batched_rx,
            result_tx,
            RotationCipher::new(self.config.cipher_shift()),
            Arc::clone(&self.reporter),
        );

        let signal = ShutdownSignal::new();
        let reporter = spawn_reporter(
            result_rx,
            signal.clone(),
            transformer.abort_handle(),
            Arc::clone(&self.reporter),
            self.config.poll_interval(),
        );

        self.reporter.report_started().await;
        let outcome = run_ingestion(source, &ingest_tx, interrupt, self.reporter.as_ref()).await;
        signal.trigger();
        drop(ingest_tx);

        self.reporter.report_waiting().await;
        let coordinator = ShutdownCoordinator::new(
            self.config.join_timeout(),
            signal,
            Arc::clone(&self.reporter),
        );
        let shutdown = coordinator
            .shutdown(WorkerHandles {
                batcher,
                transformer,
                reporter,
            })
            .await;

        Ok(PipelineSummary {
            lines_ingested: outcome.lines,
            termination: outcome.termination,
            shutdown,
        })
    }
}
