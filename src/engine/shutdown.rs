// Shutdown Coordinator - 各ワーカーを時間制限付きでjoinし、Reporterに停止を通知する

use crate::core::{
    BatcherStats, EventReporter, JoinStatus, PipelineError, ReporterStats, ShutdownReport,
    TransformerStats,
};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// コントローラー内で共有されるシャットダウンフラグ
///
/// 一度立てたフラグは下がらない。
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
    triggered: Arc<AtomicBool>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.triggered.store(true, Ordering::Release);
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::Acquire)
    }
}

/// joinの対象となるワーカー群
pub struct WorkerHandles {
    pub batcher: JoinHandle<BatcherStats>,
    pub transformer: JoinHandle<TransformerStats>,
    pub reporter: JoinHandle<ReporterStats>,
}

/// ベストエフォートのシャットダウン
///
/// タイムアウトしたワーカーは強制終了せず、そのまま先へ進む。
/// そのためStage Aのバッファが全て排出される保証はない。
pub struct ShutdownCoordinator<R: ?Sized> {
    join_timeout: Duration,
    signal: ShutdownSignal,
    reporter: Arc<R>,
}

impl<R> ShutdownCoordinator<R>
where
    R: EventReporter + ?Sized,
{
    pub fn new(join_timeout: Duration, signal: ShutdownSignal, reporter: Arc<R>) -> Self {
        Self {
            join_timeout,
            signal,
            reporter,
        }
    }

    /// Stage A → Stage B → Reporterの順に待ち、完了を通知する
    pub async fn shutdown(&self, workers: WorkerHandles) -> ShutdownReport {
        let started = Instant::now();

        let (batcher, batcher_stats) = self.join_bounded("batcher", workers.batcher).await;
        let (transformer, transformer_stats) =
            self.join_bounded("transformer", workers.transformer).await;
        tracing::debug!(?batcher_stats, ?transformer_stats, "upstream stages joined");

        self.signal.trigger();
        let (reporter, reporter_stats) = self.join_bounded("reporter", workers.reporter).await;

        let report = ShutdownReport {
            batcher,
            transformer,
            reporter,
            elapsed_ms: started.elapsed().as_millis() as u64,
            logged: reporter_stats.map(|stats| stats.logged),
        };

        self.reporter.report_shutdown_complete(&report).await;
        tracing::info!(clean = report.is_clean(), elapsed_ms = report.elapsed_ms, "shutdown complete");
        report
    }

    async fn join_bounded<T>(&self, stage: &str, mut handle: JoinHandle<T>) -> (JoinStatus, Option<T>) {
        match tokio::time::timeout(self.join_timeout, &mut handle).await {
            Ok(Ok(value)) => (JoinStatus::Finished, Some(value)),
            Ok(Err(join_error)) => {
                let error = PipelineError::task(stage, join_error);
                tracing::warn!(%error, "worker failed during shutdown");
                (
                    JoinStatus::Failed {
                        reason: error.to_string(),
                    },
                    None,
                )
            }
            Err(_) => {
                tracing::info!(
                    stage,
                    timeout_ms = self.join_timeout.as_millis() as u64,
                    "join timed out, moving on"
                );
                self.reporter.report_join_timeout(stage).await;
                (JoinStatus::TimedOut, None)
            }
        }
    }
}
