// Reporter - Stage Bの結果を記録し、パイプラインの完了を判定する

use super::shutdown::ShutdownSignal;
use crate::channel::{Received, StageReceiver};
use crate::core::{EventReporter, Liveness, Message, ReporterExit, ReporterStats, TransformedItem};
use std::sync::Arc;
use std::time::Duration;

/// Reporterタスクを起動
///
/// 終了条件は次のいずれか:
/// - Sentinelを受信した
/// - 受信がタイムアウトし、シャットダウンフラグが立っていて、Stage Bが既に終了している
///
/// 後者はSentinelが失われた場合の保険。終了前に既に届いている結果は取りこぼさない。
pub fn spawn_reporter<R, L>(
    mut inbound: StageReceiver<TransformedItem>,
    shutdown: ShutdownSignal,
    upstream: L,
    reporter: Arc<R>,
    poll_interval: Duration,
) -> tokio::task::JoinHandle<ReporterStats>
where
    R: EventReporter + ?Sized + 'static,
    L: Liveness + 'static,
{
    tokio::spawn(async move {
        let mut logged = 0;

        let exit = loop {
            match inbound.recv_timeout(poll_interval).await {
                Received::Item(item) => {
                    reporter.report_logged(&item).await;
                    logged += 1;
                }
                Received::Sentinel => break ReporterExit::Sentinel,
                Received::Closed => break ReporterExit::ChannelClosed,
                Received::Timeout => {
                    if shutdown.is_triggered() && !upstream.is_alive() {
                        break drain_ready(&mut inbound, reporter.as_ref(), &mut logged).await;
                    }
                }
            }
        };

        let stats = ReporterStats {
            logged,
            sentinel_seen: exit == ReporterExit::Sentinel,
            exit,
        };
        tracing::debug!(?stats, "reporter stopped");
        stats
    })
}

// タイムアウト判定とStage Bの終了が競合した分を回収する
async fn drain_ready<R>(
    inbound: &mut StageReceiver<TransformedItem>,
    reporter: &R,
    logged: &mut usize,
) -> ReporterExit
where
    R: EventReporter + ?Sized,
{
    while let Some(message) = inbound.try_recv() {
        match message {
            Message::Item(item) => {
                reporter.report_logged(&item).await;
                *logged += 1;
            }
            Message::Sentinel => return ReporterExit::Sentinel,
        }
    }
    tracing::info!("transformer is no longer alive, reporter stopping without a sentinel");
    ReporterExit::UpstreamGone
}
