// Stage A (Batcher) - 受信した行をバッファし、一定間隔で1件ずつ放出する

use crate::channel::{Received, StageReceiver, StageSender};
use crate::core::BatcherStats;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::Instant;

/// Stage Aのワーカーを起動
///
/// - 受信は`poll_interval`を上限に待つ
/// - 前回の放出から`batch_interval`以上経過し、バッファが空でなければ最古の1件を小文字化して送る
/// - Sentinel受信後、バッファが空になった時点でSentinelを下流へ送って終了する
///
/// 受信チャンネルがSentinelなしで閉じられた場合もSentinel受信と同様に扱う。
pub fn spawn_batcher(
    mut inbound: StageReceiver<String>,
    outbound: StageSender<String>,
    batch_interval: Duration,
    poll_interval: Duration,
) -> tokio::task::JoinHandle<BatcherStats> {
    tokio::spawn(async move {
        let mut buffer: VecDeque<String> = VecDeque::new();
        let mut stats = BatcherStats::default();
        let mut finishing = false;
        let mut last_release = Instant::now();

        loop {
            if finishing {
                // 新しい入力は来ないので次の放出時刻まで待つだけ
                match last_release.checked_add(batch_interval) {
                    Some(deadline) => tokio::time::sleep_until(deadline).await,
                    // 表現できないほど先の時刻は到来しない
                    None => std::future::pending::<()>().await,
                }
            } else {
                match inbound.recv_timeout(poll_interval).await {
                    Received::Item(item) => {
                        stats.received += 1;
                        buffer.push_back(item);
                    }
                    Received::Sentinel => finishing = true,
                    Received::Closed => {
                        tracing::warn!("ingestion channel closed without a sentinel");
                        finishing = true;
                    }
                    Received::Timeout => {}
                }
            }

            let now = Instant::now();
            if now.duration_since(last_release) >= batch_interval {
                if let Some(item) = buffer.pop_front() {
                    if !outbound.send_item(item.to_lowercase()) {
                        tracing::debug!("transformer is gone, dropping released item");
                    }
                    stats.released += 1;
                    last_release = now;
                }
            }

            if finishing && buffer.is_empty() {
                stats.sentinel_forwarded = outbound.send_sentinel();
                break;
            }
        }

        tracing::debug!(?stats, "batcher stopped");
        stats
    })
}
