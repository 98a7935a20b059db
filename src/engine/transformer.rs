// Stage B (Transformer) - 回転暗号をかけてタイムスタンプを付与する

use crate::channel::{StageReceiver, StageSender};
use crate::cipher::RotationCipher;
use crate::core::{EventReporter, Message, TransformedItem, TransformerStats};
use std::sync::Arc;

/// 出力行のタイムスタンプ形式（ローカル時刻、秒精度）
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 現在時刻をタイムスタンプ文字列にする
pub fn timestamp_now() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Stage Bのワーカーを起動
///
/// スロットリングは行わず、届いた順にそのまま処理する。
pub fn spawn_transformer<R>(
    mut inbound: StageReceiver<String>,
    outbound: StageSender<TransformedItem>,
    cipher: RotationCipher,
    reporter: Arc<R>,
) -> tokio::task::JoinHandle<TransformerStats>
where
    R: EventReporter + ?Sized + 'static,
{
    tokio::spawn(async move {
        let mut stats = TransformerStats::default();

        loop {
            let text = match inbound.recv().await {
                Some(Message::Item(text)) => text,
                Some(Message::Sentinel) => break,
                None => {
                    tracing::warn!("batcher channel closed without a sentinel");
                    break;
                }
            };

            let item = TransformedItem::new(timestamp_now(), cipher.encode(&text));
            reporter.report_transformed(&item).await;
            if !outbound.send_item(item) {
                tracing::debug!("reporter is gone, dropping transformed item");
            }
            stats.transformed += 1;
        }

        stats.sentinel_forwarded = outbound.send_sentinel();
        tracing::debug!(?stats, "transformer stopped");
        stats
    })
}
