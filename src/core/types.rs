// パイプラインを流れるデータ型とステージ統計の定義

use serde::{Deserialize, Serialize};

/// チャンネル上のペイロード
///
/// `Sentinel`は「このチャンネルにはもうデータが来ない」ことを表す。
/// 空文字列も正当な`Item`として扱われる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message<T> {
    Item(T),
    Sentinel,
}

impl<T> Message<T> {
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Message::Sentinel)
    }
}

/// Stage Bが生成する変換済みデータ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformedItem {
    pub timestamp: String,
    pub ciphertext: String,
}

impl TransformedItem {
    pub fn new(timestamp: impl Into<String>, ciphertext: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            ciphertext: ciphertext.into(),
        }
    }
}

/// Ingestionが停止した理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    EndOfInput,
    Interrupted,
}

/// 時間制限付きjoinの結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum JoinStatus {
    Finished,
    TimedOut,
    Failed { reason: String },
}

impl JoinStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, JoinStatus::Finished)
    }
}

/// Stage A (Batcher) の統計
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatcherStats {
    pub received: usize,
    pub released: usize,
    pub sentinel_forwarded: bool,
}

/// Stage B (Transformer) の統計
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformerStats {
    pub transformed: usize,
    pub sentinel_forwarded: bool,
}

/// Reporterが停止した理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReporterExit {
    /// Sentinelを受信した
    Sentinel,
    /// シャットダウンフラグが立ち、Stage Bが既に終了していた
    UpstreamGone,
    /// 送信側がSentinelなしで閉じられた
    ChannelClosed,
}

/// Reporterの統計
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReporterStats {
    pub logged: usize,
    pub sentinel_seen: bool,
    pub exit: ReporterExit,
}

/// Shutdown Coordinatorの結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShutdownReport {
    pub batcher: JoinStatus,
    pub transformer: JoinStatus,
    pub reporter: JoinStatus,
    pub elapsed_ms: u64,
    /// Reporterのjoinが完了した場合のみ判明する
    pub logged: Option<usize>,
}

impl ShutdownReport {
    /// 全ワーカーが時間内に終了したか
    pub fn is_clean(&self) -> bool {
        self.batcher.is_finished() && self.transformer.is_finished() && self.reporter.is_finished()
    }
}

/// パイプライン全体のサマリー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub lines_ingested: usize,
    pub termination: Termination,
    pub shutdown: ShutdownReport,
}
