// パイプラインのトレイト定義
// ステージ間の境界となる抽象化インターフェース

use super::types::{ShutdownReport, TransformedItem};
use async_trait::async_trait;
use mockall::automock;
use std::time::Duration;

/// パイプラインの設定を抽象化するトレイト
#[automock]
pub trait PipelineConfig: Send + Sync {
    /// Stage Aが1件を放出する最小間隔
    fn batch_interval(&self) -> Duration;

    /// 時間制限付き受信の待ち時間
    fn poll_interval(&self) -> Duration;

    /// Shutdown Coordinatorが各ワーカーを待つ時間
    fn join_timeout(&self) -> Duration;

    /// 回転暗号のシフト量
    fn cipher_shift(&self) -> u8;
}

impl PipelineConfig for Box<dyn PipelineConfig> {
    fn batch_interval(&self) -> Duration {
        self.as_ref().batch_interval()
    }

    fn poll_interval(&self) -> Duration {
        self.as_ref().poll_interval()
    }

    fn join_timeout(&self) -> Duration {
        self.as_ref().join_timeout()
    }

    fn cipher_shift(&self) -> u8 {
        self.as_ref().cipher_shift()
    }
}

/// コンソール出力とライフサイクル通知の抽象化トレイト
#[automock]
#[async_trait]
pub trait EventReporter: Send + Sync {
    /// 入力受付開始時のバナー
    async fn report_started(&self);

    /// Stage Bの出力
    async fn report_transformed(&self, item: &TransformedItem);

    /// Reporterによる記録
    async fn report_logged(&self, item: &TransformedItem);

    /// 入力終端を検出した
    async fn report_end_of_input(&self);

    /// 割り込みを受信した
    async fn report_interrupted(&self);

    /// ワーカーの終了待ち開始
    async fn report_waiting(&self);

    /// joinがタイムアウトした
    async fn report_join_timeout(&self, stage: &str);

    /// シャットダウン完了
    async fn report_shutdown_complete(&self, report: &ShutdownReport);
}

#[async_trait]
impl EventReporter for Box<dyn EventReporter> {
    async fn report_started(&self) {
        self.as_ref().report_started().await
    }

    async fn report_transformed(&self, item: &TransformedItem) {
        self.as_ref().report_transformed(item).await
    }

    async fn report_logged(&self, item: &TransformedItem) {
        self.as_ref().report_logged(item).await
    }

    async fn report_end_of_input(&self) {
        self.as_ref().report_end_of_input().await
    }

    async fn report_interrupted(&self) {
        self.as_ref().report_interrupted().await
    }

    async fn report_waiting(&self) {
        self.as_ref().report_waiting().await
    }

    async fn report_join_timeout(&self, stage: &str) {
        self.as_ref().report_join_timeout(stage).await
    }

    async fn report_shutdown_complete(&self, report: &ShutdownReport) {
        self.as_ref().report_shutdown_complete(report).await
    }
}

/// 1行ずつテキストを供給する入力源
#[automock]
#[async_trait]
pub trait LineSource: Send {
    /// 次の行を返す。入力終端では`None`
    async fn next_line(&mut self) -> std::io::Result<Option<String>>;
}

/// ワーカーの生存確認
#[automock]
pub trait Liveness: Send + Sync {
    fn is_alive(&self) -> bool;
}

impl Liveness for tokio::task::AbortHandle {
    fn is_alive(&self) -> bool {
        !self.is_finished()
    }
}
