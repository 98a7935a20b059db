// コンソール出力の具象実装

use crate::core::{EventReporter, ShutdownReport, TransformedItem};
use async_trait::async_trait;

/// Stage Bの出力行
pub fn format_transformed(item: &TransformedItem) -> String {
    format!("[{}] {}", item.timestamp, item.ciphertext)
}

/// Reporterの記録行
pub fn format_logged(item: &TransformedItem) -> String {
    format!("(logged) [{}] FROM_B: {}", item.timestamp, item.ciphertext)
}

/// 標準出力への報告実装
#[derive(Debug, Default, Clone)]
pub struct ConsoleEventReporter {
    quiet: bool,
}

impl ConsoleEventReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// ライフサイクル通知を抑止し、データ行のみ出力する
    pub fn quiet() -> Self {
        Self { quiet: true }
    }

    fn notice(&self, message: &str) {
        if !self.quiet {
            println!("{message}");
        }
    }
}

#[async_trait]
impl EventReporter for ConsoleEventReporter {
    async fn report_started(&self) {
        self.notice("Enter lines. Press Ctrl-C or Ctrl-D to finish.");
    }

    async fn report_transformed(&self, item: &TransformedItem) {
        println!("{}", format_transformed(item));
    }

    async fn report_logged(&self, item: &TransformedItem) {
        println!("{}", format_logged(item));
    }

    async fn report_end_of_input(&self) {
        self.notice("EOF received, sending termination sentinel to A...");
    }

    async fn report_interrupted(&self) {
        self.notice("\nInterrupt received, sending termination sentinel to A...");
    }

    async fn report_waiting(&self) {
        self.notice("Waiting for stages A and B to finish...");
    }

    // タイムアウトはcoordinator側でtracingに記録済み。コンソールには出さない
    async fn report_join_timeout(&self, _stage: &str) {}

    async fn report_shutdown_complete(&self, report: &ShutdownReport) {
        if !report.is_clean() {
            tracing::info!(?report, "shutdown finished with workers still running");
        }
        self.notice("Shutdown complete.");
    }
}

/// 何もしない報告実装（テスト・ベンチマーク用）
#[derive(Debug, Default, Clone)]
pub struct NoOpEventReporter;

impl NoOpEventReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventReporter for NoOpEventReporter {
    async fn report_started(&self) {}

    async fn report_transformed(&self, _item: &TransformedItem) {}

    async fn report_logged(&self, _item: &TransformedItem) {}

    async fn report_end_of_input(&self) {}

    async fn report_interrupted(&self) {}

    async fn report_waiting(&self) {}

    async fn report_join_timeout(&self, _stage: &str) {}

    async fn report_shutdown_complete(&self, _report: &ShutdownReport) {}
}
