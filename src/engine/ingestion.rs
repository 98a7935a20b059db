// Ingestion - 入力行をStage Aへ送る単発のプロデューサー

use crate::channel::StageSender;
use crate::core::{EventReporter, LineSource, PipelineError, Termination};
use std::future::Future;

/// Ingestionの結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestionOutcome {
    /// Stage Aへ受け渡した行数
    pub lines: usize,
    pub termination: Termination,
}

/// 入力終端または割り込みまで行を転送し、最後にSentinelを1つ送る
///
/// 読み取りエラーは入力終端として扱う。送信失敗は下流が既に終了している
/// ことを意味するため無視する。
pub async fn run_ingestion<S, R, F>(
    source: &mut S,
    outbound: &StageSender<String>,
    interrupt: F,
    reporter: &R,
) -> IngestionOutcome
where
    S: LineSource + ?Sized,
    R: EventReporter + ?Sized,
    F: Future<Output = ()>,
{
    tokio::pin!(interrupt);
    let mut lines = 0;

    let termination = loop {
        tokio::select! {
            biased;

            _ = &mut interrupt => {
                reporter.report_interrupted().await;
                break Termination::Interrupted;
            }
            next = source.next_line() => match next {
                Ok(Some(line)) => {
                    if outbound.send_item(line) {
                        lines += 1;
                    } else {
                        tracing::debug!("batcher is gone, dropping input line");
                    }
                }
                Ok(None) => {
                    reporter.report_end_of_input().await;
                    break Termination::EndOfInput;
                }
                Err(error) => {
                    let error = PipelineError::input(error);
                    tracing::warn!(%error, "failed to read input, treating as end of input");
                    reporter.report_end_of_input().await;
                    break Termination::EndOfInput;
                }
            },
        }
    };

    if !outbound.send_sentinel() {
        tracing::debug!(?termination, "sentinel not delivered, batcher already stopped");
    }
    tracing::info!(lines, ?termination, "ingestion finished");

    IngestionOutcome { lines, termination }
}
