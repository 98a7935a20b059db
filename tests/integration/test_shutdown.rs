// シャットダウンとSentinel伝播の統合テスト
use crate::fixtures::{RecordedEvent, RecordingEventReporter};
use std::sync::Arc;
use std::time::Duration;
use text_pipeline::{
    channel::channel,
    cipher::RotationCipher,
    core::{JoinStatus, ReporterExit, Termination, TransformedItem},
    engine::{
        batcher::spawn_batcher, reporter::spawn_reporter, transformer::spawn_transformer,
        ShutdownSignal, TextPipeline,
    },
    services::{DefaultPipelineConfig, NoOpEventReporter, VecLineSource},
};
use tokio::time::Instant;

const POLL: Duration = Duration::from_millis(500);

#[tokio::test(start_paused = true)]
async fn test_shutdown_is_bounded_with_full_buffer() {
    let interval = Duration::from_secs(5);
    let reporter = RecordingEventReporter::new();
    // joinのタイムアウトはバッチ間隔と同じ
    let pipeline = TextPipeline::new(DefaultPipelineConfig::new(interval), reporter.clone());

    let started = Instant::now();
    let mut source = VecLineSource::new(["one", "two", "three", "four", "five"]);
    let summary = pipeline
        .run(&mut source, std::future::pending::<()>())
        .await
        .unwrap();

    assert!(started.elapsed() <= interval * 3 + POLL);
    assert_eq!(summary.lines_ingested, 5);
    assert_eq!(summary.shutdown.batcher, JoinStatus::TimedOut);
    assert_eq!(summary.shutdown.reporter, JoinStatus::TimedOut);
    assert_eq!(summary.shutdown.logged, None);
    assert_eq!(
        reporter.count(&RecordedEvent::JoinTimeout("batcher".to_string())),
        1
    );
    assert_eq!(reporter.count(&RecordedEvent::ShutdownComplete), 1);
}

#[tokio::test(start_paused = true)]
async fn test_interrupt_takes_the_same_shutdown_path() {
    let reporter = RecordingEventReporter::new();
    let config = DefaultPipelineConfig::from_preset("testing").unwrap();
    let pipeline = TextPipeline::new(config, reporter.clone());

    let mut source = VecLineSource::new(["first", "second", "third", "fourth"])
        .with_delay(Duration::from_secs(1));
    let summary = pipeline
        .run(&mut source, tokio::time::sleep(Duration::from_millis(2500)))
        .await
        .unwrap();

    assert_eq!(summary.termination, Termination::Interrupted);
    assert_eq!(summary.lines_ingested, 2);
    assert_eq!(reporter.count(&RecordedEvent::Interrupted), 1);
    assert_eq!(reporter.count(&RecordedEvent::EndOfInput), 0);
    assert_eq!(reporter.logged(), ["svefg", "frpbaq"]);
    assert!(summary.shutdown.is_clean());
}

#[tokio::test(start_paused = true)]
async fn test_sentinel_crosses_every_stage_once() {
    let (ingest_tx, ingest_rx) = channel::<String>();
    let (batched_tx, batched_rx) = channel::<String>();
    let (result_tx, result_rx) = channel::<TransformedItem>();
    let sink = Arc::new(NoOpEventReporter::new());

    let batcher = spawn_batcher(ingest_rx, batched_tx, Duration::ZERO, POLL);
    let transformer =
        spawn_transformer(batched_rx, result_tx, RotationCipher::rot13(), sink.clone());
    let reporter = spawn_reporter(
        result_rx,
        ShutdownSignal::new(),
        transformer.abort_handle(),
        sink,
        POLL,
    );

    for line in ["a", "b", "c"] {
        ingest_tx.send_item(line.to_string());
    }
    ingest_tx.send_sentinel();

    let batcher_stats = batcher.await.unwrap();
    let transformer_stats = transformer.await.unwrap();
    let reporter_stats = reporter.await.unwrap();

    assert_eq!(batcher_stats.released, 3);
    assert!(batcher_stats.sentinel_forwarded);
    assert_eq!(transformer_stats.transformed, 3);
    assert!(transformer_stats.sentinel_forwarded);
    assert_eq!(reporter_stats.logged, 3);
    assert!(reporter_stats.sentinel_seen);
    assert_eq!(reporter_stats.exit, ReporterExit::Sentinel);
}

#[tokio::test(start_paused = true)]
async fn test_reporter_survives_lost_sentinel() {
    let (result_tx, result_rx) = channel::<TransformedItem>();
    let signal = ShutdownSignal::new();

    // Sentinelを送らずに終了するStage B相当のタスク
    let upstream_tx = Arc::new(result_tx);
    let producer_tx = Arc::clone(&upstream_tx);
    let upstream = tokio::spawn(async move {
        producer_tx.send_item(TransformedItem::new("2024-01-01 00:00:00", "ybfg"));
    });

    let reporter = spawn_reporter(
        result_rx,
        signal.clone(),
        upstream.abort_handle(),
        Arc::new(NoOpEventReporter::new()),
        POLL,
    );

    upstream.await.unwrap();
    tokio::time::sleep(POLL * 4).await;
    assert!(!reporter.is_finished());

    signal.trigger();
    let stats = reporter.await.unwrap();

    assert_eq!(stats.logged, 1);
    assert!(!stats.sentinel_seen);
    assert_eq!(stats.exit, ReporterExit::UpstreamGone);
    // 送信側はまだ生きている
    assert!(!upstream_tx.is_closed());
}
