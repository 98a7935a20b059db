// エンドツーエンド統合テスト
use crate::fixtures::{RecordedEvent, RecordingEventReporter};
use std::time::Duration;
use text_pipeline::{
    cipher::rot13,
    core::{JoinStatus, Termination},
    engine::{run_lines, TextPipeline},
    services::{DefaultPipelineConfig, VecLineSource},
};

/// 間隔なし・joinは十分に待つ設定
fn immediate_config() -> DefaultPipelineConfig {
    DefaultPipelineConfig::default()
        .with_batch_interval(Duration::ZERO)
        .with_join_timeout(Duration::from_secs(5))
}

#[tokio::test(start_paused = true)]
async fn test_single_line_is_transformed_and_logged() {
    let reporter = RecordingEventReporter::new();
    let pipeline = TextPipeline::new(immediate_config(), reporter.clone());

    let summary = run_lines(&pipeline, ["Hello"]).await.unwrap();

    // Stage Aで小文字化されてからROT13がかかる
    assert_eq!(reporter.transformed(), ["uryyb"]);
    assert_eq!(reporter.logged(), ["uryyb"]);
    assert_eq!(summary.lines_ingested, 1);
    assert_eq!(summary.shutdown.logged, Some(1));

    let lines = reporter.console_lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with('[') && lines[0].ends_with("] uryyb"));
    assert!(lines[1].starts_with("(logged) [") && lines[1].ends_with("] FROM_B: uryyb"));
    // "[YYYY-MM-DD HH:MM:SS] " の長さ
    assert_eq!(lines[0].len(), "[2024-01-01 00:00:00] uryyb".len());
}

#[tokio::test(start_paused = true)]
async fn test_zero_interval_with_default_join_timeout() {
    let reporter = RecordingEventReporter::new();
    let pipeline = TextPipeline::new(DefaultPipelineConfig::new(Duration::ZERO), reporter.clone());

    let summary = run_lines(&pipeline, ["Hello"]).await.unwrap();

    assert_eq!(reporter.transformed(), ["uryyb"]);
    assert_eq!(reporter.logged(), ["uryyb"]);
    assert!(summary.shutdown.is_clean());
    assert_eq!(summary.shutdown.logged, Some(1));
}

#[tokio::test(start_paused = true)]
async fn test_lines_are_released_in_order_one_per_interval() {
    let interval = Duration::from_secs(5);
    let reporter = RecordingEventReporter::new();
    let config = DefaultPipelineConfig::default()
        .with_batch_interval(interval)
        .with_join_timeout(Duration::from_secs(60));
    let pipeline = TextPipeline::new(config, reporter.clone());

    let summary = run_lines(&pipeline, ["A", "B", "C"]).await.unwrap();

    let emitted = reporter.transformed_with_times();
    let ciphertexts: Vec<&str> = emitted.iter().map(|(_, text)| text.as_str()).collect();
    assert_eq!(ciphertexts, ["n", "o", "p"]);
    for pair in emitted.windows(2) {
        assert!(pair[1].0.duration_since(pair[0].0) >= interval);
    }

    assert_eq!(reporter.logged(), ["n", "o", "p"]);
    assert!(summary.shutdown.is_clean());
}

#[tokio::test(start_paused = true)]
async fn test_immediate_end_of_input() {
    let reporter = RecordingEventReporter::new();
    let pipeline = TextPipeline::new(DefaultPipelineConfig::default(), reporter.clone());

    let summary = run_lines(&pipeline, Vec::<String>::new()).await.unwrap();

    assert_eq!(summary.lines_ingested, 0);
    assert_eq!(summary.termination, Termination::EndOfInput);
    assert!(reporter.console_lines().is_empty());
    assert_eq!(reporter.count(&RecordedEvent::ShutdownComplete), 1);
    assert_eq!(summary.shutdown.batcher, JoinStatus::Finished);
}

#[tokio::test(start_paused = true)]
async fn test_non_alphabetic_input_is_unchanged() {
    let reporter = RecordingEventReporter::new();
    let pipeline = TextPipeline::new(immediate_config(), reporter.clone());

    run_lines(&pipeline, ["123!", ""]).await.unwrap();

    assert_eq!(reporter.transformed(), ["123!", ""]);
    assert_eq!(reporter.logged(), ["123!", ""]);
}

#[tokio::test(start_paused = true)]
async fn test_every_line_is_logged_in_input_order() {
    let inputs: Vec<String> = (0..25).map(|i| format!("Line {i}: The Quick Fox")).collect();
    let expected: Vec<String> = inputs.iter().map(|line| rot13(&line.to_lowercase())).collect();

    let reporter = RecordingEventReporter::new();
    let config = DefaultPipelineConfig::default()
        .with_batch_interval(Duration::from_millis(100))
        .with_poll_interval(Duration::from_millis(50))
        .with_join_timeout(Duration::from_secs(30));
    let pipeline = TextPipeline::new(config, reporter.clone());

    let mut source = VecLineSource::new(inputs.clone()).with_delay(Duration::from_millis(30));
    let summary = pipeline
        .run(&mut source, std::future::pending::<()>())
        .await
        .unwrap();

    assert_eq!(summary.lines_ingested, inputs.len());
    assert_eq!(reporter.logged(), expected);
    assert_eq!(summary.shutdown.logged, Some(inputs.len()));
}

#[tokio::test(start_paused = true)]
async fn test_lifecycle_notices_are_ordered() {
    let reporter = RecordingEventReporter::new();
    let pipeline = TextPipeline::new(immediate_config(), reporter.clone());

    run_lines(&pipeline, ["x"]).await.unwrap();

    let lifecycle: Vec<RecordedEvent> = reporter
        .events()
        .into_iter()
        .filter(|event| {
            !matches!(
                event,
                RecordedEvent::Transformed(_) | RecordedEvent::Logged(_)
            )
        })
        .collect();
    assert_eq!(
        lifecycle,
        [
            RecordedEvent::Started,
            RecordedEvent::EndOfInput,
            RecordedEvent::Waiting,
            RecordedEvent::ShutdownComplete,
        ]
    );
}
