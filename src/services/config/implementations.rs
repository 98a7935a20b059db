// 設定管理の具象実装

use crate::cipher::ROT13_SHIFT;
use crate::core::{PipelineConfig, PipelineError, PipelineResult};
use std::time::Duration;

const DEFAULT_BATCH_INTERVAL: Duration = Duration::from_secs(5);
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);
// これを超える間隔はInstantの加算が溢れうる
const MAX_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// デフォルト設定実装
#[derive(Debug, Clone)]
pub struct DefaultPipelineConfig {
    batch_interval: Duration,
    poll_interval: Duration,
    // 未指定ならbatch_intervalに追従。いずれにせよpoll_intervalを下回らない
    join_timeout: Option<Duration>,
    cipher_shift: u8,
}

impl DefaultPipelineConfig {
    pub fn new(batch_interval: Duration) -> Self {
        Self {
            batch_interval,
            ..Self::default()
        }
    }

    /// 名前付きプリセットから作成
    ///
    /// - `default`: 5秒間隔、0.5秒ポーリング
    /// - `fast`: 1秒間隔、0.1秒ポーリング
    /// - `testing`: 間隔なし、10msポーリング、joinは2秒待つ
    pub fn from_preset(name: &str) -> PipelineResult<Self> {
        match name {
            "default" => Ok(Self::default()),
            "fast" => Ok(Self::default()
                .with_batch_interval(Duration::from_secs(1))
                .with_poll_interval(Duration::from_millis(100))),
            "testing" => Ok(Self::default()
                .with_batch_interval(Duration::ZERO)
                .with_poll_interval(Duration::from_millis(10))
                .with_join_timeout(Duration::from_secs(2))),
            other => Err(PipelineError::configuration(format!(
                "不明なプリセット: {other} (default, fast, testing のいずれか)"
            ))),
        }
    }

    pub fn with_batch_interval(mut self, batch_interval: Duration) -> Self {
        self.batch_interval = batch_interval;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_join_timeout(mut self, join_timeout: Duration) -> Self {
        self.join_timeout = Some(join_timeout);
        self
    }

    pub fn with_cipher_shift(mut self, cipher_shift: u8) -> Self {
        self.cipher_shift = cipher_shift;
        self
    }

    /// 設定値の検証
    pub fn validate(&self) -> PipelineResult<()> {
        if self.poll_interval.is_zero() {
            return Err(PipelineError::configuration(
                "ポーリング間隔は0より大きい必要があります",
            ));
        }
        for (name, value) in [
            ("バッチ間隔", self.batch_interval),
            ("ポーリング間隔", self.poll_interval),
            ("joinタイムアウト", self.join_timeout()),
        ] {
            if value > MAX_INTERVAL {
                return Err(PipelineError::configuration(format!(
                    "{name}が長すぎます: {value:?} (上限 {MAX_INTERVAL:?})"
                )));
            }
        }
        if !(1..=25).contains(&self.cipher_shift) {
            return Err(PipelineError::configuration(format!(
                "シフト量は1から25の範囲で指定してください: {}",
                self.cipher_shift
            )));
        }
        Ok(())
    }
}

impl Default for DefaultPipelineConfig {
    fn default() -> Self {
        Self {
            batch_interval: DEFAULT_BATCH_INTERVAL,
            poll_interval: DEFAULT_POLL_INTERVAL,
            join_timeout: None,
            cipher_shift: ROT13_SHIFT,
        }
    }
}

impl PipelineConfig for DefaultPipelineConfig {
    fn batch_interval(&self) -> Duration {
        self.batch_interval
    }

    fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    fn join_timeout(&self) -> Duration {
        self.join_timeout
            .unwrap_or(self.batch_interval)
            .max(self.poll_interval)
    }

    fn cipher_shift(&self) -> u8 {
        self.cipher_shift
    }
}
