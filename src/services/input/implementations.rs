// 入力源の具象実装

use crate::core::LineSource;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::io::BufRead;
use std::time::Duration;
use tokio::sync::mpsc;

/// 標準入力から1行ずつ読む
///
/// 読み取りは専用スレッドで行う。割り込みで終了する際に
/// ブロック中の読み取りがランタイム停止を妨げないよう、スレッドはjoinしない。
pub struct StdinLineSource {
    lines: mpsc::UnboundedReceiver<std::io::Result<String>>,
}

impl StdinLineSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        std::thread::spawn(move || {
            // 末尾の改行 ("\n" / "\r\n") は取り除かれる
            for line in std::io::stdin().lock().lines() {
                let failed = line.is_err();
                if tx.send(line).is_err() || failed {
                    break;
                }
            }
        });
        Self { lines: rx }
    }
}

impl Default for StdinLineSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LineSource for StdinLineSource {
    async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        match self.lines.recv().await {
            Some(Ok(line)) => Ok(Some(line)),
            Some(Err(error)) => Err(error),
            None => Ok(None),
        }
    }
}

/// 事前に用意した行を順に返す入力源
#[derive(Debug, Clone, Default)]
pub struct VecLineSource {
    lines: VecDeque<String>,
    delay: Duration,
}

impl VecLineSource {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            delay: Duration::ZERO,
        }
    }

    /// 各行を返す前に待機する
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

#[async_trait]
impl LineSource for VecLineSource {
    async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.lines.pop_front())
    }
}
