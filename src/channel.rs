// ステージ間チャンネル
// 単一送信者・単一受信者、容量無制限、FIFO

use crate::core::Message;
use std::time::Duration;
use tokio::sync::mpsc;

/// 時間制限付き受信の結果
#[derive(Debug, PartialEq, Eq)]
pub enum Received<T> {
    Item(T),
    Sentinel,
    /// 待ち時間内に何も届かなかった
    Timeout,
    /// 送信側が破棄された
    Closed,
}

/// 送信側エンドポイント
#[derive(Debug)]
pub struct StageSender<T> {
    inner: mpsc::UnboundedSender<Message<T>>,
}

/// 受信側エンドポイント
#[derive(Debug)]
pub struct StageReceiver<T> {
    inner: mpsc::UnboundedReceiver<Message<T>>,
}

/// 新しいステージ間チャンネルを作成
pub fn channel<T>() -> (StageSender<T>, StageReceiver<T>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (StageSender { inner: tx }, StageReceiver { inner: rx })
}

impl<T> StageSender<T> {
    /// データを送信（ブロックしない）。受信側が既に終了していれば`false`
    pub fn send_item(&self, item: T) -> bool {
        self.inner.send(Message::Item(item)).is_ok()
    }

    /// 終端マーカーを送信（ブロックしない）
    pub fn send_sentinel(&self) -> bool {
        self.inner.send(Message::Sentinel).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }
}

impl<T> StageReceiver<T> {
    /// 最大`wait`だけ待って1件受信
    pub async fn recv_timeout(&mut self, wait: Duration) -> Received<T> {
        match tokio::time::timeout(wait, self.inner.recv()).await {
            Ok(Some(Message::Item(item))) => Received::Item(item),
            Ok(Some(Message::Sentinel)) => Received::Sentinel,
            Ok(None) => Received::Closed,
            Err(_) => Received::Timeout,
        }
    }

    /// 次のメッセージまで待機。送信側が破棄されると`None`
    pub async fn recv(&mut self) -> Option<Message<T>> {
        self.inner.recv().await
    }

    /// 既に届いているメッセージのみ取り出す（待機しない）
    pub fn try_recv(&mut self) -> Option<Message<T>> {
        self.inner.try_recv().ok()
    }
}
