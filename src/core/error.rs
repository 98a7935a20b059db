// パイプライン用のカスタムエラー型定義
// 送受信の競合やjoinのタイムアウトはエラーではなく戻り値で表現する

use thiserror::Error;

/// パイプライン固有のエラー型
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("設定エラー: {message}")]
    ConfigurationError { message: String },

    #[error("入力エラー: {source}")]
    InputError {
        #[source]
        source: std::io::Error,
    },

    #[error("タスクエラー: {stage} - {source}")]
    TaskError {
        stage: String,
        #[source]
        source: tokio::task::JoinError,
    },

    #[error("サマリー出力エラー: {path} - {source}")]
    SummaryError {
        path: String,
        #[source]
        source: anyhow::Error,
    },
}

impl PipelineError {
    /// 設定エラーの作成
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    /// 入力エラーの作成
    pub fn input(source: std::io::Error) -> Self {
        Self::InputError { source }
    }

    /// タスクエラーの作成
    pub fn task(stage: impl Into<String>, source: tokio::task::JoinError) -> Self {
        Self::TaskError {
            stage: stage.into(),
            source,
        }
    }

    /// サマリー出力エラーの作成
    pub fn summary(path: impl Into<String>, source: anyhow::Error) -> Self {
        Self::SummaryError {
            path: path.into(),
            source,
        }
    }

    /// エラーの重要度を取得
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ConfigurationError { .. } => ErrorSeverity::High,
            Self::InputError { .. } => ErrorSeverity::Medium,
            Self::TaskError { .. } => ErrorSeverity::Medium,
            Self::SummaryError { .. } => ErrorSeverity::Low,
        }
    }

    /// シャットダウンを継続できるかどうか
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::ConfigurationError { .. } => false,
            Self::InputError { .. } | Self::TaskError { .. } | Self::SummaryError { .. } => true,
        }
    }
}

/// エラーの重要度レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// 低重要度 - ログ出力程度
    Low,
    /// 中重要度 - 警告レベル
    Medium,
    /// 高重要度 - 要対応
    High,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

/// パイプラインの結果型
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

impl From<std::io::Error> for PipelineError {
    fn from(error: std::io::Error) -> Self {
        PipelineError::InputError { source: error }
    }
}
