// 出力監視機能
// データ行の出力、ライフサイクル通知、シャットダウン完了通知

pub mod implementations;

// 公開API
pub use implementations::{
    format_logged, format_transformed, ConsoleEventReporter, NoOpEventReporter,
};
