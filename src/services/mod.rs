// サービス層 - 機能別の具象実装
// 各サービスは特定の責任を持ち、engine層からはトレイト経由で使われる

pub mod config;
pub mod input;
pub mod monitoring;

// 公開API
pub use config::DefaultPipelineConfig;
pub use input::{StdinLineSource, VecLineSource};
pub use monitoring::{ConsoleEventReporter, NoOpEventReporter};
