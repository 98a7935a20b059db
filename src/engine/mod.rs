// エンジン層 - ステージの並行実行とシャットダウンのオーケストレーション
// サービス層をトレイト経由で組み合わせる

pub mod api;
pub mod batcher;
pub mod ingestion;
mod pipeline;
pub mod reporter;
pub mod shutdown;
pub mod transformer;

// 公開API
pub use api::{create_default_pipeline, create_quiet_pipeline, run_lines};
pub use ingestion::IngestionOutcome;
pub use pipeline::TextPipeline;
pub use shutdown::{ShutdownCoordinator, ShutdownSignal, WorkerHandles};
