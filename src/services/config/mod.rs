// 設定管理

pub mod implementations;

pub use implementations::DefaultPipelineConfig;
