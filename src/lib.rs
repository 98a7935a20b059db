pub mod channel;
pub mod cipher;
pub mod cli;
pub mod core;
pub mod engine;
pub mod services;

pub use crate::core::{
    EventReporter, LineSource, Message, PipelineConfig, PipelineError, PipelineResult,
    PipelineSummary, TransformedItem,
};
pub use engine::TextPipeline;
pub use services::{ConsoleEventReporter, DefaultPipelineConfig, NoOpEventReporter};
