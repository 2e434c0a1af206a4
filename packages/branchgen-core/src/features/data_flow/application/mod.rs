//! Data flow application layer

mod analyze;

pub use analyze::AnalyzeDataFlowUseCase;
