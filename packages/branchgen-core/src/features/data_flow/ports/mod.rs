//! Data flow ports

mod analyzer;

pub use analyzer::DataFlowAnalyzer;
