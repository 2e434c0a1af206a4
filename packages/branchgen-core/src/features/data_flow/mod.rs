//! Data Flow Feature
//!
//! Heuristic def-use analysis over the merged program model: definitions,
//! uses, def-use pairs, anomalies and the textual call graph.
//!
//! ## Structure
//! - `domain/` - Definition, Use, DefUsePair, DataFlowAnomaly, CallGraph
//! - `ports/` - DataFlowAnalyzer trait
//! - `application/` - AnalyzeDataFlowUseCase
//! - `infrastructure/` - HeuristicDataFlowAnalyzer and its stages

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// Re-exports
pub use application::AnalyzeDataFlowUseCase;
pub use domain::*;
pub use infrastructure::{HeuristicDataFlowAnalyzer, VariableReferenceFilter};
pub use ports::DataFlowAnalyzer;
