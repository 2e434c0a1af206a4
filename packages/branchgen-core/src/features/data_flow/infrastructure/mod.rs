//! Heuristic data-flow analyzer and its stages
//!
//! Stages run in a fixed order: definitions, filtered uses, pairing,
//! anomalies, call graph. Each stage is a free function over the model so the
//! analyzer itself only wires them together.

mod analyzer;
mod anomalies;
mod call_graph;
mod def_use;
mod definitions;
mod reference_filter;
mod uses;

pub use analyzer::HeuristicDataFlowAnalyzer;
pub use reference_filter::VariableReferenceFilter;
