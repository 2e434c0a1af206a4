//! Data flow domain models

mod anomaly;
mod call_graph;
mod definition;
mod result;
mod usage;

pub use anomaly::{AnomalyKind, DataFlowAnomaly};
pub use call_graph::CallGraph;
pub use definition::{DefId, Definition, DefinitionKind};
pub use result::{DataFlowResult, DataFlowStatistics, DefUsePair};
pub use usage::{Use, UseId, UseKind};
