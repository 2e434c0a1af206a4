//! Analysis result

use serde::Serialize;

use super::anomaly::{AnomalyKind, DataFlowAnomaly};
use super::call_graph::CallGraph;
use super::definition::{DefId, Definition};
use super::usage::{Use, UseId};

/// Selected reaching definition of one use
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefUsePair {
    pub definition: DefId,
    pub usage: UseId,
    pub variable: String,
}

/// Everything the analyzer derived, kept next to the (unchanged) model
#[derive(Debug, Clone, Default, Serialize)]
pub struct DataFlowResult {
    pub definitions: Vec<Definition>,
    pub uses: Vec<Use>,
    pub pairs: Vec<DefUsePair>,
    pub anomalies: Vec<DataFlowAnomaly>,
    pub call_graph: CallGraph,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DataFlowStatistics {
    pub definitions: usize,
    pub uses: usize,
    pub pairs: usize,
    pub anomalies: usize,
    pub callers: usize,
}

impl DataFlowResult {
    pub fn definition(&self, id: DefId) -> Option<&Definition> {
        self.definitions.get(id.0)
    }

    pub fn usage(&self, id: UseId) -> Option<&Use> {
        self.uses.get(id.0)
    }

    pub fn anomalies_of(&self, kind: AnomalyKind) -> Vec<&DataFlowAnomaly> {
        self.anomalies.iter().filter(|a| a.kind == kind).collect()
    }

    /// Pairs whose variable is `name`
    pub fn pairs_for(&self, name: &str) -> Vec<&DefUsePair> {
        self.pairs.iter().filter(|p| p.variable == name).collect()
    }

    pub fn statistics(&self) -> DataFlowStatistics {
        DataFlowStatistics {
            definitions: self.definitions.len(),
            uses: self.uses.len(),
            pairs: self.pairs.len(),
            anomalies: self.anomalies.len(),
            callers: self.call_graph.caller_count(),
        }
    }
}
