//! Analyze data flow use case

use tracing::{debug, info};

use crate::errors::Result;
use crate::features::data_flow::domain::DataFlowResult;
use crate::features::data_flow::ports::DataFlowAnalyzer;
use crate::features::program_model::domain::ProgramModel;

pub struct AnalyzeDataFlowUseCase<A: DataFlowAnalyzer> {
    analyzer: A,
}

impl<A: DataFlowAnalyzer> AnalyzeDataFlowUseCase<A> {
    pub fn new(analyzer: A) -> Self {
        Self { analyzer }
    }

    pub fn execute(&self, model: &ProgramModel) -> Result<DataFlowResult> {
        let result = self.analyzer.analyze(model)?;
        let stats = result.statistics();
        info!(
            definitions = stats.definitions,
            uses = stats.uses,
            pairs = stats.pairs,
            anomalies = stats.anomalies,
            "Data flow analyzed"
        );
        for anomaly in &result.anomalies {
            debug!(kind = anomaly.kind.as_str(), "{}", anomaly);
        }
        Ok(result)
    }
}
