//! Data flow analyzer port (interface)

use crate::errors::Result;
use crate::features::data_flow::domain::DataFlowResult;
use crate::features::program_model::domain::ProgramModel;

/// Analyzer trait - derives def-use facts from a merged program model
pub trait DataFlowAnalyzer: Send + Sync {
    fn analyze(&self, model: &ProgramModel) -> Result<DataFlowResult>;
}
