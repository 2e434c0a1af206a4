//! Test synthesizer port (interface)

use crate::features::program_model::domain::ProgramModel;
use crate::features::synthesis::domain::SynthesisResult;

/// Synthesizer trait - turns an analyzed model into test cases
///
/// Recoverable problems come back as diagnostics in the result; there is no
/// failure mode.
pub trait TestSynthesizer: Send + Sync {
    fn synthesize(&self, model: &ProgramModel) -> SynthesisResult;
}
