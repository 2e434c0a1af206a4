//! Synthesis domain models

mod condition;
mod literal;
mod result;
mod test_case;

pub use condition::{Assignment, Combinator, Condition};
pub use literal::LiteralValue;
pub use result::{SynthesisResult, SynthesisStatistics};
pub use test_case::{
    Assertion, BoundOp, CallArgument, CallStep, CoverageGoal, ParameterBinding, Receiver,
    SharedSetup, TestCase, TestTarget,
};
