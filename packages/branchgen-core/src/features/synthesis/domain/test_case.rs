//! Synthesized test case records
//!
//! A [`TestCase`] says what to set up, what to call and what to check. It
//! carries no target-syntax text; the emission stage owns rendering.

use serde::Serialize;

use super::condition::Assignment;
use super::literal::LiteralValue;
use crate::features::program_model::BranchId;

/// What a test exercises
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestTarget {
    /// Qualified class name; `None` for top-level functions
    pub declaration: Option<String>,
    pub function_qualified_name: String,
    pub function_name: String,
    pub file: String,
}

impl TestTarget {
    /// Grouping key: the class, or the function itself when top-level
    pub fn declaration_key(&self) -> &str {
        self.declaration
            .as_deref()
            .unwrap_or(&self.function_qualified_name)
    }
}

/// `val <name>: <type> = <value>` before the call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterBinding {
    pub name: String,
    pub type_name: String,
    pub value: LiteralValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CallArgument {
    /// Pass the bound parameter of this name
    Bound(String),
    /// Variadic values spelled at the call site
    Inline(Vec<LiteralValue>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Receiver {
    /// Top-level function
    None,
    /// The instance built by [`SharedSetup`]
    Instance,
    /// Singleton object, by simple name
    Object(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallStep {
    pub receiver: Receiver,
    pub function: String,
    pub arguments: Vec<CallArgument>,
    /// Keep the return value as `result`
    pub captures_result: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BoundOp {
    Gt,
    Ge,
    Lt,
    Le,
}

impl BoundOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BoundOp::Gt => ">",
            BoundOp::Ge => ">=",
            BoundOp::Lt => "<",
            BoundOp::Le => "<=",
        }
    }
}

/// Oracle checks against `result`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Assertion {
    NotNull,
    /// Void targets: reaching the end of the test is the check
    CompletesWithoutError,
    /// `result <op> <value>`
    Bound { op: BoundOp, value: LiteralValue },
    /// `result == <parameter>` (or `!=` when not expected)
    MatchesParameter { parameter: String, expected: bool },
    /// Exact simulated value
    Equals(LiteralValue),
    /// Textual result contains the parameter's value (or does not)
    ContainsParameter { parameter: String, expected: bool },
    NotEmpty,
    /// `result.contains("<word>") || result.isEmpty()`
    EmptyOrMentions(String),
    /// `result == <outcome>` for boolean returns
    IsBoolean(bool),
    /// Textual result names the literal, quoted or unquoted
    ContainsLiteral(String),
}

/// Instance construction shared by every test of a class suite
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharedSetup {
    pub class_name: String,
    pub qualified_name: String,
    pub constructor_arguments: Vec<LiteralValue>,
}

/// Which branch outcome a test is for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CoverageGoal {
    /// Pooled values, no particular branch
    Basic,
    Branch {
        branch: BranchId,
        condition: String,
        assignment: Assignment,
    },
    WhenEntry {
        when: BranchId,
        entry: BranchId,
        literal: String,
    },
    /// Subject value outside every entry; `entry` is the explicit `else` arm
    WhenElse {
        when: BranchId,
        entry: Option<BranchId>,
        value: LiteralValue,
    },
}

impl CoverageGoal {
    pub fn is_basic(&self) -> bool {
        matches!(self, CoverageGoal::Basic)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCase {
    pub target: TestTarget,
    pub name: String,
    pub bindings: Vec<ParameterBinding>,
    pub call: CallStep,
    pub assertions: Vec<Assertion>,
    pub setup: Option<SharedSetup>,
    /// Qualified symbols the test must import
    pub required_symbols: Vec<String>,
    pub goal: CoverageGoal,
}

impl TestCase {
    pub fn binding(&self, name: &str) -> Option<&LiteralValue> {
        self.bindings.iter().find(|b| b.name == name).map(|b| &b.value)
    }

    pub fn is_basic(&self) -> bool {
        self.goal.is_basic()
    }

    /// Inline variadic values of the call, if any
    pub fn inline_arguments(&self) -> Option<&[LiteralValue]> {
        self.call.arguments.iter().find_map(|a| match a {
            CallArgument::Inline(values) => Some(values.as_slice()),
            CallArgument::Bound(_) => None,
        })
    }
}
