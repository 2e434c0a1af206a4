//! JUnit 5 / Kotlin renderer

use std::fmt::Write as _;

use crate::features::emission::domain::TestSuite;
use crate::features::emission::ports::SuiteRenderer;
use crate::features::synthesis::domain::{
    Assertion, CallArgument, CallStep, CoverageGoal, Receiver, TestCase,
};
use crate::features::synthesis::infrastructure::unquote;

use super::kotlin_literals::{kotlin_literal, quote};

const FRAMEWORK_IMPORTS: &[&str] = &["org.junit.jupiter.api.Assertions.*", "org.junit.jupiter.api.Test"];
const SETUP_IMPORT: &str = "org.junit.jupiter.api.BeforeEach";
const INDENT: &str = "    ";

#[derive(Debug, Clone, Copy, Default)]
pub struct JUnitKotlinRenderer;

impl JUnitKotlinRenderer {
    pub fn new() -> Self {
        Self
    }

    fn imports(&self, suite: &TestSuite) -> Vec<String> {
        let mut imports: Vec<String> = suite.imports.clone();
        imports.extend(FRAMEWORK_IMPORTS.iter().map(|s| s.to_string()));
        if suite.setup.is_some() {
            imports.push(SETUP_IMPORT.to_string());
        }
        imports.sort();
        imports.dedup();
        imports
    }

    fn test(&self, out: &mut String, test: &TestCase) {
        let body = format!("{0}{0}", INDENT);
        let _ = writeln!(out, "{}@Test", INDENT);
        let _ = writeln!(out, "{}fun {}() {{", INDENT, test.name);

        if let Some(comment) = goal_comment(&test.goal) {
            let _ = writeln!(out, "{}// {}", body, comment);
        }
        for binding in &test.bindings {
            let _ = writeln!(
                out,
                "{}val {}: {} = {}",
                body,
                binding.name,
                binding.type_name,
                kotlin_literal(&binding.value)
            );
        }

        let call = call_expression(&test.call);
        if test.call.captures_result {
            let _ = writeln!(out, "{}val result = {}", body, call);
        } else {
            let _ = writeln!(out, "{}{}", body, call);
        }

        for assertion in &test.assertions {
            let _ = writeln!(out, "{}{}", body, assertion_statement(assertion));
        }
        let _ = writeln!(out, "{}}}", INDENT);
    }
}

impl SuiteRenderer for JUnitKotlinRenderer {
    fn render(&self, suite: &TestSuite) -> String {
        let mut out = String::new();
        if !suite.namespace.is_empty() {
            let _ = writeln!(out, "package {}\n", suite.namespace);
        }
        for import in self.imports(suite) {
            let _ = writeln!(out, "import {}", import);
        }
        let _ = writeln!(out, "\nclass {} {{", suite.name);

        if let Some(setup) = &suite.setup {
            let arguments: Vec<String> = setup.constructor_arguments.iter().map(kotlin_literal).collect();
            let _ = writeln!(out, "{}private lateinit var testInstance: {}\n", INDENT, setup.class_name);
            let _ = writeln!(out, "{}@BeforeEach", INDENT);
            let _ = writeln!(out, "{}fun setUp() {{", INDENT);
            let _ = writeln!(
                out,
                "{0}{0}testInstance = {1}({2})",
                INDENT,
                setup.class_name,
                arguments.join(", ")
            );
            let _ = writeln!(out, "{}}}", INDENT);
        }

        for (i, test) in suite.test_cases.iter().enumerate() {
            if i > 0 || suite.setup.is_some() {
                out.push('\n');
            }
            self.test(&mut out, test);
        }
        out.push_str("}\n");
        out
    }

    fn file_extension(&self) -> &str {
        "kt"
    }
}

fn goal_comment(goal: &CoverageGoal) -> Option<String> {
    match goal {
        CoverageGoal::Basic => None,
        CoverageGoal::Branch {
            condition, assignment, ..
        } => Some(format!(
            "Branch coverage: '{}' is {}",
            condition,
            if assignment.outcome { "TRUE" } else { "FALSE" }
        )),
        CoverageGoal::WhenEntry { literal, .. } => Some(format!("When entry coverage: '{}'", literal)),
        CoverageGoal::WhenElse { .. } => Some("When else coverage".to_string()),
    }
}

fn call_expression(call: &CallStep) -> String {
    let mut arguments = Vec::with_capacity(call.arguments.len());
    let mut after_variadic = false;
    for argument in &call.arguments {
        match argument {
            CallArgument::Inline(values) => {
                arguments.extend(values.iter().map(kotlin_literal));
                after_variadic = true;
            }
            // positional arguments cannot follow spread values
            CallArgument::Bound(name) if after_variadic => arguments.push(format!("{0} = {0}", name)),
            CallArgument::Bound(name) => arguments.push(name.clone()),
        }
    }
    let receiver = match &call.receiver {
        Receiver::None => String::new(),
        Receiver::Instance => "testInstance.".to_string(),
        Receiver::Object(name) => format!("{}.", name),
    };
    format!("{}{}({})", receiver, call.function, arguments.join(", "))
}

fn assertion_statement(assertion: &Assertion) -> String {
    match assertion {
        Assertion::NotNull => "assertNotNull(result)".to_string(),
        Assertion::CompletesWithoutError => "// Completed without throwing".to_string(),
        Assertion::Bound { op, value } => {
            let bound = kotlin_literal(value);
            format!(
                "assertTrue(result {0} {1}, \"Expected result {0} {1}\")",
                op.symbol(),
                bound
            )
        }
        Assertion::MatchesParameter { parameter, expected: true } => {
            format!("assertEquals({0}, result, \"Expected result to equal {0}\")", parameter)
        }
        Assertion::MatchesParameter { parameter, expected: false } => {
            format!("assertNotEquals({0}, result, \"Expected result to differ from {0}\")", parameter)
        }
        Assertion::Equals(value) => format!("assertEquals({}, result)", kotlin_literal(value)),
        Assertion::ContainsParameter { parameter, expected } => format!(
            "{}(result.contains({}.toString()))",
            if *expected { "assertTrue" } else { "assertFalse" },
            parameter
        ),
        Assertion::NotEmpty => "assertTrue(result.isNotEmpty(), \"Expected non-empty result\")".to_string(),
        Assertion::EmptyOrMentions(word) => {
            format!("assertTrue(result.isEmpty() || result.contains({}))", quote(word))
        }
        Assertion::IsBoolean(outcome) => format!("assertEquals({}, result)", outcome),
        Assertion::ContainsLiteral(literal) => {
            let bare = unquote(literal).unwrap_or(literal.as_str());
            let mut checks = vec![format!("result.contains({})", quote(bare))];
            if bare != literal.as_str() {
                checks.push(format!("result.contains({})", quote(literal)));
            }
            format!("assertTrue({})", checks.join(" || "))
        }
    }
}
