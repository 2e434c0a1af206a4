//! Branch-coverage test synthesizer
//!
//! Walks every callable function of the merged model and emits, in order:
//! one basic test, then for each `if` one test per chosen truth assignment,
//! and for each `when` one test per entry plus one else test.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::config::SynthesisConfig;
use crate::features::program_model::{
    BranchKind, ConditionalBranch, FunctionDecl, FunctionId, ProgramModel,
};
use crate::features::synthesis::domain::{
    Assertion, Assignment, CallStep, Condition, CoverageGoal, LiteralValue, Receiver, SharedSetup,
    SynthesisResult, TestCase, TestTarget,
};
use crate::features::synthesis::ports::TestSynthesizer;
use crate::shared::models::{Diagnostic, DiagnosticKind};
use crate::shared::utils::{split_top_level, SeededRandom};

use super::assertion_synthesizer::AssertionSynthesizer;
use super::atom_shape::{AtomShape, Operand};
use super::combinations::CombinationGenerator;
use super::decomposer::decompose;
use super::naming::{basic_test_name, branch_test_name, when_else_test_name, when_entry_test_name};
use super::value_pool::{neutral, TypeFamily};
use super::value_synthesizer::{Bindings, ValueSynthesizer};
use super::vararg_index::VarargIndex;

/// Symbol imported whenever a test builds a mock
pub const MOCK_SYMBOL: &str = "org.mockito.Mockito.mock";

#[derive(Debug, Clone, Default)]
pub struct BranchCoverageSynthesizer {
    config: SynthesisConfig,
}

impl BranchCoverageSynthesizer {
    pub fn new(config: SynthesisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Synthesize against a prebuilt vararg index
    pub fn synthesize_with(&self, model: &ProgramModel, varargs: &VarargIndex) -> SynthesisResult {
        let mut run = Run {
            model,
            config: &self.config,
            values: ValueSynthesizer::new(varargs),
            assertions: AssertionSynthesizer::new(self.config.oracle),
            combinations: CombinationGenerator::from_config(&self.config),
            rng: SeededRandom::new(self.config.seed),
            result: SynthesisResult::default(),
        };

        for (index, function) in model.functions.iter().enumerate() {
            if !function.is_callable_from_test() {
                debug!(function = %function.qualified_name, "Skipping function not callable from a test");
                continue;
            }
            let Some(frame) = Frame::of(model, function) else {
                debug!(function = %function.qualified_name, "Skipping function without a constructible receiver");
                continue;
            };
            run.function(&frame, index);
        }
        run.result
    }
}

impl TestSynthesizer for BranchCoverageSynthesizer {
    fn synthesize(&self, model: &ProgramModel) -> SynthesisResult {
        let varargs = VarargIndex::from_model(model);
        self.synthesize_with(model, &varargs)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Per-function frame
// ═══════════════════════════════════════════════════════════════════════════

/// How a test reaches one function
struct Frame<'m> {
    function: &'m FunctionDecl,
    target: TestTarget,
    receiver: Receiver,
    setup: Option<SharedSetup>,
    symbols: Vec<String>,
}

impl<'m> Frame<'m> {
    fn of(model: &'m ProgramModel, function: &'m FunctionDecl) -> Option<Self> {
        let (declaration, receiver, setup, symbol) = match &function.owner {
            None => (None, Receiver::None, None, function.qualified_name.clone()),
            Some(_) => {
                let class = model.class_of(function)?;
                let (receiver, setup) = if class.is_object() {
                    (Receiver::Object(class.name.clone()), None)
                } else if class.is_instantiable() {
                    let setup = SharedSetup {
                        class_name: class.name.clone(),
                        qualified_name: class.qualified_name.clone(),
                        constructor_arguments: class
                            .constructor
                            .iter()
                            .map(|p| neutral(&TypeFamily::of(&p.type_name)))
                            .collect(),
                    };
                    (Receiver::Instance, Some(setup))
                } else {
                    return None;
                };
                (
                    Some(class.qualified_name.clone()),
                    receiver,
                    setup,
                    class.qualified_name.clone(),
                )
            }
        };

        let mut symbols = Vec::new();
        if symbol.contains('.') {
            symbols.push(symbol);
        }
        if setup
            .iter()
            .flat_map(|s| &s.constructor_arguments)
            .any(LiteralValue::is_mock)
        {
            symbols.push(MOCK_SYMBOL.to_string());
        }

        Some(Self {
            function,
            target: TestTarget {
                declaration,
                function_qualified_name: function.qualified_name.clone(),
                function_name: function.name.clone(),
                file: function.file.clone(),
            },
            receiver,
            setup,
            symbols,
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// One synthesis run
// ═══════════════════════════════════════════════════════════════════════════

struct Run<'a> {
    model: &'a ProgramModel,
    config: &'a SynthesisConfig,
    values: ValueSynthesizer<'a>,
    assertions: AssertionSynthesizer,
    combinations: CombinationGenerator,
    rng: SeededRandom,
    result: SynthesisResult,
}

impl<'a> Run<'a> {
    fn function(&mut self, frame: &Frame<'_>, index: usize) {
        let function = frame.function;
        if self.config.basic_tests {
            let bindings = self.values.pooled(function, &mut self.rng);
            let assertions = self.assertions.for_basic(function);
            self.emit(frame, basic_test_name(&function.name), bindings, assertions, CoverageGoal::Basic);
        }

        let model = self.model;
        for branch in model.branches_of(FunctionId(index)) {
            match branch.kind {
                BranchKind::If => self.if_branch(frame, branch),
                BranchKind::When => self.when_branch(frame, branch),
                BranchKind::WhenEntry => {}
            }
        }
    }

    fn if_branch(&mut self, frame: &Frame<'_>, branch: &ConditionalBranch) {
        let function = frame.function;
        let atoms = decompose(&branch.condition);
        if atoms.is_empty() {
            return;
        }
        let combinations = self.combinations.generate(&atoms, &mut self.rng);
        for diagnostic in combinations.diagnostics {
            self.diagnose(diagnostic.in_file(branch.file.clone()).at_line(branch.line));
        }

        let primary = AtomShape::of(&atoms[0].text);
        for assignment in combinations.assignments {
            let bindings = self
                .values
                .satisfying(function, &[(atoms.as_slice(), &assignment)], &mut self.rng);
            let assertions = self.assertions.for_branch(
                function,
                Some(&primary),
                assignment.outcome,
                branch.body_value.as_deref(),
                &bindings,
            );
            let name = branch_test_name(&function.name, &branch.condition, assignment.outcome);
            let goal = CoverageGoal::Branch {
                branch: branch.id,
                condition: branch.condition.clone(),
                assignment,
            };
            self.emit(frame, name, bindings, assertions, goal);
        }
    }

    fn when_branch(&mut self, frame: &Frame<'_>, when: &ConditionalBranch) {
        let function = frame.function;
        let model = self.model;
        let entries = model.entries_of(when.id);
        let (literal_entries, catch_all): (Vec<&ConditionalBranch>, Vec<&ConditionalBranch>) =
            entries.into_iter().partition(|e| !e.is_catch_all);
        let catch_all = catch_all.first().copied();

        match when.subject() {
            Some(subject) => self.subject_when(frame, when, subject, &literal_entries, catch_all),
            None => self.subjectless_when(frame, when, &literal_entries, catch_all),
        }
        debug!(function = %function.name, when = %when.id, entries = literal_entries.len(), "Covered when");
    }

    /// `when (x) { 1 -> ..; 2, 3 -> ..; else -> .. }`
    fn subject_when(
        &mut self,
        frame: &Frame<'_>,
        when: &ConditionalBranch,
        subject: &str,
        entries: &[&ConditionalBranch],
        catch_all: Option<&ConditionalBranch>,
    ) {
        let function = frame.function;
        let parameter = function.parameter(subject).filter(|p| !p.is_variadic);
        let family = parameter.map(|p| TypeFamily::of(&p.type_name));

        for (i, entry) in entries.iter().enumerate() {
            let literal = first_literal(&entry.condition);
            let value = family.as_ref().and_then(|f| entry_value(&literal, f));
            let bindings = match value {
                Some(value) => {
                    // an earlier entry selecting the same value takes the call
                    let shadowed = UsedLiterals::of(&entries[..i]).may_select(&value);
                    let mut bindings = self.values.with_subject(function, Some(subject), value, &mut self.rng);
                    bindings.realized = !shadowed;
                    bindings
                }
                None => self.values.with_subject(function, None, LiteralValue::Null, &mut self.rng),
            };
            let assertions = self.assertions.for_when_entry(
                function,
                Some(&literal),
                entry.body_value.as_deref(),
                &bindings,
            );
            let goal = CoverageGoal::WhenEntry {
                when: when.id,
                entry: entry.id,
                literal,
            };
            self.emit(frame, when_entry_test_name(&function.name, &entry.condition), bindings, assertions, goal);
        }

        // the else test needs a value provably outside every entry
        let Some(family) = family else {
            return;
        };
        let used = UsedLiterals::of(entries);
        let Some(value) = self.else_value(&family, &used, when) else {
            return;
        };
        let mut bindings = self
            .values
            .with_subject(function, Some(subject), value.clone(), &mut self.rng);
        bindings.realized = !used.may_select(&value);
        let arm = catch_all.and_then(|e| e.body_value.as_deref());
        let assertions = self
            .assertions
            .for_when_entry(function, None, arm, &bindings);
        let goal = CoverageGoal::WhenElse {
            when: when.id,
            entry: catch_all.map(|e| e.id),
            value,
        };
        self.emit(frame, when_else_test_name(&function.name), bindings, assertions, goal);
    }

    /// `when { a > 0 -> ..; else -> .. }`: entries are conditions
    fn subjectless_when(
        &mut self,
        frame: &Frame<'_>,
        when: &ConditionalBranch,
        entries: &[&ConditionalBranch],
        catch_all: Option<&ConditionalBranch>,
    ) {
        let function = frame.function;
        let decomposed: Vec<(Vec<Condition>, Assignment, Assignment)> = entries
            .iter()
            .map(|e| {
                let atoms = decompose(&e.condition);
                let (on_true, on_false) = outcome_pair(&atoms);
                (atoms, on_true, on_false)
            })
            .collect();

        for (i, (entry, (atoms, on_true, _))) in entries.iter().zip(&decomposed).enumerate() {
            // the first entry that holds is taken, so every earlier one must fail
            let guards = decomposed[..i]
                .iter()
                .map(|(atoms, _, on_false)| (atoms.as_slice(), on_false));
            let target = (atoms.as_slice(), on_true);

            let target_first: Vec<(&[Condition], &Assignment)> =
                std::iter::once(target).chain(guards.clone()).collect();
            let mut bindings = self.values.satisfying(function, &target_first, &mut self.rng);
            if !bindings.realized && i > 0 {
                let guards_first: Vec<(&[Condition], &Assignment)> =
                    guards.chain(std::iter::once(target)).collect();
                let alternative = self.values.satisfying(function, &guards_first, &mut self.rng);
                if alternative.realized {
                    bindings = alternative;
                }
            }
            let assertions = self.assertions.for_when_entry(
                function,
                None,
                entry.body_value.as_deref(),
                &bindings,
            );
            let goal = CoverageGoal::WhenEntry {
                when: when.id,
                entry: entry.id,
                literal: entry.condition.clone(),
            };
            self.emit(frame, when_entry_test_name(&function.name, &entry.condition), bindings, assertions, goal);
        }

        if decomposed.is_empty() {
            return;
        }
        let constraints: Vec<(&[Condition], &Assignment)> = decomposed
            .iter()
            .map(|(atoms, _, on_false)| (atoms.as_slice(), on_false))
            .collect();
        let bindings = self.values.satisfying(function, &constraints, &mut self.rng);
        let arm = catch_all.and_then(|e| e.body_value.as_deref());
        let assertions = self
            .assertions
            .for_when_entry(function, None, arm, &bindings);
        let goal = CoverageGoal::WhenElse {
            when: when.id,
            entry: catch_all.map(|e| e.id),
            // every entry condition false
            value: LiteralValue::Bool(false),
        };
        self.emit(frame, when_else_test_name(&function.name), bindings, assertions, goal);
    }

    fn else_value(
        &mut self,
        family: &TypeFamily,
        used: &UsedLiterals,
        when: &ConditionalBranch,
    ) -> Option<LiteralValue> {
        let limit = self.config.uniqueness_retry_limit.max(1);
        let (min, max) = (self.config.else_int_min, self.config.else_int_max);
        let mut last = None;
        for _ in 0..limit {
            let candidate = match family.non_null() {
                f if f.is_integral() => {
                    let v = self.rng.range_i64(min, max);
                    let value = f.number(v)?;
                    if !used.contains_int(v) {
                        return Some(value);
                    }
                    value
                }
                TypeFamily::String => {
                    let text = format!("else_case_{}", self.rng.range_i64(0, 1_000_000));
                    let value = LiteralValue::str(text.as_str());
                    if !used.strings.contains(&text) {
                        return Some(value);
                    }
                    value
                }
                _ => return None,
            };
            last = Some(candidate);
        }

        self.diagnose(
            Diagnostic::new(
                DiagnosticKind::UniquenessRetryExhausted,
                format!("no unused else value for when on '{}' after {} attempts", when.condition, limit),
            )
            .in_file(when.file.clone())
            .at_line(when.line),
        );
        last
    }

    fn emit(
        &mut self,
        frame: &Frame<'_>,
        name: String,
        bindings: Bindings,
        assertions: Vec<Assertion>,
        goal: CoverageGoal,
    ) {
        let function = frame.function;
        let mut required_symbols = frame.symbols.clone();
        if bindings.uses_mock() && !required_symbols.iter().any(|s| s == MOCK_SYMBOL) {
            required_symbols.push(MOCK_SYMBOL.to_string());
        }
        let call = CallStep {
            receiver: frame.receiver.clone(),
            function: function.name.clone(),
            arguments: bindings.call_arguments(function),
            captures_result: !function.is_void(),
        };
        self.result.test_cases.push(TestCase {
            target: frame.target.clone(),
            name,
            bindings: bindings.values,
            call,
            assertions,
            setup: frame.setup.clone(),
            required_symbols,
            goal,
        });
    }

    fn diagnose(&mut self, diagnostic: Diagnostic) {
        self.result.diagnostics.push(diagnostic);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// When entry literals
// ═══════════════════════════════════════════════════════════════════════════

/// Constructive assignments making a condition hold and fail
fn outcome_pair(atoms: &[Condition]) -> (Assignment, Assignment) {
    let toward = |target: bool| Assignment {
        values: atoms.iter().map(|a| target ^ a.negated).collect(),
        outcome: target,
    };
    (toward(true), toward(false))
}

/// First comma-separated case of an entry
fn first_literal(condition: &str) -> String {
    split_top_level(condition, ',')
        .into_iter()
        .next()
        .unwrap_or_else(|| condition.trim().to_string())
}

/// Subject value selecting the case `literal`
fn entry_value(literal: &str, family: &TypeFamily) -> Option<LiteralValue> {
    let family = family.non_null();
    if let Some((low, _, _)) = range_case(literal) {
        return family.number(low);
    }
    if literal.starts_with("is ") || literal.starts_with("!is ") || literal.starts_with("!in ") {
        return None;
    }
    match Operand::parse(literal) {
        Some(Operand::Int(v)) | Some(Operand::Long(v)) => family.number(v),
        Some(Operand::Float(v)) => family.float(v),
        Some(Operand::Str(s)) => Some(LiteralValue::Str(s)),
        Some(Operand::Bool(b)) => Some(LiteralValue::Bool(b)),
        Some(Operand::Null) => Some(LiteralValue::Null),
        // constants and enum entries are spelled as written
        Some(Operand::Name(_)) | None => Some(LiteralValue::Verbatim(literal.to_string())),
    }
}

/// `in a..b`, `in a..<b`, `in a until b` as (low, high, inclusive)
fn range_case(literal: &str) -> Option<(i64, i64, bool)> {
    let range = literal.strip_prefix("in ")?.trim();
    let (low, high, inclusive) = if let Some((l, h)) = range.split_once("..<") {
        (l, h, false)
    } else if let Some((l, h)) = range.split_once("..") {
        (l, h, true)
    } else if let Some((l, h)) = range.split_once(" until ") {
        (l, h, false)
    } else {
        return None;
    };
    let bound = |text: &str| match Operand::parse(text) {
        Some(Operand::Int(v)) | Some(Operand::Long(v)) => Some(v),
        _ => None,
    };
    Some((bound(low)?, bound(high)?, inclusive))
}

/// Values the entries of one `when` already select
#[derive(Debug, Default)]
struct UsedLiterals {
    ints: FxHashSet<i64>,
    ranges: Vec<(i64, i64, bool)>,
    strings: FxHashSet<String>,
    /// `true`, `null` and constant names, as written
    names: FxHashSet<String>,
    /// Some case (`is T`, `in xs`, a float) matches values we cannot enumerate
    opaque: bool,
}

impl UsedLiterals {
    fn of(entries: &[&ConditionalBranch]) -> Self {
        let mut used = Self::default();
        for entry in entries {
            for case in split_top_level(&entry.condition, ',') {
                if let Some(range) = range_case(&case) {
                    used.ranges.push(range);
                    continue;
                }
                match Operand::parse(&case) {
                    Some(Operand::Int(v)) | Some(Operand::Long(v)) => {
                        used.ints.insert(v);
                    }
                    Some(Operand::Str(text)) => {
                        used.strings.insert(text);
                    }
                    Some(Operand::Bool(_) | Operand::Null | Operand::Name(_)) => {
                        used.names.insert(case.trim().to_string());
                    }
                    Some(Operand::Float(_)) | None => used.opaque = true,
                }
            }
        }
        used
    }

    /// Whether some entry may match `value`
    fn may_select(&self, value: &LiteralValue) -> bool {
        if self.opaque {
            return true;
        }
        match value {
            LiteralValue::Int(v) | LiteralValue::Long(v) => self.contains_int(*v),
            LiteralValue::Str(text) => self.strings.contains(text),
            LiteralValue::Bool(b) => self.names.contains(if *b { "true" } else { "false" }),
            LiteralValue::Null => self.names.contains("null"),
            LiteralValue::Verbatim(text) => self.names.contains(text),
            _ => true,
        }
    }

    fn contains_int(&self, value: i64) -> bool {
        self.ints.contains(&value)
            || self.ranges.iter().any(|&(low, high, inclusive)| {
                value >= low && (value < high || (inclusive && value == high))
            })
    }
}
