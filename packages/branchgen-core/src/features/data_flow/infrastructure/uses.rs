//! Use collection
//!
//! Three sources in order: plain references, identifiers inside branch and
//! loop conditions, bare identifiers passed as call arguments. A reference
//! inside `if (x > 0)` is seen by the first two; `dedupe_uses` collapses it.

use lazy_static::lazy_static;
use regex::Regex;
use rustc_hash::FxHashSet;

use crate::config::AnalysisConfig;
use crate::features::data_flow::domain::{Use, UseId, UseKind};
use crate::features::program_model::{LineContext, LoopKind, ProgramModel};
use crate::shared::models::ScopeId;
use crate::shared::utils::{identifiers_in, is_identifier};

use super::reference_filter::VariableReferenceFilter;

lazy_static! {
    static ref INDEX_EXPR: Regex = Regex::new(r"\[([^\[\]]*)\]").expect("index pattern");
}

pub(crate) fn collect_uses(
    model: &ProgramModel,
    filter: &VariableReferenceFilter,
    config: &AnalysisConfig,
) -> Vec<Use> {
    let mut uses = Vec::new();

    for reference in &model.references {
        if !filter.accepts(&reference.name) {
            continue;
        }
        let Some(context) = model.line_context(&reference.file, reference.line) else {
            continue;
        };
        let kind = classify(model, context, &reference.name, config);
        uses.push(new_use(&reference.name, &reference.file, reference.line, &context.scope, kind));
    }

    let branch_conditions = model
        .branches
        .iter()
        .map(|b| (b.condition.as_str(), b.file.as_str(), b.line));
    let loop_conditions = model
        .loops
        .iter()
        .filter(|l| matches!(l.kind, LoopKind::While | LoopKind::DoWhile))
        .filter_map(|l| Some((l.condition.as_deref()?, l.file.as_str(), l.line)));

    for (condition, file, line) in branch_conditions.chain(loop_conditions) {
        let Some(scope) = scope_at(model, file, line) else {
            continue;
        };
        for name in identifiers_in(condition) {
            if filter.accepts(name) {
                uses.push(new_use(name, file, line, scope, UseKind::Condition));
            }
        }
    }

    for call in &model.calls {
        let Some(scope) = scope_at(model, &call.file, call.line) else {
            continue;
        };
        for argument in &call.arguments {
            let argument = argument.trim();
            if is_identifier(argument) && filter.accepts(argument) {
                uses.push(new_use(argument, &call.file, call.line, scope, UseKind::FunctionArg));
            }
        }
    }

    if config.dedupe_uses {
        let first: Vec<bool> = {
            let mut seen = FxHashSet::default();
            uses.iter().map(|u| seen.insert(u.location_key())).collect()
        };
        let mut first = first.into_iter();
        uses.retain(|_| first.next().unwrap_or(true));
    }

    for (i, u) in uses.iter_mut().enumerate() {
        u.id = UseId(i);
    }
    uses
}

/// First matching rule wins
fn classify(model: &ProgramModel, context: &LineContext, name: &str, config: &AnalysisConfig) -> UseKind {
    let passed_to_call = context
        .calls
        .iter()
        .filter_map(|&c| model.calls.get(c))
        .any(|call| call.mentions(name));

    if passed_to_call {
        UseKind::FunctionArg
    } else if context.header_mentions(name) {
        UseKind::Condition
    } else if context.is_return() {
        UseKind::Return
    } else if config.classify_array_index && inside_index(&context.code, name) {
        UseKind::ArrayIndex
    } else {
        UseKind::Computation
    }
}

fn inside_index(code: &str, name: &str) -> bool {
    INDEX_EXPR
        .captures_iter(code)
        .filter_map(|c| c.get(1))
        .any(|m| identifiers_in(m.as_str()).contains(&name))
}

fn scope_at<'m>(model: &'m ProgramModel, file: &str, line: u32) -> Option<&'m ScopeId> {
    model.line_context(file, line).map(|c| &c.scope)
}

fn new_use(variable: &str, file: &str, line: u32, scope: &ScopeId, kind: UseKind) -> Use {
    Use {
        id: UseId(0),
        variable: variable.to_string(),
        file: file.to_string(),
        line,
        scope: scope.clone(),
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::program_model::fixture::ModelFixture;
    use crate::features::program_model::BranchKind;

    const SOURCE: &str = "fun f(a: Int, xs: IntArray, i: Int): Int {
    if (a > 0) {
        log(a)
    }
    val b = xs[i] + a
    return b
}";

    fn model() -> ProgramModel {
        ModelFixture::new("A.kt", SOURCE)
            .scope(1, 7, ScopeId::function("f"))
            .function("f", None, (1, 7), &[("a", "Int"), ("xs", "IntArray"), ("i", "Int")], "Int")
            .variable("b", 5, Some("xs[i] + a"))
            .header(2, "if (a > 0)")
            .branch(BranchKind::If, "f", "a > 0", 2, None)
            .reference("a", 2)
            .call("log", Some("f"), &["a"], 3)
            .reference("a", 3)
            .reference("xs", 5)
            .reference("i", 5)
            .reference("a", 5)
            .reference("b", 6)
            .reference("log", 3)
            .build()
    }

    fn kinds(uses: &[Use]) -> Vec<(&str, u32, UseKind)> {
        uses.iter().map(|u| (u.variable.as_str(), u.line, u.kind)).collect()
    }

    #[test]
    fn test_reference_classification() {
        let config = AnalysisConfig::default();
        let model = model();
        let uses = collect_uses(&model, &VariableReferenceFilter::from_model(&model), &config);

        assert_eq!(
            kinds(&uses),
            vec![
                ("a", 2, UseKind::Condition),
                ("a", 3, UseKind::FunctionArg),
                ("xs", 5, UseKind::Computation),
                ("i", 5, UseKind::ArrayIndex),
                ("a", 5, UseKind::Computation),
                ("b", 6, UseKind::Return),
            ]
        );
        assert!(uses.iter().enumerate().all(|(i, u)| u.id == UseId(i)));
        assert!(uses.iter().all(|u| u.scope == ScopeId::function("f")));
    }

    #[test]
    fn test_duplicates_kept_without_dedupe() {
        // EDGE CASE: the condition reference and the condition scan both see `a`
        let config = AnalysisConfig::default().dedupe_uses(false);
        let model = model();
        let uses = collect_uses(&model, &VariableReferenceFilter::from_model(&model), &config);

        let at_condition = uses.iter().filter(|u| u.variable == "a" && u.line == 2).count();
        let at_call = uses.iter().filter(|u| u.variable == "a" && u.line == 3).count();
        assert_eq!(at_condition, 2);
        assert_eq!(at_call, 2);
        assert_eq!(uses.len(), 8);
    }

    #[test]
    fn test_array_index_can_be_disabled() {
        let config = AnalysisConfig::default().classify_array_index(false);
        let model = model();
        let uses = collect_uses(&model, &VariableReferenceFilter::from_model(&model), &config);
        let i = uses.iter().find(|u| u.variable == "i").unwrap();
        assert_eq!(i.kind, UseKind::Computation);
    }

    #[test]
    fn test_while_condition_identifiers() {
        let model = ModelFixture::new("W.kt", "fun g(n: Int) {\n  while (n > 0 && true) {}\n}")
            .scope(1, 3, ScopeId::function("g"))
            .function("g", None, (1, 3), &[("n", "Int")], "Unit")
            .while_loop("n > 0 && true", 2)
            .build();
        let uses = collect_uses(
            &model,
            &VariableReferenceFilter::from_model(&model),
            &AnalysisConfig::default(),
        );
        assert_eq!(kinds(&uses), vec![("n", 2, UseKind::Condition)]);
    }
}
