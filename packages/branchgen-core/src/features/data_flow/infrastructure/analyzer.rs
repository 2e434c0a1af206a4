//! Default data-flow analyzer

use tracing::debug;

use crate::config::AnalysisConfig;
use crate::errors::Result;
use crate::features::data_flow::domain::DataFlowResult;
use crate::features::data_flow::ports::DataFlowAnalyzer;
use crate::features::program_model::ProgramModel;

use super::anomalies::detect;
use super::call_graph::build_call_graph;
use super::def_use::link;
use super::definitions::collect_definitions;
use super::reference_filter::VariableReferenceFilter;
use super::uses::collect_uses;

/// Textual def-use analysis; see the stage modules for the rules
#[derive(Debug, Clone, Default)]
pub struct HeuristicDataFlowAnalyzer {
    config: AnalysisConfig,
}

impl HeuristicDataFlowAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }
}

impl DataFlowAnalyzer for HeuristicDataFlowAnalyzer {
    fn analyze(&self, model: &ProgramModel) -> Result<DataFlowResult> {
        let filter = VariableReferenceFilter::from_model(model);
        let definitions = collect_definitions(model);
        let uses = collect_uses(model, &filter, &self.config);
        debug!(
            known_names = filter.len(),
            definitions = definitions.len(),
            uses = uses.len(),
            "Collected definitions and uses"
        );

        let linkage = link(&definitions, &uses);
        let anomalies = detect(model, &definitions, &uses, &linkage.pairs, &linkage.unreached);
        let call_graph = build_call_graph(model);

        Ok(DataFlowResult {
            definitions,
            uses,
            pairs: linkage.pairs,
            anomalies,
            call_graph,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::data_flow::domain::{AnomalyKind, DefinitionKind, UseKind};
    use crate::features::program_model::fixture::ModelFixture;
    use crate::features::program_model::BranchKind;
    use crate::shared::models::ScopeId;

    const CLASS_SOURCE: &str = "package demo

class C {
    fun f() {
        val x = 1
        val unused = 2
        println(x)
    }
}";

    fn class_model() -> ProgramModel {
        let scope = ScopeId::method("demo.C", "f");
        ModelFixture::new("C.kt", CLASS_SOURCE)
            .with_package("demo")
            .scope(3, 9, ScopeId::class("demo.C"))
            .scope(4, 8, scope)
            .class("C", "demo.C", (3, 9))
            .function("f", Some("demo.C"), (4, 8), &[], "Unit")
            .variable("x", 5, Some("1"))
            .variable("unused", 6, Some("2"))
            .call("println", Some("f"), &["x"], 7)
            .reference("println", 7)
            .reference("x", 7)
            .build()
    }

    #[test]
    fn test_single_pair_and_unused_definition() {
        let result = HeuristicDataFlowAnalyzer::default()
            .analyze(&class_model())
            .unwrap();

        let pairs = result.pairs_for("x");
        assert_eq!(pairs.len(), 1);
        let def = result.definition(pairs[0].definition).unwrap();
        let usage = result.usage(pairs[0].usage).unwrap();
        assert_eq!((def.line, usage.line), (5, 7));
        assert_eq!(def.scope, ScopeId::method("demo.C", "f"));
        assert_eq!(usage.kind, UseKind::FunctionArg);

        let unused = result.anomalies_of(AnomalyKind::UnusedDefinition);
        assert_eq!(unused.len(), 1);
        assert_eq!(unused[0].variable, "unused");
        assert_eq!(unused[0].line, 6);
        assert_eq!(result.anomalies.len(), 1);
        assert_eq!(result.call_graph.callees("C.f"), &["println"]);
    }

    const CONDITION_SOURCE: &str = "fun check(limit: Int): Boolean {
    if (limit > 10) {
        return true
    }
    return false
}";

    fn condition_model() -> ProgramModel {
        ModelFixture::new("Check.kt", CONDITION_SOURCE)
            .scope(1, 6, ScopeId::function("check"))
            .function("check", None, (1, 6), &[("limit", "Int")], "Boolean")
            .header(2, "if (limit > 10)")
            .branch(BranchKind::If, "check", "limit > 10", 2, Some("true"))
            .reference("limit", 2)
            .build()
    }

    #[test]
    fn test_condition_use_with_dedupe() {
        let analyzer = HeuristicDataFlowAnalyzer::new(AnalysisConfig::default());
        let result = analyzer.analyze(&condition_model()).unwrap();

        assert_eq!(result.uses.len(), 1);
        assert_eq!(result.pairs.len(), 1);
        assert!(result.anomalies_of(AnomalyKind::RedundantDefinition).is_empty());
        assert_eq!(
            result.definitions[0].kind,
            DefinitionKind::Parameter
        );
    }

    #[test]
    fn test_condition_use_without_dedupe() {
        // EDGE CASE: the double-counted condition use reads as two definitions
        let analyzer = HeuristicDataFlowAnalyzer::new(AnalysisConfig::default().dedupe_uses(false));
        let result = analyzer.analyze(&condition_model()).unwrap();

        assert_eq!(result.uses.len(), 2);
        assert_eq!(result.pairs.len(), 2);
        let redundant = result.anomalies_of(AnomalyKind::RedundantDefinition);
        assert_eq!(redundant.len(), 1);
        assert_eq!(
            redundant[0].description,
            "Variable 'limit' has 2 definitions before this use"
        );
    }

    #[test]
    fn test_undefined_and_uninitialized() {
        let source = "fun g(): Int {\n    val late: Int\n    late = 3\n    return late + ghost\n}";
        let scope = ScopeId::function("g");
        // `ghost` is declared below its use
        let model = ModelFixture::new("G.kt", source)
            .scope(1, 5, scope)
            .function("g", None, (1, 5), &[], "Int")
            .variable("late", 2, None)
            .variable("ghost", 9, Some("0"))
            .reference("late", 4)
            .reference("ghost", 4)
            .build();

        let result = HeuristicDataFlowAnalyzer::default().analyze(&model).unwrap();
        let undefined = result.anomalies_of(AnomalyKind::UndefinedUse);
        assert_eq!(undefined.len(), 1);
        assert_eq!(undefined[0].variable, "ghost");

        let uninitialized = result.anomalies_of(AnomalyKind::UninitializedUse);
        assert_eq!(uninitialized.len(), 1);
        assert_eq!(uninitialized[0].variable, "late");
        assert_eq!(uninitialized[0].line, 4);
    }

    #[test]
    fn test_empty_model() {
        let result = HeuristicDataFlowAnalyzer::default()
            .analyze(&ProgramModel::new())
            .unwrap();
        assert_eq!(result.statistics(), Default::default());
    }
}
