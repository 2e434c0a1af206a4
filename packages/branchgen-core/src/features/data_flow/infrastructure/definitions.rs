//! Definition collection

use crate::features::data_flow::domain::{DefId, Definition, DefinitionKind};
use crate::features::program_model::{LoopKind, ProgramModel};

use super::reference_filter::loop_variable_names;

/// Variables, then function parameters, then for-loop variables
pub(crate) fn collect_definitions(model: &ProgramModel) -> Vec<Definition> {
    let mut definitions = Vec::new();
    let mut push = |variable: &str, file: &str, line, scope, kind, origin| {
        definitions.push(Definition {
            id: DefId(definitions.len()),
            variable: variable.to_string(),
            file: file.to_string(),
            line,
            scope,
            kind,
            origin,
        });
    };

    for (index, variable) in model.variables.iter().enumerate() {
        let kind = if variable.is_parameter {
            DefinitionKind::Parameter
        } else {
            DefinitionKind::Declaration
        };
        push(
            &variable.name,
            &variable.file,
            variable.line,
            variable.scope.clone(),
            kind,
            Some(index),
        );
    }

    for function in &model.functions {
        for parameter in &function.parameters {
            push(
                &parameter.name,
                &function.file,
                function.line(),
                function.scope.clone(),
                DefinitionKind::Parameter,
                None,
            );
        }
    }

    for lp in model.loops.iter().filter(|l| l.kind == LoopKind::For) {
        let Some(variable) = lp.variable.as_deref() else {
            continue;
        };
        let scope = model
            .line_context(&lp.file, lp.line)
            .map(|c| c.scope.clone())
            .unwrap_or_else(|| lp.scope.clone());
        for name in loop_variable_names(variable) {
            push(
                name,
                &lp.file,
                lp.line,
                scope.clone(),
                DefinitionKind::LoopVariable,
                None,
            );
        }
    }

    definitions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::program_model::fixture::ModelFixture;
    use crate::shared::models::ScopeId;

    #[test]
    fn test_definition_sources_in_order() {
        let scope = ScopeId::method("demo.C", "f");
        let model = ModelFixture::new("C.kt", "class C {\nfun f(n: Int) {\nval total = 0\nfor (i in 0..n) {}\n}\n}")
            .scope(2, 5, scope.clone())
            .function("f", Some("demo.C"), (2, 5), &[("n", "Int")], "Unit")
            .variable("total", 3, Some("0"))
            .for_loop("i", "0..n", 4)
            .build();

        let defs = collect_definitions(&model);
        let summary: Vec<_> = defs
            .iter()
            .map(|d| (d.variable.as_str(), d.line, d.kind))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("total", 3, DefinitionKind::Declaration),
                ("n", 2, DefinitionKind::Parameter),
                ("i", 4, DefinitionKind::LoopVariable),
            ]
        );
        assert!(defs.iter().all(|d| d.scope == scope));
        assert_eq!(defs[0].origin, Some(0));
        assert_eq!(defs[2].id, DefId(2));
    }
}
