//! Call graph construction

use crate::features::data_flow::domain::CallGraph;
use crate::features::program_model::ProgramModel;

/// `Class.method` keys for members, bare names otherwise
pub(crate) fn build_call_graph(model: &ProgramModel) -> CallGraph {
    let mut graph = CallGraph::new();
    for call in &model.calls {
        let caller = match call.caller_id {
            Some(id) => model.function(id),
            None => call
                .caller
                .as_deref()
                .and_then(|name| model.function_named(name))
                .map(|(_, f)| f),
        };
        let key = match (caller, call.caller.as_deref()) {
            (Some(function), _) => match function.owner_simple_name() {
                Some(class) => format!("{}.{}", class, function.name),
                None => function.name.clone(),
            },
            (None, Some(name)) => name.to_string(),
            (None, None) => continue,
        };
        graph.add_call(key, call.callee.clone());
    }
    graph
}
