//! Anomaly detection over the linked pairs

use rustc_hash::{FxHashMap, FxHashSet};

use crate::features::data_flow::domain::{
    DataFlowAnomaly, DefUsePair, Definition, DefinitionKind, Use, UseId,
};
use crate::features::program_model::ProgramModel;

pub(crate) fn detect(
    model: &ProgramModel,
    definitions: &[Definition],
    uses: &[Use],
    pairs: &[DefUsePair],
    unreached: &[UseId],
) -> Vec<DataFlowAnomaly> {
    let mut anomalies = Vec::new();

    for usage in unreached.iter().filter_map(|id| uses.get(id.0)) {
        anomalies.push(DataFlowAnomaly::undefined_use(
            &usage.variable,
            &usage.file,
            usage.line,
        ));
    }

    // compared by value: identical records are selected together
    let selected: FxHashSet<_> = pairs
        .iter()
        .filter_map(|p| definitions.get(p.definition.0))
        .map(Definition::key)
        .collect();
    for def in definitions {
        if !selected.contains(&def.key()) {
            anomalies.push(DataFlowAnomaly::unused_definition(
                &def.variable,
                &def.file,
                def.line,
            ));
        }
    }

    let mut per_use: FxHashMap<_, (usize, &Use)> = FxHashMap::default();
    let mut order = Vec::new();
    for usage in pairs.iter().filter_map(|p| uses.get(p.usage.0)) {
        let entry = per_use.entry(usage.key()).or_insert_with(|| {
            order.push(usage.key());
            (0, usage)
        });
        entry.0 += 1;
    }
    for key in order {
        if let Some(&(count, usage)) = per_use.get(&key) {
            if count > 1 {
                anomalies.push(DataFlowAnomaly::redundant_definition(
                    &usage.variable,
                    &usage.file,
                    usage.line,
                    count,
                ));
            }
        }
    }

    for pair in pairs {
        let (Some(def), Some(usage)) = (definitions.get(pair.definition.0), uses.get(pair.usage.0))
        else {
            continue;
        };
        if def.kind != DefinitionKind::Declaration || def.line == usage.line {
            continue;
        }
        let uninitialized = def
            .origin
            .and_then(|i| model.variables.get(i))
            .map_or(false, |v| v.initializer.is_none() && !v.is_parameter);
        if uninitialized {
            anomalies.push(DataFlowAnomaly::uninitialized_use(
                &usage.variable,
                &usage.file,
                usage.line,
            ));
        }
    }

    anomalies
}
