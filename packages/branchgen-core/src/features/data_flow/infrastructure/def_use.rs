//! Reaching-definition selection

use rustc_hash::FxHashMap;

use crate::features::data_flow::domain::{DefUsePair, Definition, Use, UseId};

/// Pairs plus the uses nothing reaches
pub(crate) struct Linkage {
    pub pairs: Vec<DefUsePair>,
    pub unreached: Vec<UseId>,
}

/// One pair per use: the nearest preceding definition in an enclosing scope
///
/// Same-file candidates must sit strictly above the use; definitions from
/// other files always qualify but rank below any same-file candidate.
pub(crate) fn link(definitions: &[Definition], uses: &[Use]) -> Linkage {
    let mut by_name: FxHashMap<&str, Vec<&Definition>> = FxHashMap::default();
    for def in definitions {
        by_name.entry(def.variable.as_str()).or_default().push(def);
    }

    let mut linkage = Linkage {
        pairs: Vec::new(),
        unreached: Vec::new(),
    };

    for usage in uses {
        let candidates = by_name
            .get(usage.variable.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        let mut best: Option<(&Definition, i64)> = None;
        for def in candidates {
            if !def.scope.encloses(&usage.scope) {
                continue;
            }
            let rank = if def.file == usage.file {
                if def.line >= usage.line {
                    continue;
                }
                def.line as i64
            } else {
                -1
            };
            if best.map_or(true, |(_, r)| rank > r) {
                best = Some((def, rank));
            }
        }

        match best {
            Some((def, _)) => linkage.pairs.push(DefUsePair {
                definition: def.id,
                usage: usage.id,
                variable: usage.variable.clone(),
            }),
            None => linkage.unreached.push(usage.id),
        }
    }
    linkage
}
