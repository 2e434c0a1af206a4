//! Textual call graph
//!
//! Keys are `Class.method` (simple class name) or bare function names;
//! callees are recorded exactly as written at the call site. Nothing is
//! resolved, so a callee edge only reaches further when some key has the
//! callee's name as its last segment.

use std::collections::{BTreeMap, HashSet, VecDeque};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use rustc_hash::FxHashMap;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CallGraph {
    /// caller key → callee names in first-call order
    edges: BTreeMap<String, Vec<String>>,
}

impl CallGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one call; repeated calls merge into the same set
    pub fn add_call(&mut self, caller: impl Into<String>, callee: impl Into<String>) {
        let callees = self.edges.entry(caller.into()).or_default();
        let callee = callee.into();
        if !callees.contains(&callee) {
            callees.push(callee);
        }
    }

    pub fn callees(&self, caller: &str) -> &[String] {
        self.edges.get(caller).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn caller_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    /// Every callee name reachable from `caller`, sorted
    pub fn transitive_callees(&self, caller: &str) -> Vec<String> {
        GraphView::build(self).reach(caller)
    }

    /// Transitive callees of every caller key, over one graph view
    pub fn reachability(&self) -> BTreeMap<String, Vec<String>> {
        let view = GraphView::build(self);
        self.edges
            .keys()
            .map(|caller| (caller.clone(), view.reach(caller)))
            .collect()
    }
}

/// petgraph view: call edges plus `simple name → Class.simple name` links
struct GraphView<'g> {
    graph: DiGraph<String, ()>,
    index: FxHashMap<String, NodeIndex>,
    callee_names: HashSet<&'g str>,
}

impl<'g> GraphView<'g> {
    fn build(call_graph: &'g CallGraph) -> Self {
        let mut view = GraphView {
            graph: DiGraph::new(),
            index: FxHashMap::default(),
            callee_names: HashSet::new(),
        };

        for (caller, callees) in &call_graph.edges {
            let from = view.node(caller);
            for callee in callees {
                view.callee_names.insert(callee.as_str());
                let to = view.node(callee);
                view.graph.add_edge(from, to, ());
            }
        }

        // a bare callee continues into every qualified key with that name
        for key in call_graph.edges.keys() {
            if let Some((_, simple)) = key.rsplit_once('.') {
                let alias = view.index.get(simple).copied();
                let qualified = view.index.get(key.as_str()).copied();
                if let (Some(alias), Some(qualified)) = (alias, qualified) {
                    view.graph.add_edge(alias, qualified, ());
                }
            }
        }
        view
    }

    fn reach(&self, caller: &str) -> Vec<String> {
        let Some(&start) = self.index.get(caller) else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        let mut order = Vec::new();
        let mut queue = VecDeque::from([start]);
        seen.insert(start);

        while let Some(node) = queue.pop_front() {
            for next in self.graph.neighbors_directed(node, Direction::Outgoing) {
                if seen.insert(next) {
                    let name = &self.graph[next];
                    if self.callee_names.contains(name.as_str()) {
                        order.push(name.clone());
                    }
                    queue.push_back(next);
                }
            }
        }
        // neighbors() walks edges newest-first; keep the output stable
        order.sort();
        order
    }

    fn node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.index.insert(name.to_string(), idx);
        idx
    }
}
