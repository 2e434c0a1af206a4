//! Observed call sites for variadic lookahead
//!
//! Built once per run from every recorded call and only read afterwards.

use rustc_hash::FxHashMap;

use crate::features::program_model::ProgramModel;

#[derive(Debug, Clone, Default)]
pub struct VarargIndex {
    /// callee simple name → argument lists in model order
    calls: FxHashMap<String, Vec<Vec<String>>>,
}

impl VarargIndex {
    pub fn from_model(model: &ProgramModel) -> Self {
        let mut index = Self::default();
        for call in &model.calls {
            index.record(&call.callee, call.arguments.clone());
        }
        index
    }

    pub fn record(&mut self, callee: &str, arguments: Vec<String>) {
        let simple = callee.rsplit('.').next().unwrap_or(callee);
        self.calls.entry(simple.to_string()).or_default().push(arguments);
    }

    /// Tail `args[position..]` of the first call long enough to reach `position`
    pub fn tail(&self, callee: &str, position: usize) -> Option<&[String]> {
        self.calls
            .get(callee)?
            .iter()
            .find(|args| args.len() > position)
            .map(|args| &args[position..])
    }

    pub fn call_count(&self, callee: &str) -> usize {
        self.calls.get(callee).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::program_model::fixture::ModelFixture;

    #[test]
    fn test_tail_from_first_long_enough_call() {
        let model = ModelFixture::new("Main.kt", "fun main() {\n  sum()\n  sum(1, 2, 3, 4, 5)\n  math.sum(9)\n}")
            .function("main", None, (1, 5), &[], "Unit")
            .call("sum", Some("main"), &[], 2)
            .call("sum", Some("main"), &["1", "2", "3", "4", "5"], 3)
            .call("math.sum", Some("main"), &["9"], 4)
            .build();
        let index = VarargIndex::from_model(&model);

        assert_eq!(index.call_count("sum"), 3);
        assert_eq!(
            index.tail("sum", 0).unwrap(),
            &["1", "2", "3", "4", "5"]
        );
        assert_eq!(index.tail("sum", 3).unwrap(), &["4", "5"]);
        assert!(index.tail("sum", 5).is_none());
        assert!(index.tail("avg", 0).is_none());
    }
}
