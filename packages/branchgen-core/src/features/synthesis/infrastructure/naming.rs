//! Test method names

use crate::shared::utils::to_name_fragment;

pub fn basic_test_name(function: &str) -> String {
    format!("{}Basic", function)
}

/// `<fn>When<Condition>True` / `...False`
pub fn branch_test_name(function: &str, condition: &str, outcome: bool) -> String {
    format!(
        "{}When{}{}",
        function,
        to_name_fragment(condition),
        if outcome { "True" } else { "False" }
    )
}

pub fn when_entry_test_name(function: &str, entry: &str) -> String {
    format!("{}When{}", function, to_name_fragment(entry))
}

/// Same name an explicit `else ->` entry gets
pub fn when_else_test_name(function: &str) -> String {
    when_entry_test_name(function, "else")
}
