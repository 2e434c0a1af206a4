//! Utility modules shared across features
//!
//! - `scope_stack`: lexical scope tracking during tree walks
//! - `identifiers`: identifier scanning and name shaping
//! - `arguments`: depth-aware splitting of argument lists
//! - `random`: seeded random source

pub mod arguments;
pub mod identifiers;
pub mod random;
pub mod scope_stack;

// Re-exports for convenience
pub use arguments::split_top_level;
pub use identifiers::{
    capitalize, contains_word, identifiers_in, is_identifier, is_keyword, to_name_fragment,
};
pub use random::SeededRandom;
pub use scope_stack::{ScopeFrame, ScopeStack};
