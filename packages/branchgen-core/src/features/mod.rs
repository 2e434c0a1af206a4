//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! Each feature contains:
//! - domain/     - Pure data and rules (no external dependencies)
//! - ports/      - Interface definitions (traits)
//! - application/ - Use cases
//! - infrastructure/ - Implementations
//!
//! Stage order: parsing → program_model → data_flow → synthesis → emission

pub mod data_flow;
pub mod emission;
pub mod parsing;
pub mod program_model;
pub mod synthesis;
