//! Pipeline orchestration
//!
//! ```text
//! discover → read → parse ─┐ (rayon pool)
//!                  build ──┘
//!          → merge → data flow → synthesis → suites → files
//! ```

mod discovery;
mod generation;

pub use discovery::{discover_sources, read_sources};
pub use generation::{Generation, GenerationPipeline, PipelineReport};
