//! Program model application layer

mod build_model;

pub use build_model::{BuildProgramModelUseCase, ModelBuildResult};
