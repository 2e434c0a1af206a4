//! Program model infrastructure

mod builder;

pub use builder::ModelBuilder;
