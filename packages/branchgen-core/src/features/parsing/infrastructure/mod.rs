//! Parsing infrastructure

mod kotlin_front_end;
mod ts_utils;

pub use kotlin_front_end::KotlinFrontEnd;
