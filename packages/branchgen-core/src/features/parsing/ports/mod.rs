//! Parsing ports

mod front_end;

pub use front_end::SourceFrontEnd;
