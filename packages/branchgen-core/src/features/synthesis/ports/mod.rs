//! Synthesis ports

mod synthesizer;

pub use synthesizer::TestSynthesizer;
