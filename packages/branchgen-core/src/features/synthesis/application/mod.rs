//! Synthesis application layer


pub use synthesize_tests::SynthesizeTestsUseCase;
