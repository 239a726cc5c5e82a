//! Fuzz target for the regexify pattern generator.
//!
//! Arbitrary patterns must either fail to parse or generate a bounded
//! string with any random source.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use forgery_core::random::{SequenceRandom, StdRandom};
use forgery_core::regexify::{MAX_OUTPUT, Regexify};

/// Arbitrary regexify input for fuzzing.
#[derive(Debug, Arbitrary)]
struct FuzzPattern {
    /// Pattern text, optionally wrapped in slashes
    pattern: String,
    /// Ceiling for open-ended quantifiers
    max_repeat: u32,
    /// Draws replayed by the random source
    draws: Vec<u16>,
    /// Seed for the standard random source
    seed: u64,
}

fuzz_target!(|input: FuzzPattern| {
    if input.pattern.len() > 512 {
        return;
    }

    let Ok(parsed) = Regexify::parse(&input.pattern, input.max_repeat) else {
        return;
    };

    let draws: Vec<usize> = input.draws.iter().map(|d| usize::from(*d)).collect();
    if !draws.is_empty() {
        let _ = parsed.generate(&SequenceRandom::new(draws));
    }
    let output = parsed.generate(&StdRandom::seeded(input.seed));
    assert!(output.chars().count() <= MAX_OUTPUT);
});
