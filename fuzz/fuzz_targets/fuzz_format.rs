//! Fuzz target for the number formatter.
//!
//! Tests that formatting never panics and keeps its output invariants.

#![no_main]

use arbitrary::Arbitrary;
use card_form::format::{format_input, group_digits, strip_non_digits};
use card_form::MAX_CARD_DIGITS;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Keystroke {
    previous: String,
    raw: String,
    cursor: usize,
}

fuzz_target!(|input: Keystroke| {
    let out = format_input(&input.previous, &input.raw, input.cursor);

    assert!(out.cursor <= out.text.len(), "cursor past end of text");
    assert!(out.text.is_ascii());

    let digits = strip_non_digits(&input.raw);
    let kept = &digits[..digits.len().min(MAX_CARD_DIGITS)];
    assert_eq!(strip_non_digits(&out.text), kept, "digits not preserved");
    assert_eq!(group_digits(kept), out.text);
});
