//! Property-based tests using proptest.
//!
//! These check invariants of the formatter, the detector and the form
//! reducer over arbitrary input.

use card_form::detect::detect_brand;
use card_form::expiry::CurrentYear;
use card_form::format::{format_input, group_digits, strip_non_digits, EditKind};
use card_form::generate::{generate_card_deterministic, CardGenerator};
use card_form::validate::{validate_cvv, validate_expiry_year};
use card_form::{
    luhn, CardBrand, CardField, CardForm, DigitString, FieldEdit, FormRules, MAX_CARD_DIGITS,
};
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

/// Generates a random digit string of a length within range.
fn digit_string(range: std::ops::RangeInclusive<usize>) -> impl Strategy<Value = String> {
    proptest::collection::vec(prop::char::range('0', '9'), range)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Digits with random separators and junk mixed in.
fn noisy_digits() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            4 => prop::char::range('0', '9'),
            1 => Just(' '),
            1 => Just('-'),
            1 => prop::char::range('a', 'z'),
        ],
        0..30,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

fn modeled_brand() -> impl Strategy<Value = CardBrand> {
    prop_oneof![
        Just(CardBrand::Visa),
        Just(CardBrand::Mastercard),
        Just(CardBrand::Amex),
    ]
}

fn any_field() -> impl Strategy<Value = CardField> {
    prop::sample::select(CardField::ALL.to_vec())
}

// =============================================================================
// FORMATTER PROPERTIES
// =============================================================================

proptest! {
    /// Property: Formatting formatted text again changes nothing.
    #[test]
    fn format_is_idempotent(digits in digit_string(0..=16), cursor in 0usize..=19) {
        let first = format_input("", &digits, digits.len());
        let cursor = cursor.min(first.text.len());

        let second = format_input(&first.text, &first.text, cursor);
        prop_assert_eq!(&second.text, &first.text);
        prop_assert_eq!(second.cursor, cursor);
    }

    /// Property: Stripping separators gives back the digits.
    #[test]
    fn format_round_trips(digits in digit_string(0..=16)) {
        let out = format_input("", &digits, digits.len());
        prop_assert_eq!(strip_non_digits(&out.text), digits.clone());
        prop_assert_eq!(out.text.replace(' ', ""), digits);
    }

    /// Property: Output is groups of at most four digits and never more
    /// than sixteen digits.
    #[test]
    fn format_output_shape(raw in noisy_digits(), cursor in 0usize..40) {
        let out = format_input("", &raw, cursor);
        let groups: Vec<&str> = out.text.split(' ').collect();

        prop_assert!(strip_non_digits(&out.text).len() <= MAX_CARD_DIGITS);
        if !out.text.is_empty() {
            for (i, group) in groups.iter().enumerate() {
                prop_assert!(group.chars().all(|c| c.is_ascii_digit()));
                if i + 1 < groups.len() {
                    prop_assert_eq!(group.len(), 4);
                } else {
                    prop_assert!((1..=4).contains(&group.len()));
                }
            }
        }
    }

    /// Property: The cursor stays inside the text.
    #[test]
    fn cursor_in_bounds(previous in noisy_digits(), raw in noisy_digits(), cursor in 0usize..40) {
        let out = format_input(&group_digits(&previous), &raw, cursor);
        prop_assert!(out.cursor <= out.text.len());
    }

    /// Property: Deleting one digit leaves the cursor where the digit was.
    #[test]
    fn deleting_keeps_cursor_in_place(digits in digit_string(2..=16), at in 0usize..16) {
        let previous = group_digits(&digits);
        let at = at.min(previous.len() - 1);
        let mut raw = previous.clone();
        raw.remove(at);
        let out = format_input(&previous, &raw, at);
        if out.edit == EditKind::Deleted {
            prop_assert_eq!(out.cursor, at.min(out.text.len()));
        }
    }

    /// Property: Typing a digit at the end puts the cursor at the end.
    #[test]
    fn typing_at_end_lands_at_end(digits in digit_string(0..=15), next in prop::char::range('0', '9')) {
        let previous = group_digits(&digits);
        let raw = format!("{}{}", previous, next);
        let out = format_input(&previous, &raw, raw.chars().count());
        prop_assert_eq!(out.cursor, out.text.len());
    }
}

// =============================================================================
// BRAND DETECTION PROPERTIES
// =============================================================================

proptest! {
    /// Property: Detection only depends on the digits.
    #[test]
    fn detect_ignores_noise(raw in noisy_digits()) {
        let digits = DigitString::from_input(&raw);
        let clean = DigitString::from_input(&strip_non_digits(&raw));
        prop_assert_eq!(detect_brand(&digits), detect_brand(&clean));
    }

    /// Property: Visa prefix is Visa at every admissible length.
    #[test]
    fn visa_prefix_is_visa(rest in digit_string(0..=15)) {
        let digits = DigitString::from_input(&format!("4{}", rest));
        prop_assert_eq!(detect_brand(&digits), CardBrand::Visa);
    }

    /// Property: A detected brand always admits the current length.
    #[test]
    fn detected_brand_admits_length(digits in digit_string(0..=16)) {
        let digits = DigitString::from_input(&digits);
        let brand = detect_brand(&digits);
        prop_assert!(digits.len() <= brand.max_length() || brand == CardBrand::Unknown);
    }

    /// Property: Numbers without a modeled prefix are Unknown.
    #[test]
    fn unmodeled_prefix_is_unknown(first in prop::sample::select(vec!['0', '1', '6', '7', '8', '9']), rest in digit_string(0..=15)) {
        let digits = DigitString::from_input(&format!("{}{}", first, rest));
        prop_assert_eq!(detect_brand(&digits), CardBrand::Unknown);
    }
}

// =============================================================================
// VALIDATOR PROPERTIES
// =============================================================================

proptest! {
    /// Property: Generated numbers pass Luhn and detect as their brand.
    #[test]
    fn generated_numbers_are_valid(brand in modeled_brand(), prefix in digit_string(0..=4)) {
        let number = generate_card_deterministic(brand);
        prop_assert!(luhn::validate_str(&number));
        prop_assert_eq!(detect_brand(&DigitString::from_input(&number)), brand);

        let custom = CardGenerator::new(brand).prefix(prefix).generate_deterministic();
        prop_assert!(luhn::validate_str(&custom));
    }

    /// Property: Changing one digit breaks the Luhn check.
    #[test]
    fn single_digit_change_fails_luhn(brand in modeled_brand(), position in 0usize..15, delta in 1u8..10) {
        let number = generate_card_deterministic(brand);
        let mut digits: Vec<u8> = number.bytes().map(|b| b - b'0').collect();
        digits[position] = (digits[position] + delta) % 10;
        prop_assert!(!luhn::validate(&digits));
    }

    /// Property: Years inside the window pass, outside fail.
    #[test]
    fn expiry_year_window(current in 2000i32..2089, yy in 0i32..100) {
        let year = 2000 + yy;
        let valid = validate_expiry_year(&format!("{:02}", yy), current, 10).is_valid();
        prop_assert_eq!(valid, year >= current && year <= current + 10);
    }

    /// Property: A numeric CVV is valid exactly when its length matches.
    #[test]
    fn cvv_length_rule(brand in modeled_brand(), cvv in digit_string(1..=6)) {
        let valid = validate_cvv(&cvv, brand).is_valid();
        prop_assert_eq!(valid, cvv.len() == brand.cvv_length());
    }
}

// =============================================================================
// REDUCER PROPERTIES
// =============================================================================

proptest! {
    /// Property: Submittable means every field is valid and non-blank.
    #[test]
    fn submittable_matches_definition(edits in proptest::collection::vec((any_field(), noisy_digits()), 0..12)) {
        let form = CardForm::new(FormRules::new().with_current_year(CurrentYear::Fixed(2025)));
        let state = form.replay(edits.into_iter().map(|(field, text)| FieldEdit::new(field, text)));

        let expected = state.validations().all_valid()
            && CardField::ALL.iter().all(|&f| !state.value(f).trim().is_empty());
        prop_assert_eq!(state.is_submittable(), expected);
        prop_assert_eq!(state.brand(), detect_brand(state.number()));
        prop_assert_eq!(state.blocking_fields().is_empty(), expected);
    }

    /// Property: Applying an edit never changes the previous state, and
    /// applying the same edit twice gives the same state.
    #[test]
    fn apply_is_pure(field in any_field(), first in noisy_digits(), second in noisy_digits()) {
        let form = CardForm::new(FormRules::new().with_current_year(CurrentYear::Fixed(2025)));
        let state = form.apply(&form.start(), &FieldEdit::new(field, first));
        let snapshot = state.clone();

        let a = form.apply(&state, &FieldEdit::new(field, second.clone()));
        let b = form.apply(&state, &FieldEdit::new(field, second));
        prop_assert_eq!(&state, &snapshot);
        prop_assert_eq!(a, b);
    }

    /// Property: Capped fields never exceed their cap.
    #[test]
    fn field_caps_hold(field in any_field(), text in ".{0,20}") {
        let form = CardForm::new(FormRules::new());
        let state = form.apply(&form.start(), &FieldEdit::new(field, text));
        if let Some(max) = field.max_chars() {
            prop_assert!(state.value(field).chars().count() <= max);
        }
        prop_assert!(state.number().len() <= MAX_CARD_DIGITS);
    }
}
