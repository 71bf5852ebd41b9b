//! Fuzz target for brand detection and the field validators.
//!
//! Tests that none of them panic on arbitrary input.

#![no_main]

use card_form::detect::detect_brand;
use card_form::validate::{
    validate_card_number, validate_cvv, validate_expiry_month, validate_expiry_year,
    validate_holder_name,
};
use card_form::{CardBrand, DigitString, Luhn, SandboxList};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let brand = detect_brand(&DigitString::from_input(data));

    let _ = validate_card_number(data, &Luhn);
    let _ = validate_card_number(data, &SandboxList::storefront());
    let _ = validate_holder_name(data);
    let _ = validate_holder_name(&data.to_uppercase());
    let _ = validate_expiry_month(data);
    let _ = validate_expiry_year(data, 2025, 10);
    let _ = validate_expiry_year(data, i32::MAX, u16::MAX);

    for brand in CardBrand::ALL.into_iter().chain([brand]) {
        if let Some(message) = validate_cvv(data, brand).message() {
            assert!(!message.is_empty());
        }
    }
});
