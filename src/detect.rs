//! Card brand detection using BIN/IIN prefix matching.
//!
//! Brands are tried in a fixed priority order (Visa, Mastercard, Amex). A
//! brand wins when its prefix matches and the digit count is still
//! admissible for it: either a complete length for the brand, or shorter
//! than its longest length (the user is still typing). Anything else falls
//! back to `CardBrand::Unknown`.

use crate::{CardBrand, DigitString};

/// Detects the card brand from the digits typed so far.
///
/// Detection is forgiving while typing: `"4532"` is already Visa. A prefix
/// only stops matching once the number has grown past every length the brand
/// accepts (for example 16 digits starting with `37`).
///
/// # Example
///
/// ```
/// use card_form::detect::detect_brand;
/// use card_form::{CardBrand, DigitString};
///
/// assert_eq!(detect_brand(&DigitString::from_input("4532")), CardBrand::Visa);
/// assert_eq!(detect_brand(&DigitString::from_input("374245455400126")), CardBrand::Amex);
/// assert_eq!(detect_brand(&DigitString::from_input("6011")), CardBrand::Unknown);
/// assert_eq!(detect_brand(&DigitString::new()), CardBrand::Unknown);
/// ```
#[inline]
pub fn detect_brand(digits: &DigitString) -> CardBrand {
    match prefix_brand(digits.as_str().as_bytes()) {
        Some(brand) if admits_length(brand, digits.len()) => brand,
        _ => CardBrand::Unknown,
    }
}

/// Matches the prefix patterns only, ignoring length.
///
/// Returns `None` when no pattern matches, including for empty input.
#[inline]
pub fn prefix_brand(digits: &[u8]) -> Option<CardBrand> {
    match digits {
        // Visa: starts with 4
        [b'4', ..] => Some(CardBrand::Visa),

        // Mastercard: 51-55
        [b'5', b'1'..=b'5', ..] => Some(CardBrand::Mastercard),

        // American Express: 34 or 37
        [b'3', b'4' | b'7', ..] => Some(CardBrand::Amex),

        _ => None,
    }
}

/// Returns true if `length` digits can still belong to `brand`.
#[inline]
pub fn admits_length(brand: CardBrand, length: usize) -> bool {
    length < brand.max_length() || brand.is_valid_length(length)
}
