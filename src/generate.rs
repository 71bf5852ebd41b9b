//! Test card number generation.
//!
//! Generated numbers pass the Luhn check and carry a prefix the brand
//! detector recognizes. They are not connected to real accounts and are
//! meant for tests and demos only.
//!
//! # Example
//!
//! ```
//! use card_form::generate::{generate_card_deterministic, CardGenerator};
//! use card_form::{luhn, CardBrand};
//!
//! let number = generate_card_deterministic(CardBrand::Amex);
//! assert_eq!(number.len(), 15);
//! assert!(luhn::validate_str(&number));
//!
//! let number = CardGenerator::new(CardBrand::Mastercard).generate_deterministic();
//! assert!(number.starts_with("51"));
//! ```

use crate::luhn;
use crate::CardBrand;

#[cfg(feature = "generate")]
use rand::Rng;

/// Returns the prefix used for deterministic numbers of a brand.
///
/// `Unknown` gets a prefix no brand claims.
pub const fn prefix_for_brand(brand: CardBrand) -> &'static str {
    match brand {
        CardBrand::Visa => "4",
        CardBrand::Mastercard => "51",
        CardBrand::Amex => "34",
        CardBrand::Unknown => "9",
    }
}

/// Builds a Luhn-valid number from a prefix and a filler for the middle.
///
/// A prefix as long as `length` is cut to leave room for the check digit.
fn complete_number<F>(prefix: &str, length: usize, mut fill: F) -> String
where
    F: FnMut() -> u8,
{
    let body_len = length.saturating_sub(1);
    let mut digits: Vec<u8> = prefix
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .take(body_len)
        .collect();

    while digits.len() < body_len {
        digits.push(fill());
    }
    if length > 0 {
        digits.push(luhn::generate_check_digit(&digits));
    }

    digits.iter().map(|&d| char::from(b'0' + d)).collect()
}

/// Generates a number deterministically: prefix, zeros, check digit.
///
/// The same brand always produces the same number.
pub fn generate_card_deterministic(brand: CardBrand) -> String {
    generate_card_deterministic_with_prefix(prefix_for_brand(brand), brand.max_length())
}

/// Generates a number deterministically with a custom prefix and length.
pub fn generate_card_deterministic_with_prefix(prefix: &str, length: usize) -> String {
    complete_number(prefix, length, || 0)
}

/// Generates a random number for the brand using the given RNG.
///
/// Mastercard prefixes are drawn from 51-55 and Amex from 34 and 37.
#[cfg(feature = "generate")]
pub fn generate_card_with_rng<R: Rng>(brand: CardBrand, rng: &mut R) -> String {
    let prefix = match brand {
        CardBrand::Mastercard => format!("5{}", rng.gen_range(1..=5)),
        CardBrand::Amex => (if rng.gen_bool(0.5) { "34" } else { "37" }).to_string(),
        other => prefix_for_brand(other).to_string(),
    };
    complete_number(&prefix, brand.max_length(), || rng.gen_range(0..10))
}

/// Generates a random number for the brand.
///
/// Requires the `generate` feature.
#[cfg(feature = "generate")]
pub fn generate_card(brand: CardBrand) -> String {
    generate_card_with_rng(brand, &mut rand::thread_rng())
}

/// Generates `count` random numbers for the brand.
#[cfg(feature = "generate")]
pub fn generate_cards(brand: CardBrand, count: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| generate_card_with_rng(brand, &mut rng))
        .collect()
}

/// Builder for numbers with a custom prefix or length.
#[derive(Debug, Clone)]
pub struct CardGenerator {
    prefix: String,
    length: usize,
}

impl CardGenerator {
    /// Starts from the brand's default prefix and length.
    pub fn new(brand: CardBrand) -> Self {
        Self {
            prefix: prefix_for_brand(brand).to_string(),
            length: brand.max_length(),
        }
    }

    /// Sets the prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sets the total length.
    pub fn length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Generates a number with zero filler.
    pub fn generate_deterministic(&self) -> String {
        generate_card_deterministic_with_prefix(&self.prefix, self.length)
    }

    /// Generates a number with random filler.
    #[cfg(feature = "generate")]
    pub fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        complete_number(&self.prefix, self.length, || rng.gen_range(0..10))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::detect_brand;
    use crate::DigitString;

    fn brand_of(number: &str) -> CardBrand {
        detect_brand(&DigitString::from_input(number))
    }

    #[test]
    fn test_deterministic_numbers_match_their_brand() {
        for brand in [CardBrand::Visa, CardBrand::Mastercard, CardBrand::Amex] {
            let number = generate_card_deterministic(brand);
            assert_eq!(number.len(), brand.max_length());
            assert!(luhn::validate_str(&number), "{} fails Luhn", number);
            assert_eq!(brand_of(&number), brand);
        }
    }

    #[test]
    fn test_deterministic_is_reproducible() {
        assert_eq!(
            generate_card_deterministic(CardBrand::Visa),
            generate_card_deterministic(CardBrand::Visa)
        );
        assert_eq!(
            generate_card_deterministic(CardBrand::Visa),
            "4000000000000002"
        );
    }

    #[test]
    fn test_unknown_prefix_is_unclaimed() {
        let number = generate_card_deterministic(CardBrand::Unknown);
        assert_eq!(number.len(), 16);
        assert!(luhn::validate_str(&number));
        assert_eq!(brand_of(&number), CardBrand::Unknown);
    }

    #[test]
    fn test_custom_prefix() {
        let number = CardGenerator::new(CardBrand::Visa)
            .prefix("453201")
            .generate_deterministic();
        assert!(number.starts_with("453201"));
        assert_eq!(number.len(), 16);
        assert!(luhn::validate_str(&number));
    }

    #[test]
    fn test_oversized_prefix_is_cut() {
        let number = generate_card_deterministic_with_prefix("45320151128303669999", 16);
        assert_eq!(number, "4532015112830366");
        assert_eq!(generate_card_deterministic_with_prefix("4", 0), "");
    }

    #[cfg(feature = "generate")]
    mod random_tests {
        use super::*;

        #[test]
        fn test_random_numbers_match_their_brand() {
            for brand in [CardBrand::Visa, CardBrand::Mastercard, CardBrand::Amex] {
                for number in generate_cards(brand, 20) {
                    assert!(luhn::validate_str(&number));
                    assert_eq!(brand_of(&number), brand);
                }
            }
        }

        #[test]
        fn test_random_numbers_differ() {
            let cards = generate_cards(CardBrand::Visa, 50);
            let unique: std::collections::HashSet<_> = cards.iter().collect();
            assert!(unique.len() >= 45);
        }

        #[test]
        fn test_builder_random() {
            let number = CardGenerator::new(CardBrand::Amex).prefix("37").generate();
            assert!(number.starts_with("37"));
            assert!(luhn::validate_str(&number));
        }
    }
}
