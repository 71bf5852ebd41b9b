//! Core card types for the card entry form.
//!
//! This module provides the `CardBrand` enum for identifying card networks,
//! the `DigitString` holding the digits typed so far, and the `SavedCard`
//! record handed to the wallet once a form is submitted.

use std::fmt;
use zeroize::Zeroize;

/// Maximum number of digits the card number field accepts.
pub const MAX_CARD_DIGITS: usize = 16;

/// Minimum number of digits a complete card number may have.
pub const MIN_CARD_DIGITS: usize = 15;

/// Mask prefix used for saved card numbers.
pub const MASK_PREFIX: &str = "•••• •••• •••• ";

/// Card brands recognized by the entry form.
///
/// Each brand carries its accepted total lengths and the CVV length it
/// expects, so adding a brand is a change to the `match` tables below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardBrand {
    /// Visa - Prefix 4, length 16
    Visa,
    /// Mastercard - Prefix 51-55, length 16
    Mastercard,
    /// American Express - Prefix 34, 37, length 15
    Amex,
    /// No pattern matched yet. Generic icon, 16 digits, 3-digit CVV.
    #[default]
    Unknown,
}

impl CardBrand {
    /// All brands in detection priority order.
    pub const ALL: [CardBrand; 4] = [Self::Visa, Self::Mastercard, Self::Amex, Self::Unknown];

    /// Returns the accepted total lengths for this card brand.
    #[inline]
    pub const fn valid_lengths(&self) -> &'static [u8] {
        match self {
            Self::Visa => &[16],
            Self::Mastercard => &[16],
            Self::Amex => &[15],
            Self::Unknown => &[16],
        }
    }

    /// Returns true if the given length is a complete length for this brand.
    #[inline]
    pub const fn is_valid_length(&self, length: usize) -> bool {
        let valid = self.valid_lengths();
        let mut i = 0;
        while i < valid.len() {
            if valid[i] as usize == length {
                return true;
            }
            i += 1;
        }
        false
    }

    /// Returns the longest accepted length for this brand.
    #[inline]
    pub const fn max_length(&self) -> usize {
        let valid = self.valid_lengths();
        let mut max = 0;
        let mut i = 0;
        while i < valid.len() {
            if valid[i] as usize > max {
                max = valid[i] as usize;
            }
            i += 1;
        }
        max
    }

    /// Returns the expected CVV length.
    ///
    /// - American Express: 4 digits
    /// - All other brands: 3 digits
    #[inline]
    pub const fn cvv_length(&self) -> usize {
        match self {
            Self::Amex => 4,
            Self::Visa | Self::Mastercard | Self::Unknown => 3,
        }
    }

    /// Returns a human-readable name for the card brand.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Visa => "Visa",
            Self::Mastercard => "Mastercard",
            Self::Amex => "American Express",
            Self::Unknown => "Unknown",
        }
    }

    /// Returns a stable lowercase key, used to pick the brand icon.
    #[inline]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Visa => "visa",
            Self::Mastercard => "mastercard",
            Self::Amex => "amex",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The card number reduced to digits, at most `MAX_CARD_DIGITS` long.
///
/// Every byte is an ASCII digit. The contents are zeroed on drop and the
/// `Debug` output only shows the last four digits.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct DigitString(String);

impl DigitString {
    /// Creates an empty digit string.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extracts the digits from arbitrary input, keeping at most
    /// `MAX_CARD_DIGITS`. Everything else is dropped silently.
    ///
    /// # Example
    ///
    /// ```
    /// use card_form::DigitString;
    ///
    /// let digits = DigitString::from_input("4532-0151 1283 0366 99");
    /// assert_eq!(digits.as_str(), "4532015112830366");
    /// ```
    pub fn from_input(input: &str) -> Self {
        Self(
            input
                .chars()
                .filter(|c| c.is_ascii_digit())
                .take(MAX_CARD_DIGITS)
                .collect(),
        )
    }

    /// Returns the digits as a string slice.
    ///
    /// # Security Warning
    ///
    /// This exposes the full card number. Never log the result.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the digit values (0-9).
    pub fn values(&self) -> Vec<u8> {
        self.0.bytes().map(|b| b - b'0').collect()
    }

    /// Returns the number of digits.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no digits have been entered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the last four digits, or all of them when fewer than four.
    pub fn last_four(&self) -> &str {
        let len = self.0.len();
        &self.0[len.saturating_sub(4)..]
    }
}

impl fmt::Debug for DigitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigitString")
            .field("length", &self.0.len())
            .field("last_four", &self.last_four())
            .finish()
    }
}

impl Drop for DigitString {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// A finalized card record, safe to persist and display.
///
/// Only derived display data is kept: the full number and CVV never leave
/// the form.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SavedCard {
    /// Identifier assigned by the store. Zero until stored.
    pub id: u64,
    /// Masked number, e.g. `•••• •••• •••• 0366`.
    pub masked_number: String,
    /// Last four digits of the number.
    pub last_four: String,
    /// Detected brand at submission time.
    pub brand: CardBrand,
    /// Upper-cased holder name.
    pub holder_name: String,
    /// Two-digit expiry month.
    pub expiry_month: String,
    /// Two-digit expiry year.
    pub expiry_year: String,
    /// Whether this is the wallet's default card.
    pub is_default: bool,
}

impl SavedCard {
    /// Returns the `Expires MM/YY` label shown under the card.
    pub fn expiry_label(&self) -> String {
        format!("Expires {}/{}", self.expiry_month, self.expiry_year)
    }
}

impl fmt::Display for SavedCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.brand, self.masked_number)
    }
}

/// Masks a card number leaving only the last four digits visible.
///
/// # Example
///
/// ```
/// use card_form::card::mask_number;
///
/// assert_eq!(mask_number("4532015112830366"), "•••• •••• •••• 0366");
/// ```
pub fn mask_number(input: &str) -> String {
    let digits = DigitString::from_input(input);
    format!("{}{}", MASK_PREFIX, digits.last_four())
}
