//! Pluggable acceptance rules for complete card numbers.
//!
//! Once a number has a plausible length for its brand, the number validator
//! asks an `AcceptNumber` implementation whether to accept it. The library
//! provides:
//!
//! - `SandboxList` - a fixed list of test numbers (the storefront list is the
//!   default)
//! - `Luhn` - checksum validation
//! - any `Fn(&str) -> bool`
//!
//! # Example
//!
//! ```
//! use card_form::acceptance::{AcceptNumber, Luhn, SandboxList};
//!
//! assert!(Luhn.accepts("4532015112830366"));
//! assert!(SandboxList::storefront().accepts("4532858337632948"));
//!
//! let only_visa = |digits: &str| digits.starts_with('4');
//! assert!(only_visa.accepts("4532015112830366"));
//! ```

use crate::error::FieldError;
use crate::luhn;
use std::fmt;

/// Test numbers accepted by the storefront's sandbox payment flow.
pub const STOREFRONT_TEST_NUMBERS: [&str; 8] = [
    // Visa
    "4532015112830366",
    "4532858337632948",
    "4532796041295796",
    // Mastercard
    "5425233430109903",
    "2223000048410010",
    // American Express
    "374245455400126",
    "378282246310005",
    "371449635398431",
];

/// Decides whether a complete card number is acceptable.
///
/// Implementations receive the digits only (no separators).
pub trait AcceptNumber: Send + Sync {
    /// Returns true if the number should be accepted.
    fn accepts(&self, digits: &str) -> bool;

    /// The error reported when `accepts` returns false.
    fn rejection(&self) -> FieldError {
        FieldError::NumberRejected
    }
}

/// Accepts numbers whose Luhn checksum is valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Luhn;

impl AcceptNumber for Luhn {
    fn accepts(&self, digits: &str) -> bool {
        luhn::validate_str(digits)
    }
}

/// Accepts only numbers on a fixed list.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SandboxList {
    numbers: Vec<String>,
}

impl SandboxList {
    /// Creates a list from the given numbers. Separators are stripped.
    pub fn new<I, S>(numbers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            numbers: numbers
                .into_iter()
                .map(|n| n.as_ref().chars().filter(|c| c.is_ascii_digit()).collect())
                .collect(),
        }
    }

    /// The storefront's published test numbers.
    pub fn storefront() -> Self {
        Self::new(STOREFRONT_TEST_NUMBERS)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    /// Returns true if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}

impl fmt::Debug for SandboxList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SandboxList")
            .field("entries", &self.numbers.len())
            .finish()
    }
}

impl AcceptNumber for SandboxList {
    fn accepts(&self, digits: &str) -> bool {
        self.numbers.iter().any(|n| n == digits)
    }

    fn rejection(&self) -> FieldError {
        FieldError::NotATestNumber
    }
}

impl<F> AcceptNumber for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn accepts(&self, digits: &str) -> bool {
        self(digits)
    }
}
