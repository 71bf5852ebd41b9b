//! Error types for the card entry form.
//!
//! `FieldError` describes why a single field is not valid; its `Display`
//! output is the message shown under the field. `FormError` and
//! `StoreError` cover submission and the saved-card wallet.

use crate::form::CardField;
use crate::CardBrand;
use std::fmt;

/// Why a single form field failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Fewer digits than any complete card number.
    NumberTooShort {
        /// Digits entered.
        length: usize,
    },

    /// More digits than any complete card number.
    NumberTooLong {
        /// Digits entered.
        length: usize,
    },

    /// The digit count is not a complete length for the detected brand.
    InvalidLengthForBrand {
        /// The detected card brand.
        brand: CardBrand,
        /// Digits entered.
        length: usize,
    },

    /// The number is not on the sandbox list of test numbers.
    NotATestNumber,

    /// The number was refused by the acceptance rule (checksum or custom).
    NumberRejected,

    /// Holder name shorter than three characters.
    NameTooShort,

    /// Holder name contains something other than letters and spaces.
    NameInvalidCharacters,

    /// Month or year is not exactly two characters.
    NotTwoDigits,

    /// Month is not in 01-12.
    InvalidMonth,

    /// Year is not numeric.
    InvalidYear,

    /// Expiry year is before the current year.
    Expired,

    /// Expiry year is more than the allowed number of years ahead.
    TooFarInFuture,

    /// CVV contains non-digit characters.
    CvvNotNumeric,

    /// CVV length does not match what the brand requires.
    CvvWrongLength {
        /// The brand the CVV was checked against.
        brand: CardBrand,
        /// Actual length entered.
        length: usize,
    },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NumberTooShort { .. } => write!(f, "Card number is too short"),
            Self::NumberTooLong { .. } => write!(f, "Card number is too long"),
            Self::InvalidLengthForBrand { brand, .. } => {
                write!(
                    f,
                    "{} numbers must be {} digits",
                    brand.name(),
                    brand.max_length()
                )
            }
            Self::NotATestNumber => write!(f, "Please use test card numbers provided above"),
            Self::NumberRejected => write!(f, "Card number is invalid"),
            Self::NameTooShort => write!(f, "Name is too short"),
            Self::NameInvalidCharacters => write!(f, "Use only letters and spaces"),
            Self::NotTwoDigits => write!(f, "Enter 2 digits"),
            Self::InvalidMonth => write!(f, "Invalid month"),
            Self::InvalidYear => write!(f, "Invalid year"),
            Self::Expired => write!(f, "Card expired"),
            Self::TooFarInFuture => write!(f, "Year too far in future"),
            Self::CvvNotNumeric => write!(f, "Numbers only"),
            Self::CvvWrongLength { brand, .. } => match brand {
                CardBrand::Amex => write!(f, "4 digits for AMEX"),
                CardBrand::Visa | CardBrand::Mastercard | CardBrand::Unknown => {
                    write!(f, "{} digits required", brand.cvv_length())
                }
            },
        }
    }
}

impl std::error::Error for FieldError {}

/// Errors raised when turning a form into a saved card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// The form is not ready to submit.
    NotSubmittable {
        /// Fields that are blank or invalid, in form order.
        blocking: Vec<CardField>,
    },
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSubmittable { blocking } => {
                let names: Vec<&str> = blocking.iter().map(|field| field.label()).collect();
                write!(f, "card form is incomplete: {}", names.join(", "))
            }
        }
    }
}

impl std::error::Error for FormError {}

/// Errors raised by a saved-card store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No card with this id.
    NotFound(u64),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "no saved card with id {}", id),
        }
    }
}

impl std::error::Error for StoreError {}
