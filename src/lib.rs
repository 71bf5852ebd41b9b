//! # card_form
//!
//! Payment card entry engine: live number formatting with cursor tracking,
//! brand detection from the typed prefix, per-field validation and the form
//! state that gates submission.
//!
//! The engine consumes raw field text (plus a cursor offset for the number)
//! and produces formatted text, a new cursor, the detected brand and a
//! verdict per field. It performs no I/O and owns no UI.
//!
//! ## Quick Start
//!
//! ```rust
//! use card_form::{CardBrand, CardField, CardForm, FieldEdit, FormRules, FormStatus};
//! use card_form::expiry::CurrentYear;
//!
//! let form = CardForm::new(FormRules::new().with_current_year(CurrentYear::Fixed(2025)));
//!
//! // The user types "3742" into the number field
//! let state = form.apply(&form.start(), &FieldEdit::number("3742"));
//! assert_eq!(state.brand(), CardBrand::Amex);
//!
//! let state = form.replay([
//!     FieldEdit::number("374245455400126"),
//!     FieldEdit::new(CardField::HolderName, "John Smith"),
//!     FieldEdit::new(CardField::ExpiryMonth, "12"),
//!     FieldEdit::new(CardField::ExpiryYear, "27"),
//!     FieldEdit::new(CardField::Cvv, "123"),
//! ]);
//! assert_eq!(state.formatted_number(), "3742 4545 5400 126");
//! assert_eq!(state.message(CardField::Cvv).as_deref(), Some("4 digits for AMEX"));
//! assert_eq!(state.status(), FormStatus::Incomplete);
//! ```
//!
//! ## Formatting
//!
//! ```rust
//! use card_form::format::format_input;
//!
//! // Typing the fifth digit creates a separator; the cursor jumps past it
//! let out = format_input("4532", "45320", 5);
//! assert_eq!(out.text, "4532 0");
//! assert_eq!(out.cursor, 6);
//! ```
//!
//! ## Acceptance rules
//!
//! By default a complete number must be one of the storefront's sandbox test
//! numbers (`SandboxList::storefront()`). A Luhn check, or any
//! `Fn(&str) -> bool`, can be used instead:
//!
//! ```rust
//! use card_form::{AcceptNumber, FormRules};
//!
//! assert!(!FormRules::new().acceptance().accepts("4111111111111111"));
//!
//! let luhn = FormRules::new().luhn();
//! assert!(luhn.acceptance().accepts("4111111111111111"));
//! let amex_only = FormRules::new().with_acceptance(|digits: &str| digits.starts_with('3'));
//! ```
//!
//! ## Supported Card Brands
//!
//! | Brand | Prefix | Length | CVV |
//! |-------|--------|--------|-----|
//! | Visa | 4 | 16 | 3 |
//! | Mastercard | 51-55 | 16 | 3 |
//! | American Express | 34, 37 | 15 | 4 |
//! | Unknown | anything else | 16 | 3 |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Serialize records, load `RulesConfig` from JSON |
//! | `generate` | Random test number generation |
//! | `cli` | `cardform` command-line tool |
//! | `wasm` | WebAssembly bindings |
//!
//! ## Security
//!
//! - Card digits and CVV are zeroed when a form state is dropped
//! - `Debug` output never contains the full number or the CVV
//! - Logged events carry lengths and brands only
//! - Saved cards keep the masked number and last four digits only
//! - No unsafe code (`#![deny(unsafe_code)]`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod acceptance;
pub mod card;
pub mod config;
pub mod detect;
pub mod error;
pub mod expiry;
pub mod form;
pub mod format;
pub mod generate;
pub mod luhn;
pub mod store;
pub mod validate;

#[cfg(feature = "wasm")]
mod wasm;

// Re-export main types at crate root
pub use acceptance::{AcceptNumber, Luhn, SandboxList};
pub use card::{CardBrand, DigitString, SavedCard, MAX_CARD_DIGITS, MIN_CARD_DIGITS};
pub use config::{FormRules, RulesConfig};
pub use error::{FieldError, FormError, StoreError};
pub use form::{CardField, CardForm, CardFormState, FieldEdit, FieldValidations, FormStatus};
pub use store::{CardStore, MemoryCardStore};
pub use validate::FieldValidation;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expiry::CurrentYear;

    const VISA: &str = "4532015112830366";
    const MASTERCARD: &str = "5425233430109903";
    const AMEX: &str = "374245455400126";

    fn form() -> CardForm {
        CardForm::new(FormRules::new().with_current_year(CurrentYear::Fixed(2025)))
    }

    fn complete(number: &str, cvv: &str) -> CardFormState {
        form().replay([
            FieldEdit::number(number),
            FieldEdit::new(CardField::HolderName, "john smith"),
            FieldEdit::new(CardField::ExpiryMonth, "12"),
            FieldEdit::new(CardField::ExpiryYear, "27"),
            FieldEdit::new(CardField::Cvv, cvv),
        ])
    }

    #[test]
    fn test_each_brand_reaches_ready() {
        assert_eq!(complete(VISA, "123").status(), FormStatus::ReadyToSubmit);
        assert_eq!(complete(MASTERCARD, "123").status(), FormStatus::ReadyToSubmit);
        assert_eq!(complete(AMEX, "1234").status(), FormStatus::ReadyToSubmit);
    }

    #[test]
    fn test_amex_needs_four_digit_cvv() {
        let state = complete(AMEX, "123");
        assert_eq!(state.status(), FormStatus::Incomplete);
        assert_eq!(state.blocking_fields(), vec![CardField::Cvv]);
    }

    #[test]
    fn test_wallet_round_trip() {
        let form = form();
        let mut wallet = MemoryCardStore::new();

        let id = wallet.add(form.submit(&complete(VISA, "123"), false).unwrap());
        let saved = wallet.get(id).unwrap().clone();
        assert!(saved.is_default);
        assert_eq!(saved.holder_name, "JOHN SMITH");

        let editing = form.start_editing(&saved);
        let editing = form.apply(&editing, &FieldEdit::number(MASTERCARD));
        let editing = form.apply(&editing, &FieldEdit::new(CardField::Cvv, "321"));
        wallet.replace(form.submit(&editing, false).unwrap()).unwrap();

        let updated = wallet.get(id).unwrap();
        assert_eq!(updated.brand, CardBrand::Mastercard);
        assert_eq!(updated.last_four, "9903");
        assert!(updated.is_default);
        assert_eq!(wallet.len(), 1);
    }

    #[test]
    fn test_debug_is_safe() {
        let debug = format!("{:?}", complete(VISA, "123"));
        assert!(!debug.contains(VISA));
    }
}
