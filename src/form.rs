//! The card entry form as an explicit state value and a reducer.
//!
//! A `CardFormState` is an immutable snapshot of the add/edit card form.
//! Every keystroke becomes a `FieldEdit`, and `CardForm::apply` turns the
//! current state plus the edit into the next state. The caller (the UI)
//! keeps the latest state and feeds the next edit in; nothing here holds on
//! to UI state or performs I/O.
//!
//! # Example
//!
//! ```
//! use card_form::{CardForm, CardField, FieldEdit, FormRules, FormStatus};
//! use card_form::expiry::CurrentYear;
//!
//! let form = CardForm::new(FormRules::new().with_current_year(CurrentYear::Fixed(2025)));
//! let state = form.replay([
//!     FieldEdit::number("4532015112830366"),
//!     FieldEdit::new(CardField::HolderName, "jane doe"),
//!     FieldEdit::new(CardField::ExpiryMonth, "09"),
//!     FieldEdit::new(CardField::ExpiryYear, "28"),
//! ]);
//! assert_eq!(state.formatted_number(), "4532 0151 1283 0366");
//! assert_eq!(state.holder_name(), "JANE DOE");
//! assert_eq!(state.status(), FormStatus::Incomplete);
//!
//! let state = form.apply(&state, &FieldEdit::new(CardField::Cvv, "123"));
//! assert_eq!(state.status(), FormStatus::ReadyToSubmit);
//!
//! let saved = form.submit(&state, false).unwrap();
//! assert_eq!(saved.masked_number, "•••• •••• •••• 0366");
//! ```

use crate::card::{mask_number, SavedCard};
use crate::config::FormRules;
use crate::detect::detect_brand;
use crate::error::FormError;
use crate::format::format_input;
use crate::validate::{
    validate_card_number, validate_cvv, validate_expiry_month, validate_expiry_year,
    validate_holder_name, FieldValidation,
};
use crate::{CardBrand, DigitString};
use std::fmt;
use tracing::{debug, trace, warn};
use zeroize::{Zeroize, Zeroizing};

/// Maximum characters kept in the expiry month and year fields.
pub const EXPIRY_FIELD_CHARS: usize = 2;

/// Maximum characters kept in the CVV field.
pub const CVV_FIELD_CHARS: usize = 4;

/// The five inputs of the card form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CardField {
    /// Card number.
    Number,
    /// Cardholder name.
    HolderName,
    /// Two-digit expiry month.
    ExpiryMonth,
    /// Two-digit expiry year.
    ExpiryYear,
    /// Card verification value.
    Cvv,
}

impl CardField {
    /// All fields in form order.
    pub const ALL: [CardField; 5] = [
        Self::Number,
        Self::HolderName,
        Self::ExpiryMonth,
        Self::ExpiryYear,
        Self::Cvv,
    ];

    /// Human-readable field label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Number => "card number",
            Self::HolderName => "cardholder name",
            Self::ExpiryMonth => "expiry month",
            Self::ExpiryYear => "expiry year",
            Self::Cvv => "CVV",
        }
    }

    /// Stable snake_case key.
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::HolderName => "holder_name",
            Self::ExpiryMonth => "expiry_month",
            Self::ExpiryYear => "expiry_year",
            Self::Cvv => "cvv",
        }
    }

    /// Looks a field up by key. Short aliases (`name`, `month`, `year`)
    /// are accepted too.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "number" => Some(Self::Number),
            "holder_name" | "name" => Some(Self::HolderName),
            "expiry_month" | "month" => Some(Self::ExpiryMonth),
            "expiry_year" | "year" => Some(Self::ExpiryYear),
            "cvv" => Some(Self::Cvv),
            _ => None,
        }
    }

    /// Input cap in characters, if the field has one.
    ///
    /// The number field is capped on digits instead, by the formatter.
    pub const fn max_chars(&self) -> Option<usize> {
        match self {
            Self::ExpiryMonth | Self::ExpiryYear => Some(EXPIRY_FIELD_CHARS),
            Self::Cvv => Some(CVV_FIELD_CHARS),
            Self::Number | Self::HolderName => None,
        }
    }
}

/// One input event: the full new text of a field.
///
/// The text is zeroed when the edit is dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct FieldEdit {
    /// The field that changed.
    pub field: CardField,
    /// Raw field text after the keystroke.
    pub text: String,
    /// Cursor offset into `text` (characters). Only used by the number
    /// field; `None` means the end of the text.
    pub cursor: Option<usize>,
}

impl FieldEdit {
    /// Creates an edit with the cursor at the end of the text.
    pub fn new(field: CardField, text: impl Into<String>) -> Self {
        Self {
            field,
            text: text.into(),
            cursor: None,
        }
    }

    /// Creates a number field edit with the cursor at the end.
    pub fn number(text: impl Into<String>) -> Self {
        Self::new(CardField::Number, text)
    }

    /// Sets the cursor offset.
    pub fn with_cursor(mut self, cursor: usize) -> Self {
        self.cursor = Some(cursor);
        self
    }
}

impl Drop for FieldEdit {
    fn drop(&mut self) {
        self.text.zeroize();
    }
}

impl fmt::Debug for FieldEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("FieldEdit");
        s.field("field", &self.field);
        match self.field {
            CardField::Number | CardField::Cvv => s.field("length", &self.text.chars().count()),
            _ => s.field("text", &self.text),
        };
        s.field("cursor", &self.cursor).finish()
    }
}

/// Whether the form can be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormStatus {
    /// Some field is blank or invalid.
    Incomplete,
    /// Every field is filled in and valid.
    ReadyToSubmit,
}

/// Latest verdict for each field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValidations {
    /// Card number verdict.
    pub number: FieldValidation,
    /// Holder name verdict.
    pub holder_name: FieldValidation,
    /// Expiry month verdict.
    pub expiry_month: FieldValidation,
    /// Expiry year verdict.
    pub expiry_year: FieldValidation,
    /// CVV verdict.
    pub cvv: FieldValidation,
}

impl FieldValidations {
    /// Returns the verdict for a field.
    pub fn get(&self, field: CardField) -> &FieldValidation {
        match field {
            CardField::Number => &self.number,
            CardField::HolderName => &self.holder_name,
            CardField::ExpiryMonth => &self.expiry_month,
            CardField::ExpiryYear => &self.expiry_year,
            CardField::Cvv => &self.cvv,
        }
    }

    /// Returns true if every field passed.
    pub fn all_valid(&self) -> bool {
        CardField::ALL.iter().all(|&f| self.get(f).is_valid())
    }

    /// Fields whose verdict is failing, in form order.
    pub fn invalid_fields(&self) -> Vec<CardField> {
        CardField::ALL
            .into_iter()
            .filter(|&f| !self.get(f).is_valid())
            .collect()
    }
}

/// The saved card being edited, when the form was opened for editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EditTarget {
    id: u64,
    is_default: bool,
}

/// Snapshot of the card form.
///
/// The brand and the submit status are derived on demand from the fields
/// and verdicts, so they can never disagree with them. The number, its
/// formatted text and the CVV are zeroed on drop.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CardFormState {
    number: DigitString,
    formatted_number: Zeroizing<String>,
    cursor: usize,
    holder_name: String,
    expiry_month: String,
    expiry_year: String,
    cvv: Zeroizing<String>,
    validations: FieldValidations,
    editing: Option<EditTarget>,
}

impl CardFormState {
    /// An empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// The digits of the card number.
    #[inline]
    pub fn number(&self) -> &DigitString {
        &self.number
    }

    /// The number as displayed, grouped in fours.
    #[inline]
    pub fn formatted_number(&self) -> &str {
        &self.formatted_number
    }

    /// Cursor offset into `formatted_number`.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Upper-cased holder name.
    #[inline]
    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    /// Expiry month as entered.
    #[inline]
    pub fn expiry_month(&self) -> &str {
        &self.expiry_month
    }

    /// Expiry year as entered.
    #[inline]
    pub fn expiry_year(&self) -> &str {
        &self.expiry_year
    }

    /// CVV as entered.
    ///
    /// # Security Warning
    ///
    /// Never log or persist the result.
    #[inline]
    pub fn cvv(&self) -> &str {
        &self.cvv
    }

    /// Brand detected from the current digits.
    #[inline]
    pub fn brand(&self) -> CardBrand {
        detect_brand(&self.number)
    }

    /// Latest verdicts.
    #[inline]
    pub fn validations(&self) -> &FieldValidations {
        &self.validations
    }

    /// Message to show under a field, if any.
    pub fn message(&self, field: CardField) -> Option<String> {
        self.validations.get(field).message()
    }

    /// Current text of a field (the formatted text for the number).
    pub fn value(&self, field: CardField) -> &str {
        match field {
            CardField::Number => &self.formatted_number,
            CardField::HolderName => &self.holder_name,
            CardField::ExpiryMonth => &self.expiry_month,
            CardField::ExpiryYear => &self.expiry_year,
            CardField::Cvv => &self.cvv,
        }
    }

    /// Returns true if the field is empty or whitespace only.
    pub fn is_blank(&self, field: CardField) -> bool {
        self.value(field).trim().is_empty()
    }

    /// Fields that keep the form from being submitted, in form order.
    pub fn blocking_fields(&self) -> Vec<CardField> {
        CardField::ALL
            .into_iter()
            .filter(|&f| self.is_blank(f) || !self.validations.get(f).is_valid())
            .collect()
    }

    /// True when every verdict passes and no field is blank.
    pub fn is_submittable(&self) -> bool {
        self.validations.all_valid() && CardField::ALL.iter().all(|&f| !self.is_blank(f))
    }

    /// `ReadyToSubmit` or `Incomplete`.
    pub fn status(&self) -> FormStatus {
        if self.is_submittable() {
            FormStatus::ReadyToSubmit
        } else {
            FormStatus::Incomplete
        }
    }

    /// Returns true if the form was opened to edit a saved card.
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }
}

impl fmt::Debug for CardFormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Digits and CVV stay out of debug output
        f.debug_struct("CardFormState")
            .field("number", &self.number)
            .field("brand", &self.brand())
            .field("cursor", &self.cursor)
            .field("holder_name", &self.holder_name)
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .field("cvv", &"*".repeat(self.cvv.len()))
            .field("validations", &self.validations)
            .field("status", &self.status())
            .finish()
    }
}

/// The form engine: applies edits under a set of `FormRules`.
///
/// `CardForm` holds no per-form state, so one engine can serve any number
/// of independent forms.
#[derive(Debug, Clone, Default)]
pub struct CardForm {
    rules: FormRules,
}

impl CardForm {
    /// Creates an engine with the given rules.
    pub fn new(rules: FormRules) -> Self {
        Self { rules }
    }

    /// The rules this engine validates against.
    pub fn rules(&self) -> &FormRules {
        &self.rules
    }

    /// An empty form for adding a card.
    pub fn start(&self) -> CardFormState {
        CardFormState::new()
    }

    /// A form pre-filled from a saved card.
    ///
    /// Holder name and expiry are copied and validated; number and CVV start
    /// blank because they are never stored.
    pub fn start_editing(&self, card: &SavedCard) -> CardFormState {
        let state = CardFormState {
            editing: Some(EditTarget {
                id: card.id,
                is_default: card.is_default,
            }),
            ..CardFormState::new()
        };

        [
            FieldEdit::new(CardField::HolderName, card.holder_name.clone()),
            FieldEdit::new(CardField::ExpiryMonth, card.expiry_month.clone()),
            FieldEdit::new(CardField::ExpiryYear, card.expiry_year.clone()),
        ]
        .iter()
        .fold(state, |state, edit| self.apply(&state, edit))
    }

    /// Applies one edit and returns the next state.
    ///
    /// A number edit re-formats the field, re-detects the brand, re-checks
    /// the number and, when the brand changed, re-checks the CVV. Any other
    /// edit re-checks only its own field.
    pub fn apply(&self, state: &CardFormState, edit: &FieldEdit) -> CardFormState {
        let mut next = state.clone();
        let text: Zeroizing<String> = Zeroizing::new(match edit.field.max_chars() {
            Some(max) => edit.text.chars().take(max).collect(),
            None => String::new(),
        });

        match edit.field {
            CardField::Number => {
                let cursor = edit.cursor.unwrap_or_else(|| edit.text.chars().count());
                let formatted = format_input(&state.formatted_number, &edit.text, cursor);

                next.number = DigitString::from_input(&formatted.text);
                next.formatted_number = Zeroizing::new(formatted.text);
                next.cursor = formatted.cursor;
                next.validations.number =
                    validate_card_number(next.number.as_str(), self.rules.acceptance());

                let brand = next.brand();
                if brand != state.brand() {
                    trace!(from = %state.brand(), to = %brand, "brand changed");
                    next.validations.cvv = validate_cvv(next.cvv(), brand);
                }
            }
            CardField::HolderName => {
                next.holder_name = edit.text.to_uppercase();
                next.validations.holder_name = validate_holder_name(&next.holder_name);
            }
            CardField::ExpiryMonth => {
                next.validations.expiry_month = validate_expiry_month(&text);
                next.expiry_month = text.to_string();
            }
            CardField::ExpiryYear => {
                next.validations.expiry_year = validate_expiry_year(
                    &text,
                    self.rules.current_year(),
                    self.rules.max_years_ahead(),
                );
                next.expiry_year = text.to_string();
            }
            CardField::Cvv => {
                next.validations.cvv = validate_cvv(&text, next.brand());
                next.cvv = text;
            }
        }

        trace!(
            field = ?edit.field,
            digits = next.number.len(),
            brand = %next.brand(),
            valid = next.validations.get(edit.field).is_valid(),
            "applied field edit"
        );

        let (before, after) = (state.status(), next.status());
        if before != after {
            debug!(?before, ?after, "card form status changed");
        }

        next
    }

    /// Applies a sequence of edits to an empty form.
    pub fn replay<I>(&self, edits: I) -> CardFormState
    where
        I: IntoIterator<Item = FieldEdit>,
    {
        edits
            .into_iter()
            .fold(self.start(), |state, edit| self.apply(&state, &edit))
    }

    /// Turns a ready form into a saved card record.
    ///
    /// Only the masked number, last four digits, brand, name and expiry are
    /// kept. When editing, the saved card's id and default flag carry over;
    /// `make_default` can only set the flag, never clear it.
    pub fn submit(&self, state: &CardFormState, make_default: bool) -> Result<SavedCard, FormError> {
        if !state.is_submittable() {
            let blocking = state.blocking_fields();
            warn!(?blocking, "refused to submit incomplete card form");
            return Err(FormError::NotSubmittable { blocking });
        }

        let (id, was_default) = state
            .editing
            .map(|target| (target.id, target.is_default))
            .unwrap_or((0, false));

        let card = SavedCard {
            id,
            masked_number: mask_number(state.number.as_str()),
            last_four: state.number.last_four().to_string(),
            brand: state.brand(),
            holder_name: state.holder_name.clone(),
            expiry_month: state.expiry_month.clone(),
            expiry_year: state.expiry_year.clone(),
            is_default: was_default || make_default,
        };

        debug!(card = %card, editing = state.is_editing(), "card form submitted");
        Ok(card)
    }
}
