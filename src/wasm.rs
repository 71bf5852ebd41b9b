//! WebAssembly bindings for the card form.
//!
//! A web page keeps one `CardFormHandle` per open form and forwards every
//! input event to it.
//!
//! # Usage from JavaScript
//!
//! ```javascript
//! import init, { CardFormHandle, format_number, detect_brand } from 'card_form';
//!
//! await init();
//!
//! const form = new CardFormHandle(false);
//! input.addEventListener('input', (e) => {
//!     form.edit('number', e.target.value, e.target.selectionStart);
//!     e.target.value = form.formatted;
//!     e.target.setSelectionRange(form.cursor, form.cursor);
//!     icon.src = `/icons/${form.brand}.svg`;
//!     hint.textContent = form.message('number') ?? '';
//!     submit.disabled = !form.submittable;
//! });
//! ```

#![cfg(feature = "wasm")]

use crate::{CardField, CardForm, CardFormState, FieldEdit, FormRules};
use wasm_bindgen::prelude::*;

fn parse_field(field: &str) -> Result<CardField, JsValue> {
    CardField::from_key(field).ok_or_else(|| JsValue::from_str(&format!("Unknown field: {}", field)))
}

/// One card form driven from JavaScript.
#[wasm_bindgen]
pub struct CardFormHandle {
    form: CardForm,
    state: CardFormState,
}

#[wasm_bindgen]
impl CardFormHandle {
    /// Creates an empty form. Only the storefront's test numbers are
    /// accepted unless `luhn` is set, in which case any number passing the
    /// Luhn check is.
    #[wasm_bindgen(constructor)]
    pub fn new(luhn: bool) -> CardFormHandle {
        let rules = if luhn {
            FormRules::new().luhn()
        } else {
            FormRules::new()
        };
        let form = CardForm::new(rules);
        let state = form.start();
        CardFormHandle { form, state }
    }

    /// Applies the new text of a field.
    ///
    /// `field` is one of `number`, `name`, `month`, `year`, `cvv`.
    pub fn edit(&mut self, field: &str, text: &str, cursor: Option<usize>) -> Result<(), JsValue> {
        let mut edit = FieldEdit::new(parse_field(field)?, text);
        edit.cursor = cursor;
        self.state = self.form.apply(&self.state, &edit);
        Ok(())
    }

    /// Current text of a field, as it should be shown.
    pub fn value(&self, field: &str) -> Result<String, JsValue> {
        Ok(self.state.value(parse_field(field)?).to_string())
    }

    /// Formatted card number.
    #[wasm_bindgen(getter)]
    pub fn formatted(&self) -> String {
        self.state.formatted_number().to_string()
    }

    /// Cursor offset into the formatted number.
    #[wasm_bindgen(getter)]
    pub fn cursor(&self) -> usize {
        self.state.cursor()
    }

    /// Brand key: `visa`, `mastercard`, `amex` or `unknown`.
    #[wasm_bindgen(getter)]
    pub fn brand(&self) -> String {
        self.state.brand().key().to_string()
    }

    /// Error message for a field, or `undefined`.
    pub fn message(&self, field: &str) -> Result<Option<String>, JsValue> {
        Ok(self.state.message(parse_field(field)?))
    }

    /// Whether the submit button should be enabled.
    #[wasm_bindgen(getter)]
    pub fn submittable(&self) -> bool {
        self.state.is_submittable()
    }

    /// Clears the form.
    pub fn reset(&mut self) {
        self.state = self.form.start();
    }
}

/// Groups digits in blocks of four, capped at 16 digits.
#[wasm_bindgen]
pub fn format_number(raw: &str) -> String {
    crate::format::format_input("", raw, raw.chars().count()).text
}

/// Detects the brand key of a (partial) number.
#[wasm_bindgen]
pub fn detect_brand(number: &str) -> String {
    crate::detect::detect_brand(&crate::DigitString::from_input(number))
        .key()
        .to_string()
}
