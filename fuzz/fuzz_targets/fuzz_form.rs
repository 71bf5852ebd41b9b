//! Fuzz target for the form reducer.
//!
//! Replays arbitrary edit sequences and checks the derived state stays
//! consistent.

#![no_main]

use arbitrary::Arbitrary;
use card_form::expiry::CurrentYear;
use card_form::{CardField, CardForm, FieldEdit, FormRules};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Edit {
    field: u8,
    text: String,
    cursor: Option<usize>,
}

fuzz_target!(|edits: Vec<Edit>| {
    let form = CardForm::new(FormRules::new().with_current_year(CurrentYear::Fixed(2025)));
    let mut state = form.start();

    for edit in edits {
        let field = CardField::ALL[usize::from(edit.field) % CardField::ALL.len()];
        let mut next = FieldEdit::new(field, edit.text);
        next.cursor = edit.cursor;
        state = form.apply(&state, &next);

        assert!(state.cursor() <= state.formatted_number().len());
        assert_eq!(
            state.is_submittable(),
            state.blocking_fields().is_empty()
        );
        if state.is_submittable() {
            assert!(form.submit(&state, false).is_ok());
        }
    }
});
