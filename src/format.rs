//! Live card number formatting for the number input field.
//!
//! Digits are grouped in blocks of four separated by single spaces
//! (`4532 0151 1283 0366`). As the user types, `format_input` re-groups the
//! field and shifts the cursor by the number of separators that appeared or
//! disappeared in front of it. Typing jumps over a new separator; a
//! backspace never jumps over one that just disappeared.
//!
//! # Example
//!
//! ```
//! use card_form::format::format_input;
//!
//! // Typing a fifth digit at the end inserts a separator before it
//! let out = format_input("4532", "45320", 5);
//! assert_eq!(out.text, "4532 0");
//! assert_eq!(out.cursor, 6);
//!
//! // Backspacing the digit before a separator pulls the next group left
//! let out = format_input("4532 0151", "453 0151", 3);
//! assert_eq!(out.text, "4530 151");
//! assert_eq!(out.cursor, 3);
//! ```

use crate::card::MAX_CARD_DIGITS;
use zeroize::Zeroizing;

/// Number of digits per group.
pub const GROUP_SIZE: usize = 4;

/// Separator placed between groups.
pub const SEPARATOR: char = ' ';

/// How an edit changed the digit sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    /// The edit added digits.
    Inserted,
    /// The edit removed digits.
    Deleted,
    /// Same number of digits as before (separator edits, pastes of equal length).
    Unchanged,
}

/// Result of re-formatting the number field after an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedInput {
    /// Grouped digits, e.g. `4532 0151 1`.
    pub text: String,
    /// Cursor offset into `text`, always within `0..=text.len()`.
    pub cursor: usize,
    /// Whether the edit inserted or removed digits.
    pub edit: EditKind,
}

/// Re-formats the number field after a keystroke.
///
/// # Arguments
///
/// * `previous` - The formatted text shown before the edit.
/// * `raw` - The raw field text after the edit (may contain misplaced spaces
///   or any other characters).
/// * `raw_cursor` - Cursor offset into `raw`, in characters, after the edit.
///
/// Non-digits are dropped and the digits are capped at `MAX_CARD_DIGITS`.
///
/// The cursor moves by the separator drift: separators before `raw_cursor`
/// in the new text minus separators before the same offset in `previous`.
/// An edit that added digits moves it one further, past the typed digit;
/// any other edit applies the drift only. The result is clamped to
/// `0..=text.len()`.
pub fn format_input(previous: &str, raw: &str, raw_cursor: usize) -> FormattedInput {
    let digits = Zeroizing::new(strip_non_digits(raw));
    let digits = &digits[..digits.len().min(MAX_CARD_DIGITS)];
    let text = group_digits(digits);

    let previous_count = previous.chars().filter(|c| c.is_ascii_digit()).count();
    let edit = match digits.len().cmp(&previous_count) {
        std::cmp::Ordering::Greater => EditKind::Inserted,
        std::cmp::Ordering::Less => EditKind::Deleted,
        std::cmp::Ordering::Equal => EditKind::Unchanged,
    };

    let drift = separators_before(&text, raw_cursor) as isize
        - separators_before(previous, raw_cursor) as isize;
    let raw_cursor = isize::try_from(raw_cursor).unwrap_or(isize::MAX / 2);
    let cursor = match edit {
        EditKind::Inserted => raw_cursor.saturating_add(drift + 1),
        EditKind::Deleted | EditKind::Unchanged => raw_cursor.saturating_add(drift).max(0),
    };
    let cursor = usize::try_from(cursor).unwrap_or(0).min(text.len());

    FormattedInput { text, cursor, edit }
}

/// Counts separators among the first `offset` characters of `text`.
fn separators_before(text: &str, offset: usize) -> usize {
    text.chars().take(offset).filter(|&c| c == SEPARATOR).count()
}

/// Groups a digit string into blocks of four separated by single spaces.
///
/// Non-digit characters in `input` are ignored; no cap is applied.
///
/// # Example
///
/// ```
/// use card_form::format::group_digits;
///
/// assert_eq!(group_digits("4532015112830366"), "4532 0151 1283 0366");
/// assert_eq!(group_digits("45320"), "4532 0");
/// assert_eq!(group_digits(""), "");
/// ```
pub fn group_digits(input: &str) -> String {
    let mut result = String::with_capacity(input.len() + input.len() / GROUP_SIZE);

    for (i, c) in input.chars().filter(|c| c.is_ascii_digit()).enumerate() {
        if i > 0 && i % GROUP_SIZE == 0 {
            result.push(SEPARATOR);
        }
        result.push(c);
    }

    result
}

/// Strips everything but ASCII digits.
///
/// # Example
///
/// ```
/// use card_form::format::strip_non_digits;
///
/// assert_eq!(strip_non_digits("4532 0151-1283.0366"), "4532015112830366");
/// ```
pub fn strip_non_digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}
