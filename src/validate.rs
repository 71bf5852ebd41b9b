//! Per-field validation for the card entry form.
//!
//! Every validator is a pure function returning a `FieldValidation`. An
//! empty value is always valid here: whether a field is required is decided
//! by the form as a whole (see `CardFormState::is_submittable`), so a field
//! the user has not reached yet never shows an error.
//!
//! | Field | Rule |
//! |-------|------|
//! | Number | 15-16 digits, complete length for the brand, accepted by the rule |
//! | Holder name | 3+ characters, `A-Z` and spaces only |
//! | Expiry month | 2 digits, 01-12 |
//! | Expiry year | 2 digits, from the current year to `max_years_ahead` years on |
//! | CVV | digits only, 4 for Amex, 3 otherwise |

use crate::acceptance::AcceptNumber;
use crate::card::{MAX_CARD_DIGITS, MIN_CARD_DIGITS};
use crate::detect::detect_brand;
use crate::error::FieldError;
use crate::expiry::{expand_two_digit_year, parse_month};
use crate::{CardBrand, DigitString};
use zeroize::Zeroizing;

/// Minimum holder name length, in characters.
pub const MIN_NAME_LENGTH: usize = 3;

/// Outcome of validating one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValidation {
    error: Option<FieldError>,
}

impl FieldValidation {
    /// A passing result.
    #[inline]
    pub const fn valid() -> Self {
        Self { error: None }
    }

    /// A failing result.
    #[inline]
    pub const fn invalid(error: FieldError) -> Self {
        Self { error: Some(error) }
    }

    /// Returns true if the field passed.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// Returns the failure, if any.
    #[inline]
    pub fn error(&self) -> Option<&FieldError> {
        self.error.as_ref()
    }

    /// Returns the message to show under the field, if any.
    pub fn message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

impl From<Result<(), FieldError>> for FieldValidation {
    fn from(result: Result<(), FieldError>) -> Self {
        Self { error: result.err() }
    }
}

/// Validates the card number.
///
/// Non-digit characters in `number` are ignored.
///
/// # Example
///
/// ```
/// use card_form::acceptance::{Luhn, SandboxList};
/// use card_form::validate::validate_card_number;
///
/// assert!(validate_card_number("4532 0151 1283 0366", &Luhn).is_valid());
/// assert!(validate_card_number("", &Luhn).is_valid());
///
/// let result = validate_card_number("4111111111111111", &SandboxList::storefront());
/// assert_eq!(
///     result.message().as_deref(),
///     Some("Please use test card numbers provided above")
/// );
/// ```
pub fn validate_card_number(number: &str, acceptance: &dyn AcceptNumber) -> FieldValidation {
    check_card_number(number, acceptance).into()
}

fn check_card_number(number: &str, acceptance: &dyn AcceptNumber) -> Result<(), FieldError> {
    let digits: Zeroizing<String> =
        Zeroizing::new(number.chars().filter(|c| c.is_ascii_digit()).collect());
    let length = digits.len();

    if length == 0 {
        return Ok(());
    }
    if length < MIN_CARD_DIGITS {
        return Err(FieldError::NumberTooShort { length });
    }
    if length > MAX_CARD_DIGITS {
        return Err(FieldError::NumberTooLong { length });
    }

    let brand = detect_brand(&DigitString::from_input(&digits));
    if !brand.is_valid_length(length) {
        return Err(FieldError::InvalidLengthForBrand { brand, length });
    }

    if !acceptance.accepts(&digits) {
        return Err(acceptance.rejection());
    }

    Ok(())
}

/// Validates the holder name as stored (already upper-cased).
///
/// # Example
///
/// ```
/// use card_form::validate::validate_holder_name;
///
/// assert!(validate_holder_name("JANE DOE").is_valid());
/// assert!(!validate_holder_name("JO").is_valid());
/// assert!(!validate_holder_name("JANE D0E").is_valid());
/// ```
pub fn validate_holder_name(name: &str) -> FieldValidation {
    if name.is_empty() {
        return FieldValidation::valid();
    }
    if name.chars().count() < MIN_NAME_LENGTH {
        return FieldValidation::invalid(FieldError::NameTooShort);
    }
    if !name.chars().all(|c| c.is_ascii_uppercase() || c == ' ') {
        return FieldValidation::invalid(FieldError::NameInvalidCharacters);
    }
    FieldValidation::valid()
}

/// Validates the two-digit expiry month.
pub fn validate_expiry_month(month: &str) -> FieldValidation {
    if month.is_empty() {
        return FieldValidation::valid();
    }
    if month.chars().count() != 2 {
        return FieldValidation::invalid(FieldError::NotTwoDigits);
    }
    match parse_month(month) {
        Some(_) => FieldValidation::valid(),
        None => FieldValidation::invalid(FieldError::InvalidMonth),
    }
}

/// Validates the two-digit expiry year against `current_year`.
///
/// The year is read as `20YY` and must fall within
/// `current_year..=current_year + max_years_ahead`.
///
/// # Example
///
/// ```
/// use card_form::validate::validate_expiry_year;
///
/// assert!(validate_expiry_year("25", 2025, 10).is_valid());
/// assert!(validate_expiry_year("35", 2025, 10).is_valid());
/// assert_eq!(
///     validate_expiry_year("24", 2025, 10).message().as_deref(),
///     Some("Card expired")
/// );
/// assert_eq!(
///     validate_expiry_year("36", 2025, 10).message().as_deref(),
///     Some("Year too far in future")
/// );
/// ```
pub fn validate_expiry_year(year: &str, current_year: i32, max_years_ahead: u16) -> FieldValidation {
    if year.is_empty() {
        return FieldValidation::valid();
    }
    if year.chars().count() != 2 {
        return FieldValidation::invalid(FieldError::NotTwoDigits);
    }
    let Some(full_year) = expand_two_digit_year(year) else {
        return FieldValidation::invalid(FieldError::InvalidYear);
    };

    if full_year < current_year {
        FieldValidation::invalid(FieldError::Expired)
    } else if full_year > current_year.saturating_add(i32::from(max_years_ahead)) {
        FieldValidation::invalid(FieldError::TooFarInFuture)
    } else {
        FieldValidation::valid()
    }
}

/// Validates the CVV for the given brand.
///
/// # Example
///
/// ```
/// use card_form::validate::validate_cvv;
/// use card_form::CardBrand;
///
/// assert!(validate_cvv("1234", CardBrand::Amex).is_valid());
/// assert!(!validate_cvv("123", CardBrand::Amex).is_valid());
/// assert!(validate_cvv("123", CardBrand::Unknown).is_valid());
/// ```
pub fn validate_cvv(cvv: &str, brand: CardBrand) -> FieldValidation {
    if cvv.is_empty() {
        return FieldValidation::valid();
    }
    if !cvv.bytes().all(|b| b.is_ascii_digit()) {
        return FieldValidation::invalid(FieldError::CvvNotNumeric);
    }

    let length = cvv.len();
    if length != brand.cvv_length() {
        return FieldValidation::invalid(FieldError::CvvWrongLength { brand, length });
    }
    FieldValidation::valid()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acceptance::{Luhn, SandboxList};

    const VISA: &str = "4532015112830366";
    const MASTERCARD: &str = "5425233430109903";
    const AMEX: &str = "374245455400126";

    #[test]
    fn test_number_empty_is_neutral() {
        let result = validate_card_number("", &Luhn);
        assert!(result.is_valid());
        assert_eq!(result.message(), None);
    }

    #[test]
    fn test_number_valid() {
        assert!(validate_card_number(VISA, &Luhn).is_valid());
        assert!(validate_card_number(MASTERCARD, &Luhn).is_valid());
        assert!(validate_card_number(AMEX, &Luhn).is_valid());
        assert!(validate_card_number("4532 0151 1283 0366", &Luhn).is_valid());
    }

    #[test]
    fn test_number_too_short() {
        let result = validate_card_number("4532", &Luhn);
        assert_eq!(
            result.error(),
            Some(&FieldError::NumberTooShort { length: 4 })
        );
        assert_eq!(result.message().as_deref(), Some("Card number is too short"));
    }

    #[test]
    fn test_number_too_long() {
        let result = validate_card_number("45320151128303661", &Luhn);
        assert_eq!(
            result.error(),
            Some(&FieldError::NumberTooLong { length: 17 })
        );
    }

    #[test]
    fn test_number_wrong_length_for_brand() {
        // 15 digits with a Visa prefix
        let result = validate_card_number("453201511283036", &Luhn);
        assert_eq!(
            result.error(),
            Some(&FieldError::InvalidLengthForBrand {
                brand: CardBrand::Visa,
                length: 15
            })
        );
    }

    #[test]
    fn test_number_rejected_by_checksum() {
        let result = validate_card_number("4532015112830367", &Luhn);
        assert_eq!(result.error(), Some(&FieldError::NumberRejected));
    }

    #[test]
    fn test_number_sandbox_mode() {
        let sandbox = SandboxList::storefront();
        assert!(validate_card_number(VISA, &sandbox).is_valid());
        assert!(validate_card_number("4532858337632948", &sandbox).is_valid());
        assert_eq!(
            validate_card_number("4111111111111111", &sandbox).error(),
            Some(&FieldError::NotATestNumber)
        );
    }

    #[test]
    fn test_holder_name() {
        assert!(validate_holder_name("").is_valid());
        assert!(validate_holder_name("ANA").is_valid());
        assert!(validate_holder_name("MARY ANN SMITH").is_valid());
        assert_eq!(
            validate_holder_name("AL").error(),
            Some(&FieldError::NameTooShort)
        );
        assert_eq!(
            validate_holder_name("O'BRIEN").error(),
            Some(&FieldError::NameInvalidCharacters)
        );
        assert_eq!(
            validate_holder_name("jane").error(),
            Some(&FieldError::NameInvalidCharacters)
        );
    }

    #[test]
    fn test_expiry_month() {
        assert!(validate_expiry_month("").is_valid());
        assert!(validate_expiry_month("01").is_valid());
        assert!(validate_expiry_month("12").is_valid());
        assert_eq!(
            validate_expiry_month("1").message().as_deref(),
            Some("Enter 2 digits")
        );
        assert_eq!(
            validate_expiry_month("13").message().as_deref(),
            Some("Invalid month")
        );
        assert_eq!(
            validate_expiry_month("00").error(),
            Some(&FieldError::InvalidMonth)
        );
        assert_eq!(
            validate_expiry_month("1a").error(),
            Some(&FieldError::InvalidMonth)
        );
    }

    #[test]
    fn test_expiry_year_boundaries() {
        assert!(validate_expiry_year("", 2025, 10).is_valid());
        assert!(validate_expiry_year("25", 2025, 10).is_valid());
        assert!(validate_expiry_year("35", 2025, 10).is_valid());
        assert_eq!(
            validate_expiry_year("24", 2025, 10).error(),
            Some(&FieldError::Expired)
        );
        assert_eq!(
            validate_expiry_year("36", 2025, 10).error(),
            Some(&FieldError::TooFarInFuture)
        );
    }

    #[test]
    fn test_expiry_year_format() {
        assert_eq!(
            validate_expiry_year("2", 2025, 10).error(),
            Some(&FieldError::NotTwoDigits)
        );
        assert_eq!(
            validate_expiry_year("x9", 2025, 10).error(),
            Some(&FieldError::InvalidYear)
        );
    }

    #[test]
    fn test_expiry_year_extreme_window() {
        assert_eq!(
            validate_expiry_year("99", i32::MAX - 1, u16::MAX).error(),
            Some(&FieldError::Expired)
        );
        assert!(validate_expiry_year("30", 2025, u16::MAX).is_valid());
    }

    #[test]
    fn test_expiry_year_custom_window() {
        assert!(validate_expiry_year("30", 2025, 5).is_valid());
        assert!(!validate_expiry_year("31", 2025, 5).is_valid());
    }

    #[test]
    fn test_cvv() {
        assert!(validate_cvv("", CardBrand::Visa).is_valid());
        assert!(validate_cvv("123", CardBrand::Visa).is_valid());
        assert!(validate_cvv("007", CardBrand::Mastercard).is_valid());
        assert!(validate_cvv("1234", CardBrand::Amex).is_valid());

        assert_eq!(
            validate_cvv("12a", CardBrand::Visa).message().as_deref(),
            Some("Numbers only")
        );
        assert_eq!(
            validate_cvv("123", CardBrand::Amex).message().as_deref(),
            Some("4 digits for AMEX")
        );
        assert_eq!(
            validate_cvv("1234", CardBrand::Visa).message().as_deref(),
            Some("3 digits required")
        );
    }

    #[test]
    fn test_cvv_unknown_brand_falls_back_to_three() {
        assert!(validate_cvv("123", CardBrand::Unknown).is_valid());
        assert_eq!(
            validate_cvv("1234", CardBrand::Unknown).error(),
            Some(&FieldError::CvvWrongLength {
                brand: CardBrand::Unknown,
                length: 4
            })
        );
    }

    #[test]
    fn test_from_result() {
        assert!(FieldValidation::from(Ok(())).is_valid());
        assert!(!FieldValidation::from(Err(FieldError::Expired)).is_valid());
    }
}
