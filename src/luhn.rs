//! Luhn ("modulus 10") checksum.
//!
//! Used by the default number acceptance rule and by the test number
//! generator.

/// Doubled digit with its digit sum taken: `2d` or `2d - 9`.
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Validates a sequence of digit values (0-9) with the Luhn algorithm.
///
/// Returns `false` for empty input.
///
/// # Example
///
/// ```
/// use card_form::luhn::validate;
///
/// assert!(validate(&[4, 5, 3, 2, 0, 1, 5, 1, 1, 2, 8, 3, 0, 3, 6, 6]));
/// assert!(!validate(&[4, 5, 3, 2, 0, 1, 5, 1, 1, 2, 8, 3, 0, 3, 6, 7]));
/// ```
#[inline]
pub fn validate(digits: &[u8]) -> bool {
    !digits.is_empty() && compute_checksum(digits) % 10 == 0
}

/// Validates a digit string, ignoring any non-digit characters.
///
/// Returns `false` when the input holds no digits.
#[inline]
pub fn validate_str(input: &str) -> bool {
    let digits: Vec<u8> = input
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();
    validate(&digits)
}

/// Computes the Luhn sum (not reduced modulo 10).
///
/// The rightmost digit is kept, the one to its left doubled, and so on.
#[inline]
pub fn compute_checksum(digits: &[u8]) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                DOUBLE_TABLE[d as usize] as u32
            } else {
                d as u32
            }
        })
        .sum()
}

/// Computes the check digit to append to `digits` so the result is valid.
///
/// # Example
///
/// ```
/// use card_form::luhn::generate_check_digit;
///
/// // 453201511283036 + 6
/// let partial = [4, 5, 3, 2, 0, 1, 5, 1, 1, 2, 8, 3, 0, 3, 6];
/// assert_eq!(generate_check_digit(&partial), 6);
/// ```
#[inline]
pub fn generate_check_digit(digits: &[u8]) -> u8 {
    // Appending a digit shifts every position left by one, so the digit
    // currently rightmost becomes a doubled one.
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 0 {
                DOUBLE_TABLE[d as usize] as u32
            } else {
                d as u32
            }
        })
        .sum();

    ((10 - (sum % 10)) % 10) as u8
}
