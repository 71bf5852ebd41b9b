//! Expiry date helpers.
//!
//! The form takes the expiry as two separate two-digit fields. The year
//! validator needs "now", which comes from a `CurrentYear` source so tests
//! and demos can pin it.

use chrono::Datelike;

/// Default number of years ahead an expiry year may be.
pub const DEFAULT_MAX_YEARS_AHEAD: u16 = 10;

/// Where the year validator gets the current year from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CurrentYear {
    /// Local calendar year from the system clock.
    #[default]
    System,
    /// A fixed four-digit year.
    Fixed(i32),
}

impl CurrentYear {
    /// Returns the four-digit current year.
    ///
    /// # Example
    ///
    /// ```
    /// use card_form::expiry::CurrentYear;
    ///
    /// assert_eq!(CurrentYear::Fixed(2025).resolve(), 2025);
    /// assert!(CurrentYear::System.resolve() >= 2024);
    /// ```
    pub fn resolve(&self) -> i32 {
        match self {
            Self::System => chrono::Local::now().year(),
            Self::Fixed(year) => *year,
        }
    }
}

/// Expands a two-digit expiry year to a four-digit one (`"28"` -> 2028).
///
/// Returns `None` unless the input is exactly two ASCII digits.
pub fn expand_two_digit_year(yy: &str) -> Option<i32> {
    if yy.len() != 2 || !yy.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    yy.parse::<i32>().ok().map(|y| 2000 + y)
}

/// Parses a two-digit month (`"01"`-`"12"`).
pub fn parse_month(mm: &str) -> Option<u8> {
    match mm.as_bytes() {
        [b'0', b'1'..=b'9'] | [b'1', b'0'..=b'2'] => mm.parse().ok(),
        _ => None,
    }
}
