//! Rules the form validates against.
//!
//! `FormRules` is what the form engine uses at runtime. `RulesConfig` is a
//! plain-data mirror that can be loaded from JSON (feature `serde`) and
//! turned into `FormRules`.
//!
//! # Example
//!
//! ```
//! use card_form::config::{FormRules, RulesConfig, AcceptanceMode};
//! use card_form::expiry::CurrentYear;
//! use card_form::AcceptNumber;
//!
//! // Storefront test numbers only
//! let rules = FormRules::default().with_current_year(CurrentYear::Fixed(2025));
//! assert_eq!(rules.max_years_ahead(), 10);
//! assert!(!rules.acceptance().accepts("4111111111111111"));
//!
//! let config = RulesConfig {
//!     acceptance: AcceptanceMode::Luhn,
//!     current_year: Some(2025),
//!     ..RulesConfig::default()
//! };
//! assert_eq!(config.into_rules().current_year(), 2025);
//! ```

use crate::acceptance::{AcceptNumber, Luhn, SandboxList};
use crate::expiry::{CurrentYear, DEFAULT_MAX_YEARS_AHEAD};
use std::fmt;
use std::sync::Arc;

/// Runtime rules shared by every form built from them.
///
/// Cloning is cheap; the acceptance rule is reference counted.
#[derive(Clone)]
pub struct FormRules {
    acceptance: Arc<dyn AcceptNumber>,
    acceptance_name: &'static str,
    max_years_ahead: u16,
    current_year: CurrentYear,
}

impl FormRules {
    /// Creates rules that accept only the storefront's sandbox test numbers,
    /// with a 10-year expiry window and the system clock.
    pub fn new() -> Self {
        Self {
            acceptance: Arc::new(SandboxList::storefront()),
            acceptance_name: "sandbox",
            max_years_ahead: DEFAULT_MAX_YEARS_AHEAD,
            current_year: CurrentYear::System,
        }
    }

    /// Uses a custom acceptance rule for complete card numbers.
    pub fn with_acceptance<A>(mut self, acceptance: A) -> Self
    where
        A: AcceptNumber + 'static,
    {
        self.acceptance = Arc::new(acceptance);
        self.acceptance_name = "custom";
        self
    }

    /// Accepts any number whose Luhn checksum is valid.
    pub fn luhn(mut self) -> Self {
        self.acceptance = Arc::new(Luhn);
        self.acceptance_name = "luhn";
        self
    }

    /// Accepts only the storefront's sandbox test numbers.
    pub fn sandbox(self) -> Self {
        self.sandbox_with(SandboxList::storefront())
    }

    /// Accepts only the numbers on the given list.
    pub fn sandbox_with(mut self, list: SandboxList) -> Self {
        self.acceptance = Arc::new(list);
        self.acceptance_name = "sandbox";
        self
    }

    /// Sets how many years ahead an expiry year may be.
    pub fn with_max_years_ahead(mut self, years: u16) -> Self {
        self.max_years_ahead = years;
        self
    }

    /// Sets where the current year comes from.
    pub fn with_current_year(mut self, current_year: CurrentYear) -> Self {
        self.current_year = current_year;
        self
    }

    /// The acceptance rule for complete card numbers.
    #[inline]
    pub fn acceptance(&self) -> &dyn AcceptNumber {
        self.acceptance.as_ref()
    }

    /// How many years ahead an expiry year may be.
    #[inline]
    pub fn max_years_ahead(&self) -> u16 {
        self.max_years_ahead
    }

    /// The current four-digit year.
    #[inline]
    pub fn current_year(&self) -> i32 {
        self.current_year.resolve()
    }
}

impl Default for FormRules {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FormRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormRules")
            .field("acceptance", &self.acceptance_name)
            .field("max_years_ahead", &self.max_years_ahead)
            .field("current_year", &self.current_year)
            .finish()
    }
}

/// Which acceptance rule a `RulesConfig` selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AcceptanceMode {
    /// Fixed list of test numbers.
    #[default]
    Sandbox,
    /// Luhn checksum.
    Luhn,
}

/// Plain-data rule configuration.
///
/// JSON form (feature `serde`), every key optional:
///
/// ```json
/// { "acceptance": "sandbox", "sandbox_numbers": ["4532015112830366"],
///   "max_years_ahead": 10, "current_year": 2025 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RulesConfig {
    /// Acceptance rule for complete numbers.
    pub acceptance: AcceptanceMode,
    /// Numbers for sandbox mode. The storefront list when absent.
    pub sandbox_numbers: Option<Vec<String>>,
    /// How many years ahead an expiry year may be.
    pub max_years_ahead: u16,
    /// Fixed current year. The system clock when absent.
    pub current_year: Option<i32>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            acceptance: AcceptanceMode::Sandbox,
            sandbox_numbers: None,
            max_years_ahead: DEFAULT_MAX_YEARS_AHEAD,
            current_year: None,
        }
    }
}

impl RulesConfig {
    /// Parses a configuration from JSON.
    #[cfg(feature = "serde")]
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// Builds runtime rules from this configuration.
    pub fn into_rules(self) -> FormRules {
        let rules = FormRules::new()
            .with_max_years_ahead(self.max_years_ahead)
            .with_current_year(match self.current_year {
                Some(year) => CurrentYear::Fixed(year),
                None => CurrentYear::System,
            });

        match (self.acceptance, self.sandbox_numbers) {
            (AcceptanceMode::Luhn, _) => rules.luhn(),
            (AcceptanceMode::Sandbox, None) => rules.sandbox(),
            (AcceptanceMode::Sandbox, Some(numbers)) => rules.sandbox_with(SandboxList::new(numbers)),
        }
    }
}

impl From<RulesConfig> for FormRules {
    fn from(config: RulesConfig) -> Self {
        config.into_rules()
    }
}
