//! CLI driver for the card entry form.
//!
//! # Usage
//!
//! ```bash
//! # Re-format a number field after a keystroke
//! cardform format "4532 01511" --previous "4532 0151" --cursor 10
//!
//! # Detect the brand of a (partial) number
//! cardform detect 3742
//!
//! # Run a whole form through the validators
//! cardform check --number 4532015112830366 --name "jane doe" \
//!     --month 09 --year 28 --cvv 123 --output json
//!
//! # Accept any Luhn-valid number instead of the storefront test numbers
//! cardform check --number 4111111111111111 --acceptance luhn
//!
//! # Generate test numbers
//! cardform generate --brand amex --count 3 --formatted
//! ```
//!
//! Set `RUST_LOG=card_form=trace` to see every applied edit.

use card_form::config::{AcceptanceMode, RulesConfig};
use card_form::format::{format_input, group_digits};
use card_form::{
    detect, generate, luhn, CardBrand, CardField, CardForm, CardFormState, DigitString, FieldEdit,
    FormRules,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cardform")]
#[command(author, version, about = "Payment card entry form engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Re-format the card number field after an edit
    Format {
        /// Raw field text after the edit
        raw: String,

        /// Formatted text shown before the edit
        #[arg(short, long, default_value = "")]
        previous: String,

        /// Cursor offset into the raw text (defaults to the end)
        #[arg(short, long)]
        cursor: Option<usize>,
    },

    /// Detect the card brand from a (partial) number
    Detect {
        /// Card number digits typed so far
        number: String,
    },

    /// Validate a complete card form
    Check {
        /// Card number
        #[arg(long, default_value = "")]
        number: String,

        /// Cardholder name
        #[arg(long, default_value = "")]
        name: String,

        /// Expiry month (MM)
        #[arg(long, default_value = "")]
        month: String,

        /// Expiry year (YY)
        #[arg(long, default_value = "")]
        year: String,

        /// CVV
        #[arg(long, default_value = "")]
        cvv: String,

        /// Acceptance rule for the number (overrides the config file;
        /// storefront test numbers when neither is given)
        #[arg(short, long)]
        acceptance: Option<AcceptanceArg>,

        /// JSON rules file (acceptance, sandbox_numbers, max_years_ahead, current_year)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Check if a number passes the Luhn algorithm
    Luhn {
        /// Card number to check
        number: String,
    },

    /// Generate test card numbers (for testing only)
    Generate {
        /// Card brand to generate
        #[arg(short, long, default_value = "visa")]
        brand: BrandArg,

        /// Number of cards to generate
        #[arg(short, long, default_value = "1")]
        count: usize,

        /// Output grouped in fours
        #[arg(short, long)]
        formatted: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum AcceptanceArg {
    Sandbox,
    Luhn,
}

impl From<AcceptanceArg> for AcceptanceMode {
    fn from(arg: AcceptanceArg) -> Self {
        match arg {
            AcceptanceArg::Sandbox => AcceptanceMode::Sandbox,
            AcceptanceArg::Luhn => AcceptanceMode::Luhn,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum BrandArg {
    Visa,
    Mastercard,
    Amex,
}

impl From<BrandArg> for CardBrand {
    fn from(arg: BrandArg) -> Self {
        match arg {
            BrandArg::Visa => CardBrand::Visa,
            BrandArg::Mastercard => CardBrand::Mastercard,
            BrandArg::Amex => CardBrand::Amex,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Format {
            raw,
            previous,
            cursor,
        } => cmd_format(&raw, &previous, cursor),
        Commands::Detect { number } => cmd_detect(&number),
        Commands::Check {
            number,
            name,
            month,
            year,
            cvv,
            acceptance,
            config,
            output,
        } => {
            let rules = match load_rules(config.as_deref(), acceptance.map(Into::into)) {
                Ok(rules) => rules,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::from(2);
                }
            };
            let edits = [
                FieldEdit::number(number),
                FieldEdit::new(CardField::HolderName, name),
                FieldEdit::new(CardField::ExpiryMonth, month),
                FieldEdit::new(CardField::ExpiryYear, year),
                FieldEdit::new(CardField::Cvv, cvv),
            ];
            cmd_check(CardForm::new(rules), edits, output)
        }
        Commands::Luhn { number } => cmd_luhn(&number),
        Commands::Generate {
            brand,
            count,
            formatted,
        } => cmd_generate(brand.into(), count, formatted),
    }
}

fn load_rules(
    path: Option<&std::path::Path>,
    acceptance: Option<AcceptanceMode>,
) -> Result<FormRules, String> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
            RulesConfig::from_json(&text)
                .map_err(|e| format!("invalid rules in {}: {}", path.display(), e))?
        }
        None => RulesConfig::default(),
    };

    if let Some(acceptance) = acceptance {
        config.acceptance = acceptance;
    }
    Ok(config.into_rules())
}

fn cmd_format(raw: &str, previous: &str, cursor: Option<usize>) -> ExitCode {
    let cursor = cursor.unwrap_or_else(|| raw.chars().count());
    let out = format_input(previous, raw, cursor);
    println!("Formatted: {}", out.text);
    println!("Cursor: {}", out.cursor);
    ExitCode::SUCCESS
}

fn cmd_detect(number: &str) -> ExitCode {
    let digits = DigitString::from_input(number);
    if digits.is_empty() {
        eprintln!("Error: No digits provided");
        return ExitCode::FAILURE;
    }

    let brand = detect::detect_brand(&digits);
    println!("Detected Brand: {}", brand.name());
    println!("Valid Lengths: {:?}", brand.valid_lengths());
    println!("CVV Length: {}", brand.cvv_length());
    ExitCode::SUCCESS
}

fn cmd_check(form: CardForm, edits: [FieldEdit; 5], output: OutputFormat) -> ExitCode {
    let state = form.replay(edits);

    match output {
        OutputFormat::Text => print_text_report(&state),
        OutputFormat::Json => print_json_report(&state),
    }

    if state.is_submittable() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_text_report(state: &CardFormState) {
    println!("Number: {}", state.formatted_number());
    println!("Brand: {}", state.brand().name());
    for field in CardField::ALL {
        let verdict = match state.message(field) {
            Some(message) => message,
            None if state.is_blank(field) => "missing".to_string(),
            None => "ok".to_string(),
        };
        println!("{}: {}", field.label(), verdict);
    }
    println!("Status: {:?}", state.status());
}

fn print_json_report(state: &CardFormState) {
    let fields: serde_json::Map<String, serde_json::Value> = CardField::ALL
        .into_iter()
        .map(|field| {
            let value = serde_json::json!({
                "valid": state.validations().get(field).is_valid(),
                "blank": state.is_blank(field),
                "message": state.message(field),
            });
            (field.key().to_string(), value)
        })
        .collect();

    let report = serde_json::json!({
        "formatted": state.formatted_number(),
        "brand": state.brand(),
        "fields": fields,
        "status": state.status(),
        "submittable": state.is_submittable(),
    });

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn cmd_luhn(number: &str) -> ExitCode {
    if luhn::validate_str(number) {
        println!("Luhn check: PASS");
        ExitCode::SUCCESS
    } else {
        println!("Luhn check: FAIL");
        ExitCode::FAILURE
    }
}

fn cmd_generate(brand: CardBrand, count: usize, formatted: bool) -> ExitCode {
    for card in generate::generate_cards(brand, count) {
        if formatted {
            println!("{}", group_digits(&card));
        } else {
            println!("{}", card);
        }
    }
    ExitCode::SUCCESS
}
