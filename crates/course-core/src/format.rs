//! Display helpers

use rust_decimal::{Decimal, RoundingStrategy};

/// What a field shows while not being edited
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Display {
    pub text: String,

    /// Render muted and italic
    pub placeholder: bool,
}

impl Display {
    pub fn value(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            placeholder: false,
        }
    }

    pub fn placeholder(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            placeholder: true,
        }
    }
}

/// Format a price as en-US dollars, e.g. `$1,234.50`
pub fn format_price(price: Decimal) -> String {
    let rounded = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let fixed = format!("{:.2}", rounded.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}${grouped}.{cents}")
}
