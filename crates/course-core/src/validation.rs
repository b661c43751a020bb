//! Validation Layer
//!
//! One [`FieldKind`] per editable attribute. A kind knows how to validate the
//! raw form input, how to seed the form from the committed value, which patch
//! to send, and how to render the committed value.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::format::{Display, format_price};
use crate::model::Patch;

/// An attribute that can be edited inline
pub trait FieldKind: Send + Sync + 'static {
    /// Validated, committed value
    type Value: Clone + std::fmt::Debug + PartialEq + Send + Sync + 'static;

    /// Raw form input
    type Input: Clone + std::fmt::Debug + Default + PartialEq + Send + Sync + 'static;

    /// Wire name of the field
    const NAME: &'static str;

    /// Lowercase label used in headings and buttons
    const LABEL: &'static str;

    /// Accept or reject the raw input. Pure and synchronous.
    fn validate(input: &Self::Input) -> Result<Self::Value, ValidationError>;

    /// Form default for the given committed value
    fn draft(committed: Option<&Self::Value>) -> Self::Input;

    /// Body of the partial update carrying exactly this field
    fn patch(value: &Self::Value) -> Patch;

    /// Rendering of the committed value outside of edit mode
    fn display(committed: Option<&Self::Value>) -> Display;
}

fn required_text(field: &'static str, input: &str, message: &str) -> Result<String, ValidationError> {
    if input.chars().count() < 1 {
        return Err(ValidationError::new(field, message));
    }
    Ok(input.to_string())
}

fn text_display(committed: Option<&String>, placeholder: &str) -> Display {
    match committed {
        Some(text) if !text.is_empty() => Display::value(text.clone()),
        _ => Display::placeholder(placeholder),
    }
}

/// Course or chapter title
#[derive(Clone, Copy, Debug, Default)]
pub struct Title;

impl FieldKind for Title {
    type Value = String;
    type Input = String;

    const NAME: &'static str = "title";
    const LABEL: &'static str = "title";

    fn validate(input: &String) -> Result<String, ValidationError> {
        required_text(Self::NAME, input, "Title is required")
    }

    fn draft(committed: Option<&String>) -> String {
        committed.cloned().unwrap_or_default()
    }

    fn patch(value: &String) -> Patch {
        Patch {
            title: Some(value.clone()),
            ..Default::default()
        }
    }

    fn display(committed: Option<&String>) -> Display {
        text_display(committed, "No title provided")
    }
}

/// Course or chapter description
#[derive(Clone, Copy, Debug, Default)]
pub struct Description;

impl FieldKind for Description {
    type Value = String;
    type Input = String;

    const NAME: &'static str = "description";
    const LABEL: &'static str = "description";

    fn validate(input: &String) -> Result<String, ValidationError> {
        required_text(Self::NAME, input, "Description is required")
    }

    fn draft(committed: Option<&String>) -> String {
        committed.cloned().unwrap_or_default()
    }

    fn patch(value: &String) -> Patch {
        Patch {
            description: Some(value.clone()),
            ..Default::default()
        }
    }

    fn display(committed: Option<&String>) -> Display {
        text_display(committed, "No description provided")
    }
}

/// Course price in dollars
///
/// The input is coerced like a number field: surrounding whitespace is
/// ignored and a blank input reads as zero. Negative prices are rejected.
#[derive(Clone, Copy, Debug, Default)]
pub struct Price;

impl FieldKind for Price {
    type Value = Decimal;
    type Input = String;

    const NAME: &'static str = "price";
    const LABEL: &'static str = "price";

    fn validate(input: &String) -> Result<Decimal, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Decimal::ZERO);
        }

        // digit separators are not part of a number field's syntax
        if trimmed.contains('_') {
            return Err(ValidationError::new(Self::NAME, "Price must be a number"));
        }

        let price = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| ValidationError::new(Self::NAME, "Price must be a number"))?;

        if price.is_sign_negative() && !price.is_zero() {
            return Err(ValidationError::new(Self::NAME, "Price must not be negative"));
        }
        Ok(price.normalize())
    }

    fn draft(committed: Option<&Decimal>) -> String {
        committed.map(ToString::to_string).unwrap_or_default()
    }

    fn patch(value: &Decimal) -> Patch {
        Patch {
            price: Some(*value),
            ..Default::default()
        }
    }

    fn display(committed: Option<&Decimal>) -> Display {
        match committed {
            Some(price) if !price.is_zero() => Display::value(format_price(*price)),
            _ => Display::placeholder("No price provided"),
        }
    }
}

/// Whether a chapter is free for preview
#[derive(Clone, Copy, Debug, Default)]
pub struct Access;

impl FieldKind for Access {
    type Value = bool;
    type Input = bool;

    const NAME: &'static str = "isFree";
    const LABEL: &'static str = "access";

    fn validate(input: &bool) -> Result<bool, ValidationError> {
        Ok(*input)
    }

    fn draft(committed: Option<&bool>) -> bool {
        committed.copied().unwrap_or(false)
    }

    fn patch(value: &bool) -> Patch {
        Patch {
            is_free: Some(*value),
            ..Default::default()
        }
    }

    fn display(committed: Option<&bool>) -> Display {
        if committed.copied().unwrap_or(false) {
            Display::value("This chapter is free for preview.")
        } else {
            Display::placeholder("This chapter is not free.")
        }
    }
}
