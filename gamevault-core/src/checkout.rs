//! Simulated payment form and checkout flow.
//!
//! There is no payment processor: once the form passes its formatting checks
//! the checkout always succeeds after a fixed processing delay.
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CARD_DIGITS: usize = 16;
const EXPIRY_DIGITS: usize = 4;
const CVV_DIGITS: usize = 3;
const MIN_NAME_LEN: usize = 3;

static CARD_NAME_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^[a-zA-Z\s]*$").ok());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("Invalid card number.")]
    CardNumber,
    #[error("Invalid expiry date.")]
    Expiry,
    #[error("Invalid CVV.")]
    Cvv,
    #[error("Please enter the full name on the card.")]
    CardName,
    #[error("Your cart is empty.")]
    EmptyCart,
    #[error("A payment is already being processed.")]
    AlreadyProcessing,
}

/// Card details as typed into the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentForm {
    pub card_name: String,
    /// Digits grouped in fours, e.g. `4242 4242 4242 4242`
    pub card_number: String,
    /// `MM/YY`
    pub expiry: String,
    pub cvv: String,
}

fn digits(raw: &str, max: usize) -> String {
    raw.chars().filter(char::is_ascii_digit).take(max).collect()
}

impl PaymentForm {
    /// Accept the new name only if it is letters and spaces.
    pub fn set_card_name(&mut self, raw: &str) {
        let accepted = CARD_NAME_RE
            .as_ref()
            .is_some_and(|re| re.is_match(raw));
        if accepted {
            self.card_name = raw.to_string();
        }
    }

    pub fn set_card_number(&mut self, raw: &str) {
        let digits = digits(raw, CARD_DIGITS);
        let groups: Vec<String> = digits
            .as_bytes()
            .chunks(4)
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect();
        self.card_number = groups.join(" ");
    }

    pub fn set_expiry(&mut self, raw: &str) {
        let digits = digits(raw, EXPIRY_DIGITS);
        self.expiry = if digits.len() >= 3 {
            format!("{}/{}", &digits[..2], &digits[2..])
        } else {
            digits
        };
    }

    /// Longer input is ignored rather than truncated.
    pub fn set_cvv(&mut self, raw: &str) {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if digits.len() <= CVV_DIGITS {
            self.cvv = digits;
        }
    }

    /// Check the fields in display order, reporting the first problem.
    ///
    /// # Errors
    ///
    /// Returns the first field that fails its formatting check.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let card_digits = self.card_number.chars().filter(|c| !c.is_whitespace()).count();
        if card_digits < CARD_DIGITS {
            return Err(CheckoutError::CardNumber);
        }
        if self.expiry.len() < EXPIRY_DIGITS + 1 {
            return Err(CheckoutError::Expiry);
        }
        if self.cvv.len() < CVV_DIGITS {
            return Err(CheckoutError::Cvv);
        }
        if self.card_name.trim().chars().count() < MIN_NAME_LEN {
            return Err(CheckoutError::CardName);
        }
        Ok(())
    }
}

/// Where the checkout dialog currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutPhase {
    #[default]
    Editing,
    /// Waiting out the simulated processing delay for `count` games
    Processing { count: usize },
    Succeeded { count: usize },
}

impl CheckoutPhase {
    #[must_use]
    pub const fn is_processing(self) -> bool {
        matches!(self, Self::Processing { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> PaymentForm {
        let mut form = PaymentForm::default();
        form.set_card_name("Ada Lovelace");
        form.set_card_number("4242-4242-4242-4242");
        form.set_expiry("1229");
        form.set_cvv("123");
        form
    }

    #[test]
    fn masks_format_input() {
        let form = filled();
        assert_eq!(form.card_number, "4242 4242 4242 4242");
        assert_eq!(form.expiry, "12/29");
        assert_eq!(form.cvv, "123");

        let mut partial = PaymentForm::default();
        partial.set_card_number("12345");
        assert_eq!(partial.card_number, "1234 5");
        partial.set_card_number("1234 5678 9012 3456 7890");
        assert_eq!(partial.card_number, "1234 5678 9012 3456");
        partial.set_expiry("12");
        assert_eq!(partial.expiry, "12");
        partial.set_expiry("123");
        assert_eq!(partial.expiry, "12/3");
    }

    #[test]
    fn rejects_bad_characters() {
        let mut form = filled();
        form.set_card_name("R2-D2");
        assert_eq!(form.card_name, "Ada Lovelace");
        form.set_cvv("1234");
        assert_eq!(form.cvv, "123");
    }

    #[test]
    fn validation_reports_first_failure() {
        assert_eq!(filled().validate(), Ok(()));
        assert_eq!(
            PaymentForm::default().validate(),
            Err(CheckoutError::CardNumber)
        );

        let mut form = filled();
        form.set_expiry("12");
        assert_eq!(form.validate(), Err(CheckoutError::Expiry));

        let mut form = filled();
        form.set_cvv("12");
        assert_eq!(form.validate(), Err(CheckoutError::Cvv));

        let mut form = filled();
        form.set_card_name("  Al ");
        assert_eq!(form.validate(), Err(CheckoutError::CardName));
    }
}
