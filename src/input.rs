use crate::loan::{compute_schedule, Schedule};
use log::debug;

#[cfg(feature = "serde")]
use serde::Serialize;

pub const DEFAULT_BALANCE: f64 = 30000.;
pub const DEFAULT_INTEREST_RATE: f64 = 10.;
pub const DEFAULT_MONTHLY_PAYMENT: f64 = 1000.;

/// Parse a user-entered amount. Blank or unparseable text counts as 0.
pub fn parse_amount(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            debug!("treating {:?} as 0", text);
            0.
        }
    }
}

/// The three numbers a loan is described by. Rebuilt on every edit rather
/// than mutated.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct LoanInput {
    pub balance: f64,
    pub interest_rate: f64, // annual, percent (i.e. 7.5)
    pub monthly_payment: f64,
}

impl LoanInput {
    pub fn new(balance: f64, interest_rate: f64, monthly_payment: f64) -> Self {
        Self {
            balance,
            interest_rate,
            monthly_payment,
        }
    }

    pub fn from_text(balance: &str, interest_rate: &str, monthly_payment: &str) -> Self {
        Self::new(
            parse_amount(balance),
            parse_amount(interest_rate),
            parse_amount(monthly_payment),
        )
    }

    pub fn schedule(&self) -> Schedule {
        compute_schedule(self.balance, self.monthly_payment, self.interest_rate)
    }
}

impl Default for LoanInput {
    fn default() -> Self {
        Self::new(
            DEFAULT_BALANCE,
            DEFAULT_INTEREST_RATE,
            DEFAULT_MONTHLY_PAYMENT,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_amount, LoanInput};
    use test_log::test;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("30000"), 30000.);
        assert_eq!(parse_amount(" 7.25 "), 7.25);
        assert_eq!(parse_amount("-12"), -12.);
        assert_eq!(parse_amount(""), 0.);
        assert_eq!(parse_amount("   "), 0.);
        assert_eq!(parse_amount("abc"), 0.);
        assert_eq!(parse_amount("1,000"), 0.);
        assert_eq!(parse_amount("NaN"), 0.);
        assert_eq!(parse_amount("inf"), 0.);
    }

    #[test]
    fn test_from_text() {
        assert_eq!(
            LoanInput::from_text("20000", "", "x"),
            LoanInput::new(20000., 0., 0.)
        );
    }

    #[test]
    fn test_default_schedule() {
        let schedule = LoanInput::default().schedule();
        assert_eq!(schedule.len(), 35);
        assert!(schedule.pays_off());
    }

    #[test]
    fn test_blank_balance_has_no_schedule() {
        assert!(LoanInput::from_text("", "10", "1000").schedule().is_empty());
    }
}
