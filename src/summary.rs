use crate::loan::{round, Schedule};
use chrono::{Local, Months, NaiveDate};
use log::debug;
use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Totals reduced from a [`Schedule`]. Nothing here is stored independently.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct LoanSummary {
    pub total_interest_paid: f64,
    pub total_principal_paid: f64,
    pub total_paid: f64,
    pub total_months: u32,
    pub pays_off: bool,
}

impl LoanSummary {
    pub fn from_schedule(schedule: &Schedule) -> Self {
        let total_interest_paid = round(schedule.iter().map(|r| r.interest).sum(), 2.);
        let total_principal_paid = round(schedule.iter().map(|r| r.principal).sum(), 2.);
        let summary = Self {
            total_interest_paid,
            total_principal_paid,
            total_paid: round(total_interest_paid + total_principal_paid, 2.),
            total_months: schedule.len() as u32,
            pays_off: schedule.pays_off(),
        };
        debug!("{}", summary);
        summary
    }

    pub fn debt_free_date(&self, start: NaiveDate) -> Option<NaiveDate> {
        debt_free_date(start, self.total_months)
    }
}

impl fmt::Display for LoanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} months, interest ${:.2}, principal ${:.2}, total ${:.2}",
            self.total_months, self.total_interest_paid, self.total_principal_paid, self.total_paid
        )
    }
}

/// Absolute differences between two loans. Order of the arguments does not
/// matter.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct LoanComparison {
    pub interest_difference: f64,
    pub months_difference: u32,
}

impl LoanComparison {
    pub fn between(a: &LoanSummary, b: &LoanSummary) -> Self {
        Self {
            interest_difference: round((a.total_interest_paid - b.total_interest_paid).abs(), 2.),
            months_difference: a.total_months.abs_diff(b.total_months),
        }
    }
}

pub fn debt_free_date(start: NaiveDate, total_months: u32) -> Option<NaiveDate> {
    start.checked_add_months(Months::new(total_months))
}

/// Payoff date counted from today on the local calendar.
pub fn debt_free_date_from_today(total_months: u32) -> Option<NaiveDate> {
    debt_free_date(Local::now().date_naive(), total_months)
}

pub fn format_month_year(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

fn pluralize(count: u32, unit: &str) -> String {
    if count == 1 {
        format!("{} {}", count, unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

/// "2 years and 1 month", "1 year", "5 months". Zero months gives `None`.
pub fn format_duration(total_months: u32) -> Option<String> {
    let years = total_months / 12;
    let months = total_months % 12;

    match (years, months) {
        (0, 0) => None,
        (0, m) => Some(pluralize(m, "month")),
        (y, 0) => Some(pluralize(y, "year")),
        (y, m) => Some(format!(
            "{} and {}",
            pluralize(y, "year"),
            pluralize(m, "month")
        )),
    }
}

/// US dollar display: `$34,666.42`, `-$5.00`.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.).round() as u64;
    let dollars = (cents / 100).to_string();

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (idx, digit) in dollars.chars().enumerate() {
        if idx > 0 && (dollars.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0. && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}
