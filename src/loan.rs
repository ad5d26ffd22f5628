use log::{trace, warn};
use std::{fmt, slice};

#[cfg(feature = "serde")]
use serde::Serialize;

/// One month of an amortization schedule. Currency fields are rounded to cents.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PaymentRecord {
    pub month: u32,
    pub interest: f64,
    pub principal: f64,
    pub total_interest: f64,
    pub total_principal: f64,
    pub remaining_balance: f64,
}

impl PaymentRecord {
    pub fn new(
        month: u32,
        interest: f64,
        principal: f64,
        total_interest: f64,
        total_principal: f64,
        remaining_balance: f64,
    ) -> Self {
        Self {
            month,
            interest,
            principal,
            total_interest,
            total_principal,
            remaining_balance,
        }
    }
}

impl fmt::Display for PaymentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "month {}, interest ${:.2}, principal ${:.2}, interest to date ${:.2}, principal to date ${:.2}, ending balance ${:.2}",
            self.month,
            self.interest,
            self.principal,
            self.total_interest,
            self.total_principal,
            self.remaining_balance
        )
    }
}

/// Month-ordered payment records for a fixed-payment loan.
///
/// A schedule whose last record still carries a balance describes a loan the
/// payment never retires; see [`Schedule::pays_off`].
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Schedule {
    records: Vec<PaymentRecord>,
}

impl Schedule {
    pub fn records(&self) -> &[PaymentRecord] {
        &self.records
    }

    pub fn iter(&self) -> slice::Iter<'_, PaymentRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&PaymentRecord> {
        self.records.last()
    }

    pub fn get_record(&self, month: u32) -> Option<&PaymentRecord> {
        if month == 0 {
            return None;
        }
        self.records.get(month as usize - 1)
    }

    pub fn pays_off(&self) -> bool {
        self.last()
            .map(|record| record.remaining_balance == 0.)
            .unwrap_or(false)
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a PaymentRecord;
    type IntoIter = slice::Iter<'a, PaymentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Upper bound on schedule length (1000 years of monthly payments).
pub const MAX_MONTHS: u32 = 12_000;

pub(crate) fn round(amt: f64, dec: f64) -> f64 {
    if amt == 0. {
        0.
    } else {
        (amt * 10_f64.powf(dec)).round() / 10_f64.powf(dec)
    }
}

/// Monthly simple-interest amortization with a fixed payment.
///
/// Running totals accumulate the unclamped monthly principal, so on the final
/// month `total_principal` can overshoot the original balance by the part of
/// the payment that was not needed. Emitted values are rounded to cents but
/// the loop itself carries unrounded figures forward.
///
/// A payment that does not exceed the month's interest stops the loop after a
/// single record. The loop also stops, leaving a balance, when a payment no
/// longer moves the balance in f64 or after [`MAX_MONTHS`] records.
pub fn compute_schedule(balance: f64, monthly_payment: f64, annual_rate: f64) -> Schedule {
    let mut records: Vec<PaymentRecord> = Vec::new();

    let monthly_rate = annual_rate / 12. / 100.;
    let mut remaining = balance; // NaN fails the loop test, same as <= 0
    let mut total_interest = 0.;
    let mut total_principal = 0.;
    let mut month = 1;

    while remaining > 0. && month <= MAX_MONTHS {
        let previous = remaining;
        let interest = remaining * monthly_rate;
        let mut principal = monthly_payment - interest;
        total_interest += interest;
        total_principal += principal;

        // final payment
        if principal > remaining {
            principal = remaining;
        }

        remaining -= principal;
        trace!(
            "month {}, interest {}, principal {}, remaining {}",
            month,
            interest,
            principal,
            remaining
        );

        records.push(PaymentRecord::new(
            month,
            round(interest, 2.),
            round(principal, 2.),
            round(total_interest, 2.),
            round(total_principal, 2.),
            round(remaining, 2.),
        ));

        month += 1;

        if principal <= 0. {
            warn!(
                "payment {} does not cover monthly interest {:.2} on balance {}",
                monthly_payment, interest, balance
            );
            break;
        }
        if remaining >= previous {
            warn!(
                "payment {} is too small to change balance {}",
                monthly_payment, previous
            );
            break;
        }
    }
    if month > MAX_MONTHS && remaining > 0. {
        warn!(
            "stopped after {} months with {:.2} still owed",
            MAX_MONTHS, remaining
        );
    }
    Schedule { records }
}

#[cfg(test)]
mod tests {
    use super::{compute_schedule, round, PaymentRecord, MAX_MONTHS};
    use test_log::test;

    fn assert_cents(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 0.005,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_round() {
        assert_eq!(round(0., 2.), 0.);
        assert_eq!(round(1.005_1, 2.), 1.01);
        assert_eq!(round(-4.996, 2.), -5.);
        assert_eq!(round(29250.004, 2.), 29250.);
    }

    #[test]
    fn test_reference_loan() {
        let schedule = compute_schedule(30000., 1000., 10.);

        assert_eq!(schedule.len(), 35);
        assert_eq!(
            schedule.records()[0],
            PaymentRecord::new(1, 250., 750., 250., 750., 29250.)
        );
        assert_eq!(schedule.get_record(1), schedule.records().first());
        assert_eq!(schedule.get_record(0), None);
        assert_eq!(schedule.get_record(36), None);

        let last = schedule.last().unwrap();
        assert_eq!(last.month, 35);
        assert_cents(last.interest, 5.51);
        assert_cents(last.principal, 660.91);
        assert_cents(last.total_interest, 4666.41);
        assert_eq!(last.remaining_balance, 0.);
        assert!(schedule.pays_off());
    }

    #[test]
    fn test_running_principal_is_unclamped() {
        let schedule = compute_schedule(30000., 1000., 10.);
        let last = schedule.last().unwrap();

        // the last month only needs 660.91 but the running total counts 994.49
        assert_cents(last.total_principal, 30333.59);
        let emitted: f64 = schedule.iter().map(|r| r.principal).sum();
        assert_cents(emitted, 30000.);
    }

    #[test]
    fn test_months_are_contiguous() {
        for (balance, payment, rate) in [
            (30000., 1000., 10.),
            (20000., 500., 6.),
            (1200., 100., 0.),
            (500., 1000., 24.),
            (250000., 1800., 7.),
        ] {
            let schedule = compute_schedule(balance, payment, rate);
            assert!(!schedule.is_empty());
            for (idx, record) in schedule.iter().enumerate() {
                assert_eq!(record.month as usize, idx + 1);
            }
        }
    }

    #[test]
    fn test_balance_never_increases() {
        let schedule = compute_schedule(250000., 1800., 7.);
        assert!(schedule.pays_off());

        let mut previous = 250000.;
        for record in &schedule {
            assert!(record.remaining_balance <= previous);
            assert!(record.remaining_balance >= 0.);
            previous = record.remaining_balance;
        }
    }

    #[test]
    fn test_principal_is_payment_less_interest() {
        let schedule = compute_schedule(20000., 500., 6.);
        let (last, rest) = schedule.records().split_last().unwrap();

        // each half is rounded separately, so allow a cent either way
        for record in rest {
            assert!((record.principal + record.interest - 500.).abs() < 0.011);
        }
        assert!(last.principal < 500. - last.interest);
        assert_eq!(last.remaining_balance, 0.);
    }

    #[test]
    fn test_zero_rate_is_flat() {
        let schedule = compute_schedule(1200., 100., 0.);

        assert_eq!(schedule.len(), 12);
        for record in &schedule {
            assert_eq!(record.interest, 0.);
            assert_eq!(record.principal, 100.);
        }
        assert_eq!(schedule.last().unwrap().remaining_balance, 0.);
    }

    #[test]
    fn test_single_payment_covers_balance() {
        let schedule = compute_schedule(500., 1000., 24.);

        assert_eq!(schedule.len(), 1);
        assert_eq!(
            schedule.records()[0],
            PaymentRecord::new(1, 10., 500., 10., 990., 0.)
        );
        assert!(schedule.pays_off());
    }

    #[test]
    fn test_payment_below_interest() {
        let schedule = compute_schedule(1000., 5., 12.);

        assert_eq!(schedule.len(), 1);
        assert_eq!(
            schedule.records()[0],
            PaymentRecord::new(1, 10., -5., 10., -5., 1005.)
        );
        assert!(!schedule.pays_off());
    }

    #[test]
    fn test_payment_equal_to_interest() {
        let schedule = compute_schedule(1000., 10., 12.);

        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.records()[0].principal, 0.);
        assert_eq!(schedule.records()[0].remaining_balance, 1000.);
        assert!(!schedule.pays_off());
    }

    #[test]
    fn test_zero_payment() {
        let schedule = compute_schedule(1000., 0., 0.);

        assert_eq!(schedule.len(), 1);
        assert!(!schedule.pays_off());
    }

    #[test]
    fn test_no_balance() {
        assert!(compute_schedule(0., 1000., 10.).is_empty());
        assert!(compute_schedule(-50., 1000., 10.).is_empty());
        assert!(compute_schedule(f64::NAN, 1000., 10.).is_empty());
        assert!(!compute_schedule(0., 1000., 10.).pays_off());
    }

    #[test]
    fn test_payment_lost_in_balance_precision() {
        // 1e17 - 1 == 1e17 in f64
        let schedule = compute_schedule(1e17, 1., 0.);

        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.records()[0].remaining_balance, 1e17);
        assert!(!schedule.pays_off());
    }

    #[test]
    fn test_schedule_stops_at_month_cap() {
        let schedule = compute_schedule(1e7, 1., 0.);

        assert_eq!(schedule.len(), MAX_MONTHS as usize);
        assert_eq!(schedule.last().unwrap().month, MAX_MONTHS);
        assert_eq!(
            schedule.last().unwrap().remaining_balance,
            1e7 - MAX_MONTHS as f64
        );
        assert!(!schedule.pays_off());
    }

    #[test]
    fn test_long_loan_under_cap_pays_off() {
        let schedule = compute_schedule(100000., 100., 0.);

        assert_eq!(schedule.len(), 1000);
        assert!(schedule.pays_off());
    }

    #[test]
    fn test_payment_info() {
        let schedule = compute_schedule(30000., 1000., 10.);
        assert_eq!(
            schedule.records()[0].to_string(),
            "month 1, interest $250.00, principal $750.00, interest to date $250.00, principal to date $750.00, ending balance $29250.00"
        );
    }
}
