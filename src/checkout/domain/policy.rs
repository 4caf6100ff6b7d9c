use chrono::NaiveDate;
use crate::core::domain::Configuration;
use crate::core::library::LoanStatus;

/// A loan is active while its return date is absent or still strictly ahead of `as_of`.
/// A return date equal to `as_of` already counts as returned.
pub(crate) fn is_active(return_date: Option<NaiveDate>, as_of: NaiveDate) -> bool {
    match return_date {
        None => true,
        Some(returned) => returned > as_of,
    }
}

pub(crate) fn loan_status(return_date: Option<NaiveDate>, as_of: NaiveDate) -> LoanStatus {
    if is_active(return_date, as_of) {
        LoanStatus::InProgress
    } else {
        LoanStatus::Returned
    }
}

// whole days since the loan started
pub(crate) fn loan_age(loan_date: NaiveDate, as_of: NaiveDate) -> i64 {
    (as_of - loan_date).num_days()
}

// days the copy has been (or was) out, up to the return date when one is set
pub(crate) fn loan_duration(loan_date: NaiveDate, return_date: Option<NaiveDate>, as_of: NaiveDate) -> i64 {
    (return_date.unwrap_or(as_of) - loan_date).num_days()
}

// days between a past return date and as_of, zero for absent or future return dates
pub(crate) fn days_late(return_date: Option<NaiveDate>, as_of: NaiveDate) -> i64 {
    match return_date {
        Some(returned) if returned < as_of => (as_of - returned).num_days(),
        _ => 0,
    }
}

/// Overdue, due-soon and fine rules parameterised by the branch configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LoanPolicy {
    pub grace_period_days: i64,
    pub fine_per_day: f64,
    pub due_soon_days: i64,
}

impl LoanPolicy {
    pub(crate) fn new(config: &Configuration) -> Self {
        Self {
            grace_period_days: config.grace_period_days,
            fine_per_day: config.fine_per_day,
            due_soon_days: config.due_soon_days,
        }
    }

    // active and older than the grace period; a loan exactly grace_period_days old is not overdue yet
    pub(crate) fn is_overdue(&self, loan_date: NaiveDate, return_date: Option<NaiveDate>, as_of: NaiveDate) -> bool {
        is_active(return_date, as_of) && loan_age(loan_date, as_of) > self.grace_period_days
    }

    pub(crate) fn days_overdue(&self, loan_date: NaiveDate, as_of: NaiveDate) -> i64 {
        (loan_age(loan_date, as_of) - self.grace_period_days).max(0)
    }

    /// Days left before an unreturned loan becomes overdue, when it is within the
    /// due-soon window (age in `grace - due_soon ..= grace`).
    pub(crate) fn days_until_due(&self, loan_date: NaiveDate, return_date: Option<NaiveDate>, as_of: NaiveDate) -> Option<i64> {
        if return_date.is_some() {
            return None;
        }
        let age = loan_age(loan_date, as_of);
        if age >= self.grace_period_days - self.due_soon_days && age <= self.grace_period_days {
            Some(self.grace_period_days - age)
        } else {
            None
        }
    }

    pub(crate) fn fine(&self, return_date: Option<NaiveDate>, as_of: NaiveDate) -> f64 {
        days_late(return_date, as_of) as f64 * self.fine_per_day
    }
}

impl Default for LoanPolicy {
    fn default() -> Self {
        Self::new(&Configuration::new("default"))
    }
}
