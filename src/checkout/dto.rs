use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::checkout::domain::policy::{days_late, loan_duration, loan_status, LoanPolicy};
use crate::core::library::LoanStatus;
use crate::loans::domain::model::LoanEntity;

// LoanDto is a loan as reported to callers, with status and duration evaluated at `as_of`
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct LoanDto {
    pub loan_id: i64,
    pub isbn: String,
    pub member_id: String,
    pub loan_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub status: LoanStatus,
    pub duration_days: i64,
}

impl LoanDto {
    pub fn from_entity(loan: &LoanEntity, as_of: NaiveDate) -> Self {
        Self {
            loan_id: loan.loan_id,
            isbn: loan.isbn.to_string(),
            member_id: loan.member_id.to_string(),
            loan_date: loan.loan_date,
            return_date: loan.return_date,
            status: loan_status(loan.return_date, as_of),
            duration_days: loan_duration(loan.loan_date, loan.return_date, as_of),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct OverdueLoanDto {
    pub loan: LoanDto,
    pub days_overdue: i64,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct DueSoonDto {
    pub loan: LoanDto,
    pub days_remaining: i64,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct FineDto {
    pub loan_id: i64,
    pub isbn: String,
    pub member_id: String,
    pub return_date: Option<NaiveDate>,
    pub days_late: i64,
    pub fine: f64,
}

impl FineDto {
    pub fn from_entity(policy: &LoanPolicy, loan: &LoanEntity, as_of: NaiveDate) -> Self {
        Self {
            loan_id: loan.loan_id,
            isbn: loan.isbn.to_string(),
            member_id: loan.member_id.to_string(),
            return_date: loan.return_date,
            days_late: days_late(loan.return_date, as_of),
            fine: policy.fine(loan.return_date, as_of),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct FinesReport {
    pub as_of: NaiveDate,
    pub fines: Vec<FineDto>,
    // loans listed without a return date
    pub outstanding: usize,
    pub total: f64,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct LibraryStats {
    pub as_of: NaiveDate,
    pub books: usize,
    pub copies: i64,
    pub members: usize,
    pub loans: usize,
    pub active_loans: usize,
    pub overdue_loans: usize,
    pub total_fines: f64,
}
