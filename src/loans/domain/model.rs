use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

// LoanEntity records one copy of a book lent to a member. A missing return_date means
// the copy is still out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct LoanEntity {
    pub loan_id: i64,
    pub version: i64,
    pub isbn: String,
    pub member_id: String,
    pub loan_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl LoanEntity {
    pub fn new(loan_id: i64, isbn: &str, member_id: &str,
               loan_date: NaiveDate, return_date: Option<NaiveDate>) -> Self {
        Self {
            loan_id,
            version: 0,
            isbn: isbn.to_string(),
            member_id: member_id.to_string(),
            loan_date,
            return_date,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for LoanEntity {
    fn id(&self) -> String {
        self.loan_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}
