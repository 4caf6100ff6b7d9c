use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::MemberTier;
use crate::utils::date::serializer;

// MemberEntity is a registered borrower, identified by phone number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct MemberEntity {
    pub member_id: String,
    pub version: i64,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub tier: MemberTier,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl MemberEntity {
    pub fn new(member_id: &str, first_name: &str, last_name: &str, birth_date: NaiveDate) -> Self {
        Self {
            member_id: member_id.to_string(),
            version: 0,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            birth_date,
            tier: MemberTier::Standard,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for MemberEntity {
    fn id(&self) -> String {
        self.member_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}
