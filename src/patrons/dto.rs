use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::MemberTier;
use crate::patrons::domain::Patron;
use crate::utils::date::serializer;

// PatronDto is a library member as seen by callers, member_id is the phone number
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct PatronDto {
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

impl PatronDto {
    pub(crate) fn new(member_id: &str, first_name: &str, last_name: &str, birth_date: NaiveDate) -> Self {
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

impl Identifiable for PatronDto {
    fn id(&self) -> String {
        self.member_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl Patron for PatronDto {
    fn tier(&self) -> MemberTier {
        self.tier
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::core::library::MemberTier;
    use crate::patrons::domain::Patron;
    use crate::patrons::dto::PatronDto;

    #[tokio::test]
    async fn test_should_build_patron() {
        let mut patron = PatronDto::new("0611", "Ada", "Lovelace", NaiveDate::from_ymd_opt(1990, 1, 1).unwrap());
        assert!(!patron.is_premium());
        patron.tier = MemberTier::Premium;
        assert!(patron.is_premium());
    }
}
