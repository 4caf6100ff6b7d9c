use std::collections::HashMap;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{NaiveDate, Utc};
use crate::core::library::{LibraryError, LibraryResult, MemberTier};
use crate::core::repository::Repository;
use crate::members::domain::model::MemberEntity;
use crate::members::repository::{MemberRepository, name_matches};
use crate::utils::ddb::{parse_date_attribute, parse_day_attribute, parse_item, parse_number_attribute, parse_string_attribute, scan_all, stale_or_missing, string_date, string_day};

#[derive(Debug)]
pub(crate) struct DDBMemberRepository {
    client: Client,
    table_name: String,
}

impl DDBMemberRepository {
    pub(crate) fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }
}

#[async_trait]
impl Repository<MemberEntity> for DDBMemberRepository {
    async fn create(&self, entity: &MemberEntity) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(member_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn update(&self, entity: &MemberEntity) -> LibraryResult<usize> {
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();
        self.client
            .update_item()
            .table_name(table_name)
            .key("member_id", AttributeValue::S(entity.member_id.clone()))
            .update_expression("SET version = :version, first_name = :first_name, last_name = :last_name, birth_date = :birth_date, tier = :tier, updated_at = :updated_at")
            .expression_attribute_values(":old_version", AttributeValue::N(entity.version.to_string()))
            .expression_attribute_values(":version", AttributeValue::N((entity.version + 1).to_string()))
            .expression_attribute_values(":first_name", AttributeValue::S(entity.first_name.to_string()))
            .expression_attribute_values(":last_name", AttributeValue::S(entity.last_name.to_string()))
            .expression_attribute_values(":birth_date", string_day(entity.birth_date))
            .expression_attribute_values(":tier", AttributeValue::S(entity.tier.to_string()))
            .expression_attribute_values(":updated_at", string_date(now))
            .condition_expression("attribute_exists(version) AND version = :old_version")
            .send()
            .await.map(|_| 1).map_err(|e| stale_or_missing(LibraryError::from(e), table_name, entity.member_id.as_str()))
    }

    async fn get(&self, id: &str) -> LibraryResult<MemberEntity> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .query()
            .table_name(table_name)
            .limit(2)
            .consistent_read(true)
            .key_condition_expression("member_id = :member_id")
            .expression_attribute_values(":member_id", AttributeValue::S(id.to_string()))
            .send()
            .await.map_err(LibraryError::from).and_then(|req| {
            req.items().and_then(|items| items.first()).map(map_to_member)
                .ok_or_else(|| LibraryError::not_found(format!("member not found for {}", id).as_str()))
        })
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        self.client.delete_item()
            .table_name(table_name)
            .key("member_id", AttributeValue::S(id.to_string()))
            .condition_expression("attribute_exists(member_id)")
            .send()
            .await.map(|_| 1).map_err(|e| match LibraryError::from(e) {
            LibraryError::DuplicateKey { .. } => LibraryError::not_found(format!("member not found for {}", id).as_str()),
            other => other,
        })
    }
}

#[async_trait]
impl MemberRepository for DDBMemberRepository {
    async fn find_all(&self) -> LibraryResult<Vec<MemberEntity>> {
        let items = scan_all(&self.client, self.table_name.as_str()).await?;
        let mut members: Vec<MemberEntity> = items.iter().map(map_to_member).collect();
        members.sort_by(|a, b| a.member_id.cmp(&b.member_id));
        Ok(members)
    }

    async fn search_by_name(&self, name: &str) -> LibraryResult<Vec<MemberEntity>> {
        Ok(self.find_all().await?.into_iter().filter(|m| name_matches(m, name)).collect())
    }
}

fn map_to_member(map: &HashMap<String, AttributeValue>) -> MemberEntity {
    MemberEntity {
        member_id: parse_string_attribute("member_id", map).unwrap_or(String::from("")),
        version: parse_number_attribute("version", map),
        first_name: parse_string_attribute("first_name", map).unwrap_or(String::from("")),
        last_name: parse_string_attribute("last_name", map).unwrap_or(String::from("")),
        birth_date: parse_day_attribute("birth_date", map).unwrap_or(NaiveDate::MIN),
        tier: MemberTier::from(parse_string_attribute("tier", map).unwrap_or(String::from(""))),
        created_at: parse_date_attribute("created_at", map).unwrap_or(Utc::now().naive_utc()),
        updated_at: parse_date_attribute("updated_at", map).unwrap_or(Utc::now().naive_utc()),
    }
}
