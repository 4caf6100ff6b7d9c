use std::collections::HashMap;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use chrono::{NaiveDate, Utc};
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;
use crate::loans::domain::model::LoanEntity;
use crate::loans::repository::LoanRepository;
use crate::utils::ddb::{opt_string_day, parse_date_attribute, parse_day_attribute, parse_number_attribute, parse_string_attribute, scan_all, stale_or_missing, string_date, string_day};

// DDBLoanRepository keeps loans keyed by the string form of loan_id and draws new ids
// from an atomic counter item in the sequences table.
#[derive(Debug)]
pub(crate) struct DDBLoanRepository {
    client: Client,
    table_name: String,
    sequence_table: String,
}

impl DDBLoanRepository {
    pub(crate) fn new(client: Client, table_name: &str, sequence_table: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            sequence_table: sequence_table.to_string(),
        }
    }

    async fn next_loan_id(&self) -> LibraryResult<i64> {
        let res = self.client
            .update_item()
            .table_name(self.sequence_table.as_str())
            .key("sequence_id", AttributeValue::S("loans".to_string()))
            .update_expression("ADD next_id :one")
            .expression_attribute_values(":one", AttributeValue::N("1".to_string()))
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await.map_err(LibraryError::from)?;
        res.attributes().map(|attrs| parse_number_attribute("next_id", attrs))
            .filter(|id| *id > 0)
            .ok_or_else(|| LibraryError::database("loan sequence returned no id", None, false))
    }

    async fn find_matching<F: Fn(&LoanEntity) -> bool>(&self, filter: F) -> LibraryResult<Vec<LoanEntity>> {
        let items = scan_all(&self.client, self.table_name.as_str()).await?;
        let mut loans: Vec<LoanEntity> = items.iter().map(map_to_loan).filter(|l| filter(l)).collect();
        loans.sort_by_key(|l| l.loan_id);
        Ok(loans)
    }
}

#[async_trait]
impl Repository<LoanEntity> for DDBLoanRepository {
    async fn create(&self, entity: &LoanEntity) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(loan_id)")
            .set_item(Some(loan_to_item(entity)))
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn update(&self, entity: &LoanEntity) -> LibraryResult<usize> {
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();
        self.client
            .update_item()
            .table_name(table_name)
            .key("loan_id", AttributeValue::S(entity.loan_id.to_string()))
            .update_expression("SET version = :version, isbn = :isbn, member_id = :member_id, loan_date = :loan_date, return_date = :return_date, updated_at = :updated_at")
            .expression_attribute_values(":old_version", AttributeValue::N(entity.version.to_string()))
            .expression_attribute_values(":version", AttributeValue::N((entity.version + 1).to_string()))
            .expression_attribute_values(":isbn", AttributeValue::S(entity.isbn.to_string()))
            .expression_attribute_values(":member_id", AttributeValue::S(entity.member_id.to_string()))
            .expression_attribute_values(":loan_date", string_day(entity.loan_date))
            .expression_attribute_values(":return_date", opt_string_day(entity.return_date))
            .expression_attribute_values(":updated_at", string_date(now))
            .condition_expression("attribute_exists(version) AND version = :old_version")
            .send()
            .await.map(|_| 1).map_err(|e| stale_or_missing(LibraryError::from(e), table_name, entity.loan_id.to_string().as_str()))
    }

    async fn get(&self, id: &str) -> LibraryResult<LoanEntity> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .query()
            .table_name(table_name)
            .limit(2)
            .consistent_read(true)
            .key_condition_expression("loan_id = :loan_id")
            .expression_attribute_values(":loan_id", AttributeValue::S(id.to_string()))
            .send()
            .await.map_err(LibraryError::from).and_then(|req| {
            req.items().and_then(|items| items.first()).map(map_to_loan)
                .ok_or_else(|| LibraryError::not_found(format!("loan not found for {}", id).as_str()))
        })
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        self.client.delete_item()
            .table_name(table_name)
            .key("loan_id", AttributeValue::S(id.to_string()))
            .condition_expression("attribute_exists(loan_id)")
            .send()
            .await.map(|_| 1).map_err(|e| match LibraryError::from(e) {
            LibraryError::DuplicateKey { .. } => LibraryError::not_found(format!("loan not found for {}", id).as_str()),
            other => other,
        })
    }
}

#[async_trait]
impl LoanRepository for DDBLoanRepository {
    async fn create_loan(&self, isbn: &str, member_id: &str,
                         loan_date: NaiveDate, return_date: Option<NaiveDate>) -> LibraryResult<LoanEntity> {
        let loan_id = self.next_loan_id().await?;
        let loan = LoanEntity::new(loan_id, isbn, member_id, loan_date, return_date);
        self.create(&loan).await?;
        Ok(loan)
    }

    async fn mark_returned(&self, loan_id: i64, return_date: NaiveDate) -> LibraryResult<LoanEntity> {
        let mut loan = self.find_loan(loan_id).await?;
        loan.return_date = Some(return_date);
        self.update(&loan).await?;
        self.find_loan(loan_id).await
    }

    async fn find_loan(&self, loan_id: i64) -> LibraryResult<LoanEntity> {
        self.get(loan_id.to_string().as_str()).await
            .map_err(|e| if e.is_not_found() { LibraryError::loan_not_found(loan_id) } else { e })
    }

    async fn delete_loan(&self, loan_id: i64) -> LibraryResult<()> {
        self.delete(loan_id.to_string().as_str()).await.map(|_| ())
            .map_err(|e| if e.is_not_found() { LibraryError::loan_not_found(loan_id) } else { e })
    }

    async fn list_loans(&self) -> LibraryResult<Vec<LoanEntity>> {
        self.find_matching(|_| true).await
    }

    async fn list_loans_by_member(&self, member_id: &str) -> LibraryResult<Vec<LoanEntity>> {
        self.find_matching(|l| l.member_id == member_id).await
    }

    async fn list_loans_by_book(&self, isbn: &str) -> LibraryResult<Vec<LoanEntity>> {
        self.find_matching(|l| l.isbn == isbn).await
    }
}

fn loan_to_item(loan: &LoanEntity) -> HashMap<String, AttributeValue> {
    HashMap::from([
        ("loan_id".to_string(), AttributeValue::S(loan.loan_id.to_string())),
        ("version".to_string(), AttributeValue::N(loan.version.to_string())),
        ("isbn".to_string(), AttributeValue::S(loan.isbn.to_string())),
        ("member_id".to_string(), AttributeValue::S(loan.member_id.to_string())),
        ("loan_date".to_string(), string_day(loan.loan_date)),
        ("return_date".to_string(), opt_string_day(loan.return_date)),
        ("created_at".to_string(), string_date(loan.created_at)),
        ("updated_at".to_string(), string_date(loan.updated_at)),
    ])
}

fn map_to_loan(map: &HashMap<String, AttributeValue>) -> LoanEntity {
    LoanEntity {
        loan_id: parse_string_attribute("loan_id", map).and_then(|id| id.parse::<i64>().ok()).unwrap_or(0),
        version: parse_number_attribute("version", map),
        isbn: parse_string_attribute("isbn", map).unwrap_or(String::from("")),
        member_id: parse_string_attribute("member_id", map).unwrap_or(String::from("")),
        loan_date: parse_day_attribute("loan_date", map).unwrap_or(NaiveDate::MIN),
        return_date: parse_day_attribute("return_date", map),
        created_at: parse_date_attribute("created_at", map).unwrap_or(Utc::now().naive_utc()),
        updated_at: parse_date_attribute("updated_at", map).unwrap_or(Utc::now().naive_utc()),
    }
}
