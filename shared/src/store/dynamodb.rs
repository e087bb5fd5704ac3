use async_trait::async_trait;
use aws_sdk_dynamodb::{types::AttributeValue, Client as DynamoClient};
use std::collections::HashMap;
use std::future::Future;

use super::{single_row, StoreError, UserStore};
use crate::types::{UserId, UserRecord};

const USER_PREFIX: &str = "USER#";

type Item = HashMap<String, AttributeValue>;

struct ScanPage {
    items: Vec<Item>,
    last_evaluated_key: Option<Item>,
}

/// Users kept in a single DynamoDB table with PK=USER#id, SK=USER#id
pub struct DynamoUserStore {
    client: DynamoClient,
    table_name: String,
}

impl DynamoUserStore {
    pub fn new(client: DynamoClient, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    async fn scan_page(&self, role: &str, start_key: Option<Item>) -> Result<ScanPage, StoreError> {
        let result = self
            .client
            .scan()
            .table_name(&self.table_name)
            .filter_expression("begins_with(PK, :prefix) AND #role = :role")
            .expression_attribute_names("#role", "role")
            .expression_attribute_values(":prefix", AttributeValue::S(USER_PREFIX.to_string()))
            .expression_attribute_values(":role", AttributeValue::S(role.to_string()))
            .set_exclusive_start_key(start_key)
            .send()
            .await
            .map_err(|e| StoreError::DynamoDb(e.to_string()))?;

        Ok(ScanPage {
            items: result.items.unwrap_or_default(),
            last_evaluated_key: result.last_evaluated_key,
        })
    }
}

#[async_trait]
impl UserStore for DynamoUserStore {
    async fn find_single_by_role(&self, role: &str) -> Result<Option<UserRecord>, StoreError> {
        let rows = collect_matches(move |start_key| self.scan_page(role, start_key)).await?;
        single_row(rows)
    }

    fn backend(&self) -> &'static str {
        "dynamodb"
    }
}

/// Scan filters after reading each page, so keep paging until there are
/// enough matches to decide (two) or the table is exhausted.
async fn collect_matches<F, Fut>(mut next_page: F) -> Result<Vec<UserRecord>, StoreError>
where
    F: FnMut(Option<Item>) -> Fut,
    Fut: Future<Output = Result<ScanPage, StoreError>>,
{
    let mut rows = Vec::new();
    let mut start_key = None;

    loop {
        let page = next_page(start_key.take()).await?;
        for item in &page.items {
            rows.push(record_from_item(item)?);
        }

        if rows.len() > 1 {
            return Ok(rows);
        }

        match page.last_evaluated_key {
            Some(key) if !key.is_empty() => start_key = Some(key),
            _ => return Ok(rows),
        }
    }
}

/// Build a record from a user item. `user_id` wins over the PK suffix when present.
fn record_from_item(item: &Item) -> Result<UserRecord, StoreError> {
    let id = match item.get("user_id") {
        Some(AttributeValue::S(s)) => UserId::Text(s.clone()),
        Some(AttributeValue::N(n)) => n
            .parse::<i64>()
            .map(UserId::Number)
            .map_err(|_| StoreError::Malformed(format!("non-integer user_id {}", n)))?,
        _ => item
            .get("PK")
            .and_then(|v| v.as_s().ok())
            .and_then(|pk| pk.strip_prefix(USER_PREFIX))
            .map(UserId::from)
            .ok_or_else(|| StoreError::Malformed("missing PK".to_string()))?,
    };

    let role = item
        .get("role")
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| StoreError::Malformed(format!("missing role for {}", id)))?;

    Ok(UserRecord { id, role })
}
