pub mod dynamodb;
pub mod supabase;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::UserRecord;

pub use dynamodb::DynamoUserStore;
pub use supabase::SupabaseUserStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request to user store failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("user store returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode user row: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("expected a single row, got {0}")]
    MultipleRows(usize),

    #[error("malformed user item: {0}")]
    Malformed(String),

    #[error("DynamoDB error: {0}")]
    DynamoDb(String),
}

/// Read-only access to the user collection
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Select `id, role` where `role` equals the given value, expecting at
    /// most one row. More than one row is an error, not a pick.
    async fn find_single_by_role(&self, role: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Backend name for logs
    fn backend(&self) -> &'static str;
}

/// Collapse a result set to the single-row contract
pub(crate) fn single_row(mut rows: Vec<UserRecord>) -> Result<Option<UserRecord>, StoreError> {
    match rows.len() {
        0 => Ok(None),
        1 => Ok(rows.pop()),
        n => Err(StoreError::MultipleRows(n)),
    }
}
