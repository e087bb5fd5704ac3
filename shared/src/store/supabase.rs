use async_trait::async_trait;

use super::{single_row, StoreError, UserStore};
use crate::config::SupabaseConfig;
use crate::types::UserRecord;

/// Users table exposed through Supabase's PostgREST API
#[derive(Debug)]
pub struct SupabaseUserStore {
    config: SupabaseConfig,
    client: reqwest::Client,
}

impl SupabaseUserStore {
    pub fn new(config: SupabaseConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { config, client })
    }

    /// Query parameters for `select id, role ... where role = eq.<role>`.
    /// Two rows are enough to tell "one" from "more than one".
    fn role_query(role: &str) -> [(&'static str, String); 3] {
        [
            ("select", "id,role".to_string()),
            ("role", format!("eq.{}", role)),
            ("limit", "2".to_string()),
        ]
    }
}

#[async_trait]
impl UserStore for SupabaseUserStore {
    async fn find_single_by_role(&self, role: &str) -> Result<Option<UserRecord>, StoreError> {
        let url = self.config.table_url();
        tracing::debug!("Querying {} for role={}", url, role);

        let response = self
            .client
            .get(&url)
            .query(&Self::role_query(role))
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status { status: status.as_u16(), body });
        }

        let bytes = response.bytes().await?;
        let rows: Vec<UserRecord> = serde_json::from_slice(&bytes)?;
        single_row(rows)
    }

    fn backend(&self) -> &'static str {
        "supabase"
    }
}
