pub mod types;
pub mod config;
pub mod responses;
pub mod store;
pub mod players;

use aws_sdk_dynamodb::Client as DynamoClient;
use config::StoreConfig;
use std::sync::Arc;
use store::{DynamoUserStore, StoreError, SupabaseUserStore, UserStore};

/// Shared application state
pub struct AppState {
    pub store: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>) -> Arc<Self> {
        Arc::new(Self { store })
    }

    /// Build the configured user store once at startup
    pub async fn from_config(config: StoreConfig) -> Result<Arc<Self>, StoreError> {
        let store: Arc<dyn UserStore> = match config {
            StoreConfig::Supabase(supabase) => {
                tracing::info!("Using Supabase user store at {}", supabase.url);
                Arc::new(SupabaseUserStore::new(supabase)?)
            }
            StoreConfig::DynamoDb { table_name } => {
                tracing::info!("Using DynamoDB user store, table {}", table_name);
                let aws_config = aws_config::load_from_env().await;
                Arc::new(DynamoUserStore::new(DynamoClient::new(&aws_config), table_name))
            }
        };
        Ok(Self::new(store))
    }
}
