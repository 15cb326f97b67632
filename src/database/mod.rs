pub mod memory;
pub mod pool;
pub mod postgres;
pub mod postgrest;
pub mod store;

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::config::{Config, StoreBackend};
use crate::error::{Error, Result};
use self::memory::MemoryStore;
use self::postgres::PgStore;
use self::postgrest::PostgrestStore;
use self::store::Store;

/// Builds the store selected by `STORE_BACKEND`.
pub async fn connect(config: &Config) -> Result<Arc<dyn Store>> {
    let timeout = Duration::from_secs(config.store_timeout_secs);
    let store: Arc<dyn Store> = match config.store_backend {
        StoreBackend::Postgrest => {
            let base_url = config
                .supabase_url
                .as_ref()
                .ok_or_else(|| Error::Config("Missing environment variable: SUPABASE_URL".into()))?;
            let api_key = config.supabase_anon_key.as_deref().ok_or_else(|| {
                Error::Config("Missing environment variable: SUPABASE_ANON_KEY".into())
            })?;
            Arc::new(PostgrestStore::new(base_url, api_key, timeout)?)
        }
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or_else(|| Error::Config("Missing environment variable: DATABASE_URL".into()))?;
            let pool = pool::create_pool(database_url, timeout).await?;
            if config.run_migrations {
                info!("Running database migrations");
                pool::run_migrations(&pool).await?;
            }
            Arc::new(PgStore::new(pool))
        }
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
    };
    info!(backend = store.backend_name(), "Store ready");
    Ok(store)
}
