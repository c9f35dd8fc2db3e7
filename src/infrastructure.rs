mod customer;
mod memory;

use std::sync::Arc;

use meilisearch_sdk::errors::Error;
use tracing::info;

use crate::domain::{customer::CustomerRepository, DataAccessError};
use crate::{Backend, MeiboConfig};

pub use self::customer::*;
pub use self::memory::*;

impl From<Error> for DataAccessError {
    fn from(value: Error) -> Self {
        match value {
            Error::Meilisearch(_) => Self::QueryError(Box::new(value)),
            Error::ParseError(_) => Self::ReadError(Box::new(value)),
            _ => Self::ConnectionError(Box::new(value)),
        }
    }
}

/// 設定に従って顧客リポジトリを用意する
pub async fn connect(config: &MeiboConfig) -> Result<Arc<dyn CustomerRepository>, DataAccessError> {
    match config.store.backend {
        Backend::MeiliSearch => {
            let meilisearch = config.meilisearch.as_ref().ok_or_else(|| {
                DataAccessError::ConnectionError("[meilisearch] section is missing".into())
            })?;
            info!("meilisearch に接続します: {}", meilisearch.url);
            let repository = MeiliSearchCustomerRepository::connect(meilisearch).await?;
            Ok(Arc::new(repository))
        }
        Backend::Memory => {
            info!("インメモリストアを使用します");
            Ok(Arc::new(InMemoryCustomerRepository::new()))
        }
    }
}
