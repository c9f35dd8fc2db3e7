use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::customer::{
    sort_by_member_number_desc, Customer, CustomerId, CustomerRepository,
};
use crate::domain::{DataAccessError, Entity};

/// プロセス内に保持する顧客リポジトリ。ローカル実行とテスト用。
#[derive(Debug, Default)]
pub struct InMemoryCustomerRepository {
    documents: RwLock<HashMap<CustomerId, Customer>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_all(&self) -> Result<Vec<Customer>, DataAccessError> {
        let mut customers: Vec<Customer> = self.documents.read().await.values().cloned().collect();
        sort_by_member_number_desc(&mut customers);
        Ok(customers)
    }

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, DataAccessError> {
        Ok(self.documents.read().await.get(&id).cloned())
    }

    async fn insert(&self, entity: &Customer) -> Result<(), DataAccessError> {
        let mut documents = self.documents.write().await;
        if documents.contains_key(&entity.id()) {
            return Err(DataAccessError::WriteError(
                format!("document {} already exists", entity.id()).into(),
            ));
        }
        documents.insert(entity.id(), entity.clone());
        Ok(())
    }

    async fn replace(&self, entity: &Customer) -> Result<bool, DataAccessError> {
        match self.documents.write().await.get_mut(&entity.id()) {
            Some(document) => {
                *document = entity.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: CustomerId) -> Result<bool, DataAccessError> {
        Ok(self.documents.write().await.remove(&id).is_some())
    }
}
