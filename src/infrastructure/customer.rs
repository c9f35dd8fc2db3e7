use std::future::Future;
use std::slice;

use async_trait::async_trait;
use meilisearch_sdk::{
    documents::DocumentsQuery,
    errors::{Error, ErrorCode, MeilisearchError},
    indexes::Index,
    task_info::TaskInfo,
    tasks::Task,
    Client,
};

use crate::domain::customer::{
    sort_by_member_number_desc, Customer, CustomerId, CustomerRepository,
};
use crate::domain::{DataAccessError, Entity};
use crate::MeiliSearch;

const PRIMARY_KEY: &str = "_id";

#[derive(Clone)]
pub struct MeiliSearchCustomerRepository {
    client: Client,
    page_size: usize,
}

impl MeiliSearchCustomerRepository {
    pub fn new(client: Client, page_size: usize) -> Self {
        Self { client, page_size }
    }

    /// 接続を確認してリポジトリを返す
    pub async fn connect(config: &MeiliSearch) -> Result<Self, DataAccessError> {
        let client = Client::new(&config.url, &config.api_key);
        client.health().await?;
        Ok(Self::new(client, config.page_size))
    }

    fn index(&self) -> Index {
        self.client.index(Customer::ENTITY_NAME)
    }

    async fn wait_for_completion(&self, task_info: TaskInfo) -> Result<(), DataAccessError> {
        match self.client.wait_for_task(task_info, None, None).await? {
            Task::Failed { content } => {
                Err(DataAccessError::WriteError(Box::new(Error::Meilisearch(
                    content.error,
                ))))
            }
            _ => Ok(()),
        }
    }
}

fn is_not_found(error: &Error) -> bool {
    matches!(
        error,
        Error::Meilisearch(MeilisearchError {
            error_code: ErrorCode::DocumentNotFound | ErrorCode::IndexNotFound,
            ..
        })
    )
}

/// `fetch(offset, limit)` を短いページが返るまで繰り返し、全件を集める
async fn read_all_pages<T, E, F, Fut>(page_size: usize, mut fetch: F) -> Result<Vec<T>, E>
where
    F: FnMut(usize, usize) -> Fut,
    Fut: Future<Output = Result<Vec<T>, E>>,
{
    let page_size = page_size.max(1);
    let mut all = Vec::new();
    loop {
        let page = fetch(all.len(), page_size).await?;
        let last = page.len() < page_size;
        all.extend(page);
        if last {
            return Ok(all);
        }
    }
}

#[async_trait]
impl CustomerRepository for MeiliSearchCustomerRepository {
    async fn find_all(&self) -> Result<Vec<Customer>, DataAccessError> {
        let index = self.index();
        let pages = read_all_pages(self.page_size, |offset, limit| {
            let index = &index;
            async move {
                let mut query = DocumentsQuery::new(index);
                query.with_offset(offset).with_limit(limit);
                index
                    .get_documents_with::<Customer>(&query)
                    .await
                    .map(|page| page.results)
            }
        })
        .await;
        let mut customers = match pages {
            Ok(customers) => customers,
            Err(e) if is_not_found(&e) => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        sort_by_member_number_desc(&mut customers);
        Ok(customers)
    }

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, DataAccessError> {
        match self.index().get_document::<Customer>(&id.to_string()).await {
            Ok(entity) => Ok(Some(entity)),
            Err(e) if is_not_found(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn insert(&self, entity: &Customer) -> Result<(), DataAccessError> {
        let task = self
            .index()
            .add_documents(slice::from_ref(entity), Some(PRIMARY_KEY))
            .await?;
        self.wait_for_completion(task).await
    }

    async fn replace(&self, entity: &Customer) -> Result<bool, DataAccessError> {
        // 存在確認と書き込みは別リクエスト。間に削除が入ると、削除済みの文書が
        // この書き込みで復活する。meilisearch には条件付き書き込みがない。
        if self.find_by_id(entity.id()).await?.is_none() {
            return Ok(false);
        }
        let task = self
            .index()
            .add_or_replace(slice::from_ref(entity), Some(PRIMARY_KEY))
            .await?;
        self.wait_for_completion(task).await?;
        Ok(true)
    }

    async fn delete(&self, id: CustomerId) -> Result<bool, DataAccessError> {
        if self.find_by_id(id).await?.is_none() {
            return Ok(false);
        }
        let task = self.index().delete_document(id).await?;
        self.wait_for_completion(task).await?;
        Ok(true)
    }
}
