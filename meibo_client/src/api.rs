use meibo::domain::customer::{Customer, CustomerDraft, CustomerId, CustomerKey, CustomerUpdate};
use meibo::MeiboConfig;
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{status}: {message}")]
    Status { status: StatusCode, message: String },
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// `/customer` エンドポイントのHTTPクライアント
#[derive(Clone, Debug)]
pub struct CustomerApi {
    client: reqwest::Client,
    endpoint: String,
}

impl CustomerApi {
    pub fn new(api_base: &str) -> Self {
        Self::with_client(reqwest::Client::new(), api_base)
    }

    pub fn from_config(config: &MeiboConfig) -> Self {
        Self::new(&config.client.api_base)
    }

    pub fn with_client(client: reqwest::Client, api_base: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/customer", api_base.trim_end_matches('/')),
        }
    }

    pub async fn list(&self) -> Result<Vec<Customer>, ClientError> {
        let response = self.client.get(&self.endpoint).send().await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn get(&self, id: CustomerId) -> Result<Customer, ClientError> {
        let response = self
            .client
            .get(format!("{}/{}", self.endpoint, id))
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn create(&self, draft: &CustomerDraft) -> Result<Customer, ClientError> {
        let response = self.client.post(&self.endpoint).json(draft).send().await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn update(&self, update: &CustomerUpdate) -> Result<Customer, ClientError> {
        let response = self.client.put(&self.endpoint).json(update).send().await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn delete(&self, id: CustomerId) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(&self.endpoint)
            .json(&CustomerKey { id })
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await?;
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.message)
        .unwrap_or(text);
    Err(ClientError::Status { status, message })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() {
        assert_eq!(
            CustomerApi::new("http://localhost:8080/").endpoint,
            "http://localhost:8080/customer"
        );
        assert_eq!(
            CustomerApi::new("https://example.com/api").endpoint,
            "https://example.com/api/customer"
        );
    }

    #[test]
    fn test_from_config() {
        let config = MeiboConfig {
            server: meibo::Server {
                address: "0.0.0.0:8080".to_owned(),
                tls: None,
            },
            store: meibo::Store {
                backend: meibo::Backend::Memory,
            },
            meilisearch: None,
            client: meibo::Client {
                api_base: "http://members.local:8080/".to_owned(),
            },
            logger: meibo::Logger {
                level: meibo::Level::INFO,
            },
        };
        assert_eq!(
            CustomerApi::from_config(&config).endpoint,
            "http://members.local:8080/customer"
        );
    }
}
