use meibo::domain::customer::{Customer, CustomerId};
use tracing::error;

use crate::api::CustomerApi;

/// 顧客詳細画面
#[derive(Debug, Default)]
pub struct CustomerDetails {
    customer: Option<Customer>,
}

impl CustomerDetails {
    pub async fn load(api: &CustomerApi, id: CustomerId) -> Self {
        match api.get(id).await {
            Ok(customer) => Self {
                customer: Some(customer),
            },
            Err(e) => {
                error!("Error fetching customer details: {}", e);
                Self::default()
            }
        }
    }

    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    pub fn render(&self) -> String {
        match &self.customer {
            Some(customer) => format!(
                "{}\nMember Number: {}\nDate of Birth: {}\nInterests: {}\n",
                customer.name(),
                customer.member_number(),
                customer.date_of_birth(),
                customer.interests().unwrap_or_default(),
            ),
            None => "Loading...\n".to_owned(),
        }
    }
}
