use std::fmt::Write;

use meibo::domain::customer::{Customer, CustomerId, CustomerUpdate};
use meibo::domain::Entity;
use tracing::{error, warn};

use crate::api::CustomerApi;
use crate::form::CustomerForm;

/// 顧客一覧画面の状態
///
/// 一覧はサーバから取得した内容をそのまま保持し、登録・更新・削除が成功するたびに
/// 全件を取得し直す。失敗はログに出すだけで、状態は巻き戻さない。
#[derive(Debug)]
pub struct CustomerPage {
    api: CustomerApi,
    customers: Vec<Customer>,
    editing: Option<CustomerId>,
    pub form: CustomerForm,
}

impl CustomerPage {
    pub fn new(api: CustomerApi) -> Self {
        Self {
            api,
            customers: Vec::new(),
            editing: None,
            form: CustomerForm::default(),
        }
    }

    pub async fn mount(&mut self) {
        self.fetch_customers().await;
    }

    pub async fn fetch_customers(&mut self) {
        match self.api.list().await {
            Ok(customers) => self.customers = customers,
            Err(e) => error!("Error fetching customers: {}", e),
        }
    }

    pub async fn create_customer(&mut self) {
        let draft = match self.form.to_draft() {
            Ok(draft) => draft,
            Err(e) => {
                warn!("Error creating customer: {}", e);
                return;
            }
        };
        match self.api.create(&draft).await {
            Ok(_) => {
                self.fetch_customers().await;
                self.form.clear();
            }
            Err(e) => error!("Error creating customer: {}", e),
        }
    }

    pub async fn delete_customer(&mut self, id: CustomerId) {
        match self.api.delete(id).await {
            Ok(()) => self.fetch_customers().await,
            Err(e) => error!("Error deleting customer: {}", e),
        }
    }

    /// 編集画面を開き、フォームに選択した顧客の内容を入れる
    pub fn open_edit(&mut self, customer: &Customer) {
        self.form = CustomerForm::from(customer);
        self.editing = Some(customer.id());
    }

    pub fn close_edit(&mut self) {
        self.editing = None;
    }

    pub async fn update_customer(&mut self) {
        let Some(id) = self.editing else {
            warn!("Error updating customer: no customer is being edited");
            return;
        };
        let draft = match self.form.to_draft() {
            Ok(draft) => draft,
            Err(e) => {
                warn!("Error updating customer: {}", e);
                return;
            }
        };
        match self.api.update(&CustomerUpdate { id, draft }).await {
            Ok(_) => {
                self.fetch_customers().await;
                self.editing = None;
                self.form.clear();
            }
            Err(e) => error!("Error updating customer: {}", e),
        }
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn editing(&self) -> Option<CustomerId> {
        self.editing
    }

    pub fn render(&self) -> String {
        let mut out = format!("Customers ({})\n", self.customers.len());
        for customer in &self.customers {
            let _ = writeln!(
                out,
                "{} (Member {})",
                customer.name(),
                customer.member_number()
            );
        }
        out
    }
}
