use async_trait::async_trait;
use chrono::NaiveDate;
use derive_more::{Deref, Display, Error, From};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use std::str::FromStr;

use crate::domain::{DataAccessError, Entity, Id};

/// 顧客リポジトリ
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// 全顧客を会員番号の降順で取得する
    async fn find_all(&self) -> Result<Vec<Customer>, DataAccessError>;
    /// 顧客をIDで検索する
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, DataAccessError>;
    /// 顧客を登録する
    async fn insert(&self, entity: &Customer) -> Result<(), DataAccessError>;
    /// 顧客を置き換える。対象が存在しなければ `false`
    async fn replace(&self, entity: &Customer) -> Result<bool, DataAccessError>;
    /// 顧客を削除する。対象が存在しなければ `false`
    async fn delete(&self, id: CustomerId) -> Result<bool, DataAccessError>;
}

/// 顧客ID
///
/// JSON上は10進数の文字列で表す。
#[serde_as]
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    From,
    Deref,
)]
pub struct CustomerId(#[serde_as(as = "DisplayFromStr")] u64);

impl Id for CustomerId {
    type Inner = u64;
}

impl FromStr for CustomerId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(CustomerId)
    }
}

/// 顧客の入力内容（IDを除く全項目）
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub member_number: i64,
    #[serde(default)]
    pub interests: Option<String>,
}

impl CustomerDraft {
    pub fn validate(&self) -> Result<(), CustomerError> {
        match self.name.trim().is_empty() {
            true => Err(CustomerError::NameIsBlank),
            false => Ok(()),
        }
    }
}

/// 顧客の更新要求
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerUpdate {
    #[serde(rename = "_id")]
    pub id: CustomerId,
    #[serde(flatten)]
    pub draft: CustomerDraft,
}

/// 顧客の削除要求
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerKey {
    #[serde(alias = "_id")]
    pub id: CustomerId,
}

/// 顧客エンティティ
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(rename = "_id")]
    id: CustomerId,
    #[serde(flatten)]
    draft: CustomerDraft,
}

impl Customer {
    pub fn create(id: CustomerId, draft: CustomerDraft) -> Result<Self, CustomerError> {
        draft.validate()?;
        Ok(Self { id, draft })
    }

    /// 全項目を置き換える
    pub fn replace(&mut self, draft: CustomerDraft) -> Result<(), CustomerError> {
        draft.validate()?;
        self.draft = draft;
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.draft.name
    }

    pub fn date_of_birth(&self) -> NaiveDate {
        self.draft.date_of_birth
    }

    pub fn member_number(&self) -> i64 {
        self.draft.member_number
    }

    pub fn interests(&self) -> Option<&str> {
        self.draft.interests.as_deref()
    }

    pub fn draft(&self) -> &CustomerDraft {
        &self.draft
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    const ENTITY_NAME: &'static str = "customer";

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// 会員番号の降順に並べる。同じ会員番号どうしの順序は問わない。
pub fn sort_by_member_number_desc(customers: &mut [Customer]) {
    customers.sort_unstable_by(|a, b| b.member_number().cmp(&a.member_number()));
}

/// 顧客エラー
#[derive(Error, Display, Debug, PartialEq, Eq)]
pub enum CustomerError {
    /// 名前が空欄です
    #[display(fmt = "Name cannot be blank")]
    NameIsBlank,
}

impl From<CustomerError> for DataAccessError {
    fn from(value: CustomerError) -> Self {
        Self::ClientSideError(Box::new(value))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn draft(name: &str, member_number: i64) -> CustomerDraft {
        CustomerDraft {
            name: name.to_owned(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            member_number,
            interests: Some("chess".to_owned()),
        }
    }

    #[test]
    fn test_customer_create() {
        let customer = Customer::create(CustomerId(30), draft("Ann", 5)).unwrap();
        assert_eq!(customer.id(), CustomerId(30));
        assert_eq!(customer.name(), "Ann");
        assert_eq!(
            customer.date_of_birth(),
            NaiveDate::from_ymd_opt(1990, 1, 1).unwrap()
        );
        assert_eq!(customer.member_number(), 5);
        assert_eq!(customer.interests(), Some("chess"));
    }

    #[test]
    fn test_blank_name_is_rejected() {
        assert_eq!(
            Customer::create(CustomerId(1), draft("   ", 5)),
            Err(CustomerError::NameIsBlank)
        );
        let mut customer = Customer::create(CustomerId(1), draft("Ann", 5)).unwrap();
        assert_eq!(customer.replace(draft("", 9)), Err(CustomerError::NameIsBlank));
        assert_eq!(customer.member_number(), 5);
    }

    #[test]
    fn test_replace_keeps_id() {
        let mut customer = Customer::create(CustomerId(7), draft("Ann", 5)).unwrap();
        customer.replace(draft("Bob", 9)).unwrap();
        assert_eq!(customer.id(), CustomerId(7));
        assert_eq!(customer.name(), "Bob");
        assert_eq!(customer.member_number(), 9);
    }

    #[test]
    fn test_customer_json() {
        let customer = Customer::create(CustomerId(7012345678901234567), draft("Ann", 5)).unwrap();
        assert_eq!(
            serde_json::to_value(&customer).unwrap(),
            json!({
                "_id": "7012345678901234567",
                "name": "Ann",
                "dateOfBirth": "1990-01-01",
                "memberNumber": 5,
                "interests": "chess",
            })
        );
    }

    #[test]
    fn test_draft_ignores_id_and_allows_missing_interests() {
        let draft: CustomerDraft = serde_json::from_value(json!({
            "_id": "99",
            "name": "Ann",
            "dateOfBirth": "1990-01-01",
            "memberNumber": 5,
        }))
        .unwrap();
        assert_eq!(draft.interests, None);
        assert_eq!(draft.member_number, 5);
    }

    #[test]
    fn test_draft_requires_fields() {
        let result = serde_json::from_value::<CustomerDraft>(json!({
            "name": "Ann",
            "memberNumber": 5,
        }));
        assert!(result.is_err());
        let result = serde_json::from_value::<CustomerDraft>(json!({
            "name": "Ann",
            "dateOfBirth": "01/01/1990",
            "memberNumber": 5,
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_interests_serialize_as_null() {
        let draft: CustomerDraft = serde_json::from_value(json!({
            "name": "Ann",
            "dateOfBirth": "1990-01-01",
            "memberNumber": 5,
            "interests": null,
        }))
        .unwrap();
        let customer = Customer::create(CustomerId(8), draft).unwrap();
        assert_eq!(
            serde_json::to_value(&customer).unwrap(),
            json!({
                "_id": "8",
                "name": "Ann",
                "dateOfBirth": "1990-01-01",
                "memberNumber": 5,
                "interests": null,
            })
        );
    }

    #[test]
    fn test_member_number_must_be_a_json_integer() {
        let result = serde_json::from_value::<CustomerDraft>(json!({
            "name": "Ann",
            "dateOfBirth": "1990-01-01",
            "memberNumber": "5",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_update_and_key_json() {
        let update: CustomerUpdate = serde_json::from_value(json!({
            "_id": "42",
            "name": "Ann",
            "dateOfBirth": "1990-01-01",
            "memberNumber": 9,
            "interests": "go",
        }))
        .unwrap();
        assert_eq!(update.id, CustomerId(42));
        assert_eq!(update.draft.member_number, 9);

        let key: CustomerKey = serde_json::from_value(json!({ "id": "42" })).unwrap();
        assert_eq!(key.id, CustomerId(42));
        let key: CustomerKey = serde_json::from_value(json!({ "_id": "42" })).unwrap();
        assert_eq!(key.id, CustomerId(42));
    }

    #[test]
    fn test_sort_by_member_number_desc() {
        let mut customers = vec![
            Customer::create(CustomerId(1), draft("A", 3)).unwrap(),
            Customer::create(CustomerId(2), draft("B", 10)).unwrap(),
            Customer::create(CustomerId(3), draft("C", -1)).unwrap(),
            Customer::create(CustomerId(4), draft("D", 3)).unwrap(),
        ];
        sort_by_member_number_desc(&mut customers);
        let numbers: Vec<i64> = customers.iter().map(Customer::member_number).collect();
        assert_eq!(numbers, vec![10, 3, 3, -1]);
    }

    #[test]
    fn test_customer_id_from_str() {
        assert_eq!("123".parse::<CustomerId>(), Ok(CustomerId(123)));
        assert!("abc".parse::<CustomerId>().is_err());
    }
}
