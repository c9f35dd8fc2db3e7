use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use meibo::domain::customer::{Customer, CustomerDraft, CustomerId, CustomerKey, CustomerUpdate};
use meibo::domain::Entity;
use tracing::{debug, info};

use crate::error::{ApiError, MessageBody};
use crate::AppState;

/// 全顧客を会員番号の降順で返す
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Customer>>, ApiError> {
    let customers = state
        .repository
        .find_all()
        .await
        .map_err(ApiError::store("Error fetching customers"))?;
    Ok(Json(customers))
}

pub async fn find(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Customer>, ApiError> {
    let id = id
        .parse::<CustomerId>()
        .map_err(|e| ApiError::InvalidId(e.to_string()))?;
    state
        .repository
        .find_by_id(id)
        .await
        .map_err(ApiError::store("Error fetching customer"))?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// 顧客を登録し、採番済みのIDを含めて返す
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CustomerDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    let Json(draft) = payload?;
    debug!("顧客登録リクエスト: {:?}", draft);
    draft.validate()?;
    let id = state
        .ids
        .generate::<CustomerId>()
        .await
        .map_err(|e| ApiError::Server {
            message: "Error creating customer",
            source: Box::new(e),
        })?;
    let customer = Customer::create(id, draft)?;
    state
        .repository
        .insert(&customer)
        .await
        .map_err(ApiError::store("Error creating customer"))?;
    info!("顧客を登録しました: {}", customer.id());
    Ok((StatusCode::CREATED, Json(customer)))
}

/// 顧客の全項目を置き換える
pub async fn update(
    State(state): State<AppState>,
    payload: Result<Json<CustomerUpdate>, JsonRejection>,
) -> Result<Json<Customer>, ApiError> {
    let Json(CustomerUpdate { id, draft }) = payload?;
    let customer = Customer::create(id, draft)?;
    let replaced = state
        .repository
        .replace(&customer)
        .await
        .map_err(ApiError::store("Error updating customer"))?;
    if !replaced {
        return Err(ApiError::NotFound);
    }
    info!("顧客を更新しました: {}", id);
    Ok(Json(customer))
}

pub async fn delete(
    State(state): State<AppState>,
    payload: Result<Json<CustomerKey>, JsonRejection>,
) -> Result<Json<MessageBody>, ApiError> {
    let Json(CustomerKey { id }) = payload?;
    let deleted = state
        .repository
        .delete(id)
        .await
        .map_err(ApiError::store("Error deleting customer"))?;
    if !deleted {
        return Err(ApiError::NotFound);
    }
    info!("顧客を削除しました: {}", id);
    Ok(Json(MessageBody::new("Customer deleted successfully")))
}
