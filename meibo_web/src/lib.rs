pub mod customer;
pub mod error;

use std::sync::Arc;

use axum::{routing::get, Router};
use meibo::domain::{customer::CustomerRepository, IdGeneratorTask};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn CustomerRepository>,
    pub ids: IdGeneratorTask,
}

impl AppState {
    pub fn new(repository: Arc<dyn CustomerRepository>, ids: IdGeneratorTask) -> Self {
        Self { repository, ids }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route(
            "/customer",
            get(customer::list)
                .post(customer::create)
                .put(customer::update)
                .delete(customer::delete),
        )
        .route("/customer/:id", get(customer::find))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
