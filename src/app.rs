use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/products/add", post(handlers::form_add_product))
        .route("/products/:index/increment", post(handlers::form_increment))
        .route("/products/:index/decrement", post(handlers::form_decrement))
        .route(
            "/api/products",
            get(handlers::list_products).post(handlers::add_product),
        )
        .route("/api/products/:index/count", post(handlers::update_count))
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/saved", get(handlers::list_saved))
        .route(
            "/api/saveProducts",
            post(handlers::save_products).fallback(handlers::save_products_not_allowed),
        )
        .with_state(state)
}
