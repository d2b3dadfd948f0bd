use crate::batch::{BatchError, upsert_batch};
use crate::errors::AppError;
use crate::models::{
    AddProductForm, AddProductRequest, CountRequest, Product, SaveFailure, SaveSuccess,
    SavedProduct, SummaryResponse,
};
use crate::pricing::build_summary;
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Path, State, rejection::JsonRejection},
    http::{Method, StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use tracing::{error, info, warn};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let list = state.list.lock().await;
    let summary = build_summary(list.products(), &state.prices);
    Html(render_index(list.products(), &summary))
}

pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    let list = state.list.lock().await;
    Json(list.products().to_vec())
}

pub async fn add_product(
    State(state): State<AppState>,
    Json(payload): Json<AddProductRequest>,
) -> Result<Json<Product>, AppError> {
    let mut list = state.list.lock().await;
    let added = list.add_product(&payload.name, payload.is_premium)?.clone();
    info!("added product {:?}", added.name);
    Ok(Json(added))
}

pub async fn update_count(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(payload): Json<CountRequest>,
) -> Result<Json<Product>, AppError> {
    let mut list = state.list.lock().await;
    let updated = list.update_count(index, payload.delta)?.clone();
    Ok(Json(updated))
}

pub async fn get_summary(State(state): State<AppState>) -> Json<SummaryResponse> {
    let list = state.list.lock().await;
    Json(build_summary(list.products(), &state.prices))
}

pub async fn form_add_product(
    State(state): State<AppState>,
    Form(form): Form<AddProductForm>,
) -> Redirect {
    let is_premium = form.is_premium.is_some();
    let mut list = state.list.lock().await;
    if let Err(err) = list.add_product(&form.name, is_premium) {
        warn!("add product rejected: {err}");
    }
    Redirect::to("/")
}

pub async fn form_increment(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Redirect, AppError> {
    apply_delta(&state, index, 1).await?;
    Ok(Redirect::to("/"))
}

pub async fn form_decrement(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Redirect, AppError> {
    apply_delta(&state, index, -1).await?;
    Ok(Redirect::to("/"))
}

async fn apply_delta(state: &AppState, index: usize, delta: i64) -> Result<Product, AppError> {
    let mut list = state.list.lock().await;
    Ok(list.update_count(index, delta)?.clone())
}

pub async fn list_saved(State(state): State<AppState>) -> Json<Vec<SavedProduct>> {
    Json(state.store.all().await)
}

pub async fn save_products(
    State(state): State<AppState>,
    payload: Result<Json<Vec<Product>>, JsonRejection>,
) -> Response {
    let products = match payload {
        Ok(Json(products)) => products,
        Err(rejection) => {
            error!("saveProducts body rejected: {rejection}");
            return save_failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                Vec::new(),
            );
        }
    };

    match upsert_batch(&state.store, products, state.store_timeout).await {
        Ok(data) => (StatusCode::OK, Json(SaveSuccess { success: true, data })).into_response(),
        Err(BatchError::Timeout(limit)) => {
            error!("saveProducts timed out after {}ms", limit.as_millis());
            save_failure(StatusCode::GATEWAY_TIMEOUT, "Store Timeout", Vec::new())
        }
        Err(BatchError::Partial { failed }) => {
            error!("saveProducts failed for {} records", failed.len());
            save_failure(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", failed)
        }
        Err(err) => {
            error!("saveProducts failed: {err}");
            save_failure(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", Vec::new())
        }
    }
}

pub async fn save_products_not_allowed(method: Method) -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
        format!("Method {method} Not Allowed"),
    )
        .into_response()
}

fn save_failure(status: StatusCode, error: &'static str, failed: Vec<String>) -> Response {
    let body = SaveFailure {
        success: false,
        error,
        failed,
    };
    (status, Json(body)).into_response()
}
