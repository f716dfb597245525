use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use stockroom_core::{OrderId, ProductId};
use stockroom_orders::Order;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_order))
        .route("/:id", get(get_order))
        .route("/:id/process", post(process_order))
}

pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateOrderRequest>,
) -> axum::response::Response {
    // Resolve every item up front; an order never holds dangling links.
    let mut items = Vec::with_capacity(body.product_ids.len());
    for raw in &body.product_ids {
        let product_id: ProductId = match raw.parse() {
            Ok(v) => v,
            Err(_) => {
                return errors::json_error(
                    StatusCode::BAD_REQUEST,
                    "invalid_id",
                    format!("invalid product id: {raw}"),
                )
            }
        };

        match services.products_get(product_id) {
            Some(product) => items.push(product),
            None => {
                return errors::json_error(
                    StatusCode::BAD_REQUEST,
                    "unknown_product",
                    format!("product {product_id} does not exist"),
                )
            }
        }
    }

    let saved = match services.orders_save(Order::new(OrderId::new(), items)) {
        Ok(o) => o,
        Err(e) => return errors::store_error_to_response(e),
    };

    (StatusCode::CREATED, Json(dto::order_to_json(&saved))).into_response()
}

pub async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let order_id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid order id")
        }
    };

    match services.orders_get(order_id) {
        Ok(Some(order)) => (StatusCode::OK, Json(dto::order_to_json(&order))).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "order not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn process_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let order_id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid order id")
        }
    };

    match services.process_order(order_id) {
        Ok(order) => (
            StatusCode::OK,
            Json(serde_json::json!({ "id": order.id_typed().to_string() })),
        )
            .into_response(),
        Err(e) => errors::process_error_to_response(e),
    }
}
