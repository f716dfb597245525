use axum::http::StatusCode;
use chrono::NaiveDate;
use serde::Deserialize;

use stockroom_orders::Order;
use stockroom_products::{Product, ProductCategory};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub units_available: u32,
    pub category: String,
    pub lead_time_days: Option<u32>,
    pub expiry_date: Option<NaiveDate>,
    pub season_start_date: Option<NaiveDate>,
    pub season_end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub product_ids: Vec<String>,
}

// -------------------------
// Category mapping
// -------------------------

/// Map the wire category and its companion fields onto the typed category.
///
/// Recognized categories must arrive with their dates. Unrecognized labels
/// are accepted and stored as [`ProductCategory::Unknown`]; fulfillment
/// skips such products.
pub fn parse_category(
    req: &CreateProductRequest,
) -> Result<ProductCategory, axum::response::Response> {
    match req.category.to_lowercase().as_str() {
        "normal" => Ok(ProductCategory::Normal {
            lead_time_days: req.lead_time_days.unwrap_or(0),
        }),
        "seasonal" => {
            let (start, end) = require_window(req, "seasonal")?;
            Ok(ProductCategory::Seasonal {
                season_start_date: start,
                season_end_date: end,
            })
        }
        "expirable" => match req.expiry_date {
            Some(expiry_date) => Ok(ProductCategory::Expirable { expiry_date }),
            None => Err(errors::json_error(
                StatusCode::BAD_REQUEST,
                "missing_expiry_date",
                "expirable products require expiry_date",
            )),
        },
        "flashsale" | "flash-sale" => {
            let (start, end) = require_window(req, "flash-sale")?;
            Ok(ProductCategory::FlashSale {
                season_start_date: start,
                season_end_date: end,
            })
        }
        _ => Ok(ProductCategory::Unknown),
    }
}

fn require_window(
    req: &CreateProductRequest,
    label: &str,
) -> Result<(NaiveDate, NaiveDate), axum::response::Response> {
    match (req.season_start_date, req.season_end_date) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(errors::json_error(
            StatusCode::BAD_REQUEST,
            "missing_season_window",
            format!("{label} products require season_start_date and season_end_date"),
        )),
    }
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn category_label(category: ProductCategory) -> &'static str {
    match category {
        ProductCategory::Normal { .. } => "normal",
        ProductCategory::Seasonal { .. } => "seasonal",
        ProductCategory::Expirable { .. } => "expirable",
        ProductCategory::FlashSale { .. } => "flash-sale",
        ProductCategory::Unknown => "unknown",
    }
}

pub fn product_to_json(product: &Product) -> serde_json::Value {
    let mut body = serde_json::json!({
        "id": product.id_typed().to_string(),
        "name": product.name(),
        "units_available": product.units_available(),
        "category": category_label(product.category()),
    });

    match product.category() {
        ProductCategory::Normal { lead_time_days } => {
            body["lead_time_days"] = lead_time_days.into();
        }
        ProductCategory::Expirable { expiry_date } => {
            body["expiry_date"] = expiry_date.to_string().into();
        }
        ProductCategory::Seasonal {
            season_start_date,
            season_end_date,
        }
        | ProductCategory::FlashSale {
            season_start_date,
            season_end_date,
        } => {
            body["season_start_date"] = season_start_date.to_string().into();
            body["season_end_date"] = season_end_date.to_string().into();
        }
        ProductCategory::Unknown => {}
    }

    body
}

pub fn order_to_json(order: &Order) -> serde_json::Value {
    serde_json::json!({
        "id": order.id_typed().to_string(),
        "items": order.items().iter().map(product_to_json).collect::<Vec<_>>(),
    })
}
