use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use contracts::domain::a002_order::aggregate::{CreateOrderDto, Order, UpdateOrderStatusDto};
use contracts::usecases::u101_notify_order::NotifyOrderResponse;
use uuid::Uuid;

use crate::domain::a002_order::{self, service::IntakeError};
use crate::handlers::usecases::dispatch_to_response;

/// Handler for the public order form. Validation failures come back as 422
/// with the offending fields keyed by name; the customer is never failed
/// because of anything the notification pipeline does afterwards.
pub async fn create_order(Json(dto): Json<CreateOrderDto>) -> Response {
    match a002_order::service::create(dto).await {
        Ok(order) => (StatusCode::CREATED, Json(order)).into_response(),
        Err(IntakeError::Validation(err)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({"error": "validation", "fields": err.fields})),
        )
            .into_response(),
        Err(IntakeError::Storage(e)) => {
            tracing::error!("Failed to create order: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Admin handler: list orders, newest first
pub async fn list_orders() -> Result<Json<Vec<Order>>, StatusCode> {
    let items = a002_order::service::list_all().await.map_err(|e| {
        tracing::error!("Failed to list orders: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(items))
}

/// Admin handler: fetch one order
pub async fn get_order_detail(Path(id): Path<String>) -> Result<Json<Order>, StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;

    let item = a002_order::service::get_by_id(uuid)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get order detail: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(item))
}

/// Admin handler: move an order through its lifecycle
pub async fn update_status(
    Path(id): Path<String>,
    Json(dto): Json<UpdateOrderStatusDto>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;

    let updated = a002_order::service::update_status(uuid, dto.status)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update order status: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    if !updated {
        return Err(StatusCode::NOT_FOUND);
    }

    Ok(Json(serde_json::json!({"success": true})))
}

/// Admin handler: re-run the notification dispatcher for an order whose
/// notification never went out (or needs to go out again)
pub async fn resend_notification(
    Path(id): Path<String>,
) -> Result<Json<NotifyOrderResponse>, StatusCode> {
    dispatch_to_response(&id).await
}
