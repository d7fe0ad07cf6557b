use axum::{http::StatusCode, Json};
use contracts::usecases::u101_notify_order::{NotifyOrderRequest, NotifyOrderResponse};
use uuid::Uuid;

use crate::usecases::u101_notify_order::{self, DispatchOutcome, NotifyError};

/// UseCase u101: HTTP entry point for the order notification dispatcher.
/// Accepts `{"orderId": "..."}` and answers with the dispatch outcome.
pub async fn u101_notify_order(
    Json(request): Json<NotifyOrderRequest>,
) -> Result<Json<NotifyOrderResponse>, StatusCode> {
    dispatch_to_response(&request.order_id).await
}

/// Run the dispatcher for one order id and translate the outcome into the
/// wire response. Shared by the function endpoint and the admin resend.
pub async fn dispatch_to_response(
    order_id: &str,
) -> Result<Json<NotifyOrderResponse>, StatusCode> {
    let uuid = Uuid::parse_str(order_id).map_err(|_| StatusCode::BAD_REQUEST)?;

    match u101_notify_order::dispatch(uuid).await {
        Ok(DispatchOutcome::Delivered) => Ok(Json(NotifyOrderResponse::delivered())),
        Ok(DispatchOutcome::NotConfigured) => Ok(Json(NotifyOrderResponse::not_configured())),
        Err(NotifyError::OrderNotFound) => Err(StatusCode::NOT_FOUND),
        Err(NotifyError::Delivery(e)) => {
            tracing::error!("Notification delivery failed for order {}: {}", uuid, e);
            Err(StatusCode::BAD_GATEWAY)
        }
        Err(NotifyError::Storage(e)) => {
            tracing::error!("Notification dispatch failed for order {}: {}", uuid, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
