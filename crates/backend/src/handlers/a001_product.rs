use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a001_product::aggregate::{Product, ProductDto};
use uuid::Uuid;

use crate::domain::a001_product;

/// Handler for the public storefront product listing
pub async fn list_available() -> Result<Json<Vec<Product>>, StatusCode> {
    let items = a001_product::service::list_available().await.map_err(|e| {
        tracing::error!("Failed to list products: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(items))
}

/// Handler for fetching one product
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Product>, StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;

    let item = a001_product::service::get_by_id(uuid)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get product: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(item))
}

/// Admin handler: full listing including unavailable products
pub async fn list_all() -> Result<Json<Vec<Product>>, StatusCode> {
    let items = a001_product::service::list_all().await.map_err(|e| {
        tracing::error!("Failed to list products: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(items))
}

/// Admin handler: create or update a product
pub async fn upsert(Json(dto): Json<ProductDto>) -> Result<Json<serde_json::Value>, StatusCode> {
    let id = a001_product::service::upsert(dto).await.map_err(|e| {
        tracing::error!("Failed to save product: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(serde_json::json!({"success": true, "id": id.to_string()})))
}

/// Admin handler: soft delete a product
pub async fn delete(Path(id): Path<String>) -> Result<Json<serde_json::Value>, StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;

    let deleted = a001_product::service::delete(uuid).await.map_err(|e| {
        tracing::error!("Failed to delete product: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    if !deleted {
        return Err(StatusCode::NOT_FOUND);
    }

    Ok(Json(serde_json::json!({"success": true})))
}
