use super::repository;
use anyhow::Result;
use contracts::domain::a001_product::aggregate::{Product, ProductDto};
use uuid::Uuid;

/// Create a new product
pub async fn create(dto: ProductDto) -> Result<Uuid> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("PRD-{}", Uuid::new_v4()));
    let mut aggregate = Product::new_for_insert(
        code,
        dto.name,
        dto.price,
        dto.category,
        dto.image_url,
        dto.stock_quantity,
        dto.is_available,
        dto.size,
        dto.paper_type,
        dto.comment,
    );

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    aggregate.before_write();

    repository::insert(&aggregate).await
}

/// Update an existing product
pub async fn update(dto: ProductDto) -> Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;

    aggregate.update(&dto);

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    aggregate.before_write();

    repository::update(&aggregate).await
}

/// Create when the DTO carries no id, update otherwise
pub async fn upsert(dto: ProductDto) -> Result<Uuid> {
    match dto.id {
        Some(ref id_str) => {
            let id = Uuid::parse_str(id_str).map_err(|_| anyhow::anyhow!("Invalid ID"))?;
            update(dto.clone()).await?;
            Ok(id)
        }
        None => create(dto).await,
    }
}

/// Soft delete a product. Existing orders keep their denormalized product
/// name and total; their product reference simply stops resolving.
pub async fn delete(id: Uuid) -> Result<bool> {
    repository::soft_delete(id).await
}

pub async fn get_by_id(id: Uuid) -> Result<Option<Product>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> Result<Vec<Product>> {
    repository::list_all().await
}

pub async fn list_available() -> Result<Vec<Product>> {
    repository::list_available().await
}
