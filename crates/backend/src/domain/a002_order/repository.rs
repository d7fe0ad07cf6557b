use anyhow::Result;
use chrono::Utc;
use contracts::domain::a002_order::aggregate::{Order, OrderId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use contracts::enums::order_status::OrderStatus;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_order")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub customer_name: String,
    pub customer_contact: String,
    pub message: Option<String>,
    pub product_ref: Option<String>,
    pub product_name: String,
    pub quantity: i32,
    pub total_price: f64,
    pub status: String,
    pub notification_sent: bool,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Order {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Order {
            base: BaseAggregate::with_metadata(
                OrderId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            customer_name: m.customer_name,
            customer_contact: m.customer_contact,
            message: m.message,
            product_ref: m.product_ref,
            product_name: m.product_name,
            quantity: m.quantity.max(0) as u32,
            total_price: m.total_price,
            status: OrderStatus::from_code(&m.status).unwrap_or_default(),
            notification_sent: m.notification_sent,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn insert(aggregate: &Order) -> Result<Uuid> {
    let active = ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        customer_name: Set(aggregate.customer_name.clone()),
        customer_contact: Set(aggregate.customer_contact.clone()),
        message: Set(aggregate.message.clone()),
        product_ref: Set(aggregate.product_ref.clone()),
        product_name: Set(aggregate.product_name.clone()),
        quantity: Set(aggregate.quantity as i32),
        total_price: Set(aggregate.total_price),
        status: Set(aggregate.status.code().to_string()),
        notification_sent: Set(aggregate.notification_sent),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    };
    active.insert(conn()).await?;
    Ok(aggregate.base.id.value())
}

pub async fn get_by_id(id: Uuid) -> Result<Option<Order>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

/// Admin listing, newest orders first
pub async fn list_all() -> Result<Vec<Order>> {
    let items: Vec<Order> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_desc(Column::CreatedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn update_status(id: Uuid, status: OrderStatus) -> Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::Status, Expr::value(status.code()))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

pub async fn set_notification_sent(id: Uuid, sent: bool) -> Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::NotificationSent, Expr::value(sent))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}
