use crate::domain::common::{AggregateId, BaseAggregate};
use crate::enums::product_category::ProductCategory;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Unique product identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub Uuid);

impl ProductId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for ProductId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ProductId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// A shop product. `base.description` holds the product name as shown in the
/// storefront; `size` and `paper_type` only apply to paper goods and stay
/// empty otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(flatten)]
    pub base: BaseAggregate<ProductId>,

    pub price: f64,

    pub category: ProductCategory,

    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,

    #[serde(rename = "stockQuantity")]
    pub stock_quantity: i32,

    #[serde(rename = "isAvailable")]
    pub is_available: bool,

    pub size: Option<String>,

    #[serde(rename = "paperType")]
    pub paper_type: Option<String>,
}

impl Product {
    /// Build a new product for insertion
    #[allow(clippy::too_many_arguments)]
    pub fn new_for_insert(
        code: String,
        name: String,
        price: f64,
        category: ProductCategory,
        image_url: Option<String>,
        stock_quantity: i32,
        is_available: bool,
        size: Option<String>,
        paper_type: Option<String>,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(ProductId::new_v4(), code, name);
        base.comment = comment;

        Self {
            base,
            price,
            category,
            image_url,
            stock_quantity,
            is_available,
            size,
            paper_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.base.description
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn touch_updated(&mut self) {
        self.base.touch();
    }

    /// Apply editable fields from a DTO
    pub fn update(&mut self, dto: &ProductDto) {
        self.base.description = dto.name.clone();
        self.base.comment = dto.comment.clone();
        self.price = dto.price;
        self.category = dto.category;
        self.image_url = dto.image_url.clone();
        self.stock_quantity = dto.stock_quantity;
        self.is_available = dto.is_available;
        self.size = dto.size.clone();
        self.paper_type = dto.paper_type.clone();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Product name cannot be empty".into());
        }
        if self.base.code.trim().is_empty() {
            return Err("Product code cannot be empty".into());
        }
        if self.price < 0.0 {
            return Err("Price cannot be negative".into());
        }
        if self.stock_quantity < 0 {
            return Err("Stock quantity cannot be negative".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.touch_updated();
    }
}

// ============================================================================
// DTO
// ============================================================================

/// Payload for creating or updating a product from the admin screens
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    /// None on create, Some on update
    pub id: Option<String>,
    pub code: Option<String>,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub category: ProductCategory,
    pub image_url: Option<String>,
    #[serde(default)]
    pub stock_quantity: i32,
    #[serde(default = "default_is_available")]
    pub is_available: bool,
    pub size: Option<String>,
    pub paper_type: Option<String>,
    pub comment: Option<String>,
}

fn default_is_available() -> bool {
    true
}
