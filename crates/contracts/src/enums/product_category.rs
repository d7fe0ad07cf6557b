use serde::{Deserialize, Serialize};

/// Product categories offered by the shop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Sketchbooks,
    Sketches,
    Crafts,
    Gifts,
    #[default]
    Other,
}

impl ProductCategory {
    /// Stable string code stored in the database
    pub fn code(&self) -> &'static str {
        match self {
            ProductCategory::Sketchbooks => "sketchbooks",
            ProductCategory::Sketches => "sketches",
            ProductCategory::Crafts => "crafts",
            ProductCategory::Gifts => "gifts",
            ProductCategory::Other => "other",
        }
    }

    /// Human-readable label
    pub fn display_name(&self) -> &'static str {
        match self {
            ProductCategory::Sketchbooks => "Sketchbooks",
            ProductCategory::Sketches => "Sketches",
            ProductCategory::Crafts => "Crafts",
            ProductCategory::Gifts => "Gifts",
            ProductCategory::Other => "Other",
        }
    }

    pub fn all() -> Vec<ProductCategory> {
        vec![
            ProductCategory::Sketchbooks,
            ProductCategory::Sketches,
            ProductCategory::Crafts,
            ProductCategory::Gifts,
            ProductCategory::Other,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "sketchbooks" => Some(ProductCategory::Sketchbooks),
            "sketches" => Some(ProductCategory::Sketches),
            "crafts" => Some(ProductCategory::Crafts),
            "gifts" => Some(ProductCategory::Gifts),
            "other" => Some(ProductCategory::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
