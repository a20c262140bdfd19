use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Depth of a root category
pub const ROOT_DEPTH: i16 = 0;
/// Depth of a direct child of a root; nothing nests deeper
pub const CHILD_DEPTH: i16 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub depth: i16,
    pub parent_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategory {
    #[validate(required, length(max = 255))]
    #[schema(example = "Footwear")]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Must reference a root category
    #[serde(default)]
    pub parent_id: Option<i64>,
}

pub type UpdateCategory = CreateCategory;

/// Checked category fields, with the derived depth.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryData {
    pub name: String,
    pub description: String,
    pub parent_id: Option<i64>,
    pub depth: i16,
}
