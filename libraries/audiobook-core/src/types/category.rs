/// Category domain type
use super::null_as_default;
use serde::{Deserialize, Serialize};

/// Book category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Server-assigned identifier
    pub id: i64,

    /// Display name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Number of books in the category, when the server reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub books: Option<u32>,
}
