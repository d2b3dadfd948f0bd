use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A product line with its current count.
///
/// `is_premium` selects the premium unit price; older clients send it as
/// `isMarlboro`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default, alias = "isMarlboro")]
    pub is_premium: bool,
}

impl Product {
    pub fn new(name: impl Into<String>, count: u64, is_premium: bool) -> Self {
        Self {
            name: name.into(),
            count,
            is_premium,
        }
    }
}

/// A product as it sits in the store after an upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedProduct {
    #[serde(flatten)]
    pub product: Product,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreData {
    pub products: BTreeMap<String, SavedProduct>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddProductRequest {
    pub name: String,
    #[serde(default, alias = "isMarlboro")]
    pub is_premium: bool,
}

#[derive(Debug, Deserialize)]
pub struct AddProductForm {
    pub name: String,
    #[serde(default)]
    pub is_premium: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CountRequest {
    pub delta: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub total_count: u64,
    pub premium_count: u64,
    pub other_count: u64,
    pub price: u64,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SaveSuccess {
    pub success: bool,
    pub data: Vec<SavedProduct>,
}

#[derive(Debug, Serialize)]
pub struct SaveFailure {
    pub success: bool,
    pub error: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<String>,
}
