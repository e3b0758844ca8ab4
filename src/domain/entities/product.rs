use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::errors::IapError;

/// Store item description, either a one-time product or a subscription.
///
/// Only the identity is required. Everything the store reports beyond the
/// common fields is kept in `extra`, untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    pub(crate) fn from_native(item: Value) -> Result<Self, IapError> {
        serde_json::from_value(item)
            .map_err(|e| IapError::invalid_payload(format!("product: {e}")))
    }

    pub(crate) fn from_native_list(items: Vec<Value>) -> Result<Vec<Self>, IapError> {
        items.into_iter().map(Self::from_native).collect()
    }
}

/// Native layers are loose about scalar types (a price may arrive as `0.99`
/// or `"0.99"`). Non-string values are kept in their JSON text form.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Whether a raw native item carries a usable product identifier.
pub(crate) fn has_product_id(item: &Value) -> bool {
    matches!(item.get("productId"), Some(Value::String(id)) if !id.is_empty())
}
