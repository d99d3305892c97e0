//! Tolerant decoding of the product list response envelope.
//!
//! The backend's contract is loosely pinned: the list endpoint returns a
//! bare JSON array today, but deployments have wrapped it in an object
//! under various keys. Decoding is a discriminated parse over the known
//! shapes with an exhaustive empty-list fallback - malformed payloads are
//! logged and swallowed, never surfaced as errors.

use serde_json::Value;
use tracing::warn;

use crate::api::types::Product;

/// Envelope keys recognized on object-shaped responses, in priority order.
const ENVELOPE_KEYS: &[&str] = &["results", "items", "products", "data"];

/// Decode a product list from a bare array or a recognized envelope.
///
/// Anything else - an object with no recognized key, a scalar, an array of
/// non-products - decodes to an empty list.
#[must_use]
pub fn decode_product_list(payload: Value) -> Vec<Product> {
    let array = match payload {
        Value::Array(_) => payload,
        Value::Object(mut map) => {
            let unwrapped = ENVELOPE_KEYS
                .iter()
                .find_map(|key| map.remove(*key).filter(Value::is_array));
            match unwrapped {
                Some(array) => array,
                None => {
                    warn!(
                        keys = ?map.keys().collect::<Vec<_>>(),
                        "product response envelope not recognized"
                    );
                    return Vec::new();
                }
            }
        }
        other => {
            warn!(shape = %value_shape(&other), "product response is not a list");
            return Vec::new();
        }
    };

    match serde_json::from_value(array) {
        Ok(products) => products,
        Err(error) => {
            warn!(error = %error, "product list failed to decode");
            Vec::new()
        }
    }
}

const fn value_shape(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
