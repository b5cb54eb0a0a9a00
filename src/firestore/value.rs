//! Encoding of plain JSON as Firestore typed values
//!
//! The REST API wraps every field in a single-key object naming its type,
//! e.g. `{"stringValue": "Engineer"}` or `{"integerValue": "42"}`.

use crate::types::{JobRecord, JsonObject, JsonValue};
use serde_json::json;

/// Encode a JSON value as a Firestore value
pub fn encode_value(value: &JsonValue) -> JsonValue {
    match value {
        JsonValue::Null => json!({ "nullValue": null }),
        JsonValue::Bool(b) => json!({ "booleanValue": b }),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                // int64 travels as a decimal string
                json!({ "integerValue": i.to_string() })
            } else {
                json!({ "doubleValue": n.as_f64().unwrap_or_default() })
            }
        }
        JsonValue::String(s) => json!({ "stringValue": s }),
        JsonValue::Array(items) => {
            if items.is_empty() {
                json!({ "arrayValue": {} })
            } else {
                let values: Vec<JsonValue> = items.iter().map(encode_value).collect();
                json!({ "arrayValue": { "values": values } })
            }
        }
        JsonValue::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

fn encode_fields(map: &JsonObject) -> JsonValue {
    let fields: JsonObject = map
        .iter()
        .map(|(key, value)| (key.clone(), encode_value(value)))
        .collect();
    JsonValue::Object(fields)
}

/// Build the request body for writing a record
pub fn to_document(record: &JobRecord) -> JsonValue {
    json!({ "fields": encode_fields(record) })
}
