//! Firestore REST value encoding.
//!
//! Firestore wraps every field value in a single-key object naming its type
//! (`{"stringValue": "x"}`, `{"integerValue": "3"}`, ...). Stored documents
//! in this workspace are plain JSON maps, so this module converts between the
//! two. Timestamps come back as `timestampValue` and decode to RFC 3339
//! strings, which is how the other stores keep them.

use serde_json::{Map, Value, json};

use studyfind_core::store::{Document, Fields};

pub(crate) fn encode_fields(fields: &Fields) -> Value {
    let encoded: Map<String, Value> = fields
        .iter()
        .map(|(k, v)| (k.clone(), encode_value(v)))
        .collect();
    Value::Object(encoded)
}

pub(crate) fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64() }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => json!({
            "arrayValue": { "values": items.iter().map(encode_value).collect::<Vec<_>>() }
        }),
        Value::Object(map) => json!({
            "mapValue": { "fields": encode_fields(map) }
        }),
    }
}

/// Decodes a `fields` object. Values of unknown type are dropped.
pub(crate) fn decode_fields(encoded: Option<&Value>) -> Fields {
    let Some(Value::Object(map)) = encoded else {
        return Fields::new();
    };

    map.iter()
        .filter_map(|(k, v)| decode_value(v).map(|decoded| (k.clone(), decoded)))
        .collect()
}

pub(crate) fn decode_value(value: &Value) -> Option<Value> {
    let (kind, inner) = value.as_object()?.iter().next()?;

    match kind.as_str() {
        "nullValue" => Some(Value::Null),
        "booleanValue" => inner.as_bool().map(Value::Bool),
        "integerValue" => inner
            .as_str()
            .and_then(|s| s.parse::<i64>().ok())
            .or_else(|| inner.as_i64())
            .map(Value::from),
        "doubleValue" => inner.as_f64().map(Value::from),
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => {
            inner.as_str().map(|s| Value::String(s.to_string()))
        }
        "geoPointValue" => Some(inner.clone()),
        "arrayValue" => {
            let values = inner
                .get("values")
                .and_then(Value::as_array)
                .map(|items| items.iter().filter_map(decode_value).collect())
                .unwrap_or_default();
            Some(Value::Array(values))
        }
        "mapValue" => Some(Value::Object(decode_fields(inner.get("fields")))),
        _ => None,
    }
}

/// Converts a Firestore `Document` resource into a store document.
///
/// The document id is the last segment of the resource `name`.
pub(crate) fn decode_document(resource: &Value) -> Option<Document> {
    let name = resource.get("name")?.as_str()?;
    let id = name.rsplit('/').next()?.to_string();
    Some(Document {
        id,
        fields: decode_fields(resource.get("fields")),
    })
}

/// Extracts the documents from a `runQuery` response array.
///
/// Entries without a `document` (progress markers carrying only `readTime`)
/// are skipped.
pub(crate) fn decode_run_query(response: &Value) -> Vec<Document> {
    response
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| entry.get("document"))
                .filter_map(decode_document)
                .collect()
        })
        .unwrap_or_default()
}
