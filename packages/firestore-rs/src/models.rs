//! Wire types for the Firestore REST API and conversion between Firestore's
//! typed values and plain JSON.

use serde::Deserialize;
use serde_json::{Map, Number, Value};

use crate::FirestoreError;

/// One element of the `runQuery` response stream.
///
/// Firestore emits a row with only `readTime` when the query matched nothing,
/// so `document` is optional.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunQueryResponseItem {
    pub document: Option<RawDocument>,
    pub read_time: Option<String>,
    pub skipped_results: Option<i64>,
}

/// Document as returned on the wire, fields still in typed-value form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDocument {
    pub name: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
    pub create_time: Option<String>,
    pub update_time: Option<String>,
}

/// A decoded document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Full resource name, `projects/{p}/databases/{db}/documents/{path}`.
    pub name: String,
    /// Last path segment of `name`.
    pub id: String,
    /// Fields converted to plain JSON.
    pub fields: Map<String, Value>,
    /// Fields exactly as Firestore sent them. Cursor values must be echoed
    /// back in this form so timestamps stay timestamps.
    pub raw_fields: Map<String, Value>,
}

impl TryFrom<RawDocument> for Document {
    type Error = FirestoreError;

    fn try_from(raw: RawDocument) -> Result<Self, Self::Error> {
        let id = raw
            .name
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();

        let mut fields = Map::new();
        for (key, value) in &raw.fields {
            fields.insert(key.clone(), decode_value(value)?);
        }

        Ok(Document {
            name: raw.name,
            id,
            fields,
            raw_fields: raw.fields,
        })
    }
}

/// Convert a Firestore typed value (`{"stringValue": "x"}`) to plain JSON.
pub fn decode_value(value: &Value) -> Result<Value, FirestoreError> {
    let object = value
        .as_object()
        .ok_or_else(|| FirestoreError::Malformed(format!("expected typed value, got {value}")))?;

    let (kind, inner) = object
        .iter()
        .next()
        .ok_or_else(|| FirestoreError::Malformed("empty typed value".to_string()))?;

    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" | "stringValue" | "timestampValue" | "bytesValue" | "referenceValue" => {
            Ok(inner.clone())
        }
        "integerValue" => {
            // int64 travels as a decimal string
            let parsed = match inner {
                Value::String(s) => s.parse::<i64>().ok(),
                Value::Number(n) => n.as_i64(),
                _ => None,
            };
            parsed
                .map(|n| Value::Number(n.into()))
                .ok_or_else(|| FirestoreError::Malformed(format!("bad integerValue {inner}")))
        }
        "doubleValue" => match inner {
            Value::Number(_) => Ok(inner.clone()),
            // "NaN" / "Infinity" have no JSON number form
            _ => Ok(Value::Null),
        },
        "geoPointValue" => Ok(inner.clone()),
        "arrayValue" => {
            let values = inner
                .get("values")
                .and_then(Value::as_array)
                .map(|items| items.iter().map(decode_value).collect::<Result<Vec<_>, _>>())
                .transpose()?
                .unwrap_or_default();
            Ok(Value::Array(values))
        }
        "mapValue" => {
            let mut decoded = Map::new();
            if let Some(fields) = inner.get("fields").and_then(Value::as_object) {
                for (key, field) in fields {
                    decoded.insert(key.clone(), decode_value(field)?);
                }
            }
            Ok(Value::Object(decoded))
        }
        other => Err(FirestoreError::Malformed(format!("unknown value type {other}"))),
    }
}

/// Convert plain JSON into a Firestore typed value.
pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => serde_json::json!({ "nullValue": null }),
        Value::Bool(b) => serde_json::json!({ "booleanValue": b }),
        Value::Number(n) => encode_number(n),
        Value::String(s) => serde_json::json!({ "stringValue": s }),
        Value::Array(items) => serde_json::json!({
            "arrayValue": { "values": items.iter().map(encode_value).collect::<Vec<_>>() }
        }),
        Value::Object(fields) => {
            let encoded: Map<String, Value> = fields
                .iter()
                .map(|(key, field)| (key.clone(), encode_value(field)))
                .collect();
            serde_json::json!({ "mapValue": { "fields": encoded } })
        }
    }
}

fn encode_number(n: &Number) -> Value {
    match n.as_i64() {
        Some(i) => serde_json::json!({ "integerValue": i.to_string() }),
        None => serde_json::json!({ "doubleValue": n.as_f64() }),
    }
}

/// Typed value pointing at another document, used for `__name__` cursors.
pub fn reference_value(name: &str) -> Value {
    serde_json::json!({ "referenceValue": name })
}
