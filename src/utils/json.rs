// Conversions between request/response JSON and stored BSON documents.

use crate::utils::error::AppError;
use mongodb::bson::{self, Bson, Document};
use serde_json::{Map, Value};

/// Converts a request body into a document, unchanged.
pub fn document_from_json(body: Value) -> Result<Document, AppError> {
    match body {
        Value::Object(_) => {
            bson::to_document(&body).map_err(|e| AppError::InvalidDocument(e.to_string()))
        }
        other => Err(AppError::InvalidDocument(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

/// Renders a stored document for the wire: ObjectIds as hex strings,
/// datetimes as RFC 3339, everything else as relaxed extended JSON.
pub fn document_to_json(doc: Document) -> Value {
    let map: Map<String, Value> = doc
        .into_iter()
        .map(|(key, value)| (key, bson_to_json(value)))
        .collect();
    Value::Object(map)
}

pub fn documents_to_json(docs: Vec<Document>) -> Value {
    Value::Array(docs.into_iter().map(document_to_json).collect())
}

pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(s) => Value::String(s),
            Err(_) => Bson::DateTime(dt).into_relaxed_extjson(),
        },
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId};
    use serde_json::json;

    #[test]
    fn test_object_id_rendered_as_hex() {
        let oid = ObjectId::new();
        let rendered = document_to_json(doc! { "_id": oid, "amount": 42.5, "category": "power" });

        assert_eq!(rendered["_id"], json!(oid.to_hex()));
        assert_eq!(rendered["amount"], json!(42.5));
        assert_eq!(rendered["category"], json!("power"));
    }

    #[test]
    fn test_nested_values_are_rendered() {
        let oid = ObjectId::new();
        let rendered = document_to_json(doc! {
            "meta": { "ref": oid },
            "tags": ["a", 1_i32],
        });

        assert_eq!(rendered["meta"]["ref"], json!(oid.to_hex()));
        assert_eq!(rendered["tags"], json!(["a", 1]));
    }

    #[test]
    fn test_non_object_body_rejected() {
        assert!(matches!(
            document_from_json(json!([1, 2, 3])),
            Err(AppError::InvalidDocument(_))
        ));
        assert!(matches!(
            document_from_json(json!("text")),
            Err(AppError::InvalidDocument(_))
        ));
    }

    #[test]
    fn test_object_body_kept_as_is() {
        let doc = document_from_json(json!({ "email": "a@b.c", "amount": 10 })).unwrap();
        assert_eq!(doc.get_str("email").unwrap(), "a@b.c");
        assert_eq!(doc.get_i64("amount").unwrap(), 10);
    }
}
