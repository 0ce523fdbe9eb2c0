//! Request-file deserialization.
//!
//! A request file is the JSON description of one script: target database
//! and collection, the operation, and either free-form filter text or a
//! structured condition list for the compiler.

use serde::Deserialize;

use mongogen_core::{Condition, Operation, ScriptRequest, UpdateOperator, compile, render};

/// On-disk request shape, camelCase keys.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptFile {
    pub database: String,
    pub collection: String,
    pub operation: Operation,
    /// Free-form filter text; takes precedence over `conditions`.
    #[serde(default)]
    pub filter: Option<String>,
    /// Structured conditions, compiled when no free-form filter is given.
    #[serde(default)]
    pub conditions: Vec<Condition>,
    /// Free-form document body for insert/update operations.
    #[serde(default)]
    pub document: Option<String>,
    #[serde(default)]
    pub update_operator: UpdateOperator,
}

impl ScriptFile {
    pub fn into_request(self) -> ScriptRequest {
        let filter_text = match self.filter {
            Some(text) => text.trim().to_string(),
            None => render::render_at(&compile(&self.conditions), 1),
        };

        ScriptRequest {
            database: self.database,
            collection: self.collection,
            operation: self.operation,
            filter_text,
            document_text: self.document,
            update_operator: self.update_operator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conditions_compile_when_no_free_form_filter_is_given() {
        let file: ScriptFile = serde_json::from_str(
            r#"{
                "database": "shop",
                "collection": "orders",
                "operation": "find",
                "conditions": [
                    {"field": "status", "operator": "$eq", "value": "active"}
                ]
            }"#,
        )
        .unwrap();

        let request = file.into_request();
        assert_eq!(request.filter_text, "{\n        \"status\": \"active\"\n    }");
    }

    #[test]
    fn free_form_filter_takes_precedence() {
        let file: ScriptFile = serde_json::from_str(
            r#"{
                "database": "shop",
                "collection": "orders",
                "operation": "deleteMany",
                "filter": "{ legacy: true }",
                "conditions": [
                    {"field": "status", "operator": "$eq", "value": "active"}
                ]
            }"#,
        )
        .unwrap();

        let request = file.into_request();
        assert_eq!(request.filter_text, "{ legacy: true }");
    }

    #[test]
    fn update_operator_defaults_to_set() {
        let file: ScriptFile = serde_json::from_str(
            r#"{
                "database": "shop",
                "collection": "orders",
                "operation": "updateOne",
                "document": "{ shipped: true }"
            }"#,
        )
        .unwrap();

        assert_eq!(file.update_operator, UpdateOperator::Set);
    }
}
