//! Tool input schemas.
//!
//! A tool's schema is derived from its parameter struct with `schemars` and
//! compiled once with `jsonschema`. The JSON published as a tool's
//! `parameters`, the document the dispatcher validates against and the type
//! the handler deserializes into all come from the same Rust type.

use std::fmt;
use std::sync::Arc;

use jsonschema::{Draft, JSONSchema};
use schemars::JsonSchema;
use schemars::generate::SchemaSettings;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::warn;

use super::descriptor::ToolInput;

/// The root schema of a tool's input. Always an object.
#[derive(Clone)]
pub struct InputSchema {
    document: Arc<Map<String, Value>>,
    validator: Option<Arc<JSONSchema>>,
}

impl InputSchema {
    /// Derive the schema of `T`.
    ///
    /// Nested types are inlined so the document stands on its own; optional
    /// fields accept `null`, the same way serde treats them.
    pub fn of<T: JsonSchema>() -> Self {
        let mut settings = SchemaSettings::draft07();
        settings.inline_subschemas = true;
        settings.meta_schema = None;

        match Value::from(settings.into_generator().into_root_schema_for::<T>()) {
            Value::Object(document) => Self::from_document(document),
            other => {
                warn!("Schema for {} is not an object: {}", T::schema_name(), other);
                Self::empty()
            }
        }
    }

    /// An object schema without declared fields. Accepts any object.
    pub fn empty() -> Self {
        let mut document = Map::new();
        document.insert("type".into(), Value::from("object"));
        Self::from_document(document)
    }

    fn from_document(document: Map<String, Value>) -> Self {
        let raw = Value::Object(document);
        let validator = match JSONSchema::options().with_draft(Draft::Draft7).compile(&raw) {
            Ok(compiled) => Some(Arc::new(compiled)),
            Err(e) => {
                warn!("Input schema does not compile, validation disabled: {}", e);
                None
            }
        };
        let document = match raw {
            Value::Object(document) => document,
            _ => Map::new(),
        };
        Self {
            document: Arc::new(document),
            validator,
        }
    }

    /// Names of the required top-level fields.
    pub fn required(&self) -> Vec<&str> {
        self.document
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// The schema of a top-level property, if declared.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.document.get("properties")?.get(name)
    }

    /// Check an input against this schema, collecting every violation.
    ///
    /// Each violation is prefixed with the JSON pointer of the offending
    /// value when it is not the input itself.
    pub fn validate(&self, input: &ToolInput) -> Result<(), Vec<String>> {
        let Some(validator) = &self.validator else {
            return Ok(());
        };
        let instance = Value::Object(input.clone());
        let result = validator.validate(&instance);
        match result {
            Ok(()) => Ok(()),
            Err(errors) => Err(errors
                .map(|error| {
                    let path = error.instance_path.to_string();
                    if path.is_empty() {
                        error.to_string()
                    } else {
                        format!("{}: {}", path, error)
                    }
                })
                .collect()),
        }
    }

    /// The schema as a JSON object, shared with the MCP tool listing.
    pub fn as_json_object(&self) -> Arc<Map<String, Value>> {
        self.document.clone()
    }
}

impl Default for InputSchema {
    fn default() -> Self {
        Self::empty()
    }
}

impl Serialize for InputSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.document.serialize(serializer)
    }
}

impl fmt::Debug for InputSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputSchema")
            .field("document", &self.document)
            .field("compiled", &self.validator.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
    #[serde(rename_all = "lowercase")]
    enum Category {
        Api,
        Ui,
        All,
    }

    fn default_category() -> Category {
        Category::All
    }

    #[derive(Debug, Deserialize, JsonSchema)]
    #[serde(rename_all = "camelCase")]
    #[allow(dead_code)]
    struct SearchParams {
        /// Search query
        query: String,
        #[serde(default = "default_category")]
        category: Category,
        #[serde(default)]
        max_results: Option<u32>,
    }

    #[derive(Debug, Deserialize, JsonSchema)]
    #[serde(rename_all = "camelCase")]
    #[allow(dead_code)]
    struct PipelineOptions {
        environments: Vec<String>,
        #[serde(default)]
        deploy_on_merge: Option<bool>,
    }

    #[derive(Debug, Deserialize, JsonSchema)]
    #[allow(dead_code)]
    struct PipelineParams {
        options: PipelineOptions,
    }

    fn input(value: Value) -> ToolInput {
        match value {
            Value::Object(map) => map,
            _ => panic!("test input must be an object"),
        }
    }

    #[test]
    fn test_derived_document_shape() {
        let schema = InputSchema::of::<SearchParams>();
        let value = serde_json::to_value(&schema).unwrap();

        assert_eq!(value["type"], json!("object"));
        assert_eq!(schema.required(), vec!["query"]);
        assert_eq!(value["properties"]["query"]["description"], json!("Search query"));
        assert_eq!(value["properties"]["category"]["default"], json!("all"));
        assert_eq!(
            value["properties"]["category"]["enum"],
            json!(["api", "ui", "all"])
        );
        assert!(value.get("$schema").is_none());
    }

    #[test]
    fn test_valid_input_passes() {
        let schema = InputSchema::of::<SearchParams>();
        assert!(schema.validate(&input(json!({"query": "auth"}))).is_ok());
        assert!(
            schema
                .validate(&input(json!({"query": "auth", "category": "ui", "extra": true})))
                .is_ok()
        );
    }

    #[test]
    fn test_null_optional_field_is_accepted() {
        let schema = InputSchema::of::<SearchParams>();
        assert!(
            schema
                .validate(&input(json!({"query": "auth", "maxResults": null})))
                .is_ok()
        );
        assert!(schema.validate(&input(json!({"query": null}))).is_err());
    }

    #[test]
    fn test_collects_every_violation() {
        let schema = InputSchema::of::<SearchParams>();
        let violations = schema
            .validate(&input(json!({"category": "nope", "maxResults": "ten"})))
            .unwrap_err();

        assert_eq!(violations.len(), 3);
        assert!(violations.iter().any(|v| v.contains("query")));
        assert!(violations.iter().any(|v| v.starts_with("/category: ")));
        assert!(violations.iter().any(|v| v.starts_with("/maxResults: ")));
    }

    #[test]
    fn test_nested_types_are_inlined_and_checked() {
        let schema = InputSchema::of::<PipelineParams>();
        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(value["properties"]["options"]["type"], json!("object"));
        assert!(value.get("definitions").is_none());

        let violations = schema
            .validate(&input(json!({
                "options": { "environments": ["dev", 3], "deployOnMerge": "yes" }
            })))
            .unwrap_err();
        assert_eq!(violations.len(), 2);
        assert!(violations.iter().any(|v| v.starts_with("/options/environments/1: ")));
        assert!(violations.iter().any(|v| v.starts_with("/options/deployOnMerge: ")));

        let violations = schema
            .validate(&input(json!({ "options": {} })))
            .unwrap_err();
        assert_eq!(violations.len(), 1);
        assert!(violations[0].starts_with("/options: "));
        assert!(violations[0].contains("environments"));
    }

    #[test]
    fn test_empty_schema_accepts_any_object() {
        let schema = InputSchema::empty();
        assert!(schema.validate(&input(json!({"anything": [1, 2]}))).is_ok());
        assert_eq!(serde_json::to_value(&schema).unwrap(), json!({"type": "object"}));
        assert!(schema.required().is_empty());
    }
}
