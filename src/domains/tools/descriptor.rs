//! Tool descriptors and the handler contract.
//!
//! A tool is "a schema plus an asynchronous handler". The dispatch core only
//! ever talks to tools through [`ToolHandler`]; what a handler does behind
//! that call is its own business.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use super::error::HandlerError;
use super::schema::InputSchema;

/// Input passed to a tool: an open-ended mapping from field name to value.
pub type ToolInput = Map<String, Value>;

/// Output produced by a tool: an open-ended mapping from field name to value.
pub type ToolOutput = Map<String, Value>;

/// Result type returned by tool handlers.
pub type HandlerResult = Result<ToolOutput, HandlerError>;

/// Asynchronous tool handler.
///
/// Implement the trait directly when a handler needs its own state; plain
/// async closures go through [`ToolDescriptorBuilder::handler_fn`].
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    /// Execute the tool with the given input.
    async fn call(&self, input: ToolInput) -> HandlerResult;
}

/// Adapter turning an async closure into a [`ToolHandler`].
struct FnHandler<F>(F);

#[async_trait::async_trait]
impl<F, Fut> ToolHandler for FnHandler<F>
where
    F: Fn(ToolInput) -> Fut + Send + Sync,
    Fut: Future<Output = HandlerResult> + Send,
{
    async fn call(&self, input: ToolInput) -> HandlerResult {
        (self.0)(input).await
    }
}

/// Immutable record describing a registered tool.
///
/// Serialises to `{id, name, description, version, parameters}`; the handler
/// is never exposed.
#[derive(Clone, Serialize)]
pub struct ToolDescriptor {
    /// Globally unique, namespaced id, e.g. `arc.docs.search`.
    pub id: String,
    pub name: String,
    pub description: String,
    pub version: String,
    #[serde(rename = "parameters")]
    pub input_schema: InputSchema,
    #[serde(skip)]
    handler: Arc<dyn ToolHandler>,
}

impl ToolDescriptor {
    /// Start building a descriptor for the given id.
    pub fn builder(id: impl Into<String>) -> ToolDescriptorBuilder {
        ToolDescriptorBuilder {
            id: id.into(),
            name: None,
            description: String::new(),
            version: "1.0.0".to_string(),
            input_schema: InputSchema::empty(),
        }
    }

    /// The handler owned by this descriptor.
    pub fn handler(&self) -> Arc<dyn ToolHandler> {
        self.handler.clone()
    }
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ToolDescriptor`]. The handler is supplied last.
pub struct ToolDescriptorBuilder {
    id: String,
    name: Option<String>,
    description: String,
    version: String,
    input_schema: InputSchema,
}

impl ToolDescriptorBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn input_schema(mut self, schema: InputSchema) -> Self {
        self.input_schema = schema;
        self
    }

    /// Derive the input schema from the handler's parameter type.
    pub fn params<T: schemars::JsonSchema>(self) -> Self {
        self.input_schema(InputSchema::of::<T>())
    }

    /// Finish the descriptor with the given handler.
    pub fn handler<H>(self, handler: H) -> ToolDescriptor
    where
        H: ToolHandler + 'static,
    {
        ToolDescriptor {
            name: self.name.unwrap_or_else(|| self.id.clone()),
            id: self.id,
            description: self.description,
            version: self.version,
            input_schema: self.input_schema,
            handler: Arc::new(handler),
        }
    }

    /// Finish the descriptor with an async closure as handler.
    pub fn handler_fn<F, Fut>(self, f: F) -> ToolDescriptor
    where
        F: Fn(ToolInput) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.handler(FnHandler(f))
    }
}

/// Deserialize a tool input into a typed parameter struct.
///
/// Tool definitions use this the way a transport would decode a request body:
/// a shape mismatch is reported as invalid arguments.
pub fn parse_params<T>(input: ToolInput) -> Result<T, HandlerError>
where
    T: serde::de::DeserializeOwned,
{
    Ok(serde_json::from_value(Value::Object(input))?)
}

/// Serialize a typed result into a tool output object.
pub fn to_output<T: Serialize>(value: &T) -> HandlerResult {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(HandlerError::failed(format!(
            "tool produced a non-object result: {}",
            other
        ))),
        Err(e) => Err(HandlerError::failed(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
    #[allow(dead_code)]
    struct EchoParams {
        #[serde(default)]
        a: Option<i64>,
    }

    fn echo() -> ToolDescriptor {
        ToolDescriptor::builder("echo.test")
            .name("Echo")
            .description("Returns its input")
            .params::<EchoParams>()
            .handler_fn(|input| async move { Ok(input) })
    }

    #[tokio::test]
    async fn test_closure_handler_is_callable() {
        let descriptor = echo();
        let mut input = ToolInput::new();
        input.insert("a".into(), json!(1));

        let output = descriptor.handler().call(input.clone()).await.unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn test_descriptor_serialization_hides_handler() {
        let value = serde_json::to_value(echo()).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();

        assert_eq!(keys, ["id", "name", "description", "version", "parameters"]);
        assert_eq!(value["id"], json!("echo.test"));
        assert_eq!(value["version"], json!("1.0.0"));
        assert_eq!(value["parameters"]["type"], json!("object"));
        assert_eq!(
            value["parameters"]["properties"]["a"]["type"],
            json!(["integer", "null"])
        );
    }

    #[test]
    fn test_default_schema_is_an_open_object() {
        let descriptor = ToolDescriptor::builder("x.y").handler_fn(|input| async move { Ok(input) });
        assert_eq!(
            serde_json::to_value(&descriptor.input_schema).unwrap(),
            json!({"type": "object"})
        );
    }

    #[test]
    fn test_name_defaults_to_id() {
        let descriptor = ToolDescriptor::builder("x.y").handler_fn(|input| async move { Ok(input) });
        assert_eq!(descriptor.name, "x.y");
    }

    #[test]
    fn test_parse_params_reports_invalid_arguments() {
        #[derive(Debug, serde::Deserialize)]
        struct Params {
            #[allow(dead_code)]
            query: String,
        }

        let err = parse_params::<Params>(ToolInput::new()).unwrap_err();
        assert!(matches!(err, HandlerError::InvalidArguments(_)));
    }

    #[test]
    fn test_to_output_rejects_non_objects() {
        assert!(to_output(&json!({"ok": true})).is_ok());
        assert!(matches!(to_output(&json!([1, 2])), Err(HandlerError::Failed(_))));
    }
}
