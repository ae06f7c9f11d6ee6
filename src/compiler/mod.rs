//! The operation-to-tool compiler.
//!
//! [`ToolCompiler`] walks a [`Catalog`] in document order and, for every
//! `get`/`post`/`delete` operation with an `operationId`, produces one
//! [`CompiledTool`]: a name, a description, an [`InputSchema`] and a handler
//! that relays the call to the backend through the [`HttpClient`] capability.
//!
//! [`HttpClient`]: crate::http::HttpClient

pub mod classifier;
pub mod request;
pub mod schema;

#[cfg(test)]
pub(crate) mod log_capture;

pub use classifier::{ParameterGroups, classify};
pub use schema::{FieldRule, InputSchema, SchemaViolation, synthesize};

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::catalog::{Catalog, HttpMethod, Operation, RouteTemplate};
use crate::http::{DynHttpClient, HttpResponse};
use crate::surface::Surface;
use crate::tool::{Tool, ToolError, ToolResult};

/// Errors that abort catalog compilation.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// A qualifying operation has no usable identifier
    #[error("Malformed catalog entry: {method} {route} has no usable operationId")]
    MalformedCatalogEntry { route: String, method: HttpMethod },
}

/// Compiles catalog operations into tools for one surface.
#[derive(Clone)]
pub struct ToolCompiler {
    surface: Arc<dyn Surface>,
    client: DynHttpClient,
}

impl ToolCompiler {
    /// Creates a compiler whose tools dispatch through `client`.
    pub fn new(surface: Arc<dyn Surface>, client: DynHttpClient) -> Self {
        Self { surface, client }
    }

    /// Compiles every qualifying operation in the catalog.
    ///
    /// Tools are ordered by route, then `get`, `post`, `delete`. Operations
    /// without an `operationId` are skipped. Any other malformed entry aborts
    /// the whole compilation.
    pub fn compile(&self, catalog: &Catalog) -> Result<Vec<CompiledTool>, CompileError> {
        let mut tools = Vec::new();

        for route in catalog {
            for (method, operation) in route.item.operations() {
                if operation.qualifying_id().is_none() {
                    continue;
                }
                tools.push(self.compile_operation(&route.template, method, operation)?);
            }
        }

        debug!(
            surface = %self.surface.kind(),
            routes = catalog.len(),
            tools = tools.len(),
            "Compiled catalog"
        );

        Ok(tools)
    }

    /// Compiles a single operation.
    pub fn compile_operation(
        &self,
        route: &RouteTemplate,
        method: HttpMethod,
        operation: &Operation,
    ) -> Result<CompiledTool, CompileError> {
        let operation_id = operation
            .operation_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| CompileError::MalformedCatalogEntry {
                route: route.to_string(),
                method,
            })?;

        let groups = classify(&operation.parameters);
        lint_placeholders(route, method, &groups);

        let schema = synthesize(&operation.parameters, method, self.surface.body_fields());
        let tool = CompiledTool {
            name: self.surface.tool_name(operation_id),
            description: self.surface.tool_description(operation.description.as_deref()),
            method,
            route: route.clone(),
            groups,
            schema,
            surface: self.surface.clone(),
            client: self.client.clone(),
        };

        debug!(tool = %tool.name, %method, %route, "Compiled tool");

        Ok(tool)
    }
}

impl fmt::Debug for ToolCompiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolCompiler")
            .field("surface", &self.surface.kind())
            .finish()
    }
}

/// Warns about path parameters and route placeholders that do not match up.
fn lint_placeholders(route: &RouteTemplate, method: HttpMethod, groups: &ParameterGroups) {
    let placeholders = route.placeholders();

    for name in &groups.path {
        if !placeholders.contains(&name.as_str()) {
            warn!(%route, %method, param = %name, "Path parameter has no placeholder in route");
        }
    }
    for placeholder in placeholders {
        if !groups.path.iter().any(|name| name == placeholder) {
            warn!(
                %route,
                %method,
                %placeholder,
                "Route placeholder is not a declared path parameter"
            );
        }
    }
}

/// One tool compiled from a catalog operation. Immutable once built.
#[derive(Clone)]
pub struct CompiledTool {
    name: String,
    description: String,
    method: HttpMethod,
    route: RouteTemplate,
    groups: ParameterGroups,
    schema: InputSchema,
    surface: Arc<dyn Surface>,
    client: DynHttpClient,
}

impl CompiledTool {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn route(&self) -> &RouteTemplate {
        &self.route
    }

    /// Declared path and query parameter names.
    pub fn parameters(&self) -> &ParameterGroups {
        &self.groups
    }

    pub fn input_schema(&self) -> &InputSchema {
        &self.schema
    }

    /// Sends the request for `input` and returns the backend response as-is.
    ///
    /// `input` is expected to have passed [`InputSchema::validate`]; only its
    /// object shape is checked here. Non-2xx responses are returned, not
    /// raised.
    pub async fn invoke(&self, input: &Value) -> Result<HttpResponse, ToolError> {
        let empty = Map::new();
        let args = match input {
            Value::Null => &empty,
            Value::Object(args) => args,
            _ => return Err(SchemaViolation::NotAnObject.into()),
        };

        let request = request::build_request(
            self.method,
            &self.route,
            &self.groups,
            args,
            self.surface.bearer_token().expose_secret(),
        );
        debug!(
            tool = %self.name,
            method = %request.method,
            path = %request.path,
            "Invoking tool"
        );

        Ok(self.client.fetch(request).await?)
    }
}

impl fmt::Debug for CompiledTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledTool")
            .field("name", &self.name)
            .field("method", &self.method)
            .field("route", &self.route)
            .field("groups", &self.groups)
            .field("schema", &self.schema)
            .finish()
    }
}

#[async_trait]
impl Tool for CompiledTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters_schema(&self) -> Value {
        self.schema.to_json_schema()
    }

    fn validate(&self, args: &Value) -> Result<(), ToolError> {
        Ok(self.schema.validate(args)?)
    }

    async fn execute(&self, args: Value) -> Result<ToolResult, ToolError> {
        Ok(self.invoke(&args).await?.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AdminSession;
    use crate::http::{HttpError, HttpRequest, MockHttpClient};
    use crate::surface::{AdminSurface, StoreSurface};
    use secrecy::SecretString;
    use serde_json::json;
    use std::sync::Mutex;
    use tokio_test::{assert_err, assert_ok};

    fn store_compiler(client: MockHttpClient) -> ToolCompiler {
        ToolCompiler::new(
            Arc::new(StoreSurface::new(SecretString::from("pk_test".to_string()))),
            Arc::new(client),
        )
    }

    fn admin_compiler(client: MockHttpClient) -> ToolCompiler {
        ToolCompiler::new(
            Arc::new(AdminSurface::new(AdminSession::authenticated("jwt-admin"))),
            Arc::new(client),
        )
    }

    /// A mock that records every request and answers with `response`.
    fn recording_client(
        response: HttpResponse,
    ) -> (MockHttpClient, Arc<Mutex<Vec<HttpRequest>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut client = MockHttpClient::new();
        client.expect_fetch().returning(move |request| {
            sink.lock().unwrap().push(request);
            Ok(response.clone())
        });
        (client, seen)
    }

    fn catalog(document: &str) -> Catalog {
        Catalog::from_json_str(document).unwrap()
    }

    const PRODUCTS: &str = r#"{
        "/store/products": {
            "get": {
                "operationId": "GetProducts",
                "description": "Retrieve a list of products.",
                "parameters": [
                    {"name": "x-publishable-api-key", "in": "header", "schema": {"type": "string"}},
                    {"name": "tags", "in": "query", "schema": {"type": "array"}},
                    {"name": "limit", "in": "query", "schema": {"type": "number"}}
                ]
            }
        },
        "/store/products/{id}": {
            "get": {
                "operationId": "GetProductsId",
                "parameters": [{"name": "id", "in": "path", "schema": {"type": "string"}}]
            },
            "post": {
                "operationId": "PostProductsId",
                "parameters": [
                    {"name": "id", "in": "path", "schema": {"type": "string"}},
                    {"name": "metadata", "in": "query", "schema": {"type": "string"}}
                ]
            },
            "delete": {
                "description": "No identifier, so no tool."
            }
        }
    }"#;

    #[test]
    fn test_one_tool_per_qualifying_operation() {
        let tools = store_compiler(MockHttpClient::new())
            .compile(&catalog(PRODUCTS))
            .unwrap();

        let names: Vec<&str> = tools.iter().map(CompiledTool::name).collect();
        assert_eq!(names, vec!["GetProducts", "GetProductsId", "PostProductsId"]);
        assert_eq!(tools[1].route(), tools[2].route());
        assert_eq!(tools[2].method(), HttpMethod::Post);
    }

    #[test]
    fn test_descriptor_contents() {
        let tools = store_compiler(MockHttpClient::new())
            .compile(&catalog(PRODUCTS))
            .unwrap();

        let list = &tools[0];
        assert_eq!(
            list.description(),
            "This tool helps store customers. Retrieve a list of products."
        );
        let keys: Vec<&str> = list.input_schema().keys().collect();
        assert_eq!(keys, vec!["tags", "limit"]);

        let update = &tools[2];
        assert_eq!(update.input_schema().get("metadata"), Some(FieldRule::Unknown));
        assert!(update.input_schema().contains_key("email"));
        assert_eq!(update.parameters().path, vec!["id"]);

        let definition = update.to_definition();
        assert_eq!(definition.name, "PostProductsId");
        assert_eq!(definition.input_schema["type"], "object");
    }

    #[test]
    fn test_admin_names() {
        let tools = admin_compiler(MockHttpClient::new())
            .compile(&catalog(
                r#"{
                    "/admin/products/{id}": {
                        "get": {"operationId": "GetProduct"},
                        "delete": {"operationId": "DeleteProduct"}
                    }
                }"#,
            ))
            .unwrap();

        let names: Vec<&str> = tools.iter().map(CompiledTool::name).collect();
        assert_eq!(names, vec!["AdminGetProduct", "AdminDeleteProduct"]);
        assert!(tools[0].description().starts_with("This tool helps store administrators."));
    }

    #[test]
    fn test_compilation_is_deterministic() {
        let catalog = catalog(PRODUCTS);
        let compiler = store_compiler(MockHttpClient::new());

        let first = compiler.compile(&catalog).unwrap();
        let second = compiler.compile(&catalog).unwrap();

        let shape = |tools: &[CompiledTool]| {
            tools
                .iter()
                .map(|t| (t.name().to_string(), t.input_schema().clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(shape(first.as_slice()), shape(second.as_slice()));
    }

    #[test]
    fn test_whitespace_operation_id_aborts_compilation() {
        let err = store_compiler(MockHttpClient::new())
            .compile(&catalog(
                r#"{
                    "/store/regions": {"get": {"operationId": "GetRegions"}},
                    "/store/carts": {"post": {"operationId": "   "}}
                }"#,
            ))
            .unwrap_err();

        match err {
            CompileError::MalformedCatalogEntry { route, method } => {
                assert_eq!(route, "/store/carts");
                assert_eq!(method, HttpMethod::Post);
            }
        }
    }

    #[test]
    fn test_compile_operation_without_id_is_an_error() {
        let result = store_compiler(MockHttpClient::new()).compile_operation(
            &RouteTemplate::new("/store/carts"),
            HttpMethod::Post,
            &Operation::default(),
        );
        assert!(matches!(result, Err(CompileError::MalformedCatalogEntry { .. })));
    }

    #[test]
    fn test_tool_name_keeps_operation_id_verbatim() {
        let tools = admin_compiler(MockHttpClient::new())
            .compile(&catalog(
                r#"{"/admin/orders": {"get": {"operationId": " GetOrders"}}}"#,
            ))
            .unwrap();

        assert_eq!(tools[0].name(), "Admin GetOrders");
    }

    #[test]
    fn test_placeholder_mismatch_is_logged() {
        let compiler = store_compiler(MockHttpClient::new());
        let document = catalog(
            r#"{
                "/store/carts/{cart_id}": {
                    "get": {
                        "operationId": "GetCartsId",
                        "parameters": [{"name": "id", "in": "path", "schema": {"type": "string"}}]
                    }
                },
                "/store/regions/{id}": {
                    "get": {
                        "operationId": "GetRegionsId",
                        "parameters": [{"name": "id", "in": "path", "schema": {"type": "string"}}]
                    }
                }
            }"#,
        );

        let mut compiled = 0;
        let logs = log_capture::capture_logs(|| {
            compiled = compiler.compile(&document).unwrap().len();
        });

        assert_eq!(compiled, 2);
        let warnings: Vec<&str> = logs.lines().filter(|line| line.contains("WARN")).collect();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("Path parameter has no placeholder in route"));
        assert!(warnings[0].contains("param=id"));
        assert!(warnings[1].contains("Route placeholder is not a declared path parameter"));
        assert!(warnings[1].contains("placeholder=cart_id"));
    }

    #[tokio::test]
    async fn test_get_dispatch() {
        let (client, seen) = recording_client(HttpResponse::new(200, json!({"products": []})));
        let tools = store_compiler(client).compile(&catalog(PRODUCTS)).unwrap();

        let response = assert_ok!(
            tools[0]
                .invoke(&json!({
                    "tags": ["a", "b"],
                    "limit": 5,
                    "x-publishable-api-key": "never-forwarded",
                    "extra": "dropped"
                }))
                .await
        );
        assert_eq!(response.body, json!({"products": []}));

        let requests = seen.lock().unwrap();
        let request = &requests[0];
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.path, "/store/products");
        assert_eq!(
            request::encode_query(&request.query),
            "tags=a&tags=b&limit=5"
        );
        assert!(request.body.is_none());
        assert_eq!(request.header("Authorization"), Some("Bearer pk_test"));
        assert!(request.header("x-publishable-api-key").is_none());
    }

    #[tokio::test]
    async fn test_post_body_excludes_path_params() {
        let (client, seen) = recording_client(HttpResponse::new(200, json!({})));
        let tools = admin_compiler(client)
            .compile(&catalog(
                r#"{
                    "/admin/products/{id}": {
                        "post": {
                            "operationId": "PostProductsId",
                            "parameters": [{"name": "id", "in": "path", "schema": {"type": "string"}}]
                        }
                    }
                }"#,
            ))
            .unwrap();

        assert_ok!(tools[0].invoke(&json!({"name": "X", "id": "skip-me"})).await);

        let requests = seen.lock().unwrap();
        assert_eq!(requests[0].path, "/admin/products/skip-me");
        assert_eq!(requests[0].body, Some(json!({"name": "X"})));
        assert_eq!(requests[0].header("Authorization"), Some("Bearer jwt-admin"));
    }

    #[tokio::test]
    async fn test_unresolved_placeholder_is_sent_verbatim() {
        let (client, seen) = recording_client(HttpResponse::new(404, json!({"type": "not_found"})));
        let tools = store_compiler(client).compile(&catalog(PRODUCTS)).unwrap();

        let response = assert_ok!(tools[1].invoke(&Value::Null).await);
        assert_eq!(response.status, 404);
        assert_eq!(seen.lock().unwrap()[0].path, "/store/products/{id}");
    }

    #[tokio::test]
    async fn test_non_success_response_is_returned() {
        let (client, _) = recording_client(HttpResponse::new(
            401,
            json!({"type": "unauthorized", "message": "Unauthorized"}),
        ));
        let tools = store_compiler(client).compile(&catalog(PRODUCTS)).unwrap();

        let result = assert_ok!(tools[0].execute(json!({})).await);
        assert_eq!(result.status(), Some(401));
        assert_eq!(result.output["type"], "unauthorized");
    }

    #[tokio::test]
    async fn test_backend_failure_propagates() {
        let mut client = MockHttpClient::new();
        client
            .expect_fetch()
            .returning(|_| Err(HttpError::Decode("connection reset".to_string())));
        let tools = store_compiler(client).compile(&catalog(PRODUCTS)).unwrap();

        let err = assert_err!(tools[0].invoke(&json!({})).await);
        assert!(matches!(err, ToolError::Backend(HttpError::Decode(_))));
    }

    #[tokio::test]
    async fn test_non_object_input_is_rejected() {
        let tools = store_compiler(MockHttpClient::new())
            .compile(&catalog(PRODUCTS))
            .unwrap();

        let err = assert_err!(tools[0].invoke(&json!("GetProducts")).await);
        assert!(matches!(err, ToolError::InvalidArguments(SchemaViolation::NotAnObject)));
    }

    #[test]
    fn test_bundled_catalogs_compile() {
        let store = store_compiler(MockHttpClient::new())
            .compile(&Catalog::bundled_store().unwrap())
            .unwrap();
        let admin = admin_compiler(MockHttpClient::new())
            .compile(&Catalog::bundled_admin().unwrap())
            .unwrap();

        assert_eq!(store.len(), 23);
        assert_eq!(admin.len(), 18);
        assert!(store.iter().any(|t| t.name() == "DeleteCartsIdLineItemsLine_id"));
        assert!(admin.iter().all(|t| t.name().starts_with("Admin")));
        assert!(admin.iter().any(|t| t.name() == "AdminDeleteProductsId"));
    }
}
