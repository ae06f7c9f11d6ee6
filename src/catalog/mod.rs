//! Operation catalogs: the route → method → operation documents tools are
//! compiled from.
//!
//! Catalogs are parsed once into typed values. A document may be a bare
//! route map (`{"/store/products": {"get": {...}}}`) or a full OpenAPI
//! document whose `paths` member holds that map. Route order follows the
//! document.

pub mod route;

use std::fmt;
use std::path::Path;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use route::RouteTemplate;

/// Bundled store-surface catalog.
pub const STORE_CATALOG: &str = include_str!("../../oas/store.json");

/// Bundled admin-surface catalog.
pub const ADMIN_CATALOG: &str = include_str!("../../oas/admin.json");

/// Errors raised while loading a catalog document.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed catalog document: {0}")]
    Json(#[from] serde_json::Error),
}

/// HTTP methods that can produce tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    /// Lookup order used when walking a path item.
    pub const ALL: [HttpMethod; 3] = [HttpMethod::Get, HttpMethod::Post, HttpMethod::Delete];

    /// The catalog key for this method.
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
        }
    }

    /// Whether requests with this method carry the residual input as a body.
    pub fn sends_body(self) -> bool {
        !matches!(self, HttpMethod::Get)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

/// Where a parameter is carried on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    /// Anything else (`cookie`, typos). Treated like a header: never exposed.
    Other(String),
}

impl ParameterLocation {
    /// Whether parameters at this location appear in a tool's input schema.
    pub fn is_exposed(&self) -> bool {
        matches!(self, ParameterLocation::Path | ParameterLocation::Query)
    }
}

impl From<String> for ParameterLocation {
    fn from(location: String) -> Self {
        match location.as_str() {
            "path" => ParameterLocation::Path,
            "query" => ParameterLocation::Query,
            "header" => ParameterLocation::Header,
            _ => ParameterLocation::Other(location),
        }
    }
}

/// Declared primitive type of a parameter. Unrecognized or missing types
/// are read as `String`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub enum SchemaType {
    #[default]
    String,
    Number,
    Boolean,
    Array,
    Object,
}

impl From<Value> for SchemaType {
    fn from(value: Value) -> Self {
        match value.as_str() {
            Some("number") => SchemaType::Number,
            Some("boolean") => SchemaType::Boolean,
            Some("array") => SchemaType::Array,
            Some("object") => SchemaType::Object,
            _ => SchemaType::String,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ParameterSchema {
    #[serde(rename = "type", default)]
    pub kind: SchemaType,
}

/// A single declared parameter of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    #[serde(default)]
    pub schema: ParameterSchema,
}

impl Parameter {
    pub fn schema_type(&self) -> SchemaType {
        self.schema.kind
    }
}

/// One operation under a route and method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default)]
    pub operation_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl Operation {
    /// The operation identifier, if present and non-empty. Operations without
    /// one do not produce tools.
    pub fn qualifying_id(&self) -> Option<&str> {
        self.operation_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// The operations declared for a single route. Methods other than
/// `get`, `post` and `delete` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PathItem {
    #[serde(default)]
    pub get: Option<Operation>,
    #[serde(default)]
    pub post: Option<Operation>,
    #[serde(default)]
    pub delete: Option<Operation>,
}

impl PathItem {
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
        }
    }

    /// Declared operations in `get`, `post`, `delete` order.
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> + '_ {
        HttpMethod::ALL
            .into_iter()
            .filter_map(move |method| self.operation(method).map(|op| (method, op)))
    }
}

/// A route template together with its operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub template: RouteTemplate,
    pub item: PathItem,
}

/// An immutable, ordered operation catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    routes: Vec<Route>,
}

impl Catalog {
    /// Parses a catalog from a JSON document.
    pub fn from_json_str(document: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(document)?)
    }

    /// Reads and parses a catalog document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let document = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&document)
    }

    /// The bundled store-surface catalog.
    pub fn bundled_store() -> Result<Self, CatalogError> {
        Self::from_json_str(STORE_CATALOG)
    }

    /// The bundled admin-surface catalog.
    pub fn bundled_admin() -> Result<Self, CatalogError> {
        Self::from_json_str(ADMIN_CATALOG)
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }

    /// Number of routes in the catalog.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl FromIterator<Route> for Catalog {
    fn from_iter<I: IntoIterator<Item = Route>>(iter: I) -> Self {
        Self {
            routes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CatalogVisitor)
    }
}

struct CatalogVisitor;

impl<'de> Visitor<'de> for CatalogVisitor {
    type Value = Catalog;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a route map or an OpenAPI document with a `paths` member")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Catalog, A::Error> {
        let mut routes = Vec::new();

        while let Some(key) = map.next_key::<String>()? {
            if key == "paths" {
                let nested: Catalog = map.next_value()?;
                routes.extend(nested.routes);
            } else if key.starts_with('/') {
                let item: PathItem = map
                    .next_value()
                    .map_err(|e| de::Error::custom(format!("route '{key}': {e}")))?;
                routes.push(Route {
                    template: RouteTemplate::new(key),
                    item,
                });
            } else {
                // `openapi`, `info`, `components`, ...
                map.next_value::<IgnoredAny>()?;
            }
        }

        Ok(Catalog { routes })
    }
}
