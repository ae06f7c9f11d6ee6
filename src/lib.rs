//! # Commerce Tools
//!
//! Compiles a commerce backend's operation catalogs into callable tools.
//!
//! ## Features
//!
//! - **Catalogs**: Parse route → method → operation documents, in order
//! - **Compiler**: One tool per `get`/`post`/`delete` operation with an id
//! - **Surfaces**: Store tools use the publishable key, admin tools a login token
//! - **Tool System**: Registry and executor over the shared [`Tool`] trait
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use commerce_tools::prelude::*;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env();
//!     let client: DynHttpClient = Arc::new(config.http_client()?);
//!
//!     let registry = registry_for(SurfaceKind::Store, &config, client).await?;
//!     let executor = ToolExecutor::new(Arc::new(registry));
//!
//!     let result = executor.call("GetProducts", json!({"limit": 5})).await?;
//!     println!("{}", result.output);
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod catalog;
pub mod compiler;
pub mod config;
pub mod error;
pub mod http;
pub mod surface;
pub mod tool;
pub mod toolbox;

// Re-exports for convenient usage
pub use auth::{AdminCredentials, AdminSession, AuthError, Authenticated, Unauthenticated};
pub use catalog::{Catalog, CatalogError, HttpMethod, Operation, Parameter, RouteTemplate};
pub use compiler::{
    CompileError, CompiledTool, FieldRule, InputSchema, SchemaViolation, ToolCompiler,
};
pub use config::Config;
pub use error::{Error, Result};
pub use http::{DynHttpClient, HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use surface::{AdminSurface, StoreSurface, Surface, SurfaceKind};
pub use tool::{
    DynTool, Tool, ToolCall, ToolDefinition, ToolError, ToolExecutor, ToolRegistry, ToolResult,
};
pub use toolbox::{admin_tools, registry_for, store_tools};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use std::sync::Arc;

    pub use crate::catalog::Catalog;
    pub use crate::compiler::{CompiledTool, ToolCompiler};
    pub use crate::config::Config;
    pub use crate::http::{DynHttpClient, HttpClient, HttpResponse};
    pub use crate::surface::SurfaceKind;
    pub use crate::tool::{Tool, ToolExecutor, ToolRegistry, ToolResult, ToolError, DynTool};
    pub use crate::toolbox::{admin_tools, registry_for, store_tools};
}
