//! Ready-made tool sets for each surface.

use std::sync::Arc;

use tracing::info;

use crate::auth::AdminSession;
use crate::compiler::{CompiledTool, ToolCompiler};
use crate::config::Config;
use crate::error::Result;
use crate::http::DynHttpClient;
use crate::surface::{AdminSurface, StoreSurface, SurfaceKind};
use crate::tool::ToolRegistry;

/// Compiles the store catalog. No network traffic.
pub fn store_tools(config: &Config, client: DynHttpClient) -> Result<Vec<CompiledTool>> {
    let catalog = config.load_store_catalog()?;
    let surface = StoreSurface::new(config.publishable_key.clone());
    let tools = ToolCompiler::new(Arc::new(surface), client).compile(&catalog)?;

    info!(count = tools.len(), "Store tools ready");
    Ok(tools)
}

/// Logs in as admin, then compiles the admin catalog.
///
/// Login failure aborts: no admin tools exist without a session.
pub async fn admin_tools(config: &Config, client: DynHttpClient) -> Result<Vec<CompiledTool>> {
    let catalog = config.load_admin_catalog()?;
    let session = AdminSession::new(config.admin_credentials())
        .login(&*client)
        .await?;
    let surface = AdminSurface::new(session);
    let tools = ToolCompiler::new(Arc::new(surface), client).compile(&catalog)?;

    info!(count = tools.len(), "Admin tools ready");
    Ok(tools)
}

/// Builds a registry holding the tools of one surface.
pub async fn registry_for(
    kind: SurfaceKind,
    config: &Config,
    client: DynHttpClient,
) -> Result<ToolRegistry> {
    let tools = match kind {
        SurfaceKind::Store => store_tools(config, client)?,
        SurfaceKind::Admin => admin_tools(config, client).await?,
    };
    Ok(tools.into_iter().collect())
}
