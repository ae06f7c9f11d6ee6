//! # commerce-tools
//!
//! Lists, describes and invokes the tools compiled from the store and admin
//! catalogs.
//!
//! ## Usage
//!
//! ```bash
//! export PUBLISHABLE_KEY="pk_..."
//! commerce-tools list --surface store
//! commerce-tools schema --surface store GetProductsId
//! commerce-tools call --surface store GetProducts --input '{"limit": 5}'
//!
//! export MEDUSA_USERNAME="admin@medusa-test.com" MEDUSA_PASSWORD="supersecret"
//! commerce-tools call --surface admin AdminGetProductsId --input '{"id": "prod_01"}'
//! ```

use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

use commerce_tools::{Config, DynHttpClient, SurfaceKind, ToolExecutor, registry_for};

/// Commerce catalog tools
#[derive(Parser, Debug)]
#[command(name = "commerce-tools", version)]
struct Args {
    /// Backend base URL, overriding MEDUSA_BACKEND_URL
    #[arg(long, global = true)]
    backend_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List tool names and descriptions
    List {
        #[arg(long, value_enum, default_value_t = SurfaceKind::Store)]
        surface: SurfaceKind,
    },
    /// Print a tool's definition with its input schema
    Schema {
        #[arg(long, value_enum, default_value_t = SurfaceKind::Store)]
        surface: SurfaceKind,
        /// Tool name
        tool: String,
    },
    /// Invoke a tool and print the backend response
    Call {
        #[arg(long, value_enum, default_value_t = SurfaceKind::Store)]
        surface: SurfaceKind,
        /// Tool name
        tool: String,
        /// Tool input as a JSON object
        #[arg(long, default_value = "{}")]
        input: String,
    },
}

impl Command {
    fn surface(&self) -> SurfaceKind {
        match self {
            Command::List { surface } => *surface,
            Command::Schema { surface, .. } => *surface,
            Command::Call { surface, .. } => *surface,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = Config::from_env();
    if let Some(backend_url) = args.backend_url {
        config = config.with_backend_url(backend_url);
    }

    let client: DynHttpClient = Arc::new(
        config
            .http_client()
            .context("Failed to build backend client")?,
    );
    let surface = args.command.surface();
    let registry = registry_for(surface, &config, client)
        .await
        .with_context(|| format!("Failed to prepare {surface} tools"))?;
    let executor = ToolExecutor::new(Arc::new(registry));

    match args.command {
        Command::List { .. } => {
            for definition in executor.definitions() {
                println!("{}\t{}", definition.name, definition.description);
            }
        }
        Command::Schema { tool, .. } => {
            let Some(tool) = executor.registry().get(&tool) else {
                bail!("Unknown {surface} tool: {tool}");
            };
            println!("{}", serde_json::to_string_pretty(&tool.to_definition())?);
        }
        Command::Call { tool, input, .. } => {
            let input: Value = serde_json::from_str(&input).context("--input is not valid JSON")?;
            let result = executor.call(&tool, input).await?;
            let printed = json!({
                "status": result.status(),
                "body": result.output,
            });
            println!("{}", serde_json::to_string_pretty(&printed)?);
        }
    }

    Ok(())
}
