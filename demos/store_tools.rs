//! # Store Tools Example
//!
//! Compiles the store catalog, prints every tool, then calls a few of them
//! against a running backend.
//!
//! ## Usage
//!
//! ```bash
//! export MEDUSA_BACKEND_URL="http://localhost:9000"
//! export PUBLISHABLE_KEY="pk_..."
//! cargo run --example store_tools
//! ```

use commerce_tools::prelude::*;
use commerce_tools::ToolCall;
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env();
    let client: DynHttpClient = Arc::new(config.http_client()?);

    // Compile and register
    let tools = store_tools(&config, client)?;
    let registry: ToolRegistry = tools.into_iter().collect();
    println!("Registered tools: {}", registry.len());

    for tool in registry.list() {
        println!("  {:<40} {}", tool.name(), tool.description());
    }

    let executor = ToolExecutor::new(Arc::new(registry));

    // Independent calls run concurrently
    let calls = vec![
        ToolCall::new("GetRegions", json!({})),
        ToolCall::new("GetProducts", json!({"limit": 3, "fields": "title,handle"})),
        ToolCall::new("GetCollections", json!({"limit": 3})),
    ];

    for (call, result) in calls.clone().into_iter().zip(executor.call_all(calls).await) {
        println!("\n{}", "=".repeat(50));
        println!("{}", call.name);
        println!("{}", "=".repeat(50));

        match result {
            Ok(result) => {
                println!("status: {:?}", result.status());
                println!("{}", serde_json::to_string_pretty(&result.output)?);
            }
            Err(error) => println!("error: {error}"),
        }
    }

    Ok(())
}
