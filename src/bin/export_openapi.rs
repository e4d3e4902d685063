//! Write the todo API's OpenAPI document
//!
//! ```text
//! cargo run --bin export_openapi > openapi.json
//! cargo run --bin export_openapi -- --output docs/openapi.json
//! ```

use anyhow::Context;
use utoipa::OpenApi;

use knots::gateway::openapi::ApiDoc;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let output_path = args
        .iter()
        .position(|a| a == "--output")
        .and_then(|i| args.get(i + 1));

    let json = ApiDoc::openapi()
        .to_pretty_json()
        .context("Failed to serialize OpenAPI document")?;

    match output_path {
        Some(path) => {
            std::fs::write(path, &json).with_context(|| format!("Failed to write {}", path))?;
            eprintln!("✅ OpenAPI document written to: {}", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}
