//! services/api/src/bin/openapi.rs
//!
//! Writes the OpenAPI 3.0 specification for the activity planner REST API to
//! disk, so clients can be generated without running the server.

use api_lib::web::rest::ApiDoc;
use utoipa::OpenApi;

const DEFAULT_OUTPUT: &str = "openapi.json";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Output path is the first argument when given, e.g. `openapi docs/api.json`.
    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_OUTPUT.to_string());

    let spec = ApiDoc::openapi().to_pretty_json()?;
    std::fs::write(&path, spec)?;
    println!("Wrote activity planner OpenAPI spec to {}", path);
    Ok(())
}
