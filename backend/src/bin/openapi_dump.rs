//! Print the OpenAPI document as JSON.

use techzone_backend::doc::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<(), serde_json::Error> {
    let json = ApiDoc::openapi().to_pretty_json()?;
    #[expect(clippy::print_stdout, reason = "dump tool writes the document to stdout")]
    {
        println!("{json}");
    }
    Ok(())
}
