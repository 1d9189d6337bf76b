//! Print the OpenAPI document as JSON, to stdout or a file.

use std::path::PathBuf;

use clap::Parser;
use roster::doc::ApiDoc;
use utoipa::OpenApi;

/// Command-line options for `openapi-dump`.
#[derive(Debug, Parser)]
#[command(about = "Write the REST API's OpenAPI document as JSON")]
struct Cli {
    /// Destination file; stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> std::io::Result<()> {
    let cli = Cli::parse();
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .map_err(std::io::Error::other)?;
    match cli.output {
        Some(path) => std::fs::write(path, json + "\n"),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}
