//! Primer CLI binary entry point.

use anyhow::Result;
use clap::Parser;
use primer_cli::App;

#[tokio::main]
async fn main() -> Result<()> {
    let app = App::parse();
    app.init_tracing();
    app.run().await
}
