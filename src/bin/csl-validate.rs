use std::process::ExitCode;

use anyhow::Result;
use csl_validator::cli::run;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    run().await
}
