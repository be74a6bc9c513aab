use anyhow::Context;

use file_transform::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Invalid configuration")?;
    file_transform::run(config)
        .await
        .context("HTTP server failed")
}
