use anyhow::Context;

use headline_labeler::app;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::run().await.context("headline labeler exited with error")?;
    Ok(())
}
