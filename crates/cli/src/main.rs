use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    evopath_cli::main_entry().await
}
