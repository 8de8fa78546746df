use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    depgraph_lib::main().await
}
