#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bunpo_backend::run().await
}
