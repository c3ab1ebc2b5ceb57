#[tokio::main]
async fn main() -> anyhow::Result<()> {
    sqltutor_server::start().await
}
