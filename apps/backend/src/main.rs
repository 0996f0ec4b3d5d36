#[tokio::main]
async fn main() -> anyhow::Result<()> {
    verb_quiz_backend::run().await
}
