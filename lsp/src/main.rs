#[tokio::main]
async fn main() {
    dockerls_lsp::run().await;
}
