#[tokio::main]
async fn main() {
    datenight_backend::run().await;
}
