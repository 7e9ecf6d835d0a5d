#[tokio::main]
async fn main() {
    tiffin_server::start_server().await;
}
