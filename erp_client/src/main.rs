use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    erp_client::run().await
}
