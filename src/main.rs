use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file, if present.
    let _ = dotenvy::dotenv();

    let code = review_rag_cli::run().await;
    ExitCode::from(code as u8)
}
