//! Practice server entry point

use clap::Parser;
use std::net::SocketAddr;

use server::{PlatformServer, RealAttemptLog, RealQuestionBank, ServerError, ServerResult, ServerState};
use shared::logging;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "SAT practice platform server")]
struct Args {
    /// Address to bind the HTTP server to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port for the HTTP server
    #[arg(long, default_value = "8080")]
    port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Path to the question bank JSON file
    #[arg(long, default_value = "./data/question_bank.json")]
    question_bank: String,
}

#[tokio::main]
async fn main() -> ServerResult<()> {
    // Load .env configuration if present
    dotenv::dotenv().ok();

    let args = Args::parse();

    logging::init_tracing_with_level(Some(&args.log_level));
    logging::log_startup(&format!("practice server on port {}", args.port));

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|e| ServerError::ServerStartup(format!("Invalid bind address: {e}")))?;

    // Load the question bank up front; an empty bank can serve status
    // endpoints but every test request would fail, so bail out early.
    let question_bank = RealQuestionBank::load_from_file(&args.question_bank)?;
    let attempt_log = RealAttemptLog::new();

    let state = ServerState::new();
    let platform = PlatformServer::new(state, question_bank, attempt_log);

    platform.run(addr).await?;

    logging::log_success("Practice server stopped gracefully");
    Ok(())
}
