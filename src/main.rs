use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use data_donation::adapters::{sources, JsonLinesHost};
use data_donation::application::{RunSessionCommand, RunSessionHandler};
use data_donation::config::AppConfig;
use data_donation::domain::foundation::{DomainError, ErrorCode, SessionId};

/// Run one data donation session, speaking JSON lines over stdin/stdout.
#[derive(Debug, Parser)]
#[command(name = "data-donation", version, about)]
struct Cli {
    /// Session id used in donation keys (defaults to a random UUID)
    #[arg(long, env = "DATA_DONATION_SESSION_ID")]
    session_id: Option<String>,

    /// Configuration file describing the sources
    #[arg(long, short)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    config.logging.init_subscriber();
    if let Err(e) = config.validate() {
        let err = DomainError::new(ErrorCode::ValidationFailed, e.to_string());
        tracing::error!(code = %err.code, "Invalid configuration: {}", err.message);
        return ExitCode::FAILURE;
    }

    let session_id = match cli.session_id {
        Some(id) => match SessionId::new(id) {
            Ok(id) => id,
            Err(e) => {
                let err = DomainError::from(e);
                tracing::error!(code = %err.code, "Invalid session id: {}", err.message);
                return ExitCode::FAILURE;
            }
        },
        None => SessionId::generate(),
    };

    let handler = RunSessionHandler::new(Arc::new(JsonLinesHost::stdio()));
    let cmd = RunSessionCommand {
        session_id,
        sources: sources::from_config(&config),
    };

    match handler.handle(cmd).await {
        Ok(report) if report.exit_code == 0 => {
            tracing::info!(
                session_id = %report.session_id,
                commands = report.commands_emitted,
                "Session completed"
            );
            ExitCode::SUCCESS
        }
        Ok(report) => {
            tracing::warn!(
                code = report.exit_code,
                message = %report.exit_message,
                "Session exited"
            );
            ExitCode::FAILURE
        }
        Err(e) => {
            let err = e.to_domain_error();
            tracing::error!(
                code = %err.code,
                details = ?err.details,
                "Session failed: {}",
                err.message
            );
            ExitCode::FAILURE
        }
    }
}
