//! Command relay: serves `GET /api/v1/getAllStatus` and `GET /api/v1/healthcheck`
//! with the JSON printed by the matching scripts.

use std::process::ExitCode;

use clap::Parser;

use cmd_relay::cli::RelayArgs;
use cmd_relay::observability::init_logging;
use cmd_relay::ServiceKind;

#[tokio::main]
async fn main() -> ExitCode {
    let args = RelayArgs::parse();
    let verbose = args.listen.verbose;
    let config = args.into_config();
    init_logging(config.as_ref().map_or(verbose, |c| c.verbose));

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("cmd-relay v{} starting", env!("CARGO_PKG_VERSION"));
    cmd_relay::lifecycle::run(ServiceKind::Relay, config).await
}
