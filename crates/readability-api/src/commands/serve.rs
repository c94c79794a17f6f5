//! Serve command: run the HTTP service.

use clap::Args;
use readability_core::Config;
use tracing::{debug, instrument};

use crate::server;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind (overrides config `host`).
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides config `port`).
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply(self, mut config: Config) -> Config {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        config
    }
}

/// Start the service and block until shutdown.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(args: ServeArgs, config: Config) -> anyhow::Result<()> {
    debug!(host = ?args.host, port = ?args.port, "executing serve command");
    let config = args.apply(config);
    server::serve(&config).await
}
