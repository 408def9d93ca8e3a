// src/config.rs

use std::net::SocketAddr;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::core::scanner::fetcher::FetchConfig;
use crate::server::ServerConfig;

/// Passive web security analyzer: fetches one URL and reports missing
/// security headers.
#[derive(Debug, Parser)]
#[command(name = "sitescan", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub serve: ServeArgs,

    #[command(flatten)]
    pub fetch: FetchArgs,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Serve the HTTP API (default).
    Serve,
    /// Interactive terminal client.
    Tui,
    /// Scan a single URL and print the report.
    Scan {
        /// Absolute URL including the scheme, e.g. https://example.com
        url: String,
        /// Print the report as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

/// Listener settings, parsed for `serve` and for the bare `sitescan`.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to listen on.
    #[arg(long, global = true, env = "SITESCAN_BIND", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,
}

/// Outbound request settings shared by every mode.
#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Give up on the target after this many seconds.
    #[arg(long, global = true, env = "SITESCAN_TIMEOUT_SECS", default_value_t = 15)]
    pub timeout_secs: u64,

    /// Redirects to follow; 0 analyzes the first response as-is.
    #[arg(long, global = true, env = "SITESCAN_MAX_REDIRECTS", default_value_t = 10)]
    pub max_redirects: usize,

    /// Ignore HTTP_PROXY/HTTPS_PROXY.
    #[arg(long, global = true, env = "SITESCAN_NO_PROXY")]
    pub no_proxy: bool,
}

impl Cli {
    /// The mode to run; `serve` when no subcommand is given.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }
}

impl From<&ServeArgs> for ServerConfig {
    fn from(args: &ServeArgs) -> Self {
        Self { bind: args.bind }
    }
}

impl From<&FetchArgs> for FetchConfig {
    fn from(args: &FetchArgs) -> Self {
        Self {
            timeout: Duration::from_secs(args.timeout_secs),
            max_redirects: args.max_redirects,
            use_system_proxy: !args.no_proxy,
            ..FetchConfig::default()
        }
    }
}
