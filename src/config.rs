use clap::Parser;
use std::net::SocketAddr;
use std::num::NonZeroUsize;

/// Default cap on a recorded request body.
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Command line configuration for the inspector binary.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "webhook-inspector",
    version,
    about = "Record inbound webhooks and inspect them over HTTP"
)]
pub struct Config {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:8082")]
    pub listen: SocketAddr,

    /// Number of most recent events to retain.
    #[arg(long, default_value = "100")]
    pub capacity: NonZeroUsize,

    /// Largest request body accepted on /hook, in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,

    /// Log filter directive, e.g. `info` or `webhook_inspector=debug`.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
