use std::{error::Error, net::SocketAddr, sync::Arc};

use clap::Parser;
use dns_cache::asynchronous::async_main_cache::AsyncMainQuestionCache;
use dns_server::{
    config::{CliOverrides, ProxyConfig},
    resolver::ForwardingResolver,
    server::DnsProxyServer,
    upstream::UdpUpstream,
};
use log::info;

#[derive(Parser)]
#[command(name = "dns-proxy")]
#[command(version)]
#[command(about = "Caching DNS forwarding proxy")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Port to listen for queries on
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Upstream resolver address, e.g. 1.1.1.1:53
    #[arg(short = 'u', long)]
    upstream: Option<SocketAddr>,

    /// Upstream timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        listen_port: cli.port,
        upstream_address: cli.upstream,
        upstream_timeout_ms: cli.timeout_ms,
        log_level: cli.log_level,
    };
    let config = ProxyConfig::load(cli.config.as_deref(), cli_overrides)?;
    config.validate()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level)).init();
    info!("Starting dns-proxy v{}", env!("CARGO_PKG_VERSION"));
    info!(upstream:% = config.upstream_address; "Forwarding cache misses with a {:?} timeout", config.upstream_timeout());

    let cache = Arc::new(AsyncMainQuestionCache::new());
    let upstream = UdpUpstream::new(config.upstream_address, config.upstream_timeout());
    let resolver = Arc::new(ForwardingResolver::new(cache, upstream));

    let server = DnsProxyServer::bind(config.listen_address, resolver, config.max_concurrent_queries).await?;
    server.run().await?;
    Ok(())
}
