//! psstore Server Binary
//!
//! Starts the TCP server for psstore.

use std::sync::Arc;

use clap::Parser;
use psstore::config::DEFAULT_PORT;
use psstore::network::Server;
use psstore::persistence::NoopPersistence;
use psstore::{Config, KvService, Store};
use tracing_subscriber::{fmt, EnvFilter};

/// psstore Server
#[derive(Parser, Debug)]
#[command(name = "psstore-server")]
#[command(about = "Concurrent key-value store for integer and string values")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Interface to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Maximum concurrent client connections
    #[arg(short, long, default_value = "1024")]
    max_connections: usize,

    /// Close idle connections after this many milliseconds (0 = never)
    #[arg(long, default_value = "0")]
    read_timeout_ms: u64,

    /// Drop clients that stop reading for this many milliseconds (0 = never)
    #[arg(long, default_value = "5000")]
    write_timeout_ms: u64,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,psstore=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("psstore Server v{}", psstore::VERSION);

    let config = Config::builder()
        .host_port(&args.host, args.port)
        .max_connections(args.max_connections)
        .read_timeout_ms(args.read_timeout_ms)
        .write_timeout_ms(args.write_timeout_ms)
        .build();

    tracing::info!("Listen address: {}", config.listen_addr);

    // One store per domain, shared with the service and the hooks
    let ints = Arc::new(Store::<i32>::new());
    let strs = Arc::new(Store::<String>::new());
    let service = Arc::new(KvService::new(ints, strs));

    let server = match Server::bind(config, service, Arc::new(NoopPersistence)) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to start server: {}", e);
            std::process::exit(1);
        }
    };

    // Ctrl+C flips the shutdown flag so the backup hook runs before exit
    let handle = server.shutdown_handle();
    if let Err(e) = ctrlc::set_handler(move || {
        tracing::info!("Received Ctrl+C, initiating shutdown...");
        handle.shutdown();
    }) {
        tracing::warn!("Could not install Ctrl+C handler: {}", e);
    }

    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
