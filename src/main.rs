use clap::{Parser, Subcommand};
use document_pantry::config::{CounterConfig, PantryConfig};
use document_pantry::registry::service::Registry;
use document_pantry::router::forwarder::HttpForwarder;
use document_pantry::router::handlers as counter;
use document_pantry::router::service::DocumentRouter;
use document_pantry::shopper::{self, ShopperArgs};
use document_pantry::storage::TierMapping;
use document_pantry::storage::handlers as pantry;
use std::io::Write;

#[derive(Parser, Debug)]
#[command(name = "document-pantry")]
#[command(author, version, about = "Consistent-hash document router and tiered storage nodes")]
struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the router that owns the ring and the API keys.
    Counter(CounterConfig),
    /// Run a storage node.
    Pantry(PantryConfig),
    /// Send a single request and print the answer.
    Shopper(ShopperArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Command::Counter(config) => run_counter(config).await,
        Command::Pantry(config) => run_pantry(config).await,
        Command::Shopper(args) => {
            let reply = shopper::run(&args).await?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&reply)?;
            stdout.write_all(b"\n")?;
            Ok(())
        }
    }
}

async fn run_counter(config: CounterConfig) -> anyhow::Result<()> {
    let registry = Registry::new(config.replicas);
    tracing::info!(
        "Counter listening on {} (replicas={}, forward timeout={:?})",
        config.bind_addr(),
        registry.replicas(),
        config.forward_timeout()
    );

    let router = DocumentRouter::new(registry, HttpForwarder::new(config.forward_timeout()));
    let app = counter::app(router);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn run_pantry(config: PantryConfig) -> anyhow::Result<()> {
    let mapping = TierMapping::new();
    for tier in &config.tiers {
        mapping.bind(&tier.level, &tier.route)?;
    }
    let app = pantry::app(mapping);

    tracing::info!("Pantry listening on {}", config.bind_addr());

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
