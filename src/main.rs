//! Binary entrypoint for the floobot CLI.
//!
//! Commands:
//! - `start [--world <seed.json>]` - run the engine over an offline world
//! - `init` - create a starter `config.toml` and a demo world seed
//! - `status` - print a per-map summary of fireplaces and region tiles
//!
//! See the library crate docs for module-level details: `floobot::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::path::Path;

use floobot::bot::FlooServer;
use floobot::config::Config;
use floobot::gateway::{MemoryGateway, WorldSeed};

#[derive(Parser)]
#[command(name = "floobot")]
#[command(about = "Fireplace teleport network automation for shared virtual worlds")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the fireplace network engine
    Start {
        /// World seed file (overrides the configured path)
        #[arg(short, long)]
        world: Option<String>,
    },
    /// Initialize a new configuration and demo world
    Init,
    /// Show world status and statistics
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config early to configure logging (except for Init which writes it)
    let pre_config = match cli.command {
        Commands::Init => None,
        _ => Config::load(&cli.config).await.ok(),
    };
    init_logging(&pre_config, cli.verbose);

    match cli.command {
        Commands::Start { world } => {
            let config = match pre_config {
                Some(config) => config,
                None => Config::load(&cli.config).await?,
            };
            info!("Starting floobot v{}", env!("CARGO_PKG_VERSION"));

            // The platform connector is an external collaborator; this
            // binary drives the engine over an in-process world.
            let seed_path = world.unwrap_or_else(|| config.world.seed_file.clone());
            let seed = if Path::new(&seed_path).exists() {
                let seed = WorldSeed::load(&seed_path).await?;
                info!("Loaded world seed from {}", seed_path);
                seed
            } else {
                warn!(
                    "World seed {} not found; starting with the built-in demo world",
                    seed_path
                );
                WorldSeed::demo()
            };
            let gateway = MemoryGateway::from_seed(&seed);

            let (mut server, _event_tx) = FlooServer::new(config, gateway);
            info!("Engine starting...");
            server.run().await?;
        }
        Commands::Init => {
            info!("Initializing new floobot configuration");
            let config = Config::default();
            Config::create_default(&cli.config).await?;
            info!("Configuration file created at {}", cli.config);

            if let Some(parent) = Path::new(&config.world.seed_file).parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
            WorldSeed::demo().save(&config.world.seed_file).await?;
            info!("Demo world seed created at {}", config.world.seed_file);
        }
        Commands::Status => {
            let config = match pre_config {
                Some(config) => config,
                None => Config::load(&cli.config).await?,
            };
            let seed = if Path::new(&config.world.seed_file).exists() {
                WorldSeed::load(&config.world.seed_file).await?
            } else {
                WorldSeed::demo()
            };
            let gateway = MemoryGateway::from_seed(&seed);
            let (server, _event_tx) = FlooServer::new(config, gateway);
            server.show_status().await?;
        }
    }

    Ok(())
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let base_level = match verbosity {
        0 => config
            .as_ref()
            .and_then(|cfg| cfg.logging.level.parse().ok())
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);
    if let Some(file) = config.as_ref().and_then(|cfg| cfg.logging.file.clone()) {
        if let Ok(f) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file)
        {
            let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));

            // If stdout is a terminal, mirror the log file to the console.
            let is_tty = atty::is(atty::Stream::Stdout);

            builder.format(move |fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                let line = format!("{} [{}] {}", ts, record.level(), record.args());

                if let Ok(mut guard) = write_mutex.lock() {
                    let _ = writeln!(guard, "{}", line);
                }

                if is_tty {
                    writeln!(fmt, "{}", line)
                } else {
                    Ok(())
                }
            });
        } else {
            builder.format(|fmt, record| {
                writeln!(
                    fmt,
                    "{} [{}] {}",
                    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                    record.level(),
                    record.args()
                )
            });
        }
    } else {
        builder.format(|fmt, record| {
            writeln!(
                fmt,
                "{} [{}] {}",
                chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                record.level(),
                record.args()
            )
        });
    }
    let _ = builder.try_init();
}
