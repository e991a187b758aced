//! retro-pricer - Point-of-sale price checker for used video games

use anyhow::Result;
use clap::{Parser, Subcommand};
use retro_pricer::commands::{
    BuylistCommand, DealCommand, PricesArgs, PricesCommand, SearchCommand,
};
use retro_pricer::config::{Config, OutputFormat};
use retro_pricer::pricecharting::Platform;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "retro-pricer",
    version,
    about = "Point-of-sale price checker for used video games",
    long_about = "Looks up market prices, retail prices, and buy-list offers for used \
                  video games, and rates a considered cost against them."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "PRICER_PROXY")]
    proxy: Option<String>,

    /// Delay before market requests in milliseconds
    #[arg(long, global = true, env = "PRICER_DELAY")]
    delay: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the market catalog for games
    #[command(alias = "s")]
    Search {
        /// Search query
        query: String,

        /// Restrict results to one platform (e.g. n64, snes, ps2)
        #[arg(short, long)]
        platform: Option<Platform>,
    },

    /// Full price lookup for one catalog item
    #[command(alias = "p")]
    Prices {
        /// PriceCharting platform identifier (e.g. nintendo-64)
        platform_id: String,

        /// PriceCharting item slug (e.g. super-mario-64)
        slug: String,

        /// Display name for retailer queries (defaults to the page title)
        #[arg(short, long)]
        name: Option<String>,

        /// JSON file with an image-identifier result; its game name is used
        #[arg(long, conflicts_with = "name")]
        identified: Option<PathBuf>,

        /// Cost in dollars being considered; adds a deal sheet
        #[arg(long)]
        cost: Option<f64>,

        /// Bypass cached lookups
        #[arg(long)]
        refresh: bool,
    },

    /// Rate a cost against explicitly supplied market prices
    Deal {
        /// Cost in dollars being considered
        #[arg(long)]
        cost: f64,

        /// Loose market price in dollars
        #[arg(long)]
        loose: Option<f64>,

        /// Complete-in-box market price in dollars
        #[arg(long)]
        cib: Option<f64>,

        /// New/sealed market price in dollars
        #[arg(long)]
        new: Option<f64>,
    },

    /// Inspect the retailer buy-list
    Buylist {
        #[command(subcommand)]
        action: BuylistAction,
    },

    /// List supported platforms
    Platforms,
}

#[derive(Subcommand)]
enum BuylistAction {
    /// Show the current buy-list
    Show {
        /// Maximum entries to print
        #[arg(short, long, default_value = "50")]
        limit: usize,
    },

    /// Match a game name against the buy-list
    Match {
        /// Free-form game name
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    config.format = cli.format;
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(delay) = cli.delay {
        config.delay_ms = delay;
    }

    match cli.command {
        Commands::Search { query, platform } => {
            let cmd = SearchCommand::new(config);
            let output = cmd.execute(&query, platform).await?;
            println!("{}", output);
        }

        Commands::Prices { platform_id, slug, name, identified, cost, refresh } => {
            let args = PricesArgs { platform_id, slug, name, identified, cost, refresh };
            let cmd = PricesCommand::new(config);
            let output = cmd.execute(&args).await?;
            println!("{}", output);
        }

        Commands::Deal { cost, loose, cib, new } => {
            let cmd = DealCommand::new(config);
            let output = cmd.execute(cost, loose, cib, new)?;
            println!("{}", output);
        }

        Commands::Buylist { action } => {
            let cmd = BuylistCommand::new(config);
            let output = match action {
                BuylistAction::Show { limit } => cmd.show(limit).await?,
                BuylistAction::Match { name } => cmd.match_name(&name).await?,
            };
            println!("{}", output);
        }

        Commands::Platforms => {
            println!("Supported platforms:\n");
            println!("{:<12} {:<18} {:<20}", "Key", "Name", "Market Id");
            println!("{:-<12} {:-<18} {:-<20}", "", "", "");

            for platform in Platform::all() {
                println!(
                    "{:<12} {:<18} {:<20}",
                    platform.key(),
                    platform.display_name(),
                    platform.market_id()
                );
            }
        }
    }

    Ok(())
}
