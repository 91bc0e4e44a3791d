use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use ders_config::Config;
use ders_config::logging::LoggingConfig;
use ders_lang_english::EnglishCatalogueLoader;
use ders_types::{Level, ModuleId};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod render;

#[cfg(test)]
mod tests;

#[derive(Parser)]
#[command(name = "ders")]
#[command(version, about = "Inspect, check and export the English lesson catalogue", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Extra catalogue file or directory, merged over the embedded catalogue
    #[arg(long = "content", global = true)]
    content: Vec<String>,

    /// Log as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List modules
    List {
        #[arg(long)]
        level: Option<Level>,
    },

    /// Show one module
    Show {
        /// Module number ("12", "Module 12" or "MODULE_12_DATA")
        id: ModuleId,

        /// Print the catalogue document instead of text
        #[arg(long)]
        json: bool,
    },

    /// Levels with their module ranges and loaded counts
    Levels,

    /// Next module in the same level
    Next { id: ModuleId },

    /// Run structural integrity checks
    Check,

    /// Run the content quality audit
    Audit {
        #[arg(long)]
        level: Option<Level>,

        /// Print every issue
        #[arg(short, long)]
        verbose: bool,
    },

    /// Write one catalogue document per module
    Export {
        dir: PathBuf,

        #[arg(long)]
        level: Option<Level>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::new(),
    };
    if cli.json_logs {
        config.logging.json = true;
    }
    config.content.additional_paths.extend(cli.content);

    init_logging(&config.logging);
    tracing::debug!("Config: {:?}", config);

    let store =
        EnglishCatalogueLoader::load(config.content.embedded, &config.content.additional_paths);
    let mut out = io::stdout().lock();

    let ok = match cli.command {
        Commands::List { level } => commands::list(&store, level, &mut out)?,
        Commands::Show { id, json } => commands::show(&store, id, json, &mut out)?,
        Commands::Levels => commands::levels(&store, &mut out)?,
        Commands::Next { id } => commands::next(&store, id, &mut out)?,
        Commands::Check => commands::check(&store, &mut out)?,
        Commands::Audit { level, verbose } => {
            commands::audit(&store, &config.audit, level, verbose, &mut out)?
        }
        Commands::Export { dir, level } => commands::export(&store, &dir, level, &mut out)?,
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Install the tracing subscriber; logs go to stderr so stdout stays clean
fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_new(&logging.filter).unwrap_or_else(|e| {
        eprintln!("Invalid log filter {:?}: {e}", logging.filter);
        EnvFilter::new("info")
    });

    let registry = tracing_subscriber::registry().with(filter);
    if logging.json {
        registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(io::stderr)).init();
    }
}
