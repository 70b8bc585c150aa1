//! coffee CLI
//!
//! Command-line administration for the coffee catalog: store creation,
//! category management, searching, and statistics.

mod commands;
mod error;

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use coffee_catalog::CategoryKind;

pub(crate) use error::CliError;

#[derive(Parser)]
#[command(name = "coffee")]
#[command(about = "Manage the coffee catalog", long_about = None)]
struct Cli {
    /// Catalog database (defaults to the configured path)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the catalog database if it does not exist
    Init,

    /// Load category names from categories.yaml
    Seed {
        /// Directory containing categories.yaml (defaults to the configured one)
        #[arg(long)]
        catalog_dir: Option<PathBuf>,
    },

    /// List or add category names
    Categories {
        #[command(subcommand)]
        action: CategoriesAction,
    },

    /// Search cups. Zero and omitted values are unconstrained.
    Search {
        #[arg(long, default_value_t = 0)]
        id: i64,

        /// Price in rubles
        #[arg(long, default_value_t = 0)]
        price: i64,

        #[arg(long, default_value_t = 0)]
        size: i64,

        #[arg(long)]
        kind: Option<String>,

        #[arg(long)]
        roasting: Option<String>,

        #[arg(long)]
        condition: Option<String>,
    },

    /// Show row counts
    Stats,
}

#[derive(Subcommand)]
enum CategoriesAction {
    /// List category names, for one kind or all of them
    List {
        #[arg(value_parser = parse_kind)]
        kind: Option<CategoryKind>,
    },

    /// Add a category name (normalized before insertion)
    Add {
        #[arg(value_parser = parse_kind)]
        kind: CategoryKind,

        name: String,
    },
}

fn parse_kind(s: &str) -> Result<CategoryKind, String> {
    CategoryKind::from_str_loose(s)
        .ok_or_else(|| format!("unknown category kind '{}' (expected kind, roasting or condition)", s))
}

fn main() {
    init_logger();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => commands::init::run_init(cli.db),
        Commands::Seed { catalog_dir } => commands::seed::run_seed(cli.db, catalog_dir),
        Commands::Categories { action } => match action {
            CategoriesAction::List { kind } => commands::categories::run_list(cli.db, kind),
            CategoriesAction::Add { kind, name } => {
                commands::categories::run_add(cli.db, kind, &name)
            }
        },
        Commands::Search {
            id,
            price,
            size,
            kind,
            roasting,
            condition,
        } => {
            let args = commands::search::SearchArgs {
                id,
                price,
                size,
                kind,
                roasting,
                condition,
            };
            commands::search::run_search(cli.db, args)
        }
        Commands::Stats => commands::stats::run_stats(cli.db),
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Info messages print bare to stdout; everything else goes to stderr
/// with a colored level prefix.
fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            level => {
                let label = match level {
                    log::Level::Error => format!(
                        "{}",
                        "error:".if_supports_color(Stderr, |t| t.red().bold().to_string())
                    ),
                    log::Level::Warn => format!(
                        "{}",
                        "warning:".if_supports_color(Stderr, |t| t.yellow().bold().to_string())
                    ),
                    _ => format!("{}:", level.as_str().to_lowercase()),
                };
                let mut stderr = std::io::stderr();
                writeln!(stderr, "{} {}", label, record.args())
            }
        })
        .init();
}

/// Print an empty line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}
