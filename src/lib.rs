//! Searchable, filterable catalog of discovered open-source repositories.
//!
//! The library side is the filter/render pipeline in [`view`], fed by the
//! immutable [`model::Dataset`]. [`site`] turns a dataset into a static site and
//! [`report`] into a Markdown summary. The `catalog` binary wires these to a
//! CLI through [`parse_cli`] and [`run_with_parsed`].

pub mod config;
pub mod error;
pub mod model;
pub mod report;
pub mod site;
pub mod view;

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use serde_json::json;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use config::CatalogConfig;
use error::{CatalogError, CliError};
use model::Dataset;
use site::{CatalogStats, SiteGenerator, SiteOptions};
use view::{QualityTier, TierToggles, ViewController, ViewState};

/// Render and query a catalog of discovered repositories
#[derive(Parser, Debug)]
#[command(name = "catalog", version, about, long_about = None)]
#[command(after_help = "Examples:
  catalog generate --data discoveries.json --output-dir site
  catalog query kong                    Cards whose name, owner, language or patterns contain \"kong\"
  catalog query --no-low --json         High and medium tiers as JSON
  catalog stats
  catalog report --output DISCOVERIES.md
")]
pub struct Cli {
    /// Config file (defaults to $XDG_CONFIG_HOME/discovery-catalog/config.toml)
    #[arg(long, global = true, env = "CATALOG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Dataset file: discoveries.json, a JSON array, or discoveries-data.js
    #[arg(long, global = true, env = "CATALOG_DATA")]
    pub data: Option<PathBuf>,

    /// Clamp out-of-range scores instead of rejecting the dataset
    #[arg(long, global = true)]
    pub clamp_scores: bool,

    /// Machine-readable JSON output
    #[arg(long, global = true, alias = "robot")]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate the static site
    Generate {
        /// Output directory
        #[arg(long, env = "CATALOG_OUTPUT_DIR")]
        output_dir: Option<PathBuf>,

        /// Site title
        #[arg(long)]
        title: Option<String>,
    },

    /// List the cards visible under a search query and tier filters
    Query {
        /// Search text (case-insensitive substring)
        query: Option<String>,

        #[command(flatten)]
        tiers: TierArgs,
    },

    /// Print the rendered card container for a search query and tier filters
    Render {
        query: Option<String>,

        #[command(flatten)]
        tiers: TierArgs,
    },

    /// Catalog statistics
    Stats,

    /// Write the Markdown report
    Report {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone, Copy, Default)]
pub struct TierArgs {
    /// Hide high-quality cards (score >= 7)
    #[arg(long)]
    pub no_high: bool,

    /// Hide medium cards (score 5-6)
    #[arg(long)]
    pub no_medium: bool,

    /// Hide lower-quality cards (score < 5)
    #[arg(long)]
    pub no_low: bool,
}

impl TierArgs {
    /// Flags can only switch tiers off relative to the configured defaults.
    pub fn apply(self, base: TierToggles) -> TierToggles {
        TierToggles {
            show_high: base.show_high && !self.no_high,
            show_medium: base.show_medium && !self.no_medium,
            show_low: base.show_low && !self.no_low,
        }
    }
}

pub struct ParsedCli {
    pub cli: Cli,
}

/// Parse arguments. Help and version requests come back as a `CliError`
/// with code 0 whose message is the text to print.
pub fn parse_cli<I, T>(args: I) -> Result<ParsedCli, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(ParsedCli { cli }),
        Err(err) => {
            use clap::error::ErrorKind;
            match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Err(CliError {
                    code: 0,
                    kind: "help",
                    message: err.to_string(),
                    hint: None,
                    retryable: false,
                }),
                _ => Err(CliError::usage(err.to_string())),
            }
        }
    }
}

pub fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Config file merged with command-line overrides.
fn resolve_config(cli: &Cli) -> Result<CatalogConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => CatalogConfig::load_from(path)?,
        None => CatalogConfig::load()?,
    };
    if let Some(data) = &cli.data {
        config.data_path = data.clone();
    }
    if cli.clamp_scores {
        config.score_policy = model::ScorePolicy::Clamp;
    }
    debug!(
        component = "cli",
        operation = "resolve_config",
        data_path = %config.data_path.display(),
        score_policy = %config.score_policy,
        "Resolved configuration"
    );
    Ok(config)
}

fn print_json(value: &serde_json::Value) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(value).map_err(CatalogError::from)?;
    println!("{text}");
    Ok(())
}

fn tier_label(tier: QualityTier) -> colored::ColoredString {
    match tier {
        QualityTier::High => tier.slug().green().bold(),
        QualityTier::Medium => tier.slug().yellow(),
        QualityTier::Low => tier.slug().dimmed(),
    }
}

pub fn run_with_parsed(parsed: ParsedCli) -> Result<(), CliError> {
    let cli = parsed.cli;
    init_tracing(cli.verbose);
    let config = resolve_config(&cli)?;
    let dataset = Dataset::load(&config.data_path, config.score_policy)?;

    match cli.command.clone() {
        Commands::Generate { output_dir, title } => {
            let output_dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
            let options = SiteOptions {
                title: title.unwrap_or_else(|| config.site_title.clone()),
                filters: config.filters,
                ..Default::default()
            };
            let site = SiteGenerator::new(options).generate(&dataset, &output_dir)?;
            if cli.json {
                print_json(&json!({ "success": true, "generated": site }))?;
            } else {
                println!(
                    "{} Static site generated in {}/",
                    "✓".green(),
                    site.output_dir.display()
                );
                println!(
                    "  {} discoveries ({} high, {} medium, {} low), {} languages",
                    site.stats.total,
                    site.stats.high_quality,
                    site.stats.medium_quality,
                    site.stats.low_quality,
                    site.stats.language_count
                );
                for file in &site.files {
                    println!("  - {} ({} bytes)", file.path.display(), file.size_bytes);
                }
            }
        }

        Commands::Query { query, tiers } => {
            let state = ViewState::new(query.as_deref().unwrap_or(""), tiers.apply(config.filters));
            let controller = ViewController::with_state(&dataset, state);
            info!(
                component = "cli",
                operation = "query",
                visible_count = controller.visible_count(),
                "Query complete"
            );
            if cli.json {
                let cards: Vec<_> = controller
                    .visible_cards()
                    .map(|card| {
                        json!({
                            "id": card.id,
                            "score": card.score,
                            "tier": card.tier.slug(),
                        })
                    })
                    .collect();
                print_json(&json!({
                    "query": controller.state().query(),
                    "filters": controller.state().tiers,
                    "total": dataset.len(),
                    "visible_count": controller.visible_count(),
                    "cards": cards,
                }))?;
            } else {
                let records = dataset.records();
                for (index, card) in controller.cards().iter().enumerate() {
                    if !controller.is_visible(index) {
                        continue;
                    }
                    let repo = &records[index].repository;
                    println!(
                        "{:>6}  {:>2}/10  {}  ⭐ {}  {}",
                        tier_label(card.tier),
                        card.score,
                        card.id.bold(),
                        view::escape::format_thousands(repo.stars),
                        repo.language.as_deref().unwrap_or(view::card::UNKNOWN_LANGUAGE)
                    );
                }
                println!(
                    "Showing {} of {} discoveries",
                    controller.visible_count(),
                    dataset.len()
                );
            }
        }

        Commands::Render { query, tiers } => {
            let state = ViewState::new(query.as_deref().unwrap_or(""), tiers.apply(config.filters));
            let controller = ViewController::with_state(&dataset, state);
            if cli.json {
                print_json(&json!({
                    "visible_count": controller.visible_count(),
                    "html": controller.render(),
                }))?;
            } else {
                println!("{}", controller.render());
            }
        }

        Commands::Stats => {
            let stats = CatalogStats::from_dataset(&dataset);
            if cli.json {
                print_json(&json!({
                    "stats": stats,
                    "pattern_groups": site::patterns::group_sizes(&stats),
                }))?;
            } else {
                println!("Found {} discoveries:", stats.total);
                println!("  - High quality: {}", stats.high_quality);
                println!("  - Medium quality: {}", stats.medium_quality);
                println!("  - Low quality: {}", stats.low_quality);
                println!("  - Languages: {}", stats.language_count);
                if !stats.patterns.is_empty() {
                    println!("Top patterns:");
                    for p in stats.patterns.iter().take(10) {
                        println!("  {:>4}  {}", p.count, p.pattern);
                    }
                }
            }
        }

        Commands::Report { output } => {
            let markdown = report::render_markdown_report(&dataset, chrono::Utc::now());
            match output {
                Some(path) => {
                    std::fs::write(&path, &markdown).map_err(|source| CatalogError::Write {
                        path: path.clone(),
                        source,
                    })?;
                    if cli.json {
                        print_json(&json!({
                            "success": true,
                            "output_path": path,
                            "size_bytes": markdown.len(),
                        }))?;
                    } else {
                        println!("{} Markdown report: {}", "✓".green(), path.display());
                    }
                }
                None => {
                    let mut stdout = std::io::stdout().lock();
                    stdout
                        .write_all(markdown.as_bytes())
                        .map_err(|source| CatalogError::Write {
                            path: PathBuf::from("<stdout>"),
                            source,
                        })?;
                }
            }
        }
    }

    Ok(())
}
