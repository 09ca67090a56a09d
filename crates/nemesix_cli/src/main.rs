//! Nemesix CLI
//!
//! Check page configurations, try values against the form rules and list
//! the reveal profiles.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nemesix_app::{parse_easing, PageConfig};
use nemesix_forms::RuleTable;
use nemesix_reveal::RevealTable;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

mod profiles;

#[derive(Parser)]
#[command(name = "nemesix")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Nemesix page behaviours CLI", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a page configuration file
    Check {
        /// Path to nemesix.toml
        config: PathBuf,
    },

    /// Validate a value with the form rules
    Validate {
        /// Field name (email, username, password, or any other)
        #[arg(short, long)]
        name: String,

        /// Value to check; surrounding whitespace is ignored
        #[arg(long, allow_hyphen_values = true)]
        value: String,
    },

    /// List the reveal profiles
    Profiles {
        /// Read the profiles from a configuration instead of the defaults
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Only show animated profiles using this easing
        #[arg(short, long)]
        easing: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    nemesix_app::init_logging(cli.verbose);

    match cli.command {
        Commands::Check { config } => cmd_check(&config),
        Commands::Validate { name, value } => cmd_validate(&name, &value),
        Commands::Profiles {
            config,
            easing,
            json,
        } => cmd_profiles(config.as_deref(), easing.as_deref(), json),
    }
}

fn load_config(path: &Path) -> Result<PageConfig> {
    PageConfig::load(path).with_context(|| format!("Failed to load {}", path.display()))
}

fn cmd_check(path: &Path) -> Result<()> {
    let config = load_config(path)?;
    info!("{} is valid", path.display());

    let markers: Vec<&str> = config.reveal.profiles.iter().map(|(marker, _)| marker).collect();
    println!(
        "reveal:    {} (threshold {}, margin {})",
        if config.reveal.enabled { "enabled" } else { "disabled" },
        config.reveal.threshold,
        config.reveal.root_margin
    );
    println!("markers:   {}", markers.join(", "));
    println!(
        "forms:     {}",
        if config.forms.enabled {
            config.forms.selectors.join(", ")
        } else {
            "disabled".to_string()
        }
    );
    println!("effects:   {}", config.effects.enabled.enabled_names().join(", "));
    if config.effects.enabled.particles {
        println!("particles: {}", config.particles.count);
    }

    Ok(())
}

fn cmd_validate(name: &str, value: &str) -> Result<()> {
    let rules = RuleTable::standard();
    debug!("{} rules for `{}`", rules.rules_for(name).len(), name);

    match rules.validate(value, name) {
        Ok(()) => {
            println!("valid");
            Ok(())
        }
        Err(err) => {
            println!("invalid: {}", err);
            std::process::exit(1);
        }
    }
}

fn cmd_profiles(config: Option<&Path>, easing: Option<&str>, json: bool) -> Result<()> {
    let mut table = match config {
        Some(path) => load_config(path)?.reveal.profiles,
        None => RevealTable::standard(),
    };
    if let Some(name) = easing {
        let easing = parse_easing(name)?;
        table = profiles::filter_by_easing(&table, easing);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else if table.is_empty() {
        info!("No matching profiles");
    } else {
        println!("{}", profiles::render(&table));
    }

    Ok(())
}
