//! alchemist command-line tool
//!
//! Loads an ingredient table and answers queries against it.
//!
//! Usage: alchemist [--data <file>] [--config <file>] [--format table|json] <command>

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use regex::Regex;
use serde::Serialize;
use tracing_subscriber::filter::EnvFilter;

use alchemist::data::format_amount;
use alchemist::{
    AlchemyError, AlchemyResult, Catalog, EffectMagnitudeDuration, OutputFormat, PotionRow,
    SortKey, SortOrder, SortState, ToolConfig,
};

#[derive(Parser)]
#[command(version, about = "Plan potions from an ingredient table")]
struct Cli {
    /// Ingredient table (JSON). Overrides the config file and ALCHEMIST_DATA.
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Config file (TOML).
    #[arg(short, long, global = true, default_value = "alchemist.toml")]
    config: PathBuf,

    /// Output format. Overrides the config file.
    #[arg(short, long, global = true)]
    format: Option<FormatArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Table,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Table => Self::Table,
            FormatArg::Json => Self::Json,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    Asc,
    Desc,
}

impl From<OrderArg> for SortOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Asc => Self::Ascending,
            OrderArg::Desc => Self::Descending,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show table statistics and fingerprint.
    Info,
    /// Show the effects of one ingredient.
    Ingredient {
        name: String,
    },
    /// Show the effects of a potion brewed from 2 or 3 ingredients.
    Potion {
        #[arg(num_args = 2..=3, required = true)]
        ingredients: Vec<String>,
    },
    /// List ingredients that can be picked after the given ones.
    Options {
        /// Already picked ingredients, in slot order.
        #[arg(short, long)]
        after: Vec<String>,
        /// Only offer ingredients contributing this effect.
        #[arg(short, long, default_value = "")]
        effect: String,
    },
    /// List effect filter choices after the given ingredients.
    Effects {
        #[arg(short, long)]
        after: Vec<String>,
        /// Regular expression the effect name must match.
        #[arg(short = 'm', long = "match")]
        pattern: Option<String>,
    },
    /// Find ingredient combinations producing all given effects.
    Find {
        #[arg(required = true)]
        effects: Vec<String>,
        /// ingredients, mag:<effect> or dur:<effect>.
        #[arg(short, long, default_value = "ingredients")]
        sort: SortKey,
        /// Sort direction; defaults to ascending for ingredients and
        /// descending for magnitude/duration columns.
        #[arg(short, long)]
        order: Option<OrderArg>,
    },
}

/// Initialize logging to stderr; `RUST_LOG` wins over the config default.
fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> AlchemyResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| AlchemyError::internal(format!("encode output: {e}")))?;
    println!("{json}");
    Ok(())
}

fn print_effects(effects: &[EffectMagnitudeDuration], format: OutputFormat) -> AlchemyResult<()> {
    if format == OutputFormat::Json {
        return print_json(&effects);
    }
    let width = effects.iter().map(|e| e.effect.len()).max().unwrap_or(0).max("Effect".len());
    println!("{:<width$}  {:>9}  {:>8}", "Effect", "Magnitude", "Duration");
    for e in effects {
        println!(
            "{:<width$}  {:>9}  {:>8}",
            e.effect,
            format_amount(e.magnitude),
            format_amount(e.duration)
        );
    }
    Ok(())
}

fn print_names(names: &[String], format: OutputFormat) -> AlchemyResult<()> {
    // Drop the empty "nothing selected" entry meant for option lists.
    let names: Vec<&String> = names.iter().filter(|n| !n.is_empty()).collect();
    if format == OutputFormat::Json {
        return print_json(&names);
    }
    for name in names {
        println!("{name}");
    }
    Ok(())
}

fn print_rows(rows: &[PotionRow], effects: &[String], sort: &SortState, format: OutputFormat) -> AlchemyResult<()> {
    if format == OutputFormat::Json {
        return print_json(&rows);
    }

    let width = rows.iter().map(|r| r.label.len()).max().unwrap_or(0).max("Ingredients".len()) + 2;
    let mut header = format!(
        "{:<width$}",
        format!("Ingredients {}", sort.indicator(&SortKey::Ingredients).symbol())
    );
    for effect in effects {
        let mag = sort.indicator(&SortKey::Magnitude(effect.clone())).symbol();
        let dur = sort.indicator(&SortKey::Duration(effect.clone())).symbol();
        header.push_str(&format!("  {effect}: mag {mag} dur {dur}"));
    }
    println!("{header}");

    for row in rows {
        let mut line = format!("{:<width$}", row.label);
        for cell in &row.effects {
            line.push_str(&format!(
                "  {}: {} / {}",
                cell.effect,
                format_amount(cell.magnitude),
                format_amount(cell.duration)
            ));
        }
        println!("{line}");
    }
    println!("{} combination(s)", rows.len());
    Ok(())
}

fn run(cli: Cli, config: &ToolConfig) -> AlchemyResult<()> {
    let format = cli.format.map_or(config.format, OutputFormat::from);
    let catalog = Catalog::from_path(&config.data_path)?;

    match cli.command {
        Commands::Info => {
            let info = serde_json::json!({
                "data_path": config.data_path,
                "ingredients": catalog.table().len(),
                "effects": catalog.index().len(),
                "fingerprint": catalog.fingerprint(),
            });
            if format == OutputFormat::Json {
                print_json(&info)?;
            } else {
                println!("data:        {}", config.data_path.display());
                println!("ingredients: {}", catalog.table().len());
                println!("effects:     {}", catalog.index().len());
                println!("fingerprint: {}", catalog.fingerprint());
            }
        }
        Commands::Ingredient { name } => {
            if !catalog.table().contains(&name) {
                tracing::warn!(ingredient = %name, "unknown ingredient");
            }
            print_effects(&catalog.ingredient_effects(&name), format)?;
        }
        Commands::Potion { ingredients } => {
            print_effects(&catalog.brew(&ingredients)?, format)?;
        }
        Commands::Options { after, effect } => {
            print_names(&catalog.selectable_ingredients(&after, &effect), format)?;
        }
        Commands::Effects { after, pattern } => {
            let mut options = catalog.effect_filter_options(&after);
            if let Some(pattern) = pattern {
                let re = Regex::new(&pattern).map_err(|e| AlchemyError::internal(format!("invalid --match: {e}")))?;
                options.retain(|e| e.is_empty() || re.is_match(e));
            }
            print_names(&options, format)?;
        }
        Commands::Find { effects, sort, order } => {
            let order = order.map_or_else(|| sort.default_order(), SortOrder::from);
            let state = SortState::new(sort, order);
            let rows = catalog.find_potions(&effects, &state);
            print_rows(&rows, &effects, &state, format)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match ToolConfig::load(&cli.config) {
        Ok(config) => config.with_env().with_data_override(cli.data.clone()),
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config.log_filter);

    match run(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, fatal = e.is_fatal(), "command failed");
            ExitCode::FAILURE
        }
    }
}
