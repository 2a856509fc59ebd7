use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, Utc};
use clap::{ArgAction, Parser, ValueHint};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use food_dashboard::palette;
use food_dashboard::{Dashboard, DashboardError, DatasetConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Food inventory dashboard figures as JSON", long_about = None)]
struct Cli {
    /// Directory holding the inventory and ticker CSV files
    #[arg(long, default_value = "./data", value_hint = ValueHint::DirPath)]
    data_dir: PathBuf,

    /// Inventory CSV file name inside the data directory
    #[arg(long, default_value = "inventory_dataframe.csv")]
    inventory_file: String,

    /// Price ticker CSV file name inside the data directory
    #[arg(long, default_value = "ticker.csv")]
    ticker_file: String,

    /// strftime format of the timestamp columns
    #[arg(long, default_value = "%Y-%m-%d %H:%M:%S")]
    timestamp_format: String,

    /// Selected food item (empty string for no selection)
    #[arg(long)]
    item: Option<String>,

    /// Reference time as RFC 3339 (defaults to the current UTC time)
    #[arg(long)]
    now: Option<DateTime<Utc>>,

    /// Print the dropdown options and exit
    #[arg(long, action = ArgAction::SetTrue)]
    list_items: bool,

    /// Pretty-print the JSON output
    #[arg(long, action = ArgAction::SetTrue)]
    pretty: bool,

    /// Enable debug logging
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if cli.list_items {
        for (label, value) in palette::food_item_options() {
            println!("{label}\t{value}");
        }
        return ExitCode::SUCCESS;
    }

    let config = DatasetConfig {
        data_dir: cli.data_dir.clone(),
        inventory_file: cli.inventory_file.clone(),
        ticker_file: cli.ticker_file.clone(),
        timestamp_format: cli.timestamp_format.clone(),
    };

    let dashboard = match Dashboard::load(&config) {
        Ok(dashboard) => dashboard,
        Err(e) => {
            error!("{e}");
            eprintln!("Loading dataframe failed. Specify the correct folder.");
            return ExitCode::FAILURE;
        }
    };

    match run(&dashboard, &cli) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(dashboard: &Dashboard, cli: &Cli) -> Result<String, DashboardError> {
    let item = cli.item.as_deref().unwrap_or(palette::default_item());
    let now = cli.now.unwrap_or_else(Utc::now);
    info!(item, %now, "rendering dashboard");

    let view = dashboard.render(Some(item), now)?;
    let json = if cli.pretty {
        serde_json::to_string_pretty(&view)?
    } else {
        serde_json::to_string(&view)?
    };
    Ok(json)
}
