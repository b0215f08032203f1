use std::error::Error;
use std::path::PathBuf;

use clap::Parser;

use sprint_grid::cache::Cache;
use sprint_grid::client::Client;
use sprint_grid::config;
use sprint_grid::feed::SprintWindow;
use sprint_grid::palette::TaskPalette;
use sprint_grid::render::{self, GridView};
use sprint_grid::workload::WorkloadSummary;
use sprint_grid::{GridBuilder, Provider};

#[derive(Parser)]
#[command(name = "sprint-grid")]
#[command(version, about = "Displays who works on what during a sprint")]
struct Cli {
    /// First day of the sprint (yyyy-mm-dd)
    #[arg(long)]
    start: String,

    /// Last day of the sprint (yyyy-mm-dd)
    #[arg(long)]
    end: String,

    /// Base URL of the planning service. Overrides SPRINT_GRID_URL
    #[arg(long)]
    url: Option<String>,

    /// Folder of the local cache
    #[arg(long)]
    cache_folder: Option<PathBuf>,

    /// Do not contact the planning service, only use the local cache
    #[arg(long)]
    offline: bool,

    /// Also write the grid as an HTML table to this file
    #[arg(long)]
    html: Option<PathBuf>,

    /// Print the grid as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Task colors, as a comma-separated list of CSS colors
    #[arg(long, value_delimiter = ',')]
    palette: Vec<String>,

    /// Do not print the workload of every developer
    #[arg(long)]
    no_workload: bool,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    env_logger::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        log::error!("{}", err);
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    config::load_from_env();
    if let Some(url) = &cli.url {
        config::set_service_url(url);
    }
    if let Some(folder) = &cli.cache_folder {
        config::set_cache_folder(folder.display());
    }

    let window = SprintWindow::parse(&cli.start, &cli.end)?;

    let cache_path = Cache::cache_folder();
    let cache = match Cache::from_folder(&cache_path) {
        Ok(cache) => cache,
        Err(err) => {
            log::warn!("Invalid cache folder: {}. Using a default cache", err);
            Cache::new(&cache_path)
        }
    };
    let builder = if cli.palette.is_empty() {
        GridBuilder::new()
    } else {
        GridBuilder::with_palette(TaskPalette::from_css(cli.palette.as_slice())?)
    };
    let mut provider = Provider::with_builder(Client::from_config()?, cache, builder);

    if cli.offline == false && provider.refresh(&window).await == false {
        log::warn!("Refresh did not complete, see the previous log lines for more info. Using the last cached data, if any.");
    }

    let grid = match provider.grid(&window) {
        None => return Err(format!("No data available for {}", window).into()),
        Some(grid) => grid,
    };
    let view = GridView::from_grid(&grid);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        render::text::print_grid(&view);
    }

    if let Some(path) = &cli.html {
        std::fs::write(path, render::html::render(&view))?;
        log::info!("Grid written to {:?}", path);
    }

    if cli.no_workload == false {
        if let Some(workload) = provider.workload(&window) {
            println!();
            for summary in &workload {
                println!("{}", format_workload(summary));
            }
        }
    }

    Ok(())
}

fn format_workload(summary: &WorkloadSummary) -> String {
    let usage = match (summary.capacity, summary.utilization) {
        (Some(capacity), Some(utilization)) => format!(", {:.0}% of {} pts", utilization * 100.0, capacity),
        _ => String::new(),
    };
    format!("{}: {} pts over {}/{} days{} [{:?}]",
        summary.developer, summary.scheduled_points, summary.available_days, summary.working_days, usage, summary.load)
}
