//! Energy Dashboard CLI
//!
//! Terminal front end for the usage API:
//! - Show the usage table and chart, optionally for one region
//! - List regions
//! - Generate a default config file

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use energy_dashboard::config::{generate_default_config, Config};
use energy_dashboard::logging::{init_tracing, with_bootstrap_logging};
use energy_dashboard::render::{self, ALL_REGIONS_LABEL};
use energy_dashboard::{ChartProjector, DashboardController, HttpGateway, UsageGateway};

#[derive(Parser)]
#[command(name = "energy-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Regional energy usage dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Usage API base URL (overrides config and environment)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the usage table and chart
    Show {
        /// Only this region (default: all regions)
        #[arg(short, long)]
        region: Option<String>,

        /// Width of the longest chart bar
        #[arg(long, default_value = "40")]
        bar_width: usize,
    },

    /// List the regions offered by the filter
    Regions,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let Cli {
        command,
        api_url,
        config,
        format,
    } = Cli::parse();

    match command {
        Commands::Config { output } => write_config(output)?,

        Commands::Show { region, bar_width } => {
            let (projector, controller) = connect(api_url, config)?;
            controller.initialize().await;
            if region.is_some() {
                controller.select_region(region).await;
            }
            let view = controller.view(&projector);

            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&view)?);
                }
                OutputFormat::Csv => {
                    render::write_csv(&view.rows, std::io::stdout().lock())?;
                }
                OutputFormat::Table => {
                    println!("Energy Usage Dashboard");
                    println!();
                    println!(
                        "{}",
                        render::render_filter(&view.regions, view.selected_region.as_deref())
                    );
                    println!();
                    print!("{}", render::render_table(&view.rows));
                    println!();
                    print!("{}", render::render_chart(&view.chart, bar_width));
                }
            }
        }

        Commands::Regions => {
            let (_, controller) = connect(api_url, config)?;
            let regions = match controller.gateway().fetch_regions().await {
                Ok(regions) => regions,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to fetch regions");
                    Vec::new()
                }
            };

            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&regions)?);
                }
                OutputFormat::Csv => {
                    let mut writer = csv::Writer::from_writer(std::io::stdout().lock());
                    writer.write_record(["region"])?;
                    for region in &regions {
                        writer.write_record([region])?;
                    }
                    writer.flush()?;
                }
                OutputFormat::Table => {
                    for option in render::filter_options(&regions) {
                        if option.label == ALL_REGIONS_LABEL && option.value.is_empty() {
                            println!("{} (default)", option.label);
                        } else {
                            println!("{}", option.label);
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

fn write_config(output: Option<PathBuf>) -> anyhow::Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, &content)
                .with_context(|| format!("writing config to {:?}", path))?;
            println!("Config written to {:?}", path);
        }
        None => print!("{}", content),
    }
    Ok(())
}

/// Load config, start logging and build the controller
fn connect(
    api_url: Option<String>,
    path: Option<PathBuf>,
) -> anyhow::Result<(ChartProjector, DashboardController<HttpGateway>)> {
    let mut config = match path {
        Some(path) => Config::load_with_env(&path)?,
        None => with_bootstrap_logging(Config::load_default),
    };
    if let Some(url) = api_url {
        config.api.base_url = url;
    }

    init_tracing(&config.logging);

    let projector = config.chart_projector()?;
    let gateway = HttpGateway::new(config.gateway_config())?;
    tracing::debug!(
        base_url = %gateway.config().base_url,
        timeout = ?gateway.config().request_timeout,
        "using usage API"
    );
    Ok((projector, DashboardController::new(gateway)))
}
