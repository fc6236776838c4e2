use clap::{Parser, Subcommand};
use haifa_bites::config::AppConfig;
use haifa_bites::pipeline;
use haifa_bites::stats::Correlation;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export neighborhood centroids as lon/lat
    Centroids {
        #[arg(short, long, value_name = "FILE", default_value = "haifa.toml")]
        config: PathBuf,
    },
    /// Classify businesses, aggregate per neighborhood and print the correlation
    Analyze {
        #[arg(short, long, value_name = "FILE", default_value = "haifa.toml")]
        config: PathBuf,
    },
    /// Join node rows onto neighborhood centroids for the BI dataset
    Merge {
        #[arg(short, long, value_name = "FILE", default_value = "haifa.toml")]
        config: PathBuf,
    },
    /// Run centroids, analyze and merge in order
    Run {
        #[arg(short, long, value_name = "FILE", default_value = "haifa.toml")]
        config: PathBuf,
    },
}

fn print_correlation(correlation: &Correlation) {
    println!("Pearson: {}", correlation.r);
    println!("P-value: {}", correlation.p);
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Centroids { config } => {
            let app_config = AppConfig::load_or_default(config)?;
            pipeline::run_centroids(&app_config)?;
        }
        Commands::Analyze { config } => {
            let app_config = AppConfig::load_or_default(config)?;
            let analysis = pipeline::run_analysis(&app_config)?;
            print_correlation(&analysis.correlation);
        }
        Commands::Merge { config } => {
            let app_config = AppConfig::load_or_default(config)?;
            pipeline::run_merge(&app_config)?;
        }
        Commands::Run { config } => {
            let app_config = AppConfig::load_or_default(config)?;

            pipeline::run_centroids(&app_config)?;
            let analysis = pipeline::run_analysis(&app_config)?;
            print_correlation(&analysis.correlation);

            if app_config.output.write_node_dataset {
                pipeline::run_merge(&app_config)?;
            } else {
                info!("Node dataset disabled, skipping merge");
            }
        }
    }

    Ok(())
}
