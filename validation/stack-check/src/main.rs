//! Stack check CLI for the band stack assembler.

use anyhow::Result;
use band_stack::PipelineConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use stack_check::{override_pipeline, CheckReport, CheckResults, Scenario, StackCheck};

#[derive(Parser)]
#[command(name = "stack-check")]
#[command(about = "Determinism and coverage check for ASTER band stack assembly", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a check from a scenario file
    Run {
        /// Path to scenario YAML file
        #[arg(short, long)]
        scenario: PathBuf,

        /// Override the thread counts (comma separated)
        #[arg(short, long, value_delimiter = ',')]
        threads: Option<Vec<usize>>,

        /// Output format: table (default), json, csv
        #[arg(short, long, default_value = "table")]
        output: String,
    },

    /// Run a quick check with the default scenario
    ///
    /// The pipeline starts from the STACK_* environment variables; flags
    /// given here override them.
    Quick {
        /// Resampling method: nearest, bilinear, cubic, average, mode
        #[arg(short, long)]
        method: Option<String>,

        /// Output quantity: reflectance, radiance
        #[arg(short, long)]
        quantity: Option<String>,

        /// VNIR band size in pixels
        #[arg(long, default_value = "120")]
        size: usize,

        /// Target CRS, or "auto" for the scene's UTM zone
        #[arg(long, default_value = "auto")]
        crs: String,
    },

    /// Print the default scenario as YAML
    Defaults,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Run {
            scenario,
            threads,
            output,
        } => {
            info!(path = %scenario.display(), "Loading scenario");

            let mut config = Scenario::from_file(&scenario)?;
            if let Some(threads) = threads {
                config.thread_counts = threads;
            }
            config.validate()?;

            let results = StackCheck::new(config).run()?;
            print_results(&results, &output)?;
            ensure_deterministic(&results)
        }
        Commands::Quick {
            method,
            quantity,
            size,
            crs,
        } => {
            let base = PipelineConfig::from_env().map_err(anyhow::Error::msg)?;
            let pipeline = override_pipeline(base, method.as_deref(), quantity.as_deref())?;

            let config = Scenario {
                name: "quick".to_string(),
                description: "Quick check".to_string(),
                vnir_size: size,
                target_crs: crs,
                pipeline,
                ..Default::default()
            };
            info!(
                method = %config.pipeline.method,
                quantity = %config.pipeline.quantity,
                "Quick check"
            );

            let results = StackCheck::new(config).run()?;
            print_results(&results, "table")?;
            ensure_deterministic(&results)
        }
        Commands::Defaults => {
            print!("{}", serde_yaml::to_string(&Scenario::default())?);
            Ok(())
        }
    }
}

fn print_results(results: &CheckResults, output: &str) -> Result<()> {
    match output {
        "json" => {
            println!("{}", CheckReport::format_json(results)?);
        }
        "csv" => {
            println!("{}", CheckReport::csv_header());
            println!("{}", CheckReport::format_csv(results));
        }
        _ => {
            println!("{}", CheckReport::format_table(results));
        }
    }
    Ok(())
}

fn ensure_deterministic(results: &CheckResults) -> Result<()> {
    if !results.deterministic() {
        anyhow::bail!(
            "scenario {} produced different stacks across thread counts",
            results.scenario
        );
    }
    Ok(())
}
