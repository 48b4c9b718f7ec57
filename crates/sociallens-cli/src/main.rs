use clap::{Parser, Subcommand};
use sociallens_core::BrandQuery;
use sociallens_pipeline::{build_pipeline, PipelineOptions};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sociallens-cli")]
#[command(about = "Social listening command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a brand search and print the result as JSON
    Search {
        /// Brand name to search for
        brand: String,

        /// Skip writing the report to the spreadsheet
        #[arg(long)]
        no_report: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = sociallens_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    // stdout carries the JSON result
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Search { brand, no_report }) => {
            let query = BrandQuery::parse(&brand)?;
            let pipeline = build_pipeline(&config, PipelineOptions { report: !no_report })?;
            let report = pipeline.run(&query).await?;
            if !no_report {
                if let Some(reason) = report.persistence.reason() {
                    tracing::warn!(brand = query.name(), reason, "report was not saved");
                }
            }
            println!("{}", serde_json::to_string_pretty(&report.result)?);
        }
        None => println!("sociallens-cli: use `search <brand>` to run a brand search"),
    }

    Ok(())
}
