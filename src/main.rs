use bioactivity_collector::{
    cli::{collect_all, collect_chembl, collect_drug_central, collect_pharos, collect_uniprot},
    config::{load_chembl_params, load_pharos_params, load_uniprot_client},
    storage::DatasetsManifest,
};
use clap::{Parser, Subcommand, builder::styling};
use eyre::{Context, Result};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};

// CLI Styling
const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::BrightWhite.on_default())
    .usage(styling::AnsiColor::BrightWhite.on_default())
    .literal(styling::AnsiColor::Green.on_default())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// Bioactivity Collector: gathers drug/target bioactivity data from Pharos,
/// ChEMBL, DrugCentral and UniProt into CSV files
#[derive(Parser)]
#[command(name = "biocollect", version, styles = STYLES)]
struct Cli {
    /// The dotenv file to source credentials from
    #[arg(short, long, global = true, default_value = ".env")]
    env: String,

    /// More verbose logging
    #[arg(long, global = true)]
    debug: bool,

    /// Dataset manifest describing what each flow fetches
    #[arg(short, long, global = true, default_value = "datasets.yml")]
    manifest: PathBuf,

    /// Directory the CSV files are written to
    #[arg(short, long, global = true, default_value = ".")]
    output_dir: PathBuf,

    /// Command to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dump and join the Pharos (TCRD) tables into pharos.csv
    Pharos,

    /// Query ChEMBL for drug/target pairs into chembl.csv
    Chembl,

    /// Extract columns of the DrugCentral export into drug_central.csv
    DrugCentral {
        /// Export file to read, overriding the manifest
        path: Option<PathBuf>,
    },

    /// Look up species and subcellular location of accessions into uniprot.csv
    Uniprot {
        /// Accessions to annotate, overriding the manifest
        accessions: Vec<String>,
    },

    /// Run every flow in order: pharos, chembl, drug-central, uniprot
    All,
}

/// Source the dotenv file if there is one; returns whether it was loaded
fn load_dotenv(path: &str) -> Result<bool> {
    if !Path::new(path).exists() {
        return Ok(false);
    }
    dotenvy::from_filename(path).with_context(|| format!("Failed to load {}", path))?;
    Ok(true)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let dotenv_loaded = load_dotenv(&cli.env)?;

    let log_level = match cli.debug {
        true => "debug",
        false => "info",
    };
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", log_level);
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    match dotenv_loaded {
        true => log::debug!("Loaded environment from {}", cli.env),
        false => log::debug!("No dotenv file at {}, using process environment", cli.env),
    }

    let mut manifest = DatasetsManifest::read_or_default(&cli.manifest)?;
    let output_dir = cli.output_dir;

    log::info!(
        "Bioactivity Collector, writing to {}",
        output_dir.display().bright_black()
    );

    match cli.command {
        Commands::Pharos => {
            collect_pharos(load_pharos_params()?, &manifest.pharos, &output_dir).await?;
        }
        Commands::Chembl => {
            collect_chembl(load_chembl_params()?, &manifest.chembl, &output_dir).await?;
        }
        Commands::DrugCentral { path } => {
            if let Some(path) = path {
                manifest.drug_central.path = path;
            }
            collect_drug_central(&manifest.drug_central, &output_dir).await?;
        }
        Commands::Uniprot { accessions } => {
            if !accessions.is_empty() {
                manifest.uniprot.accessions = accessions;
            }
            if manifest.uniprot.accessions.is_empty() {
                log::warn!(
                    "No accessions given on the command line or in {}",
                    cli.manifest.display().bright_black()
                );
            }
            collect_uniprot(
                load_uniprot_client()?,
                &manifest.uniprot.accessions,
                &output_dir,
            )
            .await?;
        }
        Commands::All => {
            collect_all(&manifest, &output_dir).await?;
        }
    }

    Ok(())
}
