//! CLI helper functions
//!
//! One function per collection flow. Each builds a pipeline ending in a CSV
//! file inside the output directory and returns the number of rows written.

use crate::{
    client::{DatabaseParams, UniprotClient},
    config::{load_chembl_params, load_pharos_params, load_uniprot_client},
    etl::{IdentityTransformer, Pipeline},
    sources::{
        chembl::ChemblExtractor, drug_central::DrugCentralExtractor, pharos::PharosExtractor,
        uniprot::ProteinAnnotationExtractor,
    },
    storage::{
        ChemblSection, CsvWriter, DatasetsManifest, DrugCentralSection, PharosSection,
    },
};
use eyre::{Context, Result};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};

pub const PHAROS_OUTPUT: &str = "pharos.csv";
pub const CHEMBL_OUTPUT: &str = "chembl.csv";
pub const DRUG_CENTRAL_OUTPUT: &str = "drug_central.csv";
pub const UNIPROT_OUTPUT: &str = "uniprot.csv";

/// Resolve an output file, creating the output directory when missing
fn output_path(output_dir: &Path, file_name: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            output_dir.display()
        )
    })?;
    Ok(output_dir.join(file_name))
}

/// Dump the Pharos tables, join them and write `pharos.csv`
///
/// Pipeline: PharosExtractor → IdentityTransformer → CsvWriter (indexed)
pub async fn collect_pharos(
    params: DatabaseParams,
    section: &PharosSection,
    output_dir: impl AsRef<Path>,
) -> Result<usize> {
    let path = output_path(output_dir.as_ref(), PHAROS_OUTPUT)?;

    log::info!(
        "Collecting Pharos tables {} from {}",
        section.tables.join(", ").cyan(),
        params.bright_black()
    );
    let extractor = PharosExtractor::new(params, section.tables.clone(), &section.merge_on);
    let writer = CsvWriter::new(&path).with_index(true);

    let count = Pipeline::new(extractor, IdentityTransformer, writer)
        .run()
        .await
        .with_context(|| "Pharos collection failed")?;

    log::info!("✓ Wrote {} row(s) to {}", count, path.display());
    Ok(count)
}

/// Run the ChEMBL query and write `chembl.csv`
///
/// Pipeline: ChemblExtractor (rename → drop nulls → dedupe) → CsvWriter
pub async fn collect_chembl(
    params: DatabaseParams,
    section: &ChemblSection,
    output_dir: impl AsRef<Path>,
) -> Result<usize> {
    let path = output_path(output_dir.as_ref(), CHEMBL_OUTPUT)?;

    log::info!("Querying ChEMBL at {}", params.bright_black());
    let extractor = ChemblExtractor::new(params, &section.query);
    let writer = CsvWriter::new(&path);

    let count = Pipeline::new(extractor, IdentityTransformer, writer)
        .run()
        .await
        .with_context(|| "ChEMBL collection failed")?;

    log::info!("✓ Wrote {} row(s) to {}", count, path.display());
    Ok(count)
}

/// Read the DrugCentral export and write `drug_central.csv`
///
/// Pipeline: DrugCentralExtractor → IdentityTransformer → CsvWriter (indexed)
pub async fn collect_drug_central(
    section: &DrugCentralSection,
    output_dir: impl AsRef<Path>,
) -> Result<usize> {
    let path = output_path(output_dir.as_ref(), DRUG_CENTRAL_OUTPUT)?;

    log::info!(
        "Reading DrugCentral export {}",
        section.path.display().bright_black()
    );
    let mut extractor = DrugCentralExtractor::new(&section.path, section.columns.clone());
    if let Some(delimiter) = section.delimiter_byte()? {
        extractor = extractor.with_delimiter(delimiter);
    }
    let writer = CsvWriter::new(&path).with_index(true);

    let count = Pipeline::new(extractor, IdentityTransformer, writer)
        .run()
        .await
        .with_context(|| "DrugCentral collection failed")?;

    log::info!("✓ Wrote {} row(s) to {}", count, path.display());
    Ok(count)
}

/// Annotate accessions with species and subcellular location and write `uniprot.csv`
///
/// Pipeline: ProteinAnnotationExtractor → IdentityTransformer → CsvWriter
pub async fn collect_uniprot(
    client: UniprotClient,
    accessions: &[String],
    output_dir: impl AsRef<Path>,
) -> Result<usize> {
    let path = output_path(output_dir.as_ref(), UNIPROT_OUTPUT)?;

    log::info!(
        "Annotating {} accession(s) from {}",
        accessions.len(),
        client.url().bright_black()
    );
    if !client.delay().is_zero() {
        log::debug!("Pausing {:?} before each XML request", client.delay());
    }
    let extractor = ProteinAnnotationExtractor::new(client, accessions.to_vec());
    let writer = CsvWriter::new(&path);

    let count = Pipeline::new(extractor, IdentityTransformer, writer)
        .run()
        .await
        .with_context(|| "UniProt collection failed")?;

    log::info!("✓ Wrote {} row(s) to {}", count, path.display());
    Ok(count)
}

/// Run every flow in order: Pharos, ChEMBL, DrugCentral, then UniProt
///
/// Settings for each flow are read from the environment right before it
/// runs. The first failure aborts the run; files written by earlier flows
/// are kept. UniProt is skipped when the manifest lists no accessions.
pub async fn collect_all(manifest: &DatasetsManifest, output_dir: impl AsRef<Path>) -> Result<usize> {
    let output_dir = output_dir.as_ref();
    let mut total = 0;

    total += collect_pharos(load_pharos_params()?, &manifest.pharos, output_dir).await?;
    total += collect_chembl(load_chembl_params()?, &manifest.chembl, output_dir).await?;
    total += collect_drug_central(&manifest.drug_central, output_dir).await?;

    if manifest.uniprot.accessions.is_empty() {
        log::info!("No UniProt accessions in manifest, skipping annotation");
    } else {
        total += collect_uniprot(
            load_uniprot_client()?,
            &manifest.uniprot.accessions,
            output_dir,
        )
        .await?;
    }

    log::info!(
        "✓ Collected {} row(s) into {}",
        total,
        output_dir.display().bright_black()
    );
    Ok(total)
}
