//! Pipeline orchestration for ETL operations

use super::{Extractor, Loader, Transformer};
use eyre::Result;

/// ETL Pipeline that orchestrates Extract, Transform, and Load operations
///
/// # Type Parameters
/// - `E`: Extractor type
/// - `T`: Transformer type
/// - `L`: Loader type
///
/// # Example
/// ```no_run
/// use bioactivity_collector::etl::{IdentityTransformer, Pipeline};
/// use bioactivity_collector::storage::{CsvReader, CsvWriter};
///
/// # async fn example() -> eyre::Result<()> {
/// let pipeline = Pipeline::new(
///     CsvReader::new("input.tsv"),
///     IdentityTransformer,
///     CsvWriter::new("output.csv"),
/// );
///
/// let count = pipeline.run().await?;
/// println!("Wrote {} rows", count);
/// # Ok(())
/// # }
/// ```
pub struct Pipeline<E, T, L> {
    extractor: E,
    transformer: T,
    loader: L,
}

impl<E, T, L> Pipeline<E, T, L>
where
    E: Extractor,
    T: Transformer,
    L: Loader,
{
    /// Create a new pipeline
    pub fn new(extractor: E, transformer: T, loader: L) -> Self {
        Self {
            extractor,
            transformer,
            loader,
        }
    }

    /// Run the complete ETL pipeline
    ///
    /// Steps:
    /// 1. Extract a table from the source
    /// 2. Transform it
    /// 3. Load it to the destination
    ///
    /// Nothing is loaded unless extraction and transformation both succeed.
    /// An empty table is still loaded so that the artifact reflects the run.
    ///
    /// Returns the number of rows loaded
    ///
    /// # Errors
    /// Returns an error if any stage fails
    pub async fn run(&self) -> Result<usize> {
        log::debug!("Starting ETL pipeline");

        log::debug!("Extracting from source...");
        let table = self.extractor.extract().await?;
        log::info!(
            "Extracted {} row(s) across {} column(s)",
            table.len(),
            table.columns().len()
        );

        if table.is_empty() {
            log::warn!("No rows extracted");
        }

        log::debug!("Transforming table...");
        let transformed = self.transformer.transform(table)?;
        log::info!("Transformed to {} row(s)", transformed.len());

        log::debug!("Loading to destination...");
        let count = self.loader.load(transformed).await?;
        log::info!("Loaded {} row(s)", count);

        Ok(count)
    }
}
