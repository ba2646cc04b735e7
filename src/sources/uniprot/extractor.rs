//! Per-accession species and subcellular location lookup

use crate::client::UniprotClient;
use crate::etl::Extractor;
use crate::table::{Table, Value};
use eyre::{Context, Result};

pub const ANNOTATION_COLUMNS: [&str; 3] = ["accession", "species", "location"];

/// Extractor annotating a list of UniProt accessions
///
/// Accessions are looked up one at a time, in list order. An accession
/// unknown to UniProt yields a row with a null species and an empty location.
pub struct ProteinAnnotationExtractor {
    client: UniprotClient,
    accessions: Vec<String>,
}

impl ProteinAnnotationExtractor {
    pub fn new<S: Into<String>>(client: UniprotClient, accessions: Vec<S>) -> Self {
        Self {
            client,
            accessions: accessions.into_iter().map(Into::into).collect(),
        }
    }

    async fn annotate(&self, accession: &str) -> Result<Vec<Value>> {
        let species = self.client.species(accession).await?;
        let location = self.client.subcellular_location(accession).await?;

        Ok(vec![
            Value::from(accession),
            Value::from(species),
            Value::from(location),
        ])
    }
}

impl Extractor for ProteinAnnotationExtractor {
    async fn extract(&self) -> Result<Table> {
        let mut table = Table::new(ANNOTATION_COLUMNS);
        let total = self.accessions.len();

        for (i, accession) in self.accessions.iter().enumerate() {
            log::debug!("Annotating {} ({}/{})", accession, i + 1, total);
            let row = self
                .annotate(accession)
                .await
                .with_context(|| format!("Failed to annotate accession '{}'", accession))?;
            table.push_row(row)?;
        }

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[tokio::test]
    async fn test_no_accessions_makes_no_requests() {
        // Nothing listens on this port; any request would fail
        let client = UniprotClient::try_new(Url::parse("http://127.0.0.1:9").unwrap()).unwrap();
        let extractor = ProteinAnnotationExtractor::new(client, Vec::<String>::new());

        let table = extractor.extract().await.unwrap();
        assert_eq!(table.columns(), &ANNOTATION_COLUMNS);
        assert!(table.is_empty());
    }
}
