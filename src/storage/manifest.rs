//! Dataset manifest management
//!
//! The manifest is stored as `datasets.yml` and describes what each
//! collection flow fetches. Every section is optional; missing sections and
//! fields fall back to the defaults below.
//!
//! Example format:
//! ```yaml
//! pharos:
//!   tables: [drug_activity, target, protein]
//!   merge_on: target_id
//! chembl:
//!   query: SELECT md.pref_name, cs.canonical_smiles, csq.accession FROM ...
//! drug_central:
//!   path: tchem_drugs_05122020.tsv
//!   columns: [smiles, uniprot]
//! uniprot:
//!   accessions: [P00533, P00519]
//! ```

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Query selecting human drug/target pairs from a ChEMBL release
pub const DEFAULT_CHEMBL_QUERY: &str = "\
SELECT md.pref_name, cs.canonical_smiles, csq.accession
FROM molecule_dictionary md
JOIN compound_structures cs ON md.molregno = cs.molregno
JOIN activities act ON md.molregno = act.molregno
JOIN assays ass ON act.assay_id = ass.assay_id
JOIN target_dictionary td ON ass.tid = td.tid
LEFT JOIN target_components tc ON td.tid = tc.tid
LEFT JOIN component_sequences csq ON tc.component_id = csq.component_id
WHERE td.organism = 'Homo sapiens'";

/// Pharos (TCRD) tables to dump and join
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PharosSection {
    /// Tables fetched in full, joined in list order
    pub tables: Vec<String>,
    /// Column of the accumulated result matched against each table's `id`
    pub merge_on: String,
}

impl Default for PharosSection {
    fn default() -> Self {
        Self {
            tables: vec![
                "drug_activity".to_string(),
                "target".to_string(),
                "protein".to_string(),
            ],
            merge_on: "target_id".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChemblSection {
    /// Read query returning (drug name, SMILES, UniProt accession)
    pub query: String,
}

impl Default for ChemblSection {
    fn default() -> Self {
        Self {
            query: DEFAULT_CHEMBL_QUERY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DrugCentralSection {
    /// DrugCentral drug/target export, downloadable from drugcentral.org
    pub path: PathBuf,
    /// Columns kept from the file
    pub columns: Vec<String>,
    /// Single-character field delimiter; inferred from the extension when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<char>,
}

impl Default for DrugCentralSection {
    fn default() -> Self {
        Self {
            path: PathBuf::from("tchem_drugs_05122020.tsv"),
            columns: vec!["smiles".to_string(), "uniprot".to_string()],
            delimiter: None,
        }
    }
}

impl DrugCentralSection {
    /// The configured delimiter as a byte, if any
    ///
    /// # Errors
    /// Returns an error if the delimiter is not a single ASCII character
    pub fn delimiter_byte(&self) -> Result<Option<u8>> {
        self.delimiter
            .map(|delimiter| match delimiter.is_ascii() {
                true => Ok(delimiter as u8),
                false => Err(eyre::eyre!(
                    "drug_central.delimiter must be a single ASCII character, got '{}'",
                    delimiter
                )),
            })
            .transpose()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UniprotSection {
    /// Accessions to annotate with species and subcellular location
    pub accessions: Vec<String>,
}

/// Dataset manifest structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatasetsManifest {
    pub pharos: PharosSection,
    pub chembl: ChemblSection,
    pub drug_central: DrugCentralSection,
    pub uniprot: UniprotSection,
}

impl DatasetsManifest {
    /// Read manifest from a YAML file
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read datasets manifest: {}", path.display()))?;

        let manifest: DatasetsManifest = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse datasets manifest: {}", path.display()))?;

        manifest.validate()?;
        Ok(manifest)
    }

    /// Read the manifest if it exists, otherwise use the defaults
    pub fn read_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            log::debug!("Loading datasets manifest from {}", path.display());
            Self::read(path)
        } else {
            log::debug!(
                "No datasets manifest at {}, using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// Write manifest to a YAML file
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let yaml = serde_yaml::to_string(self)
            .with_context(|| "Failed to serialize datasets manifest to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write datasets manifest: {}", path.display()))?;

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.pharos.tables.is_empty() {
            eyre::bail!("pharos.tables must list at least one table");
        }
        if self.drug_central.columns.is_empty() {
            eyre::bail!("drug_central.columns must list at least one column");
        }
        self.drug_central.delimiter_byte()?;
        Ok(())
    }
}
