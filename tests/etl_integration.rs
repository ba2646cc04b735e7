//! Integration tests for ETL pipeline functionality
//!
//! These tests run end-to-end flows through the ETL framework with real
//! file I/O, standing in for the database sources with in-memory extractors.

use bioactivity_collector::etl::{Extractor, IdentityTransformer, Pipeline, Transformer};
use bioactivity_collector::sources::chembl;
use bioactivity_collector::storage::{CsvReader, CsvWriter};
use bioactivity_collector::table::{Table, Value, merge_on_id};
use bioactivity_collector::transform::{ColumnSelector, Deduplicator, NullFilter};
use eyre::Result;
use tempfile::TempDir;

/// Mock extractor returning a fixed table
struct MockExtractor {
    table: Table,
}

impl Extractor for MockExtractor {
    async fn extract(&self) -> Result<Table> {
        Ok(self.table.clone())
    }
}

/// Pharos-like tables: activities → targets → proteins
fn pharos_tables() -> Vec<Table> {
    let drug_activity = Table::from_rows(
        ["id", "target_id", "drug"],
        vec![
            vec![1.into(), 10.into(), "imatinib".into()],
            vec![2.into(), 11.into(), "gefitinib".into()],
            vec![3.into(), 99.into(), "orphan".into()],
        ],
    )
    .unwrap();
    let target = Table::from_rows(
        ["id", "name"],
        vec![
            vec![10.into(), "ABL1".into()],
            vec![11.into(), "EGFR".into()],
        ],
    )
    .unwrap();
    let protein = Table::from_rows(
        ["id", "uniprot"],
        vec![
            vec![10.into(), "P00519".into()],
            vec![11.into(), "P00533".into()],
        ],
    )
    .unwrap();
    vec![drug_activity, target, protein]
}

#[tokio::test]
async fn test_merged_tables_to_csv() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("pharos.csv");

    let merged = merge_on_id(pharos_tables(), "target_id").unwrap();
    let pipeline = Pipeline::new(
        MockExtractor { table: merged },
        IdentityTransformer,
        CsvWriter::new(&output).with_index(true),
    );

    let count = pipeline.run().await.unwrap();
    assert_eq!(count, 2);

    let written = CsvReader::new(&output).read().unwrap();
    assert_eq!(written.columns()[0], "");
    assert_eq!(written.get(0, "drug"), Some(&Value::from("imatinib")));
    assert_eq!(written.get(1, "uniprot"), Some(&Value::from("P00533")));
}

#[test]
fn test_inner_join_rows_have_matching_keys() {
    let tables = pharos_tables();
    let merged = merge_on_id(tables.clone(), "target_id").unwrap();

    assert_eq!(
        merged.columns(),
        &["id_x", "target_id", "drug", "id_y", "name", "id", "uniprot"]
    );
    assert_eq!(merged.len(), 2);

    // Every result row carries the same key from all three tables
    for row in 0..merged.len() {
        let target_id = merged.get(row, "target_id").unwrap();
        assert_eq!(merged.get(row, "id_y"), Some(target_id));
        assert_eq!(merged.get(row, "id"), Some(target_id));
        assert!(tables[1].column_values("id").unwrap().contains(&target_id));
        assert!(tables[2].column_values("id").unwrap().contains(&target_id));
    }
    assert!(
        merged
            .column_values("drug")
            .unwrap()
            .iter()
            .all(|v| **v != Value::from("orphan"))
    );
}

#[test]
fn test_single_table_merge_is_noop() {
    let target = pharos_tables().remove(1);
    let merged = merge_on_id(vec![target.clone()], "target_id").unwrap();
    assert_eq!(merged, target);
}

#[tokio::test]
async fn test_csv_round_trip_with_column_subset() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("drugs.tsv");
    let output = temp.path().join("drugs.csv");
    std::fs::write(
        &input,
        "name\tsmiles\tuniprot\nethanol\tCCO\tP12345\nwater\tO\t\nbenzene\tc1ccccc1\tQ99999\n",
    )
    .unwrap();

    let pipeline = Pipeline::new(
        CsvReader::new(&input),
        ColumnSelector::new(vec!["smiles", "uniprot"]),
        CsvWriter::new(&output),
    );
    let count = pipeline.run().await.unwrap();

    let back = CsvReader::new(&output).read().unwrap();
    assert_eq!(back.len(), count);
    assert_eq!(back.columns(), &["smiles", "uniprot"]);
    assert_eq!(back.get(1, "uniprot"), Some(&Value::Null));
    assert_eq!(back.get(2, "smiles"), Some(&Value::from("c1ccccc1")));
}

#[tokio::test]
async fn test_chained_cleanup_pipeline() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("chembl.csv");

    let raw = Table::from_rows(
        ["pref_name", "canonical_smiles", "accession"],
        vec![
            vec!["DrugA".into(), "CCO".into(), Value::Null],
            vec!["DrugB".into(), "CCN".into(), "P12345".into()],
            vec!["DrugB".into(), "CCN".into(), "P12345".into()],
        ],
    )
    .unwrap();

    let pipeline = Pipeline::new(
        MockExtractor { table: raw },
        chembl::shaper(),
        CsvWriter::new(&output),
    );
    let count = pipeline.run().await.unwrap();

    assert_eq!(count, 1);
    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(written, "drug,smiles,uniprot\nDrugB,CCN,P12345\n");
}

#[test]
fn test_filters_compose() {
    let table = Table::from_rows(
        ["a", "b"],
        vec![
            vec![1.into(), Value::Null],
            vec![2.into(), "x".into()],
            vec![2.into(), "x".into()],
        ],
    )
    .unwrap();

    let cleaned = NullFilter::new(vec!["b"])
        .then(Deduplicator)
        .transform(table)
        .unwrap();

    assert_eq!(cleaned.rows(), &[vec![Value::from(2), Value::from("x")]]);
}

#[tokio::test]
async fn test_empty_table_still_writes_header() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("uniprot.csv");

    let pipeline = Pipeline::new(
        MockExtractor {
            table: Table::new(["accession", "species", "location"]),
        },
        IdentityTransformer,
        CsvWriter::new(&output),
    );

    assert_eq!(pipeline.run().await.unwrap(), 0);
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "accession,species,location\n"
    );
}
