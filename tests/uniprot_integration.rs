//! Integration tests for UniProt lookups against a mock server

use bioactivity_collector::client::UniprotClient;
use bioactivity_collector::etl::Extractor;
use bioactivity_collector::sources::uniprot::ProteinAnnotationExtractor;
use bioactivity_collector::table::Value;
use std::time::Duration;
use url::Url;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

const EGFR_TXT: &str = "\
ID   EGFR_HUMAN              Reviewed;        1210 AA.
AC   P00533; O00688; O00732;
DE   RecName: Full=Epidermal growth factor receptor;
OS   Homo sapiens (Human).
OC   Eukaryota; Metazoa; Chordata; Craniata; Vertebrata; Euteleostomi;
//
";

const EGFR_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<uniprot xmlns="http://uniprot.org/uniprot">
<entry dataset="Swiss-Prot">
  <accession>P00533</accession>
  <comment type="subcellular location">
    <subcellularLocation>
      <location>Cell membrane</location>
      <topology>Single-pass type I membrane protein</topology>
    </subcellularLocation>
    <subcellularLocation>
      <location>Endoplasmic reticulum membrane</location>
    </subcellularLocation>
  </comment>
</entry>
</uniprot>"#;

/// Client pointed at the mock server, without the pre-request pause
fn client_for(server: &MockServer) -> UniprotClient {
    UniprotClient::try_new(Url::parse(&server.uri()).unwrap())
        .unwrap()
        .with_delay(Duration::ZERO)
}

async fn mock_entry(server: &MockServer, route: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_species_from_text_entry() {
    let server = MockServer::start().await;
    mock_entry(&server, "/uniprot/P00533.txt", 200, EGFR_TXT).await;

    let species = client_for(&server).species("P00533").await.unwrap();

    assert_eq!(species.as_deref(), Some("Homo sapiens (Human)."));
}

#[tokio::test]
async fn test_species_without_os_line() {
    let server = MockServer::start().await;
    mock_entry(&server, "/uniprot/P00533.txt", 200, "ID   X\n//\n").await;

    let species = client_for(&server).species("P00533").await.unwrap();
    assert_eq!(species, None);
}

#[tokio::test]
async fn test_subcellular_location_joins_elements() {
    let server = MockServer::start().await;
    mock_entry(&server, "/uniprot/P00533.xml", 200, EGFR_XML).await;

    let location = client_for(&server)
        .subcellular_location("P00533")
        .await
        .unwrap();

    assert_eq!(
        location,
        "Cell membrane Single-pass type I membrane protein, Endoplasmic reticulum membrane"
    );
}

#[tokio::test]
async fn test_subcellular_location_is_idempotent() {
    let server = MockServer::start().await;
    mock_entry(&server, "/uniprot/P00533.xml", 200, EGFR_XML).await;
    let client = client_for(&server);

    let first = client.subcellular_location("P00533").await.unwrap();
    let second = client.subcellular_location("P00533").await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_unknown_accession_is_absent() {
    let server = MockServer::start().await;
    mock_entry(&server, "/uniprot/XXXXXX.txt", 404, "").await;
    mock_entry(&server, "/uniprot/XXXXXX.xml", 404, "").await;
    let client = client_for(&server);

    assert_eq!(client.species("XXXXXX").await.unwrap(), None);
    assert_eq!(client.subcellular_location("XXXXXX").await.unwrap(), "");
}

#[tokio::test]
async fn test_malformed_or_obsolete_accession_is_absent() {
    let server = MockServer::start().await;
    mock_entry(
        &server,
        "/uniprot/not-an-acc.txt",
        400,
        "The 'accession' value has invalid format",
    )
    .await;
    mock_entry(&server, "/uniprot/not-an-acc.xml", 400, "").await;
    mock_entry(&server, "/uniprot/P00000.txt", 410, "").await;
    let client = client_for(&server);

    assert_eq!(client.species("not-an-acc").await.unwrap(), None);
    assert_eq!(client.subcellular_location("not-an-acc").await.unwrap(), "");
    assert_eq!(client.species("P00000").await.unwrap(), None);
}

#[tokio::test]
async fn test_entry_without_locations_is_empty() {
    let server = MockServer::start().await;
    mock_entry(
        &server,
        "/uniprot/Q00000.xml",
        200,
        "<uniprot><entry><accession>Q00000</accession></entry></uniprot>",
    )
    .await;

    let location = client_for(&server)
        .subcellular_location("Q00000")
        .await
        .unwrap();
    assert_eq!(location, "");
}

#[tokio::test]
async fn test_server_error_fails() {
    let server = MockServer::start().await;
    mock_entry(&server, "/uniprot/P00533.txt", 500, "boom").await;

    let result = client_for(&server).species("P00533").await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_delay_is_applied_before_xml_request() {
    let server = MockServer::start().await;
    mock_entry(&server, "/uniprot/P00533.xml", 200, EGFR_XML).await;
    let client = client_for(&server).with_delay(Duration::from_millis(50));

    let started = std::time::Instant::now();
    client.subcellular_location("P00533").await.unwrap();

    assert!(started.elapsed() >= Duration::from_millis(50));
}

#[tokio::test]
async fn test_annotation_extractor_builds_rows() {
    let server = MockServer::start().await;
    mock_entry(&server, "/uniprot/P00533.txt", 200, EGFR_TXT).await;
    mock_entry(&server, "/uniprot/P00533.xml", 200, EGFR_XML).await;
    mock_entry(&server, "/uniprot/XXXXXX.txt", 404, "").await;
    mock_entry(&server, "/uniprot/XXXXXX.xml", 404, "").await;

    let extractor =
        ProteinAnnotationExtractor::new(client_for(&server), vec!["P00533", "XXXXXX"]);
    let table = extractor.extract().await.unwrap();

    assert_eq!(table.columns(), &["accession", "species", "location"]);
    assert_eq!(table.len(), 2);
    assert_eq!(
        table.get(0, "species"),
        Some(&Value::from("Homo sapiens (Human)."))
    );
    assert_eq!(table.get(1, "accession"), Some(&Value::from("XXXXXX")));
    assert_eq!(table.get(1, "species"), Some(&Value::Null));
    assert_eq!(table.get(1, "location"), Some(&Value::from("")));
}

#[tokio::test]
async fn test_annotation_extractor_reports_accession() {
    let server = MockServer::start().await;
    mock_entry(&server, "/uniprot/P00533.txt", 503, "").await;

    let extractor = ProteinAnnotationExtractor::new(client_for(&server), vec!["P00533"]);
    let err = extractor.extract().await.unwrap_err();

    assert!(err.to_string().contains("P00533"));
}
