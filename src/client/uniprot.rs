//! UniProt client module
//!
//! Provides `UniprotClient` for looking up single fields of UniProt entries.
//! Each lookup issues one GET for one accession, either against the flat
//! text entry (`{id}.txt`) or the XML entry (`{id}.xml`).

use super::markup;
use eyre::{Context, Result, eyre};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Public UniProt endpoint
pub const DEFAULT_UNIPROT_URL: &str = "https://www.uniprot.org";

/// Pause before every XML request
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_secs(1);

/// Line marker of the organism species field in the flat text format
const SPECIES_MARKER: &str = "OS";

/// Width of the line code column (`"OS   "`) preceding the field content
const LINE_CODE_WIDTH: usize = 5;

/// Element listing one subcellular location in the XML format
const LOCATION_ELEMENT: &str = "subcellularLocation";

/// Statuses meaning the accession has no entry: malformed, unknown or obsolete
const ABSENT_STATUSES: [StatusCode; 3] = [
    StatusCode::BAD_REQUEST,
    StatusCode::NOT_FOUND,
    StatusCode::GONE,
];

/// UniProt client for single-entry field lookups.
///
/// # Example
/// ```no_run
/// use bioactivity_collector::client::UniprotClient;
/// use url::Url;
///
/// # async fn example() -> eyre::Result<()> {
/// let client = UniprotClient::try_new(Url::parse("https://www.uniprot.org")?)?;
///
/// let species = client.species("P00533").await?;
/// let locations = client.subcellular_location("P00533").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct UniprotClient {
    client: Client,
    url: Url,
    delay: Duration,
}

impl UniprotClient {
    /// Create a new client for a UniProt base URL.
    ///
    /// # Errors
    /// Returns an error if the URL cannot be used as a base or the HTTP
    /// client cannot be built
    pub fn try_new(url: Url) -> Result<Self> {
        if url.cannot_be_a_base() {
            eyre::bail!("UniProt URL cannot be used as a base: {}", url);
        }
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to build HTTP client")?;

        Ok(Self {
            client,
            url,
            delay: DEFAULT_REQUEST_DELAY,
        })
    }

    /// Set the pause taken before each XML request
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Get the base URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Build `{base}/uniprot/{accession}.{format}`.
    ///
    /// The accession is pushed as a single escaped path segment.
    pub fn entry_url(&self, accession: &str, format: &str) -> Result<Url> {
        let mut url = self.url.clone();
        url.path_segments_mut()
            .map_err(|_| eyre!("UniProt URL cannot be used as a base: {}", self.url))?
            .pop_if_empty()
            .push("uniprot")
            .push(&format!("{}.{}", accession, format));
        Ok(url)
    }

    /// GET one entry document.
    ///
    /// Returns `None` when UniProt rejects the accession or has no entry for it.
    async fn fetch_entry(&self, accession: &str, format: &str) -> Result<Option<String>> {
        let url = self.entry_url(accession, format)?;
        log::debug!("Fetching {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch UniProt entry '{}'", accession))?;

        let status = response.status();
        if ABSENT_STATUSES.contains(&status) {
            log::debug!("UniProt entry '{}' not found ({})", accession, status);
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            eyre::bail!(
                "Failed to fetch UniProt entry '{}' ({}): {}",
                accession,
                status,
                body
            );
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read UniProt entry '{}'", accession))?;
        Ok(Some(body))
    }

    /// Organism species of an entry, from the first `OS` line of the text format.
    ///
    /// Returns `None` if the entry does not exist or carries no `OS` line.
    pub async fn species(&self, accession: &str) -> Result<Option<String>> {
        let body = self.fetch_entry(accession, "txt").await?;
        Ok(body.and_then(|body| line_field(&body, SPECIES_MARKER)))
    }

    /// Subcellular locations of an entry, comma separated.
    ///
    /// Sleeps for the configured delay before the request. Returns an empty
    /// string if the entry does not exist or lists no location.
    pub async fn subcellular_location(&self, accession: &str) -> Result<String> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let Some(body) = self.fetch_entry(accession, "xml").await? else {
            return Ok(String::new());
        };

        let locations = markup::element_texts(&body, LOCATION_ELEMENT)
            .with_context(|| format!("Failed to parse UniProt XML for '{}'", accession))?;
        Ok(locations.join(", "))
    }
}

/// Content of the first line starting with `marker`, past the line code column
fn line_field(body: &str, marker: &str) -> Option<String> {
    body.lines()
        .find(|line| line.starts_with(marker))
        .map(|line| line.chars().skip(LINE_CODE_WIDTH).collect())
}
