//! Connection settings from environment variables
//!
//! Every loader has a `*_from` variant taking a lookup function so the
//! parsing can be exercised without touching the process environment.

use crate::client::{DEFAULT_REQUEST_DELAY, DEFAULT_UNIPROT_URL, DatabaseParams, UniprotClient};
use eyre::{Context, OptionExt, Result};
use std::time::Duration;
use url::Url;

fn required(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<String> {
    lookup(name).ok_or_eyre(format!("{} environment variable not set", name))
}

fn optional_port(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<u16>> {
    lookup(name)
        .map(|port| {
            port.trim()
                .parse::<u16>()
                .with_context(|| format!("Invalid {}: {}", name, port))
        })
        .transpose()
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Load Pharos (TCRD MySQL) settings from environment variables
///
/// Expected environment variables:
/// - PHAROS_HOST: Server host (required)
/// - PHAROS_DATABASE: Database name, e.g. `tcrd540` (required)
/// - PHAROS_USER: User name (required)
/// - PHAROS_PASSWORD: Password (optional, the public server has none)
/// - PHAROS_PORT: Server port (optional, defaults to 3306)
pub fn load_pharos_params() -> Result<DatabaseParams> {
    load_pharos_params_from(env_lookup)
}

pub fn load_pharos_params_from(lookup: impl Fn(&str) -> Option<String>) -> Result<DatabaseParams> {
    let mut params = DatabaseParams::new(
        required(&lookup, "PHAROS_HOST")?,
        required(&lookup, "PHAROS_DATABASE")?,
        required(&lookup, "PHAROS_USER")?,
    );
    if let Some(port) = optional_port(&lookup, "PHAROS_PORT")? {
        params = params.with_port(port);
    }
    if let Some(password) = lookup("PHAROS_PASSWORD") {
        params = params.with_password(password);
    }
    Ok(params)
}

/// Load ChEMBL (PostgreSQL) settings from environment variables
///
/// Expected environment variables, all required:
/// CHEMBL_HOST, CHEMBL_PORT, CHEMBL_DATABASE, CHEMBL_USER, CHEMBL_PASSWORD
pub fn load_chembl_params() -> Result<DatabaseParams> {
    load_chembl_params_from(env_lookup)
}

pub fn load_chembl_params_from(lookup: impl Fn(&str) -> Option<String>) -> Result<DatabaseParams> {
    let port = optional_port(&lookup, "CHEMBL_PORT")?
        .ok_or_eyre("CHEMBL_PORT environment variable not set")?;

    Ok(DatabaseParams::new(
        required(&lookup, "CHEMBL_HOST")?,
        required(&lookup, "CHEMBL_DATABASE")?,
        required(&lookup, "CHEMBL_USER")?,
    )
    .with_port(port)
    .with_password(required(&lookup, "CHEMBL_PASSWORD")?))
}

/// Load the UniProt client from environment variables
///
/// Expected environment variables:
/// - UNIPROT_URL: Base URL (optional, defaults to https://www.uniprot.org)
/// - UNIPROT_DELAY_MS: Pause before each XML request in milliseconds
///   (optional, defaults to 1000)
pub fn load_uniprot_client() -> Result<UniprotClient> {
    load_uniprot_client_from(env_lookup)
}

pub fn load_uniprot_client_from(lookup: impl Fn(&str) -> Option<String>) -> Result<UniprotClient> {
    let url_str = lookup("UNIPROT_URL").unwrap_or_else(|| DEFAULT_UNIPROT_URL.to_string());
    let url = Url::parse(&url_str).with_context(|| format!("Invalid UNIPROT_URL: {}", url_str))?;

    let delay = match lookup("UNIPROT_DELAY_MS") {
        Some(ms) => Duration::from_millis(
            ms.trim()
                .parse()
                .with_context(|| format!("Invalid UNIPROT_DELAY_MS: {}", ms))?,
        ),
        None => DEFAULT_REQUEST_DELAY,
    };

    Ok(UniprotClient::try_new(url)
        .context("Failed to create UniProt client")?
        .with_delay(delay))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_pharos_optional_fields() {
        let params = load_pharos_params_from(vars(&[
            ("PHAROS_HOST", "tcrd.kmc.io"),
            ("PHAROS_DATABASE", "tcrd540"),
            ("PHAROS_USER", "tcrd"),
        ]))
        .unwrap();

        assert_eq!(params.port, None);
        assert_eq!(params.password, None);
        assert_eq!(params.to_string(), "tcrd@tcrd.kmc.io/tcrd540");
    }

    #[test]
    fn test_pharos_with_port_and_password() {
        let params = load_pharos_params_from(vars(&[
            ("PHAROS_HOST", "localhost"),
            ("PHAROS_DATABASE", "tcrd"),
            ("PHAROS_USER", "reader"),
            ("PHAROS_PORT", "3307"),
            ("PHAROS_PASSWORD", "pw"),
        ]))
        .unwrap();

        assert_eq!(params.port, Some(3307));
        assert_eq!(params.password.as_deref(), Some("pw"));
    }

    #[test]
    fn test_pharos_missing_host() {
        let err = load_pharos_params_from(vars(&[
            ("PHAROS_DATABASE", "tcrd540"),
            ("PHAROS_USER", "tcrd"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("PHAROS_HOST"));
    }

    #[test]
    fn test_chembl_requires_everything() {
        let full = [
            ("CHEMBL_HOST", "localhost"),
            ("CHEMBL_PORT", "5432"),
            ("CHEMBL_DATABASE", "chembl_32"),
            ("CHEMBL_USER", "postgres"),
            ("CHEMBL_PASSWORD", "pw"),
        ];
        let params = load_chembl_params_from(vars(&full)).unwrap();
        assert_eq!(params.to_string(), "postgres@localhost:5432/chembl_32");

        for skip in 0..full.len() {
            let partial: Vec<_> = full
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != skip)
                .map(|(_, pair)| *pair)
                .collect();
            let err = load_chembl_params_from(vars(&partial)).unwrap_err();
            assert!(err.to_string().contains(full[skip].0));
        }
    }

    #[test]
    fn test_invalid_port() {
        let err = load_pharos_params_from(vars(&[
            ("PHAROS_HOST", "h"),
            ("PHAROS_DATABASE", "d"),
            ("PHAROS_USER", "u"),
            ("PHAROS_PORT", "not-a-port"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("PHAROS_PORT"));
    }

    #[test]
    fn test_uniprot_defaults() {
        let client = load_uniprot_client_from(vars(&[])).unwrap();
        assert_eq!(client.url().as_str(), "https://www.uniprot.org/");
        assert_eq!(client.delay(), DEFAULT_REQUEST_DELAY);
    }

    #[test]
    fn test_uniprot_overrides() {
        let client = load_uniprot_client_from(vars(&[
            ("UNIPROT_URL", "http://localhost:8080"),
            ("UNIPROT_DELAY_MS", "0"),
        ]))
        .unwrap();
        assert_eq!(client.url().as_str(), "http://localhost:8080/");
        assert!(client.delay().is_zero());

        assert!(load_uniprot_client_from(vars(&[("UNIPROT_DELAY_MS", "soon")])).is_err());
        assert!(load_uniprot_client_from(vars(&[("UNIPROT_URL", "not a url")])).is_err());
    }
}
