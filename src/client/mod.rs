//! Clients for the external sources.
//!
//! This module provides the [`UniprotClient`] for single-entry lookups against
//! the UniProt web service, and per-call database connections
//! ([`DatabaseParams`], [`connect_mysql`], [`connect_postgres`]) that
//! materialize query results as [`Table`](crate::table::Table)s.

mod database;
mod markup;
mod rows;
mod uniprot;

pub use database::{
    DatabaseParams, connect_mysql, connect_postgres, fetch_mysql_table, fetch_postgres_table,
};
pub use markup::element_texts;
pub use uniprot::{DEFAULT_REQUEST_DELAY, DEFAULT_UNIPROT_URL, UniprotClient};
