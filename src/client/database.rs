//! Relational database connections
//!
//! One connection is opened per table set or query and closed right after;
//! there is no pooling and every statement is a plain read.

use super::rows;
use crate::table::Table;
use eyre::{Context, Result};
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{Column, Connection, Executor, Statement};
use std::fmt;

/// Connection parameters for one database.
///
/// `port` and `password` are optional; when absent the driver defaults apply
/// (MySQL 3306, PostgreSQL 5432, no password).
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseParams {
    pub host: String,
    pub port: Option<u16>,
    pub database: String,
    pub user: String,
    pub password: Option<String>,
}

impl DatabaseParams {
    pub fn new(host: impl Into<String>, database: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: None,
            database: database.into(),
            user: user.into(),
            password: None,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    fn mysql_options(&self) -> MySqlConnectOptions {
        let mut options = MySqlConnectOptions::new()
            .host(&self.host)
            .database(&self.database)
            .username(&self.user);
        if let Some(port) = self.port {
            options = options.port(port);
        }
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        options
    }

    fn postgres_options(&self) -> PgConnectOptions {
        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .database(&self.database)
            .username(&self.user);
        if let Some(port) = self.port {
            options = options.port(port);
        }
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        options
    }
}

// Never print the password
impl fmt::Display for DatabaseParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.user, self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{}", port)?;
        }
        write!(f, "/{}", self.database)
    }
}

impl fmt::Debug for DatabaseParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseParams")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Open a MySQL connection
pub async fn connect_mysql(params: &DatabaseParams) -> Result<MySqlConnection> {
    log::debug!("Connecting to MySQL {}", params);
    MySqlConnection::connect_with(&params.mysql_options())
        .await
        .with_context(|| format!("Failed to connect to MySQL database {}", params))
}

/// Open a PostgreSQL connection
pub async fn connect_postgres(params: &DatabaseParams) -> Result<PgConnection> {
    log::debug!("Connecting to PostgreSQL {}", params);
    PgConnection::connect_with(&params.postgres_options())
        .await
        .with_context(|| format!("Failed to connect to PostgreSQL database {}", params))
}

/// Run a read query on a MySQL connection and materialize every row
pub async fn fetch_mysql_table(conn: &mut MySqlConnection, sql: &str) -> Result<Table> {
    log::trace!("MySQL query: {}", sql);
    let statement = (&mut *conn)
        .prepare(sql)
        .await
        .with_context(|| format!("Failed to prepare query: {}", sql))?;
    let columns: Vec<String> = statement
        .columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect();

    let fetched = statement
        .query()
        .fetch_all(&mut *conn)
        .await
        .with_context(|| format!("Failed to run query: {}", sql))?;

    rows::mysql_table(columns, &fetched)
}

/// Run a read query on a PostgreSQL connection and materialize every row
pub async fn fetch_postgres_table(conn: &mut PgConnection, sql: &str) -> Result<Table> {
    log::trace!("PostgreSQL query: {}", sql);
    let statement = (&mut *conn)
        .prepare(sql)
        .await
        .with_context(|| format!("Failed to prepare query: {}", sql))?;
    let columns: Vec<String> = statement
        .columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect();

    let fetched = statement
        .query()
        .fetch_all(&mut *conn)
        .await
        .with_context(|| format!("Failed to run query: {}", sql))?;

    rows::postgres_table(columns, &fetched)
}
