//! Decoding database rows into table values
//!
//! Columns are decoded by their backend type name. Types without a native
//! counterpart (dates, times, binary) are kept as text.

use crate::table::{Table, Value};
use eyre::{Context, Result};
use sqlx::mysql::MySqlRow;
use sqlx::postgres::PgRow;
use sqlx::types::BigDecimal;
use sqlx::types::chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sqlx::{Column, Row, TypeInfo};

/// Build a table from MySQL rows
pub fn mysql_table(columns: Vec<String>, rows: &[MySqlRow]) -> Result<Table> {
    let mut table = Table::new(columns);
    for row in rows {
        let values = (0..row.len())
            .map(|i| mysql_value(row, i))
            .collect::<Result<Vec<_>>>()?;
        table.push_row(values)?;
    }
    Ok(table)
}

/// Build a table from PostgreSQL rows
pub fn postgres_table(columns: Vec<String>, rows: &[PgRow]) -> Result<Table> {
    let mut table = Table::new(columns);
    for row in rows {
        let values = (0..row.len())
            .map(|i| postgres_value(row, i))
            .collect::<Result<Vec<_>>>()?;
        table.push_row(values)?;
    }
    Ok(table)
}

/// How a MySQL column is decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MySqlDecode {
    /// `TINYINT(1)`, reported as `BOOLEAN`, signed or unsigned
    Flag,
    Integer,
    Unsigned,
    Float,
    Double,
    Decimal,
    Date,
    Time,
    DateTime,
    Bytes,
    Text,
}

fn mysql_decode(type_name: &str) -> MySqlDecode {
    match type_name {
        "BOOLEAN" => MySqlDecode::Flag,
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => MySqlDecode::Integer,
        name if name.ends_with(" UNSIGNED") => MySqlDecode::Unsigned,
        "FLOAT" => MySqlDecode::Float,
        "DOUBLE" => MySqlDecode::Double,
        "DECIMAL" => MySqlDecode::Decimal,
        "DATE" => MySqlDecode::Date,
        "TIME" => MySqlDecode::Time,
        "DATETIME" | "TIMESTAMP" => MySqlDecode::DateTime,
        "BINARY" | "VARBINARY" | "BLOB" | "TINYBLOB" | "MEDIUMBLOB" | "LONGBLOB" | "BIT" => {
            MySqlDecode::Bytes
        }
        _ => MySqlDecode::Text,
    }
}

fn mysql_value(row: &MySqlRow, i: usize) -> Result<Value> {
    let column = &row.columns()[i];
    let type_name = column.type_info().name();

    let value = match mysql_decode(type_name) {
        // Keep the stored number; the unsigned flag is not part of the name
        MySqlDecode::Flag => row
            .try_get::<Option<i64>, _>(i)
            .map(Value::from)
            .or_else(|_| {
                row.try_get::<Option<u64>, _>(i)
                    .map(|v| v.map_or(Value::Null, unsigned))
            }),
        MySqlDecode::Integer => row.try_get::<Option<i64>, _>(i).map(Value::from),
        MySqlDecode::Unsigned => row
            .try_get::<Option<u64>, _>(i)
            .map(|v| v.map_or(Value::Null, unsigned)),
        MySqlDecode::Float => row
            .try_get::<Option<f32>, _>(i)
            .map(|v| Value::from(v.map(f64::from))),
        MySqlDecode::Double => row.try_get::<Option<f64>, _>(i).map(Value::from),
        MySqlDecode::Decimal => row.try_get::<Option<BigDecimal>, _>(i).map(decimal),
        MySqlDecode::Date => row.try_get::<Option<NaiveDate>, _>(i).map(display),
        MySqlDecode::Time => row.try_get::<Option<NaiveTime>, _>(i).map(display),
        MySqlDecode::DateTime => row.try_get::<Option<NaiveDateTime>, _>(i).map(display),
        MySqlDecode::Bytes => row.try_get::<Option<Vec<u8>>, _>(i).map(bytes),
        MySqlDecode::Text => row.try_get::<Option<String>, _>(i).map(Value::from),
    };

    value.with_context(|| {
        format!(
            "Failed to decode column '{}' of type {}",
            column.name(),
            type_name
        )
    })
}

fn postgres_value(row: &PgRow, i: usize) -> Result<Value> {
    let column = &row.columns()[i];
    let type_name = column.type_info().name();

    let value = match type_name {
        "BOOL" => row.try_get::<Option<bool>, _>(i).map(Value::from),
        "\"CHAR\"" => row
            .try_get::<Option<i8>, _>(i)
            .map(|v| Value::from(v.map(i64::from))),
        "INT2" => row
            .try_get::<Option<i16>, _>(i)
            .map(|v| Value::from(v.map(i64::from))),
        "INT4" => row
            .try_get::<Option<i32>, _>(i)
            .map(|v| Value::from(v.map(i64::from))),
        "INT8" => row.try_get::<Option<i64>, _>(i).map(Value::from),
        "FLOAT4" => row
            .try_get::<Option<f32>, _>(i)
            .map(|v| Value::from(v.map(f64::from))),
        "FLOAT8" => row.try_get::<Option<f64>, _>(i).map(Value::from),
        "NUMERIC" => row.try_get::<Option<BigDecimal>, _>(i).map(decimal),
        "DATE" => row.try_get::<Option<NaiveDate>, _>(i).map(display),
        "TIME" => row.try_get::<Option<NaiveTime>, _>(i).map(display),
        "TIMESTAMP" => row.try_get::<Option<NaiveDateTime>, _>(i).map(display),
        "TIMESTAMPTZ" => row.try_get::<Option<DateTime<Utc>>, _>(i).map(display),
        "BYTEA" => row.try_get::<Option<Vec<u8>>, _>(i).map(bytes),
        _ => row.try_get::<Option<String>, _>(i).map(Value::from),
    };

    value.with_context(|| {
        format!(
            "Failed to decode column '{}' of type {}",
            column.name(),
            type_name
        )
    })
}

fn unsigned(v: u64) -> Value {
    i64::try_from(v)
        .map(Value::Int)
        .unwrap_or_else(|_| Value::Decimal(v.to_string()))
}

/// Decimals are stored normalized so equal numbers compare equal
fn decimal(v: Option<BigDecimal>) -> Value {
    v.map_or(Value::Null, |d| {
        let d = d.normalized();
        let d = match d.as_bigint_and_exponent().1 < 0 {
            true => d.with_scale(0),
            false => d,
        };
        Value::Decimal(d.to_string())
    })
}

fn display<T: ToString>(v: Option<T>) -> Value {
    v.map_or(Value::Null, |v| Value::Text(v.to_string()))
}

fn bytes(v: Option<Vec<u8>>) -> Value {
    v.map_or(Value::Null, |b| {
        Value::Text(String::from_utf8_lossy(&b).into_owned())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsigned_overflow_keeps_exact_value() {
        assert_eq!(unsigned(7), Value::Int(7));
        assert_eq!(unsigned(u64::MAX), Value::Decimal(u64::MAX.to_string()));
    }

    fn parse(s: &str) -> Option<BigDecimal> {
        Some(s.parse().unwrap())
    }

    #[test]
    fn test_decimal_is_normalized() {
        assert_eq!(decimal(parse("12.50")), Value::Decimal("12.5".to_string()));
        assert_eq!(decimal(parse("1.0")), decimal(parse("1.00")));
        assert_eq!(decimal(parse("1200.00")), Value::Decimal("1200".to_string()));
        assert_eq!(decimal(parse("0.000")), Value::Decimal("0".to_string()));
        assert_eq!(decimal(None), Value::Null);
    }

    #[test]
    fn test_tinyint_flags_decode_as_integers() {
        assert_eq!(mysql_decode("BOOLEAN"), MySqlDecode::Flag);
        assert_eq!(mysql_decode("TINYINT"), MySqlDecode::Integer);
        assert_eq!(mysql_decode("TINYINT UNSIGNED"), MySqlDecode::Unsigned);
        assert_eq!(mysql_decode("DECIMAL"), MySqlDecode::Decimal);
        assert_eq!(mysql_decode("VARCHAR"), MySqlDecode::Text);
        assert_eq!(unsigned(200), Value::Int(200));
    }

    #[test]
    fn test_bytes_are_lossy_text() {
        assert_eq!(bytes(Some(b"abc".to_vec())), Value::from("abc"));
        assert_eq!(bytes(None), Value::Null);
    }

    #[test]
    fn test_display_dates() {
        let date = NaiveDate::from_ymd_opt(2020, 5, 12);
        assert_eq!(display(date), Value::from("2020-05-12"));
    }
}
