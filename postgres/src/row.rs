//! Decoding of dynamically typed rows into JSON values.

use agent_tools_core::database::{DatabaseError, Row};
use serde_json::Value;
use sqlx::postgres::{PgColumn, PgRow};
use sqlx::{Column, Row as _, TypeInfo};

/// Decode every column of `row`, in select-list order.
///
/// # Errors
///
/// Returns [`DatabaseError::Decode`] if a column of a known type holds a value
/// that cannot be decoded as that type.
pub fn row_to_json(row: &PgRow) -> Result<Row, DatabaseError> {
    row.columns()
        .iter()
        .map(|column| decode_column(row, column))
        .collect()
}

fn decode_column(row: &PgRow, column: &PgColumn) -> Result<Value, DatabaseError> {
    let index = column.ordinal();
    let type_name = column.type_info().name();

    let decoded = match type_name {
        "BOOL" => row.try_get::<Option<bool>, _>(index).map(Value::from),
        "INT2" => row.try_get::<Option<i16>, _>(index).map(Value::from),
        "INT4" => row.try_get::<Option<i32>, _>(index).map(Value::from),
        "INT8" => row.try_get::<Option<i64>, _>(index).map(Value::from),
        "FLOAT4" => row
            .try_get::<Option<f32>, _>(index)
            .map(|v| Value::from(v.map(f64::from))),
        "FLOAT8" => row.try_get::<Option<f64>, _>(index).map(Value::from),
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => {
            row.try_get::<Option<String>, _>(index).map(Value::from)
        }
        "JSON" | "JSONB" => row
            .try_get::<Option<Value>, _>(index)
            .map(Option::unwrap_or_default),
        "UUID" => row
            .try_get::<Option<sqlx::types::Uuid>, _>(index)
            .map(|v| Value::from(v.map(|uuid| uuid.to_string()))),
        "TIMESTAMPTZ" => row
            .try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(index)
            .map(|v| Value::from(v.map(|ts| ts.to_rfc3339()))),
        "TIMESTAMP" => row
            .try_get::<Option<chrono::NaiveDateTime>, _>(index)
            .map(|v| Value::from(v.map(|ts| ts.format("%Y-%m-%dT%H:%M:%S%.f").to_string()))),
        "DATE" => row
            .try_get::<Option<chrono::NaiveDate>, _>(index)
            .map(|v| Value::from(v.map(|date| date.to_string()))),
        _ => return Ok(text_fallback(row, index, type_name)),
    };

    decoded.map_err(|e| {
        DatabaseError::Decode(format!("column '{}' ({type_name}): {e}", column.name()))
    })
}

/// Text rendering for types without a dedicated decoder (NUMERIC, INTERVAL,
/// arrays, ...). Rows come back in text format, so the raw text is usable.
fn text_fallback(row: &PgRow, index: usize, type_name: &str) -> Value {
    match row.try_get_unchecked::<Option<String>, _>(index) {
        Ok(text) => Value::from(text),
        Err(e) => {
            tracing::debug!(type_name, error = %e, "Undecodable column rendered as null");
            Value::Null
        }
    }
}
