use rust_decimal::Decimal;
use sqlx::{Row, TypeInfo, ValueRef};
use itax_core::RepositoryError;

/// Get a decimal value from a row.
///
/// Amounts are written as TEXT, but INTEGER and REAL cells are accepted too
/// so rows typed in by hand (or imported from older stores) still load.
/// NULL reads as zero.
pub fn get_decimal(
    row: &sqlx::sqlite::SqliteRow,
    column: &str,
) -> Result<Decimal, RepositoryError> {
    let value_ref = row
        .try_get_raw(column)
        .map_err(|e| RepositoryError::Database(format!("Column '{}' not found: {}", column, e)))?;

    if value_ref.is_null() {
        return Ok(Decimal::ZERO);
    }

    let type_name = value_ref.type_info().name().to_string();

    match type_name.as_str() {
        "TEXT" => {
            let val: String = row.try_get(column).map_err(|e| {
                RepositoryError::Database(format!("Failed to get TEXT from '{}': {}", column, e))
            })?;
            parse_decimal(&val, column)
        }
        "INTEGER" => {
            let val: i64 = row.try_get(column).map_err(|e| {
                RepositoryError::Database(format!(
                    "Failed to get INTEGER from '{}': {}",
                    column, e
                ))
            })?;
            Ok(Decimal::from(val))
        }
        "REAL" => {
            let val: f64 = row.try_get(column).map_err(|e| {
                RepositoryError::Database(format!("Failed to get REAL from '{}': {}", column, e))
            })?;
            Decimal::try_from(val).map_err(|e| {
                RepositoryError::Database(format!("Failed to convert {} to Decimal: {}", val, e))
            })
        }
        _ => Err(RepositoryError::Database(format!(
            "Unexpected type '{}' for column '{}'",
            type_name, column
        ))),
    }
}

fn parse_decimal(
    s: &str,
    column: &str,
) -> Result<Decimal, RepositoryError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }
    trimmed.parse::<Decimal>().map_err(|e| {
        RepositoryError::Database(format!(
            "Failed to parse decimal '{}' in '{}': {}",
            s, column, e
        ))
    })
}

/// Text form written to the database.
pub fn decimal_to_text(d: Decimal) -> String {
    d.normalize().to_string()
}
