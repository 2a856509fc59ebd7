use std::io::Cursor;
use std::path::Path;

use polars::datatypes::TimeUnit;
use polars::prelude::StrptimeOptions;
use polars::prelude::*;
use tracing::info;

use crate::config::DatasetConfig;
use crate::error::DashboardError;
use crate::schema::*;

/// Read-only tables loaded once at startup.
///
/// Built by [`Dataset::load`] and passed by reference into every
/// transformation. Nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct Dataset {
    inventory: DataFrame,
    ticker: DataFrame,
}

impl Dataset {
    // ── Data loading ────────────────────────────────────────────────────────

    /// Load both tables from the files named in `config`.
    ///
    /// Any failure here is fatal for the dashboard: a missing file, a
    /// missing required column, an unparsable timestamp or number.
    pub fn load(config: &DatasetConfig) -> Result<Self, DashboardError> {
        let inventory = read_csv_file(&config.inventory_path())?;
        let ticker = read_csv_file(&config.ticker_path())?;
        Self::from_raw(inventory, ticker, &config.timestamp_format)
    }

    /// Build the dataset from in-memory CSV text.
    pub fn from_csv_strings(
        inventory_csv: &str,
        ticker_csv: &str,
        timestamp_format: &str,
    ) -> Result<Self, DashboardError> {
        let inventory = read_csv_bytes(inventory_csv.as_bytes().to_vec())?;
        let ticker = read_csv_bytes(ticker_csv.as_bytes().to_vec())?;
        Self::from_raw(inventory, ticker, timestamp_format)
    }

    fn from_raw(
        inventory: DataFrame,
        ticker: DataFrame,
        timestamp_format: &str,
    ) -> Result<Self, DashboardError> {
        let inventory = prepare_inventory(inventory, timestamp_format)?;
        let ticker = prepare_ticker(ticker, timestamp_format)?;
        info!(
            inventory_rows = inventory.height(),
            ticker_rows = ticker.height(),
            "dataset loaded"
        );
        Ok(Self { inventory, ticker })
    }

    // ── Properties ──────────────────────────────────────────────────────────

    pub fn inventory(&self) -> &DataFrame {
        &self.inventory
    }

    pub fn ticker(&self) -> &DataFrame {
        &self.ticker
    }

    /// Items with a price column in the ticker table.
    pub fn ticker_items(&self) -> Vec<String> {
        self.ticker
            .get_column_names_str()
            .iter()
            .filter(|c| **c != ticker::TIMESTAMP)
            .map(|c| c.to_string())
            .collect()
    }
}

// ── Private helpers ─────────────────────────────────────────────────────────

/// Read a CSV file with all columns as String dtype.
fn read_csv_file(path: &Path) -> Result<DataFrame, DashboardError> {
    if !path.is_file() {
        return Err(DashboardError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} not found", path.display()),
        )));
    }
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0)) // all columns as String
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    trim_column_names(df)
}

fn read_csv_bytes(bytes: Vec<u8>) -> Result<DataFrame, DashboardError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()?;
    trim_column_names(df)
}

fn trim_column_names(mut df: DataFrame) -> Result<DataFrame, DashboardError> {
    let trimmed: Vec<String> = df
        .get_column_names_str()
        .iter()
        .map(|c| c.trim().to_string())
        .collect();
    df.set_column_names(trimmed.as_slice())?;
    Ok(df)
}

fn require_columns(df: &DataFrame, required: &[&str]) -> Result<(), DashboardError> {
    for &col_name in required {
        if df.column(col_name).is_err() {
            return Err(DashboardError::MissingColumn(col_name.to_string()));
        }
    }
    Ok(())
}

fn require_non_null(df: &DataFrame, columns: &[&str]) -> Result<(), DashboardError> {
    for &col_name in columns {
        let null_count = df.column(col_name)?.null_count();
        if null_count > 0 {
            return Err(DashboardError::InvalidData(format!(
                "Column '{}' has {} null values",
                col_name, null_count
            )));
        }
    }
    Ok(())
}

fn prepare_inventory(raw: DataFrame, timestamp_format: &str) -> Result<DataFrame, DashboardError> {
    require_columns(
        &raw,
        &[
            inventory::ITEM_PURCHASED,
            inventory::TIMESTAMP,
            inventory::QUANTITY_PURCHASED,
            inventory::RAW_MATERIAL_WASTED,
            inventory::COOKED_FOOD_WASTED,
        ],
    )?;

    let df = parse_datetime_column(raw, inventory::TIMESTAMP, timestamp_format)?;
    require_non_null(&df, &[inventory::ITEM_PURCHASED, inventory::TIMESTAMP])?;

    let mut casts = vec![col(inventory::ITEM_PURCHASED)
        .str()
        .strip_chars(lit(" \t\r\n"))];
    casts.extend(inventory::QUANTITIES.iter().map(|c| parse_float(c)));

    Ok(df.lazy().with_columns(casts).collect()?)
}

fn prepare_ticker(raw: DataFrame, timestamp_format: &str) -> Result<DataFrame, DashboardError> {
    require_columns(&raw, &[ticker::TIMESTAMP])?;

    let price_cols: Vec<Expr> = raw
        .get_column_names_str()
        .iter()
        .filter(|c| **c != ticker::TIMESTAMP)
        .map(|c| parse_float(c))
        .collect();

    let df = parse_datetime_column(raw, ticker::TIMESTAMP, timestamp_format)?;
    require_non_null(&df, &[ticker::TIMESTAMP])?;
    if price_cols.is_empty() {
        return Ok(df);
    }
    Ok(df.lazy().with_columns(price_cols).collect()?)
}

/// Strict string -> Float64 cast; unparsable values fail the load.
fn parse_float(column: &str) -> Expr {
    col(column)
        .str()
        .strip_chars(lit(" \t\r\n"))
        .strict_cast(DataType::Float64)
}

/// Parse a string column to naive (UTC) Datetime in microseconds.
fn parse_datetime_column(
    df: DataFrame,
    column: &str,
    format: &str,
) -> Result<DataFrame, DashboardError> {
    let df = df
        .lazy()
        .with_columns([col(column)
            .str()
            .strip_chars(lit(" \t\r\n"))
            .str()
            .to_datetime(
                Some(TimeUnit::Microseconds),
                None,
                StrptimeOptions {
                    format: Some(format.into()),
                    strict: true,
                    ..Default::default()
                },
                lit("raise"),
            )])
        .collect()?;
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    const INVENTORY: &str = "\
item_purchased, timestamp, quantity_purchased, raw_material_wasted, cooked_food_wasted
cheese,2024-01-01 10:00:00,10,1,0
tomato,2024-01-02 10:00:00, 5.5 ,0.5,1
";

    const TICKER: &str = "\
timestamp,cheese,tomato,onion
2024-01-01 00:00:00,80.5,12,9
2024-01-02 00:00:00,81,12.5,9.5
";

    #[test]
    fn parses_types_and_trims_headers() {
        let ds = Dataset::from_csv_strings(INVENTORY, TICKER, FORMAT).unwrap();
        let inv = ds.inventory();
        assert_eq!(inv.height(), 2);
        assert!(matches!(
            inv.column(inventory::TIMESTAMP).unwrap().dtype(),
            DataType::Datetime(TimeUnit::Microseconds, None)
        ));
        let qty = inv.column(inventory::QUANTITY_PURCHASED).unwrap().f64().unwrap();
        assert_eq!(qty.get(1), Some(5.5));
        assert_eq!(ds.ticker().height(), 2);
    }

    #[test]
    fn lists_ticker_price_columns() {
        let ds = Dataset::from_csv_strings(INVENTORY, TICKER, FORMAT).unwrap();
        assert_eq!(ds.ticker_items(), vec!["cheese", "tomato", "onion"]);
    }

    #[test]
    fn missing_inventory_column_is_fatal() {
        let csv = "item_purchased,timestamp,quantity_purchased\ncheese,2024-01-01 10:00:00,1\n";
        let err = Dataset::from_csv_strings(csv, TICKER, FORMAT).unwrap_err();
        assert!(matches!(err, DashboardError::MissingColumn(ref c) if c == "raw_material_wasted"));
    }

    #[test]
    fn unparsable_quantity_is_fatal() {
        let csv = "\
item_purchased,timestamp,quantity_purchased,raw_material_wasted,cooked_food_wasted
cheese,2024-01-01 10:00:00,lots,1,0
";
        assert!(Dataset::from_csv_strings(csv, TICKER, FORMAT).is_err());
    }

    #[test]
    fn unparsable_timestamp_is_fatal() {
        let ticker = "timestamp,cheese\nyesterday,1\n";
        assert!(Dataset::from_csv_strings(INVENTORY, ticker, FORMAT).is_err());
    }

    #[test]
    fn blank_timestamp_is_fatal() {
        let csv = "\
item_purchased,timestamp,quantity_purchased,raw_material_wasted,cooked_food_wasted
cheese,,1,1,0
";
        assert!(Dataset::from_csv_strings(csv, TICKER, FORMAT).is_err());
    }

    #[test]
    fn missing_directory_is_fatal() {
        let config = DatasetConfig::with_data_dir("/nonexistent/food-dashboard-data");
        let err = Dataset::load(&config).unwrap_err();
        assert!(matches!(err, DashboardError::Io(_)));
    }
}
