//! Typed views over the shaped DataFrames, read by the chart builders.
use chrono::{DateTime, Utc};
use polars::datatypes::{AnyValue, TimeUnit};
use polars::prelude::*;

use crate::error::DashboardError;
use crate::schema::*;

/// One inventory row of the selected item with its display columns.
/// Blank quantity cells stay `None` and plot as gaps.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedInventoryRow {
    pub item_purchased: String,
    pub timestamp: DateTime<Utc>,
    pub quantity_purchased: Option<f64>,
    pub raw_material_wasted: Option<f64>,
    pub cooked_food_wasted: Option<f64>,
    pub color_purchased: String,
    pub color_raw_waste: String,
    pub color_cooked: String,
    pub shape: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedWastageRow {
    pub item_purchased: String,
    pub raw_material_wasted: f64,
    pub cooked_food_wasted: f64,
    pub total_wasted: f64,
}

/// A summed usage figure: `food_result_type` is `used`,
/// `raw_material_wasted` or `cooked_food_wasted`.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageBreakdownRow {
    pub food_result_type: String,
    pub food_result_value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: Option<f64>,
}

// ── Extraction ──────────────────────────────────────────────────────────────

impl DerivedInventoryRow {
    pub fn from_frame(df: &DataFrame) -> Result<Vec<Self>, DashboardError> {
        let items = df.column(inventory::ITEM_PURCHASED)?.str()?;
        let timestamps = timestamps(df, inventory::TIMESTAMP)?;
        let purchased = df.column(inventory::QUANTITY_PURCHASED)?.f64()?;
        let raw = df.column(inventory::RAW_MATERIAL_WASTED)?.f64()?;
        let cooked = df.column(inventory::COOKED_FOOD_WASTED)?.f64()?;
        let color_purchased = df.column(derived::COLOR_PURCHASED)?.str()?;
        let color_raw = df.column(derived::COLOR_RAW_WASTE)?.str()?;
        let color_cooked = df.column(derived::COLOR_COOKED)?.str()?;
        let shapes = df.column(derived::SHAPE)?.str()?;

        let mut rows = Vec::with_capacity(df.height());
        for (i, timestamp) in timestamps.into_iter().enumerate() {
            rows.push(Self {
                item_purchased: items.get(i).unwrap_or("").to_string(),
                timestamp,
                quantity_purchased: purchased.get(i),
                raw_material_wasted: raw.get(i),
                cooked_food_wasted: cooked.get(i),
                color_purchased: color_purchased.get(i).unwrap_or("").to_string(),
                color_raw_waste: color_raw.get(i).unwrap_or("").to_string(),
                color_cooked: color_cooked.get(i).unwrap_or("").to_string(),
                shape: shapes.get(i).unwrap_or(shape::FILLED).to_string(),
            });
        }
        Ok(rows)
    }
}

impl AggregatedWastageRow {
    pub fn from_frame(df: &DataFrame) -> Result<Vec<Self>, DashboardError> {
        let items = df.column(inventory::ITEM_PURCHASED)?.str()?;
        let raw = df.column(inventory::RAW_MATERIAL_WASTED)?.f64()?;
        let cooked = df.column(inventory::COOKED_FOOD_WASTED)?.f64()?;
        let total = df.column(wastage::TOTAL_WASTED)?.f64()?;

        Ok((0..df.height())
            .map(|i| Self {
                item_purchased: items.get(i).unwrap_or("").to_string(),
                raw_material_wasted: raw.get(i).unwrap_or(0.0),
                cooked_food_wasted: cooked.get(i).unwrap_or(0.0),
                total_wasted: total.get(i).unwrap_or(0.0),
            })
            .collect())
    }
}

impl UsageBreakdownRow {
    pub fn from_frame(df: &DataFrame) -> Result<Vec<Self>, DashboardError> {
        let kinds = df.column(usage::FOOD_RESULT_TYPE)?.str()?;
        let values = df.column(usage::FOOD_RESULT_VALUE)?.f64()?;

        Ok((0..df.height())
            .map(|i| Self {
                food_result_type: kinds.get(i).unwrap_or("").to_string(),
                food_result_value: values.get(i).unwrap_or(0.0),
            })
            .collect())
    }
}

impl PricePoint {
    /// Read `timestamp` and the `item` price column.
    pub fn from_frame(df: &DataFrame, item: &str) -> Result<Vec<Self>, DashboardError> {
        let prices = df.column(item)?.f64()?;
        Ok(timestamps(df, ticker::TIMESTAMP)?
            .into_iter()
            .enumerate()
            .map(|(i, timestamp)| Self {
                timestamp,
                price: prices.get(i),
            })
            .collect())
    }
}

/// Datetime column as UTC instants. Nulls are rejected at load time, so one
/// here is a data fault.
fn timestamps(df: &DataFrame, column: &str) -> Result<Vec<DateTime<Utc>>, DashboardError> {
    let series = df.column(column)?.as_materialized_series();
    let mut out = Vec::with_capacity(series.len());
    for i in 0..series.len() {
        let ts = match series.get(i)? {
            AnyValue::Datetime(v, TimeUnit::Nanoseconds, _) => {
                Some(DateTime::<Utc>::from_timestamp_nanos(v))
            }
            AnyValue::Datetime(v, TimeUnit::Microseconds, _) => {
                DateTime::<Utc>::from_timestamp_micros(v)
            }
            AnyValue::Datetime(v, TimeUnit::Milliseconds, _) => {
                DateTime::<Utc>::from_timestamp_millis(v)
            }
            other => {
                return Err(DashboardError::InvalidData(format!(
                    "Column '{}' row {}: expected datetime, got {}",
                    column, i, other
                )))
            }
        };
        let ts = ts.ok_or_else(|| {
            DashboardError::InvalidData(format!(
                "Column '{}' row {}: timestamp out of range",
                column, i
            ))
        })?;
        out.push(ts);
    }
    Ok(out)
}
