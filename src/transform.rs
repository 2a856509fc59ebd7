//! Table shaping for each chart: filter, aggregate, reshape.
//!
//! Every function takes the loaded tables by reference and returns a new
//! DataFrame. Time comparisons take `now` explicitly.
use chrono::{DateTime, Utc};
use polars::datatypes::TimeUnit;
use polars::prelude::*;
use tracing::{debug, warn};

use crate::error::DashboardError;
use crate::palette::*;
use crate::schema::*;

// ── Row subsetting ──────────────────────────────────────────────────────────

/// Rows for one item, with per-row display columns added.
///
/// Colors switch to the muted variant once `timestamp >= now`; the marker
/// opens only when `timestamp > now`. Source row order is kept.
pub fn subset_for_item(
    inventory: &DataFrame,
    item: &str,
    now: DateTime<Utc>,
) -> Result<DataFrame, DashboardError> {
    let df = inventory
        .clone()
        .lazy()
        .filter(col(inventory::ITEM_PURCHASED).eq(lit(item)))
        .with_columns([
            color_by_time(PURCHASED_COLOR, PURCHASED_COLOR_DARK, now)
                .alias(derived::COLOR_PURCHASED),
            color_by_time(RAW_WASTE_COLOR, RAW_WASTE_COLOR_DARK, now)
                .alias(derived::COLOR_RAW_WASTE),
            color_by_time(COOKED_COLOR, COOKED_COLOR_DARK, now).alias(derived::COLOR_COOKED),
            when(col(inventory::TIMESTAMP).gt(now_literal(now)))
                .then(lit(shape::OPEN))
                .otherwise(lit(shape::FILLED))
                .alias(derived::SHAPE),
        ])
        .collect()?;

    debug!(item, rows = df.height(), "inventory subset");
    Ok(df)
}

fn color_by_time(active: &str, muted: &str, now: DateTime<Utc>) -> Expr {
    when(col(inventory::TIMESTAMP).lt(now_literal(now)))
        .then(lit(active))
        .otherwise(lit(muted))
}

fn now_literal(now: DateTime<Utc>) -> Expr {
    lit(now.timestamp_micros()).cast(DataType::Datetime(TimeUnit::Microseconds, None))
}

// ── Wastage aggregation ─────────────────────────────────────────────────────

/// Summed raw and cooked waste per item, plus their total.
///
/// Groups come out in order of first appearance in the inventory.
pub fn wastage_by_item(inventory: &DataFrame) -> Result<DataFrame, DashboardError> {
    let df = inventory
        .clone()
        .lazy()
        .group_by_stable([col(inventory::ITEM_PURCHASED)])
        .agg([
            col(inventory::RAW_MATERIAL_WASTED).sum(),
            col(inventory::COOKED_FOOD_WASTED).sum(),
        ])
        .with_columns([(col(inventory::RAW_MATERIAL_WASTED)
            + col(inventory::COOKED_FOOD_WASTED))
        .alias(wastage::TOTAL_WASTED)])
        .collect()?;

    debug!(groups = df.height(), "wastage by item");
    Ok(df)
}

// ── Usage breakdown ─────────────────────────────────────────────────────────

/// Long-form `(index, food_result_type, food_result_value)` table of summed
/// raw waste, cooked waste and `used` for one item, in that row order.
///
/// Returns `None` when the item has no rows; nothing is aggregated then.
/// `used` is `purchased - raw - cooked` and may go negative.
pub fn usage_for_item(
    inventory: &DataFrame,
    item: &str,
) -> Result<Option<DataFrame>, DashboardError> {
    let filtered = inventory
        .clone()
        .lazy()
        .filter(col(inventory::ITEM_PURCHASED).eq(lit(item)))
        .select([
            col(inventory::RAW_MATERIAL_WASTED),
            col(inventory::COOKED_FOOD_WASTED),
            col(inventory::QUANTITY_PURCHASED),
        ])
        .collect()?;

    if filtered.height() == 0 {
        debug!(item, "no inventory rows, skipping usage aggregation");
        return Ok(None);
    }

    // One row per aggregation function; the mean rows are dropped after the unpivot.
    let sums = concat(
        [
            aggregate_row(&filtered, aggregation::SUM, Expr::sum),
            aggregate_row(&filtered, aggregation::MEAN, Expr::mean),
        ],
        UnionArgs::default(),
    )?
    .with_columns([(col(inventory::QUANTITY_PURCHASED)
        - col(inventory::RAW_MATERIAL_WASTED)
        - col(inventory::COOKED_FOOD_WASTED))
    .alias(usage::USED)])
    .unpivot(UnpivotArgsDSL {
        on: cols([
            inventory::RAW_MATERIAL_WASTED,
            inventory::COOKED_FOOD_WASTED,
            usage::USED,
        ]),
        index: cols([usage::AGGREGATION]),
        variable_name: Some(usage::FOOD_RESULT_TYPE.into()),
        value_name: Some(usage::FOOD_RESULT_VALUE.into()),
    })
    .filter(col(usage::AGGREGATION).eq(lit(aggregation::SUM)))
    .collect()?;
    Ok(Some(sums))
}

fn aggregate_row(df: &DataFrame, label: &str, agg: fn(Expr) -> Expr) -> LazyFrame {
    df.clone().lazy().select([
        lit(label).alias(usage::AGGREGATION),
        agg(col(inventory::RAW_MATERIAL_WASTED)),
        agg(col(inventory::COOKED_FOOD_WASTED)),
        agg(col(inventory::QUANTITY_PURCHASED)),
    ])
}

// ── Ticker windowing ────────────────────────────────────────────────────────

/// Ticker rows observed at or before `now`, in source order.
pub fn ticker_window(ticker: &DataFrame, now: DateTime<Utc>) -> Result<DataFrame, DashboardError> {
    let df = ticker
        .clone()
        .lazy()
        .filter(col(ticker::TIMESTAMP).lt_eq(now_literal(now)))
        .collect()?;
    debug!(rows = df.height(), "ticker window");
    Ok(df)
}

/// `timestamp` and the item's price column; `None` when the ticker has no
/// column for that item.
pub fn price_series(window: &DataFrame, item: &str) -> Result<Option<DataFrame>, DashboardError> {
    if item == ticker::TIMESTAMP || window.column(item).is_err() {
        warn!(item, "no ticker column for item");
        return Ok(None);
    }
    let df = window
        .clone()
        .lazy()
        .select([col(ticker::TIMESTAMP), col(item)])
        .collect()?;
    Ok(Some(df))
}
