//! Python extension module: the dashboard facade for a Dash/plotly view.
use std::path::PathBuf;

use chrono::{DateTime, NaiveDateTime, Utc};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDateTime, PyModule};
use pyo3_polars::PyDataFrame;

use crate::config::DatasetConfig;
use crate::dashboard::Dashboard;
use crate::error::DashboardError;
use crate::figure::Figure;
use crate::{palette, schema, transform};

#[pyclass(name = "Dashboard")]
pub struct PyDashboard {
    inner: Dashboard,
}

#[pymethods]
impl PyDashboard {
    /// Load `inventory_dataframe.csv` and `ticker.csv` from `base_path`.
    /// Raises if either file is missing or malformed.
    #[new]
    #[pyo3(signature = (base_path="./data", inventory_file=None, ticker_file=None, timestamp_format=None))]
    fn new(
        base_path: &str,
        inventory_file: Option<String>,
        ticker_file: Option<String>,
        timestamp_format: Option<String>,
    ) -> PyResult<Self> {
        let defaults = DatasetConfig::default();
        let config = DatasetConfig {
            data_dir: PathBuf::from(base_path),
            inventory_file: inventory_file.unwrap_or(defaults.inventory_file),
            ticker_file: ticker_file.unwrap_or(defaults.ticker_file),
            timestamp_format: timestamp_format.unwrap_or(defaults.timestamp_format),
        };
        Ok(Self {
            inner: Dashboard::load(&config)?,
        })
    }

    // ── Figures (plotly JSON) ───────────────────────────────────────────────

    #[pyo3(signature = (item=None, now=None))]
    fn quantity_stats(&self, item: Option<&str>, now: Option<Bound<PyDateTime>>) -> PyResult<String> {
        let now = resolve_now(now)?;
        Ok(to_json(&self.inner.quantity_stats(item, now)?)?)
    }

    #[pyo3(signature = (item=None))]
    fn prediction_radar(&self, item: Option<&str>) -> PyResult<String> {
        Ok(to_json(&self.inner.prediction_radar(item))?)
    }

    #[pyo3(signature = (item=None))]
    fn wastage_radar(&self, item: Option<&str>) -> PyResult<String> {
        Ok(to_json(&self.inner.wastage_radar(item))?)
    }

    #[pyo3(signature = (item=None))]
    fn combined_wastage_pie(&self, item: Option<&str>) -> PyResult<String> {
        Ok(to_json(&self.inner.combined_wastage_pie(item)?)?)
    }

    #[pyo3(signature = (item=None))]
    fn per_item_usage_pie(&self, item: Option<&str>) -> PyResult<String> {
        Ok(to_json(&self.inner.per_item_usage_pie(item)?)?)
    }

    #[pyo3(signature = (item=None, now=None))]
    fn price_ticker(&self, item: Option<&str>, now: Option<Bound<PyDateTime>>) -> PyResult<String> {
        let now = resolve_now(now)?;
        Ok(to_json(&self.inner.price_ticker(item, now)?)?)
    }

    /// All panels for one selection as a single JSON object.
    #[pyo3(signature = (item=None, now=None))]
    fn render(&self, item: Option<&str>, now: Option<Bound<PyDateTime>>) -> PyResult<String> {
        let now = resolve_now(now)?;
        let view = self.inner.render(item, now)?;
        Ok(serde_json::to_string(&view).map_err(DashboardError::from)?)
    }

    // ── Tips ────────────────────────────────────────────────────────────────

    #[pyo3(signature = (item=None))]
    fn prediction_tip(&self, item: Option<&str>) -> &'static str {
        self.inner.prediction_tip(item)
    }

    #[pyo3(signature = (item=None))]
    fn storage_tip(&self, item: Option<&str>) -> &'static str {
        self.inner.storage_tip(item)
    }

    // ── Shaped tables ───────────────────────────────────────────────────────

    #[pyo3(signature = (item, now=None))]
    fn subset_for_item(&self, item: &str, now: Option<Bound<PyDateTime>>) -> PyResult<PyDataFrame> {
        let now = resolve_now(now)?;
        let df = transform::subset_for_item(self.inner.dataset().inventory(), item, now)?;
        Ok(PyDataFrame(df))
    }

    fn wastage_by_item(&self) -> PyResult<PyDataFrame> {
        let df = transform::wastage_by_item(self.inner.dataset().inventory())?;
        Ok(PyDataFrame(df))
    }

    fn usage_for_item(&self, item: &str) -> PyResult<Option<PyDataFrame>> {
        let df = transform::usage_for_item(self.inner.dataset().inventory(), item)?;
        Ok(df.map(PyDataFrame))
    }

    #[pyo3(signature = (now=None))]
    fn ticker_window(&self, now: Option<Bound<PyDateTime>>) -> PyResult<PyDataFrame> {
        let now = resolve_now(now)?;
        let df = transform::ticker_window(self.inner.dataset().ticker(), now)?;
        Ok(PyDataFrame(df))
    }

    // ── Properties ──────────────────────────────────────────────────────────

    #[getter]
    fn inventory_df(&self) -> PyDataFrame {
        PyDataFrame(self.inner.dataset().inventory().clone())
    }

    #[getter]
    fn ticker_df(&self) -> PyDataFrame {
        PyDataFrame(self.inner.dataset().ticker().clone())
    }
}

/// Naive datetimes are read as UTC; `None` means the current time.
fn resolve_now(now: Option<Bound<PyDateTime>>) -> PyResult<DateTime<Utc>> {
    let Some(timestamp) = now else {
        return Ok(Utc::now());
    };
    if !timestamp.getattr("tzinfo")?.is_none() {
        return Err(PyValueError::new_err(
            "food_dashboard expects naive UTC datetime objects (no timezone info)",
        ));
    }
    let dt: NaiveDateTime = timestamp.extract()?;
    Ok(dt.and_utc())
}

fn to_json(figure: &Figure) -> Result<String, DashboardError> {
    figure.to_json()
}

/// Dropdown options as a list of `{"label", "value"}` dicts.
#[pyfunction]
fn food_item_options() -> Vec<std::collections::HashMap<&'static str, &'static str>> {
    palette::food_item_options()
        .into_iter()
        .map(|(label, value)| [("label", label), ("value", value)].into_iter().collect())
        .collect()
}

/// Export schema constants as Python submodules
fn add_schema_exports(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Inventory
    let inventory = PyModule::new(m.py(), "inventory")?;
    inventory.add("ITEM_PURCHASED", schema::inventory::ITEM_PURCHASED)?;
    inventory.add("TIMESTAMP", schema::inventory::TIMESTAMP)?;
    inventory.add("QUANTITY_PURCHASED", schema::inventory::QUANTITY_PURCHASED)?;
    inventory.add("RAW_MATERIAL_WASTED", schema::inventory::RAW_MATERIAL_WASTED)?;
    inventory.add("COOKED_FOOD_WASTED", schema::inventory::COOKED_FOOD_WASTED)?;
    m.add_submodule(&inventory)?;

    // Derived display columns
    let derived = PyModule::new(m.py(), "derived")?;
    derived.add("COLOR_PURCHASED", schema::derived::COLOR_PURCHASED)?;
    derived.add("COLOR_RAW_WASTE", schema::derived::COLOR_RAW_WASTE)?;
    derived.add("COLOR_COOKED", schema::derived::COLOR_COOKED)?;
    derived.add("SHAPE", schema::derived::SHAPE)?;
    m.add_submodule(&derived)?;

    // Wastage
    let wastage = PyModule::new(m.py(), "wastage")?;
    wastage.add("TOTAL_WASTED", schema::wastage::TOTAL_WASTED)?;
    m.add_submodule(&wastage)?;

    // Usage
    let usage = PyModule::new(m.py(), "usage")?;
    usage.add("AGGREGATION", schema::usage::AGGREGATION)?;
    usage.add("FOOD_RESULT_TYPE", schema::usage::FOOD_RESULT_TYPE)?;
    usage.add("FOOD_RESULT_VALUE", schema::usage::FOOD_RESULT_VALUE)?;
    usage.add("USED", schema::usage::USED)?;
    m.add_submodule(&usage)?;

    Ok(())
}

#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyDashboard>()?;
    m.add_function(wrap_pyfunction!(food_item_options, m)?)?;
    m.add("FOOD_ITEMS", palette::FOOD_ITEMS.to_vec())?;
    add_schema_exports(m)?;
    Ok(())
}
