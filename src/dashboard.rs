use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::charts;
use crate::config::DatasetConfig;
use crate::dataset::Dataset;
use crate::error::DashboardError;
use crate::figure::Figure;
use crate::rows::{AggregatedWastageRow, DerivedInventoryRow, PricePoint, UsageBreakdownRow};
use crate::tips;
use crate::transform;

/// Everything the view shows for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub quantity_stats: Figure,
    pub prediction_radar: Figure,
    pub wastage_radar: Figure,
    pub combined_wastage_pie: Figure,
    pub per_item_usage_pie: Figure,
    pub price_ticker: Figure,
    pub prediction_tip: String,
    pub storage_tip: String,
}

/// One operation per chart and tip over the loaded dataset.
///
/// Each takes the dropdown value as `Option<&str>`; `None` and `""` mean
/// nothing is selected and yield the empty chart or empty tip. An item with
/// no rows does the same. Errors only come from data faults in the loaded
/// tables.
pub struct Dashboard {
    dataset: Dataset,
}

impl Dashboard {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }

    pub fn load(config: &DatasetConfig) -> Result<Self, DashboardError> {
        Ok(Self::new(Dataset::load(config)?))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn quantity_stats(
        &self,
        selection: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Figure, DashboardError> {
        let Some(item) = selected(selection) else {
            return Ok(Figure::empty());
        };
        let subset = transform::subset_for_item(self.dataset.inventory(), item, now)?;
        if subset.height() == 0 {
            debug!(item, "no inventory rows for quantity chart");
            return Ok(Figure::empty());
        }
        let rows = DerivedInventoryRow::from_frame(&subset)?;
        Ok(charts::quantity_statistics(&rows))
    }

    pub fn prediction_radar(&self, selection: Option<&str>) -> Figure {
        selected(selection)
            .map(charts::prediction_radar)
            .unwrap_or_default()
    }

    pub fn wastage_radar(&self, selection: Option<&str>) -> Figure {
        selected(selection)
            .map(charts::wastage_radar)
            .unwrap_or_default()
    }

    /// Waste across all items; the selection only gates whether it is shown.
    pub fn combined_wastage_pie(&self, selection: Option<&str>) -> Result<Figure, DashboardError> {
        if selected(selection).is_none() {
            return Ok(Figure::empty());
        }
        let wastage = transform::wastage_by_item(self.dataset.inventory())?;
        if wastage.height() == 0 {
            return Ok(Figure::empty());
        }
        let rows = AggregatedWastageRow::from_frame(&wastage)?;
        Ok(charts::combined_wastage_pie(&rows))
    }

    pub fn per_item_usage_pie(&self, selection: Option<&str>) -> Result<Figure, DashboardError> {
        let Some(item) = selected(selection) else {
            return Ok(Figure::empty());
        };
        match transform::usage_for_item(self.dataset.inventory(), item)? {
            Some(usage) => {
                let rows = UsageBreakdownRow::from_frame(&usage)?;
                Ok(charts::per_item_usage_pie(&rows, item))
            }
            None => Ok(Figure::empty()),
        }
    }

    pub fn price_ticker(
        &self,
        selection: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Figure, DashboardError> {
        let Some(item) = selected(selection) else {
            return Ok(Figure::empty());
        };
        let window = transform::ticker_window(self.dataset.ticker(), now)?;
        if window.height() == 0 {
            return Ok(Figure::empty());
        }
        match transform::price_series(&window, item)? {
            Some(series) => {
                let points = PricePoint::from_frame(&series, item)?;
                Ok(charts::price_ticker(&points, item))
            }
            None => Ok(Figure::empty()),
        }
    }

    pub fn prediction_tip(&self, selection: Option<&str>) -> &'static str {
        selected(selection).map(tips::prediction_tip).unwrap_or("")
    }

    pub fn storage_tip(&self, selection: Option<&str>) -> &'static str {
        selected(selection).map(tips::storage_tip).unwrap_or("")
    }

    /// Recompute every chart and tip for a selection change.
    pub fn render(
        &self,
        selection: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<DashboardView, DashboardError> {
        Ok(DashboardView {
            quantity_stats: self.quantity_stats(selection, now)?,
            prediction_radar: self.prediction_radar(selection),
            wastage_radar: self.wastage_radar(selection),
            combined_wastage_pie: self.combined_wastage_pie(selection)?,
            per_item_usage_pie: self.per_item_usage_pie(selection)?,
            price_ticker: self.price_ticker(selection, now)?,
            prediction_tip: self.prediction_tip(selection).to_string(),
            storage_tip: self.storage_tip(selection).to_string(),
        })
    }
}

fn selected(selection: Option<&str>) -> Option<&str> {
    selection.filter(|item| !item.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const INVENTORY: &str = "\
item_purchased,timestamp,quantity_purchased,raw_material_wasted,cooked_food_wasted
tomato,2024-03-01 09:00:00,8,2,1
";

    const TICKER: &str = "\
timestamp,tomato
2024-03-01 00:00:00,12
";

    fn dashboard() -> Dashboard {
        Dashboard::new(Dataset::from_csv_strings(INVENTORY, TICKER, "%Y-%m-%d %H:%M:%S").unwrap())
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap()
    }

    #[test]
    fn selected_treats_blank_as_absent() {
        assert_eq!(selected(None), None);
        assert_eq!(selected(Some("")), None);
        assert_eq!(selected(Some("onion")), Some("onion"));
    }

    #[test]
    fn item_without_rows_gets_empty_data_charts() {
        let d = dashboard();
        assert!(d.quantity_stats(Some("onion"), now()).unwrap().is_empty());
        assert!(d.per_item_usage_pie(Some("onion")).unwrap().is_empty());
        assert!(d.price_ticker(Some("onion"), now()).unwrap().is_empty());
        // static tables still know onion
        assert!(!d.prediction_radar(Some("onion")).is_empty());
        assert_eq!(d.prediction_tip(Some("onion")), "Buy 14 kg less Onion.");
    }

    #[test]
    fn ticker_before_first_observation_is_empty() {
        let before = Utc.with_ymd_and_hms(2023, 12, 31, 0, 0, 0).unwrap();
        assert!(dashboard().price_ticker(Some("tomato"), before).unwrap().is_empty());
    }

    #[test]
    fn render_fills_every_panel_for_known_item() {
        let view = dashboard().render(Some("tomato"), now()).unwrap();
        assert!(!view.quantity_stats.is_empty());
        assert!(!view.prediction_radar.is_empty());
        assert!(!view.wastage_radar.is_empty());
        assert!(!view.combined_wastage_pie.is_empty());
        assert!(!view.per_item_usage_pie.is_empty());
        assert!(!view.price_ticker.is_empty());
        assert_eq!(view.storage_tip, "Store tomato at 23 Degree Celsius with 49 Humidity.");
    }
}
