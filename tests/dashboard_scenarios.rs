use chrono::{DateTime, TimeZone, Utc};
use food_dashboard::figure::Trace;
use food_dashboard::rows::{AggregatedWastageRow, UsageBreakdownRow};
use food_dashboard::schema::shape;
use food_dashboard::{transform, Dashboard, Dataset, DatasetConfig, Figure};

// ---------------------------------------------------------------------------
// Test data fixtures
// ---------------------------------------------------------------------------

const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const INVENTORY: &str = "\
item_purchased,timestamp,quantity_purchased,raw_material_wasted,cooked_food_wasted
cheese,2024-05-01 08:00:00,10,1,0
tomato,2024-05-01 08:00:00,12,4,2
cheese,2024-05-08 08:00:00,20,2,1
onion,2024-05-09 08:00:00,6,0.5,0.5
tomato,2024-06-20 08:00:00,3,5,1
";

const TICKER: &str = "\
timestamp,cheese,tomato,onion
2024-05-01 00:00:00,80,12,9
2024-05-15 00:00:00,81,12.5,9.2
2024-06-30 00:00:00,85,13,9.9
";

fn dashboard() -> Dashboard {
    Dashboard::new(Dataset::from_csv_strings(INVENTORY, TICKER, FORMAT).unwrap())
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

fn usage_value(rows: &[UsageBreakdownRow], kind: &str) -> f64 {
    rows.iter()
        .find(|r| r.food_result_type == kind)
        .map(|r| r.food_result_value)
        .unwrap_or_else(|| panic!("missing usage row {kind}"))
}

// ---------------------------------------------------------------------------
// Selection policy
// ---------------------------------------------------------------------------

#[test]
fn no_selection_blanks_every_panel() {
    let d = dashboard();
    for selection in [None, Some("")] {
        let view = d.render(selection, now()).unwrap();
        assert!(view.quantity_stats.is_empty());
        assert!(view.prediction_radar.is_empty());
        assert!(view.wastage_radar.is_empty());
        assert!(view.combined_wastage_pie.is_empty());
        assert!(view.per_item_usage_pie.is_empty());
        assert!(view.price_ticker.is_empty());
        assert_eq!(view.prediction_tip, "");
        assert_eq!(view.storage_tip, "");
    }
}

#[test]
fn unknown_item_never_errors() {
    let view = dashboard().render(Some("kale"), now()).unwrap();
    assert!(view.quantity_stats.is_empty());
    assert!(view.prediction_radar.is_empty());
    assert!(view.wastage_radar.is_empty());
    assert!(view.per_item_usage_pie.is_empty());
    assert!(view.price_ticker.is_empty());
    assert_eq!(view.prediction_tip, "");
    assert_eq!(view.storage_tip, "");
    // the global wastage pie does not depend on the item
    assert!(!view.combined_wastage_pie.is_empty());
}

#[test]
fn tomato_tips() {
    let d = dashboard();
    assert_eq!(d.prediction_tip(Some("tomato")), "Buy 10 kg less Tomato.");
    assert_eq!(
        d.storage_tip(Some("tomato")),
        "Store tomato at 23 Degree Celsius with 49 Humidity."
    );
}

#[test]
fn empty_chart_json_shape() {
    let json = dashboard().quantity_stats(Some(""), now()).unwrap().to_json().unwrap();
    assert_eq!(json, r#"{"data":[],"layout":{}}"#);
    assert_eq!(Figure::empty().to_json().unwrap(), json);
}

// ---------------------------------------------------------------------------
// Transformations
// ---------------------------------------------------------------------------

#[test]
fn cheese_usage_breakdown() {
    let ds = dashboard();
    let df = transform::usage_for_item(ds.dataset().inventory(), "cheese")
        .unwrap()
        .unwrap();
    let rows = UsageBreakdownRow::from_frame(&df).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(usage_value(&rows, "used"), 26.0);
    assert_eq!(usage_value(&rows, "raw_material_wasted"), 3.0);
    assert_eq!(usage_value(&rows, "cooked_food_wasted"), 1.0);
}

#[test]
fn usage_sums_back_to_purchased_even_when_negative() {
    let ds = dashboard();
    let df = transform::usage_for_item(ds.dataset().inventory(), "tomato")
        .unwrap()
        .unwrap();
    let rows = UsageBreakdownRow::from_frame(&df).unwrap();
    let used = usage_value(&rows, "used");
    let raw = usage_value(&rows, "raw_material_wasted");
    let cooked = usage_value(&rows, "cooked_food_wasted");
    assert_eq!(used + raw + cooked, 15.0);
    // 15 purchased, 12 wasted
    assert_eq!(used, 3.0);

    let wasteful = "\
item_purchased,timestamp,quantity_purchased,raw_material_wasted,cooked_food_wasted
onion,2024-05-01 08:00:00,2,3,1
";
    let ds = Dataset::from_csv_strings(wasteful, TICKER, FORMAT).unwrap();
    let df = transform::usage_for_item(ds.inventory(), "onion").unwrap().unwrap();
    let rows = UsageBreakdownRow::from_frame(&df).unwrap();
    assert_eq!(usage_value(&rows, "used"), -2.0);
}

#[test]
fn onion_only_wastage_has_single_row() {
    let onions = "\
item_purchased,timestamp,quantity_purchased,raw_material_wasted,cooked_food_wasted
onion,2024-05-01 08:00:00,6,1.5,0.25
onion,2024-05-02 08:00:00,4,0.5,0.75
";
    let ds = Dataset::from_csv_strings(onions, TICKER, FORMAT).unwrap();
    let rows = AggregatedWastageRow::from_frame(&transform::wastage_by_item(ds.inventory()).unwrap())
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].item_purchased, "onion");
    assert_eq!(rows[0].raw_material_wasted, 2.0);
    assert_eq!(rows[0].cooked_food_wasted, 1.0);
    assert_eq!(rows[0].total_wasted, 3.0);
}

#[test]
fn wastage_conserves_mass_across_items() {
    let d = dashboard();
    let rows =
        AggregatedWastageRow::from_frame(&transform::wastage_by_item(d.dataset().inventory()).unwrap())
            .unwrap();
    let total: f64 = rows.iter().map(|r| r.total_wasted).sum();
    // raw 1+4+2+0.5+5, cooked 0+2+1+0.5+1
    assert_eq!(total, 17.0);
    assert_eq!(rows.len(), 3);
}

#[test]
fn ticker_window_is_idempotent() {
    let d = dashboard();
    let once = transform::ticker_window(d.dataset().ticker(), now()).unwrap();
    let twice = transform::ticker_window(&once, now()).unwrap();
    assert_eq!(once.height(), 2);
    assert!(once.equals(&twice));
}

#[test]
fn subset_never_mixes_items() {
    let d = dashboard();
    for item in ["cheese", "tomato", "onion"] {
        let df = transform::subset_for_item(d.dataset().inventory(), item, now()).unwrap();
        let items = df.column("item_purchased").unwrap().str().unwrap();
        assert!(items.into_iter().all(|i| i == Some(item)));
    }
}

// ---------------------------------------------------------------------------
// Figures
// ---------------------------------------------------------------------------

#[test]
fn future_purchase_gets_open_marker() {
    let fig = dashboard().quantity_stats(Some("tomato"), now()).unwrap();
    let Trace::Scatter(purchased) = &fig.data[1] else {
        panic!("expected scatter trace");
    };
    assert_eq!(purchased.marker.symbol, vec![shape::FILLED, shape::OPEN]);
    assert_eq!(purchased.marker.color, vec!["#67BC77", "#3d7047"]);
}

#[test]
fn blank_quantity_is_not_drawn_as_zero() {
    let gappy = "\
item_purchased,timestamp,quantity_purchased,raw_material_wasted,cooked_food_wasted
cheese,2024-05-01 08:00:00,10,1,0
cheese,2024-05-08 08:00:00,,2,1
";
    let d = Dashboard::new(Dataset::from_csv_strings(gappy, TICKER, FORMAT).unwrap());
    let fig = d.quantity_stats(Some("cheese"), now()).unwrap();
    let Trace::Scatter(purchased) = &fig.data[1] else {
        panic!("expected scatter trace");
    };
    assert_eq!(purchased.y, vec![Some(10.0), None]);
}

#[test]
fn price_ticker_ignores_future_prices() {
    let fig = dashboard().price_ticker(Some("cheese"), now()).unwrap();
    let Trace::Scatter(prices) = &fig.data[0] else {
        panic!("expected scatter trace");
    };
    assert_eq!(prices.y, vec![Some(80.0), Some(81.0)]);
    assert_eq!(prices.name, "Cheese");
}

#[test]
fn render_serializes_all_panels() {
    let view = dashboard().render(Some("onion"), now()).unwrap();
    let value = serde_json::to_value(&view).unwrap();
    assert_eq!(value["per_item_usage_pie"]["data"][0]["type"], "pie");
    assert_eq!(value["prediction_radar"]["data"][0]["type"], "scatterpolar");
    assert_eq!(
        value["quantity_stats"]["layout"]["title"]["text"],
        "onion purchase history over time"
    );
    assert_eq!(value["storage_tip"], "Store onion at 25 Degree Celsius with 49 Humidity.");
}

// ---------------------------------------------------------------------------
// Bundled data directory
// ---------------------------------------------------------------------------

#[test]
fn loads_bundled_sample_data() {
    let config = DatasetConfig::with_data_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));
    let d = Dashboard::load(&config).unwrap();
    assert_eq!(d.dataset().inventory().height(), 72);
    assert_eq!(d.dataset().ticker_items(), vec!["cheese", "tomato", "onion"]);

    let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
    let fig = d.quantity_stats(Some("cheese"), now).unwrap();
    let Trace::Scatter(purchased) = &fig.data[1] else {
        panic!("expected scatter trace");
    };
    let open = purchased.marker.symbol.iter().filter(|s| *s == shape::OPEN).count();
    assert_eq!(open, 4);

    let window = transform::ticker_window(d.dataset().ticker(), now).unwrap();
    assert_eq!(window.height(), 39);
}

#[test]
fn missing_data_directory_fails_to_load() {
    let config = DatasetConfig::with_data_dir("/definitely/not/here");
    assert!(Dashboard::load(&config).is_err());
}
