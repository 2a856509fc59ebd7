//! Chart builders: shaped rows in, [`Figure`] out.
//!
//! Builders only map fields; every table they read was produced by
//! `transform`. An empty input yields [`Figure::empty`].
use chrono::{DateTime, Utc};

use crate::factors::{self, FactorTable};
use crate::figure::*;
use crate::palette::*;
use crate::rows::{AggregatedWastageRow, DerivedInventoryRow, PricePoint, UsageBreakdownRow};
use crate::schema::{inventory, shape, usage};

const QUANTITY_CHART_HEIGHT: u32 = 920;
const MARKER_SIZE: u32 = 11;
const RADAR_RANGE: [f64; 2] = [0.0, 5.0];
const PIE_HOLE: f64 = 0.35;
const PIE_PULL: f64 = 0.04;
const SLICE_OUTLINE_WIDTH: f64 = 2.0;

// ── Time series ─────────────────────────────────────────────────────────────

/// Purchase history of one item: purchased, raw waste and cooked waste over
/// time, with per-point colors and marker shapes from the derived columns.
pub fn quantity_statistics(rows: &[DerivedInventoryRow]) -> Figure {
    let Some(first) = rows.first() else {
        return Figure::empty();
    };

    let purchased = time_trace(
        rows,
        "Purchased",
        PURCHASED_COLOR_LIGHT,
        |r| r.quantity_purchased,
        |r| &r.color_purchased,
    );
    let raw_waste = time_trace(
        rows,
        "Raw Waste",
        RAW_WASTE_COLOR_LIGHT,
        |r| r.raw_material_wasted,
        |r| &r.color_raw_waste,
    );
    let cooked = time_trace(
        rows,
        "Cooked Waste",
        COOKED_COLOR_LIGHT,
        |r| r.cooked_food_wasted,
        |r| &r.color_cooked,
    );

    Figure {
        data: vec![cooked, purchased, raw_waste],
        layout: Layout {
            title: Some(title(format!(
                "{} purchase history over time",
                first.item_purchased
            ))),
            height: Some(QUANTITY_CHART_HEIGHT),
            xaxis: Some(date_axis_with_range_selector()),
            yaxis: Some(axis_titled("Quantity in kg")),
            ..Default::default()
        },
    }
}

fn time_trace(
    rows: &[DerivedInventoryRow],
    name: &str,
    line_color: &str,
    value: impl Fn(&DerivedInventoryRow) -> Option<f64>,
    color: impl Fn(&DerivedInventoryRow) -> &String,
) -> Trace {
    Trace::Scatter(ScatterTrace {
        name: name.to_string(),
        mode: "lines+markers".to_string(),
        x: rows.iter().map(|r| format_timestamp(r.timestamp)).collect(),
        y: rows.iter().map(|r| value(r)).collect(),
        marker: PointMarker {
            size: MARKER_SIZE,
            color: rows.iter().map(|r| color(r).clone()).collect(),
            symbol: rows.iter().map(|r| r.shape.clone()).collect(),
        },
        line: Line::colored(line_color),
    })
}

fn date_axis_with_range_selector() -> Axis {
    let back = |count: u32, label: &str, step: &str| RangeButton {
        count: Some(count),
        label: Some(label.to_string()),
        step: step.to_string(),
        stepmode: Some("backward".to_string()),
    };
    Axis {
        axis_type: Some("date".to_string()),
        rangeselector: Some(RangeSelector {
            buttons: vec![
                back(14, "14d", "day"),
                back(1, "1m", "month"),
                back(2, "2m", "month"),
                back(3, "3m", "month"),
                back(6, "6m", "month"),
                RangeButton {
                    count: None,
                    label: None,
                    step: "all".to_string(),
                    stepmode: None,
                },
            ],
        }),
        rangeslider: Some(RangeSlider::default()),
        ..Default::default()
    }
}

/// Current price of one item from the windowed ticker.
pub fn price_ticker(points: &[PricePoint], item: &str) -> Figure {
    if points.is_empty() {
        return Figure::empty();
    }

    let trace = Trace::Scatter(ScatterTrace {
        name: title_case(item),
        mode: "lines+markers".to_string(),
        x: points.iter().map(|p| format_timestamp(p.timestamp)).collect(),
        y: points.iter().map(|p| p.price).collect(),
        marker: PointMarker {
            size: MARKER_SIZE,
            color: vec![USED_COLOR.to_string(); points.len()],
            symbol: vec![shape::FILLED.to_string(); points.len()],
        },
        line: Line::colored(USED_COLOR),
    });

    Figure {
        data: vec![trace],
        layout: Layout {
            title: Some(title(format!("Current price of {item}"))),
            showlegend: Some(false),
            yaxis: Some(axis_titled("Price in HKD")),
            ..Default::default()
        },
    }
}

// ── Radar ───────────────────────────────────────────────────────────────────

pub fn prediction_radar(item: &str) -> Figure {
    match factors::prediction_factors(item) {
        Some(table) => radar(
            table,
            "Prediction Factors",
            PURCHASED_COLOR,
            PURCHASED_COLOR_DARK,
            "Inventory Forecast Variables",
        ),
        None => Figure::empty(),
    }
}

pub fn wastage_radar(item: &str) -> Figure {
    match factors::wastage_factors(item) {
        Some(table) => radar(
            table,
            "Wastage Factors",
            RAW_WASTE_COLOR,
            RAW_WASTE_COLOR_DARK,
            "Raw Food Wastage Variables",
        ),
        None => Figure::empty(),
    }
}

fn radar(table: FactorTable, name: &str, fill: &str, line: &str, chart_title: &str) -> Figure {
    let trace = Trace::Scatterpolar(PolarTrace {
        name: name.to_string(),
        r: table.iter().map(|(_, score)| f64::from(*score)).collect(),
        theta: table.iter().map(|(axis, _)| axis.to_string()).collect(),
        fill: "toself".to_string(),
        fillcolor: fill.to_string(),
        line: Line::colored(line),
    });

    Figure {
        data: vec![trace],
        layout: Layout {
            title: Some(title(chart_title.to_string())),
            showlegend: Some(false),
            polar: Some(Polar {
                radialaxis: Axis {
                    visible: Some(true),
                    range: Some(RADAR_RANGE),
                    ..Default::default()
                },
            }),
            ..Default::default()
        },
    }
}

// ── Pie ─────────────────────────────────────────────────────────────────────

/// Share of total waste per item.
pub fn combined_wastage_pie(rows: &[AggregatedWastageRow]) -> Figure {
    if rows.is_empty() {
        return Figure::empty();
    }
    let trace = pie(
        rows.iter().map(|r| r.item_purchased.clone()).collect(),
        rows.iter().map(|r| r.total_wasted).collect(),
        rows.iter()
            .map(|r| food_color(&r.item_purchased).unwrap_or(USED_COLOR).to_string())
            .collect(),
    );
    pie_figure(trace, "Wastage per item (kg)".to_string())
}

/// Used vs wasted split for one item.
pub fn per_item_usage_pie(rows: &[UsageBreakdownRow], item: &str) -> Figure {
    if rows.is_empty() {
        return Figure::empty();
    }
    let trace = pie(
        rows.iter()
            .map(|r| usage_label(&r.food_result_type).to_string())
            .collect(),
        rows.iter().map(|r| r.food_result_value).collect(),
        rows.iter()
            .map(|r| usage_color(&r.food_result_type).to_string())
            .collect(),
    );
    pie_figure(trace, format!("Usage/Wastage of {item}"))
}

/// Display name of a usage breakdown row.
pub fn usage_label(food_result_type: &str) -> &'static str {
    match food_result_type {
        usage::USED => "Used",
        inventory::RAW_MATERIAL_WASTED => "Raw Material Wasted",
        inventory::COOKED_FOOD_WASTED => "Cooked Food Wasted",
        _ => "Total Purchase",
    }
}

/// Slice color of a usage breakdown row.
pub fn usage_color(food_result_type: &str) -> &'static str {
    match food_result_type {
        usage::USED => USED_COLOR,
        inventory::RAW_MATERIAL_WASTED => RAW_WASTE_COLOR,
        inventory::COOKED_FOOD_WASTED => COOKED_COLOR,
        _ => PURCHASED_COLOR,
    }
}

fn pie(labels: Vec<String>, values: Vec<f64>, colors: Vec<String>) -> Trace {
    Trace::Pie(PieTrace {
        labels,
        values,
        hoverinfo: "value".to_string(),
        textinfo: "label+percent".to_string(),
        pull: PIE_PULL,
        hole: PIE_HOLE,
        textfont: Font {
            size: TEXT_FONT_SIZE,
        },
        marker: SliceMarker {
            colors,
            line: Line {
                color: SLICE_OUTLINE_COLOR.to_string(),
                width: Some(SLICE_OUTLINE_WIDTH),
            },
        },
    })
}

fn pie_figure(trace: Trace, chart_title: String) -> Figure {
    Figure {
        data: vec![trace],
        layout: Layout {
            title: Some(title(chart_title)),
            showlegend: Some(false),
            ..Default::default()
        },
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn title(text: String) -> Title {
    Title {
        text,
        font: Font {
            size: TITLE_FONT_SIZE,
        },
    }
}

fn axis_titled(text: &str) -> Axis {
    Axis {
        title: Some(AxisTitle {
            text: text.to_string(),
        }),
        ..Default::default()
    }
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}
