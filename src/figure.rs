//! Declarative chart description, serialized as plotly figure JSON.
//!
//! A [`Figure`] is data, not a rendered artifact: the view layer hands the
//! JSON to plotly as-is. `None` fields are left out of the JSON, so the
//! empty chart is `{"data":[],"layout":{}}`.
use serde::Serialize;

use crate::error::DashboardError;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    /// The canonical "no data to show" chart.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn to_json(&self) -> Result<String, DashboardError> {
        Ok(serde_json::to_string(self)?)
    }
}

// ── Traces ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter(ScatterTrace),
    Scatterpolar(PolarTrace),
    Pie(PieTrace),
}

/// Time series trace; `x` holds formatted timestamps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterTrace {
    pub name: String,
    pub mode: String,
    pub x: Vec<String>,
    pub y: Vec<Option<f64>>,
    pub marker: PointMarker,
    pub line: Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointMarker {
    pub size: u32,
    pub color: Vec<String>,
    pub symbol: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolarTrace {
    pub name: String,
    pub r: Vec<f64>,
    pub theta: Vec<String>,
    pub fill: String,
    pub fillcolor: String,
    pub line: Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieTrace {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub hoverinfo: String,
    pub textinfo: String,
    pub pull: f64,
    pub hole: f64,
    pub textfont: Font,
    pub marker: SliceMarker,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliceMarker {
    pub colors: Vec<String>,
    pub line: Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

impl Line {
    pub fn colored(color: &str) -> Self {
        Self {
            color: color.to_string(),
            width: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Font {
    pub size: u32,
}

// ── Layout ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polar: Option<Polar>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
    pub font: Font,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<AxisTitle>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub axis_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rangeselector: Option<RangeSelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rangeslider: Option<RangeSlider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTitle {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSelector {
    pub buttons: Vec<RangeButton>,
}

/// A range selector button; `step: "all"` carries no count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeButton {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub step: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stepmode: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RangeSlider {}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polar {
    pub radialaxis: Axis,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_figure_serializes_bare() {
        let value = serde_json::to_value(Figure::empty()).unwrap();
        assert_eq!(value, json!({"data": [], "layout": {}}));
        assert!(Figure::empty().is_empty());
    }

    #[test]
    fn trace_carries_plotly_type_tag() {
        let trace = Trace::Pie(PieTrace {
            labels: vec!["onion".into()],
            values: vec![1.5],
            hoverinfo: "value".into(),
            textinfo: "label+percent".into(),
            pull: 0.04,
            hole: 0.35,
            textfont: Font { size: 15 },
            marker: SliceMarker {
                colors: vec!["#fff".into()],
                line: Line::colored("#000000"),
            },
        });
        let value = serde_json::to_value(&trace).unwrap();
        assert_eq!(value["type"], "pie");
        assert_eq!(value["marker"]["line"], json!({"color": "#000000"}));
    }

    #[test]
    fn axis_type_is_renamed() {
        let axis = Axis {
            axis_type: Some("date".into()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&axis).unwrap(), json!({"type": "date"}));
    }
}
