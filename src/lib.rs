//! Data layer of the food inventory dashboard.
//!
//! Loads the inventory and price ticker tables once, shapes them per chart,
//! and builds declarative plotly figures. The [`Dashboard`] facade maps a
//! dropdown selection to figures and tips.

pub mod charts;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod factors;
pub mod figure;
pub mod palette;
pub mod rows;
pub mod schema;
pub mod tips;
pub mod transform;

#[cfg(feature = "python")]
mod python;

pub use config::DatasetConfig;
pub use dashboard::{Dashboard, DashboardView};
pub use dataset::Dataset;
pub use error::DashboardError;
pub use figure::Figure;
