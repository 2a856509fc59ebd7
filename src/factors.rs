//! Hardcoded radar-chart factor scores per food item.
//!
//! Each table is an ordered list of `(axis name, score)` with scores in 1..=5.

pub type FactorTable = &'static [(&'static str, u8)];

const PREDICTION_FACTORS_CHEESE: FactorTable = &[
    ("Spoilage Factors", 4),
    ("Outside Weather", 4),
    ("World Events", 3),
    ("Volatility Factor", 4),
    ("T-1 Factor", 3),
];

const PREDICTION_FACTORS_TOMATO: FactorTable = &[
    ("Spoilage Factors", 3),
    ("Outside Weather", 3),
    ("World Events", 4),
    ("Volatility Factor", 3),
    ("T-1 Factor", 4),
];

const PREDICTION_FACTORS_ONION: FactorTable = &[
    ("Spoilage Factors", 2),
    ("Outside Weather", 3),
    ("World Events", 3),
    ("Volatility Factor", 2),
    ("T-1 Factor", 2),
];

const WASTAGE_FACTORS_CHEESE: FactorTable = &[
    ("Storage Temperature", 4),
    ("Storage Pressure", 3),
    ("Storage Humidity", 4),
    ("Outside Weather", 3),
    ("Storage Life", 4),
];

const WASTAGE_FACTORS_TOMATO: FactorTable = &[
    ("Storage Temperature", 3),
    ("Storage Pressure", 3),
    ("Storage Humidity", 3),
    ("Outside Weather", 2),
    ("Storage Life", 2),
];

const WASTAGE_FACTORS_ONION: FactorTable = &[
    ("Storage Temperature", 2),
    ("Storage Pressure", 2),
    ("Storage Humidity", 3),
    ("Outside Weather", 4),
    ("Storage Life", 1),
];

/// Inventory forecast variables for an item, `None` for unknown items.
pub fn prediction_factors(item: &str) -> Option<FactorTable> {
    match item {
        "cheese" => Some(PREDICTION_FACTORS_CHEESE),
        "tomato" => Some(PREDICTION_FACTORS_TOMATO),
        "onion" => Some(PREDICTION_FACTORS_ONION),
        _ => None,
    }
}

/// Raw food wastage variables for an item, `None` for unknown items.
pub fn wastage_factors(item: &str) -> Option<FactorTable> {
    match item {
        "cheese" => Some(WASTAGE_FACTORS_CHEESE),
        "tomato" => Some(WASTAGE_FACTORS_TOMATO),
        "onion" => Some(WASTAGE_FACTORS_ONION),
        _ => None,
    }
}
