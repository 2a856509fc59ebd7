/// Column-name constants for the dashboard tables.
/// Single source of truth - also exported to Python when the `python` feature is on.

// ── Inventory columns ───────────────────────────────────────────────────────
pub mod inventory {
    pub const ITEM_PURCHASED: &str = "item_purchased";
    pub const TIMESTAMP: &str = "timestamp";
    pub const QUANTITY_PURCHASED: &str = "quantity_purchased";
    pub const RAW_MATERIAL_WASTED: &str = "raw_material_wasted";
    pub const COOKED_FOOD_WASTED: &str = "cooked_food_wasted";

    pub const QUANTITIES: [&str; 3] = [QUANTITY_PURCHASED, RAW_MATERIAL_WASTED, COOKED_FOOD_WASTED];
}

// ── Ticker columns ──────────────────────────────────────────────────────────
// Every other column of the ticker table is a price column named after an item.
pub mod ticker {
    pub const TIMESTAMP: &str = "timestamp";
}

// ── Derived per-row display columns ─────────────────────────────────────────
pub mod derived {
    pub const COLOR_PURCHASED: &str = "color_purchased";
    pub const COLOR_RAW_WASTE: &str = "color_raw_waste";
    pub const COLOR_COOKED: &str = "color_cooked";
    pub const SHAPE: &str = "shape";
}

// ── Wastage aggregation columns ─────────────────────────────────────────────
pub mod wastage {
    pub const TOTAL_WASTED: &str = "total_wasted";
}

// ── Usage breakdown columns ─────────────────────────────────────────────────
pub mod usage {
    pub const AGGREGATION: &str = "index";
    pub const FOOD_RESULT_TYPE: &str = "food_result_type";
    pub const FOOD_RESULT_VALUE: &str = "food_result_value";
    pub const USED: &str = "used";
}

// ── Aggregation labels ──────────────────────────────────────────────────────
pub mod aggregation {
    pub const SUM: &str = "sum";
    pub const MEAN: &str = "mean";
}

// ── Marker symbols ──────────────────────────────────────────────────────────
pub mod shape {
    pub const FILLED: &str = "circle";
    pub const OPEN: &str = "circle-open-dot";
}
