//! Static text tips shown next to the item dropdown.

/// Purchasing advice; empty for unknown items.
pub fn prediction_tip(item: &str) -> &'static str {
    match item {
        "cheese" => "Buy 12 kg less Cheese.",
        "tomato" => "Buy 10 kg less Tomato.",
        "onion" => "Buy 14 kg less Onion.",
        _ => "",
    }
}

/// Storage advice; empty for unknown items.
pub fn storage_tip(item: &str) -> &'static str {
    match item {
        "cheese" => "Store cheese at 16 Degree Celsius with 42 Humidity.",
        "tomato" => "Store tomato at 23 Degree Celsius with 49 Humidity.",
        "onion" => "Store onion at 25 Degree Celsius with 49 Humidity.",
        _ => "",
    }
}
