//! Fixed display constants: item list, colors and font sizes.

pub const FOOD_ITEMS: [&str; 3] = ["cheese", "tomato", "onion"];

pub const PURCHASED_COLOR: &str = "#67BC77";
pub const PURCHASED_COLOR_DARK: &str = "#3d7047";
pub const PURCHASED_COLOR_LIGHT: &str = "#a3d6ad";

pub const COOKED_COLOR: &str = "#3D5467";
pub const COOKED_COLOR_DARK: &str = "#8a98a3";
pub const COOKED_COLOR_LIGHT: &str = "#24323d";

pub const RAW_WASTE_COLOR: &str = "#db5461";
pub const RAW_WASTE_COLOR_LIGHT: &str = "#83323a";
pub const RAW_WASTE_COLOR_DARK: &str = "#e998a0";

pub const USED_COLOR: &str = "#4E4F4A";

pub const SLICE_OUTLINE_COLOR: &str = "#000000";

pub const TEXT_FONT_SIZE: u32 = 15;
pub const TITLE_FONT_SIZE: u32 = 20;

/// Pie slice shades, indexed by the item's position in `FOOD_ITEMS`.
const ITEM_SHADES: [&str; 3] = ["#f4d35e", "#ee964b", "#7a9e7e"];

/// Slice color for an item in the combined wastage pie.
pub fn food_color(item: &str) -> Option<&'static str> {
    FOOD_ITEMS
        .iter()
        .position(|&known| known == item)
        .map(|i| ITEM_SHADES[i % ITEM_SHADES.len()])
}

/// Dropdown options as `(label, value)` pairs.
pub fn food_item_options() -> Vec<(&'static str, &'static str)> {
    FOOD_ITEMS.iter().map(|&item| (item, item)).collect()
}

/// Item selected when the dashboard first opens.
pub fn default_item() -> &'static str {
    FOOD_ITEMS[0]
}

/// Display name of an item: first letter of every word upper-cased, the
/// rest lower-cased. Item names are plain ASCII words, so a letter starts a
/// word whenever the previous character is not a letter.
pub fn title_case(item: &str) -> String {
    let mut out = String::with_capacity(item.len());
    let mut at_word_start = true;
    for c in item.chars() {
        if c.is_ascii_alphabetic() {
            out.push(if at_word_start {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            });
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
