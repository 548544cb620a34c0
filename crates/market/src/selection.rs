//! Crop Selection
//!
//! Orders the commodity set so a farmer's own crops come first, then
//! backfills from the static table in table order, capped at the
//! configured listing size.

use kisan_agent_config::{CommodityBasePrice, CommodityTable};

/// Case-insensitive substring match in either direction, with blank
/// inputs never matching.
pub fn matches_name(listed: &str, crop: &str) -> bool {
    let listed = listed.trim().to_lowercase();
    let crop = crop.trim().to_lowercase();
    if listed.is_empty() || crop.is_empty() {
        return false;
    }
    listed.contains(&crop) || crop.contains(&listed)
}

/// Select commodities for a listing: farmer crops first (in static-table
/// order), then the rest of the table, at most `cap` entries.
pub fn select<'a>(
    table: &'a CommodityTable,
    crops: &[String],
    cap: usize,
) -> Vec<&'a CommodityBasePrice> {
    let mut selected: Vec<&CommodityBasePrice> = Vec::new();

    for entry in table.iter() {
        if selected.len() >= cap {
            break;
        }
        if crops.iter().any(|crop| matches_name(&entry.name, crop)) {
            selected.push(entry);
        }
    }

    for entry in table.iter() {
        if selected.len() >= cap {
            break;
        }
        if !selected.iter().any(|s| std::ptr::eq(*s, entry)) {
            selected.push(entry);
        }
    }

    selected
}
