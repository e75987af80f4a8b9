//! Snapping a dragged angle onto the key-angle grid.

use std::f64::consts::PI;

use super::SNAP_GRID;

/// Default snap threshold: 5° either side of a grid entry.
pub const DEFAULT_THRESHOLD: f64 = PI / 36.0;

/// Snap `radians` to the first grid entry within `threshold`, scanning the
/// grid in ascending order; unchanged if nothing qualifies.
///
/// The winner is the first match in table order, not the nearest entry.
/// With a 15°-spaced grid and a sub-7.5° threshold at most one entry can
/// qualify, so the two rules agree today; the table order rule is still the
/// contract, pinned by `first_match_wins_over_nearest` below.
pub fn snap(radians: f64, threshold: f64) -> f64 {
    for &key in SNAP_GRID.iter() {
        if (key - radians).abs() < threshold {
            return key;
        }
    }
    radians
}
