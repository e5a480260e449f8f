use crate::engine::gaps::GapEntry;
use crate::model::{Axis, Frame, LayoutMode};

/// Gap axis for a frame. An explicit stacking direction wins; otherwise
/// whichever axis spreads the entries' start coordinates further, with
/// ties going to vertical.
pub fn primary_axis(frame: &Frame, entries: &[GapEntry]) -> Axis {
    match frame.layout_mode {
        LayoutMode::Horizontal => return Axis::X,
        LayoutMode::Vertical => return Axis::Y,
        LayoutMode::None => {}
    }

    let mut min_start_x = f64::INFINITY;
    let mut max_start_x = f64::NEG_INFINITY;
    let mut min_start_y = f64::INFINITY;
    let mut max_start_y = f64::NEG_INFINITY;

    for entry in entries {
        min_start_x = min_start_x.min(entry.bounds.min_x);
        max_start_x = max_start_x.max(entry.bounds.min_x);
        min_start_y = min_start_y.min(entry.bounds.min_y);
        max_start_y = max_start_y.max(entry.bounds.min_y);
    }

    let spread_x = max_start_x - min_start_x;
    let spread_y = max_start_y - min_start_y;
    if spread_y >= spread_x { Axis::Y } else { Axis::X }
}
