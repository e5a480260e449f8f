pub mod axis;
pub mod bounds;
pub mod gaps;
pub mod resize;
pub mod selection;

pub use axis::primary_axis;
pub use bounds::{ContentBounds, PinnedGroup, child_bounds, content_bounds};
pub use gaps::{GapEntry, collapse_consecutive_gaps, collapse_last_gap, ordered_gap_entries};
pub use resize::{TrimMode, apply_bounds};
pub use selection::{
    GapPass, RELAUNCH_KEY, RELAUNCH_LABEL, ResizeSummary, resize_selected_frames,
};
