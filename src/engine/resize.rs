use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::engine::bounds::{ContentBounds, PinnedGroup};
use crate::model::{Axis, Constraints, Frame, NodeError};

/// Which frame edges a resize is allowed to pull toward the content.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "lowercase")]
pub enum TrimMode {
    #[default]
    All,
    Vertical,
    Horizontal,
    Top,
    Bottom,
    Left,
    Right,
}

impl TrimMode {
    /// Whether the mode trims the leading horizontal edge.
    pub fn trims_left(self) -> bool {
        matches!(self, TrimMode::All | TrimMode::Horizontal | TrimMode::Left)
    }

    /// Whether the mode trims the leading vertical edge.
    pub fn trims_top(self) -> bool {
        matches!(self, TrimMode::All | TrimMode::Vertical | TrimMode::Top)
    }

    /// Gap axis implied by the mode. Edge-tied modes force that axis;
    /// trimming all sides leaves the axis to inference so a 2-D grid of
    /// children is not reflowed diagonally.
    pub fn gap_axis(self) -> Option<Axis> {
        match self {
            TrimMode::Horizontal | TrimMode::Left | TrimMode::Right => Some(Axis::X),
            TrimMode::Vertical | TrimMode::Top | TrimMode::Bottom => Some(Axis::Y),
            TrimMode::All => None,
        }
    }

    /// Human-readable name shown in the settings form.
    pub fn label(self) -> &'static str {
        match self {
            TrimMode::All => "All sides",
            TrimMode::Vertical => "Top and Bottom",
            TrimMode::Horizontal => "Left and Right",
            TrimMode::Top => "Top",
            TrimMode::Right => "Right",
            TrimMode::Bottom => "Bottom",
            TrimMode::Left => "Left",
        }
    }
}

/// Resizes and repositions the frame so its edges sit `padding` away from
/// the content on every trimmed side, while children keep their absolute
/// position and size. Child constraints are neutralized for the duration
/// and restored on every exit path.
pub fn apply_bounds(
    frame: &mut Frame,
    mode: TrimMode,
    content: &ContentBounds,
    padding: f64,
) -> Result<(), NodeError> {
    let frozen = freeze_child_constraints(frame);
    let snapshot = capture_child_geometry(frame);
    let result = resize_frame(frame, mode, content, padding, &snapshot);
    restore_child_constraints(frame, &frozen);
    result
}

fn resize_frame(
    frame: &mut Frame,
    mode: TrimMode,
    content: &ContentBounds,
    padding: f64,
    snapshot: &[GeometrySnapshot],
) -> Result<(), NodeError> {
    let old_width = frame.width();
    let old_height = frame.height();
    let bounds = content.bounds;
    let pinned = content.bottom_pinned.as_ref();

    let mut new_width = old_width;
    let mut new_height = old_height;

    match mode {
        TrimMode::All | TrimMode::Horizontal => new_width = bounds.width() + padding * 2.0,
        TrimMode::Left => new_width = old_width - bounds.min_x + padding,
        TrimMode::Right => new_width = bounds.max_x + padding,
        TrimMode::Vertical | TrimMode::Top | TrimMode::Bottom => {}
    }

    match mode {
        TrimMode::All | TrimMode::Vertical => new_height = bounds.height() + padding * 2.0,
        TrimMode::Top => new_height = old_height - bounds.min_y + padding,
        TrimMode::Bottom => {
            // The pinned group keeps its own height and is appended after
            // the rest of the content, decoupled from its original Y.
            new_height = match pinned {
                Some(group) => {
                    content.max_y_unpinned.unwrap_or(0.0) + group.span().max(0.0) + padding
                }
                None => bounds.max_y + padding,
            };
        }
        TrimMode::Horizontal | TrimMode::Left | TrimMode::Right => {}
    }

    let new_width = new_width.max(1.0);
    let new_height = new_height.max(1.0);

    let new_x = if mode.trims_left() { frame.x + bounds.min_x - padding } else { frame.x };
    let new_y = if mode.trims_top() { frame.y + bounds.min_y - padding } else { frame.y };

    frame.resize_without_constraints(new_width, new_height)?;
    frame.x = new_x;
    frame.y = new_y;
    restore_child_geometry(frame, snapshot);

    if mode == TrimMode::Bottom {
        if let Some(group) = pinned {
            reanchor_pinned_group(frame, group, new_height, padding)?;
        }
    }
    Ok(())
}

struct FrozenConstraints {
    index: usize,
    constraints: Constraints,
}

fn freeze_child_constraints(frame: &mut Frame) -> Vec<FrozenConstraints> {
    let mut frozen = Vec::new();
    for (index, child) in frame.children.iter_mut().enumerate() {
        let Some(current) = child.constraints else {
            continue;
        };
        frozen.push(FrozenConstraints { index, constraints: current });
        // Children that refuse the neutral constraint are left as they are.
        let _ = child.set_constraints(Constraints::NEUTRAL);
    }
    frozen
}

fn restore_child_constraints(frame: &mut Frame, frozen: &[FrozenConstraints]) {
    for item in frozen {
        let _ = frame.children[item.index].set_constraints(item.constraints);
    }
}

struct GeometrySnapshot {
    index: usize,
    abs_x: f64,
    abs_y: f64,
    size: Option<(f64, f64)>,
}

/// Records each positioned child's absolute position (and size, when the
/// child is resizable) against the frame's current origin.
fn capture_child_geometry(frame: &Frame) -> Vec<GeometrySnapshot> {
    let frame_x = frame.x;
    let frame_y = frame.y;
    let mut snapshot = Vec::new();
    for (index, child) in frame.children.iter().enumerate() {
        let Some(pos) = child.position() else {
            continue;
        };
        let size = if child.is_resizable() { child.size() } else { None };
        snapshot.push(GeometrySnapshot {
            index,
            abs_x: frame_x + pos.x,
            abs_y: frame_y + pos.y,
            size,
        });
    }
    snapshot
}

/// Reassigns frame-relative coordinates from the recorded absolute ones
/// so the frame's own movement is counteracted. Sizes are restored only
/// when they drifted, to avoid spurious host round trips.
fn restore_child_geometry(frame: &mut Frame, snapshot: &[GeometrySnapshot]) {
    let frame_x = frame.x;
    let frame_y = frame.y;
    for item in snapshot {
        let child = &mut frame.children[item.index];
        let _ = child.set_position(item.abs_x - frame_x, item.abs_y - frame_y);

        if let (Some((width, height)), Some((current_w, current_h))) = (item.size, child.size()) {
            let target_w = width.max(1.0);
            let target_h = height.max(1.0);
            if (current_w - target_w).abs() > 0.01 || (current_h - target_h).abs() > 0.01 {
                let _ = child.resize_without_constraints(target_w, target_h);
            }
        }
    }
}

/// Shifts the whole pinned group so its lowest edge sits at
/// `new_height - padding`, instead of relying on the host's constraint
/// system to do it.
fn reanchor_pinned_group(
    frame: &mut Frame,
    group: &PinnedGroup,
    new_height: f64,
    padding: f64,
) -> Result<(), NodeError> {
    let mut current_bottom = f64::NEG_INFINITY;
    for &index in &group.children {
        let child = &frame.children[index];
        if let (Some(pos), Some((_, height))) = (child.position(), child.size()) {
            current_bottom = current_bottom.max(pos.y + height);
        }
    }
    if !current_bottom.is_finite() {
        return Ok(());
    }

    let dy = (new_height - padding) - current_bottom;
    if dy != 0.0 {
        for &index in &group.children {
            frame.children[index].shift_along(Axis::Y, dy)?;
        }
    }
    Ok(())
}
