use crate::engine::axis::primary_axis;
use crate::engine::bounds::child_bounds;
use crate::model::{Axis, Bounds, Frame};

/// A visible, measurable child paired with its frame-local bounds.
/// `index` points into `Frame::children`.
#[derive(Debug, Clone, PartialEq)]
pub struct GapEntry {
    pub index: usize,
    pub bounds: Bounds,
}

/// Visible measurable children sorted ascending by (start, end) along the
/// resolved axis; this total order defines adjacency for gap walking.
/// `None` when fewer than two children can be measured.
pub fn ordered_gap_entries(
    frame: &Frame,
    axis_hint: Option<Axis>,
) -> Option<(Axis, Vec<GapEntry>)> {
    let mut entries: Vec<GapEntry> = frame
        .children
        .iter()
        .enumerate()
        .filter_map(|(index, child)| {
            child_bounds(child, frame).map(|bounds| GapEntry { index, bounds })
        })
        .collect();

    if entries.len() < 2 {
        return None;
    }
    let axis = axis_hint.unwrap_or_else(|| primary_axis(frame, &entries));

    entries.sort_by(|a, b| {
        a.bounds
            .start(axis)
            .total_cmp(&b.bounds.start(axis))
            .then_with(|| a.bounds.end(axis).total_cmp(&b.bounds.end(axis)))
    });

    Some((axis, entries))
}

/// Moves the last-ordered child so its gap to the previous entry equals
/// `target_gap`. Overlapping neighbours abort the operation untouched.
/// When the move cannot be applied, falls back to the frame's shared
/// spacing. Reports whether anything changed.
pub fn collapse_last_gap(frame: &mut Frame, target_gap: f64, axis_hint: Option<Axis>) -> bool {
    let Some((axis, entries)) = ordered_gap_entries(frame, axis_hint) else {
        return false;
    };

    let last = &entries[entries.len() - 1];
    let prev = &entries[entries.len() - 2];
    let gap = last.bounds.start(axis) - prev.bounds.end(axis);
    if gap < 0.0 {
        return false;
    }
    let delta = target_gap - gap;
    if delta == 0.0 {
        return false;
    }

    let index = last.index;
    match frame.children[index].shift_along(axis, delta) {
        Ok(()) => true,
        Err(_) => set_spacing_if_changed(frame, target_gap),
    }
}

/// Normalizes every non-overlapping adjacent gap along the axis to
/// `target_gap`. Later entries are shifted cumulatively so each pair is
/// measured against its already-corrected neighbour, and overlapping
/// pairs are left overlapping as-is. When any move cannot be applied the
/// whole pass aborts and the shared spacing is capped instead.
pub fn collapse_consecutive_gaps(
    frame: &mut Frame,
    target_gap: f64,
    axis_hint: Option<Axis>,
) -> bool {
    let Some((axis, entries)) = ordered_gap_entries(frame, axis_hint) else {
        return false;
    };

    let mut changed = false;
    let mut cumulative_shift = 0.0;
    let mut prev_end = entries[0].bounds.end(axis);

    for entry in &entries[1..] {
        let start = entry.bounds.start(axis) + cumulative_shift;
        let end = entry.bounds.end(axis) + cumulative_shift;
        let gap = start - prev_end;
        if gap < 0.0 {
            prev_end = prev_end.max(end);
            continue;
        }

        let mut delta = 0.0;
        if gap != target_gap {
            delta = target_gap - gap;
            cumulative_shift += delta;
            changed = true;
        }

        if cumulative_shift != 0.0
            && frame.children[entry.index]
                .shift_along(axis, cumulative_shift)
                .is_err()
        {
            return cap_spacing(frame, target_gap);
        }

        prev_end = end + delta;
    }

    changed
}

/// Shared-spacing fallback for hosts that manage child positions
/// themselves. Sets the spacing whenever it differs from the target.
fn set_spacing_if_changed(frame: &mut Frame, target_gap: f64) -> bool {
    if !frame.supports_item_spacing() {
        return false;
    }
    let had_change = frame.item_spacing() != Some(target_gap);
    if frame.set_item_spacing(target_gap).is_err() {
        return false;
    }
    had_change
}

/// Spacing fallback for the multi-gap pass. A single scalar cannot widen
/// individual gaps, so the spacing is only ever tightened.
fn cap_spacing(frame: &mut Frame, target_gap: f64) -> bool {
    if !frame.supports_item_spacing() {
        return false;
    }
    match frame.item_spacing() {
        Some(current) if current > target_gap => frame.set_item_spacing(target_gap).is_ok(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChildNode, LayoutMode, Point};

    fn row_frame(spans: &[(f64, f64)]) -> Frame {
        let mut frame = Frame::new("frame", 0.0, 0.0, 500.0, 100.0);
        for (i, &(start, end)) in spans.iter().enumerate() {
            frame.children.push(ChildNode::placed(
                &format!("child-{i}"),
                start,
                0.0,
                end - start,
                10.0,
            ));
        }
        frame
    }

    fn x_positions(frame: &Frame) -> Vec<f64> {
        frame
            .children
            .iter()
            .map(|c| c.position().unwrap().x)
            .collect()
    }

    #[test]
    fn entries_sort_by_start_then_end() {
        let mut frame = Frame::new("frame", 0.0, 0.0, 500.0, 100.0);
        frame.children.push(ChildNode::placed("wide", 5.0, 0.0, 30.0, 10.0));
        frame.children.push(ChildNode::placed("late", 50.0, 0.0, 10.0, 10.0));
        frame.children.push(ChildNode::placed("narrow", 5.0, 0.0, 10.0, 10.0));

        let (axis, entries) = ordered_gap_entries(&frame, Some(Axis::X)).unwrap();
        assert_eq!(axis, Axis::X);
        assert_eq!(
            entries.iter().map(|e| e.index).collect::<Vec<_>>(),
            vec![2, 0, 1],
            "same start orders the shorter child first"
        );
    }

    #[test]
    fn fewer_than_two_measurable_children_is_a_no_op() {
        let mut frame = row_frame(&[(0.0, 10.0)]);
        frame.children.push(ChildNode::bare("ghost"));

        assert_eq!(ordered_gap_entries(&frame, None), None);
        assert!(!collapse_last_gap(&mut frame, 0.0, None));
        assert!(!collapse_consecutive_gaps(&mut frame, 0.0, None));
    }

    #[test]
    fn collapse_last_shifts_only_the_final_child() {
        // Middle child ends at 10, last starts at 15: gap 5, target 2.
        let mut frame = row_frame(&[(-20.0, -10.0), (0.0, 10.0), (15.0, 25.0)]);
        assert!(collapse_last_gap(&mut frame, 2.0, Some(Axis::X)));
        assert_eq!(x_positions(&frame), vec![-20.0, 0.0, 12.0]);
    }

    #[test]
    fn collapse_last_can_widen_a_tight_gap() {
        let mut frame = row_frame(&[(0.0, 10.0), (11.0, 20.0)]);
        assert!(collapse_last_gap(&mut frame, 6.0, Some(Axis::X)));
        assert_eq!(x_positions(&frame), vec![0.0, 16.0]);
    }

    #[test]
    fn collapse_last_leaves_overlapping_pair_alone() {
        let mut frame = row_frame(&[(0.0, 10.0), (8.0, 20.0)]);
        assert!(!collapse_last_gap(&mut frame, 2.0, Some(Axis::X)));
        assert_eq!(x_positions(&frame), vec![0.0, 8.0]);
    }

    #[test]
    fn collapse_last_at_target_reports_no_change() {
        let mut frame = row_frame(&[(0.0, 10.0), (12.0, 20.0)]);
        assert!(!collapse_last_gap(&mut frame, 2.0, Some(Axis::X)));
    }

    #[test]
    fn collapse_last_works_vertically() {
        let mut frame = Frame::new("frame", 0.0, 0.0, 100.0, 500.0);
        frame.children.push(ChildNode::placed("a", 0.0, 0.0, 10.0, 10.0));
        frame.children.push(ChildNode::placed("b", 0.0, 30.0, 10.0, 10.0));

        assert!(collapse_last_gap(&mut frame, 4.0, Some(Axis::Y)));
        assert_eq!(frame.children[1].position(), Some(Point::new(0.0, 14.0)));
    }

    #[test]
    fn collapse_last_falls_back_to_spacing_when_child_is_immovable() {
        let mut frame = row_frame(&[(0.0, 10.0), (15.0, 25.0)]).with_item_spacing(5.0);
        frame.layout_mode = LayoutMode::Horizontal;
        frame.children[1].locked = true;

        assert!(collapse_last_gap(&mut frame, 2.0, Some(Axis::X)));
        assert_eq!(frame.item_spacing(), Some(2.0));
        assert_eq!(x_positions(&frame), vec![0.0, 15.0]);
    }

    #[test]
    fn spacing_fallback_reports_no_change_when_already_at_target() {
        let mut frame = row_frame(&[(0.0, 10.0), (15.0, 25.0)]).with_item_spacing(2.0);
        frame.layout_mode = LayoutMode::Horizontal;
        frame.children[1].locked = true;

        assert!(!collapse_last_gap(&mut frame, 2.0, Some(Axis::X)));
    }

    #[test]
    fn collapse_last_without_spacing_support_gives_up() {
        let mut frame = row_frame(&[(0.0, 10.0), (15.0, 25.0)]);
        frame.children[1].locked = true;

        assert!(!collapse_last_gap(&mut frame, 2.0, Some(Axis::X)));
        assert_eq!(x_positions(&frame), vec![0.0, 15.0]);
    }

    #[test]
    fn consecutive_normalizes_each_gap_cumulatively() {
        let mut frame = row_frame(&[(0.0, 10.0), (15.0, 25.0), (40.0, 50.0)]);
        assert!(collapse_consecutive_gaps(&mut frame, 2.0, Some(Axis::X)));
        assert_eq!(x_positions(&frame), vec![0.0, 12.0, 24.0]);
    }

    #[test]
    fn consecutive_preserves_overlaps() {
        let mut frame = row_frame(&[(0.0, 10.0), (5.0, 8.0), (20.0, 30.0)]);
        assert!(collapse_consecutive_gaps(&mut frame, 3.0, Some(Axis::X)));
        // The contained child keeps its overlap; only the trailing gap
        // (20 - 10 = 10) is normalized to 3.
        assert_eq!(x_positions(&frame), vec![0.0, 5.0, 13.0]);
    }

    #[test]
    fn consecutive_already_normalized_reports_no_change() {
        let mut frame = row_frame(&[(0.0, 10.0), (12.0, 20.0), (22.0, 30.0)]);
        assert!(!collapse_consecutive_gaps(&mut frame, 2.0, Some(Axis::X)));
        assert_eq!(x_positions(&frame), vec![0.0, 12.0, 22.0]);
    }

    #[test]
    fn consecutive_abort_caps_wider_spacing() {
        let mut frame = row_frame(&[(0.0, 10.0), (15.0, 25.0)]).with_item_spacing(10.0);
        frame.layout_mode = LayoutMode::Horizontal;
        frame.children[1].locked = true;

        assert!(collapse_consecutive_gaps(&mut frame, 2.0, Some(Axis::X)));
        assert_eq!(frame.item_spacing(), Some(2.0));
    }

    #[test]
    fn consecutive_abort_never_widens_spacing() {
        let mut frame = row_frame(&[(0.0, 10.0), (15.0, 25.0)]).with_item_spacing(1.0);
        frame.layout_mode = LayoutMode::Horizontal;
        frame.children[1].locked = true;

        assert!(!collapse_consecutive_gaps(&mut frame, 2.0, Some(Axis::X)));
        assert_eq!(frame.item_spacing(), Some(1.0));
    }

    #[test]
    fn hint_overrides_inferred_axis() {
        // Children spread horizontally, but a vertical hint measures Y.
        let mut frame = Frame::new("frame", 0.0, 0.0, 500.0, 500.0);
        frame.children.push(ChildNode::placed("a", 0.0, 0.0, 10.0, 10.0));
        frame.children.push(ChildNode::placed("b", 100.0, 20.0, 10.0, 10.0));

        assert!(collapse_last_gap(&mut frame, 4.0, Some(Axis::Y)));
        assert_eq!(frame.children[1].position(), Some(Point::new(100.0, 14.0)));
    }

    #[test]
    fn inferred_axis_follows_larger_spread() {
        let mut frame = row_frame(&[(0.0, 10.0), (30.0, 40.0)]);
        let (axis, _) = ordered_gap_entries(&frame, None).unwrap();
        assert_eq!(axis, Axis::X);
    }
}
