use std::fmt;

use tracing::{debug, warn};

use crate::common::config::Settings;
use crate::engine::bounds::content_bounds;
use crate::engine::gaps::{collapse_consecutive_gaps, collapse_last_gap};
use crate::engine::resize::apply_bounds;
use crate::model::SceneNode;

/// Host affordance for re-running the extension straight from a node.
pub const RELAUNCH_KEY: &str = "open";
pub const RELAUNCH_LABEL: &str = "";

/// Which gap pass ran for a batch, for summary wording.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GapPass {
    None,
    Last { target: f64 },
    All { target: f64 },
}

/// Outcome tallies for one batch resize. `Display` renders the
/// user-facing notification.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSummary {
    pub total: usize,
    pub resized: usize,
    pub skipped_rotation: usize,
    pub skipped_no_content: usize,
    pub skipped_errors: usize,
    pub gap_changes: usize,
    pub gap_pass: GapPass,
}

impl ResizeSummary {
    pub fn skipped(&self) -> usize {
        self.skipped_rotation + self.skipped_no_content + self.skipped_errors
    }
}

impl fmt::Display for ResizeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total == 0 {
            return write!(f, "Select at least one frame.");
        }

        write!(
            f,
            "Done. Resized {} of {} frame{}",
            self.resized,
            self.total,
            plural(self.total)
        )?;

        match self.gap_pass {
            GapPass::All { target } => write!(
                f,
                ". Set all consecutive gaps to {target}px in {} frame{}",
                self.gap_changes,
                plural(self.gap_changes)
            )?,
            GapPass::Last { target } => write!(
                f,
                ". Set the last gap to {target}px in {} frame{}",
                self.gap_changes,
                plural(self.gap_changes)
            )?,
            GapPass::None => {}
        }

        if self.skipped() > 0 {
            write!(f, ". Skipped {}", self.skipped())?;
        }
        write!(f, ".")
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

/// Runs the configured gap pass and resize over every frame-type node in
/// the selection. Failures are isolated per frame; one bad node never
/// aborts the batch.
pub fn resize_selected_frames(selection: &mut [SceneNode], settings: &Settings) -> ResizeSummary {
    let gap_pass = if settings.remove_all_gaps {
        GapPass::All { target: settings.gap }
    } else if settings.remove_last_gap {
        GapPass::Last { target: settings.gap }
    } else {
        GapPass::None
    };
    let axis_hint = settings.mode.gap_axis();

    let mut summary = ResizeSummary {
        total: 0,
        resized: 0,
        skipped_rotation: 0,
        skipped_no_content: 0,
        skipped_errors: 0,
        gap_changes: 0,
        gap_pass,
    };

    debug!(
        "Resizing selection with {} trim, padding {}px",
        settings.mode.label(),
        settings.padding
    );

    for node in selection.iter_mut() {
        let Some(frame) = node.as_frame_mut() else {
            continue;
        };
        summary.total += 1;

        frame.set_relaunch_data(RELAUNCH_KEY, RELAUNCH_LABEL);

        if frame.rotation != 0.0 {
            debug!("Skipping rotated frame {:?}", frame.name);
            summary.skipped_rotation += 1;
            continue;
        }

        match gap_pass {
            GapPass::All { target } => {
                if collapse_consecutive_gaps(frame, target, axis_hint) {
                    summary.gap_changes += 1;
                }
            }
            GapPass::Last { target } => {
                if collapse_last_gap(frame, target, axis_hint) {
                    summary.gap_changes += 1;
                }
            }
            GapPass::None => {}
        }

        let Some(content) = content_bounds(frame) else {
            debug!("Skipping frame {:?} with no measurable content", frame.name);
            summary.skipped_no_content += 1;
            continue;
        };

        match apply_bounds(frame, settings.mode, &content, settings.padding) {
            Ok(()) => summary.resized += 1,
            Err(err) => {
                warn!("Failed to resize frame {:?}: {err}", frame.name);
                summary.skipped_errors += 1;
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::resize::TrimMode;
    use crate::model::{ChildNode, Frame, SceneNode};

    fn frame_with_child(name: &str) -> Frame {
        let mut frame = Frame::new(name, 0.0, 0.0, 200.0, 200.0);
        frame.children.push(ChildNode::placed("child", 10.0, 10.0, 50.0, 50.0));
        frame
    }

    fn settings() -> Settings {
        Settings::default()
    }

    #[test]
    fn tallies_mixed_selection_outcomes() {
        let mut rotated = frame_with_child("rotated");
        rotated.rotation = 15.0;
        let mut locked = frame_with_child("locked");
        locked.locked = true;

        let mut selection = vec![
            SceneNode::other("text"),
            SceneNode::Frame(frame_with_child("good")),
            SceneNode::Frame(rotated),
            SceneNode::Frame(Frame::new("empty", 0.0, 0.0, 50.0, 50.0)),
            SceneNode::Frame(locked),
        ];

        let summary = resize_selected_frames(&mut selection, &settings());

        assert_eq!(summary.total, 4, "non-frame nodes are not counted");
        assert_eq!(summary.resized, 1);
        assert_eq!(summary.skipped_rotation, 1);
        assert_eq!(summary.skipped_no_content, 1);
        assert_eq!(summary.skipped_errors, 1);
        assert_eq!(summary.skipped(), 3);
    }

    #[test]
    fn rotated_frames_are_tagged_but_never_resized() {
        let mut rotated = frame_with_child("rotated");
        rotated.rotation = 0.5;
        let mut selection = vec![SceneNode::Frame(rotated)];

        let summary = resize_selected_frames(&mut selection, &settings());

        assert_eq!(summary.resized, 0);
        assert_eq!(summary.skipped_rotation, 1);
        let frame = selection[0].as_frame().unwrap();
        assert_eq!(frame.relaunch_data(RELAUNCH_KEY), Some(RELAUNCH_LABEL));
        assert_eq!(frame.width(), 200.0, "rotated frame left untouched");
    }

    #[test]
    fn last_gap_pass_counts_changed_frames() {
        let mut frame = Frame::new("row", 0.0, 0.0, 200.0, 50.0);
        frame.children.push(ChildNode::placed("a", 0.0, 0.0, 10.0, 10.0));
        frame.children.push(ChildNode::placed("b", 15.0, 0.0, 10.0, 10.0));
        let mut selection = vec![SceneNode::Frame(frame)];

        let mut settings = settings();
        settings.mode = TrimMode::Horizontal;
        settings.gap = 2.0;
        settings.remove_last_gap = true;

        let summary = resize_selected_frames(&mut selection, &settings);

        assert_eq!(summary.gap_changes, 1);
        assert_eq!(summary.resized, 1);
        let frame = selection[0].as_frame().unwrap();
        // Gap collapsed to 2, then the frame wrapped the content.
        assert_eq!(frame.width(), 22.0);
    }

    #[test]
    fn gap_change_still_counts_when_the_resize_fails() {
        let mut frame = Frame::new("row", 0.0, 0.0, 200.0, 50.0);
        frame.locked = true;
        frame.children.push(ChildNode::placed("a", 0.0, 0.0, 10.0, 10.0));
        frame.children.push(ChildNode::placed("b", 15.0, 0.0, 10.0, 10.0));
        let mut selection = vec![SceneNode::Frame(frame)];

        let mut settings = settings();
        settings.gap = 2.0;
        settings.remove_last_gap = true;

        let summary = resize_selected_frames(&mut selection, &settings);

        assert_eq!(summary.gap_changes, 1);
        assert_eq!(summary.skipped_errors, 1);
        assert_eq!(summary.resized, 0);
    }

    #[test]
    fn all_gaps_pass_wins_over_last_gap_flag() {
        let mut frame = Frame::new("row", 0.0, 0.0, 200.0, 50.0);
        frame.children.push(ChildNode::placed("a", 0.0, 0.0, 10.0, 10.0));
        frame.children.push(ChildNode::placed("b", 20.0, 0.0, 10.0, 10.0));
        frame.children.push(ChildNode::placed("c", 45.0, 0.0, 10.0, 10.0));
        let mut selection = vec![SceneNode::Frame(frame)];

        let mut settings = settings();
        settings.gap = 5.0;
        settings.remove_last_gap = true;
        settings.remove_all_gaps = true;

        let summary = resize_selected_frames(&mut selection, &settings);

        assert_eq!(summary.gap_pass, GapPass::All { target: 5.0 });
        let frame = selection[0].as_frame().unwrap();
        let xs: Vec<f64> = frame
            .children
            .iter()
            .map(|c| c.position().unwrap().x)
            .collect();
        // Both gaps normalized, not just the trailing one.
        assert_eq!(xs, vec![0.0, 15.0, 30.0]);
    }

    #[test]
    fn empty_selection_reports_the_frame_notice() {
        let mut selection = vec![SceneNode::other("text")];
        let summary = resize_selected_frames(&mut selection, &settings());

        assert_eq!(summary.total, 0);
        assert_eq!(summary.to_string(), "Select at least one frame.");
    }

    #[test]
    fn summary_wording_for_a_plain_batch() {
        let summary = ResizeSummary {
            total: 3,
            resized: 2,
            skipped_rotation: 0,
            skipped_no_content: 1,
            skipped_errors: 0,
            gap_changes: 0,
            gap_pass: GapPass::None,
        };
        assert_eq!(summary.to_string(), "Done. Resized 2 of 3 frames. Skipped 1.");
    }

    #[test]
    fn summary_wording_for_a_single_frame() {
        let summary = ResizeSummary {
            total: 1,
            resized: 1,
            skipped_rotation: 0,
            skipped_no_content: 0,
            skipped_errors: 0,
            gap_changes: 0,
            gap_pass: GapPass::None,
        };
        assert_eq!(summary.to_string(), "Done. Resized 1 of 1 frame.");
    }

    #[test]
    fn summary_wording_for_gap_passes() {
        let all = ResizeSummary {
            total: 2,
            resized: 2,
            skipped_rotation: 0,
            skipped_no_content: 0,
            skipped_errors: 0,
            gap_changes: 2,
            gap_pass: GapPass::All { target: 4.0 },
        };
        assert_eq!(
            all.to_string(),
            "Done. Resized 2 of 2 frames. Set all consecutive gaps to 4px in 2 frames."
        );

        let last = ResizeSummary {
            total: 2,
            resized: 1,
            skipped_rotation: 1,
            skipped_no_content: 0,
            skipped_errors: 0,
            gap_changes: 1,
            gap_pass: GapPass::Last { target: 2.5 },
        };
        assert_eq!(
            last.to_string(),
            "Done. Resized 1 of 2 frames. Set the last gap to 2.5px in 1 frame. Skipped 1."
        );
    }
}
