use crate::model::{Bounds, ChildNode, Frame};

/// Extremes of a frame's visible children, with the vertical split that
/// bottom trimming needs: the lowest edge of non-pinned content and the
/// group of bottom-anchored children.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentBounds {
    pub bounds: Bounds,
    pub max_y_unpinned: Option<f64>,
    pub bottom_pinned: Option<PinnedGroup>,
}

/// Children whose vertical constraint ties them to the frame's bottom
/// edge, indexed into `Frame::children`.
#[derive(Debug, Clone, PartialEq)]
pub struct PinnedGroup {
    pub min_y: f64,
    pub max_y: f64,
    pub children: Vec<usize>,
}

impl PinnedGroup {
    pub fn span(&self) -> f64 { self.max_y - self.min_y }
}

/// Extents of one child in the frame's coordinate space. Children with
/// direct position fields are taken as-is; otherwise the host's absolute
/// render rectangle is mapped back through the frame's translation.
/// Invisible children never have bounds.
pub fn child_bounds(child: &ChildNode, frame: &Frame) -> Option<Bounds> {
    if !child.visible {
        return None;
    }
    if let (Some(pos), Some((width, height))) = (child.position(), child.size()) {
        return Some(Bounds::new(pos.x, pos.y, pos.x + width, pos.y + height));
    }
    let rect = child.render_bounds()?;
    let origin = frame.absolute_translation();
    Some(Bounds::from_rect(rect).translated(-origin.x, -origin.y))
}

/// Union of the frame's visible, measurable children, or `None` when
/// there is nothing to measure. Rotated children are covered by whatever
/// extent the host reports for them.
pub fn content_bounds(frame: &Frame) -> Option<ContentBounds> {
    let mut bounds: Option<Bounds> = None;
    let mut max_y_unpinned: Option<f64> = None;
    let mut pinned: Option<PinnedGroup> = None;

    for (index, child) in frame.children.iter().enumerate() {
        let Some(b) = child_bounds(child, frame) else {
            continue;
        };

        bounds = Some(match bounds {
            Some(acc) => Bounds::new(
                acc.min_x.min(b.min_x),
                acc.min_y.min(b.min_y),
                acc.max_x.max(b.max_x),
                acc.max_y.max(b.max_y),
            ),
            None => b,
        });

        // Re-anchoring needs a writable position, so bounds-only children
        // never join the pinned group.
        if child.is_bottom_anchored() && child.has_position() {
            match &mut pinned {
                Some(group) => {
                    group.min_y = group.min_y.min(b.min_y);
                    group.max_y = group.max_y.max(b.max_y);
                    group.children.push(index);
                }
                None => {
                    pinned = Some(PinnedGroup {
                        min_y: b.min_y,
                        max_y: b.max_y,
                        children: vec![index],
                    });
                }
            }
        } else {
            max_y_unpinned = Some(max_y_unpinned.map_or(b.max_y, |m| m.max(b.max_y)));
        }
    }

    Some(ContentBounds {
        bounds: bounds?,
        max_y_unpinned,
        bottom_pinned: pinned,
    })
}
