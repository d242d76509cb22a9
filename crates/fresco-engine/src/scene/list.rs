use crate::coords::BBox;

use super::{DrawCmd, SortKey, ZIndex};

/// A single draw item: sort key + command + clip box.
#[derive(Debug, Clone)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
    /// Scissor box in logical pixels. `None` = no clipping.
    pub clip: Option<BBox>,
}

/// Recorded draw stream for a frame.
///
/// `push()` is O(1); paint-order iteration reuses an internal index buffer,
/// so a warmed list does not allocate per frame.
///
/// # Clipping
///
/// [`push_clip`](Self::push_clip) / [`pop_clip`](Self::pop_clip) scope
/// subsequent commands to a scissor box. Nested clips are intersected with
/// their parent.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,

    /// Stack of effective clip boxes; the top is already intersected with
    /// all parents.
    clip_stack: Vec<BBox>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items and the clip stack, keeping capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_dirty = true;
        self.sorted_indices.clear();
        self.clip_stack.clear();
    }

    /// Returns items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    /// Pushes a draw command with the given z-index.
    ///
    /// The item inherits the current clip box from the clip stack.
    #[inline]
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.items.push(DrawItem {
            key: SortKey::new(z, order),
            cmd,
            clip: self.clip_stack.last().copied(),
        });

        self.sorted_dirty = true;
    }

    /// Begins a scissor region; must be balanced with [`pop_clip`](Self::pop_clip).
    #[inline]
    pub fn push_clip(&mut self, clip: BBox) {
        let effective = match self.clip_stack.last() {
            None => clip,
            // No overlap with the parent collapses to an empty box, which the
            // renderer skips.
            Some(&parent) => parent
                .intersect(clip)
                .unwrap_or(BBox::new(clip.min, clip.min)),
        };
        self.clip_stack.push(effective);
    }

    /// Ends the most recent scissor region.
    #[inline]
    pub fn pop_clip(&mut self) {
        debug_assert!(!self.clip_stack.is_empty(), "pop_clip without matching push_clip");
        self.clip_stack.pop();
    }

    /// Iterates items in paint order (back-to-front) without cloning commands.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }

        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());

        // SortKey includes insertion order, so the sort is stable by key alone.
        self.sorted_indices
            .sort_by(|&a, &b| self.items[a].key.cmp(&self.items[b].key));

        self.sorted_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;

    fn box_at(i: f32) -> BBox {
        BBox::new(Vec2::new(i, i), Vec2::new(i + 1.0, i + 1.0))
    }

    fn rect_x(item: &DrawItem) -> f32 {
        match &item.cmd {
            DrawCmd::Rect(r) => r.rect.min.x,
            _ => panic!("expected rect"),
        }
    }

    #[test]
    fn paint_order_sorts_by_z_then_insertion() {
        let mut list = DrawList::new();
        list.push_solid_rect(ZIndex::new(1), box_at(0.0), Color::transparent());
        list.push_solid_rect(ZIndex::new(0), box_at(1.0), Color::transparent());
        list.push_solid_rect(ZIndex::new(1), box_at(2.0), Color::transparent());

        let xs: Vec<f32> = list.iter_in_paint_order().map(rect_x).collect();
        assert_eq!(xs, vec![1.0, 0.0, 2.0]);
    }

    #[test]
    fn nested_clips_intersect_with_parent() {
        let mut list = DrawList::new();
        list.push_clip(BBox::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0)));
        list.push_clip(BBox::new(Vec2::new(50.0, 50.0), Vec2::new(200.0, 200.0)));
        list.push_solid_rect(ZIndex::default(), box_at(0.0), Color::transparent());
        list.pop_clip();
        list.pop_clip();

        let clip = list.items()[0].clip.unwrap();
        assert_eq!(clip, BBox::new(Vec2::new(50.0, 50.0), Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn clear_resets_order_and_clips() {
        let mut list = DrawList::new();
        list.push_clip(box_at(0.0));
        list.push_solid_rect(ZIndex::default(), box_at(0.0), Color::transparent());
        list.clear();

        list.push_solid_rect(ZIndex::default(), box_at(1.0), Color::transparent());
        assert_eq!(list.items().len(), 1);
        assert_eq!(list.items()[0].key.order, 0);
        assert!(list.items()[0].clip.is_none());
    }
}
