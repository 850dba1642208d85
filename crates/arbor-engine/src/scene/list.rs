use crate::coords::Rect;
use crate::paint::Color;

use super::{DrawCmd, TextCmd};

/// One recorded command plus the clip in effect when it was pushed.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub cmd: DrawCmd,
    /// Scissor rect in logical pixels. `None` = no clipping.
    pub clip_rect: Option<Rect>,
}

/// Draw stream for one frame.
///
/// Items are kept in emission order; there is no z sorting. Clips nest:
/// [`push_clip`](Self::push_clip) intersects with the current clip.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    clip_stack: Vec<Rect>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items and the clip stack. Keeps allocated capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.clip_stack.clear();
    }

    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        self.items.push(DrawItem { cmd, clip_rect: self.clip_stack.last().copied() });
    }

    #[inline]
    pub fn push_fill_rect(&mut self, rect: Rect, color: Color) {
        self.push(DrawCmd::FillRect { rect, color });
    }

    #[inline]
    pub fn push_text(&mut self, text: TextCmd) {
        self.push(DrawCmd::Text(text));
    }

    /// Begins a scissor region, intersected with the enclosing one.
    ///
    /// Must be balanced with [`pop_clip`](Self::pop_clip).
    pub fn push_clip(&mut self, rect: Rect) {
        let effective = match self.clip_stack.last() {
            None => rect,
            // No overlap: zero-area clip so a backend skips the contents.
            Some(&parent) => parent.intersect(rect).unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0)),
        };
        self.clip_stack.push(effective);
    }

    /// # Panics
    /// Panics (debug only) without a matching `push_clip`.
    pub fn pop_clip(&mut self) {
        debug_assert!(!self.clip_stack.is_empty(), "pop_clip called without matching push_clip");
        self.clip_stack.pop();
    }

    /// Text commands in emission order.
    pub fn texts(&self) -> impl Iterator<Item = &TextCmd> {
        self.items.iter().filter_map(|item| match &item.cmd {
            DrawCmd::Text(t) => Some(t),
            _ => None,
        })
    }
}
