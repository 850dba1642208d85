//! Fixed-size leaf used by the unit tests of the container modules.

use arbor_engine::coords::Vec2;

use crate::measure::MeasureSpec;
use crate::view::{view_handle, LayoutCtx, View, ViewBase, ViewHandle};

pub(crate) struct Block {
    base: ViewBase,
    size: Vec2,
    measure_calls: usize,
}

impl Block {
    pub(crate) fn new(w: f32, h: f32) -> Self {
        Self { base: ViewBase::new(), size: Vec2::new(w, h), measure_calls: 0 }
    }

    pub(crate) fn set_size(&mut self, w: f32, h: f32) {
        self.size = Vec2::new(w, h);
        self.base.invalidate();
    }

    pub(crate) fn measure_calls(&self) -> usize {
        self.measure_calls
    }
}

impl View for Block {
    fn base(&self) -> &ViewBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ViewBase {
        &mut self.base
    }

    fn on_measure(&mut self, width: MeasureSpec, height: MeasureSpec, _ctx: &LayoutCtx<'_>) -> Vec2 {
        self.measure_calls += 1;
        Vec2::new(width.resolve(self.size.x), height.resolve(self.size.y))
    }

    fn type_name(&self) -> &'static str {
        "Block"
    }
}

pub(crate) fn block(w: f32, h: f32) -> ViewHandle {
    view_handle(Block::new(w, h))
}
