//! 无头图形子系统

use super::FrameTiming;
use app_core::{Color, Graphics, RenderApi};
use std::cell::RefCell;
use std::time::Instant;

/// 无头图形子系统
///
/// 没有表面也没有渲染上下文，尺寸恒为 0x0，只维护帧时间。
#[derive(Debug, Default)]
pub struct HeadlessGraphics {
    timing: RefCell<FrameTiming>,
}

impl HeadlessGraphics {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Graphics for HeadlessGraphics {
    fn width(&self) -> u32 {
        0
    }

    fn height(&self) -> u32 {
        0
    }

    fn render_api(&self) -> RenderApi {
        RenderApi::Baseline
    }

    fn uses_reduced_precision(&self) -> bool {
        false
    }

    fn delta_time(&self) -> f32 {
        self.timing.borrow().delta()
    }

    fn frames_per_second(&self) -> u32 {
        self.timing.borrow().fps()
    }

    fn frame_id(&self) -> u64 {
        self.timing.borrow().frame_id()
    }

    fn begin_frame(&self, now: Instant) {
        self.timing.borrow_mut().tick(now);
    }

    fn clear(&self, _color: Color) {}
}
