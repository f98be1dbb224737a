//! # Graphics 模块
//!
//! 图形子系统实现。
//!
//! - [`SurfaceGraphics`]：附着到宿主表面，持有软件后备缓冲
//! - [`HeadlessGraphics`]：无头模式，只维护帧时间

mod headless;
mod timing;

pub use headless::HeadlessGraphics;
pub use timing::FrameTiming;

use crate::surface::{HostSurface, SurfaceBinding, SurfaceCapabilities};
use app_core::{Color, Graphics, HostInitializationError, RenderApi, SubsystemKind};
use image::{Rgba, RgbaImage};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::time::Instant;
use tracing::{info, warn};

/// 后备缓冲大小上限（字节，RGBA8）
pub const MAX_BACK_BUFFER_BYTES: u64 = 1 << 30;

/// 指定尺寸的后备缓冲字节数；超过 [`MAX_BACK_BUFFER_BYTES`] 时返回 None
pub fn back_buffer_bytes(width: u32, height: u32) -> Option<u64> {
    u64::from(width)
        .checked_mul(u64::from(height))
        .and_then(|pixels| pixels.checked_mul(4))
        .filter(|bytes| *bytes <= MAX_BACK_BUFFER_BYTES)
}

/// 协商渲染接口
///
/// 请求高级接口且表面支持时使用高级接口，否则退回基础接口；
/// 两者都不可用时协商失败。
pub fn negotiate_render_api(
    capabilities: SurfaceCapabilities,
    prefer_advanced_api: bool,
) -> Result<RenderApi, HostInitializationError> {
    if prefer_advanced_api && capabilities.advanced_api {
        return Ok(RenderApi::Advanced);
    }
    if capabilities.baseline_api {
        return Ok(RenderApi::Baseline);
    }

    let reason = if capabilities.advanced_api {
        "表面只支持高级渲染接口，但未允许使用".to_string()
    } else {
        "表面不支持任何渲染接口".to_string()
    };
    Err(HostInitializationError::CapabilityNegotiation {
        subsystem: SubsystemKind::Graphics,
        reason,
    })
}

/// 表面图形子系统
#[derive(Debug)]
pub struct SurfaceGraphics {
    binding: Rc<SurfaceBinding>,
    render_api: RenderApi,
    reduced_precision: bool,
    timing: RefCell<FrameTiming>,
    /// 软件后备缓冲，尺寸与渲染区域一致
    back_buffer: RefCell<RgbaImage>,
}

impl SurfaceGraphics {
    /// 附着到宿主表面
    ///
    /// # 参数
    ///
    /// - `prefer_advanced_api`: 表面支持时使用高级渲染接口
    /// - `use_reduced_precision`: 启用低精度数值模式以节省内存
    pub fn attach(
        surface: &HostSurface,
        prefer_advanced_api: bool,
        use_reduced_precision: bool,
    ) -> Result<Self, HostInitializationError> {
        surface
            .check_attachable()
            .map_err(|reason| HostInitializationError::SurfaceUnusable {
                subsystem: SubsystemKind::Graphics,
                surface: surface.id().to_string(),
                reason,
            })?;

        let (width, height) = surface.size();
        if back_buffer_bytes(width, height).is_none() {
            return Err(HostInitializationError::SurfaceUnusable {
                subsystem: SubsystemKind::Graphics,
                surface: surface.id().to_string(),
                reason: format!(
                    "表面尺寸过大: {width}x{height}（后备缓冲上限 {MAX_BACK_BUFFER_BYTES} 字节）"
                ),
            });
        }

        let render_api = negotiate_render_api(surface.capabilities(), prefer_advanced_api)?;
        if prefer_advanced_api && render_api != RenderApi::Advanced {
            warn!(surface = %surface.id(), "表面不支持高级渲染接口，以基础接口降级运行");
        }

        info!(
            surface = %surface.id(),
            width,
            height,
            api = ?render_api,
            reduced_precision = use_reduced_precision,
            "图形子系统初始化完成"
        );

        Ok(Self {
            binding: Rc::new(SurfaceBinding::new(surface)),
            render_api,
            reduced_precision: use_reduced_precision,
            timing: RefCell::new(FrameTiming::new()),
            back_buffer: RefCell::new(RgbaImage::new(width, height)),
        })
    }

    /// 渲染区域绑定（输入子系统绑定到同一区域）
    pub fn binding(&self) -> Rc<SurfaceBinding> {
        Rc::clone(&self.binding)
    }

    /// 宿主表面尺寸变化
    ///
    /// 尺寸为零（表面被隐藏时宿主可能报告 0x0）或超过后备缓冲上限时忽略。
    pub fn resize(&self, width: u32, height: u32) {
        if width == 0 || height == 0 || back_buffer_bytes(width, height).is_none() {
            warn!(surface = %self.binding.surface(), width, height, "忽略无效的表面尺寸");
            return;
        }
        self.binding.resize(width, height);
        *self.back_buffer.borrow_mut() = RgbaImage::new(width, height);
    }

    /// 复制后备缓冲内容
    pub fn read_pixels(&self) -> RgbaImage {
        self.back_buffer.borrow().clone()
    }

    /// 将后备缓冲保存为 PNG
    pub fn save_screenshot(&self, path: impl AsRef<Path>) -> Result<(), image::ImageError> {
        self.back_buffer.borrow().save(path)
    }
}

impl Graphics for SurfaceGraphics {
    fn width(&self) -> u32 {
        self.binding.size().0
    }

    fn height(&self) -> u32 {
        self.binding.size().1
    }

    fn render_api(&self) -> RenderApi {
        self.render_api
    }

    fn uses_reduced_precision(&self) -> bool {
        self.reduced_precision
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

    fn clear(&self, color: Color) {
        let pixel = Rgba(color.to_rgba8());
        for p in self.back_buffer.borrow_mut().pixels_mut() {
            *p = pixel;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::SurfaceId;

    fn caps(baseline_api: bool, advanced_api: bool) -> SurfaceCapabilities {
        SurfaceCapabilities {
            baseline_api,
            advanced_api,
            input_capture: true,
        }
    }

    #[test]
    fn test_negotiate_render_api() {
        assert_eq!(negotiate_render_api(caps(true, true), true), Ok(RenderApi::Advanced));
        assert_eq!(negotiate_render_api(caps(true, true), false), Ok(RenderApi::Baseline));
        // 降级：请求了高级接口但表面不支持
        assert_eq!(negotiate_render_api(caps(true, false), true), Ok(RenderApi::Baseline));
        assert!(negotiate_render_api(caps(false, true), false).is_err());
        assert!(negotiate_render_api(caps(false, false), true).is_err());
    }

    #[test]
    fn test_attach_rejects_destroyed_surface() {
        let mut surface = HostSurface::new(SurfaceId(3), 64, 64);
        surface.destroy();

        let err = SurfaceGraphics::attach(&surface, true, false).unwrap_err();
        assert_eq!(err.subsystem(), SubsystemKind::Graphics);
        assert!(matches!(err, HostInitializationError::SurfaceUnusable { .. }));
    }

    #[test]
    fn test_attach_rejects_oversized_surface() {
        for (width, height) in [(u32::MAX, u32::MAX), (100_000, 100_000), (16_385, 16_384)] {
            let surface = HostSurface::new(SurfaceId(4), width, height);
            let err = SurfaceGraphics::attach(&surface, true, false).unwrap_err();
            assert!(matches!(
                err,
                HostInitializationError::SurfaceUnusable {
                    subsystem: SubsystemKind::Graphics,
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_back_buffer_bytes_limit() {
        assert_eq!(back_buffer_bytes(16_384, 16_384), Some(MAX_BACK_BUFFER_BYTES));
        assert_eq!(back_buffer_bytes(16_384, 16_385), None);
        assert_eq!(back_buffer_bytes(u32::MAX, u32::MAX), None);
        assert_eq!(back_buffer_bytes(640, 480), Some(640 * 480 * 4));
    }

    #[test]
    fn test_clear_and_read_pixels() {
        let surface = HostSurface::new(SurfaceId(1), 4, 2);
        let graphics = SurfaceGraphics::attach(&surface, false, false).unwrap();

        graphics.clear(Color::rgba(1.0, 0.0, 0.0, 1.0));
        let pixels = graphics.read_pixels();
        assert_eq!(pixels.dimensions(), (4, 2));
        assert!(pixels.pixels().all(|p| p.0 == [255, 0, 0, 255]));
    }

    #[test]
    fn test_resize_updates_binding_and_buffer() {
        let surface = HostSurface::new(SurfaceId(1), 4, 2);
        let graphics = SurfaceGraphics::attach(&surface, true, true).unwrap();
        let binding = graphics.binding();

        graphics.resize(8, 6);
        assert_eq!((graphics.width(), graphics.height()), (8, 6));
        assert_eq!(binding.size(), (8, 6));
        assert_eq!(graphics.read_pixels().dimensions(), (8, 6));

        graphics.resize(0, 6);
        assert_eq!(binding.size(), (8, 6));
        graphics.resize(u32::MAX, u32::MAX);
        assert_eq!(binding.size(), (8, 6));
        assert_eq!(graphics.read_pixels().dimensions(), (8, 6));
        assert!(graphics.uses_reduced_precision());
    }
}
